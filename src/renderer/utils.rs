// ── Letterbox viewport math ───────────────────────────────────────────────────
//
// The playfield is drawn onto a surface of `logical * scale` pixels, and that
// surface is centred inside the window.  The bars left over on the long axis
// stay cleared to black.

use crate::window::{WindowConfig, fit_surface};

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Where the scaled playfield surface sits inside the window, in physical
/// pixels, plus the scale that maps playfield units onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Horizontal offset from the left edge of the window.
    pub x: f32,
    /// Vertical offset from the top edge of the window.
    pub y: f32,
    /// Surface width.
    pub width: f32,
    /// Surface height.
    pub height: f32,
    /// Playfield units → surface pixels.
    pub scale: f32,
}

impl Viewport {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, width: 0.0, height: 0.0, scale: 0.0 };

    /// True when there is nothing to draw into (minimised window).
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

// ── letterbox_viewport ────────────────────────────────────────────────────────

/// Calculate the letterbox `Viewport` for `config`.
///
/// ```text
/// scale = min(physical_width  / logical_width,
///             physical_height / logical_height)
/// x = (physical_width  - logical_width  * scale) / 2
/// y = (physical_height - logical_height * scale) / 2
/// ```
///
/// Returns [`Viewport::ZERO`] when either logical dimension is zero.
pub fn letterbox_viewport(config: &WindowConfig) -> Viewport {
    if config.logical_width == 0 || config.logical_height == 0 {
        return Viewport::ZERO;
    }

    let pw = config.physical_width  as f32;
    let ph = config.physical_height as f32;
    let fit = fit_surface(pw, ph, config);

    Viewport {
        x: (pw - fit.width) / 2.0,
        y: (ph - fit.height) / 2.0,
        width: fit.width,
        height: fit.height,
        scale: fit.scale,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowMode;

    fn cfg(pw: u32, ph: u32) -> WindowConfig {
        WindowConfig { physical_width: pw, physical_height: ph,
                       logical_width: 800,  logical_height: 600,
                       mode: WindowMode::Windowed }
    }

    #[test]
    fn exact_fit_no_offset() {
        let v = letterbox_viewport(&cfg(800, 600));
        assert_eq!(v, Viewport { x: 0.0, y: 0.0, width: 800.0, height: 600.0, scale: 1.0 });
    }

    #[test]
    fn wide_window_gets_side_bars() {
        // scale = min(2.0, 1.5) = 1.5 → 1200×900, bars of 200 on each side.
        let v = letterbox_viewport(&cfg(1600, 900));
        assert!((v.scale - 1.5).abs() < 1e-6);
        assert!((v.x - 200.0).abs() < 1e-3, "x={}", v.x);
        assert_eq!(v.y, 0.0);
        assert!((v.width  - 1200.0).abs() < 1e-3);
        assert!((v.height -  900.0).abs() < 1e-3);
    }

    #[test]
    fn tall_window_gets_top_bottom_bars() {
        // scale = min(1.0, 2.0) = 1.0 → 800×600, y = (1200-600)/2 = 300.
        let v = letterbox_viewport(&cfg(800, 1200));
        assert_eq!(v.scale, 1.0);
        assert_eq!(v.x, 0.0);
        assert!((v.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn zero_physical_size_is_empty() {
        let v = letterbox_viewport(&cfg(0, 0));
        assert!(v.is_empty());
        assert_eq!(v.scale, 0.0);
    }

    #[test]
    fn viewport_never_exceeds_physical_bounds() {
        for (pw, ph) in [(1920u32, 1080u32), (640, 480), (1280, 1024), (3840, 2160), (333, 999)] {
            let v = letterbox_viewport(&cfg(pw, ph));
            assert!(v.x >= 0.0 && v.y >= 0.0, "negative offset for {pw}x{ph}");
            assert!(v.x + v.width  <= pw as f32 + 1e-3, "overflows x for {pw}x{ph}");
            assert!(v.y + v.height <= ph as f32 + 1e-3, "overflows y for {pw}x{ph}");
        }
    }
}
