use crate::geometry::{BASE_HEIGHT, BASE_WIDTH};

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowMode {
    /// Standard decorated, resizable window.
    Windowed,
    /// Exclusive hardware fullscreen at the configured resolution.
    Fullscreen,
    /// Borderless window sized to match the monitor's native resolution.
    Borderless,
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window configuration snapshot.
///
/// - **physical** dimensions are the current pixel size of the OS window.
/// - **logical** dimensions are the playfield resolution every game
///   coordinate is expressed in (800 × 600).
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    /// Window width in physical pixels.
    pub physical_width: u32,
    /// Window height in physical pixels.
    pub physical_height: u32,
    /// Playfield width.
    pub logical_width: u32,
    /// Playfield height.
    pub logical_height: u32,
    /// Active window mode.
    pub mode: WindowMode,
}

impl Default for WindowConfig {
    /// An 800 × 600 window showing the 800 × 600 playfield at scale 1.
    fn default() -> Self {
        Self {
            physical_width:  BASE_WIDTH as u32,
            physical_height: BASE_HEIGHT as u32,
            logical_width:   BASE_WIDTH as u32,
            logical_height:  BASE_HEIGHT as u32,
            mode:            WindowMode::Windowed,
        }
    }
}

impl WindowConfig {
    /// Aspect ratio of the **logical** resolution (`logical_width / logical_height`).
    ///
    /// Returns `0.0` when `logical_height` is zero to avoid division by zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.logical_height == 0 {
            return 0.0;
        }
        self.logical_width as f32 / self.logical_height as f32
    }

    /// Record a new physical window size (called on every resize).
    pub fn with_physical_size(self, width: u32, height: u32) -> Self {
        Self { physical_width: width, physical_height: height, ..self }
    }

    /// Uniform playfield → surface scale for the current physical size.
    pub fn scale(&self) -> f32 {
        fit_surface(self.physical_width as f32, self.physical_height as f32, self).scale
    }
}

// ── SurfaceFit ────────────────────────────────────────────────────────────────

/// Size of the drawing surface that fits the playfield into a viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceFit {
    /// Playfield units → surface pixels.
    pub scale: f32,
    /// Surface width in pixels (`logical_width * scale`).
    pub width: f32,
    /// Surface height in pixels (`logical_height * scale`).
    pub height: f32,
}

/// Fit the logical resolution of `config` into a `viewport_w × viewport_h`
/// viewport, preserving aspect ratio:
///
/// ```text
/// scale = min(viewport_w / logical_width, viewport_h / logical_height)
/// ```
///
/// A zero logical dimension yields a zero-sized fit with scale 0.
pub fn fit_surface(viewport_w: f32, viewport_h: f32, config: &WindowConfig) -> SurfaceFit {
    if config.logical_width == 0 || config.logical_height == 0 {
        return SurfaceFit { scale: 0.0, width: 0.0, height: 0.0 };
    }
    let lw = config.logical_width as f32;
    let lh = config.logical_height as f32;
    let scale = (viewport_w / lw).min(viewport_h / lh).max(0.0);
    SurfaceFit { scale, width: lw * scale, height: lh * scale }
}
