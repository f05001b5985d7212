pub mod config;

pub use config::{SurfaceFit, WindowConfig, WindowMode, fit_surface};

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

/// Apply `config` to `window`, updating decorations, fullscreen state, and size.
///
/// # Windowed
/// Leaves fullscreen, restores decorations, keeps the window resizable (every
/// resize refits the playfield) and requests
/// `config.physical_width × physical_height`.
///
/// # Fullscreen
/// Picks the current monitor's video mode closest in area to the configured
/// physical size.  Falls back to `Borderless` when no monitor handle or video
/// mode is available.
///
/// # Borderless
/// Borderless fullscreen on the current monitor; the monitor's native
/// resolution becomes the physical window size.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            window.set_resizable(true);
            // The resulting size (now or later) arrives as `WindowEvent::Resized`.
            let _ = window.request_inner_size(PhysicalSize::new(
                config.physical_width,
                config.physical_height,
            ));
        }

        WindowMode::Fullscreen => {
            let fullscreen = match window.current_monitor() {
                Some(monitor) => {
                    let target_area =
                        config.physical_width as u64 * config.physical_height as u64;

                    let best = monitor.video_modes().min_by_key(|vm| {
                        let s = vm.size();
                        let area = s.width as u64 * s.height as u64;
                        area.abs_diff(target_area)
                    });

                    match best {
                        Some(vm) => Fullscreen::Exclusive(vm),
                        None => Fullscreen::Borderless(Some(monitor)),
                    }
                }
                None => Fullscreen::Borderless(None),
            };

            window.set_fullscreen(Some(fullscreen));
        }

        WindowMode::Borderless => {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}
