use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::assets::Assets;
use crate::draw::DrawList;
use crate::error::{GameError, Result};
use crate::input::InputState;
use crate::renderer::Renderer;
use crate::renderer::text::Font;
use crate::renderer::utils::{Viewport, letterbox_viewport};
use crate::scheduler::MAX_FRAME_TIME;
use crate::window::{WindowConfig, WindowMode, apply_window_settings};

// ── Color ──────────────────────────────────────────────────────────────────

/// Straight-alpha RGBA, each channel in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);

    /// Opaque colour from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self([
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ])
    }

    /// Opaque colour from hue in degrees, saturation and lightness in `[0, 1]`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        Self([r + m, g + m, b + m, 1.0])
    }
}

// ── Game trait ──────────────────────────────────────────────────────────────

pub trait Game {
    fn on_enter(&mut self, _engine: &mut Engine) {}
    /// Called once per display frame with the wall-clock seconds since the
    /// previous frame (capped at `MAX_FRAME_TIME`).
    fn update(&mut self, engine: &mut Engine, elapsed: f32);
    /// Queue this frame's draw commands with [`Engine::submit`].
    fn render(&mut self, engine: &mut Engine);
}

// ── Engine ──────────────────────────────────────────────────────────────────

pub struct Engine {
    /// GPU renderer: surface, pipeline, baked atlas.
    pub renderer: Renderer,
    /// Keyboard / mouse state for the current frame.
    pub input: InputState,
    font: Font,
    window_config: WindowConfig,
    viewport: Viewport,
    frame: DrawList,
    tick: u64,
    /// Set to `true` by `request_quit()`; the event loop exits after the current frame.
    quit_requested: bool,
    debug: bool,
    /// Rolling buffer of recent frame times for the debug FPS log.
    frame_times: VecDeque<f32>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    fn new(mut renderer: Renderer, font: Font, window_config: WindowConfig, debug: bool) -> Self {
        let size = renderer.window.inner_size();
        let window_config = window_config.with_physical_size(size.width, size.height);
        let viewport = letterbox_viewport(&window_config);
        renderer.resize(size.width, size.height, viewport);
        Self {
            renderer,
            input: InputState::new(),
            font,
            window_config,
            viewport,
            frame: DrawList::default(),
            tick: 0,
            quit_requested: false,
            debug,
            frame_times: VecDeque::with_capacity(60),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn font(&self) -> &Font { &self.font }
    pub fn scale(&self) -> f32 { self.viewport.scale }

    /// Replace the commands to be drawn this frame.
    pub fn submit(&mut self, list: DrawList) {
        self.frame = list;
    }

    /// Signal that the application should exit after the current frame.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        self.window_config = self.window_config.clone().with_physical_size(width, height);
        self.viewport = letterbox_viewport(&self.window_config);
        self.renderer.resize(width, height, self.viewport);
        log::debug!(
            "[engine] resized to {width}x{height}, scale {:.3}, surface {:.0}x{:.0}",
            self.viewport.scale, self.viewport.width, self.viewport.height
        );
    }

    fn record_frame_time(&mut self, elapsed: f32) {
        if self.frame_times.len() >= 60 {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(elapsed);
        if self.tick % 300 == 0 && !self.frame_times.is_empty() {
            let avg = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
            if avg > 0.0 {
                log::info!("[engine] FPS: {:.1} | FT: {:.2}ms", 1.0 / avg, avg * 1000.0);
            }
        }
    }
}

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    title: String,
    window: WindowConfig,
    debug: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            title: "cakewalk".into(),
            window: WindowConfig::default(),
            debug: false,
        }
    }
}

impl EngineBuilder {
    pub fn with_title(mut self, title: &str) -> Self { self.title = title.into(); self }
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window = self.window.with_physical_size(width, height);
        self
    }
    pub fn with_mode(mut self, mode: WindowMode) -> Self { self.window.mode = mode; self }
    pub fn with_debug(mut self, debug: bool) -> Self { self.debug = debug; self }

    /// Open the window and run `game` until the window closes or the game
    /// asks to quit.  `assets` must be fully loaded; they are uploaded to the
    /// GPU before the first frame.
    pub fn run(self, game: impl Game + 'static, assets: Assets) -> Result<()> {
        let event_loop = EventLoop::new()?;
        let mut app = App {
            config: self,
            game: Box::new(game),
            assets: Some(assets),
            engine: None,
            last_instant: None,
            error: None,
        };
        event_loop.run_app(&mut app)?;
        match app.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: EngineBuilder,
    game: Box<dyn Game>,
    /// Handed to the renderer on the first `resumed`.
    assets: Option<Assets>,
    engine: Option<Engine>,
    last_instant: Option<Instant>,
    /// First fatal error; reported by `EngineBuilder::run` after the loop exits.
    error: Option<GameError>,
}

impl App {
    fn start(&mut self, event_loop: &ActiveEventLoop, assets: Assets) -> Result<Engine> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(&self.config.title)
                    .with_inner_size(winit::dpi::PhysicalSize::new(
                        self.config.window.physical_width,
                        self.config.window.physical_height,
                    ))
                    .with_resizable(true),
            )?,
        );
        apply_window_settings(&window, &self.config.window);

        let (renderer, font) = pollster::block_on(Renderer::new(window, assets))?;
        Ok(Engine::new(renderer, font, self.config.window.clone(), self.config.debug))
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: GameError) {
        log::error!("[engine] {error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        let Some(assets) = self.assets.take() else { return };
        match self.start(event_loop, assets) {
            Ok(mut engine) => {
                self.game.on_enter(&mut engine);
                self.engine = Some(engine);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = self.engine.as_ref() {
            engine.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(engine) = self.engine.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => engine.handle_resize(size.width, size.height),

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => {
                    if engine.input.mouse_held.insert(button) {
                        engine.input.mouse_pressed.insert(button);
                    }
                }
                ElementState::Released => {
                    engine.input.mouse_held.remove(&button);
                }
            },

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(MAX_FRAME_TIME),
                    None => 0.0,
                };
                self.last_instant = Some(now);

                engine.tick += 1;
                if engine.debug {
                    engine.record_frame_time(elapsed);
                }

                self.game.update(engine, elapsed);
                if engine.quit_requested {
                    event_loop.exit();
                    return;
                }

                self.game.render(engine);
                let frame = std::mem::take(&mut engine.frame);
                match engine.renderer.render(&frame, &engine.font) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = engine.renderer.window.inner_size();
                        engine.handle_resize(size.width, size.height);
                    }
                    Err(e) => log::warn!("[engine] render error: {e}"),
                }

                // End of frame cleanup
                engine.input.clear_frame_state();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if engine.input.keys_held.insert(code) {
                        engine.input.keys_pressed.insert(code);
                    }
                }
                ElementState::Released => {
                    engine.input.keys_held.remove(&code);
                }
            },

            _ => {}
        }
    }
}
