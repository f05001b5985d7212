use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the game from starting or rendering.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid content: {0}")]
    InvalidContent(String),

    #[error("failed to load asset '{name}' from {path}: {source}")]
    Asset {
        name: String,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("only {loaded} of {expected} images loaded (failed: {})", .failed.join(", "))]
    IncompleteAssets {
        loaded: usize,
        expected: usize,
        failed: Vec<String>,
    },

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("the window surface reports no texture formats")]
    NoSurfaceFormat,

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

pub type Result<T> = std::result::Result<T, GameError>;
