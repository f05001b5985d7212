pub mod assets;
pub mod config;
pub mod confetti;
pub mod content;
pub mod dialogue;
pub mod draw;
pub mod engine;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod scheduler;
pub mod window;
pub mod world;

pub use error::{GameError, Result};
