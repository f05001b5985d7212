//! Command-line launch options.

use std::path::PathBuf;

use crate::window::WindowMode;

#[derive(Clone, Debug, PartialEq)]
pub struct LaunchConfig {
    /// Content file to use instead of the embedded one.
    pub content: Option<PathBuf>,
    /// Directory the content's image paths are resolved against.  Without
    /// one the images compiled into the binary are used.
    pub assets: Option<PathBuf>,
    /// Periodic FPS logging.
    pub debug: bool,
    pub mode: WindowMode,
    pub help: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            content: None,
            assets: None,
            debug: false,
            mode: WindowMode::Windowed,
            help: false,
        }
    }
}

impl LaunchConfig {
    /// Parse `args` (including the program name at index 0).  Unknown flags
    /// are ignored with a warning; a flag missing its value keeps the default.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--content" => {
                    if let Some(path) = args.get(i + 1) {
                        config.content = Some(PathBuf::from(path));
                        i += 1;
                    }
                }
                "--assets" => {
                    if let Some(dir) = args.get(i + 1) {
                        config.assets = Some(PathBuf::from(dir));
                        i += 1;
                    }
                }
                "--debug" => config.debug = true,
                "--fullscreen" => config.mode = WindowMode::Fullscreen,
                "--borderless" => config.mode = WindowMode::Borderless,
                "--help" | "-h" => config.help = true,
                other => log::warn!("[config] ignoring unknown argument '{other}'"),
            }
            i += 1;
        }

        config
    }
}

pub fn usage() -> &'static str {
    "Usage: cakewalk [OPTIONS]\n\
     \n\
     Options:\n\
     \x20 --content <file>  Content JSON to play instead of the built-in one\n\
     \x20 --assets <dir>    Directory holding the images (default: built in)\n\
     \x20 --fullscreen      Exclusive fullscreen\n\
     \x20 --borderless      Borderless fullscreen\n\
     \x20 --debug           Log frame timing\n\
     \x20 -h, --help        Show this help\n\
     \n\
     Controls: arrows / WASD move, Space / Enter / click advance, Escape quits."
}
