use cakewalk::assets::Assets;
use cakewalk::config::{LaunchConfig, usage};
use cakewalk::content::Content;
use cakewalk::engine::Engine;
use cakewalk::game::Cakewalk;
use cakewalk::geometry::{BASE_HEIGHT, BASE_WIDTH};

fn run(config: LaunchConfig) -> cakewalk::Result<()> {
    let content = match &config.content {
        Some(path) => Content::load(path)?,
        None => Content::builtin()?,
    };
    // Every image is decoded before the window opens.
    let assets = match &config.assets {
        Some(dir) => Assets::load(&content, dir)?,
        None => {
            if config.content.is_some() {
                log::info!("[assets] no --assets given, the content's image paths are not used");
            }
            Assets::builtin()?
        }
    };

    Engine::builder()
        .with_title("Cakewalk")
        .with_size(BASE_WIDTH as u32, BASE_HEIGHT as u32)
        .with_mode(config.mode)
        .with_debug(config.debug)
        .run(Cakewalk::new(content), assets)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = LaunchConfig::from_args(&args);
    if config.help {
        println!("{}", usage());
        return;
    }

    if let Err(e) = run(config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
