//! Image loading.  Every image is decoded up front; the window does not open
//! until all of them are in memory.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::content::{Content, FontContent};
use crate::draw::ImageId;
use crate::error::{GameError, Result};
use crate::renderer::sprite_atlas::FONT;
use crate::renderer::text::Font;

/// Portraits and the cake are drawn at most a few hundred pixels across, so
/// larger photos are shrunk on load to keep the atlas small.
pub const MAX_IMAGE_SIDE: u32 = 512;

/// Cell size of the built-in font atlas.
pub const BUILTIN_FONT_CELL: (u32, u32) = (16, 24);

/// The images shipped in `assets/`, compiled in so the game starts without an
/// asset directory.
const BUILTIN_IMAGES: [(&str, &str, &[u8]); 4] = [
    ("player", "player.png", include_bytes!("../assets/player.png")),
    ("npc", "npc.png", include_bytes!("../assets/npc.png")),
    ("cake", "cake.png", include_bytes!("../assets/cake.png")),
    (FONT, "font_atlas_16x24.png", include_bytes!("../assets/font_atlas_16x24.png")),
];

/// How many of the expected images have been decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub expected: usize,
}

impl LoadProgress {
    pub fn new(expected: usize) -> Self {
        Self { loaded: 0, expected }
    }

    pub fn is_complete(&self) -> bool {
        self.loaded == self.expected
    }
}

/// Decoded images keyed by atlas name, plus the font metrics.
pub struct Assets {
    pub images: Vec<(String, RgbaImage)>,
    pub font: Font,
}

impl Assets {
    /// Load the three sprites and the font image named in `content` from
    /// `asset_dir`.  Every file is tried; if any of them cannot be read or
    /// decoded the whole set is rejected.
    pub fn load(content: &Content, asset_dir: &Path) -> Result<Self> {
        let paths = &content.assets;
        let files = [
            (ImageId::Player.name(), paths.player.as_str()),
            (ImageId::Npc.name(), paths.npc.as_str()),
            (ImageId::Cake.name(), paths.cake.as_str()),
            (FONT, paths.font.image.as_str()),
        ];
        let decoded = files.map(|(name, file)| (name, open_image(name, &Content::asset_path(asset_dir, file))));
        let images = gather(decoded)?;

        let (w, h) = font_size(&images)?;
        let font = load_font(&paths.font, asset_dir, w, h)?;
        log::info!("[assets] loaded {} images from {}", images.len(), asset_dir.display());
        Ok(Self { images, font })
    }

    /// The images compiled into the binary, with a 16x24 grid font.
    pub fn builtin() -> Result<Self> {
        let decoded = BUILTIN_IMAGES.map(|(name, file, bytes)| (name, decode_image(name, file, bytes)));
        let images = gather(decoded)?;

        let (w, h) = font_size(&images)?;
        let (cell_w, cell_h) = BUILTIN_FONT_CELL;
        log::info!("[assets] using {} built-in images", images.len());
        Ok(Self { images, font: Font::grid(cell_w, cell_h, w, h) })
    }
}

/// Keep every image that decoded and count it.  The set is only handed on
/// once the count reaches the total; otherwise every failed name is reported.
fn gather<const N: usize>(decoded: [(&str, Result<RgbaImage>); N]) -> Result<Vec<(String, RgbaImage)>> {
    let mut progress = LoadProgress::new(N);
    let mut images = Vec::with_capacity(N);
    let mut failed = Vec::new();

    for (name, result) in decoded {
        match result {
            Ok(img) => {
                // Glyph metrics address the font atlas in its own pixels.
                let img = if name == FONT { img } else { shrink(img) };
                images.push((name.to_string(), img));
                progress.loaded += 1;
            }
            Err(e) => {
                log::error!("[assets] {e}");
                failed.push(name.to_string());
            }
        }
    }

    if !progress.is_complete() {
        return Err(GameError::IncompleteAssets {
            loaded: progress.loaded,
            expected: progress.expected,
            failed,
        });
    }
    Ok(images)
}

fn font_size(images: &[(String, RgbaImage)]) -> Result<(u32, u32)> {
    images
        .iter()
        .find(|(name, _)| name == FONT)
        .map(|(_, img)| img.dimensions())
        .ok_or_else(|| GameError::IncompleteAssets {
            loaded: images.len(),
            expected: images.len() + 1,
            failed: vec![FONT.to_string()],
        })
}

fn open_image(name: &str, path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|source| GameError::Asset {
        name: name.to_string(),
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("[assets] {name}: {}x{} from {}", img.width(), img.height(), path.display());
    Ok(img.to_rgba8())
}

fn decode_image(name: &str, file: &str, bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(|source| GameError::Asset {
        name: name.to_string(),
        path: PathBuf::from(file),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Scale `img` down so neither side exceeds [`MAX_IMAGE_SIDE`], keeping its
/// aspect ratio.  Smaller images pass through untouched.
pub fn shrink(img: RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w <= MAX_IMAGE_SIDE && h <= MAX_IMAGE_SIDE {
        return img;
    }
    let ratio = MAX_IMAGE_SIDE as f32 / w.max(h) as f32;
    let nw = ((w as f32 * ratio).round() as u32).max(1);
    let nh = ((h as f32 * ratio).round() as u32).max(1);
    image::imageops::resize(&img, nw, nh, image::imageops::FilterType::Triangle)
}

fn load_font(font: &FontContent, asset_dir: &Path, w: u32, h: u32) -> Result<Font> {
    match &font.glyphs {
        None => Ok(Font::grid(font.cell_width, font.cell_height, w, h)),
        Some(file) => {
            let path = Content::asset_path(asset_dir, file);
            let json = std::fs::read_to_string(&path).map_err(|source| GameError::Io {
                path: path.clone(),
                source,
            })?;
            let parsed = Font::from_json(&json).map_err(|source| GameError::Json {
                what: path.display().to_string(),
                source,
            })?;
            if (parsed.texture_width, parsed.texture_height) != (w, h) {
                log::warn!(
                    "[assets] glyph file describes a {}x{} texture but the font image is {w}x{h}",
                    parsed.texture_width, parsed.texture_height
                );
            }
            Ok(parsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_keeps_small_images() {
        let img = RgbaImage::new(100, 40);
        assert_eq!(shrink(img).dimensions(), (100, 40));
    }

    #[test]
    fn shrink_caps_longest_side() {
        let img = RgbaImage::new(2048, 1024);
        assert_eq!(shrink(img).dimensions(), (512, 256));
    }

    #[test]
    fn builtin_set_is_complete() {
        let assets = Assets::builtin().unwrap();
        let names: Vec<&str> = assets.images.iter().map(|(n, _)| n.as_str()).collect();
        let mut expected: Vec<&str> = ImageId::ALL.iter().map(|id| id.name()).collect();
        expected.push(FONT);
        assert_eq!(names, expected);
        // 16 columns of 16x24 cells.
        assert_eq!(assets.font.glyphs[&'A'].x, 16);
        assert_eq!(assets.font.glyphs[&'A'].y, 96);
        assert_eq!(assets.font.line_height, 24);
    }

    #[test]
    fn gather_reports_every_failure() {
        let err = gather([
            ("player", Ok(RgbaImage::new(4, 4))),
            ("npc", decode_image("npc", "npc.png", b"nope")),
            ("cake", decode_image("cake", "cake.png", b"")),
        ])
        .unwrap_err();
        match err {
            GameError::IncompleteAssets { loaded, expected, failed } => {
                assert_eq!((loaded, expected), (1, 3));
                assert_eq!(failed, vec!["npc", "cake"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn progress_completes_at_expected() {
        let mut p = LoadProgress::new(2);
        assert!(!p.is_complete());
        p.loaded += 2;
        assert!(p.is_complete());
    }
}
