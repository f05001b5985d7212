// ── Game content ─────────────────────────────────────────────────────────────
//
// Every piece of text and every fixed position in the game lives in a JSON
// content file.  The file shipped in `assets/content.json` is embedded into
// the binary and used unless `--content <path>` points somewhere else.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GameError, Result};

/// The content file bundled with the game.
pub const BUILTIN_CONTENT: &str = include_str!("../assets/content.json");

/// One NPC: where it stands and what it says, in order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NpcContent {
    pub position: [f32; 2],
    pub lines: Vec<String>,
}

/// Bitmap font description.
///
/// Without a `glyphs` file the atlas is treated as a uniform grid indexed by
/// code point (row-major, `image_width / cell_width` columns).  With one, the
/// file is a glyph-metrics JSON in the format read by
/// [`Font::from_json`](crate::renderer::text::Font::from_json).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FontContent {
    pub image: String,
    pub cell_width: u32,
    pub cell_height: u32,
    #[serde(default)]
    pub glyphs: Option<String>,
}

/// File names of the images the game needs, relative to the asset directory.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AssetPaths {
    pub player: String,
    pub npc: String,
    pub cake: String,
    pub font: FontContent,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Content {
    /// Label shown under every dialogue line.
    pub speaker: String,
    #[serde(default = "default_player_start")]
    pub player_start: [f32; 2],
    pub npcs: Vec<NpcContent>,
    #[serde(default)]
    pub flowers: Vec<[f32; 2]>,
    pub cake_message: String,
    pub assets: AssetPaths,
}

fn default_player_start() -> [f32; 2] {
    [100.0, 200.0]
}

impl Content {
    /// Parse and validate the embedded content file.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CONTENT, "built-in content")
    }

    /// Read, parse and validate a content file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// Parse and validate content from a JSON string.  `what` names the
    /// source in error messages.
    pub fn from_json(json: &str, what: &str) -> Result<Self> {
        let content: Content = serde_json::from_str(json).map_err(|source| GameError::Json {
            what: what.to_string(),
            source,
        })?;
        content.validate()?;
        Ok(content)
    }

    /// Reject content the game cannot progress through.
    pub fn validate(&self) -> Result<()> {
        if self.npcs.is_empty() {
            return Err(GameError::InvalidContent("at least one NPC is required".into()));
        }
        if let Some(i) = self.npcs.iter().position(|n| n.lines.is_empty()) {
            return Err(GameError::InvalidContent(format!("NPC {i} has no dialogue lines")));
        }
        let font = &self.assets.font;
        if font.cell_width == 0 || font.cell_height == 0 {
            return Err(GameError::InvalidContent("font cell size must be non-zero".into()));
        }
        Ok(())
    }

    /// Dialogue lines grouped per NPC, in NPC order.
    pub fn dialogue_lines(&self) -> Vec<Vec<String>> {
        self.npcs.iter().map(|n| n.lines.clone()).collect()
    }

    /// Resolve an asset file name against `asset_dir`.
    pub fn asset_path(asset_dir: &Path, file: &str) -> PathBuf {
        asset_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_is_valid() {
        let content = Content::builtin().unwrap();
        assert_eq!(content.npcs.len(), 2);
        assert_eq!(content.npcs[0].position, [400.0, 300.0]);
        assert_eq!(content.npcs[1].position, [700.0, 200.0]);
        assert_eq!(content.flowers.len(), 5);
        assert_eq!(content.player_start, [100.0, 200.0]);
    }

    #[test]
    fn player_start_defaults_when_missing() {
        let json = r#"{
            "speaker": "s",
            "npcs": [{ "position": [1.0, 2.0], "lines": ["hi"] }],
            "cake_message": "yay",
            "assets": { "player": "p.png", "npc": "n.png", "cake": "c.png",
                        "font": { "image": "f.png", "cell_width": 8, "cell_height": 8 } }
        }"#;
        let content = Content::from_json(json, "test").unwrap();
        assert_eq!(content.player_start, [100.0, 200.0]);
        assert!(content.flowers.is_empty());
        assert_eq!(content.assets.font.glyphs, None);
    }

    #[test]
    fn empty_npc_list_is_rejected() {
        let mut content = Content::builtin().unwrap();
        content.npcs.clear();
        assert!(matches!(content.validate(), Err(GameError::InvalidContent(_))));
    }

    #[test]
    fn npc_without_lines_is_rejected() {
        let mut content = Content::builtin().unwrap();
        content.npcs[1].lines.clear();
        let err = content.validate().unwrap_err();
        assert!(err.to_string().contains("NPC 1"), "got: {err}");
    }

    #[test]
    fn malformed_json_names_its_source() {
        let err = Content::from_json("{ not json", "broken.json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
