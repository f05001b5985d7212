use std::collections::HashMap;

use serde::Deserialize;

// ── GlyphQuad ─────────────────────────────────────────────────────────────────

/// One positioned glyph, ready to become a textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Top-left corner in surface pixels.
    pub pos: [f32; 2],
    /// Width and height in surface pixels.
    pub size: [f32; 2],
    /// UV rectangle inside the font image, normalised to `[0, 1]`.
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

// ── layout_text ───────────────────────────────────────────────────────────────

/// Lay out a single line of `text` starting at `start_pos` (top-left, surface
/// pixels).
///
/// All glyph metrics are scaled uniformly by `font_size / font.line_height`.
/// Characters absent from `font.glyphs` are skipped without advancing the
/// cursor.  Returns nothing when `font.line_height` is zero.
pub fn layout_text(text: &str, font: &Font, start_pos: [f32; 2], font_size: f32) -> Vec<GlyphQuad> {
    if font.line_height == 0 {
        return Vec::new();
    }

    let scale = font_size / font.line_height as f32;
    let tw = font.texture_width as f32;
    let th = font.texture_height as f32;

    let mut quads = Vec::with_capacity(text.len());
    let mut cursor_x = start_pos[0];

    for ch in text.chars() {
        let Some(glyph) = font.glyphs.get(&ch) else {
            continue;
        };

        if glyph.width > 0 && glyph.height > 0 {
            quads.push(GlyphQuad {
                pos: [
                    cursor_x + glyph.x_offset as f32 * scale,
                    start_pos[1] + glyph.y_offset as f32 * scale,
                ],
                size: [glyph.width as f32 * scale, glyph.height as f32 * scale],
                uv_min: [glyph.x as f32 / tw, glyph.y as f32 / th],
                uv_max: [
                    (glyph.x + glyph.width) as f32 / tw,
                    (glyph.y + glyph.height) as f32 / th,
                ],
            });
        }

        cursor_x += glyph.x_advance as f32 * scale;
    }

    quads
}

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Metrics for a single character in the bitmap font atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub id: char,
    /// Top-left pixel of the glyph region in the font image.
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Offset applied when rendering (may be negative).
    pub x_offset: i32,
    pub y_offset: i32,
    /// How far to advance the cursor after drawing this glyph.
    pub x_advance: u32,
}

// ── Font ─────────────────────────────────────────────────────────────────────

/// A bitmap font: glyph rectangles inside one font image.
pub struct Font {
    pub glyphs: HashMap<char, Glyph>,
    /// Vertical distance between successive baselines in pixels.
    pub line_height: u32,
    /// Width of the font image in pixels.
    pub texture_width: u32,
    /// Height of the font image in pixels.
    pub texture_height: u32,
}

impl Font {
    /// Deserialise a `Font` from a glyph-metrics JSON string:
    ///
    /// ```json
    /// { "line_height": 24, "texture_width": 512, "texture_height": 512,
    ///   "glyphs": [ { "id": 65, "x": 0, "y": 0, "width": 14, "height": 20,
    ///                 "x_offset": 1, "y_offset": 2, "x_advance": 16 } ] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawFont = serde_json::from_str(json)?;

        let glyphs = raw
            .glyphs
            .into_iter()
            .filter_map(|g| {
                // Skip any code-point that isn't a valid Unicode scalar value.
                char::from_u32(g.id).map(|ch| {
                    (ch, Glyph {
                        id: ch,
                        x: g.x,
                        y: g.y,
                        width: g.width,
                        height: g.height,
                        x_offset: g.x_offset,
                        y_offset: g.y_offset,
                        x_advance: g.x_advance,
                    })
                })
            })
            .collect();

        Ok(Self {
            glyphs,
            line_height: raw.line_height,
            texture_width: raw.texture_width,
            texture_height: raw.texture_height,
        })
    }

    /// A monospaced font laid out as a uniform grid of `cell_w × cell_h`
    /// cells, indexed by code point in row-major order (the classic
    /// 16-column code-page tileset layout).
    pub fn grid(cell_w: u32, cell_h: u32, texture_width: u32, texture_height: u32) -> Self {
        let cols = if cell_w == 0 { 0 } else { texture_width / cell_w };
        let rows = if cell_h == 0 { 0 } else { texture_height / cell_h };

        let glyphs = (0..cols * rows)
            .filter_map(|i| {
                let ch = char::from_u32(i)?;
                Some((ch, Glyph {
                    id: ch,
                    x: (i % cols) * cell_w,
                    y: (i / cols) * cell_h,
                    width: cell_w,
                    height: cell_h,
                    x_offset: 0,
                    y_offset: 0,
                    x_advance: cell_w,
                }))
            })
            .collect();

        Self { glyphs, line_height: cell_h, texture_width, texture_height }
    }

    /// Rendered width of `text` at `font_size`, in the same units as
    /// `font_size`.
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        if self.line_height == 0 {
            return 0.0;
        }
        let scale = font_size / self.line_height as f32;
        text.chars()
            .filter_map(|ch| self.glyphs.get(&ch))
            .map(|g| g.x_advance as f32 * scale)
            .sum()
    }
}

// ── Raw (JSON-facing) types ───────────────────────────────────────────────────
//
// Character IDs are stored as u32 in JSON (Unicode code points); we convert
// them to `char` when building the public `Font`.

#[derive(Deserialize)]
struct RawGlyph {
    id: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    x_offset: i32,
    y_offset: i32,
    x_advance: u32,
}

#[derive(Deserialize)]
struct RawFont {
    line_height: u32,
    texture_width: u32,
    texture_height: u32,
    glyphs: Vec<RawGlyph>,
}
