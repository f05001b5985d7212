//! Frame composition: turns a [`GameState`] into a flat list of draw commands.
//!
//! Everything here works in playfield units and multiplies by the viewport
//! scale on the way into the [`DrawList`], so the output is in surface pixels
//! and the renderer never needs to know about the playfield.  Pure: no GPU,
//! no window.

use glam::Vec2;

use crate::engine::Color;
use crate::geometry::WALL_THICKNESS;
use crate::renderer::text::Font;
use crate::scene::{GameState, Scene};

// ── Palette ─────────────────────────────────────────────────────────────────
pub const GRASS:      Color = Color::hex(0x6fbf73);
pub const WALL:       Color = Color::hex(0x3a3a3a);
pub const PETAL:      Color = Color::hex(0xffc0cb);
pub const POLLEN:     Color = Color::hex(0xffff00);
pub const CAKE_BG:    Color = Color::hex(0xffb6c1);
pub const INK:        Color = Color::BLACK;
pub const BOX_BG:     Color = Color([0.0, 0.0, 0.0, 0.75]);
pub const BOX_TEXT:   Color = Color::WHITE;
pub const BOX_DIM:    Color = Color([0.85, 0.85, 0.85, 1.0]);

// ── Layout (playfield units) ────────────────────────────────────────────────
const LIMB_WIDTH: f32 = 3.0;
const ARM_SWING: f32 = 4.0;
const LEG_SWING: f32 = 2.0;
const CAKE_SIZE: f32 = 160.0;
const MESSAGE_SIZE: f32 = 18.0;
const MESSAGE_LINE_HEIGHT: f32 = 28.0;
/// Baseline of the first message line, measured down from the centre.
const MESSAGE_OFFSET: f32 = 120.0;
/// Message wrap width as a fraction of the surface width.
const MESSAGE_WIDTH: f32 = 0.8;
const BOX_RECT: [f32; 4] = [60.0, 430.0, 680.0, 120.0];
const BOX_PADDING: f32 = 16.0;
const BOX_TEXT_SIZE: f32 = 18.0;
const BOX_LINE_HEIGHT: f32 = 24.0;
const BOX_SPEAKER_SIZE: f32 = 14.0;

/// Images the frame can reference.  The font image is handled by the text
/// path and never appears here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageId {
    Player,
    Npc,
    Cake,
}

impl ImageId {
    pub const ALL: [ImageId; 3] = [ImageId::Player, ImageId::Npc, ImageId::Cake];

    pub fn name(self) -> &'static str {
        match self {
            ImageId::Player => "player",
            ImageId::Npc => "npc",
            ImageId::Cake => "cake",
        }
    }
}

/// One primitive, in surface pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
    Circle { cx: f32, cy: f32, r: f32, color: Color },
    Line { from: [f32; 2], to: [f32; 2], width: f32, color: Color },
    /// `circle_clip` masks the image to the ellipse inscribed in its rect.
    Image { id: ImageId, x: f32, y: f32, w: f32, h: f32, circle_clip: bool },
    /// A single line of text; `(x, y)` is the top-left corner.
    Text { x: f32, y: f32, text: String, size: f32, color: Color },
}

/// Draw commands for one frame, in painting order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn len(&self) -> usize { self.commands.len() }
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> { self.commands.iter() }
}

/// What a frame needs besides the game state.
pub struct FrameContext<'a> {
    /// Playfield units → surface pixels.
    pub scale: f32,
    pub font: &'a Font,
    pub cake_message: &'a str,
}

// ── Painter ─────────────────────────────────────────────────────────────────

/// Accepts playfield coordinates and records scaled commands.
struct Painter {
    s: f32,
    list: DrawList,
}

impl Painter {
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let s = self.s;
        self.list.commands.push(DrawCmd::Rect { x: x * s, y: y * s, w: w * s, h: h * s, color });
    }

    fn circle(&mut self, c: Vec2, r: f32, color: Color) {
        let s = self.s;
        self.list.commands.push(DrawCmd::Circle { cx: c.x * s, cy: c.y * s, r: r * s, color });
    }

    fn line(&mut self, a: Vec2, b: Vec2, color: Color) {
        let s = self.s;
        self.list.commands.push(DrawCmd::Line {
            from: [a.x * s, a.y * s],
            to: [b.x * s, b.y * s],
            width: LIMB_WIDTH * s,
            color,
        });
    }

    fn image(&mut self, id: ImageId, x: f32, y: f32, w: f32, h: f32, circle_clip: bool) {
        let s = self.s;
        self.list.commands.push(DrawCmd::Image { id, x: x * s, y: y * s, w: w * s, h: h * s, circle_clip });
    }

    fn text(&mut self, x: f32, y: f32, text: &str, size: f32, color: Color) {
        let s = self.s;
        self.list.commands.push(DrawCmd::Text {
            x: x * s,
            y: y * s,
            text: text.to_string(),
            size: size * s,
            color,
        });
    }
}

// ── Frame ───────────────────────────────────────────────────────────────────

/// Compose the full frame for `state`.
pub fn frame(state: &GameState, ctx: &FrameContext<'_>) -> DrawList {
    let mut p = Painter { s: ctx.scale, list: DrawList::default() };

    if state.scene() == Scene::Cake {
        cake_scene(&mut p, state, ctx);
        return p.list;
    }

    meadow(&mut p, state);

    let player = state.player();
    let swing = if state.player_walking() { state.anim_time().sin() } else { 0.0 };
    character(&mut p, ImageId::Player, player.pos, player.radius, swing);

    if let Some(npc) = state.active_npc() {
        character(&mut p, ImageId::Npc, npc.pos, npc.radius, 0.0);
    }

    let dialogue = state.dialogue_box();
    if dialogue.visible {
        dialogue_box(&mut p, &dialogue.text, &dialogue.speaker, ctx.font);
    }

    p.list
}

/// Grass, flowers and the four walls.
fn meadow(p: &mut Painter, state: &GameState) {
    let field = *state.playfield();
    p.rect(0.0, 0.0, field.width, field.height, GRASS);

    for f in state.flowers() {
        for offset in [Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0), Vec2::new(0.0, -5.0), Vec2::new(0.0, 5.0)] {
            p.circle(f.pos + offset, 5.0, PETAL);
        }
        p.circle(f.pos, 4.0, POLLEN);
    }

    let t = WALL_THICKNESS;
    p.rect(0.0, 0.0, field.width, t, WALL);
    p.rect(0.0, field.height - t, field.width, t, WALL);
    p.rect(0.0, 0.0, t, field.height, WALL);
    p.rect(field.width - t, 0.0, t, field.height, WALL);
}

/// Stick-figure body with a round portrait for a head.  `swing` in `[-1, 1]`
/// drives the arm and leg wiggle.
fn character(p: &mut Painter, image: ImageId, at: Vec2, r: f32, swing: f32) {
    let arm = swing * ARM_SWING;
    let leg = swing * LEG_SWING;
    let v = |dx: f32, dy: f32| at + Vec2::new(dx, dy);

    // Legs
    p.line(v(-8.0, 40.0), v(-8.0, 70.0 + leg), INK);
    p.line(v(8.0, 40.0), v(8.0, 70.0 - leg), INK);
    // Body
    p.line(v(0.0, 30.0), v(0.0, 55.0), INK);
    // Arms
    p.line(v(-20.0, 40.0), v(-20.0 - arm, 40.0), INK);
    p.line(v(20.0, 40.0), v(20.0 + arm, 40.0), INK);
    // Head
    p.image(image, at.x - r, at.y - r, r * 2.0, r * 2.0, true);
}

fn cake_scene(p: &mut Painter, state: &GameState, ctx: &FrameContext<'_>) {
    let field = *state.playfield();
    let c = field.center();

    p.rect(0.0, 0.0, field.width, field.height, CAKE_BG);
    p.image(ImageId::Cake, c.x - CAKE_SIZE / 2.0, c.y - CAKE_SIZE / 2.0, CAKE_SIZE, CAKE_SIZE, false);

    let measure = |s: &str| ctx.font.measure(s, MESSAGE_SIZE);
    let lines = wrap_text(ctx.cake_message, field.width * MESSAGE_WIDTH, measure);
    let top = c.y + MESSAGE_OFFSET - MESSAGE_SIZE;
    for (i, line) in lines.iter().enumerate() {
        let w = measure(line);
        p.text(c.x - w / 2.0, top + i as f32 * MESSAGE_LINE_HEIGHT, line, MESSAGE_SIZE, Color::WHITE);
    }

    for dot in state.confetti() {
        p.circle(Vec2::new(dot.x, dot.y), dot.size, dot.color);
    }
}

fn dialogue_box(p: &mut Painter, text: &str, speaker: &str, font: &Font) {
    let [x, y, w, h] = BOX_RECT;
    p.rect(x, y, w, h, BOX_BG);

    let inner_w = w - BOX_PADDING * 2.0;
    let lines = wrap_text(text, inner_w, |s| font.measure(s, BOX_TEXT_SIZE));
    let mut cursor = y + BOX_PADDING;
    for line in &lines {
        p.text(x + BOX_PADDING, cursor, line, BOX_TEXT_SIZE, BOX_TEXT);
        cursor += BOX_LINE_HEIGHT;
    }

    if !speaker.is_empty() {
        cursor += BOX_LINE_HEIGHT / 2.0;
        p.text(x + BOX_PADDING, cursor, &format!("{speaker}:"), BOX_SPEAKER_SIZE, BOX_DIM);
    }
}

// ── Word wrap ───────────────────────────────────────────────────────────────

/// Greedy word wrap by measured width.
///
/// Words are separated by single spaces.  A word moves to a new line when
/// adding it would push the current line past `max_width`, except for the
/// very first word, which always starts the first line.  A single word wider
/// than `max_width` therefore sits on its own line unbroken.  Returned lines
/// carry no trailing space.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for (n, word) in text.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if n > 0 && measure(candidate.trim_end()) > max_width {
            lines.push(line.trim_end().to_string());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(line.trim_end().to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> f32 { s.chars().count() as f32 }

    #[test]
    fn wrap_single_line_when_it_fits() {
        assert_eq!(wrap_text("hello there", 20.0, chars), vec!["hello there"]);
    }

    #[test]
    fn wrap_breaks_before_overflowing_word() {
        let lines = wrap_text("aaa bbb ccc", 7.0, chars);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn overlong_first_word_stays_whole() {
        let lines = wrap_text("abcdefghij k", 4.0, chars);
        assert_eq!(lines, vec!["abcdefghij", "k"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 10.0, chars), vec![String::new()]);
    }

    #[test]
    fn image_names_are_distinct() {
        let names: std::collections::HashSet<_> = ImageId::ALL.iter().map(|i| i.name()).collect();
        assert_eq!(names.len(), ImageId::ALL.len());
    }
}
