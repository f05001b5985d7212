use image::RgbaImage;

use cakewalk::content::Content;
use cakewalk::draw::{self, DrawCmd, FrameContext, ImageId};
use cakewalk::renderer::sprite_atlas::{FONT, WHITE, bake};
use cakewalk::renderer::tessellate::tessellate;
use cakewalk::renderer::text::Font;
use cakewalk::renderer::utils::{Viewport, letterbox_viewport};
use cakewalk::scene::GameState;
use cakewalk::window::{WindowConfig, WindowMode};

// ── helpers ───────────────────────────────────────────────────────────────────

fn images() -> Vec<(String, RgbaImage)> {
    let mut out: Vec<_> = ImageId::ALL
        .iter()
        .map(|id| (id.name().to_string(), RgbaImage::from_pixel(64, 64, image::Rgba([200, 100, 50, 255]))))
        .collect();
    out.push((FONT.to_string(), RgbaImage::from_pixel(256, 384, image::Rgba([255, 255, 255, 255]))));
    out
}

fn cfg(pw: u32, ph: u32, lw: u32, lh: u32) -> WindowConfig {
    WindowConfig {
        physical_width: pw, physical_height: ph,
        logical_width: lw,  logical_height: lh,
        mode: WindowMode::Windowed,
    }
}

// ── Atlas + tessellation ──────────────────────────────────────────────────────

#[test]
fn atlas_holds_every_game_image() {
    let baked = bake(&images());
    for id in ImageId::ALL {
        assert!(baked.region(id.name()).is_some(), "{} missing", id.name());
    }
    assert!(baked.region(FONT).is_some());
    assert!(baked.region(WHITE).is_some());
    assert!(baked.image.width().is_power_of_two() && baked.image.height().is_power_of_two());
}

#[test]
fn first_frame_tessellates_inside_the_surface() {
    let content = Content::builtin().unwrap();
    let state = GameState::new(&content);
    let font = Font::grid(16, 24, 256, 384);
    let scale = 1.5;
    let ctx = FrameContext { scale, font: &font, cake_message: &content.cake_message };
    let list = draw::frame(&state, &ctx);

    let vertices = tessellate(&list, &bake(&images()), &font);
    assert_eq!(vertices.len() % 3, 0, "triangle list");
    assert!(!vertices.is_empty());
    for v in &vertices {
        assert!(v.position[0] >= -1e-3 && v.position[0] <= 800.0 * scale + 1e-3);
        assert!(v.position[1] >= -1e-3 && v.position[1] <= 600.0 * scale + 1e-3);
        assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
    }
    assert!(vertices.iter().any(|v| v.mask == 1.0), "portrait heads are masked");
}

#[test]
fn every_image_command_is_drawn_when_atlas_is_complete() {
    let content = Content::builtin().unwrap();
    let state = GameState::new(&content);
    let font = Font::grid(16, 24, 256, 384);
    let ctx = FrameContext { scale: 1.0, font: &font, cake_message: &content.cake_message };
    let list = draw::frame(&state, &ctx);

    let image_cmds = list.iter().filter(|c| matches!(c, DrawCmd::Image { .. })).count();
    let with_atlas = tessellate(&list, &bake(&images()), &font).len();
    let without_images = tessellate(&list, &bake(&[]), &font).len();
    assert_eq!(with_atlas - without_images, image_cmds * 6);
}

// ── Letterbox Viewport Tests ──────────────────────────────────────────────────

#[test]
fn exact_fit_no_offset() {
    let v = letterbox_viewport(&cfg(800, 600, 800, 600));
    assert_eq!(v, Viewport { x: 0.0, y: 0.0, width: 800.0, height: 600.0, scale: 1.0 });
}

#[test]
fn integer_scale_2x_no_offset() {
    let v = letterbox_viewport(&cfg(1600, 1200, 800, 600));
    assert_eq!(v.scale, 2.0);
    assert_eq!((v.x, v.y), (0.0, 0.0));
}

#[test]
fn pillarbox_4x3_in_16x9() {
    let v = letterbox_viewport(&cfg(1920, 1080, 800, 600));
    assert!((v.scale - 1.8).abs() < 1e-5);
    assert!((v.x - 240.0).abs() < 1e-3);
    assert_eq!(v.y, 0.0);
}

#[test]
fn letterbox_4x3_in_tall_window() {
    let v = letterbox_viewport(&cfg(800, 1000, 800, 600));
    assert_eq!(v.scale, 1.0);
    assert_eq!(v.x, 0.0);
    assert!((v.y - 200.0).abs() < 1e-3);
}

#[test]
fn zero_logical_width_returns_zero_viewport() {
    assert_eq!(letterbox_viewport(&cfg(800, 600, 0, 600)), Viewport::ZERO);
}

#[test]
fn zero_logical_height_returns_zero_viewport() {
    assert_eq!(letterbox_viewport(&cfg(800, 600, 800, 0)), Viewport::ZERO);
}

#[test]
fn zero_physical_size_gives_zero_sized_viewport() {
    let v = letterbox_viewport(&cfg(0, 0, 800, 600));
    assert!(v.is_empty());
}
