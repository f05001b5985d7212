//! Draw commands → triangle list.  Pure, no GPU.

use std::f32::consts::TAU;

use crate::draw::{DrawCmd, DrawList};
use crate::engine::Color;

use super::pipeline::Vertex;
use super::sprite_atlas::{BakedAtlas, FONT};
use super::text::{Font, layout_text};

const MIN_SEGMENTS: u32 = 12;
const MAX_SEGMENTS: u32 = 64;

/// Segments used for a circle of radius `r` pixels.
pub fn circle_segments(r: f32) -> u32 {
    ((r * 1.5).ceil() as u32).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Triangulate every command in `list`, preserving order.
///
/// Images and glyphs whose atlas region is missing are skipped, as are
/// zero-length lines and zero-sized shapes.
pub fn tessellate(list: &DrawList, atlas: &BakedAtlas, font: &Font) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(list.len() * 6);
    let white = atlas.white_uv();

    for cmd in list.iter() {
        match cmd {
            DrawCmd::Rect { x, y, w, h, color } => {
                if *w > 0.0 && *h > 0.0 {
                    quad(&mut out, [*x, *y], [*w, *h], [white, white], *color, false);
                }
            }
            DrawCmd::Circle { cx, cy, r, color } => circle(&mut out, [*cx, *cy], *r, white, *color),
            DrawCmd::Line { from, to, width, color } => line(&mut out, *from, *to, *width, white, *color),
            DrawCmd::Image { id, x, y, w, h, circle_clip } => {
                let Some(region) = atlas.region(id.name()) else { continue };
                quad(&mut out, [*x, *y], [*w, *h], [region.uv_min, region.uv_max], Color::WHITE, *circle_clip);
            }
            DrawCmd::Text { x, y, text, size, color } => {
                let Some(region) = atlas.region(FONT) else { continue };
                for g in layout_text(text, font, [*x, *y], *size) {
                    let uv = [region.remap(g.uv_min), region.remap(g.uv_max)];
                    quad(&mut out, g.pos, g.size, uv, *color, false);
                }
            }
        }
    }
    out
}

fn vertex(position: [f32; 2], uv: [f32; 2], color: Color, local: [f32; 2], mask: bool) -> Vertex {
    Vertex { position, uv, color: color.0, local, mask: if mask { 1.0 } else { 0.0 } }
}

/// Two triangles covering `pos..pos+size`; `uv` is `[min, max]`.
fn quad(out: &mut Vec<Vertex>, pos: [f32; 2], size: [f32; 2], uv: [[f32; 2]; 2], color: Color, mask: bool) {
    let [x0, y0] = pos;
    let (x1, y1) = (x0 + size[0], y0 + size[1]);
    let [[u0, v0], [u1, v1]] = uv;

    let tl = vertex([x0, y0], [u0, v0], color, [-1.0, -1.0], mask);
    let tr = vertex([x1, y0], [u1, v0], color, [1.0, -1.0], mask);
    let bl = vertex([x0, y1], [u0, v1], color, [-1.0, 1.0], mask);
    let br = vertex([x1, y1], [u1, v1], color, [1.0, 1.0], mask);
    out.extend_from_slice(&[tl, tr, bl, tr, br, bl]);
}

fn circle(out: &mut Vec<Vertex>, c: [f32; 2], r: f32, uv: [f32; 2], color: Color) {
    if r <= 0.0 {
        return;
    }
    let n = circle_segments(r);
    let point = |i: u32| {
        let a = i as f32 / n as f32 * TAU;
        [c[0] + r * a.cos(), c[1] + r * a.sin()]
    };
    let center = vertex(c, uv, color, [0.0, 0.0], false);
    for i in 0..n {
        out.push(center);
        out.push(vertex(point(i), uv, color, [0.0, 0.0], false));
        out.push(vertex(point(i + 1), uv, color, [0.0, 0.0], false));
    }
}

/// Butt-capped stroke: a quad `width` wide centred on the segment.
fn line(out: &mut Vec<Vertex>, a: [f32; 2], b: [f32; 2], width: f32, uv: [f32; 2], color: Color) {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f32::EPSILON || width <= 0.0 {
        return;
    }
    let (nx, ny) = (-dy / len * width / 2.0, dx / len * width / 2.0);
    let p = |q: [f32; 2], s: f32| vertex([q[0] + nx * s, q[1] + ny * s], uv, color, [0.0, 0.0], false);
    let (a0, a1, b0, b1) = (p(a, 1.0), p(a, -1.0), p(b, 1.0), p(b, -1.0));
    out.extend_from_slice(&[a0, b0, a1, b0, b1, a1]);
}
