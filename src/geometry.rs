// =============================================================================
// GEOMETRY.RS: Playfield bounds and distance checks
//
// All gameplay coordinates live in the 800×600 playfield, independent of the
// window size.  Bodies are kept inside the wall border by clamping, and NPC
// interaction is a plain Euclidean-distance threshold.
// =============================================================================

use glam::Vec2;

/// Base (logical) playfield width.
pub const BASE_WIDTH: f32 = 800.0;
/// Base (logical) playfield height.
pub const BASE_HEIGHT: f32 = 600.0;

/// Thickness of the wall drawn along every playfield edge.
pub const WALL_THICKNESS: f32 = 40.0;

/// The logical coordinate space gameplay happens in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const BASE: Self = Self { width: BASE_WIDTH, height: BASE_HEIGHT };

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Smallest coordinate a body of `radius` may occupy on either axis.
    #[inline]
    pub fn margin(radius: f32) -> f32 {
        radius + WALL_THICKNESS
    }

    /// Clamp a body centre so the whole body stays clear of the walls:
    /// each axis ends up in `[r + wall, extent - r - wall]`.
    pub fn clamp_body(&self, pos: Vec2, radius: f32) -> Vec2 {
        let m = Self::margin(radius);
        Vec2::new(
            pos.x.max(m).min(self.width - m),
            pos.y.max(m).min(self.height - m),
        )
    }

    /// Returns true if `pos` satisfies the same bounds `clamp_body` enforces.
    pub fn contains_body(&self, pos: Vec2, radius: f32) -> bool {
        let m = Self::margin(radius);
        pos.x >= m && pos.x <= self.width - m && pos.y >= m && pos.y <= self.height - m
    }
}

impl Default for Playfield {
    fn default() -> Self { Self::BASE }
}

/// Strict Euclidean proximity test: `|a - b| < threshold`.
#[inline]
pub fn within_distance(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance_squared(b) < threshold * threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_point_inside() {
        let p = Playfield::BASE.clamp_body(Vec2::new(400.0, 300.0), 30.0);
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn clamp_pulls_back_from_every_edge() {
        let pf = Playfield::BASE;
        assert_eq!(pf.clamp_body(Vec2::new(-50.0, -50.0), 30.0), Vec2::new(70.0, 70.0));
        assert_eq!(pf.clamp_body(Vec2::new(900.0, 700.0), 30.0), Vec2::new(730.0, 530.0));
    }

    #[test]
    fn proximity_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(within_distance(a, Vec2::new(30.0, 39.9), 50.0));
        assert!(!within_distance(a, Vec2::new(30.0, 40.0), 50.0), "exactly 50 is not < 50");
    }
}
