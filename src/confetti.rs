use crate::engine::Color;
use crate::geometry::Playfield;

/// Number of particles created for the cake scene.
pub const CONFETTI_COUNT: usize = 100;

/// A falling confetti dot.  Created once, moved forever, never removed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Confetti {
    pub x: f32,
    pub y: f32,
    pub color: Color,
    /// Radius in playfield units.
    pub size: f32,
    /// Fall speed in playfield units per second.
    pub speed: f32,
}

impl Confetti {
    /// Fall for `dt` seconds, wrapping back to the top once past the bottom
    /// edge of `field`.
    pub fn fall(&mut self, dt: f32, field: &Playfield) {
        self.y += self.speed * dt;
        if self.y > field.height {
            self.y = 0.0;
        }
    }
}

/// Scatter `count` particles over `field` with colours, sizes and speeds
/// derived from `seed`.  The same seed always gives the same shower.
pub fn spawn(count: usize, field: &Playfield, seed: u64) -> Vec<Confetti> {
    let mut rng = seed;
    let mut next = move || {
        rng = rng.wrapping_add(1);
        pseudo_rand(rng)
    };
    (0..count)
        .map(|_| Confetti {
            x: next() * field.width,
            y: next() * field.height,
            color: Color::from_hsl(next() * 360.0, 0.8, 0.6),
            size: next() * 5.0 + 2.0,
            // 1..4 units per frame at 60 Hz.
            speed: (next() * 3.0 + 1.0) * 60.0,
        })
        .collect()
}

/// LCG hash of `seed` into `[0, 1)`.
fn pseudo_rand(seed: u64) -> f32 {
    let x = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    ((x >> 40) as f32 / (1u64 << 24) as f32).min(0.999_999)
}
