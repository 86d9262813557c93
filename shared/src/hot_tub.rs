//! Bubbles rising in the hot tub of the last room.

use std::f32::consts::TAU;

use rand::Rng;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

use crate::volume::Vec3;

pub const TUB_CENTER_X: f32 = 600.0;
pub const TUB_CENTER_Z: f32 = 0.0;
pub const BUBBLE_COUNT: usize = 20;
/// Bubbles spawn at the water surface.
pub const BUBBLE_SPAWN_HEIGHT: f32 = 2.8;
/// Bubbles respawn once they rise above this.
pub const BUBBLE_POP_HEIGHT: f32 = 5.0;
pub const BUBBLE_MAX_RADIUS: f32 = 8.0;
pub const BUBBLE_WOBBLE: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bubble {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
    /// Rise speed in units per second.
    pub float_speed: f32,
    pub position: Vec3,
}

impl Bubble {
    fn spawn(rng: &mut ChaCha8Rng) -> Self {
        let mut bubble = Self {
            angle: 0.0,
            radius: 0.0,
            height: BUBBLE_SPAWN_HEIGHT,
            float_speed: rng.gen_range(0.5..1.0),
            position: Vec3::zeros(),
        };
        bubble.respawn(rng);
        bubble
    }

    fn respawn(&mut self, rng: &mut ChaCha8Rng) {
        self.angle = rng.gen_range(0.0..TAU);
        self.radius = rng.gen_range(0.0..BUBBLE_MAX_RADIUS);
        self.height = BUBBLE_SPAWN_HEIGHT;
        self.place(0.0);
    }

    fn place(&mut self, wobble: f32) {
        let r = self.radius + wobble;
        self.position = Vec3::new(
            TUB_CENTER_X + self.angle.cos() * r,
            self.height,
            TUB_CENTER_Z + self.angle.sin() * r,
        );
    }
}

#[derive(Clone, Debug)]
pub struct HotTub {
    pub bubbles: Vec<Bubble>,
    /// Seconds since the tub was created; drives the wobble phase.
    pub elapsed: f32,
    rng: ChaCha8Rng,
}

impl HotTub {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let bubbles = (0..BUBBLE_COUNT).map(|_| Bubble::spawn(&mut rng)).collect();
        Self {
            bubbles,
            elapsed: 0.0,
            rng,
        }
    }

    pub fn update(&mut self, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }
        self.elapsed += delta;

        for bubble in &mut self.bubbles {
            bubble.height += bubble.float_speed * delta;
            let wobble = (self.elapsed * 2.0 + bubble.angle).sin() * BUBBLE_WOBBLE;
            bubble.place(wobble);

            if bubble.height > BUBBLE_POP_HEIGHT {
                bubble.respawn(&mut self.rng);
            }
        }
    }
}
