//! Particle entity and randomized construction

use glam::{Vec2, Vec4};

use super::random::RandomSource;
use crate::consts::*;

/// An independently simulated point mass with visual endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Only read by force models
    pub mass: f32,
    /// Seconds since spawn (never negative)
    pub age: f32,
    /// Fixed at creation, > 0
    pub lifetime: f32,
    pub color_start: Vec4,
    pub color_end: Vec4,
}

impl Particle {
    /// A particle with explicit kinematics and white colors
    pub fn new(pos: Vec2, vel: Vec2, lifetime: f32) -> Self {
        Self {
            pos,
            vel,
            mass: 1.0,
            age: 0.0,
            lifetime,
            color_start: Vec4::ONE,
            color_end: Vec4::ONE,
        }
    }

    /// Spawn a particle with randomized attributes inside the visible area.
    ///
    /// Draw order: position x, y, heading (degrees), speed, mass, lifetime,
    /// start rgb, end rgb.
    pub fn spawn<R: RandomSource + ?Sized>(rng: &mut R, aspect: f32) -> Self {
        let pos = Vec2::new(rng.uniform(-aspect, aspect), rng.uniform(-1.0, 1.0));

        let angle = rng.uniform(0.0, 360.0).to_radians();
        let speed = rng.uniform(SPEED_MIN, SPEED_MAX);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;

        let mass = rng.uniform(MASS_MIN, MASS_MAX);
        let lifetime = rng.uniform(LIFETIME_MIN, LIFETIME_MAX);

        let color_start = random_color(rng);
        let color_end = random_color(rng);

        Self {
            pos,
            vel,
            mass,
            age: 0.0,
            lifetime,
            color_start,
            color_end,
        }
    }

    /// True once the particle has lived its full lifetime
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Fraction of the lifetime already spent (unclamped)
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        self.age / self.lifetime
    }

    /// Seconds remaining before expiry (negative once expired)
    #[inline]
    pub fn time_left(&self) -> f32 {
        self.lifetime - self.age
    }
}

fn random_color<R: RandomSource + ?Sized>(rng: &mut R) -> Vec4 {
    Vec4::new(
        rng.uniform(COLOR_CHANNEL_MIN, COLOR_CHANNEL_MAX),
        rng.uniform(COLOR_CHANNEL_MIN, COLOR_CHANNEL_MAX),
        rng.uniform(COLOR_CHANNEL_MIN, COLOR_CHANNEL_MAX),
        1.0,
    )
}
