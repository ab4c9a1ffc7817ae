//! Optional per-step force models
//!
//! At most one model is active; it adjusts velocity before the particle is
//! integrated and collided.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use crate::consts::*;

/// Force applied to every particle each step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ForceModel {
    /// Free motion
    #[default]
    None,
    /// Constant downward acceleration
    Gravity { acceleration: f32 },
    /// Damped spring pulling each particle toward the mouse, scaled by 1/mass
    SpringToMouse { stiffness: f32, damping: f32 },
}

impl ForceModel {
    pub const fn gravity() -> Self {
        ForceModel::Gravity {
            acceleration: GRAVITY,
        }
    }

    pub const fn spring_to_mouse() -> Self {
        ForceModel::SpringToMouse {
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
        }
    }

    /// Acceleration acting on `particle` given the current mouse position
    pub fn acceleration(&self, particle: &Particle, mouse: Vec2) -> Vec2 {
        match *self {
            ForceModel::None => Vec2::ZERO,
            ForceModel::Gravity { acceleration } => Vec2::new(0.0, -acceleration),
            ForceModel::SpringToMouse { stiffness, damping } => {
                if particle.mass <= MIN_SPRING_MASS {
                    return Vec2::ZERO;
                }
                stiffness * (mouse - particle.pos) / particle.mass - damping * particle.vel
            }
        }
    }

    /// Apply one step of this force to the particle's velocity
    #[inline]
    pub fn apply(&self, particle: &mut Particle, mouse: Vec2, dt: f32) {
        if *self != ForceModel::None {
            particle.vel += self.acceleration(particle, mouse) * dt;
        }
    }
}
