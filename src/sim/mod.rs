//! Particle simulation module
//!
//! Everything that decides where particles go and how they look lives here:
//! - Seeded RNG only, injected through `RandomSource`
//! - Static scene, read-only during a run
//! - One writer: `tick` mutates the particle collection between frames
//! - No rendering or platform dependencies

pub mod forces;
pub mod geometry;
pub mod particle;
pub mod random;
pub mod scene;
pub mod state;
pub mod tick;
pub mod visuals;

pub use forces::ForceModel;
pub use geometry::{edge_normal, reflect, segment_circle_intersect, segment_intersect};
pub use particle::Particle;
pub use random::RandomSource;
pub use scene::{CircleObstacle, Polygon, Scene};
pub use state::{SimConfig, SimState};
pub use tick::{Contact, Surface, TickInput, TickReport, step_particle, tick};
pub use visuals::{Appearance, ColorEasing, RadiusProfile, bounce, ease_in_out_power};
