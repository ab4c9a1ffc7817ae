//! Particle Bounce - 2D particles reflecting off static scene geometry
//!
//! Core modules:
//! - `sim`: Particle simulation (geometry, collisions, lifetime easing)
//! - `renderer`: Drawing service seam and WebGPU pipeline
//! - `settings`: Variant selection and persisted preferences
//! - `error`: Setup error types

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{RenderError, SceneError};
pub use settings::{Settings, Variant};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    use glam::{Vec2, Vec4};

    /// Initial population size (every variant)
    pub const PARTICLE_COUNT: usize = 100;

    /// Spawn speed range (simulation units per second)
    pub const SPEED_MIN: f32 = 0.1;
    pub const SPEED_MAX: f32 = 0.2;
    /// Spawn mass range
    pub const MASS_MIN: f32 = 0.0;
    pub const MASS_MAX: f32 = 2.0;
    /// Spawn lifetime range (seconds)
    pub const LIFETIME_MIN: f32 = 5.0;
    pub const LIFETIME_MAX: f32 = 10.0;
    /// Per-channel range for the random start/end colors
    pub const COLOR_CHANNEL_MIN: f32 = 0.5;
    pub const COLOR_CHANNEL_MAX: f32 = 1.0;

    /// Disk radius for variants without lifetime easing
    pub const CONSTANT_RADIUS: f32 = 0.05;
    /// Radius at birth for the shrinking/fading profile
    pub const FADE_BASE_RADIUS: f32 = 0.1;
    /// Final seconds of life during which the radius pulses
    pub const FADE_TIME: f32 = 2.0;
    /// Pulse strength inside the fade window
    pub const FADE_BOUNCE_AMPLITUDE: f32 = 1.5;
    /// Exponent of the ease-in-out color curve
    pub const EASE_POWER: f32 = 2.0;
    /// Time scale of the accelerated color curve
    pub const COLOR_TIME_SCALE: f32 = 3.0;

    /// Gravity acceleration when that force model is selected
    pub const GRAVITY: f32 = 0.5;
    /// Spring-to-mouse defaults
    pub const SPRING_STIFFNESS: f32 = 2.0;
    pub const SPRING_DAMPING: f32 = 0.5;
    /// Particles lighter than this ignore the spring (avoids dividing by ~0)
    pub const MIN_SPRING_MASS: f32 = 0.05;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Delta used for the first frame and the headless driver
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;
    /// Frames simulated by the native headless driver
    pub const HEADLESS_FRAMES: u32 = 60 * 12;

    /// Scene drawing
    pub const EDGE_THICKNESS: f32 = 0.01;
    pub const EDGE_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
    pub const OBSTACLE_COLOR: Vec4 = Vec4::new(0.25, 0.3, 0.45, 1.0);

    /// Probe ray from the bottom of the view to the mouse
    pub const PROBE_ORIGIN: Vec2 = Vec2::new(0.0, -1.0);
    pub const PROBE_THICKNESS: f32 = 0.005;
    pub const PROBE_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
    pub const PROBE_MARKER_RADIUS: f32 = 0.02;
    pub const PROBE_MARKER_COLOR: Vec4 = Vec4::new(1.0, 0.0, 1.0, 1.0);
}

/// Half extents of the visible simulation area for a viewport aspect ratio.
///
/// The view always spans `[-1, 1]` vertically and `[-aspect, aspect]` horizontally.
#[inline]
pub fn aspect_bounds(aspect: f32) -> Vec2 {
    Vec2::new(aspect, 1.0)
}

/// Convert a pixel position (origin top-left, y down) to simulation coordinates
#[inline]
pub fn screen_to_sim(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let aspect = width / height;
    Vec2::new((x / width * 2.0 - 1.0) * aspect, 1.0 - y / height * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_sim_corners() {
        let center = screen_to_sim(400.0, 300.0, 800.0, 600.0);
        assert!(center.length() < 1e-6);

        let top_left = screen_to_sim(0.0, 0.0, 800.0, 600.0);
        assert!((top_left.x + 800.0 / 600.0).abs() < 1e-5);
        assert!((top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = screen_to_sim(800.0, 600.0, 800.0, 600.0);
        assert!((bottom_right.x - 800.0 / 600.0).abs() < 1e-5);
        assert!((bottom_right.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_to_sim_degenerate_viewport() {
        assert_eq!(screen_to_sim(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    }
}
