//! Age-driven color and radius
//!
//! Rendering attributes are a pure function of a particle's age, so they are
//! evaluated at draw time instead of stored.

use std::f32::consts::PI;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use crate::consts::*;

/// Pulse curve used inside the fade window: `|sin(10πx)|`
#[inline]
pub fn bounce(x: f32) -> f32 {
    (10.0 * PI * x).sin().abs()
}

/// Symmetric power ease-in-out on `[0, 1]`
#[inline]
pub fn ease_in_out_power(t: f32, power: f32) -> f32 {
    if t < 0.5 {
        0.5 * (2.0 * t).powf(power)
    } else {
        1.0 - 0.5 * (2.0 * (1.0 - t)).powf(power)
    }
}

/// How color moves from `color_start` to `color_end` over a lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorEasing {
    /// Stay at `color_start` forever
    #[default]
    Hold,
    /// Straight blend over the whole lifetime
    Linear,
    /// Eased blend over the whole lifetime
    EaseInOut,
    /// Eased blend that finishes at one third of the lifetime,
    /// ahead of the radius timeline
    AcceleratedEaseInOut,
}

impl ColorEasing {
    /// Blend factor in `[0, 1]` for a particle
    pub fn blend(&self, particle: &Particle) -> f32 {
        let fraction = particle.life_fraction();
        match self {
            ColorEasing::Hold => 0.0,
            ColorEasing::Linear => fraction.clamp(0.0, 1.0),
            ColorEasing::EaseInOut => ease_in_out_power(fraction.clamp(0.0, 1.0), EASE_POWER),
            ColorEasing::AcceleratedEaseInOut => {
                ease_in_out_power((fraction * COLOR_TIME_SCALE).clamp(0.0, 1.0), EASE_POWER)
            }
        }
    }

    pub fn color(&self, particle: &Particle) -> Vec4 {
        match self {
            ColorEasing::Hold => particle.color_start,
            _ => particle
                .color_start
                .lerp(particle.color_end, self.blend(particle)),
        }
    }
}

/// Disk radius over a lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RadiusProfile {
    /// Same radius at every age
    Constant(f32),
    /// Shrink linearly from `base`, pulsing during the last `fade_time` seconds
    FadeBounce {
        base: f32,
        fade_time: f32,
        amplitude: f32,
    },
}

impl Default for RadiusProfile {
    fn default() -> Self {
        RadiusProfile::Constant(CONSTANT_RADIUS)
    }
}

impl RadiusProfile {
    /// The lifecycle profile used by the expiring variant
    pub const fn fade_bounce() -> Self {
        RadiusProfile::FadeBounce {
            base: FADE_BASE_RADIUS,
            fade_time: FADE_TIME,
            amplitude: FADE_BOUNCE_AMPLITUDE,
        }
    }

    pub fn radius(&self, particle: &Particle) -> f32 {
        match *self {
            RadiusProfile::Constant(r) => r,
            RadiusProfile::FadeBounce {
                base,
                fade_time,
                amplitude,
            } => {
                let time_left = particle.time_left();
                let base_radius = base * (1.0 - particle.life_fraction());
                if fade_time <= 0.0 {
                    return base_radius.max(0.0);
                }
                let mask = ((fade_time - time_left) / fade_time).clamp(0.0, 1.0);
                let pulsed = base_radius * (1.0 + amplitude * (bounce(time_left / fade_time) - 0.5));
                (base_radius * (1.0 - mask) + pulsed * mask).max(0.0)
            }
        }
    }
}

/// Color and radius to draw a particle with this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub color: Vec4,
    pub radius: f32,
}

impl Appearance {
    pub fn of(particle: &Particle, color: ColorEasing, radius: RadiusProfile) -> Self {
        Self {
            color: color.color(particle),
            radius: radius.radius(particle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn aged(age: f32, lifetime: f32) -> Particle {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, lifetime);
        p.color_start = Vec4::new(1.0, 0.5, 0.5, 1.0);
        p.color_end = Vec4::new(0.5, 1.0, 0.75, 1.0);
        p.age = age;
        p
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out_power(0.0, 2.0), 0.0);
        assert_eq!(ease_in_out_power(0.5, 2.0), 0.5);
        assert_eq!(ease_in_out_power(1.0, 2.0), 1.0);
        assert!((ease_in_out_power(0.25, 2.0) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_range() {
        assert!(bounce(0.0).abs() < 1e-6);
        assert!((bounce(0.05) - 1.0).abs() < 1e-5);
        for i in 0..100 {
            let b = bounce(i as f32 / 100.0);
            assert!((0.0..=1.0).contains(&b));
        }
    }

    #[test]
    fn test_color_at_birth_is_start() {
        let p = aged(0.0, 6.0);
        for easing in [
            ColorEasing::Hold,
            ColorEasing::Linear,
            ColorEasing::EaseInOut,
            ColorEasing::AcceleratedEaseInOut,
        ] {
            assert_eq!(easing.color(&p), p.color_start);
        }
    }

    #[test]
    fn test_color_at_expiry_is_end() {
        let p = aged(6.0, 6.0);
        assert_eq!(ColorEasing::Linear.color(&p), p.color_end);
        assert_eq!(ColorEasing::EaseInOut.color(&p), p.color_end);
        assert_eq!(ColorEasing::AcceleratedEaseInOut.color(&p), p.color_end);
        assert_eq!(ColorEasing::Hold.color(&p), p.color_start);
    }

    #[test]
    fn test_accelerated_color_finishes_at_one_third() {
        // The accelerated curve reaches the end color while the unscaled
        // curves are still blending and the radius is still at two thirds.
        let p = aged(2.0, 6.0);
        assert_eq!(ColorEasing::AcceleratedEaseInOut.color(&p), p.color_end);
        assert_ne!(ColorEasing::EaseInOut.color(&p), p.color_end);
        let r = RadiusProfile::fade_bounce().radius(&p);
        assert!((r - FADE_BASE_RADIUS * 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_fade_radius_before_window_shrinks_linearly() {
        let profile = RadiusProfile::fade_bounce();
        assert!((profile.radius(&aged(0.0, 10.0)) - FADE_BASE_RADIUS).abs() < 1e-6);
        assert!((profile.radius(&aged(5.0, 10.0)) - FADE_BASE_RADIUS * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fade_radius_inside_window_pulses() {
        let profile = RadiusProfile::fade_bounce();
        // Just inside the window the pulse starts blending in
        let p = aged(8.05, 10.0);
        let base_radius = FADE_BASE_RADIUS * (1.0 - 0.805);
        assert!(profile.radius(&p) > base_radius);

        // time_left = 0.5 → mask = 0.75, bounce(0.25) = 1
        let p = aged(9.5, 10.0);
        let base_radius = FADE_BASE_RADIUS * 0.05;
        let pulsed = base_radius * (1.0 + FADE_BOUNCE_AMPLITUDE * 0.5);
        let expected = base_radius * 0.25 + pulsed * 0.75;
        assert!((profile.radius(&p) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_fade_radius_never_negative() {
        let profile = RadiusProfile::fade_bounce();
        assert_eq!(profile.radius(&aged(12.0, 10.0)), 0.0);
        assert_eq!(profile.radius(&aged(10.0, 10.0)), 0.0);
    }

    #[test]
    fn test_constant_radius() {
        let p = aged(3.0, 4.0);
        let look = Appearance::of(&p, ColorEasing::Hold, RadiusProfile::default());
        assert_eq!(look.radius, CONSTANT_RADIUS);
        assert_eq!(look.color, p.color_start);
    }
}
