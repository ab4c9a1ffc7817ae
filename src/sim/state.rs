//! Simulation state and per-variant configuration
//!
//! One `SimState` exclusively owns the particle collection, the scene and
//! the seeded RNG. The frame driver mutates it through `tick` and the render
//! pass only reads it.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::forces::ForceModel;
use super::particle::Particle;
use super::random::seeded;
use super::scene::{Polygon, Scene};
use super::visuals::{Appearance, ColorEasing, RadiusProfile};
use crate::consts::*;
use crate::settings::Variant;

/// Which mechanics are active in a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Initial population size
    pub particle_count: usize,
    /// Bounce off the star polygon
    pub collide_polygon: bool,
    /// Bounce off the visible-area rectangle
    pub bounding_box: bool,
    /// Bounce off circular obstacles (only when no edge was hit)
    pub collide_obstacles: bool,
    /// Remove particles once `age >= lifetime`
    pub expiry: bool,
    pub color: ColorEasing,
    pub radius: RadiusProfile,
    pub force: ForceModel,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl SimConfig {
    /// Preset for one of the program variants
    pub fn for_variant(variant: Variant) -> Self {
        let base = Self {
            particle_count: PARTICLE_COUNT,
            collide_polygon: false,
            bounding_box: false,
            collide_obstacles: false,
            expiry: false,
            color: ColorEasing::Hold,
            radius: RadiusProfile::Constant(CONSTANT_RADIUS),
            force: ForceModel::None,
        };

        match variant {
            Variant::Drift => base,
            Variant::StarBounce => Self {
                collide_polygon: true,
                bounding_box: true,
                ..base
            },
            Variant::ObstacleBounce => Self {
                collide_polygon: true,
                bounding_box: true,
                collide_obstacles: true,
                ..base
            },
            Variant::Lifecycle => Self {
                collide_polygon: true,
                bounding_box: true,
                collide_obstacles: true,
                expiry: true,
                color: ColorEasing::AcceleratedEaseInOut,
                radius: RadiusProfile::fade_bounce(),
                ..base
            },
        }
    }

    /// Same config with a different force model
    pub fn with_force(self, force: ForceModel) -> Self {
        Self { force, ..self }
    }

    /// Scene for a viewport aspect ratio.
    ///
    /// The star and the view bounds are always present; the collision flags
    /// only decide which of them `step_particle` tests.
    pub fn build_scene(&self, aspect: f32) -> Scene {
        let bounds = crate::aspect_bounds(aspect);
        let obstacles = if self.collide_obstacles {
            Scene::default_obstacles()
        } else {
            Vec::new()
        };
        Scene::new(Polygon::star(), obstacles)
            .with_bounds(Polygon::rectangle(bounds.x, bounds.y))
    }

    /// How to draw a particle at its current age
    #[inline]
    pub fn appearance(&self, particle: &Particle) -> Appearance {
        Appearance::of(particle, self.color, self.radius)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    /// Viewport aspect ratio the scene and spawn area were built for
    pub aspect: f32,
    /// Live particles (order is not significant)
    pub particles: Vec<Particle>,
    /// Simulated seconds since start
    pub time: f32,
    /// Frames stepped since start
    pub frame: u64,
    scene: Scene,
    rng: Pcg32,
}

impl SimState {
    /// Build the scene and spawn the initial population
    pub fn new(config: SimConfig, aspect: f32, seed: u64) -> Self {
        let mut state = Self {
            seed,
            config,
            aspect,
            particles: Vec::with_capacity(config.particle_count),
            time: 0.0,
            frame: 0,
            scene: config.build_scene(aspect),
            rng: seeded(seed),
        };
        state.spawn_population();
        state
    }

    /// Replace the population and clock, keeping config and aspect
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(self.config, self.aspect, seed);
    }

    fn spawn_population(&mut self) {
        let aspect = self.aspect;
        let rng = &mut self.rng;
        self.particles
            .extend((0..self.config.particle_count).map(|_| Particle::spawn(&mut *rng, aspect)));
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Particles to mutate alongside the scene they collide with
    pub(crate) fn particles_and_scene(&mut self) -> (&mut [Particle], &Scene) {
        (&mut self.particles, &self.scene)
    }

    pub fn population(&self) -> usize {
        self.particles.len()
    }

    /// Drop every particle whose age has reached its lifetime.
    /// Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired());
        before - self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_spawns_full_population() {
        let state = SimState::new(SimConfig::default(), 1.5, 1);
        assert_eq!(state.population(), PARTICLE_COUNT);
        assert!(state.particles.iter().all(|p| p.age == 0.0));
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = SimState::new(SimConfig::default(), 1.5, 99999);
        let b = SimState::new(SimConfig::default(), 1.5, 99999);
        assert_eq!(a.particles, b.particles);

        let c = SimState::new(SimConfig::default(), 1.5, 12345);
        assert_ne!(a.particles, c.particles);
    }

    #[test]
    fn test_restart_resets_clock() {
        let mut state = SimState::new(SimConfig::for_variant(Variant::Lifecycle), 1.0, 5);
        state.time = 3.0;
        state.frame = 180;
        state.particles.truncate(10);
        state.restart(6);
        assert_eq!(state.seed, 6);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.population(), PARTICLE_COUNT);
        assert_eq!(state.config, SimConfig::for_variant(Variant::Lifecycle));
    }

    #[test]
    fn test_purge_removes_only_expired() {
        let mut state = SimState::new(SimConfig::for_variant(Variant::Lifecycle), 1.0, 3);
        state.particles = vec![
            Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0),
            Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0),
            Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0),
        ];
        state.particles[0].age = 1.0;
        state.particles[1].age = 0.5;
        state.particles[2].age = 4.0;

        assert_eq!(state.purge_expired(), 2);
        assert_eq!(state.population(), 1);
        assert_eq!(state.particles[0].age, 0.5);
    }

    #[test]
    fn test_variant_scenes() {
        // The star is drawn in every variant, even where nothing collides with it
        let drift = SimConfig::for_variant(Variant::Drift).build_scene(1.5);
        assert_eq!(drift.polygon, Polygon::star());
        assert!(drift.obstacles.is_empty());

        let star = SimConfig::for_variant(Variant::StarBounce).build_scene(1.5);
        assert_eq!(star.polygon.edge_count(), 5);
        assert_eq!(star.bounds, Polygon::rectangle(1.5, 1.0));
        assert!(star.obstacles.is_empty());

        let obstacles = SimConfig::for_variant(Variant::ObstacleBounce).build_scene(1.5);
        assert_eq!(obstacles.obstacles.len(), Scene::default_obstacles().len());

        let lifecycle = SimConfig::for_variant(Variant::Lifecycle);
        assert!(lifecycle.expiry);
        assert_eq!(lifecycle.color, ColorEasing::AcceleratedEaseInOut);
    }

    #[test]
    fn test_with_force_only_changes_force() {
        let config = SimConfig::for_variant(Variant::StarBounce).with_force(ForceModel::gravity());
        assert_eq!(config.force, ForceModel::gravity());
        assert!(config.collide_polygon);
    }
}
