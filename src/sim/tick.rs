//! Per-frame simulation step
//!
//! Ages, forces, integrates and collides every particle once per frame.
//! Collision is first-hit-wins: polygon edges are tried in their fixed order
//! and the first crossing edge resolves the frame; obstacles are only tried
//! when no edge was crossed. At most one reflection happens per particle per
//! frame.

use glam::Vec2;

use super::geometry::{edge_normal, reflect, segment_circle_intersect, segment_intersect};
use super::particle::Particle;
use super::scene::Scene;
use super::state::{SimConfig, SimState};

/// Frame inputs from the driver
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Mouse position in simulation coordinates
    pub mouse: Vec2,
}

/// What a particle bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Outline or bounds edge, by index in test order
    Edge(usize),
    /// Circular obstacle, by index
    Obstacle(usize),
}

/// A resolved collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Impact point on the surface
    pub point: Vec2,
    /// Unit normal the velocity was reflected about
    pub normal: Vec2,
    pub surface: Surface,
}

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Particles purged before stepping
    pub expired: usize,
    pub edge_hits: usize,
    pub obstacle_hits: usize,
}

/// Advance one particle by `dt` seconds against a static scene
pub fn step_particle(
    particle: &mut Particle,
    scene: &Scene,
    config: &SimConfig,
    mouse: Vec2,
    dt: f32,
) -> Option<Contact> {
    particle.age += dt;
    config.force.apply(particle, mouse, dt);

    let start = particle.pos;
    let target = start + particle.vel * dt;

    let mut contact = first_edge_contact(scene, config, start, target);
    if contact.is_none() && config.collide_obstacles {
        contact = first_obstacle_contact(scene, start, target);
    }

    match contact {
        Some(contact) => {
            bounce_off(particle, &contact, target);
            Some(contact)
        }
        None => {
            particle.pos = target;
            None
        }
    }
}

/// First edge (in test order) crossed by the motion segment.
///
/// Outline edges come first, then the view bounds, each only when enabled.
fn first_edge_contact(
    scene: &Scene,
    config: &SimConfig,
    start: Vec2,
    target: Vec2,
) -> Option<Contact> {
    let outline = config
        .collide_polygon
        .then(|| scene.polygon.segments())
        .into_iter()
        .flatten();
    let bounds = config
        .bounding_box
        .then(|| scene.bounds.segments())
        .into_iter()
        .flatten();

    outline
        .chain(bounds)
        .enumerate()
        .find_map(|(i, (a, b))| {
            segment_intersect(start, target, a, b).map(|point| Contact {
                point,
                normal: edge_normal(a, b),
                surface: Surface::Edge(i),
            })
        })
}

/// First obstacle (in test order) reached by the motion segment
fn first_obstacle_contact(scene: &Scene, start: Vec2, target: Vec2) -> Option<Contact> {
    scene.obstacles.iter().enumerate().find_map(|(i, obstacle)| {
        segment_circle_intersect(start, target, obstacle.center, obstacle.radius).map(|point| {
            Contact {
                point,
                normal: (point - obstacle.center).normalize_or_zero(),
                surface: Surface::Obstacle(i),
            }
        })
    })
}

/// Reflect velocity and carry the leftover travel past the impact point
fn bounce_off(particle: &mut Particle, contact: &Contact, target: Vec2) {
    particle.vel = reflect(particle.vel, contact.normal);
    let remaining = (target - contact.point).length();
    particle.pos = contact.point + particle.vel.normalize_or_zero() * remaining;
}

/// Advance the whole simulation by one frame
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> TickReport {
    let dt = dt.max(0.0);
    let mut report = TickReport::default();

    if state.config.expiry {
        report.expired = state.purge_expired();
        if report.expired > 0 {
            log::debug!(
                "Frame {}: {} particles expired, {} remain",
                state.frame,
                report.expired,
                state.population()
            );
        }
    }

    let config = state.config;
    let (particles, scene) = state.particles_and_scene();
    for particle in particles.iter_mut() {
        match step_particle(particle, scene, &config, input.mouse, dt) {
            Some(Contact {
                surface: Surface::Edge(_),
                ..
            }) => report.edge_hits += 1,
            Some(Contact {
                surface: Surface::Obstacle(_),
                ..
            }) => report.obstacle_hits += 1,
            None => {}
        }
    }

    state.time += dt;
    state.frame += 1;
    report
}
