//! Render passes over a drawing service
//!
//! `Canvas` is the only thing a backend has to provide: filled disks and
//! thick line segments, both in simulation coordinates. Blending is the
//! backend's concern (the GPU pipeline blends additively).

use glam::{Vec2, Vec4};

use crate::consts::*;
use crate::sim::{Scene, SimState};

/// Drawing service for one frame
pub trait Canvas {
    fn draw_disk(&mut self, center: Vec2, radius: f32, color: Vec4);
    fn draw_line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: Vec4);
}

/// A recorded draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Disk {
        center: Vec2,
        radius: f32,
        color: Vec4,
    },
    Line {
        start: Vec2,
        end: Vec2,
        thickness: f32,
        color: Vec4,
    },
}

/// Canvas that just records requests (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn disks(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disk { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Canvas for DrawList {
    fn draw_disk(&mut self, center: Vec2, radius: f32, color: Vec4) {
        self.commands.push(DrawCommand::Disk {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: Vec4) {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            thickness,
            color,
        });
    }
}

/// Static geometry: outline edges and obstacle disks (the view bounds are not drawn)
pub fn draw_scene<C: Canvas + ?Sized>(canvas: &mut C, scene: &Scene) {
    for obstacle in &scene.obstacles {
        canvas.draw_disk(obstacle.center, obstacle.radius, OBSTACLE_COLOR);
    }
    for (start, end) in scene.polygon.segments() {
        canvas.draw_line(start, end, EDGE_THICKNESS, EDGE_COLOR);
    }
}

/// One disk per live particle, colored and sized by age
pub fn draw_particles<C: Canvas + ?Sized>(canvas: &mut C, state: &SimState) {
    for particle in &state.particles {
        let look = state.config.appearance(particle);
        if look.radius > 0.0 {
            canvas.draw_disk(particle.pos, look.radius, look.color);
        }
    }
}

/// Ray from the bottom of the view to the mouse, marking every edge it crosses
pub fn draw_probe<C: Canvas + ?Sized>(canvas: &mut C, scene: &Scene, mouse: Vec2) {
    canvas.draw_line(PROBE_ORIGIN, mouse, PROBE_THICKNESS, PROBE_COLOR);
    for hit in scene.edge_hits(PROBE_ORIGIN, mouse) {
        canvas.draw_disk(hit, PROBE_MARKER_RADIUS, PROBE_MARKER_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;
    use crate::sim::{Particle, Polygon, SimConfig};

    #[test]
    fn test_draw_scene_counts() {
        let scene = SimConfig::for_variant(Variant::ObstacleBounce).build_scene(1.5);
        let mut list = DrawList::new();
        draw_scene(&mut list, &scene);
        assert_eq!(list.lines().count(), scene.polygon.edge_count());
        assert_eq!(list.disks().count(), scene.obstacles.len());
    }

    #[test]
    fn test_drift_draws_star_and_marks_crossings() {
        let scene = SimConfig::for_variant(Variant::Drift).build_scene(1.5);
        let mut list = DrawList::new();
        draw_scene(&mut list, &scene);
        assert_eq!(list.lines().count(), 5);
        for line in list.lines() {
            if let DrawCommand::Line {
                thickness, color, ..
            } = line
            {
                assert_eq!(*thickness, EDGE_THICKNESS);
                assert_eq!(*color, EDGE_COLOR);
            }
        }

        list.clear();
        draw_probe(&mut list, &scene, Vec2::new(0.1, 0.0));
        assert_eq!(list.disks().count(), 2);
    }

    #[test]
    fn test_probe_ignores_view_bounds() {
        // The ray starts on the bottom bound; only star crossings are marked
        let scene = SimConfig::for_variant(Variant::StarBounce).build_scene(1.5);
        let mut list = DrawList::new();
        draw_probe(&mut list, &scene, Vec2::new(-1.2, 0.9));
        assert_eq!(list.disks().count(), 0);
        assert_eq!(list.lines().count(), 1);
    }

    #[test]
    fn test_draw_particles_uses_appearance() {
        let mut state = SimState::new(SimConfig::for_variant(Variant::StarBounce), 1.0, 3);
        state.particles = vec![Particle::new(Vec2::new(0.1, 0.2), Vec2::ZERO, 5.0)];

        let mut list = DrawList::new();
        draw_particles(&mut list, &state);
        assert_eq!(
            list.commands,
            vec![DrawCommand::Disk {
                center: Vec2::new(0.1, 0.2),
                radius: CONSTANT_RADIUS,
                color: Vec4::ONE,
            }]
        );
    }

    #[test]
    fn test_vanished_particles_not_drawn() {
        let mut state = SimState::new(SimConfig::for_variant(Variant::Lifecycle), 1.0, 3);
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 5.0);
        p.age = 5.0;
        state.particles = vec![p];

        let mut list = DrawList::new();
        draw_particles(&mut list, &state);
        assert!(list.is_empty());
    }

    #[test]
    fn test_probe_marks_star_crossings() {
        let scene = Scene::new(Polygon::star(), Vec::new());
        let mut list = DrawList::new();

        // Straight up through the star's lower edges
        draw_probe(&mut list, &scene, Vec2::new(0.1, 0.0));
        assert_eq!(list.lines().count(), 1);
        assert!(list.disks().count() >= 1);
        for marker in list.disks() {
            if let DrawCommand::Disk { radius, color, .. } = marker {
                assert_eq!(*radius, PROBE_MARKER_RADIUS);
                assert_eq!(*color, PROBE_MARKER_COLOR);
            }
        }

        // Mouse below the star: the ray misses everything
        list.clear();
        draw_probe(&mut list, &scene, Vec2::new(0.0, -0.8));
        assert_eq!(list.len(), 1);
    }
}
