//! Static scene geometry: polygon edges and circular obstacles
//!
//! Built once per run and only read by the simulation step and render pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::segment_intersect;
use crate::error::SceneError;

/// Ordered vertices plus the vertex-index pairs that form collidable edges.
///
/// Edge order is the collision test order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    edges: Vec<(usize, usize)>,
}

impl Polygon {
    /// Build a polygon, rejecting edges that address missing vertices
    pub fn new(vertices: Vec<Vec2>, edges: Vec<(usize, usize)>) -> Result<Self, SceneError> {
        let vertex_count = vertices.len();
        for (edge, &(a, b)) in edges.iter().enumerate() {
            if let Some(index) = [a, b].into_iter().find(|&i| i >= vertex_count) {
                return Err(SceneError::EdgeOutOfRange {
                    edge,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, edges })
    }

    /// The five-pointed star, drawn point to point (every second vertex)
    pub fn star() -> Self {
        Self {
            vertices: vec![
                Vec2::new(0.0, 0.5),
                Vec2::new(0.4755, 0.1545),
                Vec2::new(0.2939, -0.4045),
                Vec2::new(-0.2939, -0.4045),
                Vec2::new(-0.4755, 0.1545),
            ],
            edges: vec![(0, 2), (2, 4), (4, 1), (1, 3), (3, 0)],
        }
    }

    /// Closed axis-aligned rectangle centered on the origin
    pub fn rectangle(half_width: f32, half_height: f32) -> Self {
        Self {
            vertices: vec![
                Vec2::new(-half_width, -half_height),
                Vec2::new(half_width, -half_height),
                Vec2::new(half_width, half_height),
                Vec2::new(-half_width, half_height),
            ],
            edges: vec![(0, 1), (1, 2), (2, 3), (3, 0)],
        }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge endpoints in test order
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices[a], self.vertices[b]))
    }
}

/// A static circle particles bounce off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleObstacle {
    pub center: Vec2,
    pub radius: f32,
}

impl CircleObstacle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Everything particles can collide with.
///
/// The drawn outline and the view bounds are kept apart: which of them
/// particles bounce off is up to the run config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Drawn outline (the star)
    pub polygon: Polygon,
    /// Invisible rectangle around the view
    pub bounds: Polygon,
    pub obstacles: Vec<CircleObstacle>,
}

impl Scene {
    pub fn new(polygon: Polygon, obstacles: Vec<CircleObstacle>) -> Self {
        Self {
            polygon,
            bounds: Polygon::default(),
            obstacles,
        }
    }

    pub fn with_bounds(self, bounds: Polygon) -> Self {
        Self { bounds, ..self }
    }

    /// Obstacles placed around the star, clear of its points
    pub fn default_obstacles() -> Vec<CircleObstacle> {
        vec![
            CircleObstacle::new(Vec2::new(-0.9, 0.55), 0.15),
            CircleObstacle::new(Vec2::new(0.9, -0.5), 0.2),
            CircleObstacle::new(Vec2::new(0.0, -0.75), 0.1),
            CircleObstacle::new(Vec2::new(0.85, 0.6), 0.12),
        ]
    }

    /// Every outline edge crossed by the segment `start→end`, in edge order.
    /// The view bounds are not part of the outline.
    pub fn edge_hits(&self, start: Vec2, end: Vec2) -> Vec<Vec2> {
        self.polygon
            .segments()
            .filter_map(|(a, b)| segment_intersect(start, end, a, b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_rejects_bad_edge() {
        let err = Polygon::new(vec![Vec2::ZERO, Vec2::X], vec![(0, 1), (1, 2)]).unwrap_err();
        assert_eq!(
            err,
            SceneError::EdgeOutOfRange {
                edge: 1,
                index: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn test_star_edges_in_order() {
        let star = Polygon::star();
        assert_eq!(star.edge_count(), 5);
        let first = star.segments().next().unwrap();
        assert_eq!(first, (Vec2::new(0.0, 0.5), Vec2::new(0.2939, -0.4045)));
        // Star is valid under the checked constructor too
        assert!(Polygon::new(star.vertices().to_vec(), star.edges.clone()).is_ok());
    }

    #[test]
    fn test_rectangle_edges_close_the_loop() {
        let rect = Polygon::rectangle(2.0, 1.0);
        assert_eq!(rect.edge_count(), 4);
        let last = rect.segments().last().unwrap();
        assert_eq!(last, (Vec2::new(-2.0, 1.0), Vec2::new(-2.0, -1.0)));
    }

    #[test]
    fn test_edge_hits_ignore_bounds() {
        // Starts on the bottom bound edge but never reaches the star
        let scene =
            Scene::new(Polygon::star(), Vec::new()).with_bounds(Polygon::rectangle(1.5, 1.0));
        let hits = scene.edge_hits(Vec2::new(0.0, -1.0), Vec2::new(-1.2, 0.9));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_edge_hits_probe_through_star() {
        let scene = Scene::new(Polygon::star(), Vec::new());
        // Horizontal probe through the star center crosses the four slanted edges
        let hits = scene.edge_hits(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|h| h.y.abs() < 1e-5));

        // Probe that stays below the star
        let hits = scene.edge_hits(Vec2::new(0.0, -1.0), Vec2::new(0.0, -0.6));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_default_obstacles_clear_of_star() {
        for obstacle in Scene::default_obstacles() {
            for v in Polygon::star().vertices() {
                assert!(v.distance(obstacle.center) > obstacle.radius);
            }
        }
    }
}
