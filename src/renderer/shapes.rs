//! Shape generation for 2D primitives

use glam::{Vec2, Vec4};
use std::f32::consts::PI;

use super::draw::Canvas;
use super::vertex::Vertex;

/// Triangle fan segments for a disk of radius 1 (scaled down for small disks)
const DISK_SEGMENTS: u32 = 32;
const MIN_DISK_SEGMENTS: u32 = 8;

/// Segment count that keeps small particles cheap and large obstacles round
fn disk_segments(radius: f32) -> u32 {
    ((DISK_SEGMENTS as f32 * radius * 4.0).ceil() as u32).clamp(MIN_DISK_SEGMENTS, DISK_SEGMENTS)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a line segment drawn as a quad `thickness` wide
pub fn thick_line(start: Vec2, end: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (end - start).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (thickness * 0.5);

    // Quad corners
    let v1a = start + perp;
    let v1b = start - perp;
    let v2a = end + perp;
    let v2b = end - perp;

    // Two triangles
    vec![
        Vertex::new(v1a.x, v1a.y, color),
        Vertex::new(v1b.x, v1b.y, color),
        Vertex::new(v2a.x, v2a.y, color),
        Vertex::new(v2a.x, v2a.y, color),
        Vertex::new(v1b.x, v1b.y, color),
        Vertex::new(v2b.x, v2b.y, color),
    ]
}

/// Canvas that tessellates every request into one triangle list
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    pub vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Canvas for VertexBatch {
    fn draw_disk(&mut self, center: Vec2, radius: f32, color: Vec4) {
        self.vertices.extend(circle(
            center,
            radius,
            color.to_array(),
            disk_segments(radius),
        ));
    }

    fn draw_line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: Vec4) {
        self.vertices
            .extend(thick_line(start, end, thickness, color.to_array()));
    }
}
