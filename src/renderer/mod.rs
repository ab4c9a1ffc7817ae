//! Rendering module
//!
//! Render passes talk to a `Canvas`; the WebGPU backend tessellates into a
//! `VertexBatch` and draws it with additive blending.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::{Canvas, DrawCommand, DrawList, draw_particles, draw_probe, draw_scene};
pub use pipeline::{RenderState, sim_to_ndc};
pub use shapes::VertexBatch;
pub use vertex::Vertex;
