//! Error types for scene construction and GPU setup.
//!
//! The per-frame simulation never fails: geometric degeneracies are ordinary
//! "no intersection" outcomes. Only setup paths return these.

use std::fmt;

/// Errors that can occur while building scene geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// An edge refers to a vertex index that does not exist.
    EdgeOutOfRange {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::EdgeOutOfRange {
                edge,
                index,
                vertex_count,
            } => write!(
                f,
                "Edge {} references vertex {} but the polygon has {} vertices",
                edge, index, vertex_count
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum RenderError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// Surface reported no supported texture formats.
    NoSurfaceFormat,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            RenderError::NoAdapter(e) => write!(f, "No compatible GPU adapter found: {}", e),
            RenderError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            RenderError::NoSurfaceFormat => write!(f, "Surface has no supported texture format"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::SurfaceCreation(e) => Some(e),
            RenderError::NoAdapter(e) => Some(e),
            RenderError::DeviceCreation(e) => Some(e),
            RenderError::NoSurfaceFormat => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for RenderError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for RenderError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        RenderError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::DeviceCreation(e)
    }
}
