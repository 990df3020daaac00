//! Vertex type for 3D rendering

use bytemuck::{Pod, Zeroable};

/// Position + color vertex; all geometry is flat-shaded colored triangles.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, z],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Night-city palette
pub mod colors {
    /// Deep night blue, also the fog color in the shader
    pub const BACKGROUND: [f32; 4] = [0.102, 0.102, 0.18, 1.0];
    pub const GROUND: [f32; 4] = [0.02, 0.02, 0.02, 1.0];
    pub const ROAD: [f32; 4] = [0.13, 0.13, 0.13, 1.0];
    pub const PLAYER_BODY: [f32; 4] = [0.0, 0.8, 1.0, 1.0];
    pub const PLAYER_CABIN: [f32; 4] = [0.07, 0.07, 0.07, 1.0];
    pub const WHEEL: [f32; 4] = [0.07, 0.07, 0.07, 1.0];
    pub const TRAFFIC: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
    /// Emissive window shell around lit buildings
    pub const WINDOWS: [f32; 4] = [0.0, 0.8, 1.0, 0.1];
}
