//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Color;

/// Flat-shaded 2D vertex in NDC
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
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
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors drawn by the renderer itself (entity colors live on the rects)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.53, 0.75, 0.92, 1.0];
    pub const HEALTH_BAR: [f32; 4] = [0.85, 0.15, 0.15, 1.0];
    pub const HEALTH_BAR_BACK: [f32; 4] = [0.1, 0.1, 0.1, 0.6];
    pub const GAME_OVER_TINT: [f32; 4] = [0.0, 0.0, 0.0, 0.45];
}
