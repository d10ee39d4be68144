//! Vertex format shared by the scene builder and the pipeline

use bytemuck::{Pod, Zeroable};

/// Colored point in playfield units
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Palette, RGBA in [0, 1]
pub mod colors {
    pub const WALL: [f32; 4] = [0.27, 0.27, 0.27, 1.0];
    pub const WALL_GLOW: [f32; 4] = [0.4, 0.4, 0.4, 0.35];
    pub const PORTAL_EDGE: [f32; 4] = [0.0, 1.0, 1.0, 0.3];
    pub const OBSTACLE: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
    pub const FOOD: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const FOOD_GLOW: [f32; 4] = [1.0, 0.4, 0.4, 0.35];
    /// Royal blue while scattering
    pub const MONGOOSE_SCATTER: [f32; 4] = [0.255, 0.412, 0.882, 1.0];
    /// Saddle brown while chasing
    pub const MONGOOSE_CHASE: [f32; 4] = [0.545, 0.271, 0.075, 1.0];
    pub const SHIELD: [f32; 4] = [0.0, 1.0, 0.0, 0.6];
    pub const GAME_OVER_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
