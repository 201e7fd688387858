//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::ObstacleKind;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
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

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: [f32; 4],
    pub ground: [f32; 4],
    pub ground_line: [f32; 4],
    pub player: [f32; 4],
    pub player_eye: [f32; 4],
    pub cactus: [f32; 4],
    pub rock: [f32; 4],
    pub wood: [f32; 4],
    pub spikes: [f32; 4],
    /// Multiplied into everything once the round is over
    pub game_over_tint: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky: [0.98, 0.93, 0.82, 1.0],
            ground: [0.85, 0.72, 0.50, 1.0],
            ground_line: [0.45, 0.33, 0.20, 1.0],
            player: [0.25, 0.25, 0.30, 1.0],
            player_eye: [1.0, 1.0, 1.0, 1.0],
            cactus: [0.20, 0.55, 0.25, 1.0],
            rock: [0.50, 0.48, 0.45, 1.0],
            wood: [0.50, 0.32, 0.15, 1.0],
            spikes: [0.35, 0.35, 0.40, 1.0],
            game_over_tint: [0.7, 0.55, 0.55, 1.0],
        }
    }
}

impl Palette {
    /// Black-on-white variant for accessibility
    pub fn high_contrast() -> Self {
        let ink = [0.0, 0.0, 0.0, 1.0];
        Self {
            sky: [1.0, 1.0, 1.0, 1.0],
            ground: [0.85, 0.85, 0.85, 1.0],
            ground_line: ink,
            player: ink,
            player_eye: [1.0, 1.0, 1.0, 1.0],
            cactus: ink,
            rock: ink,
            wood: ink,
            spikes: ink,
            game_over_tint: [0.6, 0.6, 0.6, 1.0],
        }
    }

    pub fn obstacle(&self, kind: ObstacleKind) -> [f32; 4] {
        match kind {
            ObstacleKind::SmallCactus | ObstacleKind::TallCactus | ObstacleKind::CactusCluster => {
                self.cactus
            }
            ObstacleKind::Rock => self.rock,
            ObstacleKind::Log => self.wood,
            ObstacleKind::Spikes => self.spikes,
        }
    }
}
