//! The shared cube mesh.
//!
//! Every visible block is an instance of this one mesh: 6 faces x 2
//! triangles, 36 vertices, each carrying the outward normal of its face.
//! The mesh spans one block edge starting at the origin, pre-scaled at
//! creation so the shader only has to add the per-instance offset.

use wgpu::util::DeviceExt;

use crate::data_structures::Vertex;

/// One cube corner with the normal of the face it belongs to.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex for CubeVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

// Quad corners wind counter-clockwise as seen from outside the cube, so the
// back faces survive the cull test only from inside.
#[rustfmt::skip]
const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    ([0.0, 0.0, 1.0],  [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]]),
    ([0.0, 0.0, -1.0], [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]),
    ([0.0, 1.0, 0.0],  [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]]),
    ([0.0, -1.0, 0.0], [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]]),
    ([1.0, 0.0, 0.0],  [[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]]),
    ([-1.0, 0.0, 0.0], [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]]),
];

/// Number of vertices in the mesh and therefore per drawn instance.
pub const VERTEX_COUNT: u32 = 36;

/// Expand the face table into a triangle list, scaled to one block edge.
fn build_vertices(scale: f32) -> Vec<CubeVertex> {
    let mut vertices = Vec::with_capacity(VERTEX_COUNT as usize);
    for (normal, corners) in FACES {
        for index in [0, 1, 2, 0, 2, 3] {
            let corner = corners[index];
            vertices.push(CubeVertex {
                position: [corner[0] * scale, corner[1] * scale, corner[2] * scale],
                normal,
            });
        }
    }
    vertices
}

/// The GPU-resident cube mesh shared by all instances.
pub struct CubeMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

impl CubeMesh {
    /// `scale` is the block edge length in world units.
    pub fn new(device: &wgpu::Device, scale: f32) -> Self {
        let vertices = build_vertices(scale);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            num_vertices: VERTEX_COUNT,
        }
    }
}
