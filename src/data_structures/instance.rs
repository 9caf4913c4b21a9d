//! Per-instance data for the block draw call.
//!
//! Every visible block is one instance of the shared cube mesh. The only
//! per-instance state is a world-space position and a resolved material
//! color; both live in a single GPU buffer that is replaced wholesale on
//! each reload and read by the one instanced draw call in between.

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::data_structures::Vertex;

/// One renderable block: world-space position and resolved color.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockInstance {
    pub position: Vector3<f32>,
    pub color: [f32; 3],
}

impl BlockInstance {
    pub fn to_raw(&self) -> BlockInstanceRaw {
        BlockInstanceRaw {
            position: self.position.into(),
            color: self.color,
        }
    }
}

/**
 * The raw instance is the actual data stored on the GPU: two tightly packed
 * vec3s, 24 bytes per drawn block.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockInstanceRaw {
    position: [f32; 3],
    color: [f32; 3],
}

impl Vertex for BlockInstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<BlockInstanceRaw>() as wgpu::BufferAddress,
            // We need to switch from using a step mode of Vertex to Instance
            // so the shader only advances to the next record when it starts
            // processing a new instance.
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    // corresponds to the @location in the shader file.
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// The GPU-resident per-instance array for the block draw call.
///
/// Between uploads the contents are immutable; the draw call reads exactly
/// [`count`](Self::count) records from it. An upload replaces the whole
/// buffer, never patches it, so the renderer can never observe a half
/// written set.
pub struct InstanceBuffer {
    pub buffer: wgpu::Buffer,
    count: u32,
}

impl InstanceBuffer {
    /// Start empty: zero instances, zero bytes.
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            buffer: mk_buffer(device, &[]),
            count: 0,
        }
    }

    /// Replace the GPU array with `instances`, sized to exactly
    /// `instances.len() * size_of::<BlockInstanceRaw>()` bytes of
    /// consecutive (position, color) records. An empty slice is valid and
    /// leaves the draw call with zero instances to skip.
    pub fn upload(&mut self, device: &wgpu::Device, instances: &[BlockInstance]) {
        let raw = instances
            .iter()
            .map(BlockInstance::to_raw)
            .collect::<Vec<_>>();
        self.buffer = mk_buffer(device, &raw);
        self.count = instances.len() as u32;
    }

    /// Instance count of the last upload, the draw call's instance range.
    pub fn count(&self) -> u32 {
        self.count
    }
}

fn mk_buffer(device: &wgpu::Device, raw: &[BlockInstanceRaw]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Instance Buffer"),
        contents: bytemuck::cast_slice(raw),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    })
}
