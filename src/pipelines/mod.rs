//! Render pipeline definitions.
//!
//! One pipeline remains in this program: the instanced block pass. The
//! `light` module carries the uniform it shades with.

pub mod block;
pub mod light;

/// Pipelines owned by the context.
pub struct Pipelines {
    pub block: wgpu::RenderPipeline,
}
