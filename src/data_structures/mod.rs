//! Engine data structures: the shared cube mesh, per-instance data and the
//! depth texture.
//!
//! - `cube` is the one mesh in the program, a 36-vertex unit cube
//! - `instance` holds per-block position/color data and the GPU buffer for it
//! - `texture` is the depth texture used by the block pass

pub mod cube;
pub mod instance;
pub mod texture;

/// Types that can describe their own GPU vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}
