//! voxelview
//!
//! A viewer for sparse voxel worlds persisted in a SQLite block store. The
//! user flies a free camera through the world and sees every block within a
//! configurable radius, colored by its material and drawn as one instance of
//! a shared cube mesh in a single instanced draw call. Loading is explicit
//! and synchronous: the visible set is queried, filtered, and uploaded to the
//! GPU as a whole on startup and whenever a reload is requested.
//!
//! High-level modules
//! - `camera`: camera pose, controller and uniforms for view/projection
//! - `config`: runtime knobs (store path, render distance, block size)
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: cube mesh, per-instance data and the depth texture
//! - `palette`: material identifier to color resolution
//! - `pipelines`: the instanced block render pipeline and light uniforms
//! - `store`: range queries against the persistent block store
//! - `viewer`: the event loop driving input, reloads and frames
//! - `world`: the query -> filter -> upload reload path
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod palette;
pub mod pipelines;
pub mod store;
pub mod viewer;
pub mod world;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Matrix4, Point3, Vector3};
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
