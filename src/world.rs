//! World loading: the query -> filter -> upload reload path.
//!
//! A reload is the only way block data moves: the store is asked for the
//! cuboid around the camera, the spherical distance cut trims it to the
//! actual visible set, colors are resolved, and the whole result is uploaded
//! to the GPU in one go. The previous set stays in place until the new one
//! is complete, so the renderer never sees a partial world.

use anyhow::Result;
use cgmath::{EuclideanSpace, MetricSpace, Point3, Vector3};
use instant::Instant;

use crate::camera::Camera;
use crate::config::Config;
use crate::data_structures::instance::{BlockInstance, InstanceBuffer};
use crate::palette;
use crate::store::{BlockRecord, BlockSource};

/// The loaded world view: the store it came from, the current instance set
/// and the GPU buffer holding it.
pub struct World<S: BlockSource> {
    store: S,
    instances: Vec<BlockInstance>,
    buffer: InstanceBuffer,
}

impl<S: BlockSource> World<S> {
    /// Start with nothing loaded.
    pub fn new(device: &wgpu::Device, store: S) -> Self {
        Self {
            store,
            instances: Vec::new(),
            buffer: InstanceBuffer::new(device),
        }
    }

    /// The instance set built by the last reload.
    pub fn instances(&self) -> &[BlockInstance] {
        &self.instances
    }

    /// The GPU buffer holding the last uploaded set.
    pub fn buffer(&self) -> &InstanceBuffer {
        &self.buffer
    }

    /// Re-query, rebuild and re-upload the visible set around the camera.
    ///
    /// Runs synchronously on the calling (frame) thread and blocks it until
    /// the upload completes. On a query error the previous set is left in
    /// place untouched.
    pub fn reload(&mut self, device: &wgpu::Device, camera: &Camera, config: &Config) -> Result<()> {
        let started = Instant::now();

        let center = camera.grid_position(config.block_size);
        let r = config.render_distance;
        let min = [center[0] - r, center[1] - r, center[2] - r];
        let max = [center[0] + r, center[1] + r, center[2] + r];
        let records = self.store.query_range(min, max)?;

        self.instances = build_instances(
            &records,
            camera.position,
            config.block_size,
            config.render_distance,
        );
        self.buffer.upload(device, &self.instances);

        log::info!(
            "reloaded {} blocks ({} rows in range) in {:?}",
            self.instances.len(),
            records.len(),
            started.elapsed(),
        );
        Ok(())
    }
}

/// Turn store records into the renderable instance set.
///
/// The box query is a cuboid superset; this applies the spherical cut that
/// produces the actual visible set: a record survives only if its world
/// position lies within `render_distance * block_size` of the camera. Store
/// row order is preserved but carries no meaning.
pub fn build_instances(
    records: &[BlockRecord],
    camera_pos: Point3<f32>,
    block_size: f32,
    render_distance: i64,
) -> Vec<BlockInstance> {
    if render_distance <= 0 {
        return Vec::new();
    }
    let radius = render_distance as f32 * block_size;

    records
        .iter()
        .filter_map(|record| {
            let position = Vector3::new(record.x as f32, record.y as f32, record.z as f32)
                * block_size;
            if Point3::from_vec(position).distance(camera_pos) > radius {
                return None;
            }
            Some(BlockInstance {
                position,
                color: palette::resolve(&record.material),
            })
        })
        .collect()
}
