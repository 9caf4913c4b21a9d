use cgmath::{Point3, Vector3};

use voxelview::data_structures::instance::{BlockInstance, BlockInstanceRaw};
use voxelview::store::BlockRecord;
use voxelview::world::build_instances;

fn record(x: i64, y: i64, z: i64, material: &str) -> BlockRecord {
    BlockRecord {
        x,
        y,
        z,
        material: material.to_string(),
    }
}

#[test]
fn should_keep_a_block_inside_the_radius() {
    let records = [record(0, 0, 5, "CAS:1317-65-3")];
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 1.0, 100);
    assert_eq!(set.len(), 1);
    assert_eq!(set[0].position, Vector3::new(0.0, 0.0, 5.0));
    assert_eq!(set[0].color, [0.7, 0.7, 0.7]);
}

#[test]
fn should_drop_a_block_beyond_the_radius() {
    // The cuboid box query may well return this row; the spherical cut
    // must not let it through.
    let records = [record(1000, 0, 0, "CAS:1317-65-3")];
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 1.0, 100);
    assert!(set.is_empty());
}

#[test]
fn should_keep_a_block_exactly_on_the_radius() {
    let records = [record(0, 0, 100, "CAS:1317-65-3")];
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 1.0, 100);
    assert_eq!(set.len(), 1);
}

#[test]
fn should_build_nothing_with_zero_render_distance() {
    let records = [record(0, 0, 0, "CAS:1317-65-3"), record(1, 0, 0, "x")];
    let set = build_instances(&records, Point3::new(0.5, 0.5, 0.5), 1.0, 0);
    assert!(set.is_empty());
}

#[test]
fn should_build_nothing_with_negative_render_distance() {
    let records = [record(0, 0, 0, "CAS:1317-65-3")];
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 1.0, -3);
    assert!(set.is_empty());
}

#[test]
fn should_scale_world_positions_by_block_size() {
    let records = [record(2, -1, 3, "some-material")];
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 0.5, 100);
    assert_eq!(set[0].position, Vector3::new(1.0, -0.5, 1.5));
}

#[test]
fn should_scale_the_radius_by_block_size() {
    // With 2.0 blocks the records sit at world distance 10 and 14, and the
    // radius scales the same way, so the cut is unchanged in grid terms.
    let records = [record(0, 0, 5, "m"), record(0, 0, 7, "m")];
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 2.0, 6);
    assert_eq!(set.len(), 1);
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 2.0, 7);
    assert_eq!(set.len(), 2);
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 2.0, 4);
    assert!(set.is_empty());
}

#[test]
fn should_preserve_store_row_order() {
    let records = [
        record(1, 0, 0, "a"),
        record(0, 1, 0, "b"),
        record(0, 0, 1, "c"),
    ];
    let set = build_instances(&records, Point3::new(0.0, 0.0, 0.0), 1.0, 10);
    let positions: Vec<_> = set.iter().map(|instance| instance.position).collect();
    assert_eq!(
        positions,
        vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ]
    );
}

#[test]
fn should_pack_instances_into_24_byte_records() {
    assert_eq!(std::mem::size_of::<BlockInstanceRaw>(), 24);
}

#[test]
fn should_size_the_raw_upload_to_exactly_count_records() {
    for count in [0usize, 1, 257] {
        let instances: Vec<BlockInstance> = (0..count)
            .map(|i| BlockInstance {
                position: Vector3::new(i as f32, 0.0, 0.0),
                color: [0.5, 0.5, 0.5],
            })
            .collect();
        let raw: Vec<BlockInstanceRaw> =
            instances.iter().map(BlockInstance::to_raw).collect();
        let bytes: &[u8] = bytemuck::cast_slice(&raw);
        assert_eq!(bytes.len(), count * std::mem::size_of::<BlockInstanceRaw>());
    }
}
