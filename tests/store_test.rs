use std::path::Path;

use rusqlite::Connection;
use tempfile::TempDir;

use voxelview::store::{BlockSource, SqliteStore};

/// Write a throwaway store with the given rows.
fn seed_store(path: &Path, rows: &[(i64, i64, i64, Option<&str>)]) {
    let conn = Connection::open(path).unwrap();
    conn.execute(
        "CREATE TABLE blocks (x INTEGER, y INTEGER, z INTEGER, data TEXT)",
        [],
    )
    .unwrap();
    for (x, y, z, data) in rows {
        conn.execute(
            "INSERT INTO blocks (x, y, z, data) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![x, y, z, data],
        )
        .unwrap();
    }
}

#[test]
fn should_return_rows_inside_the_box_with_inclusive_bounds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.db");
    seed_store(
        &path,
        &[
            (-2, 0, 0, Some("a")),
            (-1, 0, 0, Some("b")),
            (0, 0, 0, Some("c")),
            (1, 0, 0, Some("d")),
            (2, 0, 0, Some("e")),
        ],
    );

    let store = SqliteStore::open(&path).unwrap();
    let mut records = store.query_range([-1, 0, 0], [1, 0, 0]).unwrap();
    records.sort_by_key(|record| record.x);

    let materials: Vec<&str> = records.iter().map(|r| r.material.as_str()).collect();
    assert_eq!(materials, vec!["b", "c", "d"]);
}

#[test]
fn should_exclude_blank_and_null_materials() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.db");
    seed_store(
        &path,
        &[
            (0, 0, 0, Some("")),
            (1, 0, 0, Some("   ")),
            (2, 0, 0, Some("\t")),
            (3, 0, 0, None),
            (4, 0, 0, Some("CAS:1317-65-3")),
        ],
    );

    let store = SqliteStore::open(&path).unwrap();
    let records = store.query_range([0, 0, 0], [10, 10, 10]).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].material, "CAS:1317-65-3");
    assert_eq!((records[0].x, records[0].y, records[0].z), (4, 0, 0));
}

#[test]
fn should_treat_zero_rows_as_a_valid_empty_view() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.db");
    seed_store(&path, &[(100, 100, 100, Some("a"))]);

    let store = SqliteStore::open(&path).unwrap();
    let records = store.query_range([-10, -10, -10], [10, 10, 10]).unwrap();
    assert!(records.is_empty());
}

#[test]
fn should_fail_to_open_a_missing_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-world.db");
    assert!(SqliteStore::open(&path).is_err());
}

#[test]
fn should_fail_to_open_a_store_without_a_blocks_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("other.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute("CREATE TABLE not_blocks (id INTEGER)", [])
        .unwrap();
    drop(conn);

    assert!(SqliteStore::open(&path).is_err());
}
