//! Range queries against the persistent block store.
//!
//! The store is a plain SQLite file with one row per mined block. The viewer
//! is a read-only consumer and needs exactly one operation from it: all
//! blocks inside an axis-aligned box. That operation sits behind the
//! [`BlockSource`] trait so the instance-set builder can be exercised
//! without a database file.

use std::path::Path;

use anyhow::{Context as _, Result};
use rusqlite::Connection;

/// One row from the store: grid coordinates plus the material identifier.
///
/// Records only live for the duration of a single load; nothing downstream
/// holds on to them past the instance build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockRecord {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub material: String,
}

/// A source of block records inside an inclusive coordinate box.
pub trait BlockSource {
    /// All blocks with `min <= (x, y, z) <= max`, per axis.
    ///
    /// Row order is unspecified and callers must not rely on it. Rows whose
    /// material is absent or blank represent empty cells and never surface.
    /// An empty result is a valid world view, not an error.
    fn query_range(&self, min: [i64; 3], max: [i64; 3]) -> Result<Vec<BlockRecord>>;
}

// Blank `data` marks an unmined cell; the filter belongs to the query itself
// so no caller can forget it.
const RANGE_SQL: &str = "SELECT x, y, z, data FROM blocks \
     WHERE x BETWEEN ?1 AND ?2 \
       AND y BETWEEN ?3 AND ?4 \
       AND z BETWEEN ?5 AND ?6 \
       AND data IS NOT NULL AND TRIM(data) <> ''";

/// Read-only adapter over the SQLite block store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store file read-only.
    ///
    /// The range statement is prepared eagerly so a missing file or a store
    /// without a queryable `blocks` table fails here, at startup, rather
    /// than on the first reload. The connection closes when the store is
    /// dropped.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("cannot open block store {}", path.display()))?;
        conn.prepare_cached(RANGE_SQL).with_context(|| {
            format!("block store {} has no queryable blocks table", path.display())
        })?;
        Ok(Self { conn })
    }
}

impl BlockSource for SqliteStore {
    fn query_range(&self, min: [i64; 3], max: [i64; 3]) -> Result<Vec<BlockRecord>> {
        let mut stmt = self.conn.prepare_cached(RANGE_SQL)?;
        let rows = stmt.query_map(
            rusqlite::params![min[0], max[0], min[1], max[1], min[2], max[2]],
            |row| {
                Ok(BlockRecord {
                    x: row.get(0)?,
                    y: row.get(1)?,
                    z: row.get(2)?,
                    material: row.get(3)?,
                })
            },
        )?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
