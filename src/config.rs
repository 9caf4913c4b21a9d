//! Runtime configuration for the viewer.
//!
//! There is no config file and no flag parsing: the only thing the process
//! accepts from the outside is the path of the block store as its first
//! argument. Everything else is a knob with a sensible default that callers
//! embedding the library can override in code.

use std::path::PathBuf;

use cgmath::Deg;

/// Knobs controlling loading and rendering.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path of the SQLite block store.
    pub store_path: PathBuf,
    /// Radius, in block units, within which blocks are loaded and drawn.
    pub render_distance: i64,
    /// Edge length of one block in world units.
    pub block_size: f32,
    /// Camera movement speed in world units per second.
    pub speed: f32,
    /// Mouse look sensitivity in degrees per mouse-delta unit.
    pub sensitivity: f32,
    /// Vertical field of view.
    pub fovy: Deg<f32>,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Config {
    /// Build a config from the process arguments: the first positional
    /// argument, when present, replaces the default store path.
    pub fn from_args() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::args().nth(1) {
            config.store_path = PathBuf::from(path);
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("world.db"),
            render_distance: 100,
            block_size: 1.0,
            speed: 10.0,
            sensitivity: 0.4,
            fovy: Deg(75.0),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}
