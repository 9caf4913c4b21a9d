//! Viewer binary entry point.
//!
//! Usage: `voxelview [STORE_PATH]` — the optional argument is the SQLite
//! block store, defaulting to `world.db` in the working directory.

use voxelview::config::Config;

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    voxelview::viewer::run(Config::from_args())
}
