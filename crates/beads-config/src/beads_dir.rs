//! Discovery of the `.beads/` directory and the default input inside it.
//!
//! The `.beads/` directory is the root of a beads project's metadata. The
//! wave tools read the issue export inside it as default input and keep
//! their `config.yaml` there.

use crate::config::WavesConfig;
use std::path::{Path, PathBuf};

/// The name of the beads metadata directory.
const BEADS_DIR_NAME: &str = ".beads";

/// The name of the environment variable that can override the beads directory.
const BEADS_DIR_ENV: &str = "BEADS_DIR";

/// Walk up the directory tree from `start` looking for a `.beads/` directory.
///
/// Returns the path to the `.beads/` directory if found, or `None` if the
/// filesystem root is reached without finding one. The `BEADS_DIR`
/// environment variable is checked first (highest priority).
///
/// # Examples
///
/// ```no_run
/// use beads_config::beads_dir::find_beads_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_beads_dir(Path::new(".")) {
///     println!("Found beads dir at {}", dir.display());
/// }
/// ```
pub fn find_beads_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(BEADS_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(BEADS_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Path of the default input file inside `beads_dir`, if it exists.
///
/// Relative `waves.input` values are resolved against `beads_dir`;
/// absolute ones are used as-is.
pub fn default_input(beads_dir: &Path, waves: &WavesConfig) -> Option<PathBuf> {
    let path = beads_dir.join(&waves.input);
    path.is_file().then_some(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
