//! Configuration for the beads wave tools.
//!
//! This crate loads `.beads/config.yaml` (layered with `BDW_` environment
//! overrides), discovers `.beads/` directories in the filesystem, and
//! resolves the default input file inside them.

pub mod beads_dir;
pub mod config;

pub use beads_dir::{default_input, find_beads_dir};
pub use config::{
    ConfigError, WaveToolConfig, WavesConfig, load_config, load_env_config, load_file_config,
    save_config, set_config_value,
};
