//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: the resolved
//! `.beads/` directory (if any), the layered configuration, and the global
//! output flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use beads_config::{WaveToolConfig, find_beads_dir, load_config, load_env_config};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Resolved `.beads/` directory, if one was given or discovered.
    pub beads_dir: Option<PathBuf>,

    /// Configuration from defaults, `config.yaml` and `BDW_` env.
    pub config: WaveToolConfig,

    /// Whether to produce JSON output (`--json` or `json: true` in config).
    pub json: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// `--beads-dir` wins over discovery (`$BEADS_DIR`, then walking up from
    /// the current directory). Without a `.beads/` directory the config is
    /// defaults plus environment.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let beads_dir = match &global.beads_dir {
            Some(dir) => Some(dir.clone()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| find_beads_dir(&cwd)),
        };

        let config = match &beads_dir {
            Some(dir) => load_config(dir)
                .with_context(|| format!("failed to load config from {}", dir.display()))?,
            None => load_env_config().context("failed to load config from environment")?,
        };

        Ok(Self {
            json: global.json || config.json,
            beads_dir,
            config,
            quiet: global.quiet,
        })
    }
}
