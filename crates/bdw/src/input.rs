//! Resolving and reading the bead input for analysis commands.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use beads_config::default_input;
use beads_core::Bead;
use beads_core::ingest::read_beads;
use tracing::debug;

use crate::cli::InputArgs;
use crate::context::RuntimeContext;

/// Where the beads come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Picks the source: an explicit path, `-` for stdin, else the configured
    /// file inside `.beads/` when it exists, else stdin.
    pub fn resolve(ctx: &RuntimeContext, input: Option<&str>) -> Self {
        match input {
            Some("-") => Self::Stdin,
            Some(path) => Self::File(PathBuf::from(path)),
            None => ctx
                .beads_dir
                .as_deref()
                .and_then(|dir| default_input(dir, &ctx.config.waves))
                .map(Self::File)
                .unwrap_or(Self::Stdin),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Reads beads for a command, honouring `--format`.
pub fn load_beads(ctx: &RuntimeContext, args: &InputArgs) -> Result<Vec<Bead>> {
    let source = InputSource::resolve(ctx, args.input.as_deref());
    debug!(source = %source.describe(), format = %args.format, "reading beads");

    let beads = match &source {
        InputSource::Stdin => {
            let stdin = io::stdin();
            if crossterm::tty::IsTty::is_tty(&stdin) {
                bail!(
                    "no input: pass a file, pipe JSON on stdin, or export issues to .beads/{}",
                    ctx.config.waves.input
                );
            }
            read_beads(stdin.lock(), args.format)
        }
        InputSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_beads(BufReader::new(file), args.format)
        }
    }
    .with_context(|| format!("failed to read beads from {}", source.describe()))?;

    debug!(count = beads.len(), "read beads");
    Ok(beads)
}
