//! Clap CLI definitions for the `bdw` command.

use std::path::PathBuf;

use beads_core::ingest::InputFormat;
use clap::{Args, Parser, Subcommand};

/// bdw -- dependency waves for beads.
///
/// Groups beads into waves that can run in parallel: every bead in a wave
/// depends only on beads in earlier waves. Beads caught in dependency
/// cycles are reported separately.
#[derive(Parser, Debug)]
#[command(
    name = "bdw",
    about = "Dependency waves for beads",
    long_about = "Groups beads into waves that can run in parallel. Every bead in a wave depends only on beads in earlier waves; beads caught in dependency cycles are reported separately.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output (RUST_LOG overrides the filter).
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Path to the .beads directory (default: $BEADS_DIR or auto-discover).
    #[arg(long, global = true, value_name = "DIR")]
    pub beads_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dependency waves.
    Waves(WavesArgs),

    /// Show only the beads caught in dependency cycles.
    Cycles(CyclesArgs),

    /// Exit non-zero if any bead cannot be scheduled.
    Check(CheckArgs),

    /// Report duplicate ids, dangling references and other input problems.
    Lint(LintArgs),

    /// Show or change settings in .beads/config.yaml.
    Config(ConfigArgs),

    /// Print version information.
    Version,

    /// Generate shell completions.
    Completion(CompletionArgs),
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Where beads are read from, shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file ('-' for stdin; default: the configured file in .beads/, else stdin).
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Record shape of the input.
    #[arg(long, short = 'f', default_value_t = InputFormat::Auto)]
    pub format: InputFormat,
}

// ---------------------------------------------------------------------------
// Waves
// ---------------------------------------------------------------------------

/// Arguments for `bdw waves`.
#[derive(Args, Debug)]
pub struct WavesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// List every wave in full instead of collapsing later ones.
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Do not label the first waves "Now" and "Next".
    #[arg(long)]
    pub no_labels: bool,
}

// ---------------------------------------------------------------------------
// Cycles / Check
// ---------------------------------------------------------------------------

/// Arguments for `bdw cycles`.
#[derive(Args, Debug)]
pub struct CyclesArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for `bdw check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

// ---------------------------------------------------------------------------
// Lint
// ---------------------------------------------------------------------------

/// Arguments for `bdw lint`.
#[derive(Args, Debug)]
pub struct LintArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Exit non-zero when any warning is reported.
    #[arg(long)]
    pub strict: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Arguments for `bdw config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// List effective settings (file plus BDW_ environment overrides).
    List,
    /// Print one effective setting.
    Get(ConfigGetArgs),
    /// Write one setting to .beads/config.yaml.
    Set(ConfigSetArgs),
}

/// Arguments for `bdw config get`.
#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    /// Dotted key, e.g. waves.expanded.
    pub key: String,
}

/// Arguments for `bdw config set`.
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Dotted key, e.g. waves.expanded.
    pub key: String,
    /// New value.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `bdw completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_waves_with_input_and_format() {
        let cli = Cli::parse_from(["bdw", "waves", "graph.json", "--format", "graph", "--all"]);
        match cli.command {
            Some(Commands::Waves(args)) => {
                assert_eq!(args.input.input.as_deref(), Some("graph.json"));
                assert_eq!(args.input.format, InputFormat::Graph);
                assert!(args.all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["bdw", "check", "-", "--json", "--beads-dir", "/tmp/x"]);
        assert!(cli.global.json);
        assert_eq!(cli.global.beads_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn parses_config_set() {
        let cli = Cli::parse_from(["bdw", "config", "set", "waves.expanded", "5"]);
        match cli.command {
            Some(Commands::Config(ConfigArgs {
                command: ConfigCommands::Set(args),
            })) => {
                assert_eq!(args.key, "waves.expanded");
                assert_eq!(args.value, "5");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["bdw", "waves", "--format", "xml"]).is_err());
    }
}
