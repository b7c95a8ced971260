//! `bdw` -- dependency waves for beads.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod input;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, GlobalArgs};
use context::RuntimeContext;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(&cli.global);

    let result = RuntimeContext::from_global_args(&cli.global)
        .and_then(|ctx| dispatch(&ctx, cli.command));

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the flag-derived filter.
fn init_logging(global: &GlobalArgs) {
    let default = if global.verbose {
        "bdw=debug,beads_wave=debug,beads_core=debug,beads_config=debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(global.verbose)
        .init();
}

fn dispatch(ctx: &RuntimeContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Waves(args)) => commands::waves::run(ctx, &args),
        Some(Commands::Cycles(args)) => commands::cycles::run(ctx, &args),
        Some(Commands::Check(args)) => commands::check::run(ctx, &args),
        Some(Commands::Lint(args)) => commands::lint::run(ctx, &args),
        Some(Commands::Config(args)) => commands::config_cmd::run(ctx, &args),
        Some(Commands::Version) => commands::version::run(ctx),
        Some(Commands::Completion(args)) => commands::completion::run(&args),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
