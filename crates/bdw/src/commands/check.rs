//! `bdw check` -- verify that every bead can be scheduled.
//!
//! Exits 0 when the dependency graph is acyclic and 1 otherwise, so it can
//! gate CI or a pre-commit hook.

use anyhow::Result;
use beads_ui::styles::{render_fail, render_fail_icon, render_pass, render_pass_icon};
use beads_wave::{WaveResult, compute_waves};
use serde::Serialize;

use crate::cli::CheckArgs;
use crate::context::RuntimeContext;
use crate::input::load_beads;
use crate::output::{format_cycles, output_json, output_lines};

#[derive(Serialize)]
struct CheckReport<'a> {
    schedulable: bool,
    cycles: &'a [Vec<String>],
}

/// One-line verdict for text output.
fn verdict(result: &WaveResult) -> String {
    if result.has_cycles {
        format!(
            "{} {}",
            render_fail_icon(),
            render_fail(&format!(
                "not schedulable: {} of {} beads are in dependency cycles",
                result.cyclic_count(),
                result.total_count()
            ))
        )
    } else {
        format!(
            "{} {}",
            render_pass_icon(),
            render_pass(&format!(
                "schedulable: {} beads in {} waves",
                result.scheduled_count(),
                result.waves.len()
            ))
        )
    }
}

/// Execute the `bdw check` command.
pub fn run(ctx: &RuntimeContext, args: &CheckArgs) -> Result<()> {
    let beads = load_beads(ctx, &args.input)?;
    let result = compute_waves(&beads);

    if ctx.json {
        output_json(&CheckReport {
            schedulable: !result.has_cycles,
            cycles: &result.cycles,
        });
    } else {
        println!("{}", verdict(&result));
        if result.has_cycles && !ctx.quiet {
            output_lines(&format_cycles(&result));
        }
    }

    if result.has_cycles {
        std::process::exit(1);
    }
    Ok(())
}
