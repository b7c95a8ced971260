//! `bdw cycles` -- show only the beads that cannot be scheduled.

use anyhow::Result;
use beads_ui::styles::{render_pass, render_pass_icon};
use beads_wave::compute_waves;
use serde::Serialize;

use crate::cli::CyclesArgs;
use crate::context::RuntimeContext;
use crate::input::load_beads;
use crate::output::{format_cycles, output_json, output_lines};

#[derive(Serialize)]
struct CyclesReport<'a> {
    cycles: &'a [Vec<String>],
    #[serde(rename = "hasCycles")]
    has_cycles: bool,
}

/// Execute the `bdw cycles` command.
pub fn run(ctx: &RuntimeContext, args: &CyclesArgs) -> Result<()> {
    let beads = load_beads(ctx, &args.input)?;
    let result = compute_waves(&beads);

    if ctx.json {
        output_json(&CyclesReport {
            cycles: &result.cycles,
            has_cycles: result.has_cycles,
        });
        return Ok(());
    }

    if result.has_cycles {
        output_lines(&format_cycles(&result));
    } else if !ctx.quiet {
        println!("{} {}", render_pass_icon(), render_pass("No dependency cycles"));
    }

    Ok(())
}
