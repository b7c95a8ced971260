//! `bdw waves` -- show the dependency waves.

use anyhow::Result;
use beads_wave::compute_waves;

use crate::cli::WavesArgs;
use crate::context::RuntimeContext;
use crate::input::load_beads;
use crate::output::{WaveView, format_waves, output_json, output_lines};

/// Execute the `bdw waves` command.
pub fn run(ctx: &RuntimeContext, args: &WavesArgs) -> Result<()> {
    let beads = load_beads(ctx, &args.input)?;
    let result = compute_waves(&beads);

    if ctx.json {
        output_json(&result);
        return Ok(());
    }

    let waves = &ctx.config.waves;
    let expanded = if args.all { usize::MAX } else { waves.expanded };
    let labels = waves.labels && !args.no_labels;
    output_lines(&format_waves(
        &result,
        &WaveView::new(expanded, labels, ctx.quiet),
    ));

    Ok(())
}
