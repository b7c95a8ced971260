//! `bdw lint` -- report input problems the scheduler silently tolerates.
//!
//! Checks for:
//! - Empty and duplicate bead ids
//! - Dependencies on beads that are not in the input
//! - Self-dependencies and repeated dependencies
//! - Dependency types that do not affect ordering
//! - Dependencies whose `target` names a different bead than their owner

use anyhow::Result;
use beads_core::diagnostics::{Diagnostic, Severity, diagnose, has_warnings};
use serde::Serialize;

use crate::cli::LintArgs;
use crate::context::RuntimeContext;
use crate::input::load_beads;
use crate::output::{format_diagnostics, output_json, output_lines};

#[derive(Serialize)]
struct LintReport<'a> {
    diagnostics: &'a [Diagnostic],
    warnings: usize,
}

/// Execute the `bdw lint` command.
pub fn run(ctx: &RuntimeContext, args: &LintArgs) -> Result<()> {
    let beads = load_beads(ctx, &args.input)?;
    let diagnostics = diagnose(&beads);

    if ctx.json {
        output_json(&LintReport {
            diagnostics: &diagnostics,
            warnings: diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count(),
        });
    } else if !(ctx.quiet && diagnostics.is_empty()) {
        output_lines(&format_diagnostics(&diagnostics));
    }

    if args.strict && has_warnings(&diagnostics) {
        std::process::exit(1);
    }
    Ok(())
}
