//! Output formatting helpers for the `bdw` CLI.
//!
//! JSON goes through [`output_json`]. Text renderers return lines instead
//! of printing so that commands decide what to show and tests can inspect
//! the result.

use std::io::{self, Write};

use beads_core::diagnostics::{Diagnostic, Severity};
use beads_ui::styles::{
    render_bold, render_cycle_banner, render_cycle_line, render_muted, render_severity,
    render_severity_icon, render_wave_header, render_wave_item,
};
use beads_ui::terminal::{terminal_width, wrap_ids};
use beads_wave::WaveResult;
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print lines to stdout, ignoring broken pipes.
pub fn output_lines(lines: &[String]) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for line in lines {
        if writeln!(handle, "{}", line).is_err() {
            return;
        }
    }
}

// ---------------------------------------------------------------------------
// Waves
// ---------------------------------------------------------------------------

/// Options for [`format_waves`].
#[derive(Debug, Clone, Copy)]
pub struct WaveView {
    /// Waves listed one bead per line; later ones are wrapped compactly.
    pub expanded: usize,
    /// "Now" / "Next" labels.
    pub labels: bool,
    /// Omit the summary line.
    pub quiet: bool,
    /// Width for wrapping collapsed waves.
    pub width: usize,
}

impl WaveView {
    pub fn new(expanded: usize, labels: bool, quiet: bool) -> Self {
        Self {
            expanded,
            labels,
            quiet,
            width: terminal_width(),
        }
    }
}

/// Renders the full `bdw waves` text output.
pub fn format_waves(result: &WaveResult, view: &WaveView) -> Vec<String> {
    let mut lines = Vec::new();

    if result.is_empty() {
        lines.push("No beads to schedule.".to_string());
        return lines;
    }

    for wave in &result.waves {
        lines.push(render_wave_header(wave.level, wave.len(), view.labels));
        if wave.level < view.expanded {
            let last = wave.len().saturating_sub(1);
            for (i, id) in wave.bead_ids.iter().enumerate() {
                lines.push(render_wave_item(id, i == last));
            }
        } else {
            let width = view.width.saturating_sub(4).max(20);
            for line in wrap_ids(&wave.bead_ids, width) {
                lines.push(format!("    {}", render_muted(&line)));
            }
        }
        lines.push(String::new());
    }

    if !view.quiet {
        lines.push(format_summary(result));
    }

    if result.has_cycles {
        lines.push(String::new());
        lines.extend(format_cycles(result));
    }

    lines
}

/// One-line summary: bead count, wave count, widest wave.
pub fn format_summary(result: &WaveResult) -> String {
    let mut summary = format!(
        "{} {} beads in {} waves",
        render_bold("Summary:"),
        result.scheduled_count(),
        result.waves.len()
    );
    if let Some(widest) = result.widest_wave() {
        summary.push_str(&format!(
            ", max parallelism {} (wave {})",
            widest.len(),
            widest.level + 1
        ));
    }
    if result.has_cycles {
        summary.push_str(&format!(", {} in cycles", result.cyclic_count()));
    }
    summary
}

/// Renders the cycle banner followed by one line per group.
pub fn format_cycles(result: &WaveResult) -> Vec<String> {
    let mut lines = vec![render_cycle_banner(result.cycles.len(), result.cyclic_count())];
    for (i, group) in result.cycles.iter().enumerate() {
        lines.push(format!("  {}", render_cycle_line(i, group)));
    }
    lines
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Renders lint findings, one per line, followed by a count.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    let mut lines: Vec<String> = diagnostics
        .iter()
        .map(|d| {
            format!(
                "{} {} {}: {}",
                render_severity_icon(d.severity),
                render_severity(d.severity),
                render_bold(&d.bead_id),
                d.message()
            )
        })
        .collect();

    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    let notes = diagnostics.len() - warnings;
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("{warnings} warning(s), {notes} note(s)"));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use beads_core::Bead;
    use beads_core::diagnostics::diagnose;
    use beads_wave::compute_waves;

    fn plain(lines: &[String]) -> String {
        lines.join("\n")
    }

    fn view(expanded: usize) -> WaveView {
        WaveView {
            expanded,
            labels: true,
            quiet: false,
            width: 80,
        }
    }

    fn diamond() -> Vec<Bead> {
        vec![
            Bead::new("A"),
            Bead::new("B").blocked_by("A"),
            Bead::new("C").blocked_by("A"),
            Bead::new("D").blocked_by("B").blocked_by("C"),
        ]
    }

    #[test]
    fn empty_result_message() {
        let lines = format_waves(&WaveResult::default(), &view(3));
        assert_eq!(lines, vec!["No beads to schedule.".to_string()]);
    }

    #[test]
    fn waves_list_labels_and_ids() {
        let text = plain(&format_waves(&compute_waves(&diamond()), &view(3)));
        assert!(text.contains("Wave 1 (Now)"));
        assert!(text.contains("Wave 2 (Next)"));
        assert!(text.contains("Wave 3"));
        assert!(text.contains("A"));
        assert!(text.contains("4 beads in 3 waves"));
        assert!(text.contains("max parallelism 2 (wave 2)"));
        assert!(!text.contains("Cycle"));
    }

    #[test]
    fn collapsed_waves_still_list_ids() {
        let text = plain(&format_waves(&compute_waves(&diamond()), &view(1)));
        assert!(text.contains("B  C"));
    }

    #[test]
    fn quiet_drops_summary() {
        let mut v = view(3);
        v.quiet = true;
        let text = plain(&format_waves(&compute_waves(&diamond()), &v));
        assert!(!text.contains("Summary:"));
    }

    #[test]
    fn cycles_are_appended() {
        let result = compute_waves(&[
            Bead::new("D"),
            Bead::new("A").blocked_by("C"),
            Bead::new("B").blocked_by("A"),
            Bead::new("C").blocked_by("B"),
        ]);
        let text = plain(&format_waves(&result, &view(3)));
        assert!(text.contains("1 dependency cycle detected; 3 beads cannot be scheduled"));
        assert!(text.contains("Cycle 1: A → B → C → A"));
        assert!(text.contains("3 in cycles"));
    }

    #[test]
    fn diagnostics_are_counted() {
        let diags = diagnose(&[Bead::new("A").blocked_by("A").blocked_by("ghost")]);
        let text = plain(&format_diagnostics(&diags));
        assert!(text.contains("depends on itself"));
        assert!(text.contains("ghost"));
        assert!(text.contains("1 warning(s), 1 note(s)"));
    }

    #[test]
    fn no_diagnostics() {
        assert_eq!(format_diagnostics(&[]), vec!["0 warning(s), 0 note(s)".to_string()]);
    }
}
