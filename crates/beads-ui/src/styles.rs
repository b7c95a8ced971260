//! Ayu color theme and styling functions for wave output.
//!
//! Uses the Ayu Dark color palette.
//! Color source: <https://github.com/ayu-theme/ayu-colors>
//!
//! Only the parts of a plan that ask for attention get color: the wave
//! that can start now, cycle groups, and warnings. Bead ids use standard
//! text.

use beads_core::diagnostics::Severity;
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

const WAVE_NOW: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - green
const WAVE_NEXT: (u8, u8, u8) = (0xe6, 0xb4, 0x50); // #e6b450 - muted gold

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_WARN: &str = "\u{26A0}"; // ⚠
pub const ICON_FAIL: &str = "\u{2716}"; // ✖
pub const ICON_INFO: &str = "\u{2139}"; // ℹ

/// Arrow between cycle members.
pub const CYCLE_ARROW: &str = "\u{2192}"; // →

// Tree characters for bead lists under a wave header
pub const TREE_CHILD: &str = "\u{251C}\u{2500} "; // ├─
pub const TREE_LAST: &str = "\u{2514}\u{2500} "; // └─

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

/// Applies truecolor foreground to a string, falling back to plain text
/// when color is not supported.
fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

/// Applies truecolor foreground + bold to a string.
fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_warn_icon() -> String {
    color_str(ICON_WARN, WARN)
}

pub fn render_fail_icon() -> String {
    color_str(ICON_FAIL, FAIL)
}

pub fn render_info_icon() -> String {
    color_str(ICON_INFO, ACCENT)
}

// ---------------------------------------------------------------------------
// Wave rendering
// ---------------------------------------------------------------------------

/// Label for a wave level when labels are on: "Now" for the first wave,
/// "Next" for the second, nothing after that.
pub fn wave_label(level: usize) -> Option<&'static str> {
    match level {
        0 => Some("Now"),
        1 => Some("Next"),
        _ => None,
    }
}

/// Renders a wave header.
///
/// Format: `Wave {n} ({label}) · {count} bead(s)`, with the label omitted
/// when `labels` is false or the wave has none. `n` is 1-based.
pub fn render_wave_header(level: usize, count: usize, labels: bool) -> String {
    let label = if labels { wave_label(level) } else { None };
    let title = match label {
        Some(label) => format!("Wave {} ({})", level + 1, label),
        None => format!("Wave {}", level + 1),
    };
    let title = match level {
        0 if labels => color_bold_str(&title, WAVE_NOW),
        1 if labels => color_bold_str(&title, WAVE_NEXT),
        _ => render_bold(&title),
    };
    let noun = if count == 1 { "bead" } else { "beads" };
    format!("{} {}", title, render_muted(&format!("\u{00B7} {count} {noun}")))
}

/// Renders one bead line under a wave header using tree characters.
pub fn render_wave_item(id: &str, last: bool) -> String {
    let branch = if last { TREE_LAST } else { TREE_CHILD };
    format!("  {}{}", render_muted(branch), id)
}

/// Renders a cycle group as a closed path: `A → B → C → A`.
///
/// A one-member group renders as `A → A`.
pub fn render_cycle_path(members: &[String]) -> String {
    let Some(first) = members.first() else {
        return String::new();
    };
    let arrow = format!(" {CYCLE_ARROW} ");
    let mut path = members.join(&arrow);
    path.push_str(&arrow);
    path.push_str(first);
    path
}

/// Renders the numbered cycle line: `Cycle 1: A → B → A`. `index` is 0-based.
pub fn render_cycle_line(index: usize, members: &[String]) -> String {
    format!(
        "{} {}",
        color_bold_str(&format!("Cycle {}:", index + 1), FAIL),
        render_cycle_path(members)
    )
}

/// Renders the banner shown above cycle groups.
pub fn render_cycle_banner(groups: usize, beads: usize) -> String {
    let groups_noun = if groups == 1 { "cycle" } else { "cycles" };
    let beads_noun = if beads == 1 { "bead" } else { "beads" };
    format!(
        "{} {}",
        render_fail_icon(),
        render_fail(&format!(
            "{groups} dependency {groups_noun} detected; {beads} {beads_noun} cannot be scheduled"
        ))
    )
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Returns the icon for a diagnostic severity, colored.
pub fn render_severity_icon(severity: Severity) -> String {
    match severity {
        Severity::Warning => render_warn_icon(),
        Severity::Info => render_info_icon(),
    }
}

/// Renders the severity word with its color.
pub fn render_severity(severity: Severity) -> String {
    let s = severity.to_string();
    match severity {
        Severity::Warning => color_str(&s, WARN),
        Severity::Info => color_str(&s, ACCENT),
    }
}
