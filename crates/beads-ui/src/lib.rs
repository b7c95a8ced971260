//! Terminal styling for wave output.
//!
//! Ayu-themed colors, wave and cycle renderers, and terminal detection
//! (`NO_COLOR`, `CLICOLOR`, TTY) for the `bdw` text output.

pub mod styles;
pub mod terminal;
