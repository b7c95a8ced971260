//! Command handlers, one module per subcommand.

pub mod check;
pub mod completion;
pub mod config_cmd;
pub mod cycles;
pub mod lint;
pub mod version;
pub mod waves;
