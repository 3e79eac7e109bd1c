pub mod commands;
pub mod context;
pub mod formatters;
pub mod output;
pub mod registry;
mod shell;

pub use context::{CliContext, LoopControl};
pub use shell::{parse_command_line, run_cli, run_script};
