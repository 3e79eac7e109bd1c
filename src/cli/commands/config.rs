use crate::cli::commands::parse_args;
use crate::cli::context::{CliContext, CommandResult, LoopControl};
use crate::cli::registry::CommandEntry;
use crate::errors::LensError;

const CONFIG_USAGE: &str = "config [path] [--config <path>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Print the effective analysis configuration or its file path",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, CONFIG_USAGE)?;
    match parsed.positional.as_slice() {
        [] => {
            let config = context.load_config(parsed.config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ["path"] => {
            let manager = context.config_manager(parsed.config.as_deref());
            println!("{}", manager.config_path().display());
        }
        _ => return Err(LensError::Usage(CONFIG_USAGE)),
    }
    Ok(LoopControl::Continue)
}
