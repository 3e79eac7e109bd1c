use std::path::PathBuf;

pub mod analysis;
pub mod config;
pub mod system;

use crate::cli::registry::CommandEntry;
use crate::errors::LensError;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(analysis::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

/// Arguments shared by the commands: positionals plus `--json` and `--config <path>`.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CommandArgs<'a> {
    pub positional: Vec<&'a str>,
    pub json: bool,
    pub config: Option<PathBuf>,
}

pub(crate) fn parse_args<'a>(
    args: &[&'a str],
    usage: &'static str,
) -> Result<CommandArgs<'a>, LensError> {
    let mut parsed = CommandArgs::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        match arg {
            "--json" => parsed.json = true,
            "--config" => {
                let path = iter.next().ok_or(LensError::Usage(usage))?;
                parsed.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => return Err(LensError::Usage(usage)),
            value => parsed.positional.push(value),
        }
    }
    Ok(parsed)
}
