use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use shell_words::split;
use tracing::debug;

use crate::cli::context::{CliContext, LoopControl};
use crate::cli::output;
use crate::errors::LensError;

/// Runs one command from `args`, or reads commands from stdin when `args` is empty.
///
/// A leading `--config <path>` applies to every command of the run.
pub fn run_cli(args: &[String]) -> Result<(), LensError> {
    let (config_path, rest) = match args {
        [flag, path, rest @ ..] if flag == "--config" => (Some(PathBuf::from(path)), rest),
        [flag] if flag == "--config" => {
            return Err(LensError::Usage("--config <path> <command> [args...]"))
        }
        _ => (None, args),
    };
    let mut context = CliContext::from_env(config_path);

    match rest.split_first() {
        Some((command, command_args)) => {
            let command_args: Vec<&str> = command_args.iter().map(String::as_str).collect();
            context.dispatch(&command.to_lowercase(), &command_args)?;
            Ok(())
        }
        None => {
            let stdin = io::stdin();
            let failures = run_script(&mut context, stdin.lock())?;
            debug!(failures, "script finished");
            Ok(())
        }
    }
}

/// Executes each line of `reader` as a command; returns how many commands failed.
///
/// Failures are reported and the script keeps going until `exit` or end of input.
pub fn run_script<R: BufRead>(context: &mut CliContext, reader: R) -> Result<usize, LensError> {
    let mut failures = 0;
    for line in reader.lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => {
                failures += 1;
                output::error(&err);
            }
        }
    }
    Ok(failures)
}

fn handle_line(context: &mut CliContext, line: &str) -> Result<LoopControl, LensError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(message) => {
            output::warning(message);
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), &args)
}

/// Splits a command line with shell quoting rules.
pub fn parse_command_line(input: &str) -> Result<Vec<String>, String> {
    split(input).map_err(|err| format!("Could not parse `{}`: {err}", input.trim()))
}
