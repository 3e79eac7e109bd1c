use crate::cli::context::{CliContext, CommandResult, LoopControl};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Stop reading commands", "exit", cmd_exit),
    ]
}

fn cmd_version(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    println!("{}", build_info::current());
    Ok(LoopControl::Continue)
}

fn cmd_help(context: &mut CliContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(entry) => {
                output::section(format!("Help: {}", entry.name));
                println!("  Description: {}", entry.description);
                println!("  Usage: {}", entry.usage);
            }
            None => output::warning(format!("No help for unknown command `{name}`.")),
        }
        return Ok(LoopControl::Continue);
    }

    output::section("Available commands");
    for entry in context.registry.list() {
        println!("  {:<10} {}", entry.name, entry.description);
    }
    println!("Use `help <command>` for details.");
    Ok(LoopControl::Continue)
}

fn cmd_exit(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    Ok(LoopControl::Exit)
}
