use std::path::Path;

use crate::cli::commands::{parse_args, CommandArgs};
use crate::cli::context::{CliContext, CommandResult, LoopControl};
use crate::cli::formatters::ReportRenderer;
use crate::cli::registry::CommandEntry;
use crate::currency::MoneyFormatter;
use crate::errors::LensError;
use crate::report::{report_to_json, BudgetSnapshot};

const ANALYZE_USAGE: &str = "analyze <snapshot.json> [--json] [--config <path>]";
const EXPLAIN_USAGE: &str = "explain <snapshot.json> <category name> [--json] [--config <path>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "analyze",
            "Analyze goal alignment for a budget month snapshot",
            ANALYZE_USAGE,
            cmd_analyze,
        ),
        CommandEntry::new(
            "explain",
            "Show which rule produced a category's target and the inputs it used",
            EXPLAIN_USAGE,
            cmd_explain,
        ),
    ]
}

fn cmd_analyze(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let CommandArgs {
        positional,
        json,
        config,
    } = parse_args(args, ANALYZE_USAGE)?;
    let [path] = positional.as_slice() else {
        return Err(LensError::Usage(ANALYZE_USAGE));
    };

    let config = context.load_config(config.as_deref())?;
    let snapshot = BudgetSnapshot::load(Path::new(path))?;
    let report = snapshot.analyze(&config)?;

    if json {
        println!("{}", report_to_json(&report)?);
    } else {
        let renderer = ReportRenderer::new(MoneyFormatter::from_config(&config));
        print!("{}", renderer.render_report(&report));
    }
    Ok(LoopControl::Continue)
}

fn cmd_explain(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let CommandArgs {
        positional,
        json,
        config,
    } = parse_args(args, EXPLAIN_USAGE)?;
    let Some((path, name_parts)) = positional.split_first() else {
        return Err(LensError::Usage(EXPLAIN_USAGE));
    };
    if name_parts.is_empty() {
        return Err(LensError::Usage(EXPLAIN_USAGE));
    }
    let name = name_parts.join(" ");

    let config = context.load_config(config.as_deref())?;
    let snapshot = BudgetSnapshot::load(Path::new(path))?;
    let calculation = snapshot.explain(&name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&calculation)?);
    } else {
        let renderer = ReportRenderer::new(MoneyFormatter::from_config(&config));
        print!("{}", renderer.render_calculation(&name, &calculation));
    }
    Ok(LoopControl::Continue)
}
