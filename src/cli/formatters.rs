use std::fmt::Write;

use colored::{ColoredString, Colorize};
use lens_domain::{
    AlignmentStatus, AnalysisReport, DisciplineRating, MonthlyAnalysis, TargetCalculation,
    VarianceEntry,
};

use crate::currency::MoneyFormatter;

const NAME_WIDTH: usize = 24;
const GROUP_WIDTH: usize = 18;
const AMOUNT_WIDTH: usize = 14;
const STATUS_WIDTH: usize = 12;

/// Renders analysis reports and target explanations as terminal text.
pub struct ReportRenderer {
    money: MoneyFormatter,
}

impl ReportRenderer {
    pub fn new(money: MoneyFormatter) -> Self {
        Self { money }
    }

    pub fn render_report(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        self.write_summary(&mut out, &report.analysis);
        self.write_categories(&mut out, report);
        self.write_top("Most over target", &mut out, &report.analysis.top_over_target);
        self.write_top("Most under target", &mut out, &report.analysis.top_under_target);
        self.write_groups(&mut out, &report.analysis);
        out
    }

    fn write_summary(&self, out: &mut String, analysis: &MonthlyAnalysis) {
        let title = format!(
            "=== {} | {} ===",
            display_name(&analysis.budget_name, &analysis.budget_id),
            analysis.month
        );
        let _ = writeln!(out, "{}", title.bold());
        let _ = writeln!(out, "  Income          {}", self.money.format(analysis.total_income));
        let _ = writeln!(out, "  Activity        {}", self.money.format(analysis.total_activity));
        let _ = writeln!(out, "  To be budgeted  {}", self.money.format(analysis.to_be_budgeted));
        let _ = writeln!(out, "  Assigned        {}", self.money.format(analysis.total_assigned));
        let _ = writeln!(out, "  Targeted        {}", self.money.format(analysis.total_targeted));
        let _ = writeln!(out);
        let buckets = [
            (AlignmentStatus::OnTarget, analysis.on_target_count, analysis.on_target_amount, analysis.on_target_percentage),
            (AlignmentStatus::OverTarget, analysis.over_target_count, analysis.over_target_amount, analysis.over_target_percentage),
            (AlignmentStatus::UnderTarget, analysis.under_target_count, analysis.under_target_amount, analysis.under_target_percentage),
            (AlignmentStatus::NoTarget, analysis.no_target_count, analysis.no_target_amount, analysis.no_target_percentage),
        ];
        for (status, count, amount, percentage) in buckets {
            let _ = writeln!(
                out,
                "  {} {:>4} categories {:>width$} {:>6.1}%",
                status_label(status),
                count,
                self.money.format(amount),
                percentage,
                width = AMOUNT_WIDTH
            );
        }
        let _ = writeln!(
            out,
            "  Discipline: {} ({} categories)",
            rating_label(analysis.budget_discipline_rating),
            analysis.total_categories
        );
    }

    fn write_categories(&self, out: &mut String, report: &AnalysisReport) {
        let _ = writeln!(out);
        let header = format!(
            "  {:<NAME_WIDTH$} {:<GROUP_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$} {}",
            "Category", "Group", "Assigned", "Needed", "Variance", "Status"
        );
        let _ = writeln!(out, "{}", header.bold());
        for category in &report.categories {
            let _ = writeln!(
                out,
                "  {:<NAME_WIDTH$} {:<GROUP_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$} {}",
                truncate(&category.name, NAME_WIDTH),
                truncate(&category.group_name, GROUP_WIDTH),
                self.money.format(category.assigned),
                self.money.format_optional(category.needed_this_month),
                self.money.format(category.variance),
                status_label(category.alignment_status)
            );
        }
    }

    fn write_top(&self, title: &str, out: &mut String, entries: &[VarianceEntry]) {
        if entries.is_empty() {
            return;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", title.bold());
        for (rank, entry) in entries.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {:<NAME_WIDTH$} {:>AMOUNT_WIDTH$}  (assigned {}, needed {})",
                rank + 1,
                truncate(&entry.name, NAME_WIDTH),
                self.money.format(entry.variance),
                self.money.format(entry.assigned),
                self.money.format_optional(entry.needed_this_month)
            );
        }
    }

    fn write_groups(&self, out: &mut String, analysis: &MonthlyAnalysis) {
        if analysis.group_summaries.is_empty() {
            return;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "By group".bold());
        for group in &analysis.group_summaries {
            let _ = writeln!(
                out,
                "  {:<GROUP_WIDTH$} {:>3} cat. assigned {:>AMOUNT_WIDTH$} targeted {:>AMOUNT_WIDTH$} variance {:>AMOUNT_WIDTH$}",
                truncate(&group.group_name, GROUP_WIDTH),
                group.category_count,
                self.money.format(group.total_assigned),
                self.money.format(group.total_targeted),
                self.money.format(group.total_variance)
            );
        }
    }

    pub fn render_calculation(&self, name: &str, calculation: &TargetCalculation) -> String {
        let trace = &calculation.trace;
        let mut out = String::new();
        let _ = writeln!(out, "{}", format!("=== {name} ===").bold());
        let _ = writeln!(
            out,
            "  Needed this month  {}",
            self.money.format_optional(calculation.amount)
        );
        let _ = writeln!(
            out,
            "  Rule               {} ({})",
            calculation.rule,
            calculation.rule.description()
        );
        let _ = writeln!(out, "  Goal type          {}", trace.goal_type);
        let _ = writeln!(
            out,
            "  Goal target        {}",
            self.money.format_optional(trace.goal_target)
        );
        let _ = writeln!(out, "  Assigned           {}", self.money.format(trace.budgeted));
        write_optional(&mut out, "Months to budget", trace.goal_months_to_budget);
        if let Some(left) = trace.goal_overall_left {
            let _ = writeln!(out, "  Overall left       {}", self.money.format(left));
        }
        write_optional(&mut out, "Cadence", trace.goal_cadence);
        write_optional(&mut out, "Cadence frequency", trace.goal_cadence_frequency);
        write_optional(&mut out, "Goal day", trace.goal_day);
        write_optional(&mut out, "Goal created", trace.goal_creation_month);
        write_optional(&mut out, "Analysis month", trace.analysis_month);
        if let Some(raw) = &trace.unparsed_analysis_month {
            let _ = writeln!(out, "  Unparsed month     {raw:?}");
        }
        write_optional(&mut out, "Weekday count", trace.weekday_occurrences);
        out
    }
}

fn write_optional<T: std::fmt::Display>(out: &mut String, label: &str, value: Option<T>) {
    if let Some(value) = value {
        let _ = writeln!(out, "  {label:<18} {value}");
    }
}

fn status_label(status: AlignmentStatus) -> ColoredString {
    let text = format!("{:<STATUS_WIDTH$}", status.to_string());
    match status {
        AlignmentStatus::OnTarget => text.green(),
        AlignmentStatus::OverTarget => text.yellow(),
        AlignmentStatus::UnderTarget => text.red(),
        AlignmentStatus::NoTarget => text.dimmed(),
    }
}

fn rating_label(rating: DisciplineRating) -> ColoredString {
    let text = rating.to_string();
    match rating {
        DisciplineRating::Excellent => text.bright_green().bold(),
        DisciplineRating::Good => text.green(),
        DisciplineRating::Fair => text.yellow(),
        DisciplineRating::NeedsImprovement => text.red(),
    }
}

fn display_name<'a>(name: &'a str, id: &'a str) -> &'a str {
    if name.trim().is_empty() {
        id
    } else {
        name
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_config::AnalysisConfig;
    use lens_core::{AnalysisService, GoalCalculator};
    use lens_domain::{BudgetMonth, CategoryRecord, GoalType, MonthRecord};

    fn report() -> AnalysisReport {
        let mut month = MonthRecord::new(BudgetMonth::new(2024, 12).expect("month"));
        month.categories = vec![
            CategoryRecord::new("Rent", 1_200_000)
                .with_goal(GoalType::NeedGoal, Some(1_200_000))
                .with_group("Bills"),
            CategoryRecord::new("Fun", 50_000).with_group("Wants"),
        ];
        AnalysisService::analyze(&month, "budget-1", "Home", &AnalysisConfig::default())
            .expect("analysis")
    }

    #[test]
    fn report_lists_categories_and_summary() {
        let renderer = ReportRenderer::new(MoneyFormatter::default());
        let text = renderer.render_report(&report());

        assert!(text.contains("Home | 2024-12-01"));
        assert!(text.contains("Rent"));
        assert!(text.contains("$1,200.00"));
        assert!(text.contains("On Target"));
        assert!(text.contains("No Target"));
        assert!(text.contains("By group"));
        assert!(text.contains("Bills"));
    }

    #[test]
    fn calculation_shows_rule_and_trace() {
        let mut category = CategoryRecord::new("Gym", 0)
            .with_goal(GoalType::NeedGoal, Some(20_000))
            .with_cadence(2, 1);
        category.goal_day = Some(1);
        let calculation = GoalCalculator::explain(&category, Some("2024-12-01"));

        let text = ReportRenderer::new(MoneyFormatter::default())
            .render_calculation("Gym", &calculation);

        assert!(text.contains("Weekly Cadence"));
        assert!(text.contains("$100.00"));
        assert!(text.contains("Weekday count"));
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc~");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
