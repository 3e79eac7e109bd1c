//! Per-category variance and alignment.

use lens_config::AnalysisConfig;
use lens_domain::{percentage_of, AlignmentStatus, CategoryRecord, ProcessedCategory};
use tracing::debug;

use crate::goal_calculator::GoalCalculator;

/// Stateless conversion of raw categories into [`ProcessedCategory`] values.
pub struct CategoryProcessor;

impl CategoryProcessor {
    /// Computes the goal target, variance, alignment and percentage for one category.
    pub fn process_category(
        category: &CategoryRecord,
        group_name: &str,
        config: &AnalysisConfig,
        analysis_month: Option<&str>,
    ) -> ProcessedCategory {
        let calculation = GoalCalculator::explain(category, analysis_month);
        let needed = calculation.amount;
        let assigned = category.budgeted;
        let variance = needed.map_or(0, |needed| assigned.saturating_sub(needed));
        let alignment_status =
            AlignmentStatus::classify(assigned, needed, config.tolerance_milliunits);
        let percentage_of_target = needed.and_then(|needed| percentage_of(assigned, needed));

        ProcessedCategory {
            category_id: category.id,
            name: category.name.clone(),
            group_name: group_name.to_string(),
            goal_type: category.goal_type,
            needed_this_month: needed,
            assigned,
            activity: category.activity,
            available: category.balance,
            variance,
            has_target: needed.is_some(),
            alignment_status,
            percentage_of_target,
            calculation,
        }
    }

    /// Applies the deleted / hidden / minimum-assignment filters.
    pub fn should_include_category(category: &CategoryRecord, config: &AnalysisConfig) -> bool {
        if category.deleted && !config.include_deleted_categories {
            debug!(category = %category.name, "skipping deleted category");
            return false;
        }
        if category.hidden && !config.include_hidden_categories {
            debug!(category = %category.name, "skipping hidden category");
            return false;
        }
        if category.budgeted.unsigned_abs() < config.minimum_assigned_milliunits.unsigned_abs() {
            debug!(
                category = %category.name,
                budgeted = category.budgeted,
                "skipping category below minimum assignment"
            );
            return false;
        }
        true
    }
}
