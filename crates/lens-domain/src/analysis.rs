//! Processed categories and month-level analysis results.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    calculation::TargetCalculation, category::GoalType, money::Milliunits, month::BudgetMonth,
};

/// Describes how a category's assignment compares with what its goal needs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AlignmentStatus {
    OnTarget,
    OverTarget,
    UnderTarget,
    NoTarget,
}

impl AlignmentStatus {
    /// Classifies `assigned` against `needed` within `tolerance` milliunits.
    ///
    /// A missing or zero target is always [`AlignmentStatus::NoTarget`]. The bounds are
    /// inclusive: a variance of exactly `tolerance` is still on target.
    pub fn classify(assigned: Milliunits, needed: Option<Milliunits>, tolerance: Milliunits) -> Self {
        let needed = match needed {
            Some(needed) if needed != 0 => needed,
            _ => return AlignmentStatus::NoTarget,
        };
        let variance = assigned.saturating_sub(needed);
        if variance > tolerance {
            AlignmentStatus::OverTarget
        } else if variance < tolerance.saturating_neg() {
            AlignmentStatus::UnderTarget
        } else {
            AlignmentStatus::OnTarget
        }
    }
}

impl fmt::Display for AlignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlignmentStatus::OnTarget => "On Target",
            AlignmentStatus::OverTarget => "Over Target",
            AlignmentStatus::UnderTarget => "Under Target",
            AlignmentStatus::NoTarget => "No Target",
        };
        f.write_str(label)
    }
}

/// A category after its goal target and variance have been computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessedCategory {
    pub category_id: Uuid,
    pub name: String,
    pub group_name: String,
    pub goal_type: GoalType,
    pub needed_this_month: Option<Milliunits>,
    pub assigned: Milliunits,
    pub activity: Milliunits,
    pub available: Milliunits,
    pub variance: Milliunits,
    pub has_target: bool,
    pub alignment_status: AlignmentStatus,
    pub percentage_of_target: Option<f64>,
    pub calculation: TargetCalculation,
}

/// Qualitative rating derived from the share of money assigned on target.
///
/// Variants are ordered from worst to best.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisciplineRating {
    NeedsImprovement,
    Fair,
    Good,
    Excellent,
}

impl DisciplineRating {
    pub const EXCELLENT_THRESHOLD: f64 = 80.0;
    pub const GOOD_THRESHOLD: f64 = 60.0;
    pub const FAIR_THRESHOLD: f64 = 40.0;

    /// Maps an on-target percentage to a rating. Non-finite input rates as the lowest tier.
    pub fn from_on_target_percentage(percentage: f64) -> Self {
        if percentage >= Self::EXCELLENT_THRESHOLD {
            DisciplineRating::Excellent
        } else if percentage >= Self::GOOD_THRESHOLD {
            DisciplineRating::Good
        } else if percentage >= Self::FAIR_THRESHOLD {
            DisciplineRating::Fair
        } else {
            DisciplineRating::NeedsImprovement
        }
    }
}

impl fmt::Display for DisciplineRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DisciplineRating::Excellent => "Excellent",
            DisciplineRating::Good => "Good",
            DisciplineRating::Fair => "Fair",
            DisciplineRating::NeedsImprovement => "Needs Improvement",
        };
        f.write_str(label)
    }
}

/// Entry of a top-variance list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VarianceEntry {
    pub category_id: Uuid,
    pub name: String,
    pub group_name: String,
    pub assigned: Milliunits,
    pub needed_this_month: Option<Milliunits>,
    pub variance: Milliunits,
    pub percentage_of_target: Option<f64>,
}

impl From<&ProcessedCategory> for VarianceEntry {
    fn from(category: &ProcessedCategory) -> Self {
        Self {
            category_id: category.category_id,
            name: category.name.clone(),
            group_name: category.group_name.clone(),
            assigned: category.assigned,
            needed_this_month: category.needed_this_month,
            variance: category.variance,
            percentage_of_target: category.percentage_of_target,
        }
    }
}

/// Totals for one category group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupSummary {
    pub group_name: String,
    pub category_count: usize,
    pub total_assigned: Milliunits,
    pub total_targeted: Milliunits,
    pub total_variance: Milliunits,
    pub on_target_count: usize,
    pub over_target_count: usize,
    pub under_target_count: usize,
    pub no_target_count: usize,
}

/// Summary of every processed category for one budget month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyAnalysis {
    pub budget_id: String,
    pub budget_name: String,
    pub month: BudgetMonth,
    pub total_income: Milliunits,
    pub total_activity: Milliunits,
    pub to_be_budgeted: Milliunits,
    pub total_assigned: Milliunits,
    pub total_targeted: Milliunits,
    pub on_target_amount: Milliunits,
    pub over_target_amount: Milliunits,
    pub under_target_amount: Milliunits,
    pub no_target_amount: Milliunits,
    pub on_target_percentage: f64,
    pub over_target_percentage: f64,
    pub under_target_percentage: f64,
    pub no_target_percentage: f64,
    pub on_target_count: usize,
    pub over_target_count: usize,
    pub under_target_count: usize,
    pub no_target_count: usize,
    pub total_categories: usize,
    pub budget_discipline_rating: DisciplineRating,
    pub top_over_target: Vec<VarianceEntry>,
    pub top_under_target: Vec<VarianceEntry>,
    pub group_summaries: Vec<GroupSummary>,
}

/// Monthly analysis plus every processed category it was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub analysis: MonthlyAnalysis,
    pub categories: Vec<ProcessedCategory>,
}

impl AnalysisReport {
    pub fn category(&self, name: &str) -> Option<&ProcessedCategory> {
        self.categories
            .iter()
            .find(|category| category.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_bounds_are_inclusive() {
        assert_eq!(AlignmentStatus::classify(1000, Some(1000), 1000), AlignmentStatus::OnTarget);
        assert_eq!(AlignmentStatus::classify(2000, Some(1000), 1000), AlignmentStatus::OnTarget);
        assert_eq!(AlignmentStatus::classify(2001, Some(1000), 1000), AlignmentStatus::OverTarget);
        assert_eq!(AlignmentStatus::classify(0, Some(1000), 1000), AlignmentStatus::OnTarget);
        assert_eq!(AlignmentStatus::classify(-1, Some(1000), 1000), AlignmentStatus::UnderTarget);
    }

    #[test]
    fn missing_or_zero_target_has_no_status() {
        assert_eq!(AlignmentStatus::classify(5000, None, 1000), AlignmentStatus::NoTarget);
        assert_eq!(AlignmentStatus::classify(5000, Some(0), 1000), AlignmentStatus::NoTarget);
    }

    #[test]
    fn extreme_amounts_do_not_overflow() {
        assert_eq!(
            AlignmentStatus::classify(i64::MIN, Some(i64::MAX), 0),
            AlignmentStatus::UnderTarget
        );
        assert_eq!(
            AlignmentStatus::classify(i64::MAX, Some(i64::MIN), i64::MIN),
            AlignmentStatus::OverTarget
        );
    }

    #[test]
    fn rating_steps_are_monotonic() {
        let samples = [-50.0, 0.0, 39.99, 40.0, 59.9, 60.0, 79.99, 80.0, 100.0, 250.0];
        let ratings: Vec<_> = samples
            .iter()
            .map(|pct| DisciplineRating::from_on_target_percentage(*pct))
            .collect();
        assert!(ratings.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(ratings[3], DisciplineRating::Fair);
        assert_eq!(ratings[7], DisciplineRating::Excellent);
        assert_eq!(
            DisciplineRating::from_on_target_percentage(f64::NAN),
            DisciplineRating::NeedsImprovement
        );
    }
}
