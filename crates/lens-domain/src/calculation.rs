//! Outcome of a goal target calculation, including the rule that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{category::GoalType, money::Milliunits, month::BudgetMonth};

/// Rules of the goal target engine, listed in evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CalculationRule {
    NoGoal,
    MissingTarget,
    FutureGoal,
    MonthsToBudget,
    MonthlyCadence,
    WeeklyCadence,
    WeeklyCadenceWithoutMonth,
    PeriodComplete,
    Fallback,
}

impl CalculationRule {
    /// One-line explanation shown in debug views.
    pub fn description(self) -> &'static str {
        match self {
            CalculationRule::NoGoal => "no goal configured, target is zero",
            CalculationRule::MissingTarget => "goal has no target amount, cannot compute",
            CalculationRule::FutureGoal => "goal created after the analysis month",
            CalculationRule::MonthsToBudget => {
                "remaining goal amount spread over the months left to budget"
            }
            CalculationRule::MonthlyCadence => "monthly goal, target applies as-is",
            CalculationRule::WeeklyCadence => "weekly goal multiplied by weekday occurrences",
            CalculationRule::WeeklyCadenceWithoutMonth => {
                "weekly goal without a usable analysis month, target applies as-is"
            }
            CalculationRule::PeriodComplete => "goal period complete or overdue, nothing owed",
            CalculationRule::Fallback => "goal target applies as-is",
        }
    }
}

impl fmt::Display for CalculationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CalculationRule::NoGoal => "No Goal",
            CalculationRule::MissingTarget => "Missing Target",
            CalculationRule::FutureGoal => "Future Goal",
            CalculationRule::MonthsToBudget => "Months To Budget",
            CalculationRule::MonthlyCadence => "Monthly Cadence",
            CalculationRule::WeeklyCadence => "Weekly Cadence",
            CalculationRule::WeeklyCadenceWithoutMonth => "Weekly Cadence (no month)",
            CalculationRule::PeriodComplete => "Period Complete",
            CalculationRule::Fallback => "Fallback",
        };
        f.write_str(label)
    }
}

/// Inputs the engine consulted while evaluating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalculationTrace {
    pub goal_type: GoalType,
    pub goal_target: Option<Milliunits>,
    pub budgeted: Milliunits,
    pub goal_months_to_budget: Option<i32>,
    pub goal_overall_left: Option<Milliunits>,
    pub goal_cadence: Option<i32>,
    pub goal_cadence_frequency: Option<i32>,
    pub goal_day: Option<i32>,
    pub goal_creation_month: Option<BudgetMonth>,
    pub analysis_month: Option<BudgetMonth>,
    /// Set when an analysis month was supplied but could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unparsed_analysis_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_occurrences: Option<u32>,
}

/// Amount needed this month together with the rule that fired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetCalculation {
    pub amount: Option<Milliunits>,
    pub rule: CalculationRule,
    pub trace: CalculationTrace,
}

impl TargetCalculation {
    pub fn has_target(&self) -> bool {
        self.amount.is_some()
    }
}
