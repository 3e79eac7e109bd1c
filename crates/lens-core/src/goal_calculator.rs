//! Turns a category's goal configuration into the amount it needs this month.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. no goal: zero
//! 2. goal without a target amount: not computable
//! 3. goal created after the analysis month: zero
//! 4. months left to budget: remaining amount spread evenly
//! 5. monthly cadence: the target itself
//! 6. weekly cadence: target times the weekday's occurrences in the month
//! 7. months to budget exhausted: zero
//! 8. anything else: the target itself
//!
//! Goals whose target month lies in the future and that carry no months-to-budget
//! end in rule 8 and need the full target, even though the provider's own UI spreads
//! the unfunded remainder over the remaining months.

use lens_domain::{
    div_round_half_away, BudgetMonth, CalculationRule, CalculationTrace, CategoryRecord,
    GoalType, Milliunits, TargetCalculation, CADENCE_MONTHLY, CADENCE_WEEKLY,
};
use tracing::debug;

/// Stateless goal target engine.
pub struct GoalCalculator;

impl GoalCalculator {
    /// Amount needed this month, `None` when the goal lacks the data to compute it.
    ///
    /// `analysis_month` is an ISO date (`YYYY-MM-DD`); it only matters for weekly goals
    /// and for goals created after that month. An unusable value never fails the call.
    pub fn calculate_needed_this_month(
        category: &CategoryRecord,
        analysis_month: Option<&str>,
    ) -> Option<Milliunits> {
        Self::explain(category, analysis_month).amount
    }

    /// Same evaluation as [`GoalCalculator::calculate_needed_this_month`], also
    /// reporting the rule that fired and the inputs it consulted.
    pub fn explain(category: &CategoryRecord, analysis_month: Option<&str>) -> TargetCalculation {
        let mut trace = trace_inputs(category);
        let month = resolve_month(analysis_month, &mut trace);
        let (rule, amount) = evaluate(category, month, &mut trace);
        debug!(
            category = %category.name,
            rule = %rule,
            amount = ?amount,
            "goal target evaluated"
        );
        TargetCalculation {
            amount,
            rule,
            trace,
        }
    }
}

fn evaluate(
    category: &CategoryRecord,
    month: Option<BudgetMonth>,
    trace: &mut CalculationTrace,
) -> (CalculationRule, Option<Milliunits>) {
    let goal_target = match category.goal_type {
        GoalType::NoGoal => return (CalculationRule::NoGoal, Some(0)),
        GoalType::TargetBalance
        | GoalType::TargetBalanceByDate
        | GoalType::MonthlyFunding
        | GoalType::NeedGoal
        | GoalType::DebtPayoff => match category.goal_target {
            Some(target) => target,
            None => return (CalculationRule::MissingTarget, None),
        },
    };

    if let (Some(created), Some(month)) = (category.goal_creation_month, month) {
        if created > month {
            return (CalculationRule::FutureGoal, Some(0));
        }
    }

    if let Some(months) = category.goal_months_to_budget.filter(|months| *months > 0) {
        let remaining = category
            .goal_overall_left
            .unwrap_or(0)
            .saturating_add(category.budgeted);
        return (
            CalculationRule::MonthsToBudget,
            div_round_half_away(remaining, i64::from(months)),
        );
    }

    match (category.goal_cadence, category.goal_cadence_frequency) {
        (Some(CADENCE_MONTHLY), Some(1)) => {
            return (CalculationRule::MonthlyCadence, Some(goal_target));
        }
        (Some(CADENCE_WEEKLY), Some(1)) => {
            if let Some(day) = weekday_from_sunday(category.goal_day) {
                return match month {
                    Some(month) => {
                        let occurrences = month.weekday_occurrences(day);
                        trace.weekday_occurrences = Some(occurrences);
                        (
                            CalculationRule::WeeklyCadence,
                            Some(goal_target.saturating_mul(i64::from(occurrences))),
                        )
                    }
                    None => (CalculationRule::WeeklyCadenceWithoutMonth, Some(goal_target)),
                };
            }
        }
        _ => {}
    }

    if category.goal_months_to_budget.is_some() {
        return (CalculationRule::PeriodComplete, Some(0));
    }

    (CalculationRule::Fallback, Some(goal_target))
}

/// Day-of-week index, 0 = Sunday through 6 = Saturday. Anything else counts as absent.
fn weekday_from_sunday(goal_day: Option<i32>) -> Option<u32> {
    goal_day
        .filter(|day| (0..=6).contains(day))
        .and_then(|day| u32::try_from(day).ok())
}

fn resolve_month(input: Option<&str>, trace: &mut CalculationTrace) -> Option<BudgetMonth> {
    let raw = input?;
    match BudgetMonth::parse_iso(raw) {
        Ok(month) => {
            trace.analysis_month = Some(month);
            Some(month)
        }
        Err(err) => {
            debug!(input = raw, error = %err, "analysis month unusable, month rules fall back");
            trace.unparsed_analysis_month = Some(raw.to_string());
            None
        }
    }
}

fn trace_inputs(category: &CategoryRecord) -> CalculationTrace {
    CalculationTrace {
        goal_type: category.goal_type,
        goal_target: category.goal_target,
        budgeted: category.budgeted,
        goal_months_to_budget: category.goal_months_to_budget,
        goal_overall_left: category.goal_overall_left,
        goal_cadence: category.goal_cadence,
        goal_cadence_frequency: category.goal_cadence_frequency,
        goal_day: category.goal_day,
        goal_creation_month: category.goal_creation_month,
        ..CalculationTrace::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(goal_type: GoalType, target: Option<Milliunits>) -> CategoryRecord {
        CategoryRecord::new("Test", 0).with_goal(goal_type, target)
    }

    fn weekly(target: Milliunits, day: i32) -> CategoryRecord {
        let mut category = goal(GoalType::NeedGoal, Some(target)).with_cadence(CADENCE_WEEKLY, 1);
        category.goal_day = Some(day);
        category
    }

    #[test]
    fn no_goal_is_zero_regardless_of_other_fields() {
        let mut category = goal(GoalType::NoGoal, Some(50_000));
        category.goal_months_to_budget = Some(3);
        category.goal_overall_left = Some(90_000);
        category.budgeted = 10_000;

        let result = GoalCalculator::explain(&category, Some("2024-12-01"));

        assert_eq!(result.amount, Some(0));
        assert_eq!(result.rule, CalculationRule::NoGoal);
    }

    #[test]
    fn missing_target_is_not_computable() {
        let category = goal(GoalType::NeedGoal, None);

        let result = GoalCalculator::explain(&category, Some("2024-12-01"));

        assert_eq!(result.amount, None);
        assert_eq!(result.rule, CalculationRule::MissingTarget);
    }

    #[test]
    fn months_to_budget_spreads_remaining_amount() {
        let mut category = goal(GoalType::TargetBalanceByDate, Some(200_000));
        category.goal_overall_left = Some(80_000);
        category.budgeted = 20_000;
        category.goal_months_to_budget = Some(4);

        assert_eq!(
            GoalCalculator::calculate_needed_this_month(&category, None),
            Some(25_000)
        );
    }

    #[test]
    fn months_to_budget_rounds_half_away_from_zero() {
        let mut category = goal(GoalType::TargetBalanceByDate, Some(10_000));
        category.goal_overall_left = Some(1);
        category.budgeted = 0;
        category.goal_months_to_budget = Some(2);

        assert_eq!(GoalCalculator::calculate_needed_this_month(&category, None), Some(1));

        category.goal_overall_left = Some(-3);
        assert_eq!(GoalCalculator::calculate_needed_this_month(&category, None), Some(-2));
    }

    #[test]
    fn months_to_budget_takes_precedence_over_monthly_cadence() {
        let mut category =
            goal(GoalType::MonthlyFunding, Some(100_000)).with_cadence(CADENCE_MONTHLY, 1);
        category.goal_overall_left = Some(60_000);
        category.goal_months_to_budget = Some(3);

        let result = GoalCalculator::explain(&category, Some("2024-12-01"));

        assert_eq!(result.rule, CalculationRule::MonthsToBudget);
        assert_eq!(result.amount, Some(20_000));
    }

    #[test]
    fn monthly_cadence_returns_target() {
        let category = goal(GoalType::NeedGoal, Some(45_000)).with_cadence(CADENCE_MONTHLY, 1);

        let result = GoalCalculator::explain(&category, None);

        assert_eq!(result.rule, CalculationRule::MonthlyCadence);
        assert_eq!(result.amount, Some(45_000));
    }

    #[test]
    fn weekly_cadence_counts_mondays_in_december_2024() {
        let category = weekly(100_000, 1);

        let result = GoalCalculator::explain(&category, Some("2024-12-01"));

        assert_eq!(result.rule, CalculationRule::WeeklyCadence);
        assert_eq!(result.amount, Some(500_000));
        assert_eq!(result.trace.weekday_occurrences, Some(5));
    }

    #[test]
    fn weekly_cadence_with_four_occurrences() {
        // November 2024 has four Mondays: 4, 11, 18, 25.
        let category = weekly(100_000, 1);

        assert_eq!(
            GoalCalculator::calculate_needed_this_month(&category, Some("2024-11-01")),
            Some(400_000)
        );
    }

    #[test]
    fn weekly_cadence_without_month_falls_back_to_target() {
        let category = weekly(100_000, 1);

        let missing = GoalCalculator::explain(&category, None);
        let malformed = GoalCalculator::explain(&category, Some("not-a-month"));

        assert_eq!(missing.amount, Some(100_000));
        assert_eq!(missing.rule, CalculationRule::WeeklyCadenceWithoutMonth);
        assert_eq!(malformed.amount, Some(100_000));
        assert_eq!(malformed.rule, CalculationRule::WeeklyCadenceWithoutMonth);
        assert_eq!(
            malformed.trace.unparsed_analysis_month.as_deref(),
            Some("not-a-month")
        );
    }

    #[test]
    fn weekly_cadence_without_day_uses_fallback() {
        let mut category = weekly(100_000, 1);
        category.goal_day = None;

        let result = GoalCalculator::explain(&category, Some("2024-12-01"));

        assert_eq!(result.rule, CalculationRule::Fallback);
        assert_eq!(result.amount, Some(100_000));
    }

    #[test]
    fn out_of_range_goal_day_counts_as_absent() {
        let category = weekly(100_000, 9);

        let result = GoalCalculator::explain(&category, Some("2024-12-01"));

        assert_eq!(result.rule, CalculationRule::Fallback);
    }

    #[test]
    fn weekly_cadence_with_other_frequency_uses_fallback() {
        let mut category = weekly(100_000, 1);
        category.goal_cadence_frequency = Some(2);

        let result = GoalCalculator::explain(&category, Some("2024-12-01"));

        assert_eq!(result.rule, CalculationRule::Fallback);
        assert_eq!(result.amount, Some(100_000));
    }

    #[test]
    fn exhausted_months_to_budget_owes_nothing() {
        for months in [0, -2] {
            let mut category = goal(GoalType::TargetBalanceByDate, Some(300_000));
            category.goal_months_to_budget = Some(months);
            category.goal_overall_left = Some(12_000);

            let result = GoalCalculator::explain(&category, Some("2024-12-01"));

            assert_eq!(result.rule, CalculationRule::PeriodComplete);
            assert_eq!(result.amount, Some(0));
        }
    }

    #[test]
    fn monthly_cadence_precedes_exhausted_months_to_budget() {
        let mut category = goal(GoalType::NeedGoal, Some(30_000)).with_cadence(CADENCE_MONTHLY, 1);
        category.goal_months_to_budget = Some(0);

        let result = GoalCalculator::explain(&category, None);

        assert_eq!(result.rule, CalculationRule::MonthlyCadence);
        assert_eq!(result.amount, Some(30_000));
    }

    #[test]
    fn target_balance_without_schedule_uses_fallback() {
        for goal_type in [GoalType::TargetBalance, GoalType::DebtPayoff, GoalType::MonthlyFunding] {
            let result = GoalCalculator::explain(&goal(goal_type, Some(75_000)), None);

            assert_eq!(result.rule, CalculationRule::Fallback);
            assert_eq!(result.amount, Some(75_000));
        }
    }

    #[test]
    fn future_target_month_without_months_to_budget_needs_full_target() {
        // The provider's UI shows (target - funded) / months remaining for this goal;
        // the engine keeps the full target until that behaviour is agreed on.
        let mut category = goal(GoalType::TargetBalanceByDate, Some(1_200_000));
        category.goal_target_month = Some(BudgetMonth::new(2025, 12).unwrap());
        category.goal_overall_left = Some(900_000);
        category.balance = 300_000;

        let result = GoalCalculator::explain(&category, Some("2025-01-01"));

        assert_eq!(result.rule, CalculationRule::Fallback);
        assert_eq!(result.amount, Some(1_200_000));
    }

    #[test]
    fn goal_created_after_analysis_month_needs_nothing() {
        let mut category = goal(GoalType::NeedGoal, Some(40_000)).with_cadence(CADENCE_MONTHLY, 1);
        category.goal_creation_month = Some(BudgetMonth::new(2025, 2).unwrap());

        let before = GoalCalculator::explain(&category, Some("2025-01-01"));
        let same = GoalCalculator::explain(&category, Some("2025-02-01"));

        assert_eq!(before.rule, CalculationRule::FutureGoal);
        assert_eq!(before.amount, Some(0));
        assert_eq!(same.rule, CalculationRule::MonthlyCadence);
        assert_eq!(same.amount, Some(40_000));
    }

    #[test]
    fn future_goal_check_is_skipped_without_month() {
        let mut category = goal(GoalType::NeedGoal, Some(40_000)).with_cadence(CADENCE_MONTHLY, 1);
        category.goal_creation_month = Some(BudgetMonth::new(2099, 1).unwrap());

        assert_eq!(GoalCalculator::calculate_needed_this_month(&category, None), Some(40_000));
    }

    #[test]
    fn trace_records_inputs() {
        let mut category = weekly(25_000, 3);
        category.budgeted = 5_000;

        let result = GoalCalculator::explain(&category, Some("2024-12-15"));

        assert_eq!(result.trace.goal_type, GoalType::NeedGoal);
        assert_eq!(result.trace.goal_target, Some(25_000));
        assert_eq!(result.trace.budgeted, 5_000);
        assert_eq!(result.trace.goal_day, Some(3));
        assert_eq!(result.trace.analysis_month, Some(BudgetMonth::new(2024, 12).unwrap()));
        assert_eq!(result.trace.unparsed_analysis_month, None);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let weekly_goal = weekly(i64::MAX, 1);
        assert_eq!(
            GoalCalculator::calculate_needed_this_month(&weekly_goal, Some("2024-12-01")),
            Some(i64::MAX)
        );

        let mut spread = goal(GoalType::TargetBalanceByDate, Some(1));
        spread.goal_overall_left = Some(i64::MAX);
        spread.budgeted = i64::MAX;
        spread.goal_months_to_budget = Some(1);
        assert_eq!(GoalCalculator::calculate_needed_this_month(&spread, None), Some(i64::MAX));
    }
}
