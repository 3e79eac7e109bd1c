//! Month-level aggregation of processed categories.

use std::collections::BTreeMap;

use lens_domain::{
    percentage_of, AlignmentStatus, DisciplineRating, GroupSummary, Milliunits, MonthRecord,
    MonthlyAnalysis, ProcessedCategory, VarianceEntry,
};
use tracing::info;

/// Length of the top-variance lists when no limit is configured.
pub const DEFAULT_TOP_VARIANCE_LIMIT: usize = 5;

/// Stateless reducer from processed categories to a [`MonthlyAnalysis`].
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    pub fn generate_monthly_analysis(
        month: &MonthRecord,
        budget_id: &str,
        budget_name: &str,
        categories: &[ProcessedCategory],
    ) -> MonthlyAnalysis {
        Self::generate_monthly_analysis_with_limit(
            month,
            budget_id,
            budget_name,
            categories,
            DEFAULT_TOP_VARIANCE_LIMIT,
        )
    }

    /// Builds the analysis, keeping at most `top_limit` entries per variance list.
    pub fn generate_monthly_analysis_with_limit(
        month: &MonthRecord,
        budget_id: &str,
        budget_name: &str,
        categories: &[ProcessedCategory],
        top_limit: usize,
    ) -> MonthlyAnalysis {
        let mut buckets = BucketTotals::default();
        for category in categories {
            buckets.add(category);
        }
        let total_assigned = buckets.total_assigned();
        let total_targeted = categories
            .iter()
            .filter_map(|category| category.needed_this_month)
            .fold(0, Milliunits::saturating_add);

        let on_target_percentage = share(buckets.on_target.amount, total_assigned);
        let budget_discipline_rating =
            DisciplineRating::from_on_target_percentage(on_target_percentage);

        let analysis = MonthlyAnalysis {
            budget_id: budget_id.to_string(),
            budget_name: budget_name.to_string(),
            month: month.month,
            total_income: month.income,
            total_activity: month.activity,
            to_be_budgeted: month.to_be_budgeted,
            total_assigned,
            total_targeted,
            on_target_amount: buckets.on_target.amount,
            over_target_amount: buckets.over_target.amount,
            under_target_amount: buckets.under_target.amount,
            no_target_amount: buckets.no_target.amount,
            on_target_percentage,
            over_target_percentage: share(buckets.over_target.amount, total_assigned),
            under_target_percentage: share(buckets.under_target.amount, total_assigned),
            no_target_percentage: share(buckets.no_target.amount, total_assigned),
            on_target_count: buckets.on_target.count,
            over_target_count: buckets.over_target.count,
            under_target_count: buckets.under_target.count,
            no_target_count: buckets.no_target.count,
            total_categories: categories.len(),
            budget_discipline_rating,
            top_over_target: top_variances(categories, AlignmentStatus::OverTarget, top_limit),
            top_under_target: top_variances(categories, AlignmentStatus::UnderTarget, top_limit),
            group_summaries: group_summaries(categories),
        };

        info!(
            budget = budget_name,
            month = %analysis.month,
            categories = analysis.total_categories,
            rating = %analysis.budget_discipline_rating,
            "monthly analysis generated"
        );
        analysis
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    amount: Milliunits,
    count: usize,
}

#[derive(Debug, Default)]
struct BucketTotals {
    on_target: Bucket,
    over_target: Bucket,
    under_target: Bucket,
    no_target: Bucket,
}

impl BucketTotals {
    fn add(&mut self, category: &ProcessedCategory) {
        let bucket = match category.alignment_status {
            AlignmentStatus::OnTarget => &mut self.on_target,
            AlignmentStatus::OverTarget => &mut self.over_target,
            AlignmentStatus::UnderTarget => &mut self.under_target,
            AlignmentStatus::NoTarget => &mut self.no_target,
        };
        bucket.amount = bucket.amount.saturating_add(category.assigned);
        bucket.count += 1;
    }

    fn total_assigned(&self) -> Milliunits {
        [
            self.on_target.amount,
            self.over_target.amount,
            self.under_target.amount,
            self.no_target.amount,
        ]
        .into_iter()
        .fold(0, Milliunits::saturating_add)
    }
}

/// Percentage of `total`, or zero when nothing was assigned.
fn share(amount: Milliunits, total: Milliunits) -> f64 {
    percentage_of(amount, total).unwrap_or(0.0)
}

/// Largest absolute variances first; ties by name, then by id.
fn top_variances(
    categories: &[ProcessedCategory],
    status: AlignmentStatus,
    limit: usize,
) -> Vec<VarianceEntry> {
    let mut matching: Vec<&ProcessedCategory> = categories
        .iter()
        .filter(|category| category.alignment_status == status)
        .collect();
    matching.sort_by(|a, b| {
        b.variance
            .unsigned_abs()
            .cmp(&a.variance.unsigned_abs())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    matching
        .into_iter()
        .take(limit)
        .map(VarianceEntry::from)
        .collect()
}

fn group_summaries(categories: &[ProcessedCategory]) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<&str, GroupSummary> = BTreeMap::new();
    for category in categories {
        let summary = groups
            .entry(category.group_name.as_str())
            .or_insert_with(|| GroupSummary {
                group_name: category.group_name.clone(),
                ..GroupSummary::default()
            });
        summary.category_count += 1;
        summary.total_assigned = summary.total_assigned.saturating_add(category.assigned);
        summary.total_targeted = summary
            .total_targeted
            .saturating_add(category.needed_this_month.unwrap_or(0));
        summary.total_variance = summary.total_variance.saturating_add(category.variance);
        match category.alignment_status {
            AlignmentStatus::OnTarget => summary.on_target_count += 1,
            AlignmentStatus::OverTarget => summary.over_target_count += 1,
            AlignmentStatus::UnderTarget => summary.under_target_count += 1,
            AlignmentStatus::NoTarget => summary.no_target_count += 1,
        }
    }
    groups.into_values().collect()
}
