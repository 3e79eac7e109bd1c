//! Filter, process and aggregate one budget month.

use std::collections::HashSet;

use lens_config::AnalysisConfig;
use lens_domain::{AnalysisReport, CategoryRecord, MonthRecord, ProcessedCategory};
use tracing::warn;

use crate::{
    category_processor::CategoryProcessor, monthly_aggregator::MonthlyAggregator, CoreError,
};

/// Group label for categories the provider delivered without a group.
pub const UNGROUPED_LABEL: &str = "Ungrouped";

/// Entry point used by request handlers: validates input, then runs the pure pipeline.
pub struct AnalysisService;

impl AnalysisService {
    pub fn analyze(
        month: &MonthRecord,
        budget_id: &str,
        budget_name: &str,
        config: &AnalysisConfig,
    ) -> Result<AnalysisReport, CoreError> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejecting analysis configuration");
            return Err(err.into());
        }
        if budget_id.trim().is_empty() {
            warn!("rejecting analysis without a budget id");
            return Err(CoreError::Validation("budget id must not be empty".into()));
        }
        ensure_unique_ids(&month.categories)?;

        let categories = Self::process_categories(month, config);
        let analysis = MonthlyAggregator::generate_monthly_analysis_with_limit(
            month,
            budget_id,
            budget_name,
            &categories,
            config.top_variance_limit,
        );
        Ok(AnalysisReport {
            analysis,
            categories,
        })
    }

    /// Applies the inclusion filter and processes every remaining category.
    pub fn process_categories(
        month: &MonthRecord,
        config: &AnalysisConfig,
    ) -> Vec<ProcessedCategory> {
        let analysis_month = month.analysis_month();
        month
            .categories
            .iter()
            .filter(|category| CategoryProcessor::should_include_category(category, config))
            .map(|category| {
                CategoryProcessor::process_category(
                    category,
                    group_name(category),
                    config,
                    Some(&analysis_month),
                )
            })
            .collect()
    }
}

fn group_name(category: &CategoryRecord) -> &str {
    category
        .category_group_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNGROUPED_LABEL)
}

fn ensure_unique_ids(categories: &[CategoryRecord]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(categories.len());
    for category in categories {
        if !seen.insert(category.id) {
            warn!(category = %category.name, id = %category.id, "duplicate category id");
            return Err(CoreError::DuplicateCategory(category.id));
        }
    }
    Ok(())
}
