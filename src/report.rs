//! Budget snapshots on disk and the reports produced from them.

use std::{fs, path::Path};

use lens_config::AnalysisConfig;
use lens_core::{AnalysisService, GoalCalculator};
use lens_domain::{AnalysisReport, CategoryRecord, MonthRecord, TargetCalculation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::LensError;

/// One budget month as exported from the budgeting provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSnapshot {
    pub budget_id: String,
    #[serde(default)]
    pub budget_name: String,
    pub month: MonthRecord,
}

impl BudgetSnapshot {
    pub fn new(
        budget_id: impl Into<String>,
        budget_name: impl Into<String>,
        month: MonthRecord,
    ) -> Self {
        Self {
            budget_id: budget_id.into(),
            budget_name: budget_name.into(),
            month,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LensError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a snapshot from disk, returning structured errors on failure.
    pub fn load(path: &Path) -> Result<Self, LensError> {
        let data = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&data)?;
        debug!(
            path = %path.display(),
            categories = snapshot.month.categories.len(),
            "loaded budget snapshot"
        );
        Ok(snapshot)
    }

    /// Writes the snapshot to disk atomically by staging to a temporary file.
    pub fn save(&self, path: &Path) -> Result<(), LensError> {
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp, json)?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    pub fn analyze(&self, config: &AnalysisConfig) -> Result<AnalysisReport, LensError> {
        Ok(AnalysisService::analyze(
            &self.month,
            &self.budget_id,
            &self.budget_name,
            config,
        )?)
    }

    /// Case-insensitive lookup over every category, including hidden and deleted ones.
    pub fn find_category(&self, name: &str) -> Option<&CategoryRecord> {
        let needle = name.trim();
        self.month
            .categories
            .iter()
            .find(|category| category.name.trim().eq_ignore_ascii_case(needle))
    }

    /// Explains the target the named category needs this month.
    pub fn explain(&self, name: &str) -> Result<TargetCalculation, LensError> {
        let category = self
            .find_category(name)
            .ok_or_else(|| LensError::CategoryNotFound(name.to_string()))?;
        let month = self.month.analysis_month();
        Ok(GoalCalculator::explain(category, Some(&month)))
    }
}

/// Serialises a report as pretty JSON.
pub fn report_to_json(report: &AnalysisReport) -> Result<String, LensError> {
    Ok(serde_json::to_string_pretty(report)?)
}
