use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Settings threaded through category processing and monthly aggregation.
///
/// Amounts are in milliunits (1/1000 of a currency unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "AnalysisConfig::default_tolerance_milliunits")]
    pub tolerance_milliunits: i64,
    #[serde(default)]
    pub include_hidden_categories: bool,
    #[serde(default)]
    pub include_deleted_categories: bool,
    /// Categories whose absolute assignment is below this amount are left out.
    #[serde(default)]
    pub minimum_assigned_milliunits: i64,
    #[serde(default = "AnalysisConfig::default_top_variance_limit")]
    pub top_variance_limit: usize,
    #[serde(default = "AnalysisConfig::default_currency")]
    pub currency: String,
    #[serde(default = "AnalysisConfig::default_locale")]
    pub locale: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance_milliunits: Self::default_tolerance_milliunits(),
            include_hidden_categories: false,
            include_deleted_categories: false,
            minimum_assigned_milliunits: 0,
            top_variance_limit: Self::default_top_variance_limit(),
            currency: Self::default_currency(),
            locale: Self::default_locale(),
        }
    }
}

impl AnalysisConfig {
    pub fn default_tolerance_milliunits() -> i64 {
        1000
    }

    pub fn default_top_variance_limit() -> usize {
        5
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn with_tolerance(mut self, tolerance_milliunits: i64) -> Self {
        self.tolerance_milliunits = tolerance_milliunits;
        self
    }

    /// Rejects settings that would make classification or filtering meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance_milliunits < 0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must not be negative (got {})",
                self.tolerance_milliunits
            )));
        }
        if self.minimum_assigned_milliunits < 0 {
            return Err(ConfigError::Invalid(format!(
                "minimum assigned threshold must not be negative (got {})",
                self.minimum_assigned_milliunits
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency code must not be empty".into()));
        }
        Ok(())
    }
}
