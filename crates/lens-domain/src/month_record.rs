//! Month-level budget facts.

use serde::{Deserialize, Serialize};

use crate::{category::CategoryRecord, money::Milliunits, month::BudgetMonth};

/// Budget month detail: month totals plus the category snapshot for that month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthRecord {
    pub month: BudgetMonth,
    #[serde(default)]
    pub income: Milliunits,
    #[serde(default)]
    pub budgeted: Milliunits,
    #[serde(default)]
    pub activity: Milliunits,
    #[serde(default)]
    pub to_be_budgeted: Milliunits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_of_money: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
}

impl MonthRecord {
    pub fn new(month: BudgetMonth) -> Self {
        Self {
            month,
            income: 0,
            budgeted: 0,
            activity: 0,
            to_be_budgeted: 0,
            age_of_money: None,
            note: None,
            deleted: false,
            categories: Vec::new(),
        }
    }

    /// ISO string handed to the goal calculator for this month.
    pub fn analysis_month(&self) -> String {
        self.month.to_string()
    }
}
