//! Category goal records as delivered by the budgeting provider.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::{money::Milliunits, month::BudgetMonth};

/// Cadence code for goals repeating every month.
pub const CADENCE_MONTHLY: i32 = 1;
/// Cadence code for goals repeating every week.
pub const CADENCE_WEEKLY: i32 = 2;

/// Goal configuration attached to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GoalType {
    #[default]
    NoGoal,
    TargetBalance,
    TargetBalanceByDate,
    MonthlyFunding,
    NeedGoal,
    DebtPayoff,
}

impl GoalType {
    /// Provider wire code, `None` for categories without a goal.
    pub fn code(self) -> Option<&'static str> {
        match self {
            GoalType::NoGoal => None,
            GoalType::TargetBalance => Some("TB"),
            GoalType::TargetBalanceByDate => Some("TBD"),
            GoalType::MonthlyFunding => Some("MF"),
            GoalType::NeedGoal => Some("NEED"),
            GoalType::DebtPayoff => Some("DEBT"),
        }
    }

    pub fn from_code(code: Option<&str>) -> Result<Self, UnknownGoalType> {
        match code.map(str::trim) {
            None | Some("") => Ok(GoalType::NoGoal),
            Some("TB") => Ok(GoalType::TargetBalance),
            Some("TBD") => Ok(GoalType::TargetBalanceByDate),
            Some("MF") => Ok(GoalType::MonthlyFunding),
            Some("NEED") => Ok(GoalType::NeedGoal),
            Some("DEBT") => Ok(GoalType::DebtPayoff),
            Some(other) => Err(UnknownGoalType(other.to_string())),
        }
    }

    pub fn has_goal(self) -> bool {
        !matches!(self, GoalType::NoGoal)
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalType::NoGoal => "No Goal",
            GoalType::TargetBalance => "Target Balance",
            GoalType::TargetBalanceByDate => "Target Balance by Date",
            GoalType::MonthlyFunding => "Monthly Funding",
            GoalType::NeedGoal => "Spending Need",
            GoalType::DebtPayoff => "Debt Payoff",
        };
        f.write_str(label)
    }
}

impl Serialize for GoalType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.code() {
            Some(code) => serializer.serialize_str(code),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for GoalType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        GoalType::from_code(value.as_deref()).map_err(de::Error::custom)
    }
}

/// Raised for goal codes outside the closed set understood by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGoalType(pub String);

impl fmt::Display for UnknownGoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown goal type `{}`", self.0)
    }
}

impl std::error::Error for UnknownGoalType {}

/// One category of a budget month, including its goal fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_group_name: Option<String>,
    #[serde(default)]
    pub goal_type: GoalType,
    #[serde(default)]
    pub goal_target: Option<Milliunits>,
    #[serde(default)]
    pub goal_creation_month: Option<BudgetMonth>,
    #[serde(default)]
    pub goal_target_month: Option<BudgetMonth>,
    #[serde(default)]
    pub goal_months_to_budget: Option<i32>,
    #[serde(default)]
    pub goal_overall_left: Option<Milliunits>,
    #[serde(default)]
    pub goal_cadence: Option<i32>,
    #[serde(default)]
    pub goal_cadence_frequency: Option<i32>,
    #[serde(default)]
    pub goal_day: Option<i32>,
    pub budgeted: Milliunits,
    #[serde(default)]
    pub balance: Milliunits,
    #[serde(default)]
    pub activity: Milliunits,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl CategoryRecord {
    /// Builds a visible category without a goal.
    pub fn new(name: impl Into<String>, budgeted: Milliunits) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category_group_name: None,
            goal_type: GoalType::NoGoal,
            goal_target: None,
            goal_creation_month: None,
            goal_target_month: None,
            goal_months_to_budget: None,
            goal_overall_left: None,
            goal_cadence: None,
            goal_cadence_frequency: None,
            goal_day: None,
            budgeted,
            balance: 0,
            activity: 0,
            hidden: false,
            deleted: false,
        }
    }

    /// Attaches a goal of `goal_type` targeting `goal_target`.
    pub fn with_goal(mut self, goal_type: GoalType, goal_target: Option<Milliunits>) -> Self {
        self.goal_type = goal_type;
        self.goal_target = goal_target;
        self
    }

    pub fn with_cadence(mut self, cadence: i32, frequency: i32) -> Self {
        self.goal_cadence = Some(cadence);
        self.goal_cadence_frequency = Some(frequency);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.category_group_name = Some(group.into());
        self
    }

    pub fn has_goal(&self) -> bool {
        self.goal_type.has_goal()
    }
}
