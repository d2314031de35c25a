use serde::{Deserialize, Serialize};

use crate::shared::records::Record;

pub const DEFAULT_UNIT: &str = "vezes";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoal {
    pub id: String,
    pub title: String,
    /// At least 1 for goals created through `add`.
    pub target: u32,
    /// Always within `0..=target`.
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub unit: String,
}

impl Record for WeeklyGoal {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewGoal {
    pub title: String,
    pub target: u32,
    pub unit: String,
}

impl NewGoal {
    pub fn new(title: impl Into<String>, target: u32) -> Self {
        Self {
            title: title.into(),
            target,
            unit: DEFAULT_UNIT.to_string(),
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub title: Option<String>,
    /// Ignored when zero.
    pub target: Option<u32>,
    pub unit: Option<String>,
}

impl GoalPatch {
    pub fn apply_to(&self, goal: &WeeklyGoal) -> WeeklyGoal {
        let target = self
            .target
            .filter(|target| *target > 0)
            .unwrap_or(goal.target);

        WeeklyGoal {
            id: goal.id.clone(),
            title: self.title.clone().unwrap_or_else(|| goal.title.clone()),
            target,
            current: goal.current.min(target),
            unit: self.unit.clone().unwrap_or_else(|| goal.unit.clone()),
        }
    }
}
