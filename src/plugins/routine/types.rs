use serde::{Deserialize, Serialize};

use crate::shared::records::Record;

pub const DEFAULT_TIME: &str = "08:00";
pub const DEFAULT_ACTIVITY: &str = "Nova atividade";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineItem {
    pub id: String,
    /// Zero-padded `HH:MM`, so string order is chronological order.
    pub time: String,
    pub activity: String,
    #[serde(default)]
    pub completed: bool,
}

impl Record for RoutineItem {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRoutineItem {
    pub time: String,
    pub activity: String,
}

impl NewRoutineItem {
    pub fn new(time: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            activity: activity.into(),
        }
    }
}

impl Default for NewRoutineItem {
    fn default() -> Self {
        Self::new(DEFAULT_TIME, DEFAULT_ACTIVITY)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutinePatch {
    pub time: Option<String>,
    pub activity: Option<String>,
    pub completed: Option<bool>,
}
