use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::records::Record;

pub const DEFAULT_ICON: &str = "🔥";
pub const DEFAULT_COLOR: &str = "indigo";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    /// Cosmetic label only.
    #[serde(default)]
    pub color: String,
    /// Toggle-maintained counter; not derived from `completed_days`.
    #[serde(default)]
    pub streak: u32,
    /// Unique dates in insertion order.
    #[serde(default, deserialize_with = "unique_days")]
    pub completed_days: Vec<NaiveDate>,
}

/// Drops repeated dates from stored data, keeping the first occurrence.
fn unique_days<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let days = Vec::<NaiveDate>::deserialize(deserializer)?;
    let mut unique = Vec::with_capacity(days.len());
    for day in days {
        if !unique.contains(&day) {
            unique.push(day);
        }
    }
    Ok(unique)
}

impl Habit {
    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.completed_days.contains(&date)
    }
}

impl Record for Habit {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl NewHabit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl HabitPatch {
    pub fn apply_to(&self, habit: &Habit) -> Habit {
        Habit {
            id: habit.id.clone(),
            name: self.name.clone().unwrap_or_else(|| habit.name.clone()),
            icon: self.icon.clone().unwrap_or_else(|| habit.icon.clone()),
            color: self.color.clone().unwrap_or_else(|| habit.color.clone()),
            streak: habit.streak,
            completed_days: habit.completed_days.clone(),
        }
    }
}
