use serde::{Deserialize, Serialize};

use crate::shared::records::Record;

pub const DEFAULT_CATEGORY: &str = "Geral";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    /// ISO-8601 timestamp, may be empty.
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    /// Stamped with the creation instant when `None`.
    pub due_date: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            priority: Priority::default(),
            due_date: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Partial update for a task. `None` fields are left as they are.
/// Sub-tasks are changed through their dedicated operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub due_date: Option<String>,
}

impl TaskPatch {
    pub fn apply_to(&self, task: &Task) -> Task {
        Task {
            id: task.id.clone(),
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| task.description.clone()),
            category: self.category.clone().unwrap_or_else(|| task.category.clone()),
            priority: self.priority.unwrap_or(task.priority),
            completed: self.completed.unwrap_or(task.completed),
            due_date: self.due_date.clone().unwrap_or_else(|| task.due_date.clone()),
            sub_tasks: task.sub_tasks.clone(),
        }
    }
}
