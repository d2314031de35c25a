pub mod types;

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::shared::records::{self, Records};
use types::{NewTask, Priority, SubTask, Task, TaskPatch};

/// Creates a task at the front of the collection. Rejected when the title is blank.
pub fn add(tasks: &[Arc<Task>], new_task: NewTask, now: DateTime<Utc>) -> Option<Records<Task>> {
    if records::is_blank(&new_task.title) {
        tracing::debug!(target: "dashboard", "Rejected task with blank title");
        return None;
    }

    let task = Task {
        id: records::unique_timestamp_id(tasks, now.timestamp_millis()),
        title: new_task.title,
        description: new_task.description,
        category: new_task.category,
        priority: new_task.priority,
        completed: false,
        due_date: new_task
            .due_date
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        sub_tasks: Vec::new(),
    };

    Some(records::prepended(tasks, task))
}

pub fn update(tasks: &[Arc<Task>], id: &str, patch: &TaskPatch) -> Option<Records<Task>> {
    records::replace_with(tasks, id, |task| Some(patch.apply_to(task)))
}

pub fn remove(tasks: &[Arc<Task>], id: &str) -> Option<Records<Task>> {
    records::without(tasks, id)
}

pub fn toggle_completed(tasks: &[Arc<Task>], id: &str) -> Option<Records<Task>> {
    records::replace_with(tasks, id, |task| {
        Some(Task {
            completed: !task.completed,
            ..task.clone()
        })
    })
}

/// Appends one pending sub-task per non-blank title.
pub fn add_sub_tasks<I, S>(tasks: &[Arc<Task>], task_id: &str, titles: I) -> Option<Records<Task>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let titles: Vec<String> = titles
        .into_iter()
        .map(|title| title.as_ref().trim().to_string())
        .filter(|title| !title.is_empty())
        .collect();

    if titles.is_empty() {
        return None;
    }

    records::replace_with(tasks, task_id, |task| {
        let mut sub_tasks = task.sub_tasks.clone();
        sub_tasks.extend(titles.into_iter().map(|title| SubTask {
            id: Uuid::new_v4().to_string(),
            title,
            completed: false,
        }));

        Some(Task {
            sub_tasks,
            ..task.clone()
        })
    })
}

pub fn toggle_sub_task(
    tasks: &[Arc<Task>],
    task_id: &str,
    sub_task_id: &str,
) -> Option<Records<Task>> {
    records::replace_with(tasks, task_id, |task| {
        let index = task.sub_tasks.iter().position(|st| st.id == sub_task_id)?;

        let mut sub_tasks = task.sub_tasks.clone();
        sub_tasks[index].completed = !sub_tasks[index].completed;

        Some(Task {
            sub_tasks,
            ..task.clone()
        })
    })
}

/// Illustrative tasks used when nothing valid is stored.
pub fn seed() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            title: "Completar projeto React".to_string(),
            description: String::new(),
            category: "Trabalho".to_string(),
            priority: Priority::High,
            completed: false,
            due_date: String::new(),
            sub_tasks: Vec::new(),
        },
        Task {
            id: "2".to_string(),
            title: "Ir para academia".to_string(),
            description: String::new(),
            category: "Saúde".to_string(),
            priority: Priority::Medium,
            completed: true,
            due_date: String::new(),
            sub_tasks: Vec::new(),
        },
    ]
}
