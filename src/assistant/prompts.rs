use serde_json::{json, Value};

use crate::core::settings::Locale;

pub fn breakdown_prompt(task_title: &str) -> String {
    format!(
        "Break down the task \"{}\" into 3-5 actionable sub-tasks. \
         Return only the sub-tasks as a simple list.",
        task_title.trim()
    )
}

/// Array of `{ "title": string }` objects, `title` required.
pub fn breakdown_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" }
            },
            "required": ["title"],
            "propertyOrdering": ["title"]
        }
    })
}

pub fn inspiration_prompt(task_count: usize, habit_count: usize, locale: Locale) -> String {
    let language = match locale {
        Locale::PtBr => "Portuguese",
        Locale::En => "English",
    };
    format!(
        "User has {} tasks and {} habits today. \
         Give a very short (max 15 words) motivational boost in {}.",
        task_count, habit_count, language
    )
}

pub fn fallback_inspiration(locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => "Mantenha o foco e a consistência hoje!",
        Locale::En => "Stay focused and consistent today!",
    }
}
