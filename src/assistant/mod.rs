//! Gateway to the generative-text service used for task breakdowns and the
//! daily inspiration line. Both operations never fail: transport problems
//! turn into `None` or a fixed fallback.

pub mod errors;
pub mod gemini;
pub mod prompts;

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::settings::{AppSettings, Locale};
use crate::dashboard::Dashboard;
use crate::shared::records;

pub use errors::AssistantError;
pub use gemini::GeminiClient;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// When set, the answer must be JSON matching this schema.
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }
}

/// Something that turns a prompt into text.
pub trait TextGenerator {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTaskDraft {
    pub title: String,
}

/// Parses a breakdown answer, tolerating a surrounding markdown code fence.
pub fn parse_breakdown(text: &str) -> Result<Vec<SubTaskDraft>, AssistantError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    let drafts: Vec<SubTaskDraft> = serde_json::from_str(body.trim())?;
    Ok(drafts)
}

pub struct Assistant<G> {
    generator: G,
    locale: Locale,
    timeout: Duration,
}

impl<G: TextGenerator> Assistant<G> {
    pub fn new(generator: G, locale: Locale, timeout: Duration) -> Self {
        Self {
            generator,
            locale,
            timeout,
        }
    }

    pub fn from_settings(generator: G, settings: &AppSettings) -> Self {
        Self::new(generator, settings.locale, settings.ai.timeout())
    }

    async fn request(&self, request: GenerationRequest) -> Result<String, AssistantError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(request)).await {
            Ok(result) => result,
            Err(_) => Err(AssistantError::Timeout(self.timeout)),
        }
    }

    /// Asks for 3-5 sub-step titles. `None` when the service cannot produce a
    /// usable list.
    pub async fn break_down_task(&self, task_title: &str) -> Option<Vec<SubTaskDraft>> {
        if records::is_blank(task_title) {
            return None;
        }

        let request = GenerationRequest::json(
            prompts::breakdown_prompt(task_title),
            prompts::breakdown_schema(),
        );

        let text = match self.request(request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(target: "assistant", error = %e, "Task breakdown failed");
                return None;
            }
        };

        let drafts = match parse_breakdown(&text) {
            Ok(drafts) => drafts,
            Err(e) => {
                tracing::warn!(target: "assistant", error = %e, "Task breakdown returned unexpected JSON");
                return None;
            }
        };

        let drafts: Vec<SubTaskDraft> = drafts
            .into_iter()
            .filter_map(|draft| {
                let title = draft.title.trim();
                (!title.is_empty()).then(|| SubTaskDraft {
                    title: title.to_string(),
                })
            })
            .collect();

        if drafts.is_empty() {
            tracing::debug!(target: "assistant", "Task breakdown had no usable titles");
            return None;
        }

        tracing::info!(target: "assistant", count = drafts.len(), "Task breakdown ready");
        Some(drafts)
    }

    /// Short motivational sentence for today, or a fixed fallback.
    pub async fn daily_inspiration(&self, task_count: usize, habit_count: usize) -> String {
        let request =
            GenerationRequest::text(prompts::inspiration_prompt(task_count, habit_count, self.locale));

        match self.request(request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => prompts::fallback_inspiration(self.locale).to_string(),
            Err(e) => {
                tracing::debug!(target: "assistant", error = %e, "Using fallback inspiration");
                prompts::fallback_inspiration(self.locale).to_string()
            }
        }
    }

    /// Breaks a task down and appends the result as sub-tasks. Returns whether
    /// any sub-task was added.
    pub async fn smart_breakdown(&self, dashboard: &mut Dashboard, task_id: &str) -> bool {
        let Some(task) = records::find(dashboard.tasks(), task_id).cloned() else {
            tracing::debug!(target: "assistant", task_id, "Breakdown requested for unknown task");
            return false;
        };

        let Some(drafts) = self.break_down_task(&task.title).await else {
            return false;
        };

        let tasks = dashboard.add_sub_tasks(task_id, drafts.iter().map(|draft| draft.title.as_str()));
        records::find(tasks, task_id)
            .is_some_and(|updated| updated.sub_tasks.len() > task.sub_tasks.len())
    }
}
