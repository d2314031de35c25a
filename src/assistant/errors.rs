use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("No API key configured (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("No answer within {0:?}")]
    Timeout(Duration),
    #[error("Service returned no text")]
    EmptyResponse,
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}
