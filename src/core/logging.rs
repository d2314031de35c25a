use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::shared::paths::ensure_dir;

/// Targets that get their own log file. Everything else goes to `system.log`.
pub const COMPONENTS: [&str; 3] = ["dashboard", "storage", "assistant"];

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create logs directory: {0}")]
    Directory(#[from] std::io::Error),
    #[error("Global tracing subscriber already set: {0}")]
    AlreadyInitialized(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Keeps the non-blocking writers flushing; drop on shutdown.
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

struct ComponentWriter {
    writers: HashMap<&'static str, NonBlocking>,
    system_writer: NonBlocking,
}

impl<'a> MakeWriter<'a> for ComponentWriter {
    type Writer = NonBlocking;

    fn make_writer(&'a self) -> Self::Writer {
        self.system_writer.clone()
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        component_for(meta.target())
            .and_then(|component| self.writers.get(component))
            .unwrap_or(&self.system_writer)
            .clone()
    }
}

/// Maps a tracing target to the component owning it (`storage::x` -> `storage`).
pub fn component_for(target: &str) -> Option<&'static str> {
    COMPONENTS.iter().copied().find(|component| {
        target == *component
            || target
                .strip_prefix(component)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}

/// Install the global subscriber writing daily-rotated files into `log_dir`.
/// Level comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(log_dir: &Path) -> Result<LoggingGuards, LoggingError> {
    ensure_dir(log_dir)?;

    let mut guards = Vec::new();
    let mut writers = HashMap::new();

    for component in COMPONENTS {
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{}.log", component));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        writers.insert(component, non_blocking);
        guards.push(guard);
    }

    let system_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "system.log");
    let (system_writer, system_guard) = tracing_appender::non_blocking(system_appender);
    guards.push(system_guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(ComponentWriter {
                writers,
                system_writer,
            })
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false),
    );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(target: "system", "Logging initialized at {:?}", log_dir);

    Ok(LoggingGuards { _guards: guards })
}
