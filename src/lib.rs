pub mod assistant;
pub mod core;
pub mod dashboard;
pub mod insights;
pub mod plugins;
pub mod shared;
pub mod storage;

use std::fmt::Write as _;

use chrono::Local;

use crate::assistant::{Assistant, GeminiClient};
use crate::core::logging::init_logging;
use crate::core::settings::{load_or_init_settings, AppSettings, Locale};
use crate::dashboard::Dashboard;
use crate::insights::DashboardSummary;
use crate::shared::paths::{get_log_dir, get_storage_dir};
use crate::storage::CollectionStore;

pub fn run() {
    let storage_dir = get_storage_dir();

    // Sem logging o painel continua funcionando, só avisa no stderr
    let _log_guards = match init_logging(&get_log_dir(&storage_dir)) {
        Ok(guards) => Some(guards),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let settings = load_or_init_settings(&storage_dir);
    tracing::info!(target: "system", "Starting nexus with data dir {:?}", storage_dir);

    let dashboard = match Dashboard::open(CollectionStore::new(&storage_dir)) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!(target: "system", "Failed to open dashboard: {}", e);
            eprintln!("Failed to open dashboard: {}", e);
            return;
        }
    };

    let today = Local::now().date_naive();
    let summary = dashboard.summary(today, settings.locale);

    let inspiration = inspiration_for(&settings, dashboard.tasks().len(), dashboard.habits().len());

    print!("{}", render_summary(&summary, &inspiration, settings.locale));

    if let Err(e) = dashboard.flush() {
        tracing::error!(target: "system", "Failed to flush pending writes: {}", e);
    }
}

fn inspiration_for(settings: &AppSettings, task_count: usize, habit_count: usize) -> String {
    let fallback = || assistant::prompts::fallback_inspiration(settings.locale).to_string();

    let client = match GeminiClient::from_env(&settings.ai) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(target: "assistant", "Failed to build AI client: {}", e);
            return fallback();
        }
    };

    // Sem chave não vale a pena subir o runtime
    if !client.has_api_key() {
        return fallback();
    }

    match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime.block_on(
            Assistant::from_settings(client, settings).daily_inspiration(task_count, habit_count),
        ),
        Err(e) => {
            tracing::error!(target: "system", "Failed to start async runtime: {}", e);
            fallback()
        }
    }
}

struct Labels {
    tasks: &'static str,
    habits: &'static str,
    active: &'static str,
    goals: &'static str,
    upcoming: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::PtBr => Labels {
            tasks: "Tarefas concluídas",
            habits: "Hábitos ativos",
            active: "ativos",
            goals: "Metas da semana",
            upcoming: "Próximas tarefas",
        },
        Locale::En => Labels {
            tasks: "Tasks completed",
            habits: "Active habits",
            active: "active",
            goals: "Weekly goals",
            upcoming: "Upcoming tasks",
        },
    }
}

/// Plain-text rendering of the dashboard overview.
pub fn render_summary(summary: &DashboardSummary, inspiration: &str, locale: Locale) -> String {
    let labels = labels(locale);
    let mut out = String::new();

    let _ = writeln!(out, "\"{}\"", inspiration);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}: {}/{} ({}%)",
        labels.tasks, summary.completed_tasks, summary.total_tasks, summary.completion_percent
    );
    let _ = writeln!(
        out,
        "{}: {}/{} {}",
        labels.habits, summary.active_habits, summary.total_habits, labels.active
    );

    if !summary.goals.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", labels.goals);
        for goal in &summary.goals {
            let _ = writeln!(
                out,
                "  {} {}/{} {} ({}%)",
                goal.title, goal.current, goal.target, goal.unit, goal.percent
            );
        }
    }

    if !summary.upcoming_tasks.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", labels.upcoming);
        for task in &summary.upcoming_tasks {
            let mark = if task.completed { "x" } else { " " };
            let _ = writeln!(out, "  [{}] {} ({})", mark, task.title, task.category);
        }
    }

    if !summary.habits.is_empty() {
        let _ = writeln!(out);
        let week: Vec<&str> = summary.week.iter().map(|day| day.label).collect();
        let _ = writeln!(out, "  {}", week.join(" "));
        for habit in &summary.habits {
            let mark = if habit.done_today { "✓" } else { "·" };
            let _ = writeln!(
                out,
                "  {} {} {} ({})",
                mark, habit.icon, habit.name, habit.streak
            );
        }
    }

    out
}
