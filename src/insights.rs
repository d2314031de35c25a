//! Pure, display-ready aggregates computed from the dashboard state.

use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::core::settings::Locale;
use crate::dashboard::AppState;
use crate::plugins::goals::types::WeeklyGoal;
use crate::plugins::habits::types::Habit;
use crate::plugins::tasks::types::Task;

/// Number of entries shown in the dashboard previews.
pub const PREVIEW_LEN: usize = 4;

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0.
fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u32
}

pub fn completed_task_count(tasks: &[Arc<Task>]) -> usize {
    tasks.iter().filter(|task| task.completed).count()
}

pub fn task_completion_percent(tasks: &[Arc<Task>]) -> u32 {
    percent(completed_task_count(tasks) as u64, tasks.len() as u64)
}

pub fn active_habit_count(habits: &[Arc<Habit>]) -> usize {
    habits.iter().filter(|habit| habit.streak > 0).count()
}

/// Progress of a goal in percent. A zero target (only reachable through
/// hand-edited storage) reads as 0.
pub fn goal_progress_percent(goal: &WeeklyGoal) -> u32 {
    percent(u64::from(goal.current), u64::from(goal.target))
}

pub fn is_habit_done_on(habit: &Habit, date: NaiveDate) -> bool {
    habit.is_done_on(date)
}

pub fn upcoming_tasks_preview(tasks: &[Arc<Task>], n: usize) -> &[Arc<Task>] {
    &tasks[..n.min(tasks.len())]
}

pub fn habits_preview(habits: &[Arc<Habit>], n: usize) -> &[Arc<Habit>] {
    &habits[..n.min(habits.len())]
}

/// One cell of the habit calendar strip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`, the format stored in `completedDays`.
    pub iso: String,
    /// Narrow weekday label.
    pub label: &'static str,
    pub day: u32,
}

pub fn weekday_label(weekday: Weekday, locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => match weekday {
            Weekday::Sun => "D",
            Weekday::Mon => "S",
            Weekday::Tue => "T",
            Weekday::Wed => "Q",
            Weekday::Thu => "Q",
            Weekday::Fri => "S",
            Weekday::Sat => "S",
        },
        Locale::En => match weekday {
            Weekday::Sun => "S",
            Weekday::Mon => "M",
            Weekday::Tue => "T",
            Weekday::Wed => "W",
            Weekday::Thu => "T",
            Weekday::Fri => "F",
            Weekday::Sat => "S",
        },
    }
}

/// The seven consecutive days ending at `reference`, oldest first. Within six
/// days of `NaiveDate::MIN` the strip starts at the minimum date instead.
pub fn last_7_days(reference: NaiveDate, locale: Locale) -> Vec<CalendarDay> {
    let start = reference
        .checked_sub_days(Days::new(6))
        .unwrap_or(NaiveDate::MIN);

    start
        .iter_days()
        .take(7)
        .map(|date| CalendarDay {
            date,
            iso: date.format("%Y-%m-%d").to_string(),
            label: weekday_label(date.weekday(), locale),
            day: date.day(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub id: String,
    pub title: String,
    pub current: u32,
    pub target: u32,
    pub unit: String,
    pub percent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitPreview {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub streak: u32,
    pub done_today: bool,
}

/// Everything the dashboard overview shows, computed in one pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub completion_percent: u32,
    pub active_habits: usize,
    pub total_habits: usize,
    pub goals: Vec<GoalProgress>,
    pub upcoming_tasks: Vec<Arc<Task>>,
    pub habits: Vec<HabitPreview>,
    pub week: Vec<CalendarDay>,
}

pub fn summarize(state: &AppState, today: NaiveDate, locale: Locale) -> DashboardSummary {
    DashboardSummary {
        today,
        completed_tasks: completed_task_count(&state.tasks),
        total_tasks: state.tasks.len(),
        completion_percent: task_completion_percent(&state.tasks),
        active_habits: active_habit_count(&state.habits),
        total_habits: state.habits.len(),
        goals: state
            .goals
            .iter()
            .map(|goal| GoalProgress {
                id: goal.id.clone(),
                title: goal.title.clone(),
                current: goal.current,
                target: goal.target,
                unit: goal.unit.clone(),
                percent: goal_progress_percent(goal),
            })
            .collect(),
        upcoming_tasks: upcoming_tasks_preview(&state.tasks, PREVIEW_LEN).to_vec(),
        habits: habits_preview(&state.habits, PREVIEW_LEN)
            .iter()
            .map(|habit| HabitPreview {
                id: habit.id.clone(),
                name: habit.name.clone(),
                icon: habit.icon.clone(),
                streak: habit.streak,
                done_today: is_habit_done_on(habit, today),
            })
            .collect(),
        week: last_7_days(today, locale),
    }
}
