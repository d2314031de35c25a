use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::core::settings::Locale;
use crate::insights::{self, DashboardSummary};
use crate::plugins::goals::{self, types::GoalPatch, types::NewGoal, types::WeeklyGoal};
use crate::plugins::habits::{self, types::Habit, types::HabitPatch, types::NewHabit};
use crate::plugins::routine::{
    self, types::NewRoutineItem, types::RoutineItem, types::RoutinePatch,
};
use crate::plugins::tasks::{self, types::NewTask, types::Task, types::TaskPatch};
use crate::shared::errors::StorageError;
use crate::shared::records::{self, Records};
use crate::storage::{migrations, CollectionKey, CollectionStore, PersistWriter};

/// The four collections. Sole unit of persistence and sole input to the
/// derivations in [`crate::insights`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub tasks: Records<Task>,
    pub habits: Records<Habit>,
    pub routine: Records<RoutineItem>,
    pub goals: Records<WeeklyGoal>,
}

impl AppState {
    /// State made of the illustrative seed records.
    pub fn seeded() -> Self {
        Self {
            tasks: records::shared(tasks::seed()),
            habits: records::shared(habits::seed()),
            routine: records::shared(routine::seed()),
            goals: records::shared(goals::seed()),
        }
    }

    /// Loads every collection from `store`, seeding the ones that are absent or
    /// unreadable.
    pub fn load(store: &CollectionStore) -> Self {
        Self {
            tasks: records::shared(store.load(CollectionKey::Tasks, tasks::seed)),
            habits: records::shared(store.load(CollectionKey::Habits, habits::seed)),
            routine: routine::from_stored(store.load(CollectionKey::Routine, routine::seed)),
            goals: records::shared(store.load(CollectionKey::Goals, goals::seed)),
        }
    }
}

/// Owns the dashboard state and keeps the store in sync.
///
/// Every mutation builds a new collection, replaces the old one and returns
/// it. Untouched records stay pointer-identical. Mutations that change
/// nothing (unknown id, rejected input) leave the state as is and queue no
/// write.
pub struct Dashboard {
    state: AppState,
    writer: Option<PersistWriter>,
}

impl Dashboard {
    /// Opens the dashboard backed by `store`, loading persisted collections.
    pub fn open(store: CollectionStore) -> Result<Self, StorageError> {
        let state = AppState::load(&store);
        tracing::info!(
            target: "dashboard",
            "Dashboard loaded from {:?}: {} tasks, {} habits, {} routine items, {} goals",
            store.dir(),
            state.tasks.len(),
            state.habits.len(),
            state.routine.len(),
            state.goals.len()
        );

        let writer = PersistWriter::spawn(store)?;
        Ok(Self {
            state,
            writer: Some(writer),
        })
    }

    /// A dashboard that is never persisted.
    pub fn in_memory(state: AppState) -> Self {
        Self {
            state,
            writer: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.state.tasks
    }

    pub fn habits(&self) -> &[Arc<Habit>] {
        &self.state.habits
    }

    pub fn routine(&self) -> &[Arc<RoutineItem>] {
        &self.state.routine
    }

    pub fn goals(&self) -> &[Arc<WeeklyGoal>] {
        &self.state.goals
    }

    pub fn summary(&self, today: NaiveDate, locale: Locale) -> DashboardSummary {
        insights::summarize(&self.state, today, locale)
    }

    /// Blocks until every queued write is on disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        match &self.writer {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    // Tasks

    pub fn add_task(&mut self, new_task: NewTask) -> &[Arc<Task>] {
        let next = tasks::add(&self.state.tasks, new_task, Utc::now());
        commit(self.writer.as_ref(), CollectionKey::Tasks, &mut self.state.tasks, next)
    }

    pub fn update_task(&mut self, id: &str, patch: &TaskPatch) -> &[Arc<Task>] {
        let next = tasks::update(&self.state.tasks, id, patch);
        commit(self.writer.as_ref(), CollectionKey::Tasks, &mut self.state.tasks, next)
    }

    pub fn remove_task(&mut self, id: &str) -> &[Arc<Task>] {
        let next = tasks::remove(&self.state.tasks, id);
        commit(self.writer.as_ref(), CollectionKey::Tasks, &mut self.state.tasks, next)
    }

    pub fn toggle_task(&mut self, id: &str) -> &[Arc<Task>] {
        let next = tasks::toggle_completed(&self.state.tasks, id);
        commit(self.writer.as_ref(), CollectionKey::Tasks, &mut self.state.tasks, next)
    }

    pub fn add_sub_tasks<I, S>(&mut self, task_id: &str, titles: I) -> &[Arc<Task>]
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let next = tasks::add_sub_tasks(&self.state.tasks, task_id, titles);
        commit(self.writer.as_ref(), CollectionKey::Tasks, &mut self.state.tasks, next)
    }

    pub fn toggle_sub_task(&mut self, task_id: &str, sub_task_id: &str) -> &[Arc<Task>] {
        let next = tasks::toggle_sub_task(&self.state.tasks, task_id, sub_task_id);
        commit(self.writer.as_ref(), CollectionKey::Tasks, &mut self.state.tasks, next)
    }

    // Habits

    pub fn add_habit(&mut self, new_habit: NewHabit) -> &[Arc<Habit>] {
        let next = habits::add(&self.state.habits, new_habit, Utc::now());
        commit(self.writer.as_ref(), CollectionKey::Habits, &mut self.state.habits, next)
    }

    pub fn update_habit(&mut self, id: &str, patch: &HabitPatch) -> &[Arc<Habit>] {
        let next = habits::update(&self.state.habits, id, patch);
        commit(self.writer.as_ref(), CollectionKey::Habits, &mut self.state.habits, next)
    }

    pub fn remove_habit(&mut self, id: &str) -> &[Arc<Habit>] {
        let next = habits::remove(&self.state.habits, id);
        commit(self.writer.as_ref(), CollectionKey::Habits, &mut self.state.habits, next)
    }

    pub fn toggle_habit_day(&mut self, habit_id: &str, date: NaiveDate) -> &[Arc<Habit>] {
        let next = habits::toggle_day(&self.state.habits, habit_id, date);
        commit(self.writer.as_ref(), CollectionKey::Habits, &mut self.state.habits, next)
    }

    // Routine

    pub fn add_routine_item(&mut self, new_item: NewRoutineItem) -> &[Arc<RoutineItem>] {
        let next = routine::add(&self.state.routine, new_item, Utc::now());
        commit(self.writer.as_ref(), CollectionKey::Routine, &mut self.state.routine, next)
    }

    pub fn update_routine_item(&mut self, id: &str, patch: &RoutinePatch) -> &[Arc<RoutineItem>] {
        let next = routine::update(&self.state.routine, id, patch);
        commit(self.writer.as_ref(), CollectionKey::Routine, &mut self.state.routine, next)
    }

    pub fn remove_routine_item(&mut self, id: &str) -> &[Arc<RoutineItem>] {
        let next = routine::remove(&self.state.routine, id);
        commit(self.writer.as_ref(), CollectionKey::Routine, &mut self.state.routine, next)
    }

    pub fn toggle_routine_item(&mut self, id: &str) -> &[Arc<RoutineItem>] {
        let next = routine::toggle_completed(&self.state.routine, id);
        commit(self.writer.as_ref(), CollectionKey::Routine, &mut self.state.routine, next)
    }

    // Goals

    pub fn add_goal(&mut self, new_goal: NewGoal) -> &[Arc<WeeklyGoal>] {
        let next = goals::add(&self.state.goals, new_goal, Utc::now());
        commit(self.writer.as_ref(), CollectionKey::Goals, &mut self.state.goals, next)
    }

    pub fn update_goal(&mut self, id: &str, patch: &GoalPatch) -> &[Arc<WeeklyGoal>] {
        let next = goals::update(&self.state.goals, id, patch);
        commit(self.writer.as_ref(), CollectionKey::Goals, &mut self.state.goals, next)
    }

    pub fn remove_goal(&mut self, id: &str) -> &[Arc<WeeklyGoal>] {
        let next = goals::remove(&self.state.goals, id);
        commit(self.writer.as_ref(), CollectionKey::Goals, &mut self.state.goals, next)
    }

    pub fn adjust_goal_progress(&mut self, goal_id: &str, delta: i64) -> &[Arc<WeeklyGoal>] {
        let next = goals::adjust_progress(&self.state.goals, goal_id, delta);
        commit(self.writer.as_ref(), CollectionKey::Goals, &mut self.state.goals, next)
    }
}

fn commit<'a, R: Serialize>(
    writer: Option<&PersistWriter>,
    key: CollectionKey,
    slot: &'a mut Records<R>,
    next: Option<Records<R>>,
) -> &'a [Arc<R>] {
    match next {
        Some(next) => {
            *slot = next;
            persist(writer, key, slot);
        }
        None => {
            tracing::trace!(target: "dashboard", collection = %key, "Mutation was a no-op");
        }
    }
    slot
}

fn persist<R: Serialize>(writer: Option<&PersistWriter>, key: CollectionKey, records: &[Arc<R>]) {
    let Some(writer) = writer else {
        return;
    };

    let result = migrations::encode(records).and_then(|payload| writer.enqueue(key, payload));
    if let Err(e) = result {
        tracing::error!(
            target: "dashboard",
            collection = %key,
            error = %e,
            "Failed to queue persistence write"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_mutations_keep_state() {
        let mut dashboard = Dashboard::in_memory(AppState::seeded());
        let before = dashboard.state().clone();

        dashboard.toggle_task("missing");
        dashboard.add_task(NewTask::new("  "));
        dashboard.update_goal("missing", &GoalPatch::default());
        dashboard.remove_habit("missing");
        dashboard.toggle_sub_task("1", "missing");

        assert_eq!(*dashboard.state(), before);
        assert!(Arc::ptr_eq(&before.tasks[0], &dashboard.tasks()[0]));
    }

    #[test]
    fn test_mutation_returns_new_collection() {
        let mut dashboard = Dashboard::in_memory(AppState::seeded());
        let old_second = Arc::clone(&dashboard.tasks()[1]);

        let tasks = dashboard.toggle_task("1");
        assert!(tasks[0].completed);
        assert!(Arc::ptr_eq(&old_second, &tasks[1]));
        assert!(dashboard.tasks()[0].completed);
    }

    #[test]
    fn test_in_memory_flush_is_ok() {
        let dashboard = Dashboard::in_memory(AppState::default());
        assert!(dashboard.flush().is_ok());
        assert!(dashboard.tasks().is_empty());
    }

    #[test]
    fn test_load_sorts_stored_routine() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CollectionStore::new(tmp.path());
        let unsorted = vec![
            RoutineItem {
                id: "b".to_string(),
                time: "10:00".to_string(),
                activity: "b".to_string(),
                completed: false,
            },
            RoutineItem {
                id: "a".to_string(),
                time: "06:00".to_string(),
                activity: "a".to_string(),
                completed: false,
            },
        ];
        store.save(CollectionKey::Routine, &unsorted).unwrap();

        let state = AppState::load(&store);
        let ids: Vec<&str> = state.routine.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_load_pads_stored_routine_times() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CollectionStore::new(tmp.path());
        std::fs::write(
            store.path_for(CollectionKey::Routine),
            r#"[{"id":"a","time":"10:00","activity":"a"},{"id":"b","time":"7:00","activity":"b"},{"id":"c","time":"soon","activity":"c"}]"#,
        )
        .unwrap();

        let state = AppState::load(&store);
        let times: Vec<&str> = state.routine.iter().map(|item| item.time.as_str()).collect();
        assert_eq!(times, vec!["07:00", "10:00", "soon"]);
    }
}
