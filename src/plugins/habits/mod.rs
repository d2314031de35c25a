pub mod types;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::shared::records::{self, Records};
use types::{Habit, HabitPatch, NewHabit};

/// Appends a habit with no history. Rejected when the name is blank.
pub fn add(habits: &[Arc<Habit>], new_habit: NewHabit, now: DateTime<Utc>) -> Option<Records<Habit>> {
    if records::is_blank(&new_habit.name) {
        tracing::debug!(target: "dashboard", "Rejected habit with blank name");
        return None;
    }

    let habit = Habit {
        id: records::unique_timestamp_id(habits, now.timestamp_millis()),
        name: new_habit.name,
        icon: new_habit.icon,
        color: new_habit.color,
        streak: 0,
        completed_days: Vec::new(),
    };

    Some(records::appended(habits, habit))
}

pub fn update(habits: &[Arc<Habit>], id: &str, patch: &HabitPatch) -> Option<Records<Habit>> {
    records::replace_with(habits, id, |habit| Some(patch.apply_to(habit)))
}

pub fn remove(habits: &[Arc<Habit>], id: &str) -> Option<Records<Habit>> {
    records::without(habits, id)
}

/// Marks or unmarks `date`. Marking bumps the streak, unmarking lowers it
/// (never below zero). The streak is not recomputed from the calendar.
pub fn toggle_day(habits: &[Arc<Habit>], habit_id: &str, date: NaiveDate) -> Option<Records<Habit>> {
    records::replace_with(habits, habit_id, |habit| {
        let mut completed_days = habit.completed_days.clone();

        let streak = if completed_days.contains(&date) {
            completed_days.retain(|day| *day != date);
            habit.streak.saturating_sub(1)
        } else {
            completed_days.push(date);
            habit.streak.saturating_add(1)
        };

        Some(Habit {
            streak,
            completed_days,
            ..habit.clone()
        })
    })
}

/// Illustrative habits used when nothing valid is stored.
pub fn seed() -> Vec<Habit> {
    vec![
        Habit {
            id: "1".to_string(),
            name: "Beber Água".to_string(),
            icon: "💧".to_string(),
            color: "blue".to_string(),
            streak: 5,
            completed_days: Vec::new(),
        },
        Habit {
            id: "2".to_string(),
            name: "Ler 30min".to_string(),
            icon: "📚".to_string(),
            color: "orange".to_string(),
            streak: 2,
            completed_days: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_add_appends_with_defaults() {
        let habits = records::shared(seed());
        let next = add(&habits, NewHabit::new("Meditar"), Utc::now()).unwrap();

        assert_eq!(next.len(), 3);
        let created = next.last().unwrap();
        assert_eq!(created.name, "Meditar");
        assert_eq!(created.icon, types::DEFAULT_ICON);
        assert_eq!(created.color, types::DEFAULT_COLOR);
        assert_eq!(created.streak, 0);
        assert!(created.completed_days.is_empty());
        assert!(Arc::ptr_eq(&habits[0], &next[0]));
    }

    #[test]
    fn test_add_rejects_blank_name() {
        assert!(add(&[], NewHabit::new(" \t"), Utc::now()).is_none());
    }

    #[test]
    fn test_toggle_day_marks_and_unmarks() {
        let habits = records::shared(seed());

        let marked = toggle_day(&habits, "2", day(5)).unwrap();
        assert_eq!(marked[1].completed_days, vec![day(5)]);
        assert_eq!(marked[1].streak, 3);
        assert!(Arc::ptr_eq(&habits[0], &marked[0]));

        let unmarked = toggle_day(&marked, "2", day(5)).unwrap();
        assert!(unmarked[1].completed_days.is_empty());
        assert_eq!(unmarked[1].streak, 2);
    }

    #[test]
    fn test_toggle_day_preserves_insertion_order_and_uniqueness() {
        let habits = records::shared(seed());
        let a = toggle_day(&habits, "1", day(7)).unwrap();
        let b = toggle_day(&a, "1", day(3)).unwrap();
        let c = toggle_day(&b, "1", day(9)).unwrap();
        assert_eq!(c[0].completed_days, vec![day(7), day(3), day(9)]);

        let d = toggle_day(&c, "1", day(3)).unwrap();
        assert_eq!(d[0].completed_days, vec![day(7), day(9)]);
    }

    #[test]
    fn test_toggle_day_streak_floors_at_zero() {
        let habits = records::shared(vec![Habit {
            id: "h".to_string(),
            name: "x".to_string(),
            icon: String::new(),
            color: String::new(),
            streak: 0,
            completed_days: vec![day(1)],
        }]);

        let next = toggle_day(&habits, "h", day(1)).unwrap();
        assert_eq!(next[0].streak, 0);
        assert!(next[0].completed_days.is_empty());
    }

    #[test]
    fn test_toggle_day_unknown_habit() {
        let habits = records::shared(seed());
        assert!(toggle_day(&habits, "missing", day(1)).is_none());
    }

    #[test]
    fn test_update_keeps_history() {
        let habits = records::shared(seed());
        let marked = toggle_day(&habits, "1", day(2)).unwrap();
        let patch = HabitPatch {
            name: Some("Beber 2L de Água".to_string()),
            ..Default::default()
        };

        let next = update(&marked, "1", &patch).unwrap();
        assert_eq!(next[0].name, "Beber 2L de Água");
        assert_eq!(next[0].streak, marked[0].streak);
        assert_eq!(next[0].completed_days, marked[0].completed_days);
    }

    #[test]
    fn test_stored_duplicate_days_are_collapsed() {
        let habit: Habit = serde_json::from_str(
            r#"{"id":"h","name":"x","streak":2,"completedDays":["2024-03-01","2024-03-02","2024-03-01"]}"#,
        )
        .unwrap();
        assert_eq!(habit.completed_days, vec![day(1), day(2)]);

        let habits = records::shared(vec![habit]);
        let next = toggle_day(&habits, "h", day(1)).unwrap();
        assert!(!next[0].is_done_on(day(1)));
        let restored = toggle_day(&next, "h", day(1)).unwrap();
        assert!(restored[0].is_done_on(day(1)));
    }

    #[test]
    fn test_unmark_removes_every_copy_of_the_day() {
        let habits = records::shared(vec![Habit {
            id: "h".to_string(),
            name: "x".to_string(),
            icon: String::new(),
            color: String::new(),
            streak: 2,
            completed_days: vec![day(1), day(1)],
        }]);

        let next = toggle_day(&habits, "h", day(1)).unwrap();
        assert!(next[0].completed_days.is_empty());
        assert_eq!(next[0].streak, 1);
    }

    #[test]
    fn test_completed_days_serialize_as_iso_dates() {
        let habits = records::shared(seed());
        let marked = toggle_day(&habits, "1", day(2)).unwrap();
        let json = serde_json::to_value(&*marked[0]).unwrap();
        assert_eq!(json["completedDays"][0], "2024-03-02");
    }
}
