pub mod types;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::shared::records::{self, Records};
use types::{GoalPatch, NewGoal, WeeklyGoal};

/// Appends a goal with no progress. Rejected when the title is blank or the
/// target is zero.
pub fn add(goals: &[Arc<WeeklyGoal>], new_goal: NewGoal, now: DateTime<Utc>) -> Option<Records<WeeklyGoal>> {
    if records::is_blank(&new_goal.title) {
        tracing::debug!(target: "dashboard", "Rejected goal with blank title");
        return None;
    }
    if new_goal.target == 0 {
        tracing::debug!(target: "dashboard", "Rejected goal with zero target");
        return None;
    }

    let goal = WeeklyGoal {
        id: records::unique_timestamp_id(goals, now.timestamp_millis()),
        title: new_goal.title,
        target: new_goal.target,
        current: 0,
        unit: new_goal.unit,
    };

    Some(records::appended(goals, goal))
}

pub fn update(goals: &[Arc<WeeklyGoal>], id: &str, patch: &GoalPatch) -> Option<Records<WeeklyGoal>> {
    records::replace_with(goals, id, |goal| Some(patch.apply_to(goal)))
}

pub fn remove(goals: &[Arc<WeeklyGoal>], id: &str) -> Option<Records<WeeklyGoal>> {
    records::without(goals, id)
}

/// Moves progress by `delta`, clamped to `0..=target`.
pub fn adjust_progress(goals: &[Arc<WeeklyGoal>], id: &str, delta: i64) -> Option<Records<WeeklyGoal>> {
    records::replace_with(goals, id, |goal| {
        let current = i64::from(goal.current)
            .saturating_add(delta)
            .clamp(0, i64::from(goal.target)) as u32;

        Some(WeeklyGoal {
            current,
            ..goal.clone()
        })
    })
}

/// Illustrative goals used when nothing valid is stored.
pub fn seed() -> Vec<WeeklyGoal> {
    vec![WeeklyGoal {
        id: "1".to_string(),
        title: "Treinos na semana".to_string(),
        target: 4,
        current: 2,
        unit: "treinos".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_starts_at_zero() {
        let goals = records::shared(seed());
        let next = add(&goals, NewGoal::new("Ler livros", 2).unit("livros"), Utc::now()).unwrap();

        assert_eq!(next.len(), 2);
        let created = &next[1];
        assert_eq!(created.title, "Ler livros");
        assert_eq!(created.target, 2);
        assert_eq!(created.current, 0);
        assert_eq!(created.unit, "livros");
    }

    #[test]
    fn test_add_rejects_blank_title_or_zero_target() {
        assert!(add(&[], NewGoal::new("", 3), Utc::now()).is_none());
        assert!(add(&[], NewGoal::new("Correr", 0), Utc::now()).is_none());
    }

    #[test]
    fn test_adjust_progress_clamps() {
        let goals = records::shared(seed());

        let up = adjust_progress(&goals, "1", 10).unwrap();
        assert_eq!(up[0].current, 4);

        let down = adjust_progress(&goals, "1", -10).unwrap();
        assert_eq!(down[0].current, 0);

        let step = adjust_progress(&goals, "1", 1).unwrap();
        assert_eq!(step[0].current, 3);

        let extreme = adjust_progress(&goals, "1", i64::MIN).unwrap();
        assert_eq!(extreme[0].current, 0);
        let extreme = adjust_progress(&goals, "1", i64::MAX).unwrap();
        assert_eq!(extreme[0].current, 4);
    }

    #[test]
    fn test_adjust_progress_unknown_goal() {
        let goals = records::shared(seed());
        assert!(adjust_progress(&goals, "missing", 1).is_none());
    }

    #[test]
    fn test_update_target_reclamps_current() {
        let goals = records::shared(seed());

        let lowered = update(
            &goals,
            "1",
            &GoalPatch {
                target: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(lowered[0].target, 1);
        assert_eq!(lowered[0].current, 1);

        let ignored = update(
            &goals,
            "1",
            &GoalPatch {
                target: Some(0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(ignored[0].target, 4);
        assert_eq!(ignored[0].current, 2);
    }

    #[test]
    fn test_remove() {
        let goals = records::shared(seed());
        assert!(remove(&goals, "1").unwrap().is_empty());
        assert!(remove(&goals, "2").is_none());
    }
}
