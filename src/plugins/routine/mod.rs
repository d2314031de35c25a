pub mod types;

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};

use crate::shared::records::{self, Records};
use types::{NewRoutineItem, RoutineItem, RoutinePatch};

/// Parses a time of day and renders it as zero-padded `HH:MM`.
/// Returns `None` for anything that is not a valid time.
pub fn normalize_time(time: &str) -> Option<String> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .ok()
        .map(|parsed| parsed.format("%H:%M").to_string())
}

/// Stable ascending sort by time.
pub fn sort_by_time(items: &mut [Arc<RoutineItem>]) {
    items.sort_by(|a, b| a.time.cmp(&b.time));
}

/// Prepares a stored collection: times are zero-padded and items sorted.
/// Times that do not parse are kept as stored.
pub fn from_stored(items: Vec<RoutineItem>) -> Records<RoutineItem> {
    let mut routine: Records<RoutineItem> = items
        .into_iter()
        .map(|item| match normalize_time(&item.time) {
            Some(time) => RoutineItem { time, ..item },
            None => {
                tracing::warn!(target: "dashboard", id = %item.id, time = %item.time, "Stored routine item has an invalid time");
                item
            }
        })
        .map(Arc::new)
        .collect();
    sort_by_time(&mut routine);
    routine
}

/// Inserts an item keeping the collection ordered by time.
/// Rejected when the activity is blank or the time is not `HH:MM`.
pub fn add(
    routine: &[Arc<RoutineItem>],
    new_item: NewRoutineItem,
    now: DateTime<Utc>,
) -> Option<Records<RoutineItem>> {
    if records::is_blank(&new_item.activity) {
        tracing::debug!(target: "dashboard", "Rejected routine item with blank activity");
        return None;
    }

    let Some(time) = normalize_time(&new_item.time) else {
        tracing::debug!(target: "dashboard", time = %new_item.time, "Rejected routine item with invalid time");
        return None;
    };

    let item = RoutineItem {
        id: records::unique_timestamp_id(routine, now.timestamp_millis()),
        time,
        activity: new_item.activity,
        completed: false,
    };

    let mut next = records::appended(routine, item);
    sort_by_time(&mut next);
    Some(next)
}

/// Merges the patch and re-sorts. An invalid time in the patch is ignored.
pub fn update(
    routine: &[Arc<RoutineItem>],
    id: &str,
    patch: &RoutinePatch,
) -> Option<Records<RoutineItem>> {
    let mut next = records::replace_with(routine, id, |item| {
        let time = match patch.time.as_deref() {
            Some(raw) => normalize_time(raw).unwrap_or_else(|| item.time.clone()),
            None => item.time.clone(),
        };

        Some(RoutineItem {
            id: item.id.clone(),
            time,
            activity: patch
                .activity
                .clone()
                .unwrap_or_else(|| item.activity.clone()),
            completed: patch.completed.unwrap_or(item.completed),
        })
    })?;

    sort_by_time(&mut next);
    Some(next)
}

pub fn remove(routine: &[Arc<RoutineItem>], id: &str) -> Option<Records<RoutineItem>> {
    records::without(routine, id)
}

pub fn toggle_completed(routine: &[Arc<RoutineItem>], id: &str) -> Option<Records<RoutineItem>> {
    records::replace_with(routine, id, |item| {
        Some(RoutineItem {
            completed: !item.completed,
            ..item.clone()
        })
    })
}

/// Illustrative routine used when nothing valid is stored.
pub fn seed() -> Vec<RoutineItem> {
    vec![
        RoutineItem {
            id: "1".to_string(),
            time: "07:00".to_string(),
            activity: "Meditação".to_string(),
            completed: false,
        },
        RoutineItem {
            id: "2".to_string(),
            time: "09:00".to_string(),
            activity: "Deep Work".to_string(),
            completed: false,
        },
    ]
}
