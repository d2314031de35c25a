use std::sync::Arc;

/// A collection entry addressable by its identifier.
pub trait Record {
    fn id(&self) -> &str;
}

/// An ordered collection. Records are shared so that an update only
/// reallocates the record it touches.
pub type Records<R> = Vec<Arc<R>>;

pub fn find<'a, R: Record>(records: &'a [Arc<R>], id: &str) -> Option<&'a Arc<R>> {
    records.iter().find(|record| record.id() == id)
}

pub fn position<R: Record>(records: &[Arc<R>], id: &str) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

pub fn contains_id<R: Record>(records: &[Arc<R>], id: &str) -> bool {
    position(records, id).is_some()
}

/// Builds a new collection where the record with `id` is replaced by
/// `update(old)`. Returns `None` when the id is unknown or `update` declines.
pub fn replace_with<R, F>(records: &[Arc<R>], id: &str, update: F) -> Option<Records<R>>
where
    R: Record,
    F: FnOnce(&R) -> Option<R>,
{
    let index = position(records, id)?;
    let replacement = update(&records[index])?;

    let mut next = records.to_vec();
    next[index] = Arc::new(replacement);
    Some(next)
}

/// Builds a new collection without the record with `id`.
pub fn without<R: Record>(records: &[Arc<R>], id: &str) -> Option<Records<R>> {
    let index = position(records, id)?;

    let mut next = records.to_vec();
    next.remove(index);
    Some(next)
}

pub fn appended<R>(records: &[Arc<R>], record: R) -> Records<R> {
    let mut next = Vec::with_capacity(records.len() + 1);
    next.extend(records.iter().cloned());
    next.push(Arc::new(record));
    next
}

pub fn prepended<R>(records: &[Arc<R>], record: R) -> Records<R> {
    let mut next = Vec::with_capacity(records.len() + 1);
    next.push(Arc::new(record));
    next.extend(records.iter().cloned());
    next
}

/// Wraps owned records for a collection.
pub fn shared<R>(records: Vec<R>) -> Records<R> {
    records.into_iter().map(Arc::new).collect()
}

/// Generates a creation-timestamp identifier (milliseconds since the epoch)
/// that does not collide with any id already in the collection.
pub fn unique_timestamp_id<R: Record>(records: &[Arc<R>], now_ms: i64) -> String {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !contains_id(records, &id) {
            return id;
        }
        candidate = candidate.saturating_add(1);
    }
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: String,
        value: u32,
    }

    impl Record for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: u32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_replace_with_keeps_untouched_records_shared() {
        let records = shared(vec![item("a", 1), item("b", 2), item("c", 3)]);

        let next = replace_with(&records, "b", |old| {
            Some(Item {
                id: old.id.clone(),
                value: old.value * 10,
            })
        })
        .unwrap();

        assert_eq!(next[1].value, 20);
        assert!(Arc::ptr_eq(&records[0], &next[0]));
        assert!(!Arc::ptr_eq(&records[1], &next[1]));
        assert!(Arc::ptr_eq(&records[2], &next[2]));
        // Original collection is untouched
        assert_eq!(records[1].value, 2);
    }

    #[test]
    fn test_replace_with_unknown_id_is_none() {
        let records = shared(vec![item("a", 1)]);
        assert!(replace_with(&records, "zzz", |old| Some(item(&old.id, 0))).is_none());
    }

    #[test]
    fn test_without_removes_only_target() {
        let records = shared(vec![item("a", 1), item("b", 2)]);

        let next = without(&records, "a").unwrap();
        assert_eq!(next.len(), 1);
        assert!(Arc::ptr_eq(&records[1], &next[0]));

        assert!(without(&records, "missing").is_none());
    }

    #[test]
    fn test_prepended_and_appended_order() {
        let records = shared(vec![item("a", 1)]);

        let front = prepended(&records, item("z", 0));
        assert_eq!(front[0].id, "z");
        assert_eq!(front[1].id, "a");

        let back = appended(&records, item("z", 0));
        assert_eq!(back[0].id, "a");
        assert_eq!(back[1].id, "z");
    }

    #[test]
    fn test_unique_timestamp_id_skips_taken_ids() {
        let records = shared(vec![item("1000", 0), item("1001", 0)]);

        assert_eq!(unique_timestamp_id(&records, 1000), "1002");
        assert_eq!(unique_timestamp_id(&records, 999), "999");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" x "));
    }
}
