// Local mutation application.
// Applies confirmed create/update/delete deltas to a cached snapshot so
// readers observe a write without waiting for a refetch.

use serde_json::{Map, Value};

use crate::error::{Result, StockroomError};

use super::entry::Entity;

/// Payload with `record` prepended. Newest records list first.
pub fn insert<T: Entity>(payload: &[T], record: T) -> Vec<T> {
    let mut next = Vec::with_capacity(payload.len() + 1);
    next.push(record);
    next.extend_from_slice(payload);
    next
}

/// Payload with `patch` merged over every record whose identity matches `id`.
///
/// Unmatched records and record order are untouched. The patch is a JSON
/// object of replacement fields, as confirmed by the server.
pub fn update<T: Entity>(payload: &[T], id: u64, patch: &Map<String, Value>) -> Result<Vec<T>> {
    payload
        .iter()
        .map(|record| {
            if record.id() == id {
                merge(record, patch)
            } else {
                Ok(record.clone())
            }
        })
        .collect()
}

/// Payload without any record whose identity matches `id`, order preserved.
pub fn remove<T: Entity>(payload: &[T], id: u64) -> Vec<T> {
    payload
        .iter()
        .filter(|record| record.id() != id)
        .cloned()
        .collect()
}

/// Overlay patch fields onto a record through its serialized form.
fn merge<T: Entity>(record: &T, patch: &Map<String, Value>) -> Result<T> {
    let mut value = serde_json::to_value(record)?;
    let Value::Object(fields) = &mut value else {
        return Err(StockroomError::Other(
            "record did not serialize to an object".to_string(),
        ));
    };

    for (key, new_value) in patch {
        fields.insert(key.clone(), new_value.clone());
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        id: u64,
        name: String,
        stock: i64,
    }

    impl Entity for TestRecord {
        fn id(&self) -> u64 {
            self.id
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name]
        }
    }

    fn record(id: u64, name: &str, stock: i64) -> TestRecord {
        TestRecord {
            id,
            name: name.to_string(),
            stock,
        }
    }

    fn patch(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("patch must be an object"),
        }
    }

    #[test]
    fn test_insert_prepends() {
        let payload = vec![record(1, "Hammer", 3)];
        let next = insert(&payload, record(2, "Wrench", 5));

        assert_eq!(next.len(), 2);
        assert_eq!(next[0].id, 2);
        assert_eq!(next[1].id, 1);
    }

    #[test]
    fn test_insert_into_empty_payload() {
        let next = insert(&[], record(1, "Hammer", 3));
        assert_eq!(next, vec![record(1, "Hammer", 3)]);
    }

    #[test]
    fn test_update_patches_only_matching_fields() {
        let payload = vec![record(1, "Hammer", 3), record(2, "Wrench", 5)];
        let next = update(&payload, 2, &patch(json!({ "stock": 9 }))).unwrap();

        // Patched record keeps its unmentioned fields, neighbors untouched.
        assert_eq!(next[0], record(1, "Hammer", 3));
        assert_eq!(next[1], record(2, "Wrench", 9));
    }

    #[test]
    fn test_update_preserves_order() {
        let payload = vec![record(3, "C", 0), record(1, "A", 0), record(2, "B", 0)];
        let next = update(&payload, 1, &patch(json!({ "name": "A2" }))).unwrap();

        let ids: Vec<u64> = next.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(next[1].name, "A2");
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let payload = vec![record(1, "Hammer", 3)];
        let next = update(&payload, 99, &patch(json!({ "stock": 0 }))).unwrap();
        assert_eq!(next, payload);
    }

    #[test]
    fn test_update_rejects_shape_breaking_patch() {
        let payload = vec![record(1, "Hammer", 3)];
        let result = update(&payload, 1, &patch(json!({ "stock": "not a number" })));
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_drops_all_matches_preserving_order() {
        let payload = vec![record(1, "A", 0), record(2, "B", 0), record(1, "A2", 0)];
        let next = remove(&payload, 1);

        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, 2);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let payload = vec![record(1, "A", 0)];
        assert_eq!(remove(&payload, 42), payload);
    }
}
