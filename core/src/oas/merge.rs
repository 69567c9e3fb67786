#![deny(missing_docs)]

//! # Document Merging
//!
//! A total, explicit deep merge used where two fragments land on the same key
//! (a repeated status code, two events on one path and method).
//!
//! Precedence:
//! - objects merge key by key, recursively;
//! - every other pairing (scalars, sequences, mismatched types) is replaced
//!   wholesale by the later value. Sequences are never concatenated.

use crate::error::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Merges `patch` into `base` in place; later leaves win.
pub fn merge_values(base: &mut JsonValue, patch: JsonValue) {
    match (base, patch) {
        (JsonValue::Object(base_map), JsonValue::Object(patch_map)) => {
            for (key, value) in patch_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, patch) => *slot = patch,
    }
}

/// Merges two typed fragments through their JSON form.
pub fn merge_typed<T>(base: T, patch: T) -> AppResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(base)
        .map_err(|e| AppError::General(format!("Failed to serialize merge base: {}", e)))?;
    let patch = serde_json::to_value(patch)
        .map_err(|e| AppError::General(format!("Failed to serialize merge patch: {}", e)))?;
    merge_values(&mut merged, patch);
    serde_json::from_value(merged)
        .map_err(|e| AppError::General(format!("Merged fragment is malformed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::{Header, Response};
    use indexmap::IndexMap;
    use serde_json::json;

    #[test]
    fn test_nested_objects_merge() {
        let mut base = json!({"a": {"x": 1, "y": 2}, "b": "keep"});
        merge_values(&mut base, json!({"a": {"y": 3, "z": 4}}));
        assert_eq!(base, json!({"a": {"x": 1, "y": 3, "z": 4}, "b": "keep"}));
    }

    #[test]
    fn test_sequences_replaced() {
        let mut base = json!({"tags": ["a", "b", "c"]});
        merge_values(&mut base, json!({"tags": ["d"]}));
        assert_eq!(base, json!({"tags": ["d"]}));
    }

    #[test]
    fn test_type_mismatch_replaced() {
        let mut base = json!({"v": {"nested": true}});
        merge_values(&mut base, json!({"v": 7}));
        assert_eq!(base, json!({"v": 7}));

        let mut base = json!({"v": 7});
        merge_values(&mut base, json!({"v": {"nested": true}}));
        assert_eq!(base, json!({"v": {"nested": true}}));
    }

    #[test]
    fn test_merge_typed_responses() {
        let mut headers = IndexMap::new();
        headers.insert(
            "X-Rate".to_string(),
            Header {
                description: "X-Rate header".into(),
                schema: None,
            },
        );
        let first = Response {
            description: "first".into(),
            content: IndexMap::new(),
            headers: Some(headers),
        };
        let second = Response {
            description: "second".into(),
            content: IndexMap::new(),
            headers: None,
        };

        let merged = merge_typed(first, second).unwrap();
        assert_eq!(merged.description, "second");
        assert!(merged.headers.unwrap().contains_key("X-Rate"));
    }
}
