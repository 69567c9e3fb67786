//! Example selection shared by parameters and media types.

use serde_json::Value as JsonValue;

/// Chooses between a single `example` and an `examples` list.
///
/// `example` wins when present; `examples` is only used when it is a sequence.
/// At most one side of the returned pair is `Some`.
pub fn pick_examples(
    example: Option<&JsonValue>,
    examples: Option<&JsonValue>,
) -> (Option<JsonValue>, Option<Vec<JsonValue>>) {
    if let Some(example) = example {
        return (Some(example.clone()), None);
    }
    match examples {
        Some(JsonValue::Array(items)) => (None, Some(items.clone())),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_example_takes_precedence() {
        let (one, many) = pick_examples(Some(&json!({"id": 1})), Some(&json!([{"id": 2}])));
        assert_eq!(one, Some(json!({"id": 1})));
        assert!(many.is_none());
    }

    #[test]
    fn test_falsy_example_still_counts() {
        let (one, _) = pick_examples(Some(&json!(0)), None);
        assert_eq!(one, Some(json!(0)));
    }

    #[test]
    fn test_non_sequence_examples_ignored() {
        assert_eq!(pick_examples(None, Some(&json!({"a": 1}))), (None, None));
        assert_eq!(pick_examples(None, None), (None, None));
    }
}
