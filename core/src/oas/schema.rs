//! Schema cleaning shared by models, parameters and headers.

use serde_json::Value as JsonValue;

/// Authoring metadata that must not leak into `components.schemas`.
const STRIPPED_KEYS: [&str; 2] = ["$schema", "definitions"];

/// Returns the schema without its top-level `$schema` and `definitions` keys.
pub fn clean_schema(schema: &JsonValue) -> JsonValue {
    match schema {
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .filter(|(k, _)| !STRIPPED_KEYS.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
