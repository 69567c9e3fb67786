#![deny(missing_docs)]

//! # Request Body Building
//!
//! Builds the Request Body Object from `requestModels`. Schemas are never
//! inlined; each content type points at `#/components/schemas/<model>`.

use crate::config::{DefinitionConfig, EventDocumentation, Model};
use crate::error::{AppError, AppResult};
use crate::oas::document::{MediaType, RequestBody, SchemaRef};
use crate::oas::resolver::examples::pick_examples;
use indexmap::IndexMap;
use tracing::warn;

/// Builds the request body of one event.
///
/// Returns `Ok(None)` when the event declares no request body at all (an
/// empty `requestBody: {}` counts as none), and `MissingRequestModels` when it
/// documents a `requestBody` without any `requestModels`.
pub fn build_request_body(
    function: &str,
    documentation: &EventDocumentation,
    config: &DefinitionConfig,
) -> AppResult<Option<RequestBody>> {
    let Some(request_models) = &documentation.request_models else {
        if documentation
            .request_body
            .as_ref()
            .is_some_and(|body| !body.is_empty())
        {
            return Err(missing_request_models(function, documentation));
        }
        return Ok(None);
    };

    let mut content = IndexMap::new();
    for (content_type, model_name) in request_models {
        // Later declarations of the same name shadow earlier ones.
        let Some(model) = config.last_model(model_name) else {
            warn!(function, model = %model_name, %content_type, "Request model not found, skipping");
            continue;
        };
        content.insert(content_type.clone(), media_type_for(model));
    }

    let description = documentation
        .request_body
        .as_ref()
        .and_then(|body| body.description.clone());

    Ok(Some(RequestBody {
        description,
        content,
    }))
}

/// The `$ref` media type of a model, with its example data attached.
pub fn media_type_for(model: &Model) -> MediaType {
    let (example, examples) = pick_examples(model.example.as_ref(), model.examples.as_ref());
    MediaType {
        schema: SchemaRef::model(&model.name),
        example,
        examples,
    }
}

fn missing_request_models(function: &str, documentation: &EventDocumentation) -> AppError {
    let documentation = serde_json::to_string_pretty(documentation)
        .unwrap_or_else(|e| format!("<unprintable documentation: {}>", e));
    AppError::MissingRequestModels {
        function: function.to_string(),
        documentation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> DefinitionConfig {
        serde_yaml::from_str(
            r#"
models:
  - name: NewPet
    schema: {type: object}
    example: {name: first}
  - name: NewPet
    schema: {type: object}
    example: {name: second}
  - name: Upload
    schema: {type: string}
    examples: [a, b]
"#,
        )
        .unwrap()
    }

    fn doc(yaml: &str) -> EventDocumentation {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_builds_ref_content_with_last_model_example() {
        let body = build_request_body(
            "createPet",
            &doc("requestModels: {application/json: NewPet}"),
            &config(),
        )
        .unwrap()
        .unwrap();

        let media = &body.content["application/json"];
        assert_eq!(media.schema.reference, "#/components/schemas/NewPet");
        assert_eq!(media.example, Some(json!({"name": "second"})));
        assert!(body.description.is_none());
    }

    #[test]
    fn test_description_attached_to_body() {
        let body = build_request_body(
            "upload",
            &doc(
                r#"
requestBody: {description: The file}
requestModels:
  application/octet-stream: Upload
  application/json: NewPet
"#,
            ),
            &config(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(body.description.as_deref(), Some("The file"));
        let keys: Vec<_> = body.content.keys().cloned().collect();
        assert_eq!(keys, ["application/octet-stream", "application/json"]);
        assert_eq!(
            body.content["application/octet-stream"].examples,
            Some(vec![json!("a"), json!("b")])
        );
    }

    #[test]
    fn test_unknown_request_model_skipped() {
        let body = build_request_body(
            "createPet",
            &doc("requestModels: {application/json: Ghost}"),
            &config(),
        )
        .unwrap()
        .unwrap();
        assert!(body.content.is_empty());
    }

    #[test]
    fn test_body_intent_without_models_fails() {
        let err = build_request_body(
            "createPet",
            &doc("requestBody: {description: A pet}"),
            &config(),
        )
        .unwrap_err();
        match err {
            AppError::MissingRequestModels {
                function,
                documentation,
            } => {
                assert_eq!(function, "createPet");
                assert!(documentation.contains("A pet"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_no_body_intent_is_not_an_error() {
        let body = build_request_body("listPets", &doc("summary: List"), &config()).unwrap();
        assert!(body.is_none());
    }

    #[test]
    fn test_empty_request_body_is_not_intent() {
        let body = build_request_body(
            "ping",
            &doc("{summary: Ping, requestBody: {}}"),
            &config(),
        )
        .unwrap();
        assert!(body.is_none());
    }
}
