#![deny(missing_docs)]

//! # Response Mapping
//!
//! Builds the Responses Object from `methodResponses`.

use crate::config::{ContentModels, DefinitionConfig, EventDocumentation, MethodResponse};
use crate::error::AppResult;
use crate::oas::document::{Header, MediaType, Response, Responses};
use crate::oas::merge::merge_typed;
use crate::oas::resolver::body::media_type_for;
use crate::oas::schema::clean_schema;
use indexmap::IndexMap;
use tracing::debug;

/// Maps every method response of a documentation block.
///
/// A status code declared twice merges into the first declaration, later
/// leaf values winning.
pub fn map_responses(
    documentation: &EventDocumentation,
    config: &DefinitionConfig,
) -> AppResult<Responses> {
    let mut responses = Responses::new();
    let Some(method_responses) = &documentation.method_responses else {
        return Ok(responses);
    };

    for declared in method_responses {
        let code = declared.status_code.to_string();
        let response = match responses.get(&code) {
            Some(existing) => merge_typed(existing.clone(), map_response(declared, config))?,
            None => map_response(declared, config),
        };
        responses.insert(code, response);
    }

    Ok(responses)
}

/// Maps one method response.
pub fn map_response(declared: &MethodResponse, config: &DefinitionConfig) -> Response {
    let description = declared
        .response_body
        .as_ref()
        .and_then(|body| body.description.clone())
        .unwrap_or_else(|| format!("Status {} Response", declared.status_code));

    let headers = declared.response_headers.as_ref().map(|declared_headers| {
        declared_headers
            .iter()
            .map(|header| {
                let mapped = Header {
                    description: header
                        .description
                        .clone()
                        .filter(|d| !d.is_empty())
                        .unwrap_or_else(|| format!("{} header", header.name)),
                    schema: header.schema.as_ref().map(clean_schema),
                };
                (header.name.clone(), mapped)
            })
            .collect()
    });

    Response {
        description,
        content: response_content(&declared.response_models, config),
        headers,
    }
}

/// Resolves response models by name; unknown names are dropped.
fn response_content(models: &ContentModels, config: &DefinitionConfig) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    for (content_type, model_name) in models {
        match config.first_model(model_name) {
            Some(model) => {
                content.insert(content_type.clone(), media_type_for(model));
            }
            None => {
                debug!(model = %model_name, %content_type, "Response model not found, omitting content");
            }
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> DefinitionConfig {
        serde_yaml::from_str(
            r#"
models:
  - name: Pet
    schema: {type: object}
    examples: [{id: 1}]
  - name: Error
    schema: {type: object}
"#,
        )
        .unwrap()
    }

    fn responses(yaml: &str) -> Responses {
        let doc: EventDocumentation = serde_yaml::from_str(yaml).unwrap();
        map_responses(&doc, &config()).unwrap()
    }

    #[test]
    fn test_default_description_and_ref() {
        let out = responses(
            r#"
methodResponses:
  - statusCode: 200
    responseModels: {application/json: Pet}
"#,
        );
        let ok = &out["200"];
        assert_eq!(ok.description, "Status 200 Response");
        let media = &ok.content["application/json"];
        assert_eq!(media.schema.reference, "#/components/schemas/Pet");
        assert_eq!(media.examples, Some(vec![json!({"id": 1})]));
        assert!(ok.headers.is_none());
    }

    #[test]
    fn test_dangling_model_dropped() {
        let out = responses(
            r#"
methodResponses:
  - statusCode: 404
    responseBody: {description: Not found}
    responseModels:
      application/json: Missing
      application/problem+json: Error
"#,
        );
        let missing = &out["404"];
        assert_eq!(missing.description, "Not found");
        assert!(!missing.content.contains_key("application/json"));
        assert!(missing.content.contains_key("application/problem+json"));
    }

    #[test]
    fn test_headers_default_description_and_clean_schema() {
        let out = responses(
            r#"
methodResponses:
  - statusCode: 201
    responseHeaders:
      - name: Location
      - name: X-Rate-Limit
        description: Calls left
        schema:
          $schema: http://json-schema.org/draft-07/schema#
          type: integer
"#,
        );
        let headers = out["201"].headers.as_ref().unwrap();
        assert_eq!(headers["Location"].description, "Location header");
        assert!(headers["Location"].schema.is_none());
        assert_eq!(headers["X-Rate-Limit"].description, "Calls left");
        assert_eq!(headers["X-Rate-Limit"].schema, Some(json!({"type": "integer"})));
    }

    #[test]
    fn test_empty_header_description_falls_back_to_name() {
        let out = responses(
            r#"
methodResponses:
  - statusCode: 200
    responseHeaders:
      - {name: ETag, description: ''}
"#,
        );
        let headers = out["200"].headers.as_ref().unwrap();
        assert_eq!(headers["ETag"].description, "ETag header");
    }

    #[test]
    fn test_repeated_status_code_merges() {
        let out = responses(
            r#"
methodResponses:
  - statusCode: 200
    responseModels: {application/json: Pet}
    responseHeaders: [{name: ETag}]
  - statusCode: 400
  - statusCode: '200'
    responseBody: {description: Overridden}
    responseModels: {text/plain: Error}
"#,
        );
        let keys: Vec<_> = out.keys().cloned().collect();
        assert_eq!(keys, ["200", "400"]);

        let ok = &out["200"];
        assert_eq!(ok.description, "Overridden");
        assert!(ok.content.contains_key("application/json"));
        assert!(ok.content.contains_key("text/plain"));
        assert!(ok.headers.as_ref().unwrap().contains_key("ETag"));
    }

    #[test]
    fn test_no_method_responses_yields_empty_map() {
        assert!(responses("summary: nothing").is_empty());
    }
}
