#![deny(missing_docs)]

//! # Parameter Mapping
//!
//! Turns declared path, query, header and cookie parameters into OpenAPI
//! Parameter Objects. Output order is fixed: all path parameters, then query,
//! header, and cookie, each in declaration order.

use crate::config::{EventDocumentation, ParameterDeclaration, ParameterStyle};
use crate::oas::document::{Parameter, ParameterLocation};
use crate::oas::resolver::examples::pick_examples;
use crate::oas::schema::clean_schema;

/// Maps every declared parameter of a documentation block.
pub fn map_parameters(documentation: &EventDocumentation) -> Vec<Parameter> {
    ParameterLocation::ALL
        .iter()
        .filter_map(|&location| {
            documentation
                .params_for(location)
                .map(|block| (location, block))
        })
        .flat_map(|(location, block)| block.iter().map(move |p| map_parameter(p, location)))
        .collect()
}

/// Maps a single declaration at the given location.
pub fn map_parameter(declared: &ParameterDeclaration, location: ParameterLocation) -> Parameter {
    // Path parameters must always be required.
    let required = location == ParameterLocation::Path || declared.required.unwrap_or(false);

    let (allow_empty_value, allow_reserved) = if location == ParameterLocation::Query {
        (
            Some(declared.allow_empty_value.unwrap_or(false)),
            declared.allow_reserved.map(|v| v.unwrap_or(false)),
        )
    } else {
        (None, None)
    };

    let explode = declared.style.map(|style| {
        declared
            .explode
            .unwrap_or(style == ParameterStyle::Form)
    });

    let (example, examples) = pick_examples(declared.example.as_ref(), declared.examples.as_ref());

    Parameter {
        name: declared.name.clone(),
        location,
        description: declared.description.clone().unwrap_or_default(),
        required,
        allow_empty_value,
        allow_reserved,
        deprecated: declared.deprecated,
        style: declared.style.map(|s| s.as_str().to_string()),
        explode,
        schema: declared.schema.as_ref().map(clean_schema),
        example,
        examples,
        content: declared.content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn declaration(yaml: &str) -> ParameterDeclaration {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_path_parameters_always_required() {
        for yaml in ["name: id", "{name: id, required: false}", "{name: id, required: true}"] {
            let param = map_parameter(&declaration(yaml), ParameterLocation::Path);
            assert!(param.required, "path parameter from '{}' not required", yaml);
        }
    }

    #[test]
    fn test_non_path_required_defaults_false() {
        let param = map_parameter(&declaration("name: q"), ParameterLocation::Header);
        assert!(!param.required);
        let param = map_parameter(&declaration("{name: q, required: true}"), ParameterLocation::Cookie);
        assert!(param.required);
    }

    #[test]
    fn test_query_only_flags() {
        let query = map_parameter(&declaration("name: q"), ParameterLocation::Query);
        assert_eq!(query.allow_empty_value, Some(false));
        assert_eq!(query.allow_reserved, None);

        let reserved = map_parameter(
            &declaration("{name: q, allowReserved: null}"),
            ParameterLocation::Query,
        );
        assert_eq!(reserved.allow_reserved, Some(false));

        let header = map_parameter(
            &declaration("{name: q, allowEmptyValue: true, allowReserved: true}"),
            ParameterLocation::Header,
        );
        assert_eq!(header.allow_empty_value, None);
        assert_eq!(header.allow_reserved, None);
    }

    #[test]
    fn test_deprecated_passed_through() {
        let declared = map_parameter(&declaration("{name: q, deprecated: true}"), ParameterLocation::Query);
        assert_eq!(declared.deprecated, Some(true));
        assert_eq!(serde_json::to_value(&declared).unwrap()["deprecated"], json!(true));

        let lifted = map_parameter(&declaration("{name: q, deprecated: false}"), ParameterLocation::Header);
        assert_eq!(lifted.deprecated, Some(false));

        let absent = map_parameter(&declaration("name: q"), ParameterLocation::Query);
        assert_eq!(absent.deprecated, None);
        assert!(serde_json::to_value(&absent).unwrap().get("deprecated").is_none());
    }

    #[test]
    fn test_explode_follows_style() {
        let none = map_parameter(&declaration("name: limit"), ParameterLocation::Query);
        assert_eq!(none.style, None);
        assert_eq!(none.explode, None);

        let form = map_parameter(&declaration("{name: limit, style: form}"), ParameterLocation::Query);
        assert_eq!(form.style.as_deref(), Some("form"));
        assert_eq!(form.explode, Some(true));

        let piped = map_parameter(
            &declaration("{name: limit, style: pipeDelimited}"),
            ParameterLocation::Query,
        );
        assert_eq!(piped.explode, Some(false));

        let declared = map_parameter(
            &declaration("{name: limit, style: form, explode: false}"),
            ParameterLocation::Query,
        );
        assert_eq!(declared.explode, Some(false));
    }

    #[test]
    fn test_schema_cleaned_and_examples_exclusive() {
        let param = map_parameter(
            &declaration(
                r#"
name: id
schema:
  $schema: http://json-schema.org/draft-07/schema#
  type: string
example: abc
examples: [def]
"#,
            ),
            ParameterLocation::Path,
        );
        assert_eq!(param.schema, Some(json!({"type": "string"})));
        assert_eq!(param.example, Some(json!("abc")));
        assert_eq!(param.examples, None);

        let listed = map_parameter(&declaration("{name: id, examples: [1, 2]}"), ParameterLocation::Query);
        assert_eq!(listed.example, None);
        assert_eq!(listed.examples, Some(vec![json!(1), json!(2)]));

        let mapped = map_parameter(
            &declaration("{name: id, examples: {one: {value: 1}}}"),
            ParameterLocation::Query,
        );
        assert_eq!(mapped.examples, None);
    }

    #[test]
    fn test_content_and_description_passthrough() {
        let param = map_parameter(
            &declaration(
                r#"
name: filter
content:
  application/json:
    schema: {type: object}
"#,
            ),
            ParameterLocation::Query,
        );
        assert_eq!(param.description, "");
        assert_eq!(
            param.content,
            Some(json!({"application/json": {"schema": {"type": "object"}}}))
        );
    }

    #[test]
    fn test_location_order() {
        let doc: EventDocumentation = serde_yaml::from_str(
            r#"
cookieParams: [{name: session}]
requestHeaders: [{name: X-Trace}]
queryParams: [{name: limit}, {name: offset}]
pathParams: [{name: petId}]
"#,
        )
        .unwrap();
        let names: Vec<_> = map_parameters(&doc)
            .into_iter()
            .map(|p| (p.location, p.name))
            .collect();
        assert_eq!(
            names,
            vec![
                (ParameterLocation::Path, "petId".to_string()),
                (ParameterLocation::Query, "limit".to_string()),
                (ParameterLocation::Query, "offset".to_string()),
                (ParameterLocation::Header, "X-Trace".to_string()),
                (ParameterLocation::Cookie, "session".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_declarations_yields_empty() {
        assert!(map_parameters(&EventDocumentation::default()).is_empty());
    }
}
