#![deny(missing_docs)]

//! # OpenAPI Validation
//!
//! Structural checks of an assembled document against the OpenAPI 3.0
//! specification. Validation is advisory: it never mutates the document and
//! never fails generation, it only reports.
//!
//! Checks include:
//! - Root `openapi`, `info`, `servers` and `paths` shape.
//! - Path templates and their path parameters agree.
//! - Unique `operationId`s and at least one response per operation.
//! - Parameter location rules (`required` on path, `style` per location, `schema` xor `content`).
//! - `example`/`examples` exclusivity and `examples` being a map.
//! - Security requirements naming declared schemes.
//! - Schema Objects in components, parameters, headers and media types.
//! - Every internal `$ref` resolving inside the document.

use crate::oas::document::Definition;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::{HashMap, HashSet};
use std::fmt;

const OPENAPI_VERSION_PATTERN: &str = r"^3\.0\.\d+(-.+)?$";
const COMPONENT_KEY_PATTERN: &str = r"^[a-zA-Z0-9._-]+$";
const RESPONSE_CODE_PATTERN: &str = r"^([1-5](\d{2}|XX)|default)$";
const PATH_TEMPLATE_PATTERN: &str = r"\{([^}/]+)\}";

const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];
const PATH_ITEM_FIELDS: [&str; 5] = ["$ref", "summary", "description", "servers", "parameters"];
const SCHEMA_TYPES: [&str; 6] = ["array", "boolean", "integer", "number", "object", "string"];
const SCHEMA_COMBINATORS: [&str; 3] = ["allOf", "oneOf", "anyOf"];
const SCHEMA_BOOLEANS: [&str; 7] = [
    "nullable",
    "readOnly",
    "writeOnly",
    "deprecated",
    "uniqueItems",
    "exclusiveMinimum",
    "exclusiveMaximum",
];
const SCHEMA_NUMBERS: [&str; 3] = ["minimum", "maximum", "multipleOf"];
const SCHEMA_COUNTS: [&str; 6] = [
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "minProperties",
    "maxProperties",
];
const SCHEMA_STRINGS: [&str; 4] = ["title", "description", "format", "pattern"];

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// True when no problems were found.
    pub valid: bool,
    /// Locations (JSON pointer fragments) where problems were found.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    /// What went wrong.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

/// The error part of a failed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidationError {
    /// The document could not be checked at all.
    Message(String),
    /// One entry per structural problem.
    Diagnostics(Vec<Diagnostic>),
}

/// A single structural problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Location in the document, e.g. `#/paths/~1pets/get`.
    pub data_path: String,
    /// Location of the violated rule in the OpenAPI 3.0 meta-schema.
    pub schema_path: String,
    /// Human-readable explanation.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.data_path, self.message, self.schema_path)
    }
}

impl ValidationReport {
    fn passed() -> Self {
        Self {
            valid: true,
            context: Vec::new(),
            error: None,
        }
    }

    fn message(message: String) -> Self {
        Self {
            valid: false,
            context: vec!["#".to_string()],
            error: Some(ValidationError::Message(message)),
        }
    }

    fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            return Self::passed();
        }
        let mut context: Vec<String> = Vec::new();
        for diagnostic in &diagnostics {
            if !context.contains(&diagnostic.data_path) {
                context.push(diagnostic.data_path.clone());
            }
        }
        Self {
            valid: false,
            context,
            error: Some(ValidationError::Diagnostics(diagnostics)),
        }
    }

    /// The diagnostics, if the report carries any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.error {
            Some(ValidationError::Diagnostics(list)) => list,
            _ => &[],
        }
    }
}

/// Validates an assembled definition.
pub fn validate_definition(definition: &Definition) -> ValidationReport {
    match serde_json::to_value(definition) {
        Ok(document) => validate_document(&document),
        Err(e) => ValidationReport::message(format!("Failed to serialize definition: {}", e)),
    }
}

/// Validates a document already in JSON form.
pub fn validate_document(document: &JsonValue) -> ValidationReport {
    let patterns = match Patterns::new() {
        Ok(p) => p,
        Err(e) => return ValidationReport::message(format!("Invalid validation pattern: {}", e)),
    };
    let mut checker = Checker {
        document,
        patterns,
        diagnostics: Vec::new(),
        operation_ids: HashMap::new(),
    };
    checker.check_root();
    ValidationReport::from_diagnostics(checker.diagnostics)
}

struct Patterns {
    version: Regex,
    component_key: Regex,
    response_code: Regex,
    path_template: Regex,
}

impl Patterns {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            version: Regex::new(OPENAPI_VERSION_PATTERN)?,
            component_key: Regex::new(COMPONENT_KEY_PATTERN)?,
            response_code: Regex::new(RESPONSE_CODE_PATTERN)?,
            path_template: Regex::new(PATH_TEMPLATE_PATTERN)?,
        })
    }
}

struct Checker<'a> {
    document: &'a JsonValue,
    patterns: Patterns,
    diagnostics: Vec<Diagnostic>,
    operation_ids: HashMap<String, String>,
}

impl<'a> Checker<'a> {
    fn report(&mut self, data_path: &str, schema_path: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            data_path: data_path.to_string(),
            schema_path: schema_path.to_string(),
            message: message.into(),
        });
    }

    fn check_root(&mut self) {
        let document = self.document;
        let Some(root) = document.as_object() else {
            self.report("#", "#/type", "document must be an object");
            return;
        };

        match root.get("openapi").and_then(JsonValue::as_str) {
            Some(v) if self.patterns.version.is_match(v) => {}
            Some(v) => self.report(
                "#/openapi",
                "#/properties/openapi/pattern",
                format!("'{}' is not an OpenAPI 3.0.x version", v),
            ),
            None => self.report("#", "#/required", "missing required property 'openapi'"),
        }

        match root.get("info").and_then(JsonValue::as_object) {
            Some(info) => self.check_info(info),
            None => self.report("#", "#/required", "missing required property 'info'"),
        }

        if let Some(servers) = root.get("servers") {
            self.check_servers("#/servers", servers);
        }

        if let Some(components) = root.get("components").and_then(JsonValue::as_object) {
            self.check_components(components);
        }

        if let Some(security) = root.get("security") {
            self.check_security_list("#/security", security);
        }

        match root.get("paths").and_then(JsonValue::as_object) {
            Some(paths) => self.check_paths(paths),
            None => self.report("#", "#/required", "missing required property 'paths'"),
        }

        self.check_references("#", document);
    }

    fn check_info(&mut self, info: &Map<String, JsonValue>) {
        for field in ["title", "version"] {
            if !info.get(field).is_some_and(JsonValue::is_string) {
                self.report(
                    "#/info",
                    "#/definitions/Info/required",
                    format!("info.{} must be a string", field),
                );
            }
        }
    }

    fn check_servers(&mut self, ptr: &str, servers: &JsonValue) {
        let Some(list) = servers.as_array() else {
            self.report(ptr, "#/properties/servers/type", "servers must be an array");
            return;
        };
        for (i, server) in list.iter().enumerate() {
            let server_ptr = child(ptr, &i.to_string());
            if !server.get("url").is_some_and(JsonValue::is_string) {
                self.report(&server_ptr, "#/definitions/Server/required", "server must have a 'url'");
            }
            let Some(variables) = server.get("variables").and_then(JsonValue::as_object) else {
                continue;
            };
            for (name, variable) in variables {
                let var_ptr = child(&child(&server_ptr, "variables"), name);
                if !variable.get("default").is_some_and(JsonValue::is_string) {
                    self.report(
                        &var_ptr,
                        "#/definitions/ServerVariable/required",
                        format!("server variable '{}' must have a string 'default'", name),
                    );
                }
                if let Some(values) = variable.get("enum") {
                    if values.as_array().map_or(true, Vec::is_empty) {
                        self.report(
                            &var_ptr,
                            "#/definitions/ServerVariable/properties/enum/minItems",
                            format!("server variable '{}' has an empty enum", name),
                        );
                    }
                }
            }
        }
    }

    fn check_components(&mut self, components: &Map<String, JsonValue>) {
        if let Some(schemas) = components.get("schemas").and_then(JsonValue::as_object) {
            for (key, schema) in schemas {
                let schema_ptr = child("#/components/schemas", key);
                if !self.patterns.component_key.is_match(key) {
                    self.report(
                        &schema_ptr,
                        "#/definitions/Components/properties/schemas/patternProperties",
                        format!("component name '{}' contains invalid characters", key),
                    );
                }
                self.check_schema(&schema_ptr, schema);
            }
        }

        if let Some(schemes) = components.get("securitySchemes").and_then(JsonValue::as_object) {
            for (name, scheme) in schemes {
                self.check_security_scheme(&child("#/components/securitySchemes", name), scheme);
            }
        }
    }

    fn check_security_scheme(&mut self, ptr: &str, scheme: &JsonValue) {
        let required: &[&str] = match scheme.get("type").and_then(JsonValue::as_str) {
            Some("apiKey") => {
                let location = scheme.get("in").and_then(JsonValue::as_str);
                if !matches!(location, Some("query" | "header" | "cookie")) {
                    self.report(
                        ptr,
                        "#/definitions/APIKeySecurityScheme/properties/in/enum",
                        "apiKey scheme 'in' must be query, header or cookie",
                    );
                }
                &["name"]
            }
            Some("http") => &["scheme"],
            Some("oauth2") => &["flows"],
            Some("openIdConnect") => &["openIdConnectUrl"],
            Some(other) => {
                self.report(
                    ptr,
                    "#/definitions/SecurityScheme/oneOf",
                    format!("security scheme type '{}' is not supported by OpenAPI 3.0", other),
                );
                return;
            }
            None => {
                self.report(ptr, "#/definitions/SecurityScheme/oneOf", "security scheme has no 'type'");
                return;
            }
        };
        for field in required {
            if scheme.get(*field).is_none() {
                self.report(
                    ptr,
                    "#/definitions/SecurityScheme/oneOf",
                    format!("security scheme is missing required '{}'", field),
                );
            }
        }
    }

    fn check_security_list(&mut self, ptr: &str, security: &JsonValue) {
        let Some(list) = security.as_array() else {
            self.report(ptr, "#/properties/security/type", "security must be an array");
            return;
        };
        let document = self.document;
        let declared: HashSet<&str> = document
            .pointer("/components/securitySchemes")
            .and_then(JsonValue::as_object)
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();

        for (i, requirement) in list.iter().enumerate() {
            let req_ptr = child(ptr, &i.to_string());
            let Some(requirement) = requirement.as_object() else {
                self.report(
                    &req_ptr,
                    "#/definitions/SecurityRequirement/type",
                    "security requirement must be an object",
                );
                continue;
            };
            for (name, scopes) in requirement {
                let entry_ptr = child(&req_ptr, name);
                if !declared.contains(name.as_str()) {
                    self.report(
                        &entry_ptr,
                        "#/definitions/SecurityRequirement",
                        format!(
                            "security scheme '{}' is not declared in components.securitySchemes",
                            name
                        ),
                    );
                }
                let all_strings = scopes
                    .as_array()
                    .is_some_and(|items| items.iter().all(JsonValue::is_string));
                if !all_strings {
                    self.report(
                        &entry_ptr,
                        "#/definitions/SecurityRequirement/additionalProperties/type",
                        format!("scopes of '{}' must be an array of strings", name),
                    );
                }
            }
        }
    }

    fn check_paths(&mut self, paths: &Map<String, JsonValue>) {
        for (template, item) in paths {
            let ptr = child("#/paths", template);
            if !template.starts_with('/') {
                self.report(
                    &ptr,
                    "#/definitions/Paths/patternProperties",
                    format!("path '{}' must begin with '/'", template),
                );
            }
            let Some(item) = item.as_object() else {
                self.report(&ptr, "#/definitions/PathItem/type", "path item must be an object");
                continue;
            };
            for (key, value) in item {
                if HTTP_METHODS.contains(&key.as_str()) {
                    self.check_operation(&child(&ptr, key), template, value);
                } else if !PATH_ITEM_FIELDS.contains(&key.as_str()) && !key.starts_with("x-") {
                    self.report(
                        &child(&ptr, key),
                        "#/definitions/PathItem/additionalProperties",
                        format!("'{}' is not a valid HTTP method or path item field", key),
                    );
                }
            }
        }
    }

    fn check_operation(&mut self, ptr: &str, template: &str, operation: &JsonValue) {
        let Some(operation) = operation.as_object() else {
            self.report(ptr, "#/definitions/Operation/type", "operation must be an object");
            return;
        };

        if let Some(id) = operation.get("operationId").and_then(JsonValue::as_str) {
            if let Some(previous) = self.operation_ids.insert(id.to_string(), ptr.to_string()) {
                self.report(
                    &child(ptr, "operationId"),
                    "#/definitions/Operation/properties/operationId",
                    format!("duplicate operationId '{}' (also at {})", id, previous),
                );
            }
        }

        match operation.get("responses").and_then(JsonValue::as_object) {
            Some(responses) if !responses.is_empty() => {
                for (code, response) in responses {
                    let response_ptr = child(&child(ptr, "responses"), code);
                    if !self.patterns.response_code.is_match(code) {
                        self.report(
                            &response_ptr,
                            "#/definitions/Responses/patternProperties",
                            format!("'{}' is not a valid response code", code),
                        );
                    }
                    self.check_response(&response_ptr, response);
                }
            }
            Some(_) => self.report(
                &child(ptr, "responses"),
                "#/definitions/Responses/minProperties",
                "operation must declare at least one response",
            ),
            None => self.report(
                ptr,
                "#/definitions/Operation/required",
                "operation is missing 'responses'",
            ),
        }

        let mut path_params = Vec::new();
        if let Some(parameters) = operation.get("parameters").and_then(JsonValue::as_array) {
            let params_ptr = child(ptr, "parameters");
            let mut seen = HashSet::new();
            for (i, parameter) in parameters.iter().enumerate() {
                let param_ptr = child(&params_ptr, &i.to_string());
                let name = parameter.get("name").and_then(JsonValue::as_str).unwrap_or_default();
                let location = parameter.get("in").and_then(JsonValue::as_str).unwrap_or_default();
                if !seen.insert((name, location)) {
                    self.report(
                        &param_ptr,
                        "#/definitions/Operation/properties/parameters",
                        format!("duplicate parameter '{}' in {}", name, location),
                    );
                }
                if location == "path" {
                    path_params.push((name, param_ptr.clone()));
                }
                self.check_parameter(&param_ptr, parameter);
            }
        }
        self.check_path_template(ptr, template, &path_params);

        if let Some(body) = operation.get("requestBody") {
            let body_ptr = child(ptr, "requestBody");
            match body.get("content").and_then(JsonValue::as_object) {
                Some(content) => self.check_content(&child(&body_ptr, "content"), content),
                None => self.report(
                    &body_ptr,
                    "#/definitions/RequestBody/required",
                    "request body is missing 'content'",
                ),
            }
        }

        if let Some(security) = operation.get("security") {
            self.check_security_list(&child(ptr, "security"), security);
        }
    }

    fn check_path_template(&mut self, ptr: &str, template: &str, path_params: &[(&str, String)]) {
        let templated: Vec<String> = self
            .patterns
            .path_template
            .captures_iter(template)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect();

        for name in &templated {
            if !path_params.iter().any(|(declared, _)| declared == name) {
                self.report(
                    &child(ptr, "parameters"),
                    "#/definitions/PathItem/properties/parameters",
                    format!("templated parameter '{}' is not declared as a path parameter", name),
                );
            }
        }
        for (name, param_ptr) in path_params {
            if !templated.iter().any(|t| t == name) {
                self.report(
                    param_ptr,
                    "#/definitions/PathParameter",
                    format!("path parameter '{}' does not appear in '{}'", name, template),
                );
            }
        }
    }

    fn check_parameter(&mut self, ptr: &str, parameter: &JsonValue) {
        if !parameter.get("name").is_some_and(JsonValue::is_string) {
            self.report(ptr, "#/definitions/Parameter/required", "parameter must have a 'name'");
        }

        let location = parameter.get("in").and_then(JsonValue::as_str);
        let (definition, styles): (&str, &[&str]) = match location {
            Some("path") => ("#/definitions/PathParameter", &["matrix", "label", "simple"]),
            Some("query") => (
                "#/definitions/QueryParameter",
                &["form", "spaceDelimited", "pipeDelimited", "deepObject"],
            ),
            Some("header") => ("#/definitions/HeaderParameter", &["simple"]),
            Some("cookie") => ("#/definitions/CookieParameter", &["form"]),
            _ => {
                self.report(
                    ptr,
                    "#/definitions/Parameter/properties/in/enum",
                    "parameter 'in' must be path, query, header or cookie",
                );
                return;
            }
        };

        if location == Some("path") && parameter.get("required") != Some(&JsonValue::Bool(true)) {
            self.report(
                ptr,
                "#/definitions/PathParameter/properties/required/enum",
                "path parameters must be required",
            );
        }

        if let Some(style) = parameter.get("style").and_then(JsonValue::as_str) {
            if !styles.contains(&style) {
                self.report(
                    &child(ptr, "style"),
                    &format!("{}/properties/style/enum", definition),
                    format!("style '{}' is not allowed for this location", style),
                );
            }
        }

        if location != Some("query") {
            for field in ["allowEmptyValue", "allowReserved"] {
                if parameter.get(field).is_some() {
                    self.report(
                        &child(ptr, field),
                        "#/definitions/Parameter/properties",
                        format!("'{}' is only valid for query parameters", field),
                    );
                }
            }
        }

        if let Some(schema) = parameter.get("schema") {
            self.check_schema(&child(ptr, "schema"), schema);
        }
        let has_schema = parameter.get("schema").is_some();
        match parameter.get("content") {
            Some(_) if has_schema => self.report(
                ptr,
                "#/definitions/Parameter/oneOf",
                "parameter must not define both 'schema' and 'content'",
            ),
            Some(content) => {
                if content.as_object().map_or(true, |m| m.len() != 1) {
                    self.report(
                        &child(ptr, "content"),
                        "#/definitions/Parameter/properties/content/maxProperties",
                        "parameter content must contain exactly one media type",
                    );
                }
            }
            None if !has_schema => self.report(
                ptr,
                "#/definitions/Parameter/oneOf",
                "parameter must define either 'schema' or 'content'",
            ),
            None => {}
        }

        self.check_examples(ptr, parameter, "#/definitions/Parameter");
    }

    fn check_examples(&mut self, ptr: &str, holder: &JsonValue, definition: &str) {
        let examples = holder.get("examples");
        if holder.get("example").is_some() && examples.is_some() {
            self.report(
                ptr,
                &format!("{}/oneOf", definition),
                "'example' and 'examples' are mutually exclusive",
            );
        }
        if let Some(examples) = examples {
            if !examples.is_object() {
                self.report(
                    &child(ptr, "examples"),
                    &format!("{}/properties/examples/type", definition),
                    "'examples' must be a map of Example Objects",
                );
            }
        }
    }

    fn check_response(&mut self, ptr: &str, response: &JsonValue) {
        if !response.get("description").is_some_and(JsonValue::is_string) {
            self.report(ptr, "#/definitions/Response/required", "response must have a 'description'");
        }
        if let Some(content) = response.get("content").and_then(JsonValue::as_object) {
            self.check_content(&child(ptr, "content"), content);
        }
        if let Some(headers) = response.get("headers").and_then(JsonValue::as_object) {
            for (name, header) in headers {
                let header_ptr = child(&child(ptr, "headers"), name);
                if let Some(schema) = header.get("schema") {
                    self.check_schema(&child(&header_ptr, "schema"), schema);
                }
                let has_schema = header.get("schema").is_some();
                let has_content = header.get("content").is_some();
                if has_schema == has_content {
                    self.report(
                        &header_ptr,
                        "#/definitions/Header/oneOf",
                        format!("header '{}' must define exactly one of 'schema' or 'content'", name),
                    );
                }
            }
        }
    }

    fn check_content(&mut self, ptr: &str, content: &Map<String, JsonValue>) {
        for (media_type, media) in content {
            let media_ptr = child(ptr, media_type);
            if let Some(schema) = media.get("schema") {
                self.check_schema(&child(&media_ptr, "schema"), schema);
            }
            self.check_examples(&media_ptr, media, "#/definitions/MediaType");
        }
    }

    /// Schema Object rules of OpenAPI 3.0, which differ from plain JSON-Schema
    /// (single string `type`, no `null` type, `items` required on arrays).
    fn check_schema(&mut self, ptr: &str, schema: &JsonValue) {
        let Some(map) = schema.as_object() else {
            self.report(ptr, "#/definitions/Schema/type", "schema must be an object");
            return;
        };
        // Reference Objects are checked by the `$ref` pass.
        if map.contains_key("$ref") {
            return;
        }

        if let Some(ty) = map.get("type") {
            if !ty.as_str().is_some_and(|t| SCHEMA_TYPES.contains(&t)) {
                self.report(
                    &child(ptr, "type"),
                    "#/definitions/Schema/properties/type/enum",
                    format!("{} is not a valid schema type", ty),
                );
            }
        }

        if let Some(required) = map.get("required") {
            let valid = required
                .as_array()
                .is_some_and(|items| !items.is_empty() && items.iter().all(JsonValue::is_string));
            if !valid {
                self.report(
                    &child(ptr, "required"),
                    "#/definitions/Schema/properties/required/minItems",
                    "'required' must be a non-empty array of strings",
                );
            }
        }

        if let Some(values) = map.get("enum") {
            if values.as_array().map_or(true, Vec::is_empty) {
                self.report(
                    &child(ptr, "enum"),
                    "#/definitions/Schema/properties/enum/minItems",
                    "'enum' must be a non-empty array",
                );
            }
        }

        match map.get("properties") {
            Some(JsonValue::Object(properties)) => {
                let properties_ptr = child(ptr, "properties");
                for (name, property) in properties {
                    self.check_schema(&child(&properties_ptr, name), property);
                }
            }
            Some(_) => self.report(
                &child(ptr, "properties"),
                "#/definitions/Schema/properties/properties/type",
                "'properties' must be a map of schemas",
            ),
            None => {}
        }

        match map.get("additionalProperties") {
            None | Some(JsonValue::Bool(_)) => {}
            Some(additional) => self.check_schema(&child(ptr, "additionalProperties"), additional),
        }

        match map.get("items") {
            Some(items) => self.check_schema(&child(ptr, "items"), items),
            None if map.get("type").and_then(JsonValue::as_str) == Some("array") => self.report(
                ptr,
                "#/definitions/Schema/properties/items",
                "array schemas must define 'items'",
            ),
            None => {}
        }

        if let Some(not) = map.get("not") {
            self.check_schema(&child(ptr, "not"), not);
        }

        for key in SCHEMA_COMBINATORS {
            match map.get(key) {
                Some(JsonValue::Array(list)) if !list.is_empty() => {
                    let list_ptr = child(ptr, key);
                    for (i, sub) in list.iter().enumerate() {
                        self.check_schema(&child(&list_ptr, &i.to_string()), sub);
                    }
                }
                Some(_) => self.report(
                    &child(ptr, key),
                    &format!("#/definitions/Schema/properties/{}/minItems", key),
                    format!("'{}' must be a non-empty array of schemas", key),
                ),
                None => {}
            }
        }

        for key in SCHEMA_BOOLEANS {
            if map.get(key).is_some_and(|v| !v.is_boolean()) {
                self.report(
                    &child(ptr, key),
                    &format!("#/definitions/Schema/properties/{}/type", key),
                    format!("'{}' must be a boolean", key),
                );
            }
        }
        for key in SCHEMA_NUMBERS {
            if map.get(key).is_some_and(|v| !v.is_number()) {
                self.report(
                    &child(ptr, key),
                    &format!("#/definitions/Schema/properties/{}/type", key),
                    format!("'{}' must be a number", key),
                );
            }
        }
        for key in SCHEMA_COUNTS {
            if map.get(key).is_some_and(|v| v.as_u64().is_none()) {
                self.report(
                    &child(ptr, key),
                    &format!("#/definitions/Schema/properties/{}/minimum", key),
                    format!("'{}' must be a non-negative integer", key),
                );
            }
        }
        for key in SCHEMA_STRINGS {
            if map.get(key).is_some_and(|v| !v.is_string()) {
                self.report(
                    &child(ptr, key),
                    &format!("#/definitions/Schema/properties/{}/type", key),
                    format!("'{}' must be a string", key),
                );
            }
        }
    }

    fn check_references(&mut self, ptr: &str, value: &JsonValue) {
        match value {
            JsonValue::Object(map) => {
                if let Some(JsonValue::String(reference)) = map.get("$ref") {
                    if let Some(pointer) = reference.strip_prefix('#') {
                        if pointer.starts_with('/') && self.document.pointer(pointer).is_none() {
                            self.report(
                                ptr,
                                "#/definitions/Reference",
                                format!("unresolved reference '{}'", reference),
                            );
                        }
                    }
                }
                for (key, child_value) in map {
                    self.check_references(&child(ptr, key), child_value);
                }
            }
            JsonValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.check_references(&child(ptr, &i.to_string()), item);
                }
            }
            _ => {}
        }
    }
}

/// Appends an escaped JSON pointer segment.
fn child(ptr: &str, segment: &str) -> String {
    format!("{}/{}", ptr, segment.replace('~', "~0").replace('/', "~1"))
}
