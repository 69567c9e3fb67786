#![deny(missing_docs)]

//! # Configuration Boundary
//!
//! Typed input structures for one generation run. Everything the core reads is
//! deserialized into these closed shapes first, so the builders never search
//! loosely-shaped maps for fields.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::openapi::security::SecurityScheme;
use utoipa::openapi::server::Server;

use crate::oas::document::{ParameterLocation, SecurityRequirement};

/// Content type (e.g. `application/json`) mapped to a model name.
pub type ContentModels = IndexMap<String, String>;

/// Top-level documentation settings (`custom.documentation` in a service manifest).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionConfig {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API description.
    #[serde(default)]
    pub description: String,
    /// API version. A random UUID is used when unset.
    #[serde(default)]
    pub version: Option<String>,
    /// Named, reusable models.
    #[serde(default)]
    pub models: Vec<Model>,
    /// Global security requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirementConfig>>,
    /// Security scheme definitions keyed by scheme name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<IndexMap<String, SecurityScheme>>,
    /// Server list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
}

impl DefinitionConfig {
    /// First model with the given name.
    pub fn first_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Last model with the given name (later declarations shadow earlier ones).
    pub fn last_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().rev().find(|m| m.name == name)
    }

    /// First global security requirement bound to the given authorizer.
    pub fn security_for_authorizer(&self, authorizer: &str) -> Option<&SecurityRequirementConfig> {
        self.security
            .as_ref()?
            .iter()
            .find(|s| s.authorizer_name.as_deref() == Some(authorizer))
    }
}

/// A named model: a schema plus optional example data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique model name, used as the `components.schemas` key.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Preferred content type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Inline schema or schema file reference.
    pub schema: ModelSchema,
    /// Single example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<JsonValue>,
    /// Example list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<JsonValue>,
}

/// Where a model's JSON-Schema comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelSchema {
    /// Path to a JSON or YAML schema file, relative to the resolution root.
    File(String),
    /// Schema given inline.
    Inline(JsonValue),
}

/// A global security requirement, optionally bound to a named authorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRequirementConfig {
    /// Authorizer this requirement applies to. Lookup key only, never emitted.
    #[serde(
        rename = "authorizerName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub authorizer_name: Option<String>,
    /// Scheme name to required scopes.
    #[serde(flatten)]
    pub schemes: IndexMap<String, Vec<String>>,
}

impl SecurityRequirementConfig {
    /// The OpenAPI requirement object, without the authorizer binding.
    pub fn requirement(&self) -> SecurityRequirement {
        SecurityRequirement(self.schemes.clone())
    }
}

/// One deployable function and its events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Function name; becomes the `operationId`.
    pub name: String,
    /// Trigger events in declaration order.
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A function trigger. Only `http` triggers are read; other kinds are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    /// HTTP trigger, if this event is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpTrigger>,
}

impl Event {
    /// The detailed HTTP event, when this is an `http` trigger in long form.
    pub fn http_event(&self) -> Option<&HttpEvent> {
        match self.http.as_ref()? {
            HttpTrigger::Detailed(event) => Some(event),
            HttpTrigger::Shorthand(_) => None,
        }
    }
}

/// The two accepted spellings of an `http` trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HttpTrigger {
    /// `"GET pets"`. Carries no documentation.
    Shorthand(String),
    /// `{path, method, documentation}`.
    Detailed(HttpEvent),
}

/// A long-form HTTP trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpEvent {
    /// Path without the leading slash (e.g. `pets/{petId}`).
    pub path: String,
    /// HTTP method in any case.
    pub method: String,
    /// Documentation block driving the generated operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<EventDocumentation>,
}

impl HttpEvent {
    /// Documentation block, if present and not empty.
    pub fn documented(&self) -> Option<&EventDocumentation> {
        self.documentation.as_ref().filter(|doc| !doc.is_empty())
    }
}

/// Per-event documentation block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDocumentation {
    /// Operation summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operation tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Marks the operation deprecated when true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Authorizer protecting the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizer: Option<AuthorizerRef>,
    /// Path parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_params: Option<Vec<ParameterDeclaration>>,
    /// Query parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<Vec<ParameterDeclaration>>,
    /// Request header parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<Vec<ParameterDeclaration>>,
    /// Cookie parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_params: Option<Vec<ParameterDeclaration>>,
    /// Request models keyed by content type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_models: Option<ContentModels>,
    /// Request body metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyDocumentation>,
    /// Responses, one entry per status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_responses: Option<Vec<MethodResponse>>,
}

impl EventDocumentation {
    /// True when the block declares nothing at all.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.deprecated.is_none()
            && self.authorizer.is_none()
            && self.path_params.is_none()
            && self.query_params.is_none()
            && self.request_headers.is_none()
            && self.cookie_params.is_none()
            && self.request_models.is_none()
            && self.request_body.is_none()
            && self.method_responses.is_none()
    }

    /// Parameter declarations for one location.
    pub fn params_for(&self, location: ParameterLocation) -> Option<&[ParameterDeclaration]> {
        let block = match location {
            ParameterLocation::Path => &self.path_params,
            ParameterLocation::Query => &self.query_params,
            ParameterLocation::Header => &self.request_headers,
            ParameterLocation::Cookie => &self.cookie_params,
        };
        block.as_deref()
    }
}

/// Reference to the authorizer guarding an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizerRef {
    /// Authorizer name, matched against `authorizerName` of global security.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request body metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBodyDocumentation {
    /// Description of the whole body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RequestBodyDocumentation {
    /// True when `requestBody` is present but declares nothing.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
    }
}

/// OpenAPI parameter serialization styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    /// `matrix` (path).
    Matrix,
    /// `label` (path).
    Label,
    /// `form` (query, cookie).
    Form,
    /// `simple` (path, header).
    Simple,
    /// `spaceDelimited` (query).
    SpaceDelimited,
    /// `pipeDelimited` (query).
    PipeDelimited,
    /// `deepObject` (query).
    DeepObject,
}

impl ParameterStyle {
    /// Wire name of the style.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterStyle::Matrix => "matrix",
            ParameterStyle::Label => "label",
            ParameterStyle::Form => "form",
            ParameterStyle::Simple => "simple",
            ParameterStyle::SpaceDelimited => "spaceDelimited",
            ParameterStyle::PipeDelimited => "pipeDelimited",
            ParameterStyle::DeepObject => "deepObject",
        }
    }
}

/// A declared path, query, header or cookie parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDeclaration {
    /// Parameter name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Required flag (ignored for path parameters, which are always required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Query only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,
    /// Query only. Outer `Some` means the key was present, even as null.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_reserved: Option<Option<bool>>,
    /// Deprecation flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Serialization style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    /// Explode flag; only meaningful together with `style`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// JSON-Schema of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonValue>,
    /// Single example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<JsonValue>,
    /// Example list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<JsonValue>,
    /// Media-type content, used instead of `schema`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<JsonValue>,
}

/// One documented response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodResponse {
    /// HTTP status code (`200`, `"4XX"`, `"default"`).
    pub status_code: StatusCode,
    /// Response models keyed by content type.
    #[serde(default)]
    pub response_models: ContentModels,
    /// Response headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<Vec<ResponseHeaderDeclaration>>,
    /// Response body metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<ResponseBodyDocumentation>,
}

/// Status code given as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusCode {
    /// `200`
    Number(u16),
    /// `"200"`, `"4XX"`, `"default"`
    Text(String),
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCode::Number(n) => write!(f, "{}", n),
            StatusCode::Text(s) => f.write_str(s),
        }
    }
}

/// Response body metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseBodyDocumentation {
    /// Response description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A declared response header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseHeaderDeclaration {
    /// Header name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON-Schema of the header value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonValue>,
}

/// Keeps "present as null" distinct from "absent" (the latter hits `default`).
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
