#![deny(missing_docs)]

//! # OpenAPI Document Types
//!
//! The output object graph. Maps are insertion-ordered so that the same input
//! always serializes to the same bytes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::openapi::info::Info;
use utoipa::openapi::security::SecurityScheme;
use utoipa::openapi::server::Server;

/// The OpenAPI version every generated document declares.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Prefix of model references.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Path template to path item.
pub type Paths = IndexMap<String, PathItem>;

/// Lower-cased HTTP method to operation.
pub type PathItem = IndexMap<String, Operation>;

/// Status code to response.
pub type Responses = IndexMap<String, Response>;

/// The assembled OpenAPI document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    /// Always [`OPENAPI_VERSION`].
    pub openapi: String,
    /// Title, description and version.
    pub info: Info,
    /// Servers, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    /// Document-level security, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Generated paths.
    #[serde(default)]
    pub paths: Paths,
    /// Schemas and security schemes.
    #[serde(default)]
    pub components: Components,
}

/// The `components` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Resolved model schemas keyed by model name.
    #[serde(default)]
    pub schemas: IndexMap<String, JsonValue>,
    /// Security schemes, when configured.
    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub security_schemes: Option<IndexMap<String, SecurityScheme>>,
}

/// Scheme name to required scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityRequirement(pub IndexMap<String, Vec<String>>);

/// An Operation Object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Owning function name.
    pub operation_id: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Only ever `Some(true)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Request body, when request models are declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Parameters in path, query, header, cookie order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: Responses,
    /// Operation-level security override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Templated path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParameterLocation {
    /// All locations in output order.
    pub const ALL: [ParameterLocation; 4] = [
        ParameterLocation::Path,
        ParameterLocation::Query,
        ParameterLocation::Header,
        ParameterLocation::Cookie,
    ];

    /// Wire name of the location.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// A Parameter Object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Description, `""` when not declared.
    #[serde(default)]
    pub description: String,
    /// Always true for path parameters.
    pub required: bool,
    /// Query only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,
    /// Query only, and only when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,
    /// Deprecation flag, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Serialization style, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Present exactly when `style` is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// Cleaned schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonValue>,
    /// Single example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<JsonValue>,
    /// Example list; never set together with `example`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<JsonValue>>,
    /// Media-type content, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<JsonValue>,
}

/// A Request Body Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Description of the whole body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Content type to media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A Media Type Object referencing a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Reference into `components.schemas`.
    pub schema: SchemaRef,
    /// Model example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<JsonValue>,
    /// Model example list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<JsonValue>>,
}

/// A `$ref` to a component schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRef {
    /// The reference string.
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl SchemaRef {
    /// Reference to the named model.
    pub fn model(name: &str) -> Self {
        Self {
            reference: format!("{}{}", SCHEMA_REF_PREFIX, name),
        }
    }
}

/// A Response Object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response description.
    pub description: String,
    /// Content type to media type; possibly empty.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
    /// Headers, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, Header>>,
}

/// A Header Object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Header description.
    pub description: String,
    /// Cleaned schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonValue>,
}
