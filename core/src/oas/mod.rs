#![deny(missing_docs)]

//! # OpenAPI Generation Module
//!
//! - **document**: The emitted OpenAPI 3.0 object model.
//! - **registry**: Loading and inlining of model schemas.
//! - **resolver**: Parameters, request bodies and responses.
//! - **operation**: One Operation Object per documented event.
//! - **assembler**: The full document for one run.
//! - **validation**: Advisory structural checks of the result.

pub mod assembler;
pub mod document;
pub mod merge;
pub mod operation;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use assembler::{fold_paths, path_fragments, DocumentAssembler, PathFragment};
pub use document::{
    Components, Definition, Header, MediaType, Operation, Parameter, ParameterLocation, Paths,
    RequestBody, Response, Responses, SchemaRef, SecurityRequirement, OPENAPI_VERSION,
};
pub use merge::{merge_typed, merge_values};
pub use operation::build_operation;
pub use registry::{FsSchemaLoader, SchemaLoader, SchemaRegistry};
pub use schema::clean_schema;
pub use validation::{
    validate_definition, validate_document, Diagnostic, ValidationError, ValidationReport,
};
