#![deny(missing_docs)]

//! # oasgen Core
//!
//! Compiles service documentation settings and function descriptors into an
//! OpenAPI 3.0 document, then checks the result.

/// Shared error types.
pub mod error;

/// Typed input configuration.
pub mod config;

/// OpenAPI document generation and validation.
pub mod oas;

use std::path::PathBuf;

pub use config::{DefinitionConfig, FunctionDescriptor};
pub use error::{AppError, AppResult};
pub use oas::{
    validate_definition, Definition, DocumentAssembler, ValidationError, ValidationReport,
};

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The assembled document.
    pub definition: Definition,
    /// Advisory validation of `definition`.
    pub report: ValidationReport,
}

/// Assembles and validates a document, resolving schema files against `root`.
///
/// Validation problems are returned in the report; only resolution and
/// request model errors fail the run.
pub async fn generate(
    config: &DefinitionConfig,
    functions: &[FunctionDescriptor],
    root: impl Into<PathBuf>,
) -> AppResult<Generated> {
    let definition = DocumentAssembler::new(config, root)
        .assemble(functions)
        .await?;
    let report = validate_definition(&definition);
    Ok(Generated { definition, report })
}
