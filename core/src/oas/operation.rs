#![deny(missing_docs)]

//! # Operation Building
//!
//! Composes parameters, request body and responses into one Operation Object
//! per documented HTTP event.

use crate::config::{DefinitionConfig, EventDocumentation};
use crate::error::AppResult;
use crate::oas::document::Operation;
use crate::oas::resolver::{build_request_body, map_parameters, map_responses};

/// Builds the operation for `function` from its event documentation.
pub fn build_operation(
    function: &str,
    documentation: &EventDocumentation,
    config: &DefinitionConfig,
) -> AppResult<Operation> {
    let security = documentation
        .authorizer
        .as_ref()
        .and_then(|authorizer| authorizer.name.as_deref())
        .and_then(|name| config.security_for_authorizer(name))
        .map(|requirement| vec![requirement.requirement()]);

    Ok(Operation {
        operation_id: function.to_string(),
        summary: non_empty(&documentation.summary),
        description: non_empty(&documentation.description),
        tags: documentation.tags.clone(),
        deprecated: documentation.deprecated.filter(|d| *d),
        request_body: build_request_body(function, documentation, config)?,
        parameters: map_parameters(documentation),
        responses: map_responses(documentation, config)?,
        security,
    })
}

/// Blank strings are treated as undeclared.
fn non_empty(text: &Option<String>) -> Option<String> {
    text.as_ref().filter(|t| !t.is_empty()).cloned()
}
