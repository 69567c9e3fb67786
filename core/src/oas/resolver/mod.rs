#![deny(missing_docs)]

//! # Resolver Module
//!
//! Maps the pieces of an event's documentation block onto OpenAPI objects.
//!
//! Handles:
//! - Parameter mapping with per-location defaults (`required`, `explode`, query-only flags).
//! - Request bodies as `$ref`s into `components.schemas`.
//! - Responses with default descriptions, headers and dropped dangling models.

pub mod body;
pub mod examples;
pub mod params;
pub mod responses;

pub use body::{build_request_body, media_type_for};
pub use params::{map_parameter, map_parameters};
pub use responses::{map_response, map_responses};
