#![deny(missing_docs)]

//! # Validation Report Output
//!
//! Human-readable rendering of a [`ValidationReport`].

use oasgen_core::{ValidationError, ValidationReport};
use std::fmt::Write;

const SEPARATOR: &str = "--------";

/// Renders the report as plain text.
pub fn render(report: &ValidationReport) -> String {
    if report.valid {
        return "[VALIDATION] OpenAPI valid: true\n".to_string();
    }

    let mut out = String::from("[VALIDATION] Failed to validate OpenAPI document:\n\nContext:\n");
    for location in &report.context {
        let _ = writeln!(out, "  - {}", location);
    }

    match &report.error {
        Some(ValidationError::Message(message)) => {
            let _ = writeln!(out, "\n{}", message);
        }
        Some(ValidationError::Diagnostics(diagnostics)) => {
            for diagnostic in diagnostics {
                let _ = writeln!(out, "\n{}", SEPARATOR);
                let _ = writeln!(out, "  {}", diagnostic.data_path);
                let _ = writeln!(out, "  {} {}", diagnostic.schema_path, diagnostic.message);
            }
            let _ = writeln!(out, "{}", SEPARATOR);
        }
        None => {}
    }
    out
}

/// Prints the report to stdout.
pub fn print(report: &ValidationReport) {
    println!("[VALIDATION] Validating OpenAPI generated output");
    print!("{}", render(report));
}
