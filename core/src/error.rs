//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Fatal generation failures carry enough context to point the author at the
/// offending model or documentation block.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// An event documents a request body but declares no `requestModels`.
    #[from(ignore)]
    #[display("Required requestModels for function '{function}' in: {documentation}")]
    MissingRequestModels {
        /// Function owning the event.
        function: String,
        /// Pretty-printed documentation block of the event.
        documentation: String,
    },

    /// A model schema could not be loaded, parsed or dereferenced.
    #[from(ignore)]
    #[display("Schema Resolution Error for model '{model}': {reason}")]
    SchemaResolution {
        /// Name of the model being resolved.
        model: String,
        /// What went wrong.
        reason: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

impl AppError {
    /// Builds a `SchemaResolution` error for the given model.
    pub fn schema_resolution(model: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::SchemaResolution {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_missing_request_models_display() {
        let err = AppError::MissingRequestModels {
            function: "createPet".into(),
            documentation: "{}".into(),
        };
        assert_eq!(
            format!("{}", err),
            "Required requestModels for function 'createPet' in: {}"
        );
    }

    #[test]
    fn test_schema_resolution_display() {
        let err = AppError::schema_resolution("Pet", "file not found");
        assert_eq!(
            format!("{}", err),
            "Schema Resolution Error for model 'Pet': file not found"
        );
    }
}
