//! Error types for code generation.

use thiserror::Error;

/// Message shown when resolution descends past the configured depth ceiling.
pub const RECURSION_LIMIT_MESSAGE: &str =
    "This class reference level exceeds maximum limit or has nested references!";

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Model parsing error.
    #[error("model parse error: {0}")]
    Parse(#[from] pojo2ts_schema::ParseError),

    /// Model validation error.
    #[error("model error: {0}")]
    Schema(#[from] pojo2ts_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Resolution went deeper than the configured ceiling.
    #[error("This class reference level exceeds maximum limit or has nested references!")]
    RecursionLimitExceeded {
        /// Depth reached.
        depth: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// A collection type carries no element type parameter.
    #[error("collection type '{type_name}' has no element type parameter")]
    MissingTypeParameter {
        /// Collection type name.
        type_name: String,
    },

    /// A remark annotation value could not be read.
    #[error("malformed annotation value {text} on field '{field}'")]
    MalformedAnnotation {
        /// Field name.
        field: String,
        /// Raw attribute text.
        text: String,
    },

    /// A field type has no TypeScript mapping.
    #[error("field '{field}' of '{class}' has a type with no TypeScript mapping")]
    UnmappedType {
        /// Declaring class.
        class: String,
        /// Field name.
        field: String,
    },

    /// Root class not found in the model.
    #[error("class '{name}' not found")]
    ClassNotFound {
        /// Class name as requested.
        name: String,
    },

    /// No class encloses the selected source position.
    #[error("no class declaration at {file}:{line}")]
    NoSelection {
        /// Source file.
        file: String,
        /// Line.
        line: usize,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Returns true for the depth ceiling error, which is reported as a warning.
    #[must_use]
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, Self::RecursionLimitExceeded { .. })
    }
}
