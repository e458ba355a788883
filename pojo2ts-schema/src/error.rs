//! Error types for class model parsing and validation.

use thiserror::Error;

/// Error type for class model parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML escape sequence could not be decoded.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (class, field, etc.).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// A declared type string does not follow the type grammar.
    #[error("invalid declared type '{text}': {message}")]
    InvalidType {
        /// The offending type text.
        text: String,
        /// What went wrong.
        message: String,
    },

    /// Invalid document structure.
    #[error("invalid model structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for class model validation and lookups.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Circular inheritance.
    #[error("circular inheritance detected: {path}")]
    CircularInheritance {
        /// Path of the cycle, e.g. `a.A -> a.B -> a.A`.
        path: String,
    },

    /// Two fields with the same name declared in one class.
    #[error("duplicate field '{field}' in class '{class}'")]
    DuplicateField {
        /// Declaring class.
        class: String,
        /// Field name.
        field: String,
    },

    /// Two enum constants with the same name.
    #[error("duplicate constant '{constant}' in enum '{enum_name}'")]
    DuplicateConstant {
        /// Enum name.
        enum_name: String,
        /// Constant name.
        constant: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid declared type error.
    pub fn invalid_type(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidType {
            text: text.into(),
            message: message.into(),
        }
    }
}
