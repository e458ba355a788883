//! Semantic type references handed to the generator.
//!
//! A [`DeclaredType`](crate::declared::DeclaredType) is what the source says; a
//! [`TypeRef`] is what the host model knows it to be after resolving names,
//! enum-ness and collection membership.

use std::fmt;

use crate::types::PrimitiveKind;

/// Semantic type reference: one variant per kind the generator dispatches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Primitive type.
    Primitive(PrimitiveKind),
    /// Array of the element type.
    Array(Box<TypeRef>),
    /// Collection or iterable with its element type, if one is known.
    Collection {
        /// Qualified name of the collection type.
        qualified_name: String,
        /// Element type parameter.
        element: Option<Box<TypeRef>>,
    },
    /// Enum reference.
    Enum {
        /// Qualified name of the enum.
        qualified_name: String,
    },
    /// Any other class or interface.
    Class {
        /// Simple name.
        simple_name: String,
        /// Qualified name (identity).
        qualified_name: String,
    },
    /// A name the host model cannot map to a class (type variables, missing classes).
    Unresolved {
        /// Name as written.
        name: String,
    },
}

impl TypeRef {
    /// Creates a class reference from a qualified name.
    #[must_use]
    pub fn class(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        Self::Class {
            simple_name: crate::types::simple_name(&qualified_name).to_string(),
            qualified_name,
        }
    }

    /// Wraps a type in `dims` array dimensions.
    #[must_use]
    pub fn array_of(element: Self, dims: usize) -> Self {
        (0..dims).fold(element, |inner, _| Self::Array(Box::new(inner)))
    }

    /// Returns the innermost non-array component type.
    #[must_use]
    pub fn deep_component(&self) -> &Self {
        let mut current = self;
        while let Self::Array(inner) = current {
            current = inner;
        }
        current
    }

    /// Returns the number of array dimensions.
    #[must_use]
    pub fn array_dimensions(&self) -> usize {
        let mut dims = 0;
        let mut current = self;
        while let Self::Array(inner) = current {
            dims += 1;
            current = inner;
        }
        dims
    }

    /// Returns the class identity this reference points at, if any.
    #[must_use]
    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            Self::Collection { qualified_name, .. }
            | Self::Enum { qualified_name }
            | Self::Class { qualified_name, .. } => Some(qualified_name),
            Self::Primitive(_) | Self::Array(_) | Self::Unresolved { .. } => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::Collection {
                qualified_name,
                element: Some(element),
            } => write!(f, "{qualified_name}<{element}>"),
            Self::Collection {
                qualified_name,
                element: None,
            }
            | Self::Enum { qualified_name }
            | Self::Class { qualified_name, .. } => f.write_str(qualified_name),
            Self::Unresolved { name } => f.write_str(name),
        }
    }
}
