//! TypeScript type expressions.

use std::fmt;

use pojo2ts_schema::PrimitiveKind;

/// TypeScript `boolean`.
pub const TS_BOOLEAN: &str = "boolean";
/// TypeScript `number`.
pub const TS_NUMBER: &str = "number";
/// TypeScript `string`.
pub const TS_STRING: &str = "string";

/// A resolved TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Built-in primitive (`boolean`, `number`, `string`).
    Primitive(&'static str),
    /// An enum collapsed to one of its constant names.
    EnumConstant(String),
    /// A string literal type; the empty literal stands for a constant-less enum.
    Literal(String),
    /// Reference to a generated interface.
    Reference(String),
    /// Array of the element type.
    Array(Box<TypeExpr>),
    /// The empty object type `{}`.
    EmptyObject,
    /// A host type with no TypeScript mapping (`void`).
    Unmapped,
}

impl TypeExpr {
    /// Maps a host primitive; `void` has no mapping.
    #[must_use]
    pub fn for_primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => Self::Primitive(TS_BOOLEAN),
            PrimitiveKind::Byte
            | PrimitiveKind::Short
            | PrimitiveKind::Int
            | PrimitiveKind::Long
            | PrimitiveKind::Float
            | PrimitiveKind::Double => Self::Primitive(TS_NUMBER),
            PrimitiveKind::Char => Self::Primitive(TS_STRING),
            PrimitiveKind::Void => Self::Unmapped,
        }
    }

    /// Wraps the expression in one array suffix.
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Returns true if the expression contains an unmapped gap anywhere.
    #[must_use]
    pub fn is_unmapped(&self) -> bool {
        match self {
            Self::Unmapped => true,
            Self::Array(inner) => inner.is_unmapped(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) => f.write_str(name),
            Self::EnumConstant(name) | Self::Reference(name) => f.write_str(name),
            Self::Literal(text) => write!(f, "\"{text}\""),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::EmptyObject => f.write_str("{}"),
            // Only reachable in diagnostics; the renderer rejects unmapped types.
            Self::Unmapped => f.write_str("void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_mapping() {
        assert_eq!(TypeExpr::for_primitive(PrimitiveKind::Boolean).to_string(), "boolean");
        assert_eq!(TypeExpr::for_primitive(PrimitiveKind::Char).to_string(), "string");
        for kind in [
            PrimitiveKind::Byte,
            PrimitiveKind::Short,
            PrimitiveKind::Int,
            PrimitiveKind::Long,
            PrimitiveKind::Float,
            PrimitiveKind::Double,
        ] {
            assert_eq!(TypeExpr::for_primitive(kind), TypeExpr::Primitive(TS_NUMBER));
        }
        assert!(TypeExpr::for_primitive(PrimitiveKind::Void).is_unmapped());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeExpr::array(TypeExpr::Reference("Item".into())).to_string(), "Item[]");
        assert_eq!(TypeExpr::Literal(String::new()).to_string(), "\"\"");
        assert_eq!(TypeExpr::EmptyObject.to_string(), "{}");
        assert_eq!(TypeExpr::EnumConstant("ACTIVE".into()).to_string(), "ACTIVE");
    }

    #[test]
    fn test_unmapped_inside_array() {
        assert!(TypeExpr::array(TypeExpr::Unmapped).is_unmapped());
        assert!(!TypeExpr::array(TypeExpr::EmptyObject).is_unmapped());
    }
}
