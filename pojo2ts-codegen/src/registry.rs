//! Registry of the class shapes discovered during one generation run.

use indexmap::IndexMap;

use crate::extract::FieldDescriptor;
use crate::typescript::types::TypeExpr;

/// A field together with its resolved TypeScript type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Extracted field.
    pub descriptor: FieldDescriptor,
    /// Resolved type expression.
    pub type_expr: TypeExpr,
}

/// The resolved field table of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassShape {
    /// Qualified name (identity).
    pub qualified_name: String,
    /// Simple name, used as the interface name.
    pub simple_name: String,
    /// Fields in extraction order.
    pub fields: IndexMap<String, ResolvedField>,
}

impl ClassShape {
    /// Creates an empty shape.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            simple_name: simple_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Adds a resolved field, replacing any field of the same name in place.
    pub fn add_field(&mut self, descriptor: FieldDescriptor, type_expr: TypeExpr) {
        self.fields.insert(
            descriptor.name.clone(),
            ResolvedField {
                descriptor,
                type_expr,
            },
        );
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.get(name)
    }
}

/// Class identity to shape, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    shapes: IndexMap<String, ClassShape>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the slot for a class so it keeps its discovery position
    /// while its fields are still being resolved.
    ///
    /// Returns false if the class is already registered; the existing
    /// entry is left untouched.
    pub fn reserve(&mut self, qualified_name: &str, simple_name: &str) -> bool {
        if self.shapes.contains_key(qualified_name) {
            return false;
        }
        self.shapes.insert(
            qualified_name.to_string(),
            ClassShape::new(qualified_name, simple_name),
        );
        true
    }

    /// Stores a completed shape in its reserved slot (or at the end).
    pub fn complete(&mut self, shape: ClassShape) {
        self.shapes.insert(shape.qualified_name.clone(), shape);
    }

    /// Looks up a shape by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&ClassShape> {
        self.shapes.get(qualified_name)
    }

    /// Returns true if the class is registered.
    #[must_use]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.shapes.contains_key(qualified_name)
    }

    /// Iterates shapes in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassShape> {
        self.shapes.values()
    }

    /// Returns the registered qualified names in discovery order.
    #[must_use]
    pub fn qualified_names(&self) -> Vec<&str> {
        self.shapes.keys().map(String::as_str).collect()
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
