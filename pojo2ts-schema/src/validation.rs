//! Class model validation utilities.
//!
//! Checks a parsed model for inconsistencies the generator would otherwise
//! trip over late: inheritance cycles, duplicated fields and duplicated enum
//! constants.

use std::collections::HashSet;

use crate::declared::DeclaredType;
use crate::error::SchemaError;
use crate::types::{ClassDef, ClassModel};

/// Validates a parsed class model for consistency.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_model(model: &ClassModel) -> Result<(), SchemaError> {
    for class in &model.classes {
        validate_inheritance(model, class)?;
        validate_fields(class)?;
        if class.is_enum() {
            validate_enum(class)?;
        }
    }
    tracing::debug!("Validated {} classes", model.classes.len());
    Ok(())
}

/// Walks the superclass chain looking for a cycle back to any visited class.
fn validate_inheritance(model: &ClassModel, class: &ClassDef) -> Result<(), SchemaError> {
    let mut path = vec![class.qualified_name.as_str()];
    let mut seen = HashSet::from([class.qualified_name.as_str()]);
    let mut current = class;

    while let Some(parent) = current
        .extends
        .as_ref()
        .and_then(DeclaredType::name)
        .and_then(|name| model.lookup(name))
    {
        path.push(parent.qualified_name.as_str());
        if !seen.insert(parent.qualified_name.as_str()) {
            return Err(SchemaError::CircularInheritance {
                path: path.join(" -> "),
            });
        }
        current = parent;
    }

    Ok(())
}

/// Rejects two fields with the same name in one class.
fn validate_fields(class: &ClassDef) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in &class.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                class: class.qualified_name.clone(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}

/// Rejects repeated enum constants.
fn validate_enum(class: &ClassDef) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for constant in &class.enum_constants {
        if !seen.insert(constant.as_str()) {
            return Err(SchemaError::DuplicateConstant {
                enum_name: class.qualified_name.clone(),
                constant: constant.clone(),
            });
        }
    }
    Ok(())
}
