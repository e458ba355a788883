//! # pojo2ts Schema
//!
//! Host class model and type definitions for the TypeScript interface generator.
//!
//! This crate provides:
//! - Class, field, annotation and enum definitions
//! - A grammar for declared type text (`java.util.List<String>[]`)
//! - The platform class graph every model starts from
//! - XML model parsing and validation
//! - The [`TypeModel`] trait the generator queries

pub mod declared;
pub mod error;
pub mod ir;
pub mod model;
pub mod parser;
pub mod platform;
pub mod types;
pub mod validation;

pub use declared::DeclaredType;
pub use error::{ParseError, SchemaError};
pub use ir::TypeRef;
pub use model::TypeModel;
pub use parser::{parse_model, parse_model_file};
pub use types::{
    AnnotationDef, ClassDef, ClassKind, ClassModel, FieldDef, PrimitiveKind, SourcePosition,
    SourceSpan, simple_name,
};
pub use validation::validate_model;
