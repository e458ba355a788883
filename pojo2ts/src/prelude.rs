//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use pojo2ts::prelude::*;
//! ```

// Model types
pub use pojo2ts_schema::{
    ClassDef, ClassKind, ClassModel, DeclaredType, FieldDef, SourcePosition, TypeModel, TypeRef,
    parse_model, parse_model_file, validate_model,
};

// Generation
pub use pojo2ts_codegen::{CodegenError, Generator, GeneratorConfig, TypeExpr};

// Orchestration
pub use pojo2ts_codegen::{
    Converter, FileSink, Notification, NotificationLevel, Notifier, OutputSink, Selection,
    StdoutSink, StringSink, TracingNotifier,
};
