//! # pojo2ts
//!
//! Generate TypeScript interfaces from Java class models.
//!
//! Given a root class, pojo2ts walks its declared and inherited fields,
//! resolves each field type (primitives, arrays, enums, collections,
//! well-known wrappers, nested classes) and emits one `export interface`
//! block for the root and for every class reachable from it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pojo2ts::prelude::*;
//!
//! let model = parse_model_file(Path::new("model.xml"))?;
//! let generator = Generator::new(&model);
//! let text = generator.generate("com.acme.User")?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Host class model, declared types, XML model parsing
//! - [`codegen`] - Field extraction, type resolution, rendering, orchestration

pub mod prelude;

/// Host class model and XML model parsing.
pub mod schema {
    pub use pojo2ts_schema::*;
}

/// TypeScript interface generation.
pub mod codegen {
    pub use pojo2ts_codegen::*;
}
