//! TypeScript code generation modules.

pub mod interfaces;
pub mod types;

pub use interfaces::InterfaceGenerator;
pub use types::TypeExpr;
