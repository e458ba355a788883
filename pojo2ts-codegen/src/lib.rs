//! # pojo2ts Codegen
//!
//! TypeScript interface generation from host class models.
//!
//! This crate provides:
//! - Field extraction with remark annotations
//! - Recursive type resolution into TypeScript type expressions
//! - A registry of every class reachable from a root
//! - `export interface` rendering
//! - Conversion orchestration with output sinks and notifications

pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod generator;
pub mod registry;
pub mod resolve;
pub mod typescript;
pub mod well_known;

pub use config::GeneratorConfig;
pub use convert::{
    Converter, FileSink, Notification, NotificationLevel, Notifier, OutputSink, Selection,
    StdoutSink, StringSink, TracingNotifier,
};
pub use error::CodegenError;
pub use extract::{FieldDescriptor, FieldExtractor};
pub use generator::Generator;
pub use registry::{ClassShape, ModelRegistry, ResolvedField};
pub use resolve::{ResolveContext, TypeResolver};
pub use typescript::{InterfaceGenerator, TypeExpr};
pub use well_known::WellKnownTypeTable;

/// Generates TypeScript interfaces from a class model XML string.
///
/// # Arguments
/// * `xml` - Class model document
/// * `root` - Qualified (or unambiguous simple) name of the root class
///
/// # Returns
/// One interface block per class reachable from the root.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(xml: &str, root: &str) -> Result<String, CodegenError> {
    let model = pojo2ts_schema::parse_model(xml)?;
    let generator = Generator::new(&model);
    generator.generate(root)
}

/// Generates TypeScript interfaces from a class model XML file.
///
/// # Arguments
/// * `path` - Path to the class model document
/// * `root` - Qualified (or unambiguous simple) name of the root class
///
/// # Returns
/// One interface block per class reachable from the root.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &std::path::Path, root: &str) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR_FOO: &str = r#"<model>
        <class name="com.acme.Bar"><field name="foo" type="com.acme.Foo"/></class>
        <class name="com.acme.Foo"><field name="id" type="int"/></class>
    </model>"#;

    #[test]
    fn test_generate_from_xml() {
        let output = generate_from_xml(BAR_FOO, "com.acme.Bar").expect("Failed to generate");
        assert_eq!(output.matches("export interface").count(), 2);
        assert!(output.starts_with("export interface Bar{\n\tfoo: Foo; \n}\n\n"));
        assert!(output.ends_with("export interface Foo{\n\tid: number; \n}\n\n"));
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("model.xml");
        std::fs::write(&path, BAR_FOO).expect("Failed to write");

        let output = generate_from_file(&path, "Foo").expect("Failed to generate");
        assert_eq!(output, "export interface Foo{\n\tid: number; \n}\n\n");

        let missing = generate_from_file(&dir.path().join("none.xml"), "Foo");
        assert!(matches!(missing, Err(CodegenError::Io(_))));
    }

    #[test]
    fn test_generate_includes_interface_constants() {
        let xml = r#"<model>
            <interface name="a.Codes">
                <field name="PREFIX" type="String" static="true"/>
            </interface>
            <class name="a.Item" implements="a.Codes">
                <field name="id" type="int"/>
            </class>
        </model>"#;
        let output = generate_from_xml(xml, "a.Item").expect("Failed to generate");
        assert_eq!(
            output,
            "export interface Item{\n\tid: number; \n\tPREFIX: string; \n}\n\n"
        );
    }

    #[test]
    fn test_parse_errors_propagate() {
        let result = generate_from_xml("<model><class/></model>", "A");
        assert!(matches!(result, Err(CodegenError::Parse(_))));
    }
}
