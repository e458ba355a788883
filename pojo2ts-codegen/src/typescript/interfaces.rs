//! Interface block rendering.

use crate::error::CodegenError;
use crate::registry::{ClassShape, ModelRegistry};

/// Generator for `export interface` blocks.
pub struct InterfaceGenerator<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> InterfaceGenerator<'a> {
    /// Creates a new interface generator.
    #[must_use]
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Generates one block per registered class, in discovery order.
    ///
    /// # Errors
    /// Returns `CodegenError::UnmappedType` if any field type has no
    /// TypeScript mapping.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = String::new();

        for shape in self.registry.iter() {
            output.push_str(&self.generate_interface(shape)?);
        }

        Ok(output)
    }

    /// Generates a single interface block.
    fn generate_interface(&self, shape: &ClassShape) -> Result<String, CodegenError> {
        let mut output = String::new();

        output.push_str(&format!("export interface {}{{\n", shape.simple_name));

        for (name, field) in &shape.fields {
            if field.type_expr.is_unmapped() {
                return Err(CodegenError::UnmappedType {
                    class: shape.qualified_name.clone(),
                    field: name.clone(),
                });
            }
            output.push_str(&format!("\t{}: {}; ", name, field.type_expr));
            if let Some(remark) = &field.descriptor.remark {
                output.push_str(&format!("//{}", remark));
            }
            output.push('\n');
        }

        output.push_str("}\n\n");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FieldDescriptor;
    use crate::typescript::types::TypeExpr;
    use pojo2ts_schema::{PrimitiveKind, TypeRef};

    fn descriptor(name: &str, remark: Option<&str>) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            declared_type: TypeRef::Primitive(PrimitiveKind::Int),
            remark: remark.map(ToString::to_string),
        }
    }

    #[test]
    fn test_render_blocks_in_order() {
        let mut registry = ModelRegistry::new();
        registry.reserve("a.Bar", "Bar");
        registry.reserve("a.Foo", "Foo");

        let mut bar = ClassShape::new("a.Bar", "Bar");
        bar.add_field(descriptor("foo", Some("the foo")), TypeExpr::Reference("Foo".into()));
        registry.complete(bar);
        let mut foo = ClassShape::new("a.Foo", "Foo");
        foo.add_field(descriptor("id", None), TypeExpr::Primitive("number"));
        registry.complete(foo);

        let output = InterfaceGenerator::new(&registry)
            .generate()
            .expect("Failed to render");
        assert_eq!(
            output,
            "export interface Bar{\n\tfoo: Foo; //the foo\n}\n\nexport interface Foo{\n\tid: number; \n}\n\n"
        );
    }

    #[test]
    fn test_empty_class() {
        let mut registry = ModelRegistry::new();
        registry.complete(ClassShape::new("a.Marker", "Marker"));
        let output = InterfaceGenerator::new(&registry)
            .generate()
            .expect("Failed to render");
        assert_eq!(output, "export interface Marker{\n}\n\n");
    }

    #[test]
    fn test_unmapped_type_rejected() {
        let mut registry = ModelRegistry::new();
        let mut shape = ClassShape::new("a.Task", "Task");
        shape.add_field(descriptor("result", None), TypeExpr::array(TypeExpr::Unmapped));
        registry.complete(shape);

        let result = InterfaceGenerator::new(&registry).generate();
        assert!(matches!(
            result,
            Err(CodegenError::UnmappedType { ref field, .. }) if field == "result"
        ));
    }
}
