//! Field extraction.
//!
//! Turns a class (own and inherited fields) into an ordered table of
//! [`FieldDescriptor`]s: ignored fields dropped, declared types lowered to
//! [`TypeRef`]s and remark annotations read.

use indexmap::IndexMap;
use pojo2ts_schema::{AnnotationDef, ClassDef, FieldDef, TypeModel, TypeRef};

use crate::config::GeneratorConfig;
use crate::error::CodegenError;

/// One field of a class as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Semantic field type.
    pub declared_type: TypeRef,
    /// Remark taken from the remark annotation.
    pub remark: Option<String>,
}

/// Extracts field descriptors from classes of a type model.
pub struct FieldExtractor<'a, M: TypeModel + ?Sized> {
    model: &'a M,
    config: &'a GeneratorConfig,
}

impl<'a, M: TypeModel + ?Sized> FieldExtractor<'a, M> {
    /// Creates a new field extractor.
    #[must_use]
    pub fn new(model: &'a M, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Extracts every declared and inherited field of `class`.
    ///
    /// Own fields come first, then each superclass in turn, then fields of
    /// implemented interfaces. A same-named field further up replaces the
    /// value but keeps the earlier position.
    ///
    /// # Errors
    /// Returns `CodegenError::MalformedAnnotation` if any remark value is an
    /// unterminated string literal; no partial table is returned.
    pub fn extract(
        &self,
        class: &ClassDef,
    ) -> Result<IndexMap<String, FieldDescriptor>, CodegenError> {
        let mut fields = IndexMap::new();

        for (owner, field) in self.model.all_fields(class) {
            if self.config.is_ignored(&field.name) {
                continue;
            }
            let descriptor = FieldDescriptor {
                name: field.name.clone(),
                declared_type: self.model.type_ref(&field.declared_type, Some(owner)),
                remark: self.remark(field)?,
            };
            fields.insert(field.name.clone(), descriptor);
        }

        Ok(fields)
    }

    /// Reads the remark for a field, if it carries the remark annotation.
    fn remark(&self, field: &FieldDef) -> Result<Option<String>, CodegenError> {
        let Some(annotation) = field.annotation(self.config.remark_annotation_name()) else {
            return Ok(None);
        };

        let value = read_attribute(annotation, "value", &field.name)?;
        let remark = match value {
            Some(text) if !text.trim().is_empty() => Some(text),
            _ => read_attribute(annotation, "name", &field.name)?,
        };

        Ok(remark.filter(|text| !text.trim().is_empty()))
    }
}

fn read_attribute(
    annotation: &AnnotationDef,
    name: &str,
    field: &str,
) -> Result<Option<String>, CodegenError> {
    annotation
        .attribute(name)
        .map(|raw| parse_remark(raw, field))
        .transpose()
}

/// Strips quote characters from the raw text of an annotation value.
///
/// # Errors
/// Returns `CodegenError::MalformedAnnotation` for an unterminated string literal.
pub fn parse_remark(raw: &str, field: &str) -> Result<String, CodegenError> {
    let text = raw.trim();
    if text.starts_with('"') && (text.len() < 2 || !text.ends_with('"')) {
        return Err(CodegenError::MalformedAnnotation {
            field: field.to_string(),
            text: raw.to_string(),
        });
    }
    Ok(text.replace('"', ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pojo2ts_schema::{ClassModel, PrimitiveKind, parse_model};

    const REMARK_MODEL: &str = r#"<model>
        <class name="com.acme.Base">
            <field name="id" type="long"/>
            <field name="label" type="String"/>
        </class>
        <class name="com.acme.Item" extends="com.acme.Base">
            <field name="serialVersionUID" type="long" static="true"/>
            <field name="label" type="int"/>
            <field name="price" type="java.math.BigDecimal">
                <annotation name="io.swagger.annotations.ApiModelProperty">
                    <attribute name="value">"unit price"</attribute>
                </annotation>
            </field>
            <field name="sku" type="String">
                <annotation name="io.swagger.annotations.ApiModelProperty">
                    <attribute name="name">"stock keeping unit"</attribute>
                </annotation>
            </field>
            <field name="note" type="String">
                <annotation name="io.swagger.annotations.ApiModelProperty">
                    <attribute name="value">""</attribute>
                    <attribute name="name">"free text"</attribute>
                </annotation>
            </field>
            <field name="plain" type="String">
                <annotation name="javax.validation.constraints.NotNull"/>
            </field>
        </class>
    </model>"#;

    fn extract(model: &ClassModel, name: &str, config: &GeneratorConfig) -> IndexMap<String, FieldDescriptor> {
        let class = model.find_class(name).unwrap();
        FieldExtractor::new(model, config)
            .extract(class)
            .expect("Failed to extract")
    }

    #[test]
    fn test_field_order_and_inheritance() {
        let model = parse_model(REMARK_MODEL).expect("Failed to parse");
        let fields = extract(&model, "com.acme.Item", &GeneratorConfig::default());

        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["label", "price", "sku", "note", "plain", "id"]);
        // the inherited String label replaces the own int label in place
        assert!(matches!(fields["label"].declared_type, TypeRef::Class { .. }));
        assert_eq!(
            fields["id"].declared_type,
            TypeRef::Primitive(PrimitiveKind::Long)
        );
    }

    #[test]
    fn test_interface_constants_are_inherited() {
        let xml = r#"<model>
            <interface name="a.Codes">
                <field name="PREFIX" type="String" static="true"/>
            </interface>
            <class name="a.Item" implements="a.Codes">
                <field name="id" type="int"/>
            </class>
        </model>"#;
        let model = parse_model(xml).expect("Failed to parse");
        let fields = extract(&model, "a.Item", &GeneratorConfig::default());

        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "PREFIX"]);
        assert!(matches!(fields["PREFIX"].declared_type, TypeRef::Class { .. }));
    }

    #[test]
    fn test_remarks() {
        let model = parse_model(REMARK_MODEL).expect("Failed to parse");
        let fields = extract(&model, "com.acme.Item", &GeneratorConfig::default());

        assert_eq!(fields["price"].remark.as_deref(), Some("unit price"));
        assert_eq!(fields["sku"].remark.as_deref(), Some("stock keeping unit"));
        assert_eq!(fields["note"].remark.as_deref(), Some("free text"));
        assert_eq!(fields["plain"].remark, None);
        assert_eq!(fields["id"].remark, None);
    }

    #[test]
    fn test_configured_ignore_list_and_annotation() {
        let model = parse_model(REMARK_MODEL).expect("Failed to parse");
        let config = GeneratorConfig::new()
            .ignored_fields(["sku"])
            .remark_annotation("javax.validation.constraints.NotNull");
        let fields = extract(&model, "com.acme.Item", &config);

        assert!(fields.contains_key("serialVersionUID"));
        assert!(!fields.contains_key("sku"));
        assert_eq!(fields["price"].remark, None);
    }

    #[test]
    fn test_malformed_annotation_fails_whole_extraction() {
        let xml = r#"<model><class name="a.A">
            <field name="ok" type="int"/>
            <field name="bad" type="int">
                <annotation name="io.swagger.annotations.ApiModelProperty">
                    <attribute name="value">"unterminated</attribute>
                </annotation>
            </field>
        </class></model>"#;
        let model = parse_model(xml).expect("Failed to parse");
        let config = GeneratorConfig::default();
        let class = model.find_class("a.A").unwrap();
        let result = FieldExtractor::new(&model, &config).extract(class);
        assert!(matches!(
            result,
            Err(CodegenError::MalformedAnnotation { ref field, .. }) if field == "bad"
        ));
    }

    #[test]
    fn test_parse_remark() {
        assert_eq!(parse_remark("\"a \\\"b\\\"\"", "f").unwrap(), "a \\b\\");
        assert_eq!(parse_remark("Constants.LABEL", "f").unwrap(), "Constants.LABEL");
        assert!(parse_remark("\"", "f").is_err());
        assert!(parse_remark("\"open", "f").is_err());
    }
}
