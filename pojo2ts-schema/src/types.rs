//! Class model type definitions.
//!
//! This module contains the data structures representing the host's symbol
//! model: classes, interfaces and enums together with their fields and
//! annotations.

use crate::declared::DeclaredType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Complete class model: every class the host knows about.
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    /// Class definitions in declaration order.
    pub classes: Vec<ClassDef>,
    /// Qualified name lookup (built as classes are added).
    class_map: HashMap<String, usize>,
    /// Simple name lookup; a name maps to every class sharing it.
    simple_map: HashMap<String, Vec<usize>>,
}

impl ClassModel {
    /// Creates a new empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model seeded with the platform classes.
    #[must_use]
    pub fn with_platform() -> Self {
        let mut model = Self::new();
        for class in crate::platform::platform_classes() {
            model.add_class(class);
        }
        model
    }

    /// Adds a class definition, replacing any class with the same qualified name.
    pub fn add_class(&mut self, class: ClassDef) {
        if let Some(&index) = self.class_map.get(&class.qualified_name) {
            self.classes[index] = class;
            return;
        }
        let index = self.classes.len();
        self.class_map.insert(class.qualified_name.clone(), index);
        self.simple_map
            .entry(class.simple_name().to_string())
            .or_default()
            .push(index);
        self.classes.push(class);
    }

    /// Looks up a class by qualified name.
    #[must_use]
    pub fn get_class(&self, qualified_name: &str) -> Option<&ClassDef> {
        self.class_map
            .get(qualified_name)
            .map(|&idx| &self.classes[idx])
    }

    /// Looks up a class by qualified name, or by simple name when that name is
    /// unambiguous.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ClassDef> {
        if let Some(class) = self.get_class(name) {
            return Some(class);
        }
        match self.simple_map.get(name).map(Vec::as_slice) {
            Some([idx]) => Some(&self.classes[*idx]),
            _ => None,
        }
    }

    /// Returns true if a class with the given qualified name exists.
    #[must_use]
    pub fn has_class(&self, qualified_name: &str) -> bool {
        self.class_map.contains_key(qualified_name)
    }

    /// Returns the innermost class whose source span contains the position.
    #[must_use]
    pub fn class_at(&self, position: &SourcePosition) -> Option<&ClassDef> {
        self.classes
            .iter()
            .filter(|c| c.source.as_ref().is_some_and(|s| s.contains(position)))
            .min_by_key(|c| c.source.as_ref().map_or(usize::MAX, SourceSpan::line_count))
    }

    /// Rebuilds both lookup maps from the classes vector.
    pub fn build_class_map(&mut self) {
        self.class_map.clear();
        self.simple_map.clear();
        for (idx, class) in self.classes.iter().enumerate() {
            self.class_map.insert(class.qualified_name.clone(), idx);
            self.simple_map
                .entry(class.simple_name().to_string())
                .or_default()
                .push(idx);
        }
    }
}

/// Kind of class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    /// Ordinary class.
    #[default]
    Class,
    /// Interface.
    Interface,
    /// Enum.
    Enum,
}

impl ClassKind {
    /// Parses a kind from its element name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    /// Returns the element name for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
        }
    }
}

/// Class, interface or enum definition.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Fully qualified name (identity).
    pub qualified_name: String,
    /// Declaration kind.
    pub kind: ClassKind,
    /// Superclass, if declared.
    pub extends: Option<DeclaredType>,
    /// Implemented interfaces (or extended interfaces, for an interface).
    pub implements: Vec<DeclaredType>,
    /// Type parameter names.
    pub type_params: Vec<String>,
    /// Fields declared directly on this class.
    pub fields: Vec<FieldDef>,
    /// Enum constants in declaration order.
    pub enum_constants: Vec<String>,
    /// Where the class is declared.
    pub source: Option<SourceSpan>,
}

impl ClassDef {
    /// Creates a new class definition.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            extends: None,
            implements: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            enum_constants: Vec::new(),
            source: None,
        }
    }

    /// Returns the simple (unqualified) name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    /// Returns true if this is an enum.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    /// Adds a field.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Adds an enum constant.
    pub fn add_constant(&mut self, name: impl Into<String>) {
        self.enum_constants.push(name.into());
    }

    /// Returns true if `name` is one of this class's type parameters.
    #[must_use]
    pub fn has_type_param(&self, name: &str) -> bool {
        self.type_params.iter().any(|p| p == name)
    }

    /// Returns the declared supertypes, superclass first.
    pub fn supertypes(&self) -> impl Iterator<Item = &DeclaredType> {
        self.extends.iter().chain(self.implements.iter())
    }
}

/// Field definition.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub declared_type: DeclaredType,
    /// Annotations on the field.
    pub annotations: Vec<AnnotationDef>,
    /// Whether the field is static.
    pub is_static: bool,
}

impl FieldDef {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            annotations: Vec::new(),
            is_static: false,
        }
    }

    /// Looks up an annotation by qualified name.
    #[must_use]
    pub fn annotation(&self, qualified_name: &str) -> Option<&AnnotationDef> {
        self.annotations
            .iter()
            .find(|a| a.qualified_name == qualified_name)
    }

    /// Adds an annotation.
    pub fn add_annotation(&mut self, annotation: AnnotationDef) {
        self.annotations.push(annotation);
    }
}

/// Annotation applied to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDef {
    /// Annotation type qualified name.
    pub qualified_name: String,
    /// Attribute name to raw source text (string literals keep their quotes).
    pub attributes: Vec<(String, String)>,
}

impl AnnotationDef {
    /// Creates an annotation with no attributes.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.attributes.push((name.into(), text.into()));
        self
    }

    /// Returns the raw text of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, text)| text.as_str())
    }
}

/// Host primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `char`
    Char,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `void`
    Void,
}

impl PrimitiveKind {
    /// Parses a primitive kind from its keyword.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Boolean),
            "byte" => Some(Self::Byte),
            "char" => Some(Self::Char),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "void" => Some(Self::Void),
            _ => None,
        }
    }

    /// Returns the keyword.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

/// Source file span of a class declaration (lines are 1-based, inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    /// Source file.
    pub file: PathBuf,
    /// First line.
    pub start_line: usize,
    /// Last line.
    pub end_line: usize,
}

impl SourceSpan {
    /// Creates a new span.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, start_line: usize, end_line: usize) -> Self {
        Self {
            file: file.into(),
            start_line,
            end_line,
        }
    }

    /// Returns true if the position falls inside this span.
    #[must_use]
    pub fn contains(&self, position: &SourcePosition) -> bool {
        self.file == position.file
            && (self.start_line..=self.end_line).contains(&position.line)
    }

    /// Number of lines covered.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// A caret position in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    /// Source file.
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
}

impl SourcePosition {
    /// Creates a new position.
    #[must_use]
    pub fn new(file: impl AsRef<Path>, line: usize) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            line,
        }
    }
}

/// Returns the part of a qualified name after the last `.`.
#[must_use]
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, simple)| simple)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_with_span(name: &str, start: usize, end: usize) -> ClassDef {
        let mut class = ClassDef::new(name, ClassKind::Class);
        class.source = Some(SourceSpan::new("src/Outer.java", start, end));
        class
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("com.acme.User"), "User");
        assert_eq!(simple_name("User"), "User");
        assert_eq!(simple_name("com.acme.Outer.Inner"), "Inner");
    }

    #[test]
    fn test_model_lookup_by_qualified_and_simple_name() {
        let mut model = ClassModel::new();
        model.add_class(ClassDef::new("com.acme.User", ClassKind::Class));
        model.add_class(ClassDef::new("com.acme.Item", ClassKind::Class));
        model.add_class(ClassDef::new("org.other.Item", ClassKind::Class));

        assert!(model.has_class("com.acme.User"));
        assert!(model.lookup("User").is_some());
        assert!(model.lookup("org.other.Item").is_some());
        // ambiguous simple name
        assert!(model.lookup("Item").is_none());
        assert!(model.lookup("Missing").is_none());
    }

    #[test]
    fn test_add_class_replaces_same_identity() {
        let mut model = ClassModel::new();
        model.add_class(ClassDef::new("com.acme.User", ClassKind::Class));
        let mut replacement = ClassDef::new("com.acme.User", ClassKind::Class);
        replacement.add_field(FieldDef::new("id", DeclaredType::reference("Long")));
        model.add_class(replacement);

        assert_eq!(model.classes.len(), 1);
        assert_eq!(model.get_class("com.acme.User").unwrap().fields.len(), 1);
    }

    #[test]
    fn test_class_at_picks_innermost() {
        let mut model = ClassModel::new();
        model.add_class(class_with_span("com.acme.Outer", 1, 50));
        model.add_class(class_with_span("com.acme.Outer.Inner", 10, 20));

        let inner = model.class_at(&SourcePosition::new("src/Outer.java", 15));
        assert_eq!(inner.unwrap().simple_name(), "Inner");

        let outer = model.class_at(&SourcePosition::new("src/Outer.java", 30));
        assert_eq!(outer.unwrap().simple_name(), "Outer");

        assert!(model.class_at(&SourcePosition::new("src/Outer.java", 51)).is_none());
        assert!(model.class_at(&SourcePosition::new("src/Other.java", 15)).is_none());
    }

    #[test]
    fn test_build_class_map() {
        let mut model = ClassModel::new();
        model.classes.push(ClassDef::new("a.A", ClassKind::Class));
        model.classes.push(ClassDef::new("a.B", ClassKind::Enum));
        model.build_class_map();

        assert!(model.has_class("a.A"));
        assert!(model.lookup("B").unwrap().is_enum());
    }

    #[test]
    fn test_annotation_attribute_lookup() {
        let annotation = AnnotationDef::new("io.swagger.annotations.ApiModelProperty")
            .with_attribute("value", "\"user id\"")
            .with_attribute("required", "true");
        assert_eq!(annotation.attribute("value"), Some("\"user id\""));
        assert_eq!(annotation.attribute("name"), None);

        let mut field = FieldDef::new("id", DeclaredType::reference("Long"));
        field.add_annotation(annotation);
        assert!(
            field
                .annotation("io.swagger.annotations.ApiModelProperty")
                .is_some()
        );
    }

    #[test]
    fn test_primitive_kind_names() {
        for name in [
            "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
        ] {
            let kind = PrimitiveKind::from_name(name).expect("known primitive");
            assert_eq!(kind.name(), name);
        }
        assert_eq!(PrimitiveKind::from_name("String"), None);
    }

    #[test]
    fn test_class_kind_parse() {
        assert_eq!(ClassKind::parse("enum"), Some(ClassKind::Enum));
        assert_eq!(ClassKind::parse("record"), None);
        assert_eq!(ClassKind::Interface.as_str(), "interface");
    }
}
