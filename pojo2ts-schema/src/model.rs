//! The host type model seen by the generator.
//!
//! [`TypeModel`] is the seam between the generator and whatever owns the
//! symbol table (an IDE, an annotation processor, or a parsed [`ClassModel`]).
//! Implementors supply class lookup and caret resolution; inheritance walks,
//! the collection capability check and the lowering of declared types into
//! [`TypeRef`]s are provided on top of those two.

use std::collections::{HashSet, VecDeque};

use crate::declared::DeclaredType;
use crate::ir::TypeRef;
use crate::platform::COLLECTION_ROOTS;
use crate::types::{ClassDef, ClassModel, FieldDef, SourcePosition, simple_name};

/// Host-provided class and type model.
pub trait TypeModel {
    /// Looks up a class by qualified name (or unambiguous simple name).
    fn find_class(&self, name: &str) -> Option<&ClassDef>;

    /// Returns the class declaration enclosing a source position.
    fn selected_class(&self, position: &SourcePosition) -> Option<&ClassDef>;

    /// Returns every transitive supertype, breadth-first in declaration order.
    ///
    /// Resolvable supertypes are reported by qualified name; names the model
    /// cannot resolve are reported as written and not walked further.
    fn supertype_closure<'a>(&'a self, class: &'a ClassDef) -> Vec<String> {
        let mut seen = HashSet::from([class.qualified_name.clone()]);
        let mut queue = VecDeque::from([class]);
        let mut closure = Vec::new();

        while let Some(current) = queue.pop_front() {
            for declared in current.supertypes() {
                let Some(name) = declared.name() else {
                    continue;
                };
                match self.find_class(name) {
                    Some(def) => {
                        if seen.insert(def.qualified_name.clone()) {
                            closure.push(def.qualified_name.clone());
                            queue.push_back(def);
                        }
                    }
                    None => {
                        if seen.insert(name.to_string()) {
                            closure.push(name.to_string());
                        }
                    }
                }
            }
        }

        closure
    }

    /// Returns the simple names of every transitive supertype.
    fn supertype_names(&self, class: &ClassDef) -> Vec<String> {
        self.supertype_closure(class)
            .iter()
            .map(|name| simple_name(name).to_string())
            .collect()
    }

    /// Returns true if the class is, or transitively implements, a collection root.
    fn is_collection(&self, class: &ClassDef) -> bool {
        COLLECTION_ROOTS.contains(&class.qualified_name.as_str())
            || self
                .supertype_closure(class)
                .iter()
                .any(|name| COLLECTION_ROOTS.contains(&name.as_str()))
    }

    /// Returns own fields followed by the fields of each superclass in turn,
    /// then the fields of every implemented interface, each paired with its
    /// declaring class.
    ///
    /// Interfaces are walked breadth-first over the whole superclass chain
    /// and contribute their fields once.
    fn all_fields<'a>(&'a self, class: &'a ClassDef) -> Vec<(&'a ClassDef, &'a FieldDef)> {
        let mut chain = vec![class];
        let mut seen = HashSet::from([class.qualified_name.as_str()]);
        let mut current = class;

        while let Some(parent) = current
            .extends
            .as_ref()
            .and_then(DeclaredType::name)
            .and_then(|name| self.find_class(name))
        {
            if !seen.insert(parent.qualified_name.as_str()) {
                break;
            }
            chain.push(parent);
            current = parent;
        }

        let mut fields: Vec<_> = chain
            .iter()
            .copied()
            .flat_map(|owner| owner.fields.iter().map(move |f| (owner, f)))
            .collect();

        let mut interfaces: VecDeque<&'a DeclaredType> = chain
            .iter()
            .copied()
            .flat_map(|owner| owner.implements.iter())
            .collect();
        while let Some(declared) = interfaces.pop_front() {
            let Some(interface) = declared.name().and_then(|name| self.find_class(name)) else {
                continue;
            };
            if !seen.insert(interface.qualified_name.as_str()) {
                continue;
            }
            fields.extend(interface.fields.iter().map(|f| (interface, f)));
            interfaces.extend(interface.supertypes());
        }

        fields
    }

    /// Lowers a declared type into a semantic reference.
    ///
    /// `context` is the declaring class; its type parameters lower to
    /// [`TypeRef::Unresolved`].
    fn type_ref(&self, declared: &DeclaredType, context: Option<&ClassDef>) -> TypeRef {
        match declared {
            DeclaredType::Primitive { kind, dims } => {
                TypeRef::array_of(TypeRef::Primitive(*kind), *dims)
            }
            DeclaredType::Reference { name, args, dims } => {
                let is_type_param = context.is_some_and(|c| c.has_type_param(name));
                let scalar = match self.find_class(name) {
                    _ if is_type_param => TypeRef::Unresolved { name: name.clone() },
                    None => TypeRef::Unresolved { name: name.clone() },
                    Some(class) if class.is_enum() => TypeRef::Enum {
                        qualified_name: class.qualified_name.clone(),
                    },
                    Some(class) if self.is_collection(class) => TypeRef::Collection {
                        qualified_name: class.qualified_name.clone(),
                        element: self
                            .collection_element(args, class, context)
                            .map(Box::new),
                    },
                    Some(class) => TypeRef::class(class.qualified_name.clone()),
                };
                TypeRef::array_of(scalar, *dims)
            }
        }
    }

    /// Finds the element type of a collection reference.
    ///
    /// Uses the reference's own first type argument; failing that, the first
    /// concrete argument a collection supertype is instantiated with.
    fn collection_element(
        &self,
        args: &[DeclaredType],
        class: &ClassDef,
        context: Option<&ClassDef>,
    ) -> Option<TypeRef> {
        if let Some(first) = args.first() {
            return Some(self.type_ref(first, context));
        }

        let mut seen = HashSet::from([class.qualified_name.clone()]);
        let mut queue = VecDeque::from([class]);
        while let Some(current) = queue.pop_front() {
            for declared in current.supertypes() {
                let Some(def) = declared.name().and_then(|name| self.find_class(name)) else {
                    continue;
                };
                if !self.is_collection(def) || !seen.insert(def.qualified_name.clone()) {
                    continue;
                }
                if let Some(arg) = declared.args().first() {
                    let bound_by_param = arg.name().is_some_and(|n| current.has_type_param(n));
                    return (!bound_by_param).then(|| self.type_ref(arg, Some(current)));
                }
                queue.push_back(def);
            }
        }

        None
    }
}

impl TypeModel for ClassModel {
    fn find_class(&self, name: &str) -> Option<&ClassDef> {
        self.lookup(name)
    }

    fn selected_class(&self, position: &SourcePosition) -> Option<&ClassDef> {
        self.class_at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassKind, PrimitiveKind};

    fn declared(text: &str) -> DeclaredType {
        DeclaredType::parse(text).expect("Failed to parse type")
    }

    fn test_model() -> ClassModel {
        let mut model = ClassModel::with_platform();

        let mut base = ClassDef::new("com.acme.Base", ClassKind::Class);
        base.add_field(FieldDef::new("id", declared("java.lang.Long")));
        base.add_field(FieldDef::new("name", declared("String")));
        model.add_class(base);

        let mut user = ClassDef::new("com.acme.User", ClassKind::Class);
        user.extends = Some(declared("com.acme.Base"));
        user.add_field(FieldDef::new("email", declared("String")));
        user.add_field(FieldDef::new("name", declared("String")));
        model.add_class(user);

        let mut status = ClassDef::new("com.acme.Status", ClassKind::Enum);
        status.add_constant("ACTIVE");
        model.add_class(status);

        let mut tags = ClassDef::new("com.acme.TagList", ClassKind::Class);
        tags.extends = Some(declared("java.util.ArrayList<String>"));
        model.add_class(tags);

        let mut page = ClassDef::new("com.acme.Page", ClassKind::Class);
        page.type_params = vec!["T".to_string()];
        page.add_field(FieldDef::new("items", declared("java.util.List<T>")));
        model.add_class(page);

        model
    }

    #[test]
    fn test_supertype_names_breadth_first() {
        let model = test_model();
        let integer = model.find_class("java.lang.Integer").unwrap();
        let names = model.supertype_names(integer);
        assert_eq!(names[0], "Number");
        assert_eq!(names[1], "Comparable");
        assert!(names.contains(&"Serializable".to_string()));
    }

    #[test]
    fn test_unresolvable_supertype_reported_as_written() {
        let mut model = ClassModel::new();
        let mut class = ClassDef::new("a.A", ClassKind::Class);
        class.extends = Some(declared("lib.Missing"));
        model.add_class(class);
        let a = model.find_class("a.A").unwrap();
        assert_eq!(model.supertype_closure(a), vec!["lib.Missing".to_string()]);
    }

    #[test]
    fn test_is_collection() {
        let model = test_model();
        for name in ["java.util.ArrayList", "java.util.Set", "java.lang.Iterable", "com.acme.TagList"] {
            let class = model.find_class(name).unwrap();
            assert!(model.is_collection(class), "{name} should be a collection");
        }
        for name in ["java.util.Map", "java.lang.String", "com.acme.User"] {
            let class = model.find_class(name).unwrap();
            assert!(!model.is_collection(class), "{name} should not be a collection");
        }
    }

    #[test]
    fn test_all_fields_own_then_inherited() {
        let model = test_model();
        let user = model.find_class("com.acme.User").unwrap();
        let fields = model.all_fields(user);
        let names: Vec<_> = fields.iter().map(|(_, f)| f.name.as_str()).collect();
        assert_eq!(names, vec!["email", "name", "id", "name"]);
        assert_eq!(fields[2].0.qualified_name, "com.acme.Base");
    }

    #[test]
    fn test_all_fields_survives_inheritance_cycle() {
        let mut model = ClassModel::new();
        let mut a = ClassDef::new("a.A", ClassKind::Class);
        a.extends = Some(declared("a.B"));
        a.add_field(FieldDef::new("x", declared("int")));
        let mut b = ClassDef::new("a.B", ClassKind::Class);
        b.extends = Some(declared("a.A"));
        b.add_field(FieldDef::new("y", declared("int")));
        model.add_class(a);
        model.add_class(b);

        let a = model.find_class("a.A").unwrap();
        assert_eq!(model.all_fields(a).len(), 2);
    }

    #[test]
    fn test_all_fields_includes_interface_fields() {
        let mut model = ClassModel::with_platform();

        let mut codes = ClassDef::new("a.Codes", ClassKind::Interface);
        codes.add_field(FieldDef::new("PREFIX", declared("String")));
        let mut named = ClassDef::new("a.Named", ClassKind::Interface);
        named.implements = vec![declared("a.Codes")];
        named.add_field(FieldDef::new("LABEL", declared("String")));
        let mut base = ClassDef::new("a.Base", ClassKind::Class);
        base.implements = vec![declared("a.Codes")];
        base.add_field(FieldDef::new("id", declared("long")));
        let mut item = ClassDef::new("a.Item", ClassKind::Class);
        item.extends = Some(declared("a.Base"));
        item.implements = vec![declared("a.Named"), declared("java.io.Serializable")];
        item.add_field(FieldDef::new("sku", declared("String")));
        for class in [codes, named, base, item] {
            model.add_class(class);
        }

        let item = model.find_class("a.Item").unwrap();
        let fields = model.all_fields(item);
        let names: Vec<_> = fields.iter().map(|(_, f)| f.name.as_str()).collect();
        assert_eq!(names, vec!["sku", "id", "LABEL", "PREFIX"]);
        assert_eq!(fields[3].0.qualified_name, "a.Codes");
    }

    #[test]
    fn test_type_ref_lowering() {
        let model = test_model();

        assert_eq!(
            model.type_ref(&declared("int[][]"), None),
            TypeRef::array_of(TypeRef::Primitive(PrimitiveKind::Int), 2)
        );
        assert_eq!(
            model.type_ref(&declared("Status"), None),
            TypeRef::Enum {
                qualified_name: "com.acme.Status".to_string()
            }
        );
        assert_eq!(
            model.type_ref(&declared("com.acme.User"), None),
            TypeRef::class("com.acme.User")
        );
        assert_eq!(
            model.type_ref(&declared("org.unknown.Thing"), None),
            TypeRef::Unresolved {
                name: "org.unknown.Thing".to_string()
            }
        );
    }

    #[test]
    fn test_collection_element_lowering() {
        let model = test_model();

        let list = model.type_ref(&declared("java.util.List<com.acme.User>"), None);
        assert_eq!(
            list,
            TypeRef::Collection {
                qualified_name: "java.util.List".to_string(),
                element: Some(Box::new(TypeRef::class("com.acme.User"))),
            }
        );

        let raw = model.type_ref(&declared("java.util.List"), None);
        assert!(matches!(raw, TypeRef::Collection { element: None, .. }));

        let inherited = model.type_ref(&declared("com.acme.TagList"), None);
        assert_eq!(
            inherited,
            TypeRef::Collection {
                qualified_name: "com.acme.TagList".to_string(),
                element: Some(Box::new(TypeRef::class("java.lang.String"))),
            }
        );
    }

    #[test]
    fn test_type_params_lower_to_unresolved() {
        let model = test_model();
        let page = model.find_class("com.acme.Page").unwrap();
        let items = model.type_ref(&page.fields[0].declared_type, Some(page));
        assert_eq!(
            items,
            TypeRef::Collection {
                qualified_name: "java.util.List".to_string(),
                element: Some(Box::new(TypeRef::Unresolved {
                    name: "T".to_string()
                })),
            }
        );
    }

    #[test]
    fn test_selected_class_delegates_to_spans() {
        let mut model = ClassModel::new();
        let mut class = ClassDef::new("a.A", ClassKind::Class);
        class.source = Some(crate::types::SourceSpan::new("A.java", 1, 10));
        model.add_class(class);
        let selected = model.selected_class(&SourcePosition::new("A.java", 3));
        assert_eq!(selected.map(ClassDef::simple_name), Some("A"));
    }
}
