//! Platform classes every model starts with.
//!
//! Only the inheritance graph matters here: platform classes carry no fields.
//! The well-known table and the collection check both work off supertype
//! names, so `java.lang.Integer` must know it extends `java.lang.Number` and
//! `java.util.ArrayList` must know it reaches `java.util.Collection`.

use crate::declared::DeclaredType;
use crate::types::{ClassDef, ClassKind};

/// Qualified names whose presence among a type's supertypes marks a collection.
pub const COLLECTION_ROOTS: &[&str] = &["java.util.Collection", "java.lang.Iterable"];

// (name, kind, superclass, interfaces, type params)
type Entry = (
    &'static str,
    ClassKind,
    Option<&'static str>,
    &'static [&'static str],
    &'static [&'static str],
);

const PLATFORM: &[Entry] = &[
    ("java.lang.Object", ClassKind::Class, None, &[], &[]),
    ("java.io.Serializable", ClassKind::Interface, None, &[], &[]),
    ("java.lang.Comparable", ClassKind::Interface, None, &[], &["T"]),
    ("java.lang.CharSequence", ClassKind::Interface, None, &[], &[]),
    (
        "java.lang.String",
        ClassKind::Class,
        None,
        &["java.io.Serializable", "java.lang.Comparable<java.lang.String>", "java.lang.CharSequence"],
        &[],
    ),
    (
        "java.lang.Boolean",
        ClassKind::Class,
        None,
        &["java.io.Serializable", "java.lang.Comparable<java.lang.Boolean>"],
        &[],
    ),
    (
        "java.lang.Character",
        ClassKind::Class,
        None,
        &["java.io.Serializable", "java.lang.Comparable<java.lang.Character>"],
        &[],
    ),
    ("java.lang.Number", ClassKind::Class, None, &["java.io.Serializable"], &[]),
    ("java.lang.Byte", ClassKind::Class, Some("java.lang.Number"), &["java.lang.Comparable<java.lang.Byte>"], &[]),
    ("java.lang.Short", ClassKind::Class, Some("java.lang.Number"), &["java.lang.Comparable<java.lang.Short>"], &[]),
    ("java.lang.Integer", ClassKind::Class, Some("java.lang.Number"), &["java.lang.Comparable<java.lang.Integer>"], &[]),
    ("java.lang.Long", ClassKind::Class, Some("java.lang.Number"), &["java.lang.Comparable<java.lang.Long>"], &[]),
    ("java.lang.Float", ClassKind::Class, Some("java.lang.Number"), &["java.lang.Comparable<java.lang.Float>"], &[]),
    ("java.lang.Double", ClassKind::Class, Some("java.lang.Number"), &["java.lang.Comparable<java.lang.Double>"], &[]),
    ("java.math.BigDecimal", ClassKind::Class, Some("java.lang.Number"), &["java.lang.Comparable<java.math.BigDecimal>"], &[]),
    ("java.math.BigInteger", ClassKind::Class, Some("java.lang.Number"), &["java.lang.Comparable<java.math.BigInteger>"], &[]),
    ("java.util.UUID", ClassKind::Class, None, &["java.io.Serializable", "java.lang.Comparable<java.util.UUID>"], &[]),
    ("java.util.Date", ClassKind::Class, None, &["java.io.Serializable", "java.lang.Comparable<java.util.Date>"], &[]),
    ("java.time.LocalDate", ClassKind::Class, None, &["java.io.Serializable"], &[]),
    ("java.time.LocalDateTime", ClassKind::Class, None, &["java.io.Serializable"], &[]),
    ("java.time.LocalTime", ClassKind::Class, None, &["java.io.Serializable"], &[]),
    ("java.lang.Iterable", ClassKind::Interface, None, &[], &["T"]),
    ("java.util.Collection", ClassKind::Interface, None, &["java.lang.Iterable<E>"], &["E"]),
    ("java.util.List", ClassKind::Interface, None, &["java.util.Collection<E>"], &["E"]),
    ("java.util.Set", ClassKind::Interface, None, &["java.util.Collection<E>"], &["E"]),
    ("java.util.SortedSet", ClassKind::Interface, None, &["java.util.Set<E>"], &["E"]),
    ("java.util.Queue", ClassKind::Interface, None, &["java.util.Collection<E>"], &["E"]),
    ("java.util.Deque", ClassKind::Interface, None, &["java.util.Queue<E>"], &["E"]),
    ("java.util.ArrayList", ClassKind::Class, None, &["java.util.List<E>", "java.io.Serializable"], &["E"]),
    ("java.util.LinkedList", ClassKind::Class, None, &["java.util.List<E>", "java.util.Deque<E>"], &["E"]),
    ("java.util.HashSet", ClassKind::Class, None, &["java.util.Set<E>", "java.io.Serializable"], &["E"]),
    ("java.util.LinkedHashSet", ClassKind::Class, Some("java.util.HashSet<E>"), &["java.util.Set<E>"], &["E"]),
    ("java.util.TreeSet", ClassKind::Class, None, &["java.util.SortedSet<E>", "java.io.Serializable"], &["E"]),
    ("java.util.Map", ClassKind::Interface, None, &[], &["K", "V"]),
    ("java.util.HashMap", ClassKind::Class, None, &["java.util.Map<K, V>", "java.io.Serializable"], &["K", "V"]),
    ("java.util.LinkedHashMap", ClassKind::Class, Some("java.util.HashMap<K, V>"), &["java.util.Map<K, V>"], &["K", "V"]),
    ("java.util.Optional", ClassKind::Class, None, &[], &["T"]),
];

/// Builds the platform class definitions.
#[must_use]
pub fn platform_classes() -> Vec<ClassDef> {
    PLATFORM
        .iter()
        .map(|(name, kind, extends, implements, type_params)| {
            let mut class = ClassDef::new(*name, *kind);
            class.extends = extends.map(platform_type);
            class.implements = implements.iter().copied().map(platform_type).collect();
            class.type_params = type_params.iter().map(ToString::to_string).collect();
            class
        })
        .collect()
}

fn platform_type(text: &str) -> DeclaredType {
    // The table above is static; a malformed entry degrades to a bare reference.
    DeclaredType::parse(text).unwrap_or_else(|_| DeclaredType::reference(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_entries_parse() {
        for (_, _, extends, implements, _) in PLATFORM {
            for text in extends.iter().chain(implements.iter()) {
                assert!(DeclaredType::parse(text).is_ok(), "bad platform type {text}");
            }
        }
    }

    #[test]
    fn test_platform_names_unique() {
        let classes = platform_classes();
        let mut names: Vec<_> = classes.iter().map(|c| c.qualified_name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), classes.len());
    }

    #[test]
    fn test_collection_roots_present() {
        let classes = platform_classes();
        for root in COLLECTION_ROOTS {
            assert!(classes.iter().any(|c| c.qualified_name == *root));
        }
    }
}
