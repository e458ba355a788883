//! Class model XML parser.
//!
//! This module reads the XML dump of a host symbol model into a
//! [`ClassModel`]. The document root is `<model>`; each `<class>`,
//! `<interface>` or `<enum>` element declares one type and may nest further
//! declarations.

use crate::declared::DeclaredType;
use crate::error::ParseError;
use crate::types::{AnnotationDef, ClassDef, ClassKind, ClassModel, FieldDef, SourceSpan};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashSet;

/// Parses a class model from an XML string.
///
/// The returned model is seeded with the platform classes; declarations in
/// the document replace platform classes with the same qualified name.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid model elements.
pub fn parse_model(xml: &str) -> Result<ClassModel, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut model: Option<ClassModel> = None;
    let mut declared = HashSet::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e.into_owned(), false),
            Ok(Event::Empty(e)) => (e.into_owned(), true),
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => continue,
        };
        let name_bytes = e.name().as_ref().to_vec();
        let name = std::str::from_utf8(&name_bytes)?;

        if name == "model" && model.is_none() {
            model = Some(ClassModel::with_platform());
        } else if let Some(model) = model.as_mut() {
            let kind = ClassKind::parse(name)
                .ok_or_else(|| ParseError::unknown_element(name, "model"))?;
            parse_class(&mut reader, &e, kind, empty, model, &mut declared)?;
        } else {
            return Err(ParseError::unknown_element(name, "document"));
        }
    }

    let model = model.ok_or_else(|| ParseError::InvalidStructure {
        message: "No model element found".to_string(),
    })?;
    tracing::debug!(
        "Parsed class model with {} declared classes ({} total)",
        declared.len(),
        model.classes.len()
    );
    Ok(model)
}

/// Parses a class model from an XML file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_model_file(path: &std::path::Path) -> Result<ClassModel, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_model(&xml)
}

/// Reads an attribute value, decoding XML escapes.
fn attr_value(raw: &[u8]) -> Result<String, ParseError> {
    let text = std::str::from_utf8(raw)?;
    Ok(quick_xml::escape::unescape(text)?.into_owned())
}

/// Parses a declared type attribute.
fn parse_type_attr(
    element: &str,
    attribute: &str,
    value: &str,
) -> Result<DeclaredType, ParseError> {
    DeclaredType::parse(value).map_err(|_| ParseError::invalid_attr(element, attribute, value))
}

/// Splits a comma separated list of types, ignoring commas inside `<...>`.
fn split_type_list(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts.into_iter().filter(|p| !p.is_empty()).collect()
}

/// Parses a class, interface or enum declaration and adds it (and any nested
/// declarations) to the model.
fn parse_class(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    kind: ClassKind,
    empty: bool,
    model: &mut ClassModel,
    declared: &mut HashSet<String>,
) -> Result<(), ParseError> {
    let element = kind.as_str();
    let mut name = None;
    let mut extends = None;
    let mut implements = Vec::new();
    let mut type_params = Vec::new();
    let mut file = None;
    let mut start_line: Option<usize> = None;
    let mut end_line: Option<usize> = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr_value(&attr.value)?;

        match key {
            "name" => name = Some(value),
            "extends" => extends = Some(parse_type_attr(element, "extends", &value)?),
            "implements" => {
                for part in split_type_list(&value) {
                    implements.push(parse_type_attr(element, "implements", part)?);
                }
            }
            "typeParams" => {
                type_params = value
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(ToString::to_string)
                    .collect();
            }
            "file" => file = Some(value),
            "startLine" => {
                start_line = Some(
                    value
                        .parse()
                        .map_err(|_| ParseError::invalid_attr(element, "startLine", &value))?,
                )
            }
            "endLine" => {
                end_line = Some(
                    value
                        .parse()
                        .map_err(|_| ParseError::invalid_attr(element, "endLine", &value))?,
                )
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr(element, "name"))?;
    if !declared.insert(name.clone()) {
        return Err(ParseError::duplicate(element, name));
    }

    let mut class = ClassDef::new(name, kind);
    class.extends = extends;
    class.implements = implements;
    class.type_params = type_params;
    class.source = match (file, start_line, end_line) {
        (Some(file), Some(start), end) => {
            let end = end.unwrap_or(start);
            if end < start {
                return Err(ParseError::invalid_attr(element, "endLine", end.to_string()));
            }
            Some(SourceSpan::new(file, start, end))
        }
        (Some(_), None, _) => return Err(ParseError::missing_attr(element, "startLine")),
        (None, Some(_), _) | (None, _, Some(_)) => {
            return Err(ParseError::missing_attr(element, "file"));
        }
        (None, None, None) => None,
    };

    if !empty {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref child)) => {
                    let name_bytes = child.name().as_ref().to_vec();
                    let tag_name = std::str::from_utf8(&name_bytes)?;
                    parse_class_child(reader, child, tag_name, false, &mut class, model, declared)?;
                }
                Ok(Event::Empty(ref child)) => {
                    let name_bytes = child.name().as_ref().to_vec();
                    let tag_name = std::str::from_utf8(&name_bytes)?;
                    parse_class_child(reader, child, tag_name, true, &mut class, model, declared)?;
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => {
                    return Err(ParseError::InvalidStructure {
                        message: format!("unterminated {element} '{}'", class.qualified_name),
                    });
                }
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    model.add_class(class);
    Ok(())
}

/// Dispatches a child element of a class declaration.
fn parse_class_child(
    reader: &mut Reader<&[u8]>,
    child: &BytesStart<'_>,
    tag_name: &str,
    empty: bool,
    class: &mut ClassDef,
    model: &mut ClassModel,
    declared: &mut HashSet<String>,
) -> Result<(), ParseError> {
    match tag_name {
        "field" => {
            let field = parse_field(reader, child, empty)?;
            class.add_field(field);
        }
        "constant" if class.is_enum() => {
            let constant = parse_constant(child)?;
            if !empty {
                skip_to_end(reader)?;
            }
            class.add_constant(constant);
        }
        nested => match ClassKind::parse(nested) {
            Some(kind) => parse_class(reader, child, kind, empty, model, declared)?,
            None => {
                return Err(ParseError::unknown_element(
                    nested,
                    class.qualified_name.as_str(),
                ));
            }
        },
    }
    Ok(())
}

/// Parses a field definition.
fn parse_field(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<FieldDef, ParseError> {
    let mut name = None;
    let mut type_text = None;
    let mut is_static = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr_value(&attr.value)?;

        match key {
            "name" => name = Some(value),
            "type" => type_text = Some(value),
            "static" => {
                is_static = value
                    .parse()
                    .map_err(|_| ParseError::invalid_attr("field", "static", &value))?
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let type_text = type_text.ok_or_else(|| ParseError::missing_attr("field", "type"))?;
    let declared_type = parse_type_attr("field", "type", &type_text)?;

    let mut field = FieldDef::new(name, declared_type);
    field.is_static = is_static;

    if !empty {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref child)) => {
                    let name_bytes = child.name().as_ref().to_vec();
                    let tag_name = std::str::from_utf8(&name_bytes)?;
                    if tag_name != "annotation" {
                        return Err(ParseError::unknown_element(tag_name, "field"));
                    }
                    field.add_annotation(parse_annotation(reader, child, false)?);
                }
                Ok(Event::Empty(ref child)) => {
                    let name_bytes = child.name().as_ref().to_vec();
                    let tag_name = std::str::from_utf8(&name_bytes)?;
                    if tag_name != "annotation" {
                        return Err(ParseError::unknown_element(tag_name, "field"));
                    }
                    field.add_annotation(parse_annotation(reader, child, true)?);
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    Ok(field)
}

/// Parses an annotation and its attributes.
fn parse_annotation(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<AnnotationDef, ParseError> {
    let mut name = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "name" {
            name = Some(attr_value(&attr.value)?);
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("annotation", "name"))?;
    let mut annotation = AnnotationDef::new(name);

    if !empty {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref child)) => {
                    let (key, text) = parse_annotation_attribute(reader, child, false)?;
                    annotation.attributes.push((key, text));
                }
                Ok(Event::Empty(ref child)) => {
                    let (key, text) = parse_annotation_attribute(reader, child, true)?;
                    annotation.attributes.push((key, text));
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    Ok(annotation)
}

/// Parses an annotation attribute; its text content is the raw source text.
fn parse_annotation_attribute(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<(String, String), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    if tag_name != "attribute" {
        return Err(ParseError::unknown_element(tag_name, "annotation"));
    }

    let mut name = None;
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "name" {
            name = Some(attr_value(&attr.value)?);
        }
    }
    let name = name.ok_or_else(|| ParseError::missing_attr("attribute", "name"))?;

    let mut text = String::new();
    if !empty {
        // Entity references split the text into several events.
        reader.config_mut().trim_text(false);
        let mut buf = Vec::new();
        let result = loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Text(ref t)) => text.push_str(std::str::from_utf8(t.as_ref())?),
                Ok(Event::GeneralRef(ref r)) => {
                    let entity = std::str::from_utf8(r.as_ref())?;
                    text.push_str(&resolve_entity(entity)?);
                }
                Ok(Event::End(_)) | Ok(Event::Eof) => break Ok(()),
                Err(e) => break Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        };
        reader.config_mut().trim_text(true);
        result?;
    }

    Ok((name, text.trim().to_string()))
}

/// Resolves a predefined or character entity reference (without `&` and `;`).
fn resolve_entity(entity: &str) -> Result<String, ParseError> {
    if let Some(resolved) = quick_xml::escape::resolve_predefined_entity(entity) {
        return Ok(resolved.to_string());
    }
    let code = match entity.strip_prefix("#x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => entity.strip_prefix('#').and_then(|dec| dec.parse().ok()),
    };
    code.and_then(char::from_u32)
        .map(String::from)
        .ok_or_else(|| ParseError::InvalidStructure {
            message: format!("unsupported entity reference '&{entity};'"),
        })
}

/// Parses an enum constant.
fn parse_constant(e: &BytesStart<'_>) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "name" {
            return attr_value(&attr.value);
        }
    }
    Err(ParseError::missing_attr("constant", "name"))
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
