//! Declared field types as written in the host model.
//!
//! The grammar is the one Java uses for field types:
//!
//! ```text
//! type     := wildcard | name ['<' type (',' type)* '>'] dims
//! wildcard := '?' [('extends' | 'super') type]
//! dims     := ('[]' | '...')*
//! ```
//!
//! Wildcards are unwrapped to their bound (`? extends T` is `T`); an unbounded
//! `?` becomes `java.lang.Object`.

use crate::error::ParseError;
use crate::types::PrimitiveKind;
use std::fmt;
use std::str::FromStr;

/// A field type as declared, before the host model resolves names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// Primitive type, possibly with array dimensions.
    Primitive {
        /// Primitive kind.
        kind: PrimitiveKind,
        /// Number of array dimensions.
        dims: usize,
    },
    /// Class, interface, enum or type-variable reference.
    Reference {
        /// Name as written (simple or qualified).
        name: String,
        /// Generic type arguments.
        args: Vec<DeclaredType>,
        /// Number of array dimensions.
        dims: usize,
    },
}

impl DeclaredType {
    /// Parses a declared type from its textual form.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidType` if the text does not follow the grammar.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut parser = TypeParser::new(text);
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(parsed)
    }

    /// Creates a scalar reference with no type arguments.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference {
            name: name.into(),
            args: Vec::new(),
            dims: 0,
        }
    }

    /// Returns the number of array dimensions.
    #[must_use]
    pub const fn dims(&self) -> usize {
        match self {
            Self::Primitive { dims, .. } | Self::Reference { dims, .. } => *dims,
        }
    }

    /// Returns true if this is an array type.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.dims() > 0
    }

    /// Returns the same type with one array dimension removed.
    #[must_use]
    pub fn component(&self) -> Self {
        let mut component = self.clone();
        match &mut component {
            Self::Primitive { dims, .. } | Self::Reference { dims, .. } => {
                *dims = dims.saturating_sub(1);
            }
        }
        component
    }

    /// Returns the referenced name, or `None` for primitives.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Primitive { .. } => None,
            Self::Reference { name, .. } => Some(name),
        }
    }

    /// Returns the generic type arguments.
    #[must_use]
    pub fn args(&self) -> &[DeclaredType] {
        match self {
            Self::Primitive { .. } => &[],
            Self::Reference { args, .. } => args,
        }
    }

    fn with_dims(self, extra: usize) -> Self {
        match self {
            Self::Primitive { kind, dims } => Self::Primitive {
                kind,
                dims: dims + extra,
            },
            Self::Reference { name, args, dims } => Self::Reference {
                name,
                args,
                dims: dims + extra,
            },
        }
    }
}

impl FromStr for DeclaredType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = match self {
            Self::Primitive { kind, dims } => {
                f.write_str(kind.name())?;
                *dims
            }
            Self::Reference { name, args, dims } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                *dims
            }
        };
        for _ in 0..dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

struct TypeParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::invalid_type(self.text, format!("{message} at offset {}", self.pos))
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Result<DeclaredType, ParseError> {
        self.skip_whitespace();
        if self.eat("?") {
            return self.parse_wildcard();
        }

        let name = self.parse_name()?;
        let mut args = Vec::new();
        if self.eat("<") {
            loop {
                args.push(self.parse_type()?);
                if self.eat(",") {
                    continue;
                }
                if self.eat(">") {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }
        let dims = self.parse_dims()?;

        if let Some(kind) = PrimitiveKind::from_name(&name) {
            if !args.is_empty() {
                return Err(self.error("primitive types take no type arguments"));
            }
            return Ok(DeclaredType::Primitive { kind, dims });
        }

        Ok(DeclaredType::Reference { name, args, dims })
    }

    fn parse_wildcard(&mut self) -> Result<DeclaredType, ParseError> {
        self.skip_whitespace();
        let bounded = self.rest().starts_with("extends") || self.rest().starts_with("super");
        if bounded {
            let keyword = if self.rest().starts_with("extends") {
                "extends"
            } else {
                "super"
            };
            self.pos += keyword.len();
            let bound = self.parse_type()?;
            let dims = self.parse_dims()?;
            return Ok(bound.with_dims(dims));
        }
        Ok(DeclaredType::reference("java.lang.Object"))
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let rest = self.rest();
        let is_ident = |c: char| c.is_alphanumeric() || matches!(c, '_' | '$');
        let mut len = 0;
        for (i, c) in rest.char_indices() {
            if is_ident(c) {
                len = i + c.len_utf8();
            } else if c == '.' && !rest[i..].starts_with("...") {
                len = i + 1;
            } else {
                break;
            }
        }
        if len == 0 {
            return Err(self.error("expected a type name"));
        }
        let name = &rest[..len];
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error("malformed qualified name"));
        }
        self.pos += len;
        Ok(name.to_string())
    }

    fn parse_dims(&mut self) -> Result<usize, ParseError> {
        let mut dims = 0;
        loop {
            if self.eat("...") {
                dims += 1;
            } else if self.eat("[") {
                if !self.eat("]") {
                    return Err(self.error("expected ']'"));
                }
                dims += 1;
            } else {
                return Ok(dims);
            }
        }
    }
}
