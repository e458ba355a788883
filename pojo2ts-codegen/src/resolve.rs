//! Type resolution.
//!
//! [`TypeResolver`] maps a [`TypeRef`] onto a [`TypeExpr`], expanding every
//! class it reaches exactly once. Discovered classes accumulate in the
//! [`ResolveContext`], which lives for a single generation run.
//!
//! Dispatch order for a reference:
//! 1. primitive
//! 2. array (collapsed to one suffix)
//! 3. enum (first constant)
//! 4. collection (element type plus one suffix)
//! 5. well-known wrapper (own simple name, then supertypes breadth-first)
//! 6. plain object (simple name, registered on first visit)
//!
//! Class expansion does not recurse: a newly discovered class is reserved in
//! the registry and pushed onto an explicit stack of pending classes, so the
//! native stack stays flat however deep the class graph goes. Pending classes
//! are expanded depth-first, which keeps the registry in the same discovery
//! order a recursive walk would produce.

use indexmap::map::IntoIter;
use pojo2ts_schema::{ClassDef, TypeModel, TypeRef};

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::extract::{FieldDescriptor, FieldExtractor};
use crate::registry::{ClassShape, ModelRegistry};
use crate::typescript::types::TypeExpr;
use crate::well_known::WellKnownTypeTable;

/// A discovered class whose fields are still being resolved.
#[derive(Debug)]
struct PendingClass {
    shape: ClassShape,
    fields: IntoIter<String, FieldDescriptor>,
    depth: usize,
}

/// Per-run resolution state.
#[derive(Debug, Default)]
pub struct ResolveContext {
    /// Discovered class shapes.
    pub registry: ModelRegistry,
    pending: Vec<PendingClass>,
}

impl ResolveContext {
    /// Creates empty state for a new run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the class has been visited in this run.
    #[must_use]
    pub fn is_visited(&self, qualified_name: &str) -> bool {
        self.registry.contains(qualified_name)
    }

    /// Consumes the context, returning the registry.
    #[must_use]
    pub fn into_registry(self) -> ModelRegistry {
        self.registry
    }
}

/// Resolves host types into TypeScript type expressions.
pub struct TypeResolver<'a, M: TypeModel + ?Sized> {
    model: &'a M,
    config: &'a GeneratorConfig,
    extractor: FieldExtractor<'a, M>,
}

impl<'a, M: TypeModel + ?Sized> TypeResolver<'a, M> {
    /// Creates a new type resolver.
    #[must_use]
    pub fn new(model: &'a M, config: &'a GeneratorConfig) -> Self {
        Self {
            model,
            config,
            extractor: FieldExtractor::new(model, config),
        }
    }

    /// Registers the root class and everything reachable from its fields.
    ///
    /// The root is registered before anything it references, so it comes
    /// first in the registry.
    ///
    /// # Errors
    /// Returns `CodegenError` if extraction or resolution of any reachable
    /// class fails.
    pub fn resolve_root(
        &self,
        ctx: &mut ResolveContext,
        root: &ClassDef,
    ) -> Result<(), CodegenError> {
        let result = self
            .discover(ctx, root, 0)
            .and_then(|()| self.expand_pending(ctx));
        Self::abandon_on_error(ctx, result)
    }

    /// Resolves one type reference at the given depth, expanding every class
    /// it discovers.
    ///
    /// # Errors
    /// Returns `CodegenError::RecursionLimitExceeded` past the depth ceiling,
    /// `CodegenError::MissingTypeParameter` for a collection without an
    /// element type, or any error raised while expanding a nested class.
    pub fn resolve(
        &self,
        ctx: &mut ResolveContext,
        type_ref: &TypeRef,
        depth: usize,
    ) -> Result<TypeExpr, CodegenError> {
        let result = self.resolve_type(ctx, type_ref, depth).and_then(|expr| {
            self.expand_pending(ctx)?;
            Ok(expr)
        });
        Self::abandon_on_error(ctx, result)
    }

    fn abandon_on_error<T>(
        ctx: &mut ResolveContext,
        result: Result<T, CodegenError>,
    ) -> Result<T, CodegenError> {
        if result.is_err() {
            ctx.pending.clear();
        }
        result
    }

    /// Maps one reference without expanding the classes it discovers.
    fn resolve_type(
        &self,
        ctx: &mut ResolveContext,
        type_ref: &TypeRef,
        depth: usize,
    ) -> Result<TypeExpr, CodegenError> {
        let limit = self.config.depth_limit();
        if depth > limit {
            return Err(CodegenError::RecursionLimitExceeded { depth, limit });
        }

        match type_ref {
            TypeRef::Primitive(kind) => Ok(TypeExpr::for_primitive(*kind)),
            TypeRef::Array(_) => {
                let element = self.resolve_type(ctx, type_ref.deep_component(), depth + 1)?;
                Ok(TypeExpr::array(element))
            }
            TypeRef::Enum { qualified_name } => Ok(self.resolve_enum(qualified_name)),
            TypeRef::Collection {
                qualified_name,
                element,
            } => {
                let element = element.as_deref().ok_or_else(|| {
                    CodegenError::MissingTypeParameter {
                        type_name: qualified_name.clone(),
                    }
                })?;
                let element = self.resolve_type(ctx, element, depth + 1)?;
                Ok(TypeExpr::array(element))
            }
            TypeRef::Class { qualified_name, .. } => match self.model.find_class(qualified_name) {
                Some(class) => self.resolve_class(ctx, class, depth),
                None => {
                    tracing::debug!("Class {} missing from the model", qualified_name);
                    Ok(TypeExpr::EmptyObject)
                }
            },
            TypeRef::Unresolved { name } => {
                tracing::debug!("Unresolved type reference {}", name);
                Ok(TypeExpr::EmptyObject)
            }
        }
    }

    fn resolve_enum(&self, qualified_name: &str) -> TypeExpr {
        self.model
            .find_class(qualified_name)
            .and_then(|class| class.enum_constants.first())
            .map_or_else(
                || TypeExpr::Literal(String::new()),
                |constant| TypeExpr::EnumConstant(constant.clone()),
            )
    }

    fn resolve_class(
        &self,
        ctx: &mut ResolveContext,
        class: &ClassDef,
        depth: usize,
    ) -> Result<TypeExpr, CodegenError> {
        let supertypes = self.model.supertype_names(class);
        let candidates =
            std::iter::once(class.simple_name()).chain(supertypes.iter().map(String::as_str));
        if let Some(ts) = WellKnownTypeTable::first_match(candidates) {
            return Ok(TypeExpr::Primitive(ts));
        }

        self.discover(ctx, class, depth + 1)?;
        Ok(TypeExpr::Reference(class.simple_name().to_string()))
    }

    /// Reserves and extracts a class on its first visit; later visits are no-ops.
    fn discover(
        &self,
        ctx: &mut ResolveContext,
        class: &ClassDef,
        depth: usize,
    ) -> Result<(), CodegenError> {
        if !ctx.registry.reserve(&class.qualified_name, class.simple_name()) {
            return Ok(());
        }
        tracing::debug!("Discovered class {} at depth {}", class.qualified_name, depth);

        let fields = self.extractor.extract(class)?;
        ctx.pending.push(PendingClass {
            shape: ClassShape::new(class.qualified_name.clone(), class.simple_name()),
            fields: fields.into_iter(),
            depth,
        });
        Ok(())
    }

    /// Resolves the fields of pending classes until none remain.
    ///
    /// A class discovered by a field is expanded before the remaining fields
    /// of the class that discovered it.
    fn expand_pending(&self, ctx: &mut ResolveContext) -> Result<(), CodegenError> {
        while let Some(mut current) = ctx.pending.pop() {
            let Some((_, descriptor)) = current.fields.next() else {
                ctx.registry.complete(current.shape);
                continue;
            };

            let resume_at = ctx.pending.len();
            let type_expr = self.resolve_type(ctx, &descriptor.declared_type, current.depth)?;
            current.shape.add_field(descriptor, type_expr);
            ctx.pending.insert(resume_at, current);
        }
        Ok(())
    }
}
