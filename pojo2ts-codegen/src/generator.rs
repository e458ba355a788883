//! Main code generator.

use pojo2ts_schema::{ClassDef, ClassModel, SourcePosition, TypeModel};

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::registry::ModelRegistry;
use crate::resolve::{ResolveContext, TypeResolver};
use crate::typescript::InterfaceGenerator;

/// TypeScript interface generator over a host type model.
///
/// Holds no per-run state: every call builds a fresh [`ResolveContext`], so
/// one generator can serve many conversions, from several threads if the
/// model allows.
pub struct Generator<'a, M: TypeModel + ?Sized = ClassModel> {
    model: &'a M,
    config: GeneratorConfig,
}

impl<'a, M: TypeModel + ?Sized> Generator<'a, M> {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new(model: &'a M) -> Self {
        Self::with_config(model, GeneratorConfig::default())
    }

    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn with_config(model: &'a M, config: GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the host type model.
    #[must_use]
    pub fn model(&self) -> &'a M {
        self.model
    }

    /// Looks up a root class by qualified or unambiguous simple name.
    ///
    /// # Errors
    /// Returns `CodegenError::ClassNotFound` if the model has no such class.
    pub fn find_root(&self, name: &str) -> Result<&'a ClassDef, CodegenError> {
        self.model
            .find_class(name)
            .ok_or_else(|| CodegenError::ClassNotFound {
                name: name.to_string(),
            })
    }

    /// Returns the class declaration enclosing a source position.
    ///
    /// # Errors
    /// Returns `CodegenError::NoSelection` if no class encloses the position.
    pub fn select(&self, position: &SourcePosition) -> Result<&'a ClassDef, CodegenError> {
        self.model
            .selected_class(position)
            .ok_or_else(|| CodegenError::NoSelection {
                file: position.file.display().to_string(),
                line: position.line,
            })
    }

    /// Resolves the root class and every class reachable from it.
    ///
    /// # Errors
    /// Returns `CodegenError` if extraction or resolution fails.
    pub fn resolve(&self, root: &ClassDef) -> Result<ModelRegistry, CodegenError> {
        let mut ctx = ResolveContext::new();
        TypeResolver::new(self.model, &self.config).resolve_root(&mut ctx, root)?;
        Ok(ctx.into_registry())
    }

    /// Generates interfaces for a class.
    ///
    /// # Errors
    /// Returns `CodegenError` if resolution or rendering fails.
    pub fn generate_class(&self, root: &ClassDef) -> Result<String, CodegenError> {
        tracing::info!("Generating TypeScript for {}", root.qualified_name);
        let registry = self.resolve(root)?;
        let output = InterfaceGenerator::new(&registry).generate()?;
        tracing::info!(
            "Generated {} interfaces for {}",
            registry.len(),
            root.qualified_name
        );
        Ok(output)
    }

    /// Generates interfaces for a class looked up by name.
    ///
    /// # Errors
    /// Returns `CodegenError` if the class is unknown or generation fails.
    pub fn generate(&self, root: &str) -> Result<String, CodegenError> {
        let class = self.find_root(root)?;
        self.generate_class(class)
    }

    /// Generates interfaces for the class enclosing a source position.
    ///
    /// # Errors
    /// Returns `CodegenError` if nothing is selected or generation fails.
    pub fn generate_at(&self, position: &SourcePosition) -> Result<String, CodegenError> {
        let class = self.select(position)?;
        self.generate_class(class)
    }
}
