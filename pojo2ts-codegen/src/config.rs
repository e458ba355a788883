//! Generator configuration.

/// Default depth ceiling for type resolution.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Default annotation whose `value` (or `name`) becomes a field remark.
pub const DEFAULT_REMARK_ANNOTATION: &str = "io.swagger.annotations.ApiModelProperty";

/// Fields skipped by default.
pub const DEFAULT_IGNORED_FIELDS: &[&str] = &["serialVersionUID"];

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    max_depth: usize,
    remark_annotation: String,
    ignored_fields: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            remark_annotation: DEFAULT_REMARK_ANNOTATION.to_string(),
            ignored_fields: DEFAULT_IGNORED_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Sets the resolution depth ceiling.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the qualified name of the remark annotation.
    #[must_use]
    pub fn remark_annotation(mut self, name: impl Into<String>) -> Self {
        self.remark_annotation = name.into();
        self
    }

    /// Adds a field name to the ignore list.
    #[must_use]
    pub fn ignore_field(mut self, name: impl Into<String>) -> Self {
        self.ignored_fields.push(name.into());
        self
    }

    /// Replaces the ignore list.
    #[must_use]
    pub fn ignored_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the resolution depth ceiling.
    #[must_use]
    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }

    /// Returns the remark annotation name.
    #[must_use]
    pub fn remark_annotation_name(&self) -> &str {
        &self.remark_annotation
    }

    /// Returns true if the field is on the ignore list.
    #[must_use]
    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignored_fields.iter().any(|f| f == field)
    }
}
