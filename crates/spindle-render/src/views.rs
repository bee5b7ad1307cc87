//! The view provider.
//!
//! Component dispatch only needs three things from the template layer: whether
//! a view exists, rendering a named view, and rendering a template string that
//! a component's `render` returned. [`ViewProvider`] is that contract;
//! [`TemplateViews`] implements it over a [`TemplateRegistry`] and a
//! [`TemplateEngine`].

use crate::error::RenderError;
use crate::template::{MiniJinjaEngine, RegistryError, TemplateEngine, TemplateRegistry};

/// Template lookup and rendering as seen by the dispatch engine.
pub trait ViewProvider: Send + Sync {
    /// Returns true if a view with this name can be rendered.
    fn exists(&self, name: &str) -> bool;

    /// Renders the named view with `data`.
    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Renders a template source string with `data`.
    fn render_template_string(
        &self,
        text: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError>;
}

/// Maps a dotted view name (`user.profile`) to its registry path (`user/profile`).
///
/// Names that already carry a template extension are left alone.
pub fn view_path(name: &str) -> String {
    let has_extension = crate::template::TEMPLATE_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(ext));
    if has_extension {
        name.to_string()
    } else {
        name.replace('.', "/")
    }
}

/// Registry-backed [`ViewProvider`].
///
/// # Example
///
/// ```rust
/// use spindle_render::{TemplateViews, ViewProvider};
/// use serde_json::json;
///
/// let mut views = TemplateViews::new();
/// views.add_inline("user/card", "{{ name }}");
///
/// assert!(views.exists("user.card"));
/// assert_eq!(views.render("user.card", &json!({"name": "Ada"})).unwrap(), "Ada");
/// ```
pub struct TemplateViews {
    registry: TemplateRegistry,
    engine: Box<dyn TemplateEngine>,
}

impl TemplateViews {
    /// Creates an empty provider using the MiniJinja engine.
    pub fn new() -> Self {
        Self::with_engine(MiniJinjaEngine::new())
    }

    /// Creates an empty provider using a custom engine.
    pub fn with_engine<E: TemplateEngine + 'static>(engine: E) -> Self {
        Self {
            registry: TemplateRegistry::new(),
            engine: Box::new(engine),
        }
    }

    /// Creates a provider over an existing registry.
    pub fn from_registry(registry: TemplateRegistry) -> Self {
        Self {
            registry,
            engine: Box::new(MiniJinjaEngine::new()),
        }
    }

    /// Adds an inline view.
    pub fn add_inline(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.registry.add_inline(name, content);
    }

    /// Adds every template under `dir`.
    pub fn add_dir(&mut self, dir: impl AsRef<std::path::Path>) -> Result<(), RegistryError> {
        self.registry.add_template_dir(dir)
    }

    /// Returns the underlying registry.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    fn lookup(&self, name: &str) -> Option<String> {
        if self.registry.contains(name) {
            return Some(name.to_string());
        }
        let path = view_path(name);
        self.registry.contains(&path).then_some(path)
    }
}

impl Default for TemplateViews {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewProvider for TemplateViews {
    fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let path = self
            .lookup(name)
            .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))?;
        let source = self.registry.get_content(&path).map_err(|e| match e {
            RegistryError::NotFound { name } => RenderError::TemplateNotFound(name),
            other => RenderError::OperationError(other.to_string()),
        })?;
        self.engine.render_template(&source, data)
    }

    fn render_template_string(
        &self,
        text: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        self.engine.render_template(text, data)
    }
}
