//! Template engine abstraction.
//!
//! [`TemplateEngine`] is the seam between the view provider and the template
//! backend. The default implementation is [`MiniJinjaEngine`].

use minijinja::{Environment, Value};

use crate::error::RenderError;

/// A template engine that can render templates with data.
pub trait TemplateEngine: Send + Sync {
    /// Compiles and renders a template string in one step.
    fn render_template(&self, template: &str, data: &serde_json::Value)
        -> Result<String, RenderError>;

    /// Adds a named template, compiled and cached for [`render_named`](Self::render_named).
    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    /// Renders a previously added template.
    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Checks if a template with the given name was added.
    fn has_template(&self, name: &str) -> bool;
}

/// MiniJinja-based template engine.
///
/// # Example
///
/// ```rust
/// use spindle_render::template::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = MiniJinjaEngine::new();
/// let output = engine
///     .render_template("Count: {{ count }}", &json!({"count": 3}))
///     .unwrap();
/// assert_eq!(output, "Count: 3");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates a new MiniJinja engine with spindle's filters registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        register_filters(&mut env);
        Self { env }
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// Use this to register application filters or functions.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name)?;
        let value = Value::from_serialize(data);
        Ok(tmpl.render(value)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

/// Registers spindle's filters with a MiniJinja environment.
///
/// Called by [`MiniJinjaEngine::new`].
pub fn register_filters(env: &mut Environment<'static>) {
    // Serializes a value as a compact JSON attribute payload, e.g. for
    // `data-props='{{ props | props }}'`.
    env.add_filter("props", |value: Value| -> Result<String, minijinja::Error> {
        serde_json::to_string(&value).map_err(|e| {
            minijinja::Error::new(minijinja::ErrorKind::BadSerialization, e.to_string())
        })
    });
}
