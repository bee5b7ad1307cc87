//! The bootstrapped application object.

use spindle_dispatch::{
    ComponentManager, Config, Container, DispatchError, Registry, RequestContext, Resolver, Vars,
};
use spindle_render::{RenderError, RenderOutput, ViewProvider};

use crate::builder::SpindleBuilder;

/// One action to run against one component.
///
/// ```rust
/// use spindle::Invocation;
/// use serde_json::json;
///
/// let call = Invocation::new("counter", "increment")
///     .id("c-1")
///     .variable("count", json!(3))
///     .spinning(true);
/// assert_eq!(call.name, "counter");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Request-scoped component identifier
    pub id: String,
    /// Component name
    pub name: String,
    /// Action or event name
    pub action: String,
    /// Component variables
    pub variables: Vars,
    /// Markup attributes
    pub attributes: Vars,
    /// Partial-update pass
    pub spinning: bool,
}

impl Invocation {
    /// Targets `action` on the component `name`.
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            ..Self::default()
        }
    }

    /// Sets the component identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replaces the variables.
    pub fn variables(mut self, variables: Vars) -> Self {
        self.variables = variables;
        self
    }

    /// Adds one variable.
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Replaces the attributes.
    pub fn attributes(mut self, attributes: Vars) -> Self {
        self.attributes = attributes;
        self
    }

    /// Marks the call as a partial-update pass.
    pub fn spinning(mut self, spinning: bool) -> Self {
        self.spinning = spinning;
        self
    }
}

/// Configuration, construction container, registry and views, assembled once.
///
/// `Spindle` is read-only after [`build`](SpindleBuilder::build) and can be
/// shared across request handlers. Each request gets its own
/// [`ComponentManager`].
pub struct Spindle {
    config: Config,
    container: Container,
    registry: Registry,
    views: Box<dyn ViewProvider>,
}

impl Spindle {
    /// Starts a builder.
    pub fn builder() -> SpindleBuilder {
        SpindleBuilder::new()
    }

    pub(crate) fn new(
        config: Config,
        container: Container,
        registry: Registry,
        views: Box<dyn ViewProvider>,
    ) -> Self {
        Self {
            config,
            container,
            registry,
            views,
        }
    }

    /// A resolver over this application's registry and container.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.config, &self.registry, &self.container, self.views.as_ref())
    }

    /// Resolves `name` and returns a manager for it.
    pub fn manager<'a>(
        &'a self,
        request: &'a dyn RequestContext,
        id: &str,
        name: &str,
        spinning: bool,
    ) -> Result<ComponentManager<'a>, DispatchError> {
        ComponentManager::new(&self.resolver(), request, id, name, spinning)
    }

    /// Resolves the component and processes one action.
    pub fn dispatch(
        &self,
        request: &dyn RequestContext,
        call: &Invocation,
    ) -> Result<RenderOutput, DispatchError> {
        let mut manager = self.manager(request, &call.id, &call.name, call.spinning)?;
        manager.process(&call.action, &call.variables, &call.attributes)
    }

    /// Turns a dispatch result into its final text.
    pub fn render(&self, output: RenderOutput) -> Result<String, RenderError> {
        output.into_string(self.views.as_ref())
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The construction container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The component registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The view provider.
    pub fn views(&self) -> &dyn ViewProvider {
        self.views.as_ref()
    }
}
