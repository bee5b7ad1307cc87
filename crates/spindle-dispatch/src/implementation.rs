//! Resolved component instances.
//!
//! [`Implementation`] is the sum type the dispatch engine matches on once:
//! a [`DynamicComponent`] wraps a type-erased [`Component`] together with its
//! action table, an [`AnonymousComponent`] is a view rendered from request
//! data.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use spindle_render::{RenderError, RenderOutput, ViewProvider};

use crate::actions::{ActionTable, Visibility};
use crate::args::ActionArgs;
use crate::component::{Component, Listeners, Props, Vars};

/// Which variant a component resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Class-backed, with actions and listeners
    Dynamic,
    /// Template-only
    Anonymous,
}

/// A resolved component instance.
#[derive(Debug)]
pub enum Implementation {
    /// Class-backed component
    Dynamic(DynamicComponent),
    /// Template-only component
    Anonymous(AnonymousComponent),
}

impl Implementation {
    /// The component's kind. Never changes after construction.
    pub fn kind(&self) -> Kind {
        match self {
            Implementation::Dynamic(_) => Kind::Dynamic,
            Implementation::Anonymous(_) => Kind::Anonymous,
        }
    }

    /// Request-scoped identifier.
    pub fn id(&self) -> &str {
        match self {
            Implementation::Dynamic(c) => c.id(),
            Implementation::Anonymous(c) => c.id(),
        }
    }

    /// Name the component is bound to.
    pub fn name(&self) -> &str {
        match self {
            Implementation::Dynamic(c) => c.name(),
            Implementation::Anonymous(c) => c.name(),
        }
    }

    /// Returns the dynamic component, if this is one.
    pub fn as_dynamic(&self) -> Option<&DynamicComponent> {
        match self {
            Implementation::Dynamic(c) => Some(c),
            Implementation::Anonymous(_) => None,
        }
    }

    /// Returns the anonymous component, if this is one.
    pub fn as_anonymous(&self) -> Option<&AnonymousComponent> {
        match self {
            Implementation::Anonymous(c) => Some(c),
            Implementation::Dynamic(_) => None,
        }
    }
}

/// Object-safe view of a `Component` bound to its action table.
pub(crate) trait ErasedComponent {
    fn action_visibility(&self, name: &str) -> Option<Visibility>;
    fn call_action(&mut self, name: &str, args: &ActionArgs) -> Option<anyhow::Result<Value>>;
    fn boot(&mut self, props: &Props<'_>) -> anyhow::Result<()>;
    fn mount(&mut self) -> anyhow::Result<()>;
    fn before_render(&mut self) -> anyhow::Result<()>;
    fn render(&mut self) -> anyhow::Result<RenderOutput>;
    fn listeners(&self) -> Listeners;
    fn public_vars(&self) -> Vars;
    fn default_public_vars(&self) -> Vars;
    fn query_string(&self) -> Vec<String>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Bound<C: Component> {
    component: C,
    actions: Arc<ActionTable<C>>,
}

impl<C: Component> ErasedComponent for Bound<C> {
    fn action_visibility(&self, name: &str) -> Option<Visibility> {
        self.actions.get(name).map(|e| e.visibility())
    }

    fn call_action(&mut self, name: &str, args: &ActionArgs) -> Option<anyhow::Result<Value>> {
        let entry = self.actions.get(name)?;
        Some(entry.call(&mut self.component, args))
    }

    fn boot(&mut self, props: &Props<'_>) -> anyhow::Result<()> {
        self.component.boot(props)
    }

    fn mount(&mut self) -> anyhow::Result<()> {
        self.component.mount()
    }

    fn before_render(&mut self) -> anyhow::Result<()> {
        self.component.before_render()
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        self.component.render()
    }

    fn listeners(&self) -> Listeners {
        self.component.listeners()
    }

    fn public_vars(&self) -> Vars {
        self.component.public_vars()
    }

    fn default_public_vars(&self) -> Vars {
        self.component.default_public_vars()
    }

    fn query_string(&self) -> Vec<String> {
        self.component.query_string()
    }

    fn as_any(&self) -> &dyn Any {
        &self.component
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.component
    }
}

/// A class-backed component instance.
pub struct DynamicComponent {
    id: String,
    name: String,
    type_path: String,
    inner: Box<dyn ErasedComponent>,
}

impl DynamicComponent {
    /// Binds a component value to its action table.
    pub fn new<C: Component>(
        id: impl Into<String>,
        name: impl Into<String>,
        type_path: impl Into<String>,
        component: C,
        actions: Arc<ActionTable<C>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_path: type_path.into(),
            inner: Box::new(Bound { component, actions }),
        }
    }

    /// Request-scoped identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name the component was resolved from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type path the component was constructed from, e.g. `App::Components::Counter`.
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    /// True if the action table declares `name`.
    pub fn has_action(&self, name: &str) -> bool {
        self.inner.action_visibility(name).is_some()
    }

    /// Visibility of a declared action.
    pub fn action_visibility(&self, name: &str) -> Option<Visibility> {
        self.inner.action_visibility(name)
    }

    /// The component's listener map.
    pub fn listeners(&self) -> Listeners {
        self.inner.listeners()
    }

    /// The component's exposed state.
    pub fn public_vars(&self) -> Vars {
        self.inner.public_vars()
    }

    /// Initial values of the exposed state.
    pub fn default_public_vars(&self) -> Vars {
        self.inner.default_public_vars()
    }

    /// Names mirrored into the query string.
    pub fn query_string(&self) -> Vec<String> {
        self.inner.query_string()
    }

    /// Borrows the concrete component.
    pub fn downcast_ref<C: Component>(&self) -> Option<&C> {
        self.inner.as_any().downcast_ref()
    }

    /// Mutably borrows the concrete component.
    pub fn downcast_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.inner.as_any_mut().downcast_mut()
    }

    pub(crate) fn inner_mut(&mut self) -> &mut dyn ErasedComponent {
        self.inner.as_mut()
    }
}

impl fmt::Debug for DynamicComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicComponent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type_path", &self.type_path)
            .finish_non_exhaustive()
    }
}

/// A template-only component.
///
/// Renders the view named after it. Its state is whatever the request sent.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousComponent {
    id: String,
    name: String,
    variables: Vars,
    attributes: Vars,
    spinning: bool,
}

impl AnonymousComponent {
    /// Creates an anonymous component bound to the view `name`.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variables: Vars::new(),
            attributes: Vars::new(),
            spinning: false,
        }
    }

    /// Request-scoped identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// View name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the last boot was a partial-update pass.
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub(crate) fn boot(&mut self, props: &Props<'_>) {
        self.variables = props.variables.clone();
        self.attributes = props.attributes.clone();
        self.spinning = props.spinning;
    }

    /// Data the view renders with: the variables, plus `attributes` and `spinning`.
    pub fn view_data(&self) -> Value {
        let mut data = self.variables.clone();
        data.insert(
            "attributes".to_string(),
            Value::Object(self.attributes.clone()),
        );
        data.insert("spinning".to_string(), Value::Bool(self.spinning));
        Value::Object(data)
    }

    pub(crate) fn render(&self, views: &dyn ViewProvider) -> Result<String, RenderError> {
        views.render(&self.name, &self.view_data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Probe {
        mounted: bool,
    }

    impl Component for Probe {
        fn actions() -> ActionTable<Self> {
            ActionTable::new().protected("poke", |p: &mut Probe, _: &ActionArgs| {
                p.mounted = false;
                Ok::<_, anyhow::Error>(())
            })
        }

        fn mount(&mut self) -> anyhow::Result<()> {
            self.mounted = true;
            Ok(())
        }

        fn render(&mut self) -> anyhow::Result<RenderOutput> {
            Ok(RenderOutput::Empty)
        }
    }

    fn probe() -> DynamicComponent {
        DynamicComponent::new(
            "c1",
            "probe",
            "App::Components::Probe",
            Probe { mounted: false },
            Arc::new(Probe::actions()),
        )
    }

    #[test]
    fn test_dynamic_identity_and_kind() {
        let component = Implementation::Dynamic(probe());
        assert_eq!(component.kind(), Kind::Dynamic);
        assert_eq!(component.id(), "c1");
        assert_eq!(component.name(), "probe");
        assert_eq!(
            component.as_dynamic().unwrap().type_path(),
            "App::Components::Probe"
        );
    }

    #[test]
    fn test_dynamic_action_lookup() {
        let component = probe();
        assert!(component.has_action("poke"));
        assert_eq!(component.action_visibility("poke"), Some(Visibility::Protected));
        assert!(!component.has_action("render"));
    }

    #[test]
    fn test_downcast_after_lifecycle() {
        let mut component = probe();
        component.inner_mut().mount().unwrap();
        assert!(component.downcast_ref::<Probe>().unwrap().mounted);

        component.downcast_mut::<Probe>().unwrap().mounted = false;
        assert!(!component.downcast_ref::<Probe>().unwrap().mounted);
    }

    #[test]
    fn test_anonymous_view_data() {
        let mut component = AnonymousComponent::new("a1", "alert");
        let variables = json!({"message": "hi"}).as_object().cloned().unwrap();
        let attributes = json!({"class": "warn"}).as_object().cloned().unwrap();
        component.boot(&Props {
            variables: &variables,
            attributes: &attributes,
            spinning: true,
        });

        assert_eq!(
            component.view_data(),
            json!({"message": "hi", "attributes": {"class": "warn"}, "spinning": true})
        );
        assert_eq!(Implementation::Anonymous(component).kind(), Kind::Anonymous);
    }
}
