//! The component capability.
//!
//! A class-backed ("dynamic") component implements [`Component`] and declares
//! its remotely callable surface as an [`ActionTable`]. Every method of this
//! trait is framework surface: none of them can be invoked as an action, and
//! their names are listed in [`BASE_METHODS`].

use std::collections::BTreeMap;

use serde_json::Value;
use spindle_render::RenderOutput;

use crate::actions::ActionTable;

/// Free-form key → value map used for variables, attributes and input.
pub type Vars = serde_json::Map<String, Value>;

/// Event name → method name routing table.
pub type Listeners = BTreeMap<String, String>;

/// Framework-level method names. An action with one of these names is always
/// rejected, whether requested directly or reached through a listener.
pub const BASE_METHODS: &[&str] = &[
    "boot",
    "mount",
    "before_render",
    "render",
    "spinning",
    "listeners",
    "actions",
    "public_vars",
    "default_public_vars",
    "query_string",
];

/// Returns true if `name` is a framework-level method.
pub fn is_base_method(name: &str) -> bool {
    BASE_METHODS.contains(&name)
}

/// What `boot` receives.
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    /// Component variables sent with the request
    pub variables: &'a Vars,
    /// Markup attributes sent with the request
    pub attributes: &'a Vars,
    /// True for a partial-update pass, false for an initial render
    pub spinning: bool,
}

/// A class-backed component.
///
/// Only [`render`](Component::render) is required. Lifecycle hooks run in the
/// order `boot → mount → [action] → before_render → render`.
///
/// # Example
///
/// ```rust
/// use spindle_dispatch::{ActionArgs, ActionTable, Component};
/// use spindle_render::RenderOutput;
///
/// struct Counter { count: i64 }
///
/// impl Counter {
///     fn increment(&mut self, _args: &ActionArgs) -> anyhow::Result<()> {
///         self.count += 1;
///         Ok(())
///     }
/// }
///
/// impl Component for Counter {
///     fn actions() -> ActionTable<Self> {
///         ActionTable::new().public("increment", Counter::increment)
///     }
///
///     fn render(&mut self) -> anyhow::Result<RenderOutput> {
///         Ok(format!("{}", self.count).into())
///     }
/// }
/// ```
pub trait Component: 'static {
    /// The component's callable actions. Built once per type.
    fn actions() -> ActionTable<Self>
    where
        Self: Sized;

    /// Receives request variables and attributes.
    fn boot(&mut self, props: &Props<'_>) -> anyhow::Result<()> {
        let _ = props;
        Ok(())
    }

    /// Runs after `boot`.
    fn mount(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the action, before `render`.
    fn before_render(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Produces the component's output.
    ///
    /// `Text` is treated as a template string and rendered with
    /// [`public_vars`](Component::public_vars).
    fn render(&mut self) -> anyhow::Result<RenderOutput>;

    /// Event name → action name routing.
    fn listeners(&self) -> Listeners {
        Listeners::new()
    }

    /// State exposed to templates.
    fn public_vars(&self) -> Vars {
        Vars::new()
    }

    /// Initial values of the exposed state.
    fn default_public_vars(&self) -> Vars {
        Vars::new()
    }

    /// Names of the state entries mirrored into the browser query string.
    fn query_string(&self) -> Vec<String> {
        Vec::new()
    }
}
