//! Component resolution and action dispatch.
//!
//! `spindle-dispatch` turns a component name into an executable component and
//! runs one request's action against it, producing rendered output.
//!
//! # Components
//!
//! - **Dynamic** components implement [`Component`] and declare an
//!   [`ActionTable`] of callable actions, each with a [`Visibility`], plus an
//!   optional listener map routing event names to actions.
//! - **Anonymous** components are views with no actions; their state is the
//!   request input.
//!
//! # Pipeline
//!
//! ```text
//! (id, name) ──Resolver──▶ Implementation ──ComponentManager::process──▶ RenderOutput
//! ```
//!
//! The [`Resolver`] walks a fixed fallback chain over the [`Registry`], the
//! [`Container`] of known types and the view provider. The
//! [`ComponentManager`] routes the action, applies the visibility gate, drives
//! `boot → mount → action → before_render → render` and returns a
//! [`RenderOutput`](spindle_render::RenderOutput).
//!
//! # Example
//!
//! ```rust
//! use spindle_dispatch::{
//!     ActionArgs, ActionTable, Component, ComponentArgs, ComponentManager, Config,
//!     Container, Registry, Request, Resolver, Vars,
//! };
//! use spindle_render::{RenderOutput, TemplateViews};
//!
//! #[derive(Default)]
//! struct Counter { count: i64 }
//!
//! impl Component for Counter {
//!     fn actions() -> ActionTable<Self> {
//!         ActionTable::new().public("add", |c: &mut Counter, args: &ActionArgs| {
//!             c.count += args.i64(0, "by").unwrap_or(1);
//!             Ok::<_, anyhow::Error>(())
//!         })
//!     }
//!
//!     fn public_vars(&self) -> Vars {
//!         let mut vars = Vars::new();
//!         vars.insert("count".into(), self.count.into());
//!         vars
//!     }
//!
//!     fn render(&mut self) -> anyhow::Result<RenderOutput> {
//!         Ok("Count: {{ count }}".into())
//!     }
//! }
//!
//! let config = Config::default();
//! let mut container = Container::new();
//! container.provide("App::Components::Counter", |_: &ComponentArgs| Ok(Counter::default()));
//! let registry = Registry::new();
//! let views = TemplateViews::new();
//!
//! let resolver = Resolver::new(&config, &registry, &container, &views);
//! let request = Request::post().with("actionArgs", "5");
//! let mut manager = ComponentManager::new(&resolver, &request, "c1", "counter", false).unwrap();
//!
//! let output = manager.process("add", &Vars::new(), &Vars::new()).unwrap();
//! assert_eq!(output.as_text(), Some("Count: 5"));
//! ```

mod actions;
mod args;
mod component;
mod config;
mod container;
mod error;
mod implementation;
mod manager;
mod registry;
mod request;
mod resolver;

pub use actions::{ActionEntry, ActionTable, IntoActionResult, Visibility};
pub use args::{parse_action_arguments, ActionArgs, ArgValue};
pub use component::{is_base_method, Component, Listeners, Props, Vars, BASE_METHODS};
pub use config::{Config, COMPONENT_KEY, DEFAULT_ID_KEY, DEFAULT_NAMESPACE};
pub use container::{ComponentArgs, Container};
pub use error::{ConfigError, ConstructionError, DispatchError, LifecyclePhase, RegistrationError};
pub use implementation::{AnonymousComponent, DynamicComponent, Implementation, Kind};
pub use manager::{ComponentManager, ACTION_ARGS_KEY, EVENT_PARAMS_KEY};
pub use registry::{Registry, RegistryEntry};
pub use request::{Request, RequestContext};
pub use resolver::{
    dot_notation_to_type, studly, Resolver, NAMESPACE_DELIMITER, TYPE_PATH_SEPARATOR,
};
