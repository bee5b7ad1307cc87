//! # Spindle - Server-Rendered UI Components
//!
//! Spindle resolves a component name to an implementation and dispatches one
//! action against it, returning rendered output. Components are either
//! class-backed ([`Component`] implementations with an [`ActionTable`]) or
//! anonymous (a view with no callable surface, whose state is the request's
//! own input).
//!
//! This crate bundles:
//!
//! - [`spindle_dispatch`]: resolution, routing, visibility and lifecycle
//! - [`spindle_render`]: the view provider and MiniJinja templates
//! - [`Spindle`] / [`SpindleBuilder`]: bootstrap and per-request entry points
//!
//! ## Quick Start
//!
//! ```rust
//! use spindle::{ActionArgs, ActionTable, Component, ComponentArgs, Invocation, Request, RenderOutput, Spindle, Vars};
//!
//! struct Todo {
//!     items: Vec<String>,
//! }
//!
//! impl Todo {
//!     fn add(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
//!         if let Some(item) = args.str(0, "item") {
//!             self.items.push(item.to_string());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! impl Component for Todo {
//!     fn actions() -> ActionTable<Self> {
//!         ActionTable::new().public("add", Todo::add)
//!     }
//!
//!     fn render(&mut self) -> anyhow::Result<RenderOutput> {
//!         Ok("{{ items | length }} item(s)".into())
//!     }
//!
//!     fn public_vars(&self) -> Vars {
//!         let mut vars = Vars::new();
//!         vars.insert("items".into(), self.items.clone().into());
//!         vars
//!     }
//! }
//!
//! let app = Spindle::builder()
//!     .provide("App::Components::Todo", |_: &ComponentArgs| Ok(Todo { items: vec![] }))
//!     .build()
//!     .unwrap();
//!
//! let request = Request::post().with("actionArgs", "'milk'");
//! let output = app.dispatch(&request, &Invocation::new("todo", "add")).unwrap();
//! assert_eq!(app.render(output).unwrap(), "1 item(s)");
//! ```
//!
//! ## Resolution
//!
//! A name is tried, in order, as a namespaced hint (`admin:users.table`), a
//! registered dynamic name, a convention type path under
//! [`Config::namespace`], a registered anonymous name and finally a view name.
//! See [`Resolver`].

mod app;
mod builder;
mod error;

pub use app::{Invocation, Spindle};
pub use builder::SpindleBuilder;
pub use error::BuildError;

pub use spindle_dispatch::{
    dot_notation_to_type, is_base_method, parse_action_arguments, studly, ActionArgs,
    ActionEntry, ActionTable, AnonymousComponent, ArgValue, Component, ComponentArgs,
    ComponentManager, Config, ConfigError, ConstructionError, Container, DispatchError,
    DynamicComponent, Implementation, IntoActionResult, Kind, LifecyclePhase, Listeners, Props,
    RegistrationError, Registry, RegistryEntry, Request, RequestContext, Resolver, Vars,
    Visibility, ACTION_ARGS_KEY, BASE_METHODS, EVENT_PARAMS_KEY,
};
pub use spindle_render::{RenderError, RenderOutput, TemplateViews, ViewHandle, ViewProvider};

pub use spindle_dispatch;
pub use spindle_render;
