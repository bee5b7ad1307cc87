//! [`SpindleBuilder`], the bootstrap step.
//!
//! Component types are provided to the container and names are registered in
//! any order; registrations are validated against the container at
//! [`build`](SpindleBuilder::build) time.

use std::collections::BTreeMap;
use std::path::Path;

use spindle_dispatch::{Component, ComponentArgs, Config, Container, Registry, RegistryEntry};
use spindle_render::{TemplateViews, ViewProvider};
use tracing::debug;

use crate::app::Spindle;
use crate::error::BuildError;

enum Views {
    Templates(TemplateViews),
    Custom(Box<dyn ViewProvider>),
}

/// Builder for a [`Spindle`].
///
/// # Example
///
/// ```rust
/// use spindle::{ActionArgs, ActionTable, Component, ComponentArgs, RenderOutput, Spindle};
///
/// struct Clock;
///
/// impl Component for Clock {
///     fn actions() -> ActionTable<Self> {
///         ActionTable::new().public("tick", |_: &mut Clock, _: &ActionArgs| {
///             Ok::<_, anyhow::Error>(())
///         })
///     }
///
///     fn render(&mut self) -> anyhow::Result<RenderOutput> {
///         Ok("tock".into())
///     }
/// }
///
/// let app = Spindle::builder()
///     .provide("Ui::Clock", |_: &ComponentArgs| Ok(Clock))
///     .register("clock", Some("Ui::Clock"))
///     .template("badge", "<span>{{ label }}</span>")
///     .build()
///     .unwrap();
///
/// assert!(app.registry().is_dynamic("clock"));
/// ```
pub struct SpindleBuilder {
    config: Config,
    hints: BTreeMap<String, String>,
    container: Container,
    entries: Vec<RegistryEntry>,
    views: Views,
}

impl SpindleBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: Config::default(),
            hints: BTreeMap::new(),
            container: Container::new(),
            entries: Vec::new(),
            views: Views::Templates(TemplateViews::new()),
        }
    }

    /// Sets the configuration. Hints added with [`hint`](Self::hint) are kept.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn config_file(self, path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let config = Config::from_path(path)?;
        Ok(self.config(config))
    }

    /// Adds a namespace hint: `alias:name` resolves under `type_prefix`.
    pub fn hint(mut self, alias: impl Into<String>, type_prefix: impl Into<String>) -> Self {
        self.hints.insert(alias.into(), type_prefix.into());
        self
    }

    /// Provides component type `C` under `type_path`.
    pub fn provide<C, F>(mut self, type_path: impl Into<String>, factory: F) -> Self
    where
        C: Component,
        F: Fn(&ComponentArgs) -> anyhow::Result<C> + Send + Sync + 'static,
    {
        self.container.provide(type_path, factory);
        self
    }

    /// Registers a component name, anonymous unless `selector` names a type.
    pub fn register(mut self, name: impl Into<String>, selector: Option<&str>) -> Self {
        self.entries.push(RegistryEntry {
            name: name.into(),
            selector: selector.map(str::to_string),
        });
        self
    }

    /// Registers several names at once.
    pub fn register_many<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<RegistryEntry>,
    {
        self.entries.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Adds an inline view.
    ///
    /// Ignored once a custom provider has been installed with
    /// [`views`](Self::views).
    pub fn template(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        if let Views::Templates(views) = &mut self.views {
            views.add_inline(name, content);
        }
        self
    }

    /// Adds every template file under `dir`.
    ///
    /// Ignored once a custom provider has been installed with
    /// [`views`](Self::views).
    pub fn template_dir(mut self, dir: impl AsRef<Path>) -> Result<Self, BuildError> {
        if let Views::Templates(views) = &mut self.views {
            views.add_dir(dir)?;
        }
        Ok(self)
    }

    /// Replaces the template views with a custom provider.
    pub fn views<V: ViewProvider + 'static>(mut self, views: V) -> Self {
        self.views = Views::Custom(Box::new(views));
        self
    }

    /// Validates registrations and assembles the [`Spindle`].
    pub fn build(self) -> Result<Spindle, BuildError> {
        let SpindleBuilder {
            mut config,
            hints,
            container,
            entries,
            views,
        } = self;

        config.hints.extend(hints);

        let mut registry = Registry::new();
        registry.register_many(entries, &container)?;

        let views: Box<dyn ViewProvider> = match views {
            Views::Templates(views) => Box::new(views),
            Views::Custom(views) => views,
        };

        debug!(
            types = container.len(),
            names = registry.len(),
            hints = config.hints.len(),
            "spindle ready"
        );
        Ok(Spindle::new(config, container, registry, views))
    }
}

impl Default for SpindleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
