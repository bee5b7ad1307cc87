//! The construction mechanism.
//!
//! A [`Container`] maps type paths such as `App::Components::Counter` to
//! factories. Registration selectors and convention-derived names are both
//! type paths, so the resolver asks the container whether a path is known and
//! to build an instance from it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::component::Component;
use crate::error::ConstructionError;
use crate::implementation::DynamicComponent;

/// Arguments a factory receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentArgs {
    /// Request-scoped identifier
    pub id: String,
    /// Name the component is being resolved from
    pub name: String,
}

impl ComponentArgs {
    /// Creates factory arguments.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

type Factory =
    Box<dyn Fn(&ComponentArgs) -> Result<DynamicComponent, ConstructionError> + Send + Sync>;

/// Known component types, by type path.
#[derive(Default)]
pub struct Container {
    factories: HashMap<String, Factory>,
}

impl Container {
    /// An empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provides component type `C` under `type_path`.
    ///
    /// `C::actions()` is built here, once, and shared by every instance.
    /// Providing the same path again replaces the earlier factory.
    pub fn provide<C, F>(&mut self, type_path: impl Into<String>, factory: F) -> &mut Self
    where
        C: Component,
        F: Fn(&ComponentArgs) -> anyhow::Result<C> + Send + Sync + 'static,
    {
        let type_path = type_path.into();
        let actions = Arc::new(C::actions());
        let path = type_path.clone();

        self.factories.insert(
            type_path,
            Box::new(move |args| {
                let component = factory(args).map_err(|source| ConstructionError::Failed {
                    type_path: path.clone(),
                    source,
                })?;
                Ok(DynamicComponent::new(
                    args.id.clone(),
                    args.name.clone(),
                    path.clone(),
                    component,
                    Arc::clone(&actions),
                ))
            }),
        );
        self
    }

    /// True if a factory is provided under `type_path`.
    pub fn contains(&self, type_path: &str) -> bool {
        self.factories.contains_key(type_path)
    }

    /// Builds an instance of the type at `type_path`.
    pub fn make(
        &self,
        type_path: &str,
        args: &ComponentArgs,
    ) -> Result<DynamicComponent, ConstructionError> {
        let factory = self
            .factories
            .get(type_path)
            .ok_or_else(|| ConstructionError::UnknownType(type_path.to_string()))?;
        factory(args)
    }

    /// Provided type paths, in no particular order.
    pub fn type_paths(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of provided types.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True if nothing is provided.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<_> = self.type_paths().collect();
        paths.sort_unstable();
        f.debug_struct("Container")
            .field("types", &paths)
            .finish()
    }
}
