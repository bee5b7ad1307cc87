//! The component registry.
//!
//! Two maps filled once at bootstrap: dynamic components (name → type path)
//! and anonymous components (name → name). After bootstrap the registry is
//! only read, so it is shared by reference rather than guarded.

use std::collections::HashMap;

use tracing::debug;

use crate::container::Container;
use crate::error::RegistrationError;

/// Tracing target for registry and resolution events.
pub(crate) const RESOLVE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::resolve");

/// One registration, as accepted by [`Registry::register_many`].
///
/// A bare name is an anonymous registration; a `(name, selector)` pair is a
/// dynamic one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Component name
    pub name: String,
    /// Type path, if any
    pub selector: Option<String>,
}

impl From<&str> for RegistryEntry {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: None,
        }
    }
}

impl From<String> for RegistryEntry {
    fn from(name: String) -> Self {
        Self {
            name,
            selector: None,
        }
    }
}

impl From<(&str, &str)> for RegistryEntry {
    fn from((name, selector): (&str, &str)) -> Self {
        Self {
            name: name.to_string(),
            selector: Some(selector.to_string()),
        }
    }
}

impl From<(String, String)> for RegistryEntry {
    fn from((name, selector): (String, String)) -> Self {
        Self {
            name,
            selector: Some(selector),
        }
    }
}

/// Registered component names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    dynamic: HashMap<String, String>,
    anonymous: HashMap<String, String>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component name.
    ///
    /// With no selector, or a selector equal to `name`, the name is recorded
    /// as anonymous. Otherwise it is recorded as dynamic, and the selector must
    /// be a type path known to `container`. A name lives in at most one of the
    /// two maps; a later registration of the same name replaces the earlier
    /// one, whichever kind it was.
    ///
    /// # Errors
    ///
    /// [`RegistrationError`] when the selector differs from `name` and is not
    /// provided by `container`.
    pub fn register(
        &mut self,
        name: &str,
        selector: Option<&str>,
        container: &Container,
    ) -> Result<(), RegistrationError> {
        let selector = selector.filter(|s| !s.is_empty());

        match selector {
            Some(selector) if selector != name => {
                if !container.contains(selector) {
                    return Err(RegistrationError {
                        name: name.to_string(),
                        selector: selector.to_string(),
                    });
                }
                debug!(target: RESOLVE_TARGET, name, selector, "registered dynamic component");
                self.anonymous.remove(name);
                self.dynamic.insert(name.to_string(), selector.to_string());
            }
            _ => {
                debug!(target: RESOLVE_TARGET, name, "registered anonymous component");
                self.dynamic.remove(name);
                self.anonymous.insert(name.to_string(), name.to_string());
            }
        }
        Ok(())
    }

    /// Applies [`register`](Self::register) to each entry, stopping at the first error.
    ///
    /// ```rust
    /// use spindle_dispatch::{Container, Registry};
    ///
    /// let container = Container::new();
    /// let mut registry = Registry::new();
    /// registry
    ///     .register_many(["alert", "badge"], &container)
    ///     .unwrap();
    /// assert!(registry.is_anonymous("badge"));
    /// ```
    pub fn register_many<I, E>(&mut self, entries: I, container: &Container) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = E>,
        E: Into<RegistryEntry>,
    {
        for entry in entries {
            let entry = entry.into();
            self.register(&entry.name, entry.selector.as_deref(), container)?;
        }
        Ok(())
    }

    /// Type path registered for a dynamic name.
    pub fn dynamic(&self, name: &str) -> Option<&str> {
        self.dynamic.get(name).map(String::as_str)
    }

    /// Name an anonymous registration binds to.
    pub fn anonymous(&self, name: &str) -> Option<&str> {
        self.anonymous.get(name).map(String::as_str)
    }

    /// True if `name` is registered as dynamic.
    pub fn is_dynamic(&self, name: &str) -> bool {
        self.dynamic.contains_key(name)
    }

    /// True if `name` is registered as anonymous.
    pub fn is_anonymous(&self, name: &str) -> bool {
        self.anonymous.contains_key(name)
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.dynamic.len() + self.anonymous.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.dynamic.is_empty() && self.anonymous.is_empty()
    }
}
