//! Name → implementation resolution.
//!
//! Before the chain, a namespaced name (`alias:sub.name`) with a known alias
//! is tried as hint prefix + converted remainder. Then the fallback chain,
//! first match wins:
//!
//! 1. Registered dynamic name → its type path
//! 2. Convention: configured namespace + converted name, if provided
//! 3. Registered anonymous name
//! 4. An existing view with that name → anonymous component
//! 5. [`DispatchError::ComponentNotFound`]
//!
//! Construction failures along the way count as "no match" and the chain
//! moves on.

use tracing::debug;

use spindle_render::ViewProvider;

use crate::config::Config;
use crate::container::{ComponentArgs, Container};
use crate::error::DispatchError;
use crate::implementation::{AnonymousComponent, DynamicComponent, Implementation};
use crate::registry::{Registry, RESOLVE_TARGET};

/// Separator between namespace alias and name.
pub const NAMESPACE_DELIMITER: char = ':';

/// Separator between type path segments.
pub const TYPE_PATH_SEPARATOR: &str = "::";

/// Converts one word group to capitalized-word form.
///
/// `-`, `_` and whitespace separate words; each word gets an upper-case first
/// letter and the separators are dropped.
///
/// ```rust
/// use spindle_dispatch::studly;
///
/// assert_eq!(studly("user-profile"), "UserProfile");
/// assert_eq!(studly("edit_form"), "EditForm");
/// ```
pub fn studly(segment: &str) -> String {
    segment
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Converts a dotted component name to a type path.
///
/// ```rust
/// use spindle_dispatch::dot_notation_to_type;
///
/// assert_eq!(dot_notation_to_type("user.profile.edit"), "User::Profile::Edit");
/// ```
pub fn dot_notation_to_type(name: &str) -> String {
    name.split('.')
        .map(studly)
        .collect::<Vec<_>>()
        .join(TYPE_PATH_SEPARATOR)
}

/// Resolves component names to instances.
///
/// Borrows everything it needs; build one per request or keep one around,
/// it holds no state of its own.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a Config,
    registry: &'a Registry,
    container: &'a Container,
    views: &'a dyn ViewProvider,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver.
    pub fn new(
        config: &'a Config,
        registry: &'a Registry,
        container: &'a Container,
        views: &'a dyn ViewProvider,
    ) -> Self {
        Self {
            config,
            registry,
            container,
            views,
        }
    }

    /// The view provider this resolver consults.
    pub fn views(&self) -> &'a dyn ViewProvider {
        self.views
    }

    /// The configuration this resolver consults.
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Resolves `name` to exactly one implementation.
    pub fn resolve(&self, id: &str, name: &str) -> Result<Implementation, DispatchError> {
        if let Some(component) = self.resolve_dynamic(id, name) {
            return Ok(Implementation::Dynamic(component));
        }
        if let Some(component) = self.resolve_anonymous(id, name) {
            return Ok(Implementation::Anonymous(component));
        }
        debug!(target: RESOLVE_TARGET, name, "resolution chain exhausted");
        Err(DispatchError::not_found(name))
    }

    /// The namespaced pre-step, then steps 1–2: registered and convention-based dynamic components.
    pub fn resolve_dynamic(&self, id: &str, name: &str) -> Option<DynamicComponent> {
        let args = ComponentArgs::new(id, name);

        if let Some(type_path) = self.namespaced_type_path(name) {
            if let Some(component) = self.try_make(&type_path, &args) {
                return Some(component);
            }
        }

        if let Some(type_path) = self.registry.dynamic(name) {
            if let Some(component) = self.try_make(type_path, &args) {
                return Some(component);
            }
        }

        let type_path = self.convention_type_path(name);
        if self.container.contains(&type_path) {
            return self.try_make(&type_path, &args);
        }

        None
    }

    /// Steps 3–4: registered and view-backed anonymous components.
    pub fn resolve_anonymous(&self, id: &str, name: &str) -> Option<AnonymousComponent> {
        if let Some(bound) = self.registry.anonymous(name) {
            debug!(target: RESOLVE_TARGET, name, bound, "resolved registered anonymous component");
            return Some(AnonymousComponent::new(id, bound));
        }

        if self.views.exists(name) {
            debug!(target: RESOLVE_TARGET, name, "resolved anonymous component from view");
            return Some(AnonymousComponent::new(id, name));
        }

        None
    }

    /// Type path derived from the configured namespace.
    pub fn convention_type_path(&self, name: &str) -> String {
        format!("{}{}", self.config.namespace, dot_notation_to_type(name))
    }

    /// Type path for `alias:sub.name` when `alias` is a known hint.
    pub fn namespaced_type_path(&self, name: &str) -> Option<String> {
        let position = name.find(NAMESPACE_DELIMITER)?;
        if position == 0 {
            return None;
        }

        let mut parts = name.split(NAMESPACE_DELIMITER);
        let alias = parts.next()?;
        let rest = parts.next().unwrap_or_default();
        let prefix = self.config.hints.get(alias)?;

        Some(format!(
            "{}{}{}",
            prefix.trim_end_matches(TYPE_PATH_SEPARATOR),
            TYPE_PATH_SEPARATOR,
            dot_notation_to_type(rest)
        ))
    }

    fn try_make(&self, type_path: &str, args: &ComponentArgs) -> Option<DynamicComponent> {
        match self.container.make(type_path, args) {
            Ok(component) => {
                debug!(target: RESOLVE_TARGET, name = %args.name, type_path, "resolved dynamic component");
                Some(component)
            }
            Err(error) => {
                debug!(target: RESOLVE_TARGET, name = %args.name, type_path, %error, "construction failed, trying next candidate");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_studly() {
        assert_eq!(studly("counter"), "Counter");
        assert_eq!(studly("user-profile"), "UserProfile");
        assert_eq!(studly("user_profile card"), "UserProfileCard");
        assert_eq!(studly("alreadyCamel"), "AlreadyCamel");
        assert_eq!(studly(""), "");
    }

    #[test]
    fn test_dot_notation_to_type() {
        assert_eq!(dot_notation_to_type("counter"), "Counter");
        assert_eq!(dot_notation_to_type("user.profile.edit"), "User::Profile::Edit");
        assert_eq!(dot_notation_to_type("admin.user-list"), "Admin::UserList");
    }
}
