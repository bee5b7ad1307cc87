//! Action tables.
//!
//! Instead of looking methods up by name at call time, each component type
//! declares a table of `name → callable` with a visibility per entry. The
//! dispatch engine consults the table for existence and visibility, then
//! calls through it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::args::ActionArgs;

/// Who may invoke an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Callable by name from a request
    Public,
    /// Rejected when requested by name, callable through a listener
    Protected,
    /// Same dispatch rules as `Protected`
    Private,
}

impl Visibility {
    /// True for [`Visibility::Public`].
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Conversion of an action's return value into a JSON value.
///
/// Any `Result<T, E>` with a serializable `T` works. The engine accepts only
/// `null` and strings; everything else is rejected after the call.
pub trait IntoActionResult {
    /// Converts into the engine's result type.
    fn into_action_result(self) -> anyhow::Result<Value>;
}

impl<T, E> IntoActionResult for Result<T, E>
where
    T: Serialize,
    E: Into<anyhow::Error>,
{
    fn into_action_result(self) -> anyhow::Result<Value> {
        let value = self.map_err(Into::into)?;
        Ok(serde_json::to_value(value)?)
    }
}

type ActionFn<C> = Arc<dyn Fn(&mut C, &ActionArgs) -> anyhow::Result<Value> + Send + Sync>;

/// One declared action.
pub struct ActionEntry<C> {
    name: String,
    visibility: Visibility,
    call: ActionFn<C>,
}

impl<C> ActionEntry<C> {
    /// The action name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The action visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Invokes the action on `component`.
    pub fn call(&self, component: &mut C, args: &ActionArgs) -> anyhow::Result<Value> {
        (self.call)(component, args)
    }
}

impl<C> fmt::Debug for ActionEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionEntry")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// The declared actions of a component type, in declaration order.
///
/// Declaring a name twice replaces the earlier entry in place.
pub struct ActionTable<C> {
    entries: Vec<ActionEntry<C>>,
}

impl<C> ActionTable<C> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declares an action with the given visibility.
    pub fn action<F, R>(mut self, name: impl Into<String>, visibility: Visibility, f: F) -> Self
    where
        F: Fn(&mut C, &ActionArgs) -> R + Send + Sync + 'static,
        R: IntoActionResult,
    {
        let entry = ActionEntry {
            name: name.into(),
            visibility,
            call: Arc::new(move |component, args| f(component, args).into_action_result()),
        };
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// Declares a public action.
    pub fn public<F, R>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut C, &ActionArgs) -> R + Send + Sync + 'static,
        R: IntoActionResult,
    {
        self.action(name, Visibility::Public, f)
    }

    /// Declares a protected action.
    pub fn protected<F, R>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut C, &ActionArgs) -> R + Send + Sync + 'static,
        R: IntoActionResult,
    {
        self.action(name, Visibility::Protected, f)
    }

    /// Declares a private action.
    pub fn private<F, R>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut C, &ActionArgs) -> R + Send + Sync + 'static,
        R: IntoActionResult,
    {
        self.action(name, Visibility::Private, f)
    }

    /// Looks up an action by name.
    pub fn get(&self, name: &str) -> Option<&ActionEntry<C>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// True if an action with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Action names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of declared actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no actions are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for ActionTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ActionTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
