//! Error taxonomy for resolution and dispatch.
//!
//! Every error here is returned to the immediate caller; nothing inside the
//! engine retries or rewrites them. The only failures the engine swallows are
//! [`ConstructionError`]s met while walking the resolution chain, which count
//! as "no match".

use std::fmt;
use std::path::PathBuf;

use spindle_render::RenderError;
use thiserror::Error;

/// The lifecycle step during which component code failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// `boot(props)`
    Boot,
    /// `mount()`
    Mount,
    /// The action body
    Action,
    /// `before_render()`
    BeforeRender,
    /// `render()`
    Render,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecyclePhase::Boot => write!(f, "boot"),
            LifecyclePhase::Mount => write!(f, "mount"),
            LifecyclePhase::Action => write!(f, "action"),
            LifecyclePhase::BeforeRender => write!(f, "before-render"),
            LifecyclePhase::Render => write!(f, "render"),
        }
    }
}

/// Errors raised while resolving a component or dispatching an action to it.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The resolution chain was exhausted.
    #[error("component [{name}] not found")]
    ComponentNotFound { name: String },

    /// The action is neither a method nor a listener of the component.
    #[error("component [{component}] has no method or listener [{action}]")]
    ComponentMethodNotFound { component: String, action: String },

    /// The action exists but may not be called remotely.
    #[error("component [{component}] method [{action}] cannot be called")]
    NonPublicComponentMethodCall { component: String, action: String },

    /// The action returned something other than nothing or a string.
    #[error("component [{component}] action [{action}] response should be a string, instead was [{kind}]")]
    InvalidActionResult {
        component: String,
        action: String,
        kind: &'static str,
    },

    /// Component code returned an error during the lifecycle.
    #[error("component [{component}] failed during {phase}")]
    Lifecycle {
        component: String,
        phase: LifecyclePhase,
        #[source]
        source: anyhow::Error,
    },

    /// The view provider failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl DispatchError {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::ComponentNotFound { name: name.into() }
    }

    pub(crate) fn method_not_found(component: impl Into<String>, action: impl Into<String>) -> Self {
        Self::ComponentMethodNotFound {
            component: component.into(),
            action: action.into(),
        }
    }

    pub(crate) fn non_public(component: impl Into<String>, action: impl Into<String>) -> Self {
        Self::NonPublicComponentMethodCall {
            component: component.into(),
            action: action.into(),
        }
    }

    pub(crate) fn lifecycle(
        component: impl Into<String>,
        phase: LifecyclePhase,
        source: anyhow::Error,
    ) -> Self {
        Self::Lifecycle {
            component: component.into(),
            phase,
            source,
        }
    }
}

/// A malformed registration at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to register component [{name}]: implementation [{selector}] does not exist")]
pub struct RegistrationError {
    /// Component name being registered
    pub name: String,
    /// Selector that did not resolve to a known implementation
    pub selector: String,
}

/// Failure to construct a component instance.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// Nothing is provided under this type path.
    #[error("no implementation provided for [{0}]")]
    UnknownType(String),

    /// The factory for this type path returned an error.
    #[error("failed to construct [{type_path}]")]
    Failed {
        type_path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Failure to load configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid YAML for [`Config`](crate::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
