//! Engine configuration.
//!
//! Configuration is a small serde struct so it can be loaded from YAML or
//! built in code:
//!
//! ```yaml
//! namespace: "App::Components::"
//! id_key: id
//! hints:
//!   admin: "Admin::Components"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default prefix for convention-derived type paths.
pub const DEFAULT_NAMESPACE: &str = "App::Components::";

/// Default request key carrying the component id.
pub const DEFAULT_ID_KEY: &str = "id";

/// Request key naming the component being dispatched.
pub const COMPONENT_KEY: &str = "component";

/// Settings consulted by the resolver and the dispatch engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prepended verbatim to convention-derived type names.
    pub namespace: String,

    /// Request key carrying the component id. Never part of component state.
    pub id_key: String,

    /// Namespace alias → type path prefix, for names like `admin:users.table`.
    pub hints: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            id_key: DEFAULT_ID_KEY.to_string(),
            hints: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parses configuration from a YAML string. Missing keys take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads configuration from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Sets the namespace prefix.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the request key carrying the component id.
    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = id_key.into();
        self
    }

    /// Uses `"{prefix}-id"` as the id key, e.g. `spindle-id`.
    pub fn with_prefix(self, prefix: &str) -> Self {
        self.with_id_key(format!("{prefix}-id"))
    }

    /// Adds a namespace hint.
    pub fn with_hint(mut self, alias: impl Into<String>, type_prefix: impl Into<String>) -> Self {
        self.hints.insert(alias.into(), type_prefix.into());
        self
    }

    /// Request keys that never count as component state.
    pub fn reserved_keys(&self) -> [&str; 2] {
        [COMPONENT_KEY, self.id_key.as_str()]
    }
}
