//! The request context collaborator.
//!
//! The transport layer owns HTTP parsing; dispatch only needs the method and a
//! flat view of the input. [`RequestContext`] is that view, and [`Request`] is
//! an in-memory implementation for transports and tests.

use serde_json::Value;

use crate::component::Vars;

/// What the dispatch engine reads from an incoming request.
pub trait RequestContext {
    /// HTTP method, e.g. `"GET"`.
    fn method(&self) -> &str;

    /// Looks up an input value.
    fn input(&self, key: &str) -> Option<&Value>;

    /// All input except the named keys.
    fn except(&self, keys: &[&str]) -> Vars;

    /// Looks up an input value, falling back to `default`.
    fn input_or(&self, key: &str, default: Value) -> Value {
        self.input(key).cloned().unwrap_or(default)
    }

    /// True for read (GET) requests.
    fn is_read(&self) -> bool {
        self.method().eq_ignore_ascii_case("GET")
    }
}

/// An in-memory request.
///
/// # Example
///
/// ```rust
/// use spindle_dispatch::{Request, RequestContext};
///
/// let request = Request::get()
///     .with("component", "counter")
///     .with("count", 3);
///
/// assert!(request.is_read());
/// assert_eq!(request.except(&["component"]).len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    method: String,
    input: Vars,
}

impl Request {
    /// Creates a request with the given method and no input.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            input: Vars::new(),
        }
    }

    /// Creates a GET request.
    pub fn get() -> Self {
        Self::new("GET")
    }

    /// Creates a POST request.
    pub fn post() -> Self {
        Self::new("POST")
    }

    /// Adds an input value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input.insert(key.into(), value.into());
        self
    }

    /// Replaces all input.
    pub fn with_input(mut self, input: Vars) -> Self {
        self.input = input;
        self
    }

    /// Returns all input.
    pub fn all(&self) -> &Vars {
        &self.input
    }
}

impl RequestContext for Request {
    fn method(&self) -> &str {
        &self.method
    }

    fn input(&self, key: &str) -> Option<&Value> {
        self.input.get(key)
    }

    fn except(&self, keys: &[&str]) -> Vars {
        self.input
            .iter()
            .filter(|(k, _)| !keys.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_except() {
        let request = Request::get()
            .with("component", "x")
            .with("id", "y")
            .with("foo", "bar");

        let rest = request.except(&["component", "id"]);
        assert_eq!(Value::Object(rest), json!({"foo": "bar"}));
    }

    #[test]
    fn test_input_or_default() {
        let request = Request::post();
        assert_eq!(request.input_or("eventParams", json!({})), json!({}));
        assert!(!request.is_read());
    }

    #[test]
    fn test_method_case_insensitive() {
        assert!(Request::new("get").is_read());
    }
}
