//! Action argument parsing and the argument bag passed to actions.
//!
//! Actions triggered from the page carry their arguments as one loosely
//! formatted string, e.g. `1, 'two', "three"`. [`parse_action_arguments`]
//! turns that into typed scalars. Actions triggered by an event carry a JSON
//! payload instead; [`ActionArgs::from_event_params`] handles that shape.

use serde::Serialize;
use serde_json::Value;

use crate::component::Vars;

/// A scalar parsed from the action argument string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// A numeric token, truncated to an integer
    Int(i64),
    /// Anything else
    Str(String),
}

impl From<ArgValue> for Value {
    fn from(arg: ArgValue) -> Self {
        match arg {
            ArgValue::Int(n) => Value::from(n),
            ArgValue::Str(s) => Value::String(s),
        }
    }
}

/// Parses a comma-separated argument string.
///
/// For each token, quote characters are removed wherever they occur, then
/// whitespace is trimmed. Empty tokens are dropped. Numeric tokens become
/// [`ArgValue::Int`].
///
/// ```rust
/// use spindle_dispatch::{parse_action_arguments, ArgValue};
///
/// let args = parse_action_arguments(r#"1, 'two', "three", , 4"#);
/// assert_eq!(args, vec![
///     ArgValue::Int(1),
///     ArgValue::Str("two".into()),
///     ArgValue::Str("three".into()),
///     ArgValue::Int(4),
/// ]);
/// ```
pub fn parse_action_arguments(raw: &str) -> Vec<ArgValue> {
    raw.split(',')
        .filter_map(|token| {
            let unquoted: String = token.chars().filter(|c| *c != '"' && *c != '\'').collect();
            let trimmed = unquoted.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some(match numeric_value(trimmed) {
                Some(n) => ArgValue::Int(n),
                None => ArgValue::Str(trimmed.to_string()),
            })
        })
        .collect()
}

/// Returns the integer value of a decimal number token.
///
/// Accepts integers and finite floats written with digits, sign, `.` and an
/// exponent. Floats are truncated toward zero and saturate at the `i64` range.
fn numeric_value(token: &str) -> Option<i64> {
    if let Ok(n) = token.parse::<i64>() {
        return Some(n);
    }

    let decimal_chars = token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars || !token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    token
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

/// Arguments handed to an action body.
///
/// Positional arguments come from the parsed argument string or from an event
/// payload array; named arguments come from an event payload object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionArgs {
    positional: Vec<Value>,
    named: Vars,
}

impl ActionArgs {
    /// No arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional arguments.
    pub fn positional(values: Vec<Value>) -> Self {
        Self {
            positional: values,
            named: Vars::new(),
        }
    }

    /// Named arguments.
    pub fn named(values: Vars) -> Self {
        Self {
            positional: Vec::new(),
            named: values,
        }
    }

    /// Builds arguments from an event payload.
    ///
    /// Objects become named arguments, arrays positional ones, and anything
    /// else no arguments.
    pub fn from_event_params(params: Value) -> Self {
        match params {
            Value::Object(map) => Self::named(map),
            Value::Array(values) => Self::positional(values),
            _ => Self::new(),
        }
    }

    /// Positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Named argument `key`.
    pub fn get_named(&self, key: &str) -> Option<&Value> {
        self.named.get(key)
    }

    /// Named argument `key`, else positional argument `index`.
    pub fn lookup(&self, index: usize, key: &str) -> Option<&Value> {
        self.get_named(key).or_else(|| self.get(index))
    }

    /// String argument, by name or position.
    pub fn str(&self, index: usize, key: &str) -> Option<&str> {
        self.lookup(index, key).and_then(Value::as_str)
    }

    /// Integer argument, by name or position. Numeric strings are accepted.
    pub fn i64(&self, index: usize, key: &str) -> Option<i64> {
        match self.lookup(index, key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => numeric_value(s.trim()),
            _ => None,
        }
    }

    /// Number of positional plus named arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// True if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl From<Vec<ArgValue>> for ActionArgs {
    fn from(args: Vec<ArgValue>) -> Self {
        Self::positional(args.into_iter().map(Value::from).collect())
    }
}
