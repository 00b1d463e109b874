//! Schema data model for argument validation.
//!
//! A schema is an ordered list of [`ArgType`] element declarations attached
//! to an event name and a [`Direction`]. The dispatcher consults its attached
//! [`SchemaSet`] before invoking any handler or listener; the check itself is
//! delegated to a [`Validator`] implementation.
//!
//! [`ArgType`] and [`SchemaSet`] derive `Serialize`/`Deserialize`, so an
//! application can declare its schemas in JSON configuration:
//!
//! ```rust,ignore
//! let schemas: SchemaSet = serde_json::from_str(
//!     r#"{ "emit": { "reading": ["number", "string"] } }"#,
//! )?;
//! ```

use crate::error::BoxError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Which channel an argument list is bound for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The single-handler command path.
    Accept,
    /// The multi-listener publish path.
    Emit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Accept => "accept",
            Direction::Emit => "emit",
        })
    }
}

/// A closed element-type declaration for one argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Matches `null`.
    Null,
    /// Matches a boolean.
    Bool,
    /// Matches any number.
    Number,
    /// Matches a string.
    String,
    /// Matches an array.
    Array,
    /// Matches an object.
    Object,
    /// Matches every value.
    Any,
}

impl ArgType {
    /// Whether the given value matches this declaration.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ArgType::Null => value.is_null(),
            ArgType::Bool => value.is_boolean(),
            ArgType::Number => value.is_number(),
            ArgType::String => value.is_string(),
            ArgType::Array => value.is_array(),
            ArgType::Object => value.is_object(),
            ArgType::Any => true,
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArgType::Null => "null",
            ArgType::Bool => "bool",
            ArgType::Number => "number",
            ArgType::String => "string",
            ArgType::Array => "array",
            ArgType::Object => "object",
            ArgType::Any => "any",
        })
    }
}

/// Declared argument shapes for both dispatch directions.
///
/// Absence of an entry for a given event name disables validation for that
/// name and direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSet {
    /// Shapes consulted by the accept channel.
    #[serde(default)]
    pub accept: HashMap<String, Vec<ArgType>>,
    /// Shapes consulted by the emit channel.
    #[serde(default)]
    pub emit: HashMap<String, Vec<ArgType>>,
}

impl SchemaSet {
    /// Create an empty schema set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the argument shape for an accept command.
    pub fn with_accept(mut self, event: impl Into<String>, types: impl Into<Vec<ArgType>>) -> Self {
        self.accept.insert(event.into(), types.into());
        self
    }

    /// Declare the argument shape for an emitted event.
    pub fn with_emit(mut self, event: impl Into<String>, types: impl Into<Vec<ArgType>>) -> Self {
        self.emit.insert(event.into(), types.into());
        self
    }

    /// Look up the declared shape for a name and direction.
    pub fn lookup(&self, direction: Direction, event: &str) -> Option<&[ArgType]> {
        let map = match direction {
            Direction::Accept => &self.accept,
            Direction::Emit => &self.emit,
        };
        map.get(event).map(Vec::as_slice)
    }
}

/// Validates an argument list against a declared element-type list.
///
/// This is the collaborator seam of the dispatcher: `validate` runs before
/// any handler or listener code, and its error is surfaced verbatim inside
/// [`ValidationError`](crate::ValidationError). Implementations depend only
/// on this crate.
pub trait Validator {
    /// Check `args` against `expected`, returning a descriptive error on
    /// mismatch.
    fn validate(&self, expected: &[ArgType], args: &[Value]) -> Result<(), BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arg_type_matches() {
        assert!(ArgType::Null.matches(&Value::Null));
        assert!(ArgType::Bool.matches(&json!(true)));
        assert!(ArgType::Number.matches(&json!(1.5)));
        assert!(ArgType::String.matches(&json!("x")));
        assert!(ArgType::Array.matches(&json!([1, 2])));
        assert!(ArgType::Object.matches(&json!({"k": 1})));

        assert!(!ArgType::Number.matches(&json!("7")));
        assert!(!ArgType::String.matches(&json!(7)));
    }

    #[test]
    fn test_any_matches_everything() {
        for value in [json!(null), json!(false), json!(3), json!("s"), json!([]), json!({})] {
            assert!(ArgType::Any.matches(&value));
        }
    }

    #[test]
    fn test_lookup_by_direction() {
        let schemas = SchemaSet::new()
            .with_accept("login", [ArgType::String, ArgType::String])
            .with_emit("login", [ArgType::String]);

        assert_eq!(
            schemas.lookup(Direction::Accept, "login"),
            Some(&[ArgType::String, ArgType::String][..])
        );
        assert_eq!(schemas.lookup(Direction::Emit, "login"), Some(&[ArgType::String][..]));
        assert_eq!(schemas.lookup(Direction::Emit, "logout"), None);
    }

    #[test]
    fn test_serde_lowercase_spelling() {
        let schemas: SchemaSet =
            serde_json::from_str(r#"{ "emit": { "reading": ["number", "any"] } }"#).unwrap();
        assert_eq!(
            schemas.lookup(Direction::Emit, "reading"),
            Some(&[ArgType::Number, ArgType::Any][..])
        );
        assert!(schemas.accept.is_empty());

        // Unknown element-type spellings are rejected at parse time.
        assert!(serde_json::from_str::<SchemaSet>(r#"{ "emit": { "x": ["integer"] } }"#).is_err());
    }
}
