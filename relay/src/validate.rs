//! Standard argument-list validator.

use relay_core::{ArgType, BoxError, Validator, Value};
use thiserror::Error;

/// Errors produced by [`TypeListValidator`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeCheckError {
    /// The argument list length does not match the declared shape.
    #[error("expected {expected} argument(s), got {got}")]
    Arity {
        /// Declared number of arguments.
        expected: usize,
        /// Number of arguments supplied.
        got: usize,
    },

    /// An argument did not match its declared element type.
    #[error("argument {index} should be {expected}, got {got}")]
    Mismatch {
        /// Zero-based argument position.
        index: usize,
        /// The declared element type.
        expected: ArgType,
        /// The supplied value's type.
        got: &'static str,
    },
}

/// The standard validator: checks arity, then each position against its
/// declared [`ArgType`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeListValidator;

impl Validator for TypeListValidator {
    fn validate(&self, expected: &[ArgType], args: &[Value]) -> Result<(), BoxError> {
        if expected.len() != args.len() {
            return Err(Box::new(TypeCheckError::Arity {
                expected: expected.len(),
                got: args.len(),
            }));
        }
        for (index, (ty, value)) in expected.iter().zip(args).enumerate() {
            if !ty.matches(value) {
                return Err(Box::new(TypeCheckError::Mismatch {
                    index,
                    expected: *ty,
                    got: type_name_of(value),
                }));
            }
        }
        Ok(())
    }
}

fn type_name_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
