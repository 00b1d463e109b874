//! Builder for configuring a dispatcher instance.

use crate::dispatcher::Relay;
use crate::validate::TypeListValidator;
use relay_core::{SchemaSet, Validator};

/// Configures schemas and the validator before constructing a [`Relay`].
///
/// # Example
///
/// ```rust,ignore
/// let relay = Relay::builder()
///     .schemas(SchemaSet::new().with_emit("reading", [ArgType::Number]))
///     .build();
/// ```
#[derive(Default)]
pub struct RelayBuilder {
    schemas: Option<SchemaSet>,
    validator: Option<Box<dyn Validator>>,
}

impl RelayBuilder {
    /// Create a builder with no schemas and the standard validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a schema set consulted before every accept and emit dispatch.
    pub fn schemas(mut self, schemas: SchemaSet) -> Self {
        self.schemas = Some(schemas);
        self
    }

    /// Install a custom validator in place of [`TypeListValidator`].
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Relay {
        let validator = self.validator.unwrap_or_else(|| Box::new(TypeListValidator));
        Relay::from_parts(self.schemas, validator)
    }
}
