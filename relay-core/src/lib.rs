//! # relay-core
//!
//! Core error and schema types for the Relay event dispatcher.
//!
//! This crate has minimal dependencies and is the seam for external
//! collaborators: an alternate [`Validator`] implementation depends on this
//! crate alone, without pulling in the full `relay` dispatcher.
//!
//! # Contents
//!
//! - [`RelayError`] and its sub-errors - the dispatcher's error hierarchy
//! - [`SchemaSet`], [`ArgType`], [`Direction`] - declared argument shapes
//! - [`Validator`] - the argument-list validation contract
//! - [`Value`] - the dynamic argument element type (re-exported from
//!   `serde_json`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod schema;

// Re-exports
pub use error::{BoxError, DispatchError, RegistryError, RelayError, ValidationError};
pub use schema::{ArgType, Direction, SchemaSet, Validator};
pub use serde_json::{Value, json};
