//! Error types for Relay.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RelayError`] - Top-level error type for all dispatcher operations
//! - [`RegistryError`] - Malformed registration or removal calls
//! - [`DispatchError`] - Failures while dispatching a command or event
//! - [`ValidationError`] - Schema mismatch on accept or emit arguments

use crate::schema::Direction;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all dispatcher operations.
#[derive(Error, Debug)]
pub enum RelayError {
    /// A registration or removal call was malformed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An error occurred while dispatching a command or event.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Schema validation rejected an argument list.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised by the registration and removal surface.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// An event name was empty.
    #[error("expected a non-empty event name")]
    EmptyName,

    /// A subscription count was neither a positive integer nor -1.
    #[error("invalid listener count {0}, expected a positive integer or -1")]
    InvalidCount(i64),

    /// Removal was requested for an event name with no subscriptions at all.
    #[error("unregistered event \"{0}\"")]
    Unregistered(String),

    /// Removal was requested for a handler reference not present among the
    /// event name's subscriptions.
    #[error("no such handler for event \"{0}\"")]
    NoSuchHandler(String),
}

/// Errors raised while dispatching a command or event.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// `accept` was called for a name with no registered handler.
    #[error("no matching handler for event \"{0}\"")]
    NoHandler(String),

    /// The accept handler failed; its error is preserved as the source.
    #[error("handler for \"{event}\" failed: {source}")]
    Handler {
        /// The command name whose handler failed.
        event: String,
        /// The handler's error, unchanged.
        #[source]
        source: BoxError,
    },

    /// A listener failed mid fan-out. Remaining listeners, including the
    /// wildcard channel, were not invoked for that emission.
    #[error("listener for \"{event}\" failed: {source}")]
    Listener {
        /// The event name being delivered when the listener failed.
        event: String,
        /// The listener's error, unchanged.
        #[source]
        source: BoxError,
    },
}

/// Schema validation rejected an argument list before dispatch.
///
/// Carries the event name and direction for diagnostics; the underlying
/// validator's message is preserved verbatim as the source.
#[derive(Error, Debug)]
#[error("schema validation failed for {direction} \"{event}\": {source}")]
pub struct ValidationError {
    /// The event name whose arguments were rejected.
    pub event: String,
    /// Which channel the arguments were bound for.
    pub direction: Direction,
    /// The validator's error, verbatim.
    #[source]
    pub source: BoxError,
}
