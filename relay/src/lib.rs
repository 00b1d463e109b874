//! # relay - dual-channel synchronous event dispatcher
//!
//! A [`Relay`] gives a host object two dispatch channels over string event
//! names:
//!
//! - **Accept channel**: exactly one handler per command name; [`Relay::accept`]
//!   routes a command to it and returns its result synchronously.
//! - **Emit channel**: any number of counted subscriptions per event name;
//!   [`Relay::emit`] fans out to them in registration order, then to the
//!   [`WILDCARD`] channel. `once` and `upto` subscriptions remove themselves
//!   after their invocation budget is spent.
//!
//! An optional schema layer validates argument lists before dispatch on both
//! channels; see [`SchemaSet`] and [`RelayBuilder`].
//!
//! Execution is strictly single-threaded and re-entrant: handlers and
//! listeners receive the host `Relay` as their first argument and may call
//! back into it on the same stack. Events emitted inside an accept handler
//! are fully delivered before `accept` returns.
//!
//! # Quick Start
//!
//! ```
//! use relay::{Relay, accept_fn, json, listen_fn};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! # fn main() -> Result<(), relay::RelayError> {
//! let relay = Relay::new();
//!
//! // Accept channel: one handler per command name.
//! relay.set_accept_handler(
//!     "ping",
//!     Some(accept_fn(|relay, args| {
//!         relay.emit("pinged", args)?;
//!         Ok(json!("pong"))
//!     })),
//! )?;
//!
//! // Emit channel: any number of counted subscriptions.
//! let seen = Rc::new(RefCell::new(0));
//! let counter = Rc::clone(&seen);
//! relay.on(
//!     "pinged",
//!     listen_fn(move |_, _| {
//!         *counter.borrow_mut() += 1;
//!         Ok(())
//!     }),
//! )?;
//!
//! assert_eq!(relay.accept("ping", &[json!(1)])?, json!("pong"));
//! assert_eq!(*seen.borrow(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod builder;
mod dispatcher;
mod handler;
mod listener;
mod registry;
mod validate;

#[cfg(feature = "tracing")]
pub mod logging;
pub mod testing;

// Re-export core types
pub use relay_core;
pub use relay_core::{
    ArgType, BoxError, Direction, DispatchError, RegistryError, RelayError, SchemaSet,
    ValidationError, Validator, Value, json,
};

pub use builder::RelayBuilder;
pub use dispatcher::{Relay, WILDCARD};
pub use handler::{AcceptFn, accept_fn};
pub use listener::{ListenFn, listen_fn};
pub use validate::{TypeCheckError, TypeListValidator};

/// Build an argument list from JSON-convertible expressions.
///
/// # Example
///
/// ```
/// use relay::args;
///
/// let list = args![1, "on", true];
/// assert_eq!(list.len(), 3);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::json!($value)),+]
    };
}
