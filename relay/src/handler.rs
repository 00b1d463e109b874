//! Accept-channel handler types.

use crate::dispatcher::Relay;
use relay_core::{BoxError, Value};
use std::rc::Rc;

/// A command handler bound to the accept channel.
///
/// Receives the host dispatcher (through which it may re-enter, e.g. call
/// [`Relay::emit`]) and the full argument list as one ordered slice, and
/// returns the command's result.
pub type AcceptFn = Rc<dyn Fn(&Relay, &[Value]) -> Result<Value, BoxError>>;

/// Wrap a closure into an [`AcceptFn`].
///
/// # Example
///
/// ```rust,ignore
/// relay.set_accept_handler("size", Some(accept_fn(|_, args| Ok(json!(args.len())))))?;
/// ```
pub fn accept_fn<F>(f: F) -> AcceptFn
where
    F: Fn(&Relay, &[Value]) -> Result<Value, BoxError> + 'static,
{
    Rc::new(f)
}
