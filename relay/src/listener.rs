//! Emit-channel listener types.

use crate::dispatcher::Relay;
use relay_core::{BoxError, Value};
use std::rc::Rc;

/// A subscription callback on the emit channel.
///
/// Receives the host dispatcher and the emitted argument list as one ordered
/// slice; wildcard subscriptions see the event name prepended as the first
/// element. The `Rc` allocation is the subscription's identity: registering a
/// clone of the same handle twice creates two subscriptions that
/// [`Relay::remove_listener`] removes together.
pub type ListenFn = Rc<dyn Fn(&Relay, &[Value]) -> Result<(), BoxError>>;

/// Wrap a closure into a [`ListenFn`].
///
/// Each call allocates a fresh identity; hold on to the returned handle (or
/// the one echoed back by [`Relay::on`]) to remove the subscription later.
pub fn listen_fn<F>(f: F) -> ListenFn
where
    F: Fn(&Relay, &[Value]) -> Result<(), BoxError> + 'static,
{
    Rc::new(f)
}
