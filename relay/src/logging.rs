//! Logging listener for event observation.

use crate::listener::{ListenFn, listen_fn};
use relay_core::Value;

/// A listener that logs every delivery at debug level.
///
/// Register it on the wildcard channel to observe all emissions; the event
/// name arrives prepended to the argument list and is logged as its own
/// field.
///
/// # Example
///
/// ```rust,ignore
/// relay.on(relay::WILDCARD, logging_listener())?;
/// ```
pub fn logging_listener() -> ListenFn {
    listen_fn(|_, args| {
        match args.split_first() {
            Some((Value::String(event), rest)) => {
                tracing::debug!(event = %event, args = ?rest, "event delivered");
            }
            _ => tracing::debug!(?args, "event delivered"),
        }
        Ok(())
    })
}
