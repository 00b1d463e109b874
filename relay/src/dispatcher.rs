//! The dispatcher: accept registry, listener registry, schema gate.

use crate::builder::RelayBuilder;
use crate::handler::AcceptFn;
use crate::listener::ListenFn;
use crate::registry::{ListenerRegistry, Remaining};
use relay_core::{
    Direction, DispatchError, RegistryError, RelayError, SchemaSet, ValidationError, Validator,
    Value,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// The reserved channel name whose listeners observe every emission.
///
/// Wildcard listeners receive the event name prepended to the argument list,
/// so they can discriminate between events.
pub const WILDCARD: &str = "*";

/// A dual-channel event dispatcher.
///
/// The **accept channel** routes a named command to exactly one registered
/// handler and returns its result synchronously. The **emit channel**
/// publishes a named event to every matching subscription in registration
/// order, honoring per-subscription invocation counts, then repeats the
/// fan-out for the [`WILDCARD`] channel.
///
/// A host object owns a `Relay` as a field and delegates to it; handlers and
/// listeners receive the owning `Relay` as their first argument and may
/// re-enter it on the same call stack. Events emitted from inside an accept
/// handler are fully delivered before `accept` returns.
///
/// `Relay` is single-threaded by design and is neither `Send` nor `Sync`;
/// each instance exclusively owns its registries.
///
/// # Example
///
/// ```rust,ignore
/// let relay = Relay::new();
/// relay.set_accept_handler("alarm", Some(accept_fn(|relay, args| {
///     relay.emit("alarm_raised", args)?;
///     Ok(Value::Null)
/// })))?;
/// relay.on("alarm_raised", listen_fn(|_, args| {
///     println!("raised with {args:?}");
///     Ok(())
/// }))?;
/// relay.accept("alarm", &args![3])?;
/// ```
pub struct Relay {
    accept_handlers: RefCell<HashMap<String, AcceptFn>>,
    listeners: RefCell<ListenerRegistry>,
    schemas: RefCell<Option<SchemaSet>>,
    validator: Box<dyn Validator>,
}

impl Relay {
    /// Create a dispatcher with no schemas and the standard validator.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Configure schemas or a custom validator before construction.
    pub fn builder() -> RelayBuilder {
        RelayBuilder::new()
    }

    pub(crate) fn from_parts(schemas: Option<SchemaSet>, validator: Box<dyn Validator>) -> Self {
        Self {
            accept_handlers: RefCell::new(HashMap::new()),
            listeners: RefCell::new(ListenerRegistry::default()),
            schemas: RefCell::new(schemas),
            validator,
        }
    }

    /// Discard all accept handlers, subscriptions, and attached schemas.
    ///
    /// The validator survives a reset; it is construction-time configuration.
    pub fn reset(&self) {
        self.accept_handlers.borrow_mut().clear();
        self.listeners.borrow_mut().clear();
        self.schemas.borrow_mut().take();
    }

    // ------------------------------------------------------------------
    // Accept channel
    // ------------------------------------------------------------------

    /// Register or replace accept handlers in bulk.
    ///
    /// `Some(handler)` inserts or overwrites the entry for its name (last
    /// registration wins), `None` deletes it; names not present in
    /// `handlers` are untouched.
    pub fn set_accept_handlers<I>(&self, handlers: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (String, Option<AcceptFn>)>,
    {
        let mut map = self.accept_handlers.borrow_mut();
        for (name, handler) in handlers {
            if name.is_empty() {
                return Err(RegistryError::EmptyName);
            }
            match handler {
                Some(h) => {
                    map.insert(name, h);
                }
                None => {
                    map.remove(&name);
                }
            }
        }
        Ok(())
    }

    /// Register or clear a single accept handler.
    pub fn set_accept_handler(
        &self,
        name: impl Into<String>,
        handler: Option<AcceptFn>,
    ) -> Result<(), RegistryError> {
        self.set_accept_handlers([(name.into(), handler)])
    }

    /// Whether an accept handler is registered for `name`.
    pub fn has_handler(&self, name: &str) -> bool {
        self.accept_handlers.borrow().contains_key(name)
    }

    /// Dispatch a command to its sole registered handler and return the
    /// handler's result.
    ///
    /// When an accept schema is declared for `name`, the argument list is
    /// validated first; on mismatch the handler is never invoked. A handler
    /// error is surfaced as [`DispatchError::Handler`] with the original
    /// error as its source.
    pub fn accept(&self, name: &str, args: &[Value]) -> Result<Value, RelayError> {
        let handler = self
            .accept_handlers
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| DispatchError::NoHandler(name.to_owned()))?;
        self.check_schema(Direction::Accept, name, args)?;
        handler(self, args).map_err(|source| {
            DispatchError::Handler { event: name.to_owned(), source }.into()
        })
    }

    // ------------------------------------------------------------------
    // Emit channel: registration
    // ------------------------------------------------------------------

    /// Register an unlimited subscription for `name`.
    ///
    /// Returns the listener handle so the call site can keep it for later
    /// removal. Registering a clone of an existing handle adds a second
    /// subscription with the same identity.
    pub fn on(&self, name: &str, listener: ListenFn) -> Result<ListenFn, RegistryError> {
        self.upto(-1, name, listener)
    }

    /// Register a fire-once subscription for `name`.
    pub fn once(&self, name: &str, listener: ListenFn) -> Result<ListenFn, RegistryError> {
        self.upto(1, name, listener)
    }

    /// Register a counted subscription for `name`.
    ///
    /// `count = -1` never expires; `count = n > 0` fires on the next `n`
    /// matching emissions, then removes itself. Any other count fails with
    /// [`RegistryError::InvalidCount`]. The subscription is appended to the
    /// tail of `name`'s sequence.
    pub fn upto(&self, count: i64, name: &str, listener: ListenFn) -> Result<ListenFn, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let remaining = match count {
            -1 => Remaining::Unlimited,
            n if n > 0 => Remaining::Left(n as u64),
            other => return Err(RegistryError::InvalidCount(other)),
        };
        self.listeners.borrow_mut().subscribe(name, Rc::clone(&listener), remaining);
        Ok(listener)
    }

    // ------------------------------------------------------------------
    // Emit channel: removal
    // ------------------------------------------------------------------

    /// Remove every subscription for `name` whose handler is the same
    /// reference as `listener`. Returns the count removed.
    ///
    /// Fails with [`RegistryError::Unregistered`] when `name` has no
    /// subscriptions at all, and [`RegistryError::NoSuchHandler`] when none
    /// of them match `listener`.
    pub fn remove_listener(&self, name: &str, listener: &ListenFn) -> Result<usize, RegistryError> {
        self.listeners.borrow_mut().remove_matching(name, listener)
    }

    /// Alias for [`Relay::remove_listener`].
    pub fn remove_event_listener(
        &self,
        name: &str,
        listener: &ListenFn,
    ) -> Result<usize, RegistryError> {
        self.remove_listener(name, listener)
    }

    /// Remove every subscription for `name`. Returns the count removed.
    pub fn remove_all_listeners(&self, name: &str) -> Result<usize, RegistryError> {
        self.listeners.borrow_mut().remove_all(name)
    }

    // ------------------------------------------------------------------
    // Emit channel: emission
    // ------------------------------------------------------------------

    /// Publish an event to the matching subscriptions, then to the wildcard
    /// channel with the event name prepended to the argument list.
    ///
    /// When an emit schema is declared for `name`, the argument list is
    /// validated first; on mismatch nothing is dispatched at all. Within a
    /// pass, listeners run synchronously in registration order; a counted
    /// subscription is decremented after it returns and removed on
    /// exhaustion. A listener error aborts the remaining fan-out for this
    /// emission, including the wildcard pass, and propagates to the caller.
    pub fn emit(&self, name: &str, args: &[Value]) -> Result<(), RelayError> {
        self.check_schema(Direction::Emit, name, args)?;
        self.fan_out(name, name, args)?;
        if self.listeners.borrow().count(WILDCARD) > 0 {
            let mut prefixed = Vec::with_capacity(args.len() + 1);
            prefixed.push(Value::String(name.to_owned()));
            prefixed.extend_from_slice(args);
            self.fan_out(WILDCARD, name, &prefixed)?;
        }
        Ok(())
    }

    /// One channel pass over a snapshot of the live subscriptions.
    ///
    /// Subscriptions added after the snapshot do not fire in this pass;
    /// subscriptions removed mid-pass are skipped via the liveness check. No
    /// registry borrow is held across a listener invocation, so listeners may
    /// re-enter any `Relay` method.
    fn fan_out(&self, channel: &str, event: &str, args: &[Value]) -> Result<(), RelayError> {
        let snapshot = self.listeners.borrow().snapshot(channel);
        for (id, handler) in snapshot {
            if !self.listeners.borrow().is_live(channel, id) {
                continue;
            }
            handler(self, args).map_err(|source| {
                DispatchError::Listener { event: event.to_owned(), source }
            })?;
            self.listeners.borrow_mut().record_delivery(channel, id);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Schemas
    // ------------------------------------------------------------------

    /// Attach (or replace) the schema set consulted before dispatch.
    pub fn set_schemas(&self, schemas: SchemaSet) {
        *self.schemas.borrow_mut() = Some(schemas);
    }

    /// Detach the schema set; subsequent dispatch skips validation.
    pub fn clear_schemas(&self) {
        self.schemas.borrow_mut().take();
    }

    fn check_schema(
        &self,
        direction: Direction,
        event: &str,
        args: &[Value],
    ) -> Result<(), ValidationError> {
        let schemas = self.schemas.borrow();
        let Some(expected) = schemas.as_ref().and_then(|s| s.lookup(direction, event)) else {
            return Ok(());
        };
        self.validator.validate(expected, args).map_err(|source| ValidationError {
            event: event.to_owned(),
            direction,
            source,
        })
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Number of live subscriptions for `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.borrow().count(name)
    }

    /// Event names with at least one live subscription.
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.borrow().names()
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("accept_handlers", &self.accept_handlers.borrow().len())
            .field("channels", &self.listeners.borrow().names().len())
            .field("schemas", &self.schemas.borrow().is_some())
            .finish_non_exhaustive()
    }
}
