//! Testing utilities for Relay.
//!
//! Spy listeners for asserting on dispatch behavior:
//!
//! - [`RecordingListener`]: records every argument list it receives
//! - [`CountingListener`]: counts invocations
//! - [`EventLog`]: a shared label log for ordering assertions
//! - [`failing_listener`]: a listener that always errors

use crate::listener::{ListenFn, listen_fn};
use relay_core::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records every argument list it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::new();
/// relay.on("reading", recorder.listener())?;
///
/// relay.emit("reading", &args![21.5])?;
/// assert_eq!(recorder.received(), vec![args![21.5]]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingListener {
    received: Rc<RefCell<Vec<Vec<Value>>>>,
}

impl RecordingListener {
    /// Create a new recording listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registerable handle that appends each received argument list.
    ///
    /// Every call allocates a fresh subscription identity sharing the same
    /// buffer.
    pub fn listener(&self) -> ListenFn {
        let received = Rc::clone(&self.received);
        listen_fn(move |_, args| {
            received.borrow_mut().push(args.to_vec());
            Ok(())
        })
    }

    /// Get a clone of the recorded argument lists.
    pub fn received(&self) -> Vec<Vec<Value>> {
        self.received.borrow().clone()
    }

    /// Get the number of recorded deliveries.
    pub fn count(&self) -> usize {
        self.received.borrow().len()
    }

    /// Clear all recorded deliveries.
    pub fn clear(&self) {
        self.received.borrow_mut().clear();
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// A listener that counts invocations.
#[derive(Clone, Default)]
pub struct CountingListener {
    count: Rc<Cell<usize>>,
}

impl CountingListener {
    /// Create a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registerable handle that increments the shared counter.
    pub fn listener(&self) -> ListenFn {
        let count = Rc::clone(&self.count);
        listen_fn(move |_, _| {
            count.set(count.get() + 1);
            Ok(())
        })
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.set(0);
    }
}

// ============================================================================
// Event Log
// ============================================================================

/// A shared label log for ordering assertions across several listeners.
///
/// # Example
///
/// ```rust,ignore
/// let log = EventLog::new();
/// relay.on("first", log.listener("first"))?;
/// relay.on("second", log.listener("second"))?;
/// // ... emit ...
/// assert_eq!(log.entries(), vec!["first", "second"]);
/// ```
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl EventLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registerable handle that appends `label` on every delivery.
    pub fn listener(&self, label: &str) -> ListenFn {
        let entries = Rc::clone(&self.entries);
        let label = label.to_owned();
        listen_fn(move |_, _| {
            entries.borrow_mut().push(label.clone());
            Ok(())
        })
    }

    /// Get a clone of the logged labels, in delivery order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that always fails with the given message.
///
/// Useful for asserting that a listener error aborts the remaining fan-out.
pub fn failing_listener(message: impl Into<String>) -> ListenFn {
    let message = message.into();
    listen_fn(move |_, _| Err(message.clone().into()))
}
