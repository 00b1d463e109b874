//! Listener registry with counted subscriptions.
//!
//! One ordered subscription sequence per event name; insertion order is
//! invocation order. A key whose sequence empties is removed entirely, so the
//! registry never holds an event name with zero subscriptions.

use crate::listener::ListenFn;
use relay_core::RegistryError;
use std::collections::HashMap;
use std::rc::Rc;

/// Remaining invocation budget of a subscription.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Remaining {
    /// Never expires.
    Unlimited,
    /// Fires on the next `n` matching emissions, then self-removes.
    Left(u64),
}

/// A registered listener plus its remaining invocation budget.
pub(crate) struct Subscription {
    id: u64,
    handler: ListenFn,
    remaining: Remaining,
}

/// Ordered, counted subscriptions keyed by event name.
///
/// Subscription ids are monotonic per registry; the dispatcher snapshots
/// `(id, handler)` pairs before a fan-out pass and checks liveness against
/// this registry before each invocation, so mutation from inside a firing
/// listener never corrupts an in-progress pass.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    channels: HashMap<String, Vec<Subscription>>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Append a subscription to the tail of `event`'s sequence, creating the
    /// sequence if absent. Returns the subscription id.
    pub fn subscribe(&mut self, event: &str, handler: ListenFn, remaining: Remaining) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.channels
            .entry(event.to_owned())
            .or_default()
            .push(Subscription { id, handler, remaining });
        id
    }

    /// Snapshot of the live `(id, handler)` pairs for one channel, in
    /// registration order.
    pub fn snapshot(&self, event: &str) -> Vec<(u64, ListenFn)> {
        self.channels
            .get(event)
            .map(|subs| subs.iter().map(|s| (s.id, Rc::clone(&s.handler))).collect())
            .unwrap_or_default()
    }

    /// Whether the subscription is still registered under `event`.
    pub fn is_live(&self, event: &str, id: u64) -> bool {
        self.channels
            .get(event)
            .is_some_and(|subs| subs.iter().any(|s| s.id == id))
    }

    /// Post-invocation bookkeeping: decrement a counted subscription and
    /// prune it (and an emptied channel) on exhaustion. A subscription the
    /// listener already removed is left alone.
    pub fn record_delivery(&mut self, event: &str, id: u64) {
        let Some(subs) = self.channels.get_mut(event) else {
            return;
        };
        if let Some(pos) = subs.iter().position(|s| s.id == id) {
            match subs[pos].remaining {
                Remaining::Unlimited => {}
                Remaining::Left(1) => {
                    subs.remove(pos);
                }
                Remaining::Left(n) => subs[pos].remaining = Remaining::Left(n - 1),
            }
        }
        if subs.is_empty() {
            self.channels.remove(event);
        }
    }

    /// Remove every subscription for `event` whose handler is the same
    /// reference as `handler`. Returns the count removed.
    pub fn remove_matching(&mut self, event: &str, handler: &ListenFn) -> Result<usize, RegistryError> {
        let subs = self
            .channels
            .get_mut(event)
            .ok_or_else(|| RegistryError::Unregistered(event.to_owned()))?;
        let before = subs.len();
        subs.retain(|s| !Rc::ptr_eq(&s.handler, handler));
        let removed = before - subs.len();
        if removed == 0 {
            return Err(RegistryError::NoSuchHandler(event.to_owned()));
        }
        if subs.is_empty() {
            self.channels.remove(event);
        }
        Ok(removed)
    }

    /// Remove every subscription for `event`. Returns the count removed.
    pub fn remove_all(&mut self, event: &str) -> Result<usize, RegistryError> {
        match self.channels.remove(event) {
            Some(subs) => Ok(subs.len()),
            None => Err(RegistryError::Unregistered(event.to_owned())),
        }
    }

    /// Number of live subscriptions for `event`.
    pub fn count(&self, event: &str) -> usize {
        self.channels.get(event).map_or(0, Vec::len)
    }

    /// Event names with at least one live subscription.
    pub fn names(&self) -> Vec<String> {
        self.channels.keys().cloned().collect()
    }

    /// Discard every subscription.
    pub fn clear(&mut self) {
        self.channels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::listen_fn;

    fn noop() -> ListenFn {
        listen_fn(|_, _| Ok(()))
    }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        let mut registry = ListenerRegistry::default();
        let first = registry.subscribe("e", noop(), Remaining::Unlimited);
        let second = registry.subscribe("e", noop(), Remaining::Unlimited);

        let ids: Vec<u64> = registry.snapshot("e").into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_record_delivery_counts_down_and_prunes() {
        let mut registry = ListenerRegistry::default();
        let id = registry.subscribe("e", noop(), Remaining::Left(2));

        registry.record_delivery("e", id);
        assert!(registry.is_live("e", id));

        registry.record_delivery("e", id);
        assert!(!registry.is_live("e", id));
        // The emptied channel key is gone, not left behind with zero entries.
        assert!(registry.remove_all("e").is_err());
    }

    #[test]
    fn test_unlimited_never_expires() {
        let mut registry = ListenerRegistry::default();
        let id = registry.subscribe("e", noop(), Remaining::Unlimited);
        for _ in 0..10 {
            registry.record_delivery("e", id);
        }
        assert!(registry.is_live("e", id));
    }

    #[test]
    fn test_remove_matching_is_by_identity() {
        let mut registry = ListenerRegistry::default();
        let shared = noop();
        registry.subscribe("e", Rc::clone(&shared), Remaining::Unlimited);
        registry.subscribe("e", noop(), Remaining::Unlimited);
        registry.subscribe("e", Rc::clone(&shared), Remaining::Left(1));

        assert_eq!(registry.remove_matching("e", &shared).unwrap(), 2);
        assert_eq!(registry.count("e"), 1);

        // The surviving subscription has a different identity.
        assert!(matches!(
            registry.remove_matching("e", &shared),
            Err(RegistryError::NoSuchHandler(_))
        ));
    }

    #[test]
    fn test_remove_matching_unknown_event() {
        let mut registry = ListenerRegistry::default();
        assert!(matches!(
            registry.remove_matching("ghost", &noop()),
            Err(RegistryError::Unregistered(_))
        ));
    }
}
