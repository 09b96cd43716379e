// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous publish/subscribe hub with idempotent registration.

use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::signal::{Signal, SignalKind, SubscriberId};

/// Synchronous signal hub.
///
/// Subscriptions are `(subscriber, kind)` pairs and registration is
/// idempotent in both directions: subscribing twice keeps a single entry, and
/// unsubscribing something that was never subscribed is a defined no-op.
/// Components may therefore attach and detach defensively without tracking
/// whether they already did.
///
/// Dispatch is synchronous and single-threaded: [`SignalHub::dispatch`]
/// returns the subscribers interested in the signal, in subscription order,
/// and the host delivers to each in turn on the UI thread. The hub never
/// stores handlers — per-subscriber behavior lives in the glue layer (see the
/// `tree_adapter` feature), which keeps subscription state plain data.
///
/// ```rust
/// use shoji_signals::{Signal, SignalHub, SignalKind, SubscriberId};
///
/// let mut hub = SignalHub::new();
/// let nav = SubscriberId(1);
///
/// hub.subscribe(nav, SignalKind::ResetHeights);
/// hub.subscribe(nav, SignalKind::ResetHeights); // idempotent
/// assert_eq!(hub.dispatch(&Signal::ResetHeights), vec![nav]);
///
/// hub.unsubscribe_all(nav);
/// hub.unsubscribe_all(nav); // also idempotent
/// assert!(hub.dispatch(&Signal::ResetHeights).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SignalHub {
    subs: HashMap<SignalKind, Vec<SubscriberId>>,
}

impl SignalHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subs: HashMap::new(),
        }
    }

    /// Registers `subscriber` for `kind`. Subscribing twice keeps one entry.
    pub fn subscribe(&mut self, subscriber: SubscriberId, kind: SignalKind) {
        let subs = self.subs.entry(kind).or_default();
        if !subs.contains(&subscriber) {
            subs.push(subscriber);
        }
    }

    /// Removes `subscriber` from `kind`. A no-op if it was never subscribed.
    pub fn unsubscribe(&mut self, subscriber: SubscriberId, kind: SignalKind) {
        if let Some(subs) = self.subs.get_mut(&kind) {
            subs.retain(|s| *s != subscriber);
        }
    }

    /// Removes every subscription held by `subscriber`.
    pub fn unsubscribe_all(&mut self, subscriber: SubscriberId) {
        for subs in self.subs.values_mut() {
            subs.retain(|s| *s != subscriber);
        }
    }

    /// Returns `true` if `subscriber` is registered for `kind`.
    #[must_use]
    pub fn is_subscribed(&self, subscriber: SubscriberId, kind: SignalKind) -> bool {
        self.subs
            .get(&kind)
            .is_some_and(|subs| subs.contains(&subscriber))
    }

    /// Number of subscribers registered for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: SignalKind) -> usize {
        self.subs.get(&kind).map_or(0, Vec::len)
    }

    /// Returns the subscribers interested in `signal`, in subscription order.
    ///
    /// The hub does not execute anything itself; the host walks the returned
    /// list and hands the signal to each subscriber's glue.
    #[must_use]
    pub fn dispatch(&self, signal: &Signal) -> Vec<SubscriberId> {
        self.subs
            .get(&signal.kind())
            .map(Vec::clone)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn subscribe_is_idempotent() {
        let mut hub = SignalHub::new();
        let a = SubscriberId(1);
        hub.subscribe(a, SignalKind::Resize);
        hub.subscribe(a, SignalKind::Resize);
        assert_eq!(hub.subscriber_count(SignalKind::Resize), 1);
        assert!(hub.is_subscribed(a, SignalKind::Resize));
    }

    #[test]
    fn unsubscribe_without_subscribe_is_fine() {
        let mut hub = SignalHub::new();
        let a = SubscriberId(1);
        hub.unsubscribe(a, SignalKind::Resize);
        hub.unsubscribe_all(a);
        assert_eq!(hub.subscriber_count(SignalKind::Resize), 0);
    }

    #[test]
    fn dispatch_targets_only_the_matching_kind() {
        let mut hub = SignalHub::new();
        let a = SubscriberId(1);
        let b = SubscriberId(2);
        hub.subscribe(a, SignalKind::Resize);
        hub.subscribe(b, SignalKind::Resize);
        hub.subscribe(b, SignalKind::DisplayOption);

        assert_eq!(hub.dispatch(&Signal::Resize), vec![a, b]);
        assert_eq!(
            hub.dispatch(&Signal::DisplayOption {
                key: "private".into(),
                value: "show".into(),
            }),
            vec![b]
        );
        assert!(hub.dispatch(&Signal::ResetHeights).is_empty());
    }

    #[test]
    fn unsubscribe_all_clears_every_kind() {
        let mut hub = SignalHub::new();
        let a = SubscriberId(1);
        hub.subscribe(a, SignalKind::Resize);
        hub.subscribe(a, SignalKind::ResetHeights);
        hub.subscribe(a, SignalKind::DisplayOption);

        hub.unsubscribe_all(a);
        for kind in [
            SignalKind::Resize,
            SignalKind::ResetHeights,
            SignalKind::DisplayOption,
        ] {
            assert!(!hub.is_subscribed(a, kind));
        }
    }

    #[test]
    fn dispatch_preserves_subscription_order() {
        let mut hub = SignalHub::new();
        let ids = [SubscriberId(3), SubscriberId(1), SubscriberId(2)];
        for id in ids {
            hub.subscribe(id, SignalKind::ResetHeights);
        }
        assert_eq!(hub.dispatch(&Signal::ResetHeights), ids.to_vec());
    }
}
