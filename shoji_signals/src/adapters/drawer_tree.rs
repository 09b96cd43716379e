// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glue binding drawers to process-wide signals.
//!
//! ## Feature
//!
//! Enable with `tree_adapter`.
//!
//! ## Notes
//!
//! Each mounted drawer component owns one [`DrawerGlue`]: a fixed set of
//! subscriptions made at attach time and torn down by a single idempotent
//! detach, so nothing keeps listening after the component disconnects (hub
//! subscriptions, unlike per-element listeners, do not die with the element).
//!
//! The glue never mutates a tree behind the host's back. Signals map to
//! [`GlueCommand`] values the host applies when it is ready, and the host
//! drives [`DrawerGlue::tick`] from its frame or timer loop to flush the
//! debounced resize reset. Reset commands applied to non-root drawers are
//! silenced by the tree's own root-only guard, so every mounted drawer can
//! carry identical bindings without coordinating over who resets.

use alloc::string::String;

use shoji_drawer_tree::{DrawerId, DrawerTree, MeasureFn, OpenStore};

use crate::debounce::Debounce;
use crate::hub::SignalHub;
use crate::signal::{Signal, SignalKind, SubscriberId};

/// Command produced by glue in response to a dispatched signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlueCommand {
    /// Rebuild heights from scratch. Effective on root drawers only; the
    /// tree no-ops it everywhere else.
    ResetHeights,
    /// Forward a display option onto the drawer as a styling attribute.
    SetOption {
        /// Option name.
        key: String,
        /// New option value.
        value: String,
    },
}

/// Fixed per-drawer signal bindings with paired attach/detach.
#[derive(Clone, Debug)]
pub struct DrawerGlue {
    subscriber: SubscriberId,
    drawer: DrawerId,
    debounce: Debounce,
}

impl DrawerGlue {
    const KINDS: [SignalKind; 3] = [
        SignalKind::Resize,
        SignalKind::ResetHeights,
        SignalKind::DisplayOption,
    ];

    /// Subscribes `subscriber` to every drawer-relevant signal kind and
    /// returns the glue tracking them.
    pub fn attach(hub: &mut SignalHub, subscriber: SubscriberId, drawer: DrawerId) -> Self {
        for kind in Self::KINDS {
            hub.subscribe(subscriber, kind);
        }
        log::debug!("attached {subscriber:?} for drawer {drawer:?}");
        Self {
            subscriber,
            drawer,
            debounce: Debounce::new(),
        }
    }

    /// The subscriber id this glue registered under.
    #[must_use]
    pub const fn subscriber(&self) -> SubscriberId {
        self.subscriber
    }

    /// The drawer this glue feeds.
    #[must_use]
    pub const fn drawer(&self) -> DrawerId {
        self.drawer
    }

    /// Removes every subscription registered by [`DrawerGlue::attach`].
    ///
    /// Idempotent: calling it again, or for a glue that never attached to
    /// this hub, is a defined no-op. Call on component disconnect.
    pub fn detach(&self, hub: &mut SignalHub) {
        hub.unsubscribe_all(self.subscriber);
        log::debug!("detached {:?}", self.subscriber);
    }

    /// Reacts to a delivered signal at time `now_ms`.
    ///
    /// Resize signals only arm the debounce and produce nothing immediately;
    /// the coalesced reset surfaces later through [`DrawerGlue::tick`]. The
    /// other kinds map directly to commands.
    pub fn on_signal(&mut self, signal: &Signal, now_ms: u64) -> Option<GlueCommand> {
        match signal {
            Signal::Resize => {
                self.debounce.poke(now_ms);
                None
            }
            Signal::ResetHeights => Some(GlueCommand::ResetHeights),
            Signal::DisplayOption { key, value } => Some(GlueCommand::SetOption {
                key: key.clone(),
                value: value.clone(),
            }),
        }
    }

    /// Drives the debounce; returns the pending reset once the quiet window
    /// after the last resize has elapsed.
    pub fn tick(&mut self, now_ms: u64) -> Option<GlueCommand> {
        self.debounce
            .fire_due(now_ms)
            .then_some(GlueCommand::ResetHeights)
    }

    /// Applies a command against the tree.
    pub fn apply<S: OpenStore>(
        &self,
        command: &GlueCommand,
        tree: &mut DrawerTree,
        measure: MeasureFn<'_>,
        store: &mut S,
    ) {
        match command {
            GlueCommand::ResetHeights => tree.reset_heights(self.drawer, measure, store),
            GlueCommand::SetOption { key, value } => tree.set_option(self.drawer, key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use shoji_drawer_tree::{DrawerState, MemoryStore};

    use super::*;

    fn rendered_tree() -> (DrawerTree, MemoryStore, DrawerId, DrawerId) {
        let mut tree = DrawerTree::new();
        let root = tree.insert(None, "root");
        let child = tree.insert(Some(root), "child");
        let mut store = MemoryStore::new();
        tree.render(root, &measure, &mut store);
        (tree, store, root, child)
    }

    fn measure(key: &str) -> Option<f64> {
        match key {
            "root" => Some(20.0),
            "child" => Some(60.0),
            _ => None,
        }
    }

    #[test]
    fn attach_registers_all_kinds_and_detach_is_idempotent() {
        let mut hub = SignalHub::new();
        let (tree, ..) = rendered_tree();
        let root = tree.id_of("root").unwrap();

        let glue = DrawerGlue::attach(&mut hub, SubscriberId(7), root);
        for kind in [
            SignalKind::Resize,
            SignalKind::ResetHeights,
            SignalKind::DisplayOption,
        ] {
            assert!(hub.is_subscribed(glue.subscriber(), kind));
        }

        glue.detach(&mut hub);
        glue.detach(&mut hub);
        assert_eq!(hub.subscriber_count(SignalKind::Resize), 0);
    }

    #[test]
    fn resize_burst_yields_one_reset() {
        let mut hub = SignalHub::new();
        let (mut tree, mut store, root, child) = rendered_tree();
        let mut glue = DrawerGlue::attach(&mut hub, SubscriberId(1), root);
        tree.open(child, &mut store);

        // Three resizes inside the window arm the debounce without any
        // immediate command.
        for now in [1_000, 1_040, 1_080] {
            for _ in hub.dispatch(&Signal::Resize) {
                assert_eq!(glue.on_signal(&Signal::Resize, now), None);
            }
        }
        assert_eq!(glue.tick(1_100), None);

        // One window after the last event the reset fires, once.
        let command = glue.tick(1_180).expect("debounce should fire");
        assert_eq!(command, GlueCommand::ResetHeights);
        assert_eq!(glue.tick(1_200), None);

        // Applying it rebuilds heights from the persisted open state.
        glue.apply(&command, &mut tree, &measure, &mut store);
        assert_eq!(tree.state(child), Some(DrawerState::Open));
        assert_eq!(tree.effective_max_height(root), Some(80.0));
    }

    #[test]
    fn explicit_reset_applies_immediately() {
        let mut hub = SignalHub::new();
        let (mut tree, mut store, root, child) = rendered_tree();
        let mut glue = DrawerGlue::attach(&mut hub, SubscriberId(1), root);
        tree.open(child, &mut store);

        for subscriber in hub.dispatch(&Signal::ResetHeights) {
            assert_eq!(subscriber, glue.subscriber());
            let command = glue.on_signal(&Signal::ResetHeights, 0).unwrap();
            glue.apply(&command, &mut tree, &measure, &mut store);
        }
        assert_eq!(tree.effective_max_height(root), Some(80.0));
    }

    #[test]
    fn reset_against_a_non_root_drawer_is_silenced() {
        let mut hub = SignalHub::new();
        let (mut tree, mut store, root, child) = rendered_tree();
        let mut glue = DrawerGlue::attach(&mut hub, SubscriberId(2), child);
        tree.open(child, &mut store);

        let command = glue.on_signal(&Signal::ResetHeights, 0).unwrap();
        glue.apply(&command, &mut tree, &measure, &mut store);

        // The tree's root-only guard swallowed the reset: nothing moved.
        assert_eq!(tree.data_height(child), Some(60.0));
        assert_eq!(tree.extra_height(root), Some(60.0));
        assert_eq!(tree.state(child), Some(DrawerState::Open));
    }

    #[test]
    fn display_options_are_forwarded_as_attributes() {
        let mut hub = SignalHub::new();
        let (mut tree, mut store, root, _) = rendered_tree();
        let mut glue = DrawerGlue::attach(&mut hub, SubscriberId(3), root);

        let signal = Signal::DisplayOption {
            key: String::from("private"),
            value: String::from("show"),
        };
        for _ in hub.dispatch(&signal) {
            let command = glue.on_signal(&signal, 0).unwrap();
            glue.apply(&command, &mut tree, &measure, &mut store);
        }

        assert_eq!(tree.option(root, "private"), Some("show"));
        // Forwarding an option never touches the height machinery.
        assert_eq!(tree.effective_max_height(root), Some(20.0));
    }
}
