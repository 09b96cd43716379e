// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=shoji_signals --heading-base-level=0

//! Shoji Signals: process-wide signal coordination for drawer trees.
//!
//! ## Overview
//!
//! Drawer components react to a small, fixed set of cross-component signals:
//! window resizes, explicit "reset all heights" commands, and display-option
//! changes. This crate models that coordination as plain data rather than
//! stored closures:
//!
//! - [`Signal`] / [`SignalKind`]: the fixed signal set and its payload-free
//!   discriminants.
//! - [`SignalHub`]: synchronous publish/subscribe with idempotent
//!   subscribe/unsubscribe. Dispatch returns the interested subscribers; the
//!   host delivers to each on the UI thread.
//! - [`Debounce`]: a trailing-edge debounce over caller-supplied timestamps,
//!   used to coalesce resize bursts into a single height reset.
//! - `DrawerGlue` (`tree_adapter` feature, in [`adapters::drawer_tree`]):
//!   the per-drawer binding set — attach subscribes one id to all three
//!   kinds, detach tears everything down idempotently, and delivered signals
//!   map to commands the host applies against a
//!   [`shoji_drawer_tree::DrawerTree`].
//!
//! ## Workflow
//!
//! 1. On mount, `DrawerGlue::attach` each drawer component under its own
//!    [`SubscriberId`].
//! 2. When the host observes a signal source (a resize listener, a toolbar
//!    button, an options panel), it builds the [`Signal`] and asks the hub
//!    to [`SignalHub::dispatch`] it, then feeds the signal to each returned
//!    subscriber's glue.
//! 3. The host drives `DrawerGlue::tick` from its timer/frame loop so the
//!    debounced resize reset fires one quiet window after the last resize.
//! 4. On unmount, `DrawerGlue::detach` — safe to call more than once.
//!
//! A burst of resize signals within the debounce window is guaranteed to
//! produce exactly one height reset, one window after the last event in the
//! burst. Reset commands reaching non-root drawers are silenced by the
//! tree's root-only render guard, so every drawer carries identical
//! bindings.
//!
//! ## Minimal example
//!
//! ```rust
//! use shoji_signals::{Debounce, Signal, SignalHub, SignalKind, SubscriberId};
//!
//! let mut hub = SignalHub::new();
//! let nav = SubscriberId(1);
//! hub.subscribe(nav, SignalKind::Resize);
//!
//! // A resize burst reaches the subscriber three times…
//! let mut debounce = Debounce::new();
//! for now in [0, 30, 60] {
//!     for _ in hub.dispatch(&Signal::Resize) {
//!         debounce.poke(now);
//!     }
//! }
//!
//! // …but collapses into a single trailing fire.
//! assert!(!debounce.fire_due(100));
//! assert!(debounce.fire_due(160));
//! assert!(!debounce.fire_due(200));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
mod debounce;
mod hub;
mod signal;

pub use debounce::{DEFAULT_WINDOW_MS, Debounce};
pub use hub::SignalHub;
pub use signal::{Signal, SignalKind, SubscriberId};
