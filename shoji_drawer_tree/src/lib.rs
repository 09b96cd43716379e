// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=shoji_drawer_tree --heading-base-level=0

//! Shoji Drawer Tree: a tree of collapsible panels with incremental height propagation.
//!
//! Shoji Drawer Tree is a reusable building block for documentation viewers, inspectors,
//! and any UI built from nested expand/collapse panels.
//!
//! - Represents a hierarchy of drawers with open/closed state, per-drawer content heights,
//!   and an extra-height accumulator fed by descendants.
//! - Keeps every ancestor's effective max-height correct as descendants open and close,
//!   with an O(depth) delta relay instead of O(subtree) recomputation.
//! - Re-associates drawers to externally persisted open/closed state by stable key, so
//!   a rebuilt tree renders pre-opened without user interaction.
//!
//! ## Where this fits
//!
//! This crate owns the height model and the open/closed state machine, nothing else.
//! The host framework owns the actual containers, classes, and styles:
//!
//! - It measures content (the measure probe passed to [`DrawerTree::render`]).
//! - It wires each drawer's trigger click to [`DrawerTree::toggle`].
//! - It styles `max-height` from [`DrawerTree::effective_max_height`] and flips
//!   open/closed classes from [`DrawerTree::state`].
//! - It enables CSS transitions for the drawers returned by [`DrawerTree::commit`],
//!   one tick after the initial render, so first paint never animates.
//!
//! A closed drawer keeps accumulating descendant height deltas in its stored
//! max-height even though it visually collapses through its closed class. This
//! stored-versus-rendered split is deliberate: it pre-accounts for the subtree so
//! reopening an intermediate drawer is a single O(depth) relay, with
//! [`DrawerTree::reset_heights`] as the full-recomputation escape hatch after
//! content actually changes.
//!
//! ## API overview
//!
//! - [`DrawerTree`]: the arena owning all drawers of one tree.
//! - [`DrawerId`]: generational handle of a drawer.
//! - [`DrawerState`] / [`DrawerFlags`]: open/closed state and content/render flags.
//! - [`OpenStore`] / [`MemoryStore`]: persisted open-state seam and its in-memory
//!   reference implementation.
//! - [`MeasureFn`]: host probe resolving a drawer key to its measured content height.
//!
//! Key operations:
//! - [`DrawerTree::insert`] / [`DrawerTree::remove`] build and tear down the tree.
//! - [`DrawerTree::render`] → top-down initializing pass, root-only.
//! - [`DrawerTree::commit`] → promotes render-pending drawers, the transition cue.
//! - [`DrawerTree::open`] / [`DrawerTree::close`] / [`DrawerTree::toggle`] → the user-facing
//!   state machine; each relays the drawer's own height along the ancestor chain.
//! - [`DrawerTree::reset_heights`] → zero and rebuild after content/layout changes.
//! - [`DrawerTree::set_option`] → display-option attributes for the host's CSS layer.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod store;
mod tree;
mod types;

pub use store::{MemoryStore, OpenStore};
pub use tree::{DrawerTree, MeasureFn};
pub use types::{DrawerFlags, DrawerId, DrawerState};
