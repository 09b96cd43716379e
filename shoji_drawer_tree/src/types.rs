// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the drawer tree: node identifiers, state, and flags.

/// Identifier for a drawer in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DrawerId(pub(crate) u32, pub(crate) u32);

impl DrawerId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Open/closed state of a drawer.
///
/// `Closed` is the construction default. The persisted store keeps only the
/// set of open keys, so absence of a key means closed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DrawerState {
    /// The drawer is expanded and its content participates in ancestor heights.
    Open,
    /// The drawer is collapsed. Descendant height deltas still accumulate in
    /// its extra-height slot; only the visual presentation collapses.
    Closed,
}

impl DrawerState {
    /// Returns `true` for [`DrawerState::Open`].
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

bitflags::bitflags! {
    /// Drawer flags controlling content and transition gating.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DrawerFlags: u8 {
        /// The content container is non-empty. A drawer without content can
        /// never open; open/close calls on it are no-ops.
        const HAS_CONTENT    = 0b0000_0001;
        /// A render pass visited this drawer; promoted to `RENDERED` by
        /// [`crate::DrawerTree::commit`].
        const RENDER_PENDING = 0b0000_0010;
        /// The initial state is settled and hosts may enable CSS transitions.
        const RENDERED       = 0b0000_0100;
    }
}
