// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shoji Reveal: ancestor-chain navigation and reveal planning for drawer trees.
//!
//! This crate holds the pure navigation helpers layered on top of
//! [`shoji_drawer_tree`]: walking a drawer's ancestor chain, deciding whether a
//! scroll-to-target action must first force ancestors open, and computing the
//! scroll offset that brings a target into view once the chain is open.
//!
//! The typical link-following sequence is:
//!
//! 1. Resolve the target key with [`plan_reveal`]. An unknown key is a
//!    data-integrity bug in the content build, so it fails fast with
//!    [`RevealError::TargetNotFound`] instead of degrading silently.
//! 2. Apply the plan with [`force_open`]: the closed ancestors open
//!    outermost-first, each relaying its height up the chain.
//! 3. Wait [`RevealPlan::delay_ms`] (the host reads its CSS max-height
//!    transition duration and passes it in; zero when nothing had to open),
//!    then scroll by [`scroll_offset`].
//!
//! ## Minimal example
//!
//! ```rust
//! use shoji_drawer_tree::{DrawerTree, MemoryStore};
//! use shoji_reveal::{ancestors, has_closed, plan_reveal};
//!
//! let mut tree = DrawerTree::new();
//! let root = tree.insert(None, "nav");
//! let branch = tree.insert(Some(root), "nav.widgets");
//! let leaf = tree.insert(Some(branch), "nav.widgets.button");
//!
//! let measure = |_: &str| Some(40.0);
//! let mut store = MemoryStore::new();
//! tree.render(root, &measure, &mut store);
//!
//! // Nearest ancestor first, root last.
//! assert_eq!(ancestors(&tree, leaf), vec![branch, root]);
//! assert!(has_closed(&tree, &ancestors(&tree, leaf)));
//!
//! // Everything on the way to the leaf is closed, so the plan opens the
//! // chain outermost-first and schedules the scroll after the transition.
//! let plan = plan_reveal(&tree, "nav.widgets.button", 200).unwrap();
//! assert_eq!(plan.open_chain, vec![root, branch]);
//! assert_eq!(plan.delay_ms, 200);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use shoji_drawer_tree::{DrawerId, DrawerState, DrawerTree, OpenStore};
use thiserror::Error;

/// Ancestor chain of `id`: nearest ancestor first, root last.
///
/// Roots and stale ids yield an empty chain. The drawer itself is not
/// included.
#[must_use]
pub fn ancestors(tree: &DrawerTree, id: DrawerId) -> Vec<DrawerId> {
    let mut chain = Vec::new();
    let mut cur = tree.parent_of(id);
    while let Some(parent) = cur {
        chain.push(parent);
        cur = tree.parent_of(parent);
    }
    chain
}

/// Returns `true` iff `chain` is non-empty and at least one drawer in it is
/// closed.
///
/// Used before scrolling to an anchor: a closed drawer anywhere in the chain
/// means the target is not currently visible and the chain must be forced
/// open first.
#[must_use]
pub fn has_closed(tree: &DrawerTree, chain: &[DrawerId]) -> bool {
    !chain.is_empty()
        && chain
            .iter()
            .any(|&id| matches!(tree.state(id), Some(DrawerState::Closed)))
}

/// Error raised when a reveal target cannot be resolved.
///
/// A reference to a drawer that is not in the tree indicates a build-time
/// data bug, not a runtime recoverable condition, so resolution fails fast
/// rather than degrading to a silent no-op.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RevealError {
    /// The requested key does not name a live drawer in the tree.
    #[error("reveal target not found: {key}")]
    TargetNotFound {
        /// The key that failed to resolve.
        key: String,
    },
}

/// Plan for revealing a drawer: which ancestors to open and when to scroll.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealPlan {
    /// The resolved target drawer.
    pub target: DrawerId,
    /// Closed ancestors to open, outermost first.
    pub open_chain: Vec<DrawerId>,
    /// Delay before the secondary scroll-into-view action: the CSS
    /// transition duration when anything must open, zero otherwise.
    pub delay_ms: u64,
}

/// Resolves `key` and plans the reveal.
///
/// `transition_ms` is the host's configured max-height transition duration;
/// it becomes the plan's scroll delay when at least one ancestor has to open,
/// so the scroll lands after the chain has finished expanding.
pub fn plan_reveal(
    tree: &DrawerTree,
    key: &str,
    transition_ms: u64,
) -> Result<RevealPlan, RevealError> {
    let target = tree.id_of(key).ok_or_else(|| RevealError::TargetNotFound {
        key: String::from(key),
    })?;
    let mut open_chain: Vec<DrawerId> = ancestors(tree, target)
        .into_iter()
        .filter(|&id| matches!(tree.state(id), Some(DrawerState::Closed)))
        .collect();
    // Open from the outside in, so each drawer expands into visible space.
    open_chain.reverse();
    let delay_ms = if open_chain.is_empty() {
        0
    } else {
        transition_ms
    };
    Ok(RevealPlan {
        target,
        open_chain,
        delay_ms,
    })
}

/// Applies a plan, opening its chain in order.
///
/// Returns how many drawers actually changed state; drawers another action
/// opened in the meantime are skipped by the tree's own idempotence.
pub fn force_open<S: OpenStore>(tree: &mut DrawerTree, store: &mut S, plan: &RevealPlan) -> usize {
    let mut opened = 0;
    for &id in &plan.open_chain {
        if tree.open(id, store) {
            opened += 1;
        }
    }
    log::debug!("force-opened {opened} drawer(s) on the way to {:?}", plan.target);
    opened
}

/// Vertical alignment for the scroll-into-view action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RevealAlign {
    /// Align the top of the target with the top of the viewport.
    Start,
    /// Center the target within the viewport.
    Center,
    /// Align the bottom of the target with the bottom of the viewport.
    End,
    /// Move just enough to make the target fully visible, preferring the
    /// smallest change from the current scroll offset.
    Nearest,
}

/// Scroll offset that brings `target` into a viewport of height
/// `viewport_extent`.
///
/// `target` is in content coordinates (the same space as the scroll offset);
/// only its vertical span is consulted. `current_offset` is the present
/// scroll position, used by [`RevealAlign::Nearest`] to keep already-visible
/// targets where they are.
#[must_use]
pub fn scroll_offset(
    target: Rect,
    viewport_extent: f64,
    current_offset: f64,
    align: RevealAlign,
) -> f64 {
    let target_start = target.y0;
    let target_end = target.y1;
    match align {
        RevealAlign::Start => target_start,
        RevealAlign::End => (target_end - viewport_extent).max(0.0),
        RevealAlign::Center => {
            ((target_start + target_end) / 2.0 - viewport_extent / 2.0).max(0.0)
        }
        RevealAlign::Nearest => {
            let viewport_start = current_offset;
            let viewport_end = current_offset + viewport_extent;
            if target_start >= viewport_start && target_end <= viewport_end {
                current_offset
            } else if target_start < viewport_start {
                target_start
            } else {
                (target_end - viewport_extent).max(0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use shoji_drawer_tree::MemoryStore;

    use super::*;

    fn rendered_tree() -> (DrawerTree, MemoryStore, DrawerId, DrawerId, DrawerId) {
        let mut tree = DrawerTree::new();
        let root = tree.insert(None, "root");
        let branch = tree.insert(Some(root), "branch");
        let leaf = tree.insert(Some(branch), "leaf");
        let mut store = MemoryStore::new();
        tree.render(root, &|_| Some(40.0), &mut store);
        (tree, store, root, branch, leaf)
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let (tree, _, root, branch, leaf) = rendered_tree();
        assert_eq!(ancestors(&tree, leaf), vec![branch, root]);
        assert_eq!(ancestors(&tree, branch), vec![root]);
        assert!(ancestors(&tree, root).is_empty());
    }

    #[test]
    fn has_closed_requires_a_closed_entry() {
        let (mut tree, mut store, root, branch, leaf) = rendered_tree();
        let chain = ancestors(&tree, leaf);

        // Everything starts closed.
        assert!(has_closed(&tree, &chain));

        tree.open(root, &mut store);
        assert!(has_closed(&tree, &chain), "branch is still closed");

        tree.open(branch, &mut store);
        assert!(!has_closed(&tree, &chain));

        // An empty chain never reads as closed.
        assert!(!has_closed(&tree, &[]));
    }

    #[test]
    fn unknown_target_fails_fast() {
        let (tree, ..) = rendered_tree();
        let err = plan_reveal(&tree, "nope", 200).unwrap_err();
        assert_eq!(
            err,
            RevealError::TargetNotFound {
                key: String::from("nope")
            }
        );
    }

    #[test]
    fn plan_opens_only_closed_ancestors_outermost_first() {
        let (mut tree, mut store, root, branch, leaf) = rendered_tree();

        let plan = plan_reveal(&tree, "leaf", 250).unwrap();
        assert_eq!(plan.target, leaf);
        assert_eq!(plan.open_chain, vec![root, branch]);
        assert_eq!(plan.delay_ms, 250);

        // With the root already open only the branch remains, and an
        // entirely open chain needs no delay at all.
        tree.open(root, &mut store);
        let plan = plan_reveal(&tree, "leaf", 250).unwrap();
        assert_eq!(plan.open_chain, vec![branch]);

        tree.open(branch, &mut store);
        let plan = plan_reveal(&tree, "leaf", 250).unwrap();
        assert!(plan.open_chain.is_empty());
        assert_eq!(plan.delay_ms, 0);
    }

    #[test]
    fn force_open_applies_the_plan_once() {
        let (mut tree, mut store, root, branch, _) = rendered_tree();
        let plan = plan_reveal(&tree, "leaf", 100).unwrap();

        assert_eq!(force_open(&mut tree, &mut store, &plan), 2);
        assert!(tree.state(root).unwrap().is_open());
        assert!(tree.state(branch).unwrap().is_open());
        assert!(store.is_open("root"));
        assert!(store.is_open("branch"));

        // Replaying the same plan changes nothing.
        assert_eq!(force_open(&mut tree, &mut store, &plan), 0);
    }

    #[test]
    fn scroll_alignment_cases() {
        let target = Rect::new(0.0, 300.0, 100.0, 340.0);

        assert_eq!(scroll_offset(target, 200.0, 0.0, RevealAlign::Start), 300.0);
        assert_eq!(scroll_offset(target, 200.0, 0.0, RevealAlign::End), 140.0);
        assert_eq!(
            scroll_offset(target, 200.0, 0.0, RevealAlign::Center),
            220.0
        );

        // Already fully visible: keep the current offset.
        assert_eq!(
            scroll_offset(target, 200.0, 250.0, RevealAlign::Nearest),
            250.0
        );
        // Below the viewport: align the bottom edge.
        assert_eq!(
            scroll_offset(target, 200.0, 0.0, RevealAlign::Nearest),
            140.0
        );
        // Above the viewport: align the top edge.
        assert_eq!(
            scroll_offset(target, 200.0, 500.0, RevealAlign::Nearest),
            300.0
        );
    }

    #[test]
    fn scroll_never_goes_negative_for_short_content() {
        let target = Rect::new(0.0, 10.0, 100.0, 30.0);
        assert_eq!(scroll_offset(target, 200.0, 0.0, RevealAlign::End), 0.0);
        assert_eq!(scroll_offset(target, 200.0, 0.0, RevealAlign::Center), 0.0);
    }
}
