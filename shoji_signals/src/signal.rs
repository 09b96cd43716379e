// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signal kinds and payloads.

use alloc::string::String;

/// A process-wide signal relevant to drawer coordination.
///
/// The set is a fixed enum on purpose: subscribers register against the
/// payload-free [`SignalKind`] discriminants and receive payloads at dispatch
/// time, so there is never a handler closing over state that does not exist
/// yet when the subscription is made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// The hosting window resized. Coalesced through a debounce window
    /// before any height reset happens.
    Resize,
    /// Explicit command to rebuild all drawer heights, for example after the
    /// user hit an expand-all/collapse-all control.
    ResetHeights,
    /// A display option changed ("show private members" and friends);
    /// forwarded onto drawers as a styling attribute.
    DisplayOption {
        /// Option name.
        key: String,
        /// New option value.
        value: String,
    },
}

impl Signal {
    /// The payload-free discriminant used for subscriptions.
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        match self {
            Self::Resize => SignalKind::Resize,
            Self::ResetHeights => SignalKind::ResetHeights,
            Self::DisplayOption { .. } => SignalKind::DisplayOption,
        }
    }
}

/// Discriminant of [`Signal`]: what subscribers register interest in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// See [`Signal::Resize`].
    Resize,
    /// See [`Signal::ResetHeights`].
    ResetHeights,
    /// See [`Signal::DisplayOption`].
    DisplayOption,
}

/// Identifier for a signal subscriber, assigned by the host.
///
/// Hosts typically hand out one id per mounted component and reuse it across
/// that component's subscriptions so a single `unsubscribe_all` tears
/// everything down on disconnect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);
