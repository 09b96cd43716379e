// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Shoji crates.
//!
//! Each adapter is gated behind a feature flag to keep the core hub and
//! debounce lightweight and dependency-free.
//!
//! ## Available Adapters
//!
//! - [`drawer_tree`] (`tree_adapter` feature): per-drawer glue binding
//!   [`shoji_drawer_tree`] trees to dispatched signals — debounced resize
//!   resets, explicit height resets, and display-option forwarding.

#[cfg(feature = "tree_adapter")]
pub mod drawer_tree;
