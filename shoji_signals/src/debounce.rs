// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce over caller-supplied timestamps.

/// Default quiescence window in milliseconds.
pub const DEFAULT_WINDOW_MS: u64 = 100;

/// Trailing-edge debounce state machine.
///
/// The type owns no clock: callers pass event timestamps in milliseconds,
/// measured however the host measures time. Each [`Debounce::poke`] within
/// the window re-arms a single deadline at `now + window` — classic debounce,
/// not throttle — so a burst of qualifying events produces exactly one
/// [`Debounce::fire_due`] hit, one window after the last event in the burst.
/// Intermediate states during the burst are deliberately left uncorrected
/// until the trailing fire.
///
/// The pending deadline is the only cancellable unit in the system; arriving
/// events cancel and re-arm it implicitly, and [`Debounce::cancel`] disarms
/// it outright.
///
/// ```rust
/// use shoji_signals::Debounce;
///
/// let mut debounce = Debounce::new(); // 100 ms window
///
/// // A burst of resize events…
/// debounce.poke(1_000);
/// debounce.poke(1_030);
/// debounce.poke(1_060);
///
/// // …does nothing until the window after the *last* event has elapsed…
/// assert!(!debounce.fire_due(1_100));
/// assert!(debounce.fire_due(1_160));
///
/// // …and fires exactly once.
/// assert!(!debounce.fire_due(1_200));
/// ```
#[derive(Clone, Debug)]
pub struct Debounce {
    window_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Creates a debounce with the default window of
    /// [`DEFAULT_WINDOW_MS`] milliseconds.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW_MS)
    }

    /// Creates a debounce with a custom quiescence window.
    #[must_use]
    pub const fn with_window(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline: None,
        }
    }

    /// The configured quiescence window in milliseconds.
    #[must_use]
    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Records a qualifying event at `now_ms`, arming (or re-arming) the
    /// deadline at `now_ms + window`.
    pub fn poke(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(self.window_ms));
    }

    /// Returns `true` exactly once per armed burst, when `now_ms` has reached
    /// the deadline. Disarms on fire.
    pub fn fire_due(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` while a deadline is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarms any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_coalesces_to_one_fire() {
        let mut debounce = Debounce::new();
        debounce.poke(0);
        debounce.poke(30);
        debounce.poke(60);

        // The window slides to the last poke.
        assert!(!debounce.fire_due(100));
        assert!(!debounce.fire_due(159));
        assert!(debounce.fire_due(160));

        // Exactly once.
        assert!(!debounce.fire_due(161));
        assert!(!debounce.is_armed());
    }

    #[test]
    fn unarmed_never_fires() {
        let mut debounce = Debounce::new();
        assert!(!debounce.fire_due(1_000_000));
    }

    #[test]
    fn rearms_after_firing() {
        let mut debounce = Debounce::with_window(50);
        debounce.poke(0);
        assert!(debounce.fire_due(50));

        debounce.poke(200);
        assert!(debounce.is_armed());
        assert!(!debounce.fire_due(249));
        assert!(debounce.fire_due(250));
    }

    #[test]
    fn cancel_disarms() {
        let mut debounce = Debounce::new();
        debounce.poke(0);
        debounce.cancel();
        assert!(!debounce.is_armed());
        assert!(!debounce.fire_due(1_000));
    }

    #[test]
    fn zero_window_fires_on_the_same_tick() {
        let mut debounce = Debounce::with_window(0);
        debounce.poke(10);
        assert!(debounce.fire_due(10));
    }
}
