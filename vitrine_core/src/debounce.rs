// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce as an explicit cancellable task.
//!
//! [`Debouncer::trigger`] hands out a [`DebounceTicket`] describing the timer
//! the host should arm and, if one is still pending, which earlier timer to
//! cancel. Only the newest ticket's token fires: a stale timer that slipped
//! past cancellation is rejected by [`Debouncer::fire`].
//!
//! Hosts without timers (the simulated page) can instead call
//! [`Debouncer::poll`] with the current time.

use crate::time::{Duration, HostTime};

/// Identifies one scheduled execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DebounceToken(pub u64);

/// The timer a host should arm after a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTicket {
    /// Token to pass back to [`Debouncer::fire`].
    pub token: DebounceToken,
    /// When the execution is due.
    pub due: HostTime,
    /// Delay until `due`, for `setTimeout`-style APIs.
    pub wait: Duration,
    /// Previously pending execution that this trigger cancels.
    pub cancels: Option<DebounceToken>,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    token: DebounceToken,
    due: HostTime,
}

/// Delays execution until `wait` has passed since the last trigger.
#[derive(Clone, Debug)]
pub struct Debouncer {
    wait: Duration,
    pending: Option<Pending>,
    next_token: u64,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet window.
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
            next_token: 0,
        }
    }

    /// The quiet window.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Records a trigger at `now`, cancelling any pending execution.
    pub fn trigger(&mut self, now: HostTime) -> DebounceTicket {
        let token = DebounceToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        let due = now.saturating_add(self.wait);
        let cancels = self.pending.replace(Pending { token, due }).map(|p| p.token);
        DebounceTicket {
            token,
            due,
            wait: self.wait,
            cancels,
        }
    }

    /// A timer armed for `token` went off.
    ///
    /// Returns `true` if this is the pending execution and it should run now.
    pub fn fire(&mut self, token: DebounceToken) -> bool {
        match self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Takes the pending execution if it is due at `now`, returning its
    /// token.
    pub fn poll(&mut self, now: HostTime) -> Option<DebounceToken> {
        match self.pending {
            Some(p) if p.due <= now => {
                self.pending = None;
                Some(p.token)
            }
            _ => None,
        }
    }

    /// Drops any pending execution, returning its token.
    pub fn cancel(&mut self) -> Option<DebounceToken> {
        self.pending.take().map(|p| p.token)
    }

    /// When the pending execution is due, if any.
    #[must_use]
    pub fn pending_due(&self) -> Option<HostTime> {
        self.pending.map(|p| p.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(250);

    fn ms(v: u64) -> HostTime {
        HostTime(v * 1000)
    }

    #[test]
    fn burst_collapses_to_one_execution() {
        let mut d = Debouncer::new(QUIET);
        let mut fired = 0;
        let mut last = None;
        for i in 0..10 {
            let ticket = d.trigger(ms(i * 50));
            assert_eq!(ticket.cancels.is_some(), i > 0, "every retrigger cancels");
            last = Some(ticket);
        }
        // Walk the clock in 10ms steps up to well past the window.
        for t in (450..=1000).step_by(10) {
            if d.poll(ms(t)).is_some() {
                fired += 1;
                assert_eq!(t, 700, "runs 250ms after the last trigger at 450ms");
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(last.map(|t| t.due), Some(ms(700)));
    }

    #[test]
    fn stale_tokens_do_not_fire() {
        let mut d = Debouncer::new(QUIET);
        let first = d.trigger(ms(0));
        let second = d.trigger(ms(100));
        assert_eq!(second.cancels, Some(first.token));
        assert!(!d.fire(first.token), "cancelled timer must not run");
        assert!(d.fire(second.token));
        assert!(!d.fire(second.token), "runs at most once");
    }

    #[test]
    fn separate_bursts_each_fire() {
        let mut d = Debouncer::new(QUIET);
        let a = d.trigger(ms(0));
        assert!(d.fire(a.token));
        let b = d.trigger(ms(1000));
        assert_eq!(b.cancels, None, "nothing pending after the first ran");
        assert!(d.fire(b.token));
    }

    #[test]
    fn cancel_clears_pending() {
        let mut d = Debouncer::new(QUIET);
        let t = d.trigger(ms(0));
        assert_eq!(d.pending_due(), Some(ms(250)));
        assert_eq!(d.cancel(), Some(t.token));
        assert_eq!(d.poll(ms(10_000)), None);
    }
}
