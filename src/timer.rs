// SPDX-License-Identifier: MPL-2.0
//! Timer service used for auto-dismiss, long press and debouncing.
//!
//! Timers are single-shot. The toaster picks the [`TimerToken`] itself and
//! the service only has to report it back through
//! [`Message::TimerFired`](crate::Message::TimerFired) once the delay has
//! elapsed, unless it was cancelled first.

use std::collections::BTreeSet;
use std::time::Duration;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Schedules and cancels single-shot timers.
pub trait TimerService {
    /// Arms a timer that reports `token` after `delay`.
    fn schedule(&mut self, token: TimerToken, delay: Duration);

    /// Disarms `token`. Cancelling an unknown or fired token is a no-op.
    fn cancel(&mut self, token: TimerToken);
}

/// Virtual-clock timer service.
///
/// Time only moves when [`ManualTimer::advance`] is called, which makes it
/// suitable for hosts with their own frame loop and for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    // Ordered by deadline, then token.
    pending: BTreeSet<(Duration, TimerToken)>,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward and returns due tokens, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerToken> {
        self.now += by;
        let still_pending = self.pending.split_off(&(self.now, TimerToken(u64::MAX)));
        let due = std::mem::replace(&mut self.pending, still_pending);
        due.into_iter().map(|(_, token)| token).collect()
    }

    #[must_use]
    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|(_, t)| *t == token)
    }

    /// Number of armed timers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of `token` relative to creation, if armed.
    #[must_use]
    pub fn deadline(&self, token: TimerToken) -> Option<Duration> {
        self.pending
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(deadline, _)| *deadline)
    }
}

impl TimerService for ManualTimer {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.cancel(token);
        self.pending.insert((self.now + delay, token));
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|(_, t)| *t != token);
    }
}

/// Cancel-and-rearm helper: only the last poke within the quiet period fires.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<TimerToken>,
}

impl Debouncer {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Cancels the previous timer, if any, and arms `token`.
    pub fn poke(&mut self, timers: &mut impl TimerService, token: TimerToken) {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        timers.schedule(token, self.quiet);
        self.pending = Some(token);
    }

    /// Returns true and disarms if `token` is the live debounce timer.
    pub fn take_if_current(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &mut impl TimerService) {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
