// SPDX-License-Identifier: MPL-2.0
//! Long-press duration domain type.
//!
//! This module provides a type-safe wrapper for the time a pointer must stay
//! down on a toast before it counts as a long press.

use super::defaults::{DEFAULT_LONG_PRESS_MS, MAX_LONG_PRESS_MS, MIN_LONG_PRESS_MS};
use std::time::Duration;

/// Long-press duration in milliseconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (100–3000 ms).
///
/// # Example
///
/// ```
/// use toaster::config::LongPressDuration;
///
/// let duration = LongPressDuration::new(700);
/// assert_eq!(duration.value(), 700);
///
/// // Values outside range are clamped
/// let too_short = LongPressDuration::new(5);
/// assert_eq!(too_short.value(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongPressDuration(u64);

impl LongPressDuration {
    /// Creates a new long-press duration, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_LONG_PRESS_MS, MAX_LONG_PRESS_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for LongPressDuration {
    fn default() -> Self {
        Self(DEFAULT_LONG_PRESS_MS)
    }
}
