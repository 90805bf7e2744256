// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Dismiss**: Auto-dismiss delay and bounds
//! - **Geometry**: Toast height and resting offsets
//! - **Motion**: Spring, exit and decay profiles
//! - **Gesture**: Drag resistance, release tolerance, long press

// ==========================================================================
// Dismiss Defaults
// ==========================================================================

/// Default auto-dismiss delay (in milliseconds).
pub const DEFAULT_DELAY_MS: u64 = 5000;

/// Maximum accepted auto-dismiss delay (in milliseconds).
pub const MAX_DELAY_MS: u64 = 60_000;

/// Toasts auto-dismiss unless told otherwise.
pub const DEFAULT_AUTO_DISMISS: bool = true;

// ==========================================================================
// Geometry Defaults
// ==========================================================================

/// Height of a toast in pixels.
pub const TOAST_HEIGHT: f32 = 75.0;

/// Resting offset while hidden: one toast height above the top edge.
pub const HIDDEN_OFFSET: f32 = -TOAST_HEIGHT;

/// Offset of the top edge of the screen.
pub const TOP_OF_SCREEN: f32 = 0.0;

/// Default on-screen resting offset (65 pixels from the top edge).
pub const DEFAULT_TOP_OFFSET: f32 = 65.0;

/// Opacity while hidden.
pub const HIDDEN_OPACITY: f32 = 0.0;

/// Opacity when the toast's top edge sits at the top of the screen.
pub const TOP_OF_SCREEN_OPACITY: f32 = 0.3;

/// Opacity at the resting offset.
pub const VISIBLE_OPACITY: f32 = 1.0;

// ==========================================================================
// Motion Defaults
// ==========================================================================

/// Spring damping used for the entry and snap-back animations.
pub const SPRING_DAMPING: f32 = 13.0;

/// Spring stiffness used for the entry and snap-back animations.
pub const SPRING_STIFFNESS: f32 = 110.0;

/// Duration of the timed exit animation (in milliseconds).
pub const EXIT_DURATION_MS: u64 = 500;

/// Overshoot of the "back" easing applied to the exit animation.
pub const EXIT_EASING_OVERSHOOT: f32 = 1.3;

/// Quiet period after the last fling sample before the off-screen check runs
/// (in milliseconds).
pub const FLING_DEBOUNCE_MS: u64 = 75;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Exponent applied to downward drag displacement.
pub const DRAG_RESISTANCE_EXPONENT: f32 = 0.8;

/// Upward release displacement (in pixels) still treated as "stay visible".
pub const UPWARD_RELEASE_TOLERANCE: f32 = 10.0;

/// Default long-press duration (in milliseconds).
pub const DEFAULT_LONG_PRESS_MS: u64 = 500;

/// Minimum long-press duration (in milliseconds).
pub const MIN_LONG_PRESS_MS: u64 = 100;

/// Maximum long-press duration (in milliseconds).
pub const MAX_LONG_PRESS_MS: u64 = 3000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_DELAY_MS <= MAX_DELAY_MS);

    assert!(HIDDEN_OFFSET < TOP_OF_SCREEN);
    assert!(DEFAULT_TOP_OFFSET > TOP_OF_SCREEN);
    assert!(HIDDEN_OPACITY < TOP_OF_SCREEN_OPACITY);
    assert!(TOP_OF_SCREEN_OPACITY < VISIBLE_OPACITY);

    assert!(DRAG_RESISTANCE_EXPONENT > 0.0);
    assert!(DRAG_RESISTANCE_EXPONENT <= 1.0);
    assert!(UPWARD_RELEASE_TOLERANCE >= 0.0);

    assert!(MIN_LONG_PRESS_MS > 0);
    assert!(MAX_LONG_PRESS_MS >= MIN_LONG_PRESS_MS);
    assert!(DEFAULT_LONG_PRESS_MS >= MIN_LONG_PRESS_MS);
    assert!(DEFAULT_LONG_PRESS_MS <= MAX_LONG_PRESS_MS);
};
