// SPDX-License-Identifier: MPL-2.0
//! Gesture interpretation.
//!
//! Turns raw pointer input on the toast into the two signals the lifecycle
//! consumes: drag samples while the pointer moves and a single release
//! decision when it lifts. A pointer that never moved is reported as a tap so
//! press handling still sees it.

use crate::config::{DRAG_RESISTANCE_EXPONENT, HIDDEN_OFFSET, UPWARD_RELEASE_TOLERANCE};

/// Raw pointer input on the toast surface. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { y: f32 },
    Move { y: f32 },
    /// `velocity` is vertical, in pixels per second, negative when upwards.
    Up { y: f32, velocity: f32 },
    Cancel,
}

/// Accepted drag movement, relative to where the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub dy: f32,
}

/// What to do with the toast once the pointer lifts after a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseDecision {
    SnapBack,
    Dismiss { velocity: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Pointer lifted without ever dragging.
    Tap,
    Release { dy: f32, decision: ReleaseDecision },
}

/// Tracks one pointer from down to up.
#[derive(Debug)]
pub struct GestureInterpreter {
    start_y: Option<f32>,
    last_dy: f32,
    dragging: bool,
    tolerance: f32,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(UPWARD_RELEASE_TOLERANCE)
    }
}

impl GestureInterpreter {
    /// `tolerance` is the upward release distance still treated as a snap back.
    #[must_use]
    pub fn new(tolerance: f32) -> Self {
        Self {
            start_y: None,
            last_dy: 0.0,
            dragging: false,
            tolerance,
        }
    }

    pub fn press(&mut self, y: f32) {
        self.start_y = Some(y);
        self.last_dy = 0.0;
        self.dragging = false;
    }

    /// Returns a sample only when the pointer actually moved.
    pub fn move_to(&mut self, y: f32) -> Option<DragSample> {
        let start = self.start_y?;
        let dy = y - start;
        if dy == self.last_dy {
            return None;
        }
        self.last_dy = dy;
        self.dragging = true;
        Some(DragSample { dy })
    }

    /// Ends the gesture. Returns `None` when no pointer was down.
    pub fn release(&mut self, y: f32, velocity: f32) -> Option<GestureOutcome> {
        let start = self.start_y.take()?;
        let was_dragging = std::mem::take(&mut self.dragging);
        self.last_dy = 0.0;

        let dy = y - start;
        if !was_dragging && dy == 0.0 {
            return Some(GestureOutcome::Tap);
        }
        let decision = if dy < -self.tolerance {
            ReleaseDecision::Dismiss { velocity }
        } else {
            ReleaseDecision::SnapBack
        };
        Some(GestureOutcome::Release { dy, decision })
    }

    pub fn cancel(&mut self) {
        self.start_y = None;
        self.last_dy = 0.0;
        self.dragging = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start_y.is_some()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Offset for a toast dragged by `dy` from `origin`.
///
/// Downward drags are damped by [`DRAG_RESISTANCE_EXPONENT`]; upward drags
/// follow the pointer but never go past the hidden offset.
#[must_use]
pub fn resisted_offset(origin: f32, dy: f32) -> f32 {
    if dy > 0.0 {
        origin + dy.powf(DRAG_RESISTANCE_EXPONENT)
    } else {
        (origin + dy).max(HIDDEN_OFFSET)
    }
}

/// Ephemeral state while a pointer is down on the toast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Offset of the toast when the pointer went down.
    pub origin_offset: f32,
    pub current_offset: f32,
    /// Whether drag movement cancelled the auto-dismiss timer.
    pub timer_paused: bool,
}

impl DragState {
    #[must_use]
    pub fn new(origin_offset: f32) -> Self {
        Self {
            origin_offset,
            current_offset: origin_offset,
            timer_paused: false,
        }
    }

    /// Applies a sample and returns the new offset.
    pub fn apply(&mut self, sample: DragSample) -> f32 {
        self.current_offset = resisted_offset(self.origin_offset, sample.dy);
        self.current_offset
    }
}
