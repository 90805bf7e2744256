// SPDX-License-Identifier: MPL-2.0
//! Lifecycle state machine of the active toast.
//!
//! ```text
//! Hidden ──promote──▶ Showing ──spring done──▶ Visible ──hide trigger──▶ Hiding ──exit done──▶ Hidden
//!                        │                       ▲   │                      │
//!                        └──────── hide() ───────┼───┘◀──── grab ───────────┘ (timed exit only)
//!                                                └── drag / snap back
//! ```
//!
//! Every animation and timer carries a token. Completions whose token is not
//! the live one belong to a superseded transition and are dropped, which is
//! what keeps `on_did_show` / `on_did_hide` at most once per cycle.

use crate::config::{Config, LongPressDuration, FLING_DEBOUNCE_MS, HIDDEN_OFFSET};
use crate::gesture::{
    DragState, GestureInterpreter, GestureOutcome, PointerEvent, ReleaseDecision,
};
use crate::motion::{opacity_at, AnimationId, MotionDriver, MotionProfile, MotionTarget};
use crate::request::{Hook, NotificationRequest};
use crate::timer::{Debouncer, TimerService, TimerToken};
use std::time::Duration;
use tracing::{debug, trace};

/// How an exit is being carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideMode {
    /// Standard ease-out exit animation.
    Timed,
    /// Release momentum carries the toast off-screen; no timed exit runs.
    Fling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Hidden,
    Showing,
    Visible,
    Hiding(HideMode),
}

impl LifecycleState {
    /// Whether a toast occupies the active slot.
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, LifecycleState::Hidden)
    }
}

/// Result of feeding an event to the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Continue,
    /// The active toast finished hiding; the queue should advance.
    Hidden,
}

/// Defaults applied to requests that do not override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToastDefaults {
    pub delay: Duration,
    pub auto_dismiss: bool,
    pub top_offset: f32,
    pub long_press: LongPressDuration,
}

impl From<&Config> for ToastDefaults {
    fn from(config: &Config) -> Self {
        Self {
            delay: config.delay(),
            auto_dismiss: config.auto_dismiss(),
            top_offset: config.top_offset(),
            long_press: config.long_press_duration(),
        }
    }
}

impl Default for ToastDefaults {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Settings in force for the active toast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSettings {
    pub delay: Duration,
    pub auto_dismiss: bool,
    pub top_offset: f32,
}

enum Exit {
    Timed,
    Fling { velocity: f32 },
}

pub struct Lifecycle<M, T> {
    motion: M,
    timers: T,
    defaults: ToastDefaults,
    state: LifecycleState,
    settings: ActiveSettings,
    offset: f32,
    pending_animation: Option<AnimationId>,
    auto_dismiss: Option<TimerToken>,
    long_press: Option<TimerToken>,
    fling_check: Debouncer,
    decay_settled: bool,
    gesture: GestureInterpreter,
    drag: Option<DragState>,
    // Pointer went down on a toast whose timed exit was in flight.
    resume_exit: bool,
    will_hide_fired: bool,
    next_token: u64,
}

impl<M: MotionDriver, T: TimerService> Lifecycle<M, T> {
    pub fn new(motion: M, timers: T, defaults: ToastDefaults) -> Self {
        Self {
            motion,
            timers,
            settings: ActiveSettings {
                delay: defaults.delay,
                auto_dismiss: defaults.auto_dismiss,
                top_offset: defaults.top_offset,
            },
            defaults,
            state: LifecycleState::Hidden,
            offset: HIDDEN_OFFSET,
            pending_animation: None,
            auto_dismiss: None,
            long_press: None,
            fling_check: Debouncer::new(Duration::from_millis(FLING_DEBOUNCE_MS)),
            decay_settled: false,
            gesture: GestureInterpreter::default(),
            drag: None,
            resume_exit: false,
            will_hide_fired: false,
            next_token: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Last known offset of the toast's top edge.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        opacity_at(self.offset, self.settings.top_offset)
    }

    #[must_use]
    pub fn settings(&self) -> ActiveSettings {
        self.settings
    }

    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    #[must_use]
    pub fn auto_dismiss_armed(&self) -> bool {
        self.auto_dismiss.is_some()
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// `Hidden → Showing` for a freshly promoted request.
    pub fn begin_show(&mut self, request: &mut NotificationRequest) {
        if self.state != LifecycleState::Hidden {
            debug!(state = ?self.state, "begin_show ignored: slot busy");
            return;
        }
        self.settings = ActiveSettings {
            delay: request.delay_override().unwrap_or(self.defaults.delay),
            auto_dismiss: request
                .auto_dismiss_override()
                .unwrap_or(self.defaults.auto_dismiss),
            top_offset: request
                .top_offset_override()
                .unwrap_or(self.defaults.top_offset),
        };
        debug!(title = request.title(), "showing toast");

        self.state = LifecycleState::Showing;
        self.will_hide_fired = false;
        request.fire(Hook::WillShow);
        let target = MotionTarget::at(self.settings.top_offset, self.settings.top_offset);
        self.animate(target, MotionProfile::spring());
    }

    /// Starts the timed exit. No-op unless showing or visible.
    pub fn hide(&mut self, request: &mut NotificationRequest) {
        match self.state {
            LifecycleState::Showing | LifecycleState::Visible => {
                self.begin_hide(Exit::Timed, request);
            }
            LifecycleState::Hidden | LifecycleState::Hiding(_) => {
                trace!(state = ?self.state, "hide ignored");
            }
        }
    }

    fn begin_hide(&mut self, exit: Exit, request: &mut NotificationRequest) {
        self.cancel_auto_dismiss();
        self.cancel_long_press();
        self.gesture.cancel();
        self.drag = None;
        self.resume_exit = false;

        // A grab can pull a hiding toast back; its exit still counts once.
        if !std::mem::replace(&mut self.will_hide_fired, true) {
            request.fire(Hook::WillHide);
        }
        match exit {
            Exit::Timed => {
                debug!(title = request.title(), "hiding toast");
                self.state = LifecycleState::Hiding(HideMode::Timed);
                self.animate(MotionTarget::hidden(), MotionProfile::exit());
            }
            Exit::Fling { velocity } => {
                debug!(title = request.title(), velocity, "fling dismiss");
                self.state = LifecycleState::Hiding(HideMode::Fling);
                self.decay_settled = false;
                self.animate(MotionTarget::hidden(), MotionProfile::decay(velocity));
                self.poke_fling_check();
            }
        }
    }

    fn finish_hide(&mut self, request: &mut NotificationRequest) -> Outcome {
        self.clear_transient();
        self.state = LifecycleState::Hidden;
        self.offset = HIDDEN_OFFSET;
        debug!(title = request.title(), "toast hidden");
        request.fire(Hook::DidHide);
        Outcome::Hidden
    }

    /// Drops all in-flight work and returns to `Hidden` without callbacks.
    pub fn reset(&mut self) {
        self.clear_transient();
        self.state = LifecycleState::Hidden;
        self.offset = HIDDEN_OFFSET;
    }

    fn clear_transient(&mut self) {
        self.cancel_auto_dismiss();
        self.cancel_long_press();
        self.fling_check.cancel(&mut self.timers);
        self.gesture.cancel();
        self.drag = None;
        self.resume_exit = false;
        self.pending_animation = None;
        self.decay_settled = false;
    }

    // =========================================================================
    // Completions
    // =========================================================================

    pub fn on_animation_complete(
        &mut self,
        id: AnimationId,
        finished: bool,
        request: &mut NotificationRequest,
    ) -> Outcome {
        if self.pending_animation != Some(id) {
            trace!(?id, "stale animation completion dropped");
            return Outcome::Continue;
        }
        self.pending_animation = None;
        if !finished {
            trace!(?id, state = ?self.state, "animation interrupted");
            return Outcome::Continue;
        }

        match self.state {
            LifecycleState::Showing => {
                self.offset = self.settings.top_offset;
                self.state = LifecycleState::Visible;
                request.fire(Hook::DidShow);
                self.arm_auto_dismiss();
                Outcome::Continue
            }
            LifecycleState::Visible => {
                // snap-back settled
                self.offset = self.settings.top_offset;
                Outcome::Continue
            }
            LifecycleState::Hiding(HideMode::Timed) => self.finish_hide(request),
            LifecycleState::Hiding(HideMode::Fling) => {
                // The last reported position decides whether it got off-screen.
                self.decay_settled = true;
                self.poke_fling_check();
                Outcome::Continue
            }
            LifecycleState::Hidden => Outcome::Continue,
        }
    }

    pub fn on_timer(&mut self, token: TimerToken, request: &mut NotificationRequest) -> Outcome {
        if self.auto_dismiss == Some(token) {
            self.auto_dismiss = None;
            if self.state == LifecycleState::Visible {
                debug!(title = request.title(), "auto-dismiss");
                self.begin_hide(Exit::Timed, request);
            }
            return Outcome::Continue;
        }

        if self.long_press == Some(token) {
            self.long_press = None;
            if self.state == LifecycleState::Visible
                && self.gesture.is_active()
                && !self.gesture.is_dragging()
            {
                request.fire(Hook::LongPress);
                self.begin_hide(Exit::Timed, request);
            }
            return Outcome::Continue;
        }

        if self.fling_check.take_if_current(token) {
            return self.check_fling(request);
        }

        trace!(?token, "stale timer dropped");
        Outcome::Continue
    }

    /// Position reported by the presentation surface while animating.
    pub fn on_position_sample(&mut self, offset: f32) {
        self.offset = offset;
        if self.state == LifecycleState::Hiding(HideMode::Fling) {
            self.poke_fling_check();
        }
    }

    fn check_fling(&mut self, request: &mut NotificationRequest) -> Outcome {
        if self.state != LifecycleState::Hiding(HideMode::Fling) {
            return Outcome::Continue;
        }
        if self.offset <= HIDDEN_OFFSET {
            return self.finish_hide(request);
        }
        if self.decay_settled {
            // Momentum ran out on screen; finish with the regular exit.
            debug!(offset = self.offset, "fling stopped short, falling back to timed exit");
            self.state = LifecycleState::Hiding(HideMode::Timed);
            self.animate(MotionTarget::hidden(), MotionProfile::exit());
        }
        Outcome::Continue
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    pub fn on_pointer(&mut self, event: PointerEvent, request: &mut NotificationRequest) {
        match event {
            PointerEvent::Down { y } => self.pointer_down(y),
            PointerEvent::Move { y } => self.pointer_move(y),
            PointerEvent::Up { y, velocity } => self.pointer_up(y, velocity, request),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    fn pointer_down(&mut self, y: f32) {
        match self.state {
            LifecycleState::Visible => {}
            LifecycleState::Hiding(HideMode::Timed) => {
                // Grabbing the toast stops its exit where it is; the exit's
                // completion is now stale and must not finish the hide.
                debug!(offset = self.offset, "exit interrupted by grab");
                self.pending_animation = None;
                self.state = LifecycleState::Visible;
                self.resume_exit = true;
                self.motion
                    .jump_to(MotionTarget::at(self.offset, self.settings.top_offset));
            }
            _ => return,
        }
        self.gesture.press(y);
        self.drag = Some(DragState::new(self.offset));
        self.cancel_long_press();
        if self.resume_exit {
            return;
        }
        let token = self.next_timer_token();
        self.timers
            .schedule(token, self.defaults.long_press.as_duration());
        self.long_press = Some(token);
    }

    fn pointer_move(&mut self, y: f32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let Some(sample) = self.gesture.move_to(y) else {
            return;
        };
        let offset = drag.apply(sample);
        drag.timer_paused = true;

        self.cancel_long_press();
        self.cancel_auto_dismiss();
        self.pending_animation = None;
        self.offset = offset;
        self.motion
            .jump_to(MotionTarget::at(offset, self.settings.top_offset));
    }

    fn pointer_up(&mut self, y: f32, velocity: f32, request: &mut NotificationRequest) {
        self.cancel_long_press();
        let resume_exit = std::mem::take(&mut self.resume_exit);
        if self.drag.take().is_none() {
            self.gesture.cancel();
            return;
        }
        match self.gesture.release(y, velocity) {
            Some(GestureOutcome::Tap) if resume_exit => self.resume_timed_exit(),
            Some(GestureOutcome::Tap) => {
                request.fire(Hook::Press);
                self.begin_hide(Exit::Timed, request);
            }
            Some(GestureOutcome::Release {
                decision: ReleaseDecision::SnapBack,
                ..
            }) => self.snap_back(),
            Some(GestureOutcome::Release {
                decision: ReleaseDecision::Dismiss { velocity },
                ..
            }) => self.begin_hide(Exit::Fling { velocity }, request),
            None => {}
        }
    }

    fn pointer_cancel(&mut self) {
        self.cancel_long_press();
        let resume_exit = std::mem::take(&mut self.resume_exit);
        let moved = self.gesture.is_dragging();
        self.gesture.cancel();
        if self.drag.take().is_none() {
            return;
        }
        if moved {
            self.snap_back();
        } else if resume_exit {
            self.resume_timed_exit();
        }
    }

    /// Restarts an exit that a grab interrupted, without repeating callbacks.
    fn resume_timed_exit(&mut self) {
        debug!(offset = self.offset, "resuming interrupted exit");
        self.state = LifecycleState::Hiding(HideMode::Timed);
        self.animate(MotionTarget::hidden(), MotionProfile::exit());
    }

    fn snap_back(&mut self) {
        let target = MotionTarget::at(self.settings.top_offset, self.settings.top_offset);
        self.animate(target, MotionProfile::spring());
        self.arm_auto_dismiss();
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn animate(&mut self, target: MotionTarget, profile: MotionProfile) {
        self.next_token += 1;
        let id = AnimationId::new(self.next_token);
        self.pending_animation = Some(id);
        self.motion.animate(id, target, profile);
    }

    fn next_timer_token(&mut self) -> TimerToken {
        self.next_token += 1;
        TimerToken::new(self.next_token)
    }

    /// (Re)arms the auto-dismiss timer from zero when enabled.
    fn arm_auto_dismiss(&mut self) {
        self.cancel_auto_dismiss();
        if !self.settings.auto_dismiss {
            return;
        }
        let token = self.next_timer_token();
        self.timers.schedule(token, self.settings.delay);
        self.auto_dismiss = Some(token);
    }

    fn cancel_auto_dismiss(&mut self) {
        if let Some(token) = self.auto_dismiss.take() {
            self.timers.cancel(token);
        }
    }

    fn cancel_long_press(&mut self) {
        if let Some(token) = self.long_press.take() {
            self.timers.cancel(token);
        }
    }

    fn poke_fling_check(&mut self) {
        let token = self.next_timer_token();
        self.fling_check.poke(&mut self.timers, token);
    }
}
