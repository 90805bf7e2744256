// SPDX-License-Identifier: MPL-2.0
//! Notification queue management.
//!
//! The [`Toaster`] owns the queue and the lifecycle of the single active
//! toast. Requests are shown strictly in the order they were submitted; the
//! next one is promoted only after the active toast has completely hidden.

use crate::config::Config;
use crate::error::Result;
use crate::gesture::PointerEvent;
use crate::lifecycle::{Lifecycle, LifecycleState, Outcome, ToastDefaults};
use crate::motion::{AnimationId, MotionDriver};
use crate::queue::{Queue, QueueSnapshot};
use crate::request::NotificationRequest;
use crate::theme::{Theme, ToastType};
use crate::timer::{ManualTimer, TimerService, TimerToken};
use iced_core::Color;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, warn};

/// Messages driving the toaster.
#[derive(Debug)]
pub enum Message {
    /// Enqueue a request.
    Show(NotificationRequest),
    /// Force the active toast out with the full exit animation.
    Hide,
    /// A scheduled timer elapsed.
    TimerFired(TimerToken),
    /// The motion driver finished (or gave up on) an animation.
    AnimationComplete { id: AnimationId, finished: bool },
    /// Current offset reported by the presentation surface.
    PositionSample(f32),
    /// Pointer input on the toast.
    Pointer(PointerEvent),
}

/// What the rendering surface should currently reflect.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    pub title: String,
    pub subtitle: Option<String>,
    pub toast_type: ToastType,
    pub accent: Color,
    pub offset: f32,
    pub opacity: f32,
    pub state: LifecycleState,
}

/// Queue manager and single active toast slot.
pub struct Toaster<M, T> {
    queue: Queue,
    lifecycle: Lifecycle<M, T>,
    theme: Theme,
    // The current head has been handed to the lifecycle.
    head_shown: bool,
}

impl<M: MotionDriver, T: TimerService> Toaster<M, T> {
    /// Creates a toaster with the default configuration.
    pub fn new(motion: M, timers: T) -> Self {
        Self {
            queue: Queue::new(),
            lifecycle: Lifecycle::new(motion, timers, ToastDefaults::default()),
            theme: Theme::default(),
            head_shown: false,
        }
    }

    /// Creates a toaster from a loaded configuration, theme overrides included.
    pub fn with_config(motion: M, timers: T, config: &Config) -> Result<Self> {
        Ok(Self {
            queue: Queue::new(),
            lifecycle: Lifecycle::new(motion, timers, ToastDefaults::from(config)),
            theme: Theme::from_config(config)?,
            head_shown: false,
        })
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Enqueues `request`, showing it right away if nothing is active.
    ///
    /// Returns an error, and leaves the queue untouched, if the request
    /// breaks the caller contract.
    pub fn show(&mut self, request: NotificationRequest) -> Result<()> {
        if let Err(err) = request.validate() {
            warn!("Rejected notification request: {}", err);
            return Err(err.into());
        }
        debug!(title = request.title(), queued = self.queue.len(), "enqueue");
        self.queue.enqueue(request);
        if !self.lifecycle.state().is_active() {
            self.promote_head();
        }
        Ok(())
    }

    /// Begins hiding the active toast. No-op when nothing is showing.
    pub fn hide(&mut self) {
        self.dispatch(|lifecycle, request| {
            lifecycle.hide(request);
            Outcome::Continue
        });
    }

    /// Drops the finished head and promotes the next request, if any.
    ///
    /// No-op on an empty queue, and while a toast is still on screen. A head
    /// that was never shown is promoted instead of dropped.
    pub fn advance_to_next(&mut self) {
        if self.lifecycle.state().is_active() {
            debug!("advance_to_next ignored: toast still active");
            return;
        }
        if std::mem::take(&mut self.head_shown) {
            if let Some(done) = self.queue.dequeue() {
                debug!(title = done.title(), remaining = self.queue.len(), "dequeued");
            }
        }
        self.promote_head();
    }

    /// Single dispatch point for every asynchronous input.
    pub fn handle_message(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Show(request) => return self.show(request),
            Message::Hide => self.hide(),
            Message::TimerFired(token) => {
                self.dispatch(|lifecycle, request| lifecycle.on_timer(token, request));
            }
            Message::AnimationComplete { id, finished } => {
                self.dispatch(|lifecycle, request| {
                    lifecycle.on_animation_complete(id, finished, request)
                });
            }
            Message::PositionSample(offset) => self.lifecycle.on_position_sample(offset),
            Message::Pointer(event) => {
                self.dispatch(|lifecycle, request| {
                    lifecycle.on_pointer(event, request);
                    Outcome::Continue
                });
            }
        }
        Ok(())
    }

    fn promote_head(&mut self) {
        if let Some(request) = self.queue.peek_mut() {
            self.lifecycle.begin_show(request);
            self.head_shown = self.lifecycle.state().is_active();
        }
    }

    fn dispatch(
        &mut self,
        f: impl FnOnce(&mut Lifecycle<M, T>, &mut NotificationRequest) -> Outcome,
    ) {
        let outcome = match self.queue.peek_mut() {
            Some(request) => f(&mut self.lifecycle, request),
            None => {
                if self.lifecycle.state().is_active() {
                    warn!("Active toast missing from queue, resetting lifecycle");
                    self.lifecycle.reset();
                }
                self.head_shown = false;
                Outcome::Continue
            }
        };
        if outcome == Outcome::Hidden {
            self.advance_to_next();
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Detached, read-only copy of the queue (active toast first).
    #[must_use]
    pub fn snapshot(&self) -> QueueSnapshot {
        self.queue.snapshot()
    }

    /// Raw access to the live queue. See [`Queue::dangerously_get_queue_mut`].
    pub fn dangerously_get_queue_mut(&mut self) -> &mut VecDeque<NotificationRequest> {
        self.queue.dangerously_get_queue_mut()
    }

    /// Whether a toast is showing or settled on screen.
    ///
    /// Turns false as soon as a hide starts, while the exit is still running.
    #[must_use]
    pub fn is_toast_visible(&self) -> bool {
        matches!(
            self.lifecycle.state(),
            LifecycleState::Showing | LifecycleState::Visible
        )
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Number of requests, active one included.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Content and placement of the active toast, if any.
    #[must_use]
    pub fn view(&self) -> Option<ToastView> {
        if !self.lifecycle.state().is_active() {
            return None;
        }
        let request = self.queue.peek()?;
        Some(ToastView {
            title: request.title().to_string(),
            subtitle: request.subtitle_text().map(str::to_string),
            toast_type: request.kind(),
            accent: self.theme.accent(request.kind()),
            offset: self.lifecycle.offset(),
            opacity: self.lifecycle.opacity(),
            state: self.lifecycle.state(),
        })
    }

    pub fn lifecycle(&self) -> &Lifecycle<M, T> {
        &self.lifecycle
    }

    pub fn motion(&self) -> &M {
        self.lifecycle.motion()
    }

    pub fn motion_mut(&mut self) -> &mut M {
        self.lifecycle.motion_mut()
    }

    pub fn timers(&self) -> &T {
        self.lifecycle.timers()
    }

    pub fn timers_mut(&mut self) -> &mut T {
        self.lifecycle.timers_mut()
    }
}

impl<M: MotionDriver> Toaster<M, ManualTimer> {
    /// Advances the virtual clock and dispatches every timer that came due.
    pub fn tick(&mut self, elapsed: Duration) {
        let due = self.lifecycle.timers_mut().advance(elapsed);
        for token in due {
            self.dispatch(|lifecycle, request| lifecycle.on_timer(token, request));
        }
    }
}
