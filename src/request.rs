// SPDX-License-Identifier: MPL-2.0
//! Notification requests.
//!
//! A [`NotificationRequest`] is what callers hand to the toaster: the content
//! of one toast, its dismissal options and the lifecycle hooks to run. It is
//! built with a consuming builder and never changes once enqueued.

use crate::config::MAX_DELAY_MS;
use crate::error::RequestError;
use crate::theme::ToastType;
use std::fmt;
use std::time::Duration;

type Callback = Box<dyn FnMut()>;

/// Lifecycle hook points of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    WillShow,
    DidShow,
    WillHide,
    DidHide,
    Press,
    LongPress,
}

/// Optional zero-argument callbacks attached to a request.
#[derive(Default)]
pub struct Callbacks {
    will_show: Option<Callback>,
    did_show: Option<Callback>,
    will_hide: Option<Callback>,
    did_hide: Option<Callback>,
    press: Option<Callback>,
    long_press: Option<Callback>,
}

impl Callbacks {
    fn slot(&mut self, hook: Hook) -> &mut Option<Callback> {
        match hook {
            Hook::WillShow => &mut self.will_show,
            Hook::DidShow => &mut self.did_show,
            Hook::WillHide => &mut self.will_hide,
            Hook::DidHide => &mut self.did_hide,
            Hook::Press => &mut self.press,
            Hook::LongPress => &mut self.long_press,
        }
    }

    /// Runs the callback registered for `hook`; a missing callback is a no-op.
    pub fn fire(&mut self, hook: Hook) {
        if let Some(callback) = self.slot(hook).as_mut() {
            callback();
        }
    }

    fn set(&mut self, hook: Hook, callback: Callback) {
        *self.slot(hook) = Some(callback);
    }

    fn registered(&self) -> Vec<Hook> {
        [
            (Hook::WillShow, self.will_show.is_some()),
            (Hook::DidShow, self.did_show.is_some()),
            (Hook::WillHide, self.will_hide.is_some()),
            (Hook::DidHide, self.did_hide.is_some()),
            (Hook::Press, self.press.is_some()),
            (Hook::LongPress, self.long_press.is_some()),
        ]
        .into_iter()
        .filter_map(|(hook, set)| set.then_some(hook))
        .collect()
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.registered()).finish()
    }
}

/// One pending or active toast.
#[derive(Debug)]
pub struct NotificationRequest {
    id: Option<String>,
    title: String,
    subtitle: Option<String>,
    toast_type: ToastType,
    delay: Option<Duration>,
    auto_dismiss: Option<bool>,
    top_offset: Option<f32>,
    callbacks: Callbacks,
}

impl NotificationRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            subtitle: None,
            toast_type: ToastType::default(),
            delay: None,
            auto_dismiss: None,
            top_offset: None,
            callbacks: Callbacks::default(),
        }
    }

    /// Creates a success toast.
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title).toast_type(ToastType::Success)
    }

    /// Creates a failure toast.
    pub fn fail(title: impl Into<String>) -> Self {
        Self::new(title).toast_type(ToastType::Fail)
    }

    /// Creates an info toast.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(title).toast_type(ToastType::Info)
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn toast_type(mut self, toast_type: ToastType) -> Self {
        self.toast_type = toast_type;
        self
    }

    /// Overrides the configured auto-dismiss delay for this toast.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Enables or disables auto-dismiss for this toast.
    #[must_use]
    pub fn auto_dismiss(mut self, enabled: bool) -> Self {
        self.auto_dismiss = Some(enabled);
        self
    }

    /// Overrides the configured resting offset for this toast.
    #[must_use]
    pub fn top_offset(mut self, offset: f32) -> Self {
        self.top_offset = Some(offset);
        self
    }

    #[must_use]
    pub fn on_will_show(self, callback: impl FnMut() + 'static) -> Self {
        self.with_hook(Hook::WillShow, callback)
    }

    #[must_use]
    pub fn on_did_show(self, callback: impl FnMut() + 'static) -> Self {
        self.with_hook(Hook::DidShow, callback)
    }

    #[must_use]
    pub fn on_will_hide(self, callback: impl FnMut() + 'static) -> Self {
        self.with_hook(Hook::WillHide, callback)
    }

    #[must_use]
    pub fn on_did_hide(self, callback: impl FnMut() + 'static) -> Self {
        self.with_hook(Hook::DidHide, callback)
    }

    #[must_use]
    pub fn on_press(self, callback: impl FnMut() + 'static) -> Self {
        self.with_hook(Hook::Press, callback)
    }

    #[must_use]
    pub fn on_long_press(self, callback: impl FnMut() + 'static) -> Self {
        self.with_hook(Hook::LongPress, callback)
    }

    /// Registers `callback` for an arbitrary hook.
    #[must_use]
    pub fn with_hook(mut self, hook: Hook, callback: impl FnMut() + 'static) -> Self {
        self.callbacks.set(hook, Box::new(callback));
        self
    }

    /// Checks the caller contract: a non-blank title and a bounded delay.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.title.trim().is_empty() {
            return Err(RequestError::MissingTitle);
        }
        if let Some(delay) = self.delay {
            if delay > Duration::from_millis(MAX_DELAY_MS) {
                return Err(RequestError::DelayTooLong {
                    delay_ms: delay.as_millis(),
                    max_ms: MAX_DELAY_MS,
                });
            }
        }
        Ok(())
    }

    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle_text(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn kind(&self) -> ToastType {
        self.toast_type
    }

    pub fn delay_override(&self) -> Option<Duration> {
        self.delay
    }

    pub fn auto_dismiss_override(&self) -> Option<bool> {
        self.auto_dismiss
    }

    pub fn top_offset_override(&self) -> Option<f32> {
        self.top_offset
    }

    pub(crate) fn fire(&mut self, hook: Hook) {
        self.callbacks.fire(hook);
    }

    /// Callback-free copy of the request's data.
    pub fn summary(&self) -> RequestSummary {
        RequestSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            toast_type: self.toast_type,
            delay: self.delay,
            auto_dismiss: self.auto_dismiss,
        }
    }
}

/// Read-only view of a queued request, detached from the live queue.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSummary {
    pub id: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub toast_type: ToastType,
    pub delay: Option<Duration>,
    pub auto_dismiss: Option<bool>,
}
