// SPDX-License-Identifier: MPL-2.0
//! `toaster` is the lifecycle core of a transient notification ("toast")
//! component.
//!
//! Callers enqueue [`NotificationRequest`]s on a [`Toaster`]; it shows them one
//! at a time, hides them after a delay or on user gesture, and promotes the
//! next request once the active one has fully left the screen. Animation and
//! timing are delegated to a [`MotionDriver`](motion::MotionDriver) and a
//! [`TimerService`](timer::TimerService), which report back through
//! [`Message`]s.
//!
//! The [`session`] module hosts a toaster on a single-threaded tokio runtime.

#![doc(html_root_url = "https://docs.rs/toaster/0.1.0")]

pub mod config;
pub mod error;
pub mod gesture;
pub mod lifecycle;
pub mod manager;
pub mod motion;
pub mod queue;
pub mod request;
pub mod session;
pub mod theme;
pub mod timer;

pub use manager::{Message, ToastView, Toaster};
pub use request::NotificationRequest;
pub use theme::ToastType;
