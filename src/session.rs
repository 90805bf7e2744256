// SPDX-License-Identifier: MPL-2.0
//! Event loop hosting a [`Toaster`] on a single-threaded tokio runtime.
//!
//! A [`Session`] owns the toaster and drains a channel of commands. Callers
//! talk to it through a cloneable [`ToasterHandle`]; timers and motion
//! drivers post their completions through the same channel, so every state
//! change happens on the session task, one message at a time.
//!
//! Everything here is `!Send` (request callbacks are plain `FnMut`), so the
//! session and the tasks it spawns must run inside a [`tokio::task::LocalSet`].
//!
//! ```no_run
//! use toaster::config::Config;
//! use toaster::session::{Session, SimulatedMotion};
//! use toaster::NotificationRequest;
//!
//! # async fn demo() -> toaster::error::Result<()> {
//! let local = tokio::task::LocalSet::new();
//! local
//!     .run_until(async {
//!         let (session, handle) = Session::with_driver(&Config::default(), SimulatedMotion::new)?;
//!         let running = tokio::task::spawn_local(session.run());
//!         handle.show(NotificationRequest::success("Saved"))?;
//!         drop(handle);
//!         let _ = running.await;
//!         Ok::<(), toaster::error::Error>(())
//!     })
//!     .await
//! # }
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gesture::PointerEvent;
use crate::manager::{Message, ToastView, Toaster};
use crate::motion::{AnimationId, MotionDriver, MotionProfile, MotionTarget};
use crate::queue::QueueSnapshot;
use crate::request::NotificationRequest;
use crate::timer::{TimerService, TimerToken};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

enum Command {
    Message(Message),
    Snapshot(oneshot::Sender<QueueSnapshot>),
    View(oneshot::Sender<Option<ToastView>>),
}

#[derive(Clone)]
enum Link {
    Strong(UnboundedSender<Command>),
    Weak(WeakUnboundedSender<Command>),
}

/// Caller side of a running [`Session`].
///
/// Every method fails with [`Error::NoActiveSession`] once the session has
/// stopped. Handles created with [`ToasterHandle::downgrade`] do not keep the
/// session alive; the session ends when the last strong handle is dropped.
#[derive(Clone)]
pub struct ToasterHandle {
    link: Link,
}

impl std::fmt::Debug for ToasterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.link {
            Link::Strong(_) => "strong",
            Link::Weak(_) => "weak",
        };
        f.debug_struct("ToasterHandle").field("link", &kind).finish()
    }
}

impl ToasterHandle {
    /// Validates `request` and hands it to the session.
    pub fn show(&self, request: NotificationRequest) -> Result<()> {
        request.validate()?;
        self.send(Message::Show(request))
    }

    pub fn hide(&self) -> Result<()> {
        self.send(Message::Hide)
    }

    /// Reports the end of an animation started through [`MotionDriver::animate`].
    pub fn animation_complete(&self, id: AnimationId, finished: bool) -> Result<()> {
        self.send(Message::AnimationComplete { id, finished })
    }

    pub fn position_sample(&self, offset: f32) -> Result<()> {
        self.send(Message::PositionSample(offset))
    }

    pub fn pointer(&self, event: PointerEvent) -> Result<()> {
        self.send(Message::Pointer(event))
    }

    /// Copy of the queue once every earlier command has been handled.
    pub async fn snapshot(&self) -> Result<QueueSnapshot> {
        let (reply, response) = oneshot::channel();
        self.post(Command::Snapshot(reply))?;
        response.await.map_err(|_| Error::NoActiveSession)
    }

    /// The active toast as the surface should draw it.
    pub async fn view(&self) -> Result<Option<ToastView>> {
        let (reply, response) = oneshot::channel();
        self.post(Command::View(reply))?;
        response.await.map_err(|_| Error::NoActiveSession)
    }

    /// A handle that does not keep the session alive.
    #[must_use]
    pub fn downgrade(&self) -> ToasterHandle {
        let link = match &self.link {
            Link::Strong(sender) => Link::Weak(sender.downgrade()),
            Link::Weak(weak) => Link::Weak(weak.clone()),
        };
        ToasterHandle { link }
    }

    fn send(&self, message: Message) -> Result<()> {
        self.post(Command::Message(message))
    }

    fn post(&self, command: Command) -> Result<()> {
        let sent = match &self.link {
            Link::Strong(sender) => sender.send(command).is_ok(),
            Link::Weak(weak) => match weak.upgrade() {
                Some(sender) => sender.send(command).is_ok(),
                None => false,
            },
        };
        if sent {
            Ok(())
        } else {
            Err(Error::NoActiveSession)
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// A toaster running on the current thread.
pub struct Session<M> {
    toaster: Toaster<M, TokioTimer>,
    receiver: UnboundedReceiver<Command>,
}

impl<M: MotionDriver> Session<M> {
    /// Builds a session and its first strong handle.
    ///
    /// `make_driver` receives a weak handle the driver uses to report
    /// animation completions.
    pub fn with_driver(
        config: &Config,
        make_driver: impl FnOnce(ToasterHandle) -> M,
    ) -> Result<(Self, ToasterHandle)> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = ToasterHandle {
            link: Link::Strong(sender),
        };
        let motion = make_driver(handle.downgrade());
        let timers = TokioTimer::new(handle.downgrade());
        let toaster = Toaster::with_config(motion, timers, config)?;
        Ok((Self { toaster, receiver }, handle))
    }

    /// Processes commands until every strong handle is gone.
    ///
    /// Must be polled inside a [`tokio::task::LocalSet`].
    pub async fn run(mut self) {
        debug!("toaster session started");
        while let Some(command) = self.receiver.recv().await {
            self.dispatch(command);
        }
        debug!(
            pending = self.toaster.queued_count(),
            "toaster session ended"
        );
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Message(message) => {
                if let Err(err) = self.toaster.handle_message(message) {
                    warn!("Toaster rejected message: {}", err);
                }
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.toaster.snapshot());
            }
            Command::View(reply) => {
                let _ = reply.send(self.toaster.view());
            }
        }
    }
}

// =============================================================================
// Tokio-backed collaborators
// =============================================================================

/// [`TimerService`] backed by `tokio::time::sleep` tasks.
pub struct TokioTimer {
    handle: ToasterHandle,
    tasks: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioTimer {
    fn new(handle: ToasterHandle) -> Self {
        Self {
            handle,
            tasks: HashMap::new(),
        }
    }
}

impl TimerService for TokioTimer {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.tasks.retain(|_, task| !task.is_finished());
        self.cancel(token);
        let handle = self.handle.clone();
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if handle.send(Message::TimerFired(token)).is_err() {
                trace!(?token, "timer fired after session ended");
            }
        });
        self.tasks.insert(token, task);
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(task) = self.tasks.remove(&token) {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Headless [`MotionDriver`] that pretends each animation takes a fixed time.
///
/// Useful for demos and tests: springs and decays run for configurable
/// durations, timed exits for their own duration. Replacing or jumping over
/// an animation reports it as not finished.
pub struct SimulatedMotion {
    handle: ToasterHandle,
    spring: Duration,
    decay: Duration,
    in_flight: Option<(AnimationId, JoinHandle<()>)>,
}

impl SimulatedMotion {
    pub const DEFAULT_SPRING: Duration = Duration::from_millis(300);
    pub const DEFAULT_DECAY: Duration = Duration::from_millis(200);

    #[must_use]
    pub fn new(handle: ToasterHandle) -> Self {
        Self {
            handle,
            spring: Self::DEFAULT_SPRING,
            decay: Self::DEFAULT_DECAY,
            in_flight: None,
        }
    }

    #[must_use]
    pub fn with_durations(mut self, spring: Duration, decay: Duration) -> Self {
        self.spring = spring;
        self.decay = decay;
        self
    }

    fn duration(&self, profile: MotionProfile) -> Duration {
        match profile {
            MotionProfile::Spring { .. } => self.spring,
            MotionProfile::Timing { duration, .. } => duration,
            MotionProfile::Decay { .. } => self.decay,
        }
    }

    fn interrupt(&mut self) {
        if let Some((id, task)) = self.in_flight.take() {
            if !task.is_finished() {
                task.abort();
                let _ = self.handle.animation_complete(id, false);
            }
        }
    }
}

impl MotionDriver for SimulatedMotion {
    fn animate(&mut self, id: AnimationId, target: MotionTarget, profile: MotionProfile) {
        self.interrupt();
        let duration = self.duration(profile);
        trace!(?id, offset = target.offset, ?duration, "simulated animation");
        let handle = self.handle.clone();
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(duration).await;
            let _ = handle.position_sample(target.offset);
            let _ = handle.animation_complete(id, true);
        });
        self.in_flight = Some((id, task));
    }

    fn jump_to(&mut self, _target: MotionTarget) {
        self.interrupt();
    }
}

impl Drop for SimulatedMotion {
    fn drop(&mut self) {
        if let Some((_, task)) = self.in_flight.take() {
            task.abort();
        }
    }
}
