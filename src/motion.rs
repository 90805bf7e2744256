// SPDX-License-Identifier: MPL-2.0
//! Motion driver seam.
//!
//! The lifecycle never animates anything itself. It asks a [`MotionDriver`]
//! to move the toast towards a [`MotionTarget`] using a [`MotionProfile`], and
//! the driver later reports back through
//! [`Message::AnimationComplete`](crate::Message::AnimationComplete) whether
//! the animation ran to completion or was interrupted.

use crate::config::{
    EXIT_DURATION_MS, EXIT_EASING_OVERSHOOT, HIDDEN_OFFSET, HIDDEN_OPACITY, SPRING_DAMPING,
    SPRING_STIFFNESS, TOP_OF_SCREEN, TOP_OF_SCREEN_OPACITY, VISIBLE_OPACITY,
};
use std::time::Duration;

/// Identifies one animation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(u64);

impl AnimationId {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Where the toast should end up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTarget {
    /// Vertical offset of the toast's top edge, in pixels.
    pub offset: f32,
    pub opacity: f32,
}

impl MotionTarget {
    /// Target at `offset` with the opacity the curve assigns to it.
    #[must_use]
    pub fn at(offset: f32, top_offset: f32) -> Self {
        Self {
            offset,
            opacity: opacity_at(offset, top_offset),
        }
    }

    #[must_use]
    pub fn hidden() -> Self {
        Self {
            offset: HIDDEN_OFFSET,
            opacity: HIDDEN_OPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Ease-out that overshoots backwards by the given amount first.
    Back(f32),
}

/// Timing profile of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionProfile {
    Spring { damping: f32, stiffness: f32 },
    Timing { duration: Duration, easing: Easing },
    /// Momentum carried from a release, clamped at the target.
    Decay { velocity: f32 },
}

impl MotionProfile {
    /// Spring used for entry and snap-back.
    #[must_use]
    pub fn spring() -> Self {
        MotionProfile::Spring {
            damping: SPRING_DAMPING,
            stiffness: SPRING_STIFFNESS,
        }
    }

    /// Standard timed exit.
    #[must_use]
    pub fn exit() -> Self {
        MotionProfile::Timing {
            duration: Duration::from_millis(EXIT_DURATION_MS),
            easing: Easing::Back(EXIT_EASING_OVERSHOOT),
        }
    }

    #[must_use]
    pub fn decay(velocity: f32) -> Self {
        MotionProfile::Decay { velocity }
    }

    #[must_use]
    pub fn is_timed_exit(&self) -> bool {
        matches!(self, MotionProfile::Timing { .. })
    }
}

/// Opacity for a toast whose top edge sits at `offset`.
///
/// Piecewise linear through (hidden, 0), (top of screen, 0.3) and
/// (`top_offset`, 1), clamped to `[0, 1]`.
#[must_use]
pub fn opacity_at(offset: f32, top_offset: f32) -> f32 {
    let opacity = if top_offset <= TOP_OF_SCREEN || offset >= TOP_OF_SCREEN {
        let (from, to) = if top_offset <= TOP_OF_SCREEN {
            ((HIDDEN_OFFSET, HIDDEN_OPACITY), (top_offset, VISIBLE_OPACITY))
        } else {
            ((TOP_OF_SCREEN, TOP_OF_SCREEN_OPACITY), (top_offset, VISIBLE_OPACITY))
        };
        lerp(offset, from, to)
    } else {
        lerp(
            offset,
            (HIDDEN_OFFSET, HIDDEN_OPACITY),
            (TOP_OF_SCREEN, TOP_OF_SCREEN_OPACITY),
        )
    };
    opacity.clamp(HIDDEN_OPACITY, VISIBLE_OPACITY)
}

fn lerp(x: f32, (x0, y0): (f32, f32), (x1, y1): (f32, f32)) -> f32 {
    if (x1 - x0).abs() < f32::EPSILON {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Presentation-side animator.
pub trait MotionDriver {
    /// Starts animating towards `target`, replacing any animation in flight.
    ///
    /// The replaced animation must be reported as not finished.
    fn animate(&mut self, id: AnimationId, target: MotionTarget, profile: MotionProfile);

    /// Moves to `target` immediately, interrupting any animation in flight.
    fn jump_to(&mut self, target: MotionTarget);
}

/// One command received by a [`Recorder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    Animate {
        id: AnimationId,
        target: MotionTarget,
        profile: MotionProfile,
    },
    Jump(MotionTarget),
}

/// Headless driver that records every command it receives.
///
/// Completion is left to the host: feed
/// [`Message::AnimationComplete`](crate::Message::AnimationComplete) with the
/// recorded id when the animation should be considered done.
#[derive(Debug, Default)]
pub struct Recorder {
    commands: Vec<MotionCommand>,
    in_flight: Option<AnimationId>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[MotionCommand] {
        &self.commands
    }

    /// The animation still running, if the last command was not a jump.
    #[must_use]
    pub fn in_flight(&self) -> Option<AnimationId> {
        self.in_flight
    }

    /// Most recent animate command.
    #[must_use]
    pub fn last_animation(&self) -> Option<(AnimationId, MotionTarget, MotionProfile)> {
        self.commands.iter().rev().find_map(|command| match *command {
            MotionCommand::Animate {
                id,
                target,
                profile,
            } => Some((id, target, profile)),
            MotionCommand::Jump(_) => None,
        })
    }

    /// Most recent position the toast was sent to, animated or not.
    #[must_use]
    pub fn last_target(&self) -> Option<MotionTarget> {
        self.commands.last().map(|command| match *command {
            MotionCommand::Animate { target, .. } | MotionCommand::Jump(target) => target,
        })
    }

    /// How many timed exit animations were requested.
    #[must_use]
    pub fn timed_exit_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| {
                matches!(command, MotionCommand::Animate { profile, .. } if profile.is_timed_exit())
            })
            .count()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl MotionDriver for Recorder {
    fn animate(&mut self, id: AnimationId, target: MotionTarget, profile: MotionProfile) {
        self.commands.push(MotionCommand::Animate {
            id,
            target,
            profile,
        });
        self.in_flight = Some(id);
    }

    fn jump_to(&mut self, target: MotionTarget) {
        self.commands.push(MotionCommand::Jump(target));
        self.in_flight = None;
    }
}
