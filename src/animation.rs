// SPDX-License-Identifier: MPL-2.0
//! Time-based value animation.
//!
//! Animations here are sampled, not scheduled: a [`Tween`] is a pure function
//! of an externally supplied `Instant`, and an [`Animated`] value owns at most
//! one in-flight tween at a time (a newer write replaces it, taking over from
//! the currently presented value). Nothing in this module reads the clock;
//! callers pass `now`, which keeps every animation decision testable.

use std::time::{Duration, Instant};

/// Easing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No transition; the value jumps to the target.
    Instant,
    /// Fast start, gentle landing. Used for user-initiated motion.
    #[default]
    EaseOut,
    /// Gentle at both ends. Used for programmatic resets.
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the eased curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Instant => 1.0,
            Easing::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// An in-flight interpolation between two values.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// Starts a tween at `start`.
    #[must_use]
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// The value the tween is heading toward.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Whether the tween has reached its target at `now`.
    #[must_use]
    pub fn is_settled(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Samples the eased value at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> f32 {
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    /// Redirects the tween toward `new_to`, continuing from the currently
    /// presented value so the motion has no visible jump.
    pub fn retarget(&mut self, now: Instant, new_to: f32, duration: Duration, easing: Easing) {
        let current = self.sample(now);
        *self = Self::new(current, new_to, now, duration, easing);
    }
}

/// A value with an optional transition toward its committed state.
///
/// `value` is authoritative (what a synchronous read should see once motion
/// ends); `present` returns the possibly-lagging visual value. Completion
/// commits by construction: sampling at or past the end instant yields the
/// committed value, so a finished animation needs no callback.
#[derive(Debug, Clone, Copy)]
pub struct Animated {
    value: f32,
    tween: Option<Tween>,
}

impl Animated {
    /// Creates a settled value.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self { value, tween: None }
    }

    /// The committed (target) value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The visually presented value at `now`.
    #[must_use]
    pub fn present(&self, now: Instant) -> f32 {
        match &self.tween {
            Some(tween) => tween.sample(now),
            None => self.value,
        }
    }

    /// Whether a transition is still running at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.is_some_and(|tween| !tween.is_settled(now))
    }

    /// Commits the target and drops the tween once it has settled.
    pub fn settle(&mut self, now: Instant) {
        if let Some(tween) = self.tween {
            if tween.is_settled(now) {
                self.value = tween.target();
                self.tween = None;
            }
        }
    }

    /// Sets a new target. `Easing::Instant` (or a zero duration) commits
    /// immediately and cancels any in-flight motion; otherwise the transition
    /// departs from the currently presented value (newest write wins).
    pub fn set(&mut self, target: f32, duration: Duration, easing: Easing, now: Instant) {
        if easing == Easing::Instant || duration.is_zero() {
            self.value = target;
            self.tween = None;
            return;
        }
        let from = self.present(now);
        self.value = target;
        self.tween = Some(Tween::new(from, target, now, duration, easing));
    }
}
