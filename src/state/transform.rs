// SPDX-License-Identifier: MPL-2.0
//! Transform state for the focused element.
//!
//! Holds the zoom scale and pan translation applied to the focused element
//! only, together with the anchored-scaling rule that keeps a chosen screen
//! point visually fixed across scale changes.

use crate::animation::Easing;
use crate::config::zoom::{MAX_SCALE, MIN_SCALE};
use iced_core::{Point, Vector};
use std::time::{Duration, Instant};

/// Clamps a scale factor to the supported zoom range.
#[must_use]
pub fn clamp_scale(scale: f32) -> f32 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Scale and translation of the focused element's visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Zoom factor, kept within [`MIN_SCALE`]..=[`MAX_SCALE`].
    pub scale: f32,
    /// Pan offset in viewport pixels, applied after scaling.
    pub translate: Vector,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The resting transform: unscaled, centered.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vector::new(0.0, 0.0),
    };

    /// Whether the transform is exactly at rest.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translate.x == 0.0 && self.translate.y == 0.0
    }

    /// Rescales around `anchor` so the gallery point under it stays put.
    ///
    /// `center` is the element area's center, the origin of the translate
    /// coordinate space. The anchor's pre-transform coordinate is recovered
    /// from the current scale/translate, then the translation is corrected
    /// by that coordinate times the scale delta.
    pub fn point_scale(&mut self, new_scale: f32, anchor: Point, center: Point) {
        let new_scale = clamp_scale(new_scale);

        let px = (anchor.x - center.x - self.translate.x) / self.scale;
        self.translate.x -= px * (new_scale - self.scale);

        let py = (anchor.y - center.y - self.translate.y) / self.scale;
        self.translate.y -= py * (new_scale - self.scale);

        self.scale = new_scale;
    }

    /// Re-establishes the invariants that hold outside an active gesture:
    /// the scale stays clamped and an unzoomed element has no vertical pan.
    pub fn normalize(&mut self) {
        self.scale = clamp_scale(self.scale);
        if self.scale <= 1.0 {
            self.translate.y = 0.0;
        }
    }

    /// Componentwise interpolation at progress `t`.
    #[must_use]
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            scale: from.scale + (to.scale - from.scale) * t,
            translate: Vector::new(
                from.translate.x + (to.translate.x - from.translate.x) * t,
                from.translate.y + (to.translate.y - from.translate.y) * t,
            ),
        }
    }
}

/// An in-flight transition between two transforms.
///
/// The committed transform lives with the gesture engine; this only carries
/// the visual catch-up, sampled with an explicit `now` like every other
/// animation in the crate.
#[derive(Debug, Clone, Copy)]
pub struct TransformTween {
    from: Transform,
    to: Transform,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl TransformTween {
    #[must_use]
    pub fn new(
        from: Transform,
        to: Transform,
        start: Instant,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Whether the transition has reached its target at `now`.
    #[must_use]
    pub fn is_settled(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Samples the eased transform at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> Transform {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(self.start);
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        };
        Transform::lerp(self.from, self.to, self.easing.apply(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    const CENTER: Point = Point::new(500.0, 300.0);

    /// Screen position of the gallery point that was under `anchor` before
    /// any scaling started.
    fn anchor_screen_position(transform: &Transform, pre: Vector) -> Point {
        Point::new(
            CENTER.x + transform.translate.x + pre.x * transform.scale,
            CENTER.y + transform.translate.y + pre.y * transform.scale,
        )
    }

    #[test]
    fn identity_is_default() {
        assert!(Transform::default().is_identity());
    }

    #[test]
    fn point_scale_keeps_anchor_fixed() {
        let anchor = Point::new(640.0, 180.0);
        let mut transform = Transform::IDENTITY;

        // The anchor's pre-transform coordinate under the identity transform.
        let pre = Vector::new(anchor.x - CENTER.x, anchor.y - CENTER.y);

        for target in [1.3, 1.9, 2.6, 2.1, 1.2] {
            transform.point_scale(target, anchor, CENTER);
            let on_screen = anchor_screen_position(&transform, pre);
            assert_abs_diff_eq!(on_screen.x, anchor.x, epsilon = 1e-3);
            assert_abs_diff_eq!(on_screen.y, anchor.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn point_scale_clamps_to_range() {
        let mut transform = Transform::IDENTITY;
        transform.point_scale(99.0, Point::new(0.0, 0.0), CENTER);
        assert_abs_diff_eq!(transform.scale, crate::config::zoom::MAX_SCALE);

        transform.point_scale(0.0, Point::new(0.0, 0.0), CENTER);
        assert_abs_diff_eq!(transform.scale, crate::config::zoom::MIN_SCALE);
    }

    #[test]
    fn point_scale_at_center_does_not_translate() {
        let mut transform = Transform::IDENTITY;
        transform.point_scale(2.0, CENTER, CENTER);
        assert_abs_diff_eq!(transform.translate.x, 0.0);
        assert_abs_diff_eq!(transform.translate.y, 0.0);
    }

    #[test]
    fn normalize_zeroes_vertical_pan_when_unzoomed() {
        let mut transform = Transform {
            scale: 1.0,
            translate: Vector::new(120.0, 45.0),
        };
        transform.normalize();
        assert_abs_diff_eq!(transform.translate.x, 120.0);
        assert_abs_diff_eq!(transform.translate.y, 0.0);

        let mut zoomed = Transform {
            scale: 2.0,
            translate: Vector::new(0.0, 45.0),
        };
        zoomed.normalize();
        assert_abs_diff_eq!(zoomed.translate.y, 45.0);
    }

    #[test]
    fn tween_lands_on_target() {
        let start = Instant::now();
        let from = Transform::IDENTITY;
        let to = Transform {
            scale: 2.0,
            translate: Vector::new(-80.0, 20.0),
        };
        let tween = TransformTween::new(from, to, start, Duration::from_millis(300), Easing::EaseOut);

        let settled = tween.sample(start + Duration::from_millis(300));
        assert_abs_diff_eq!(settled.scale, 2.0);
        assert_abs_diff_eq!(settled.translate.x, -80.0);
        assert!(tween.is_settled(start + Duration::from_millis(300)));
    }
}
