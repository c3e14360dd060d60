// SPDX-License-Identifier: MPL-2.0
//! Gesture sub-component: pan, pinch, wheel zoom, swipe, and click routing
//! for the focused element.
//!
//! The sub-component owns the interaction transform (the committed value a
//! synchronous read should see) plus its visual catch-up tween, and decides
//! on gesture end whether to commit to a neighbor, snap back, or settle into
//! a zoomed rest state. Navigation is only requested: the focus change
//! flows back through the host and re-enters as [`Message::Reset`].

use crate::animation::Easing;
use crate::config::{duration, zoom};
use crate::state::transform::{clamp_scale, Transform, TransformTween};
use iced::mouse::{self, ScrollDelta};
use iced::{Point, Size, Vector};
use std::time::Instant;

/// A device-level pointer identity, stable for the duration of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    /// The mouse cursor (at most one).
    Mouse,
    /// One touch contact.
    Finger(iced::touch::Finger),
}

impl Pointer {
    /// Touch pointers pan at any scale; the mouse only pans while zoomed.
    #[must_use]
    pub fn is_touch(self) -> bool {
        matches!(self, Pointer::Finger(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct ActivePointer {
    pointer: Pointer,
    position: Point,
    pressed_at: Point,
}

/// Per-update context the orchestrator computes for the gesture engine.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub now: Instant,
    /// Full viewport size; swipe thresholds and click thirds derive from it.
    pub viewport: Size,
    /// Center of the element area, the anchor-algorithm origin.
    pub center: Point,
    /// Whether a materialized neighbor exists before the focus.
    pub has_before: bool,
    /// Whether a materialized neighbor exists after the focus.
    pub has_next: bool,
}

/// Messages for the gesture sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A pointer went down over the element area.
    Pressed { pointer: Pointer, position: Point },
    /// A captured pointer moved.
    Moved { pointer: Pointer, position: Point },
    /// A captured pointer was released (or lost).
    Released { pointer: Pointer, position: Point },
    /// Wheel input over the element area.
    Wheel { delta: ScrollDelta, position: Point },
    /// The wheel quiet-period timer fired.
    DebounceElapsed { generation: u64 },
    /// The external focus changed; ease back to identity.
    Reset,
}

/// Effects produced by gesture handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// Request navigation to the previous window item.
    SelectBefore,
    /// Request navigation to the next window item.
    SelectNext,
    /// Schedule [`Message::DebounceElapsed`] after the wheel quiet period.
    StartDebounce { generation: u64 },
}

/// Gesture sub-component state.
#[derive(Debug, Clone, Default)]
pub struct State {
    transform: Transform,
    animation: Option<TransformTween>,
    zooming: bool,
    pointers: Vec<ActivePointer>,
    pinch_distance: f32,
    last_click: Option<Instant>,
    debounce_generation: u64,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed transform (what the next synchronous read sees).
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The visually presented transform at `now`.
    #[must_use]
    pub fn presented(&self, now: Instant) -> Transform {
        match &self.animation {
            Some(tween) => tween.sample(now),
            None => self.transform,
        }
    }

    /// Whether the viewer is in (or transitioning through) a zoomed state.
    /// Gates neighbor previews and the thumbnail strip.
    #[must_use]
    pub fn zooming(&self) -> bool {
        self.zooming
    }

    /// Whether this sub-component currently tracks `pointer`.
    #[must_use]
    pub fn owns(&self, pointer: Pointer) -> bool {
        self.pointers.iter().any(|p| p.pointer == pointer)
    }

    /// Whether a transform transition is still running at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation.is_some_and(|tween| !tween.is_settled(now))
    }

    /// Drops a finished transition; the committed value already holds.
    pub fn settle(&mut self, now: Instant) {
        if self.animation.is_some_and(|tween| tween.is_settled(now)) {
            self.animation = None;
        }
    }

    /// The cursor shape the element area should show.
    #[must_use]
    pub fn mouse_interaction(&self) -> mouse::Interaction {
        if self.owns(Pointer::Mouse) && self.transform.scale > 1.0 {
            mouse::Interaction::Grabbing
        } else if self.zooming {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::None
        }
    }

    /// Handle a gesture message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message, ctx: &Context) -> Effect {
        match msg {
            Message::Pressed { pointer, position } => {
                self.pointers.retain(|p| p.pointer != pointer);
                self.pointers.push(ActivePointer {
                    pointer,
                    position,
                    pressed_at: position,
                });
                self.refresh_pinch_baseline();
                Effect::None
            }
            Message::Moved { pointer, position } => self.handle_move(pointer, position, ctx),
            Message::Released { pointer, position } => self.handle_release(pointer, position, ctx),
            Message::Wheel { delta, position } => self.handle_wheel(delta, position, ctx),
            Message::DebounceElapsed { generation } => {
                if generation == self.debounce_generation && self.transform.scale <= 1.0 {
                    self.zooming = false;
                    self.animate_to(
                        Transform::IDENTITY,
                        Easing::EaseOut,
                        ctx.now,
                    );
                }
                Effect::None
            }
            Message::Reset => {
                self.pointers.clear();
                self.zooming = false;
                self.last_click = None;
                self.animate_to(Transform::IDENTITY, Easing::EaseOut, ctx.now);
                Effect::None
            }
        }
    }

    fn handle_move(&mut self, pointer: Pointer, position: Point, ctx: &Context) -> Effect {
        let count = self.pointers.len();
        let Some(entry) = self.pointers.iter_mut().find(|p| p.pointer == pointer) else {
            return Effect::None;
        };
        let delta = Vector::new(position.x - entry.position.x, position.y - entry.position.y);
        entry.position = position;

        // A live gesture frame supersedes any in-flight transition.
        self.animation = None;

        if pointer.is_touch() || self.transform.scale > 1.0 {
            self.transform.translate.x += delta.x / count as f32;
            self.transform.translate.y += delta.y / count as f32;
        }

        if count == 2 {
            let (a, b) = (self.pointers[0].position, self.pointers[1].position);
            let distance = a.distance(b);
            if self.pinch_distance > 0.0 && distance > 0.0 {
                let composed = self.transform.scale * (distance / self.pinch_distance);
                if composed > 1.0 {
                    self.zooming = true;
                }
                let midpoint = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
                self.transform
                    .point_scale(clamp_scale(composed), midpoint, ctx.center);
            }
            self.pinch_distance = distance;
        }

        self.transform.normalize();
        Effect::None
    }

    fn handle_release(&mut self, pointer: Pointer, position: Point, ctx: &Context) -> Effect {
        let Some(index) = self.pointers.iter().position(|p| p.pointer == pointer) else {
            return Effect::None;
        };
        let released = self.pointers.remove(index);
        self.refresh_pinch_baseline();

        if !self.pointers.is_empty() {
            return Effect::None;
        }

        // A press/release pair that barely traveled is a click, not a swipe.
        let travel = position.distance(released.pressed_at);
        if travel < zoom::CLICK_SLOP {
            let click = self.handle_click(position, ctx);
            if click != Effect::None {
                return click;
            }
        }

        if self.transform.scale < 1.0 {
            // An under-1x rest state does not exist; ease home whether or
            // not the pinch ever crossed the zoom threshold.
            self.zooming = false;
            self.animate_to(Transform::IDENTITY, Easing::EaseInOut, ctx.now);
        } else if !self.zooming && pointer.is_touch() {
            let threshold = ctx.viewport.width / zoom::SWIPE_COMMIT_DIVISOR;
            if self.transform.translate.x > threshold && ctx.has_before {
                return Effect::SelectBefore;
            }
            if self.transform.translate.x < -threshold && ctx.has_next {
                return Effect::SelectNext;
            }
            let target = Transform {
                translate: Vector::new(0.0, 0.0),
                ..self.transform
            };
            self.animate_to(target, Easing::EaseOut, ctx.now);
        }
        Effect::None
    }

    fn handle_wheel(&mut self, delta: ScrollDelta, position: Point, ctx: &Context) -> Effect {
        let steps = scroll_steps(&delta);
        if steps.abs() < f32::EPSILON {
            return Effect::None;
        }

        let composed = self.transform.scale + steps * zoom::WHEEL_SCALE_STEP;
        if composed > 1.0 {
            self.zooming = true;
        }

        let mut target = self.transform;
        target.point_scale(clamp_scale(composed), position, ctx.center);
        target.normalize();
        self.animate_to(target, Easing::EaseOut, ctx.now);

        self.debounce_generation += 1;
        Effect::StartDebounce {
            generation: self.debounce_generation,
        }
    }

    fn handle_click(&mut self, position: Point, ctx: &Context) -> Effect {
        let is_double = self
            .last_click
            .is_some_and(|t| ctx.now.saturating_duration_since(t) < zoom::DOUBLE_CLICK_THRESHOLD);

        if is_double {
            self.last_click = None; // reset to avoid triple-click
            return self.handle_double_click(position, ctx);
        }
        self.last_click = Some(ctx.now);

        // Click-to-navigate only exists at rest: right third advances, left
        // third goes back, the middle third is inert (and reserved for
        // double-click zoom).
        if self.transform.scale == 1.0 {
            if position.x > ctx.viewport.width / 3.0 * 2.0 && ctx.has_next {
                return Effect::SelectNext;
            }
            if position.x < ctx.viewport.width / 3.0 && ctx.has_before {
                return Effect::SelectBefore;
            }
        }
        Effect::None
    }

    fn handle_double_click(&mut self, position: Point, ctx: &Context) -> Effect {
        if self.transform.scale != 1.0 {
            self.zooming = false;
            self.animate_to(Transform::IDENTITY, Easing::EaseInOut, ctx.now);
        } else if position.x > ctx.viewport.width / 3.0
            && position.x < ctx.viewport.width / 3.0 * 2.0
        {
            self.zooming = true;
            let mut target = self.transform;
            target.point_scale(zoom::DOUBLE_TAP_SCALE, position, ctx.center);
            target.normalize();
            self.animate_to(target, Easing::EaseInOut, ctx.now);
        }
        Effect::None
    }

    /// Records the current two-pointer distance so the next pinch frame has
    /// a valid ratio baseline. Called whenever the pointer set changes.
    fn refresh_pinch_baseline(&mut self) {
        self.pinch_distance = if self.pointers.len() == 2 {
            self.pointers[0].position.distance(self.pointers[1].position)
        } else {
            0.0
        };
    }

    fn animate_to(&mut self, target: Transform, easing: Easing, now: Instant) {
        let from = self.presented(now);
        self.transform = target;
        self.animation = Some(TransformTween::new(
            from,
            target,
            now,
            duration::STANDARD,
            easing,
        ));
    }
}

/// Normalizes mouse wheel units (lines vs. pixels) into our abstract step
/// values so zooming feels consistent across platforms.
fn scroll_steps(delta: &ScrollDelta) -> f32 {
    match delta {
        ScrollDelta::Lines { y, .. } => *y,
        ScrollDelta::Pixels { y, .. } => *y / 120.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use iced::touch::Finger;
    use std::time::Duration;

    fn ctx(now: Instant) -> Context {
        Context {
            now,
            viewport: Size::new(1000.0, 800.0),
            center: Point::new(500.0, 350.0),
            has_before: true,
            has_next: true,
        }
    }

    fn finger(id: u64) -> Pointer {
        Pointer::Finger(Finger(id))
    }

    fn drag(state: &mut State, pointer: Pointer, from: Point, to: Point, ctx: &Context) -> Effect {
        state.handle(
            Message::Pressed {
                pointer,
                position: from,
            },
            ctx,
        );
        state.handle(
            Message::Moved {
                pointer,
                position: to,
            },
            ctx,
        );
        state.handle(
            Message::Released {
                pointer,
                position: to,
            },
            ctx,
        )
    }

    #[test]
    fn swipe_past_threshold_commits_to_neighbor() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();

        // +150px on a 1000px viewport clears the 100px threshold.
        let effect = drag(
            &mut state,
            finger(1),
            Point::new(400.0, 300.0),
            Point::new(550.0, 300.0),
            &ctx,
        );
        assert_eq!(effect, Effect::SelectBefore);

        // The host confirms the focus change; the transform eases home.
        state.handle(Message::Reset, &ctx);
        assert!(state.transform().is_identity());
        assert!(state.is_animating(now));
    }

    #[test]
    fn swipe_below_threshold_snaps_back() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();

        let effect = drag(
            &mut state,
            finger(1),
            Point::new(400.0, 300.0),
            Point::new(450.0, 300.0),
            &ctx,
        );
        assert_eq!(effect, Effect::None);
        assert_abs_diff_eq!(state.transform().translate.x, 0.0);
        // Mid-flight the presented translation is still easing home.
        assert!(state.is_animating(now + Duration::from_millis(100)));
        assert_abs_diff_eq!(
            state.presented(now + Duration::from_millis(300)).translate.x,
            0.0
        );
    }

    #[test]
    fn swipe_at_window_edge_is_not_committed() {
        let now = Instant::now();
        let mut ctx = ctx(now);
        ctx.has_before = false;
        let mut state = State::new();

        let effect = drag(
            &mut state,
            finger(1),
            Point::new(400.0, 300.0),
            Point::new(600.0, 300.0),
            &ctx,
        );
        // Past the threshold, but nothing is materialized before the focus.
        assert_eq!(effect, Effect::None);
        assert_abs_diff_eq!(state.transform().translate.x, 0.0);
    }

    #[test]
    fn mouse_drag_does_not_pan_at_rest() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();

        drag(
            &mut state,
            Pointer::Mouse,
            Point::new(400.0, 300.0),
            Point::new(550.0, 300.0),
            &ctx,
        );
        assert_abs_diff_eq!(state.transform().translate.x, 0.0);
    }

    #[test]
    fn pinch_ending_below_one_eases_to_identity() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();

        // Two fingers 200px apart, pinched to 140px: composed scale 0.7.
        state.handle(
            Message::Pressed {
                pointer: finger(1),
                position: Point::new(400.0, 350.0),
            },
            &ctx,
        );
        state.handle(
            Message::Pressed {
                pointer: finger(2),
                position: Point::new(600.0, 350.0),
            },
            &ctx,
        );
        state.handle(
            Message::Moved {
                pointer: finger(1),
                position: Point::new(430.0, 350.0),
            },
            &ctx,
        );
        state.handle(
            Message::Moved {
                pointer: finger(2),
                position: Point::new(570.0, 350.0),
            },
            &ctx,
        );
        assert_abs_diff_eq!(state.transform().scale, 0.7, epsilon = 1e-3);

        state.handle(
            Message::Released {
                pointer: finger(1),
                position: Point::new(430.0, 350.0),
            },
            &ctx,
        );
        let effect = state.handle(
            Message::Released {
                pointer: finger(2),
                position: Point::new(570.0, 350.0),
            },
            &ctx,
        );
        assert_eq!(effect, Effect::None);
        assert!(!state.zooming());
        assert!(state.transform().is_identity());
        let settled = state.presented(now + Duration::from_millis(300));
        assert_abs_diff_eq!(settled.scale, 1.0);
        assert_abs_diff_eq!(settled.translate.x, 0.0);
        assert_abs_diff_eq!(settled.translate.y, 0.0);
    }

    #[test]
    fn pinch_outward_sets_zooming() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();

        state.handle(
            Message::Pressed {
                pointer: finger(1),
                position: Point::new(450.0, 350.0),
            },
            &ctx,
        );
        state.handle(
            Message::Pressed {
                pointer: finger(2),
                position: Point::new(550.0, 350.0),
            },
            &ctx,
        );
        state.handle(
            Message::Moved {
                pointer: finger(2),
                position: Point::new(650.0, 350.0),
            },
            &ctx,
        );
        assert!(state.zooming());
        assert!(state.transform().scale > 1.0);
    }

    #[test]
    fn double_click_in_middle_third_zooms_at_point() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();
        let tap = Point::new(520.0, 300.0);

        drag(&mut state, Pointer::Mouse, tap, tap, &ctx);
        drag(&mut state, Pointer::Mouse, tap, tap, &ctx);

        assert!(state.zooming());
        assert_abs_diff_eq!(state.transform().scale, zoom::DOUBLE_TAP_SCALE);
        // The tapped point stays fixed across the scale change.
        let transform = state.transform();
        let pre_x = (tap.x - ctx.center.x) / 1.0;
        let on_screen = ctx.center.x + transform.translate.x + pre_x * transform.scale;
        assert_abs_diff_eq!(on_screen, tap.x, epsilon = 1e-3);

        // A second double-click anywhere returns to identity.
        let elsewhere = Point::new(800.0, 300.0);
        drag(&mut state, Pointer::Mouse, elsewhere, elsewhere, &ctx);
        drag(&mut state, Pointer::Mouse, elsewhere, elsewhere, &ctx);
        assert!(!state.zooming());
        assert!(state.transform().is_identity());
    }

    #[test]
    fn single_click_thirds_navigate_at_rest() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();

        let right = Point::new(900.0, 300.0);
        assert_eq!(
            drag(&mut state, Pointer::Mouse, right, right, &ctx),
            Effect::SelectNext
        );

        let mut state = State::new();
        let left = Point::new(100.0, 300.0);
        assert_eq!(
            drag(&mut state, Pointer::Mouse, left, left, &ctx),
            Effect::SelectBefore
        );

        let mut state = State::new();
        let middle = Point::new(500.0, 300.0);
        assert_eq!(
            drag(&mut state, Pointer::Mouse, middle, middle, &ctx),
            Effect::None
        );
    }

    #[test]
    fn wheel_zoom_sets_zooming_and_schedules_debounce() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();

        let effect = state.handle(
            Message::Wheel {
                delta: ScrollDelta::Lines { x: 0.0, y: 1.0 },
                position: Point::new(640.0, 280.0),
            },
            &ctx,
        );
        assert_eq!(effect, Effect::StartDebounce { generation: 1 });
        assert!(state.zooming());
        assert!(state.transform().scale > 1.0);

        // Newer wheel input supersedes the pending quiet-period timer.
        let effect = state.handle(
            Message::Wheel {
                delta: ScrollDelta::Lines { x: 0.0, y: -3.0 },
                position: Point::new(640.0, 280.0),
            },
            &ctx,
        );
        assert_eq!(effect, Effect::StartDebounce { generation: 2 });
        state.handle(Message::DebounceElapsed { generation: 1 }, &ctx);
        // Stale timer: zooming unchanged even though scale fell below 1.
        assert!(state.zooming());
        state.handle(Message::DebounceElapsed { generation: 2 }, &ctx);
        assert!(!state.zooming());
        assert!(state.transform().is_identity());
    }

    #[test]
    fn wheel_below_identity_debounces_back() {
        let now = Instant::now();
        let ctx = ctx(now);
        let mut state = State::new();

        let effect = state.handle(
            Message::Wheel {
                delta: ScrollDelta::Lines { x: 0.0, y: -2.0 },
                position: Point::new(500.0, 350.0),
            },
            &ctx,
        );
        let Effect::StartDebounce { generation } = effect else {
            panic!("expected a debounce request");
        };
        assert!(state.transform().scale < 1.0);

        state.handle(Message::DebounceElapsed { generation }, &ctx);
        assert!(state.transform().is_identity());
        assert!(!state.zooming());
    }
}
