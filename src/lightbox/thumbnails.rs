// SPDX-License-Identifier: MPL-2.0
//! Thumbnail strip sub-component.
//!
//! Keeps the strip's scroll offset in sync with two competing masters: the
//! focused item (centered whenever focus changes) and the user (wheel or
//! horizontal drag, with momentum on release). While the user is scrolling,
//! thumbnail click-selection is suppressed; the flag is held for a short
//! period after a fling so the release tap does not select by accident.
//!
//! The orchestrator evaluates [`State::wants_load`] after every placement or
//! scroll update; that check is the sole trigger for window growth.

use crate::animation::{Animated, Easing};
use crate::config::{duration, strip};
use crate::lightbox::gesture::Pointer;
use crate::state::ScrollState;
use iced::mouse::ScrollDelta;
use std::time::Instant;

/// Pixels of strip travel per wheel "line" on line-based mice.
const WHEEL_LINE_PX: f32 = 60.0;

#[derive(Debug, Clone, Copy)]
struct Drag {
    pointer: Pointer,
    start_x: f32,
    last_x: f32,
    last_at: Instant,
    velocity: f32,
    /// Set once the pointer has traveled past the dead-zone.
    active: bool,
}

/// Messages for the thumbnail-strip sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Wheel input over the strip.
    Wheel { delta: ScrollDelta },
    /// A pointer went down over the strip.
    Pressed { pointer: Pointer, x: f32 },
    /// A captured pointer moved.
    Moved { pointer: Pointer, x: f32 },
    /// A captured pointer was released.
    Released { pointer: Pointer },
    /// The post-fling click-suppression period ended.
    HoldElapsed { generation: u64 },
}

/// Effects produced by strip scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// Schedule [`Message::HoldElapsed`] after the standard duration.
    StartHold { generation: u64 },
}

/// Thumbnail-strip sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    scroll: ScrollState,
    offset: Animated,
    widths: Vec<f32>,
    thumbnail_width: f32,
    drag: Option<Drag>,
    scrolling: bool,
    hold_generation: u64,
}

impl State {
    /// Creates an empty strip for thumbnails of the given default width.
    #[must_use]
    pub fn new(thumbnail_width: f32) -> Self {
        Self {
            scroll: ScrollState::new(0.0),
            offset: Animated::new(0.0),
            widths: Vec::new(),
            thumbnail_width,
            drag: None,
            scrolling: false,
            hold_generation: 0,
        }
    }

    /// Per-thumbnail widths in window order.
    #[must_use]
    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    /// Placement and clamp state, for the view.
    #[must_use]
    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    /// The visually presented scroll offset at `now`.
    #[must_use]
    pub fn presented_offset(&self, now: Instant) -> f32 {
        self.offset.present(now)
    }

    /// Whether this sub-component currently tracks `pointer`.
    #[must_use]
    pub fn owns(&self, pointer: Pointer) -> bool {
        self.drag.is_some_and(|drag| drag.pointer == pointer)
    }

    /// Whether the user is (or was just) scrolling; suppresses clicks.
    #[must_use]
    pub fn click_allowed(&self) -> bool {
        !self.scrolling
    }

    /// Whether the scroll offset is still easing at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.offset.is_animating(now)
    }

    /// Commits a finished scroll transition.
    pub fn settle(&mut self, now: Instant) {
        self.offset.settle(now);
    }

    /// Edge loads the strip currently asks for, judged against the committed
    /// offset: `(before, next)`.
    #[must_use]
    pub fn wants_load(&self) -> (bool, bool) {
        if !self.scroll.is_ready() {
            return (false, false);
        }
        let offset = self.scroll.scroll_offset;
        (
            self.scroll.wants_before(offset),
            self.scroll.wants_next(offset),
        )
    }

    /// Re-anchors the strip on a fresh window and centers `focus_index`
    /// without animation. Used on open and after a window reset.
    pub fn reset(&mut self, len: usize, focus_index: usize, viewport_width: f32, now: Instant) {
        self.widths = vec![self.thumbnail_width; len];
        self.scroll.viewport_width = viewport_width;
        self.scroll.rebuild(&self.widths);
        self.drag = None;
        self.scrolling = false;
        if self.scroll.is_ready() {
            let centered = self.scroll.centered_offset(&self.widths, focus_index);
            self.set_offset(centered, Easing::Instant, now);
        }
    }

    /// Accounts for `added` thumbnails materialized on an edge.
    pub fn extend(&mut self, prepended: bool, added: usize, now: Instant) {
        if added == 0 {
            return;
        }
        let new = vec![self.thumbnail_width; added];
        if prepended {
            self.scroll.apply_prepend(&new);
            self.widths.splice(0..0, new);
        } else {
            self.scroll.apply_append(&new);
            self.widths.extend(new);
        }
        // Placement changed shape; re-clamp unless the user is mid-gesture.
        if self.drag.is_none() && !self.offset.is_animating(now) {
            let clamped = self.scroll.clamp(self.scroll.scroll_offset);
            self.set_offset(clamped, Easing::Instant, now);
        }
    }

    /// Eases the strip so the thumbnail at `index` is centered. Called on
    /// focus changes that did not originate from user scrolling.
    pub fn center_on(&mut self, index: usize, now: Instant) {
        if !self.scroll.is_ready() || index >= self.widths.len() {
            return;
        }
        let centered = self.scroll.centered_offset(&self.widths, index);
        self.set_offset(centered, Easing::EaseOut, now);
    }

    /// Adjusts for a viewport resize: shift by half the width delta to keep
    /// the visual center, then re-clamp instantly.
    pub fn resized(&mut self, viewport_width: f32, now: Instant) {
        let shifted = self.scroll.resized(viewport_width);
        self.set_offset(shifted, Easing::Instant, now);
    }

    /// Handle a strip message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message, now: Instant) -> Effect {
        match msg {
            Message::Wheel { delta } => {
                let target = self.scroll.scroll_offset - wheel_pixels(&delta);
                self.set_offset(target, Easing::EaseOut, now);
                Effect::None
            }
            Message::Pressed { pointer, x } => {
                self.drag = Some(Drag {
                    pointer,
                    start_x: x,
                    last_x: x,
                    last_at: now,
                    velocity: 0.0,
                    active: false,
                });
                Effect::None
            }
            Message::Moved { pointer, x } => {
                let Some(drag) = self.drag.as_mut().filter(|d| d.pointer == pointer) else {
                    return Effect::None;
                };
                if !drag.active {
                    if (x - drag.start_x).abs() > strip::DRAG_DEAD_ZONE {
                        drag.active = true;
                        drag.last_x = x;
                        drag.last_at = now;
                        self.scrolling = true;
                    }
                    return Effect::None;
                }
                let dx = x - drag.last_x;
                let dt_ms = now
                    .saturating_duration_since(drag.last_at)
                    .as_secs_f32()
                    .max(0.001)
                    * 1000.0;
                drag.velocity = dx / dt_ms;
                drag.last_x = x;
                drag.last_at = now;
                let target = self.scroll.scroll_offset + dx;
                self.set_offset(target, Easing::Instant, now);
                Effect::None
            }
            Message::Released { pointer } => {
                let Some(drag) = self.drag.take_if(|d| d.pointer == pointer) else {
                    return Effect::None;
                };
                if !drag.active {
                    return Effect::None;
                }
                // Project the fling, clamp the destination, then ease there:
                // the animation never travels past the clamp bounds.
                let fling =
                    drag.velocity * duration::STANDARD.as_millis() as f32 * strip::MOMENTUM_FACTOR;
                let target = self.scroll.scroll_offset + fling;
                self.set_offset(target, Easing::EaseOut, now);

                self.hold_generation += 1;
                Effect::StartHold {
                    generation: self.hold_generation,
                }
            }
            Message::HoldElapsed { generation } => {
                if generation == self.hold_generation && self.drag.is_none() {
                    self.scrolling = false;
                }
                Effect::None
            }
        }
    }

    /// Single writer for the scroll offset: clamps, commits, and retargets
    /// the presentation in one step.
    fn set_offset(&mut self, target: f32, easing: Easing, now: Instant) {
        let clamped = self.scroll.clamp(target);
        self.scroll.scroll_offset = clamped;
        self.offset.set(clamped, duration::STANDARD, easing, now);
    }
}

fn wheel_pixels(delta: &ScrollDelta) -> f32 {
    match delta {
        ScrollDelta::Lines { y, .. } => *y * WHEEL_LINE_PX,
        ScrollDelta::Pixels { y, .. } => *y,
    }
}
