// SPDX-License-Identifier: MPL-2.0
//! Lightbox component encapsulating state and update logic.
//!
//! The component follows the host-owned-focus model: it never changes the
//! focused item itself, it only emits [`Effect::FocusChanged`]. The host
//! applies the change to its own state and calls [`Lightbox::sync`], which
//! is also where a focus value that is missing from the materialized window
//! triggers the full window reset.

pub mod gesture;
pub mod thumbnails;
mod view;

pub use gesture::Pointer;

use crate::adapter::LightboxAdapter;
use crate::animation::{Animated, Easing};
use crate::config::{duration, zoom, LightboxConfig};
use crate::error::Result;
use crate::state::{Edge, ElementWindow};
use iced::widget::{operation, Id};
use iced::widget::scrollable::RelativeOffset;
use iced::{event, keyboard, mouse, touch, window, Element, Event, Point, Rectangle, Size,
    Subscription, Task};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Identifier of the thumbnail strip scrollable widget.
pub const STRIP_SCROLLABLE_ID: &str = "lightbox-thumbnail-strip";

/// Messages emitted by the lightbox and its widgets.
#[derive(Debug, Clone)]
pub enum Message<T> {
    /// A native event forwarded by the runtime subscription.
    RawEvent(Event),
    /// Animation frame while any transition is in flight.
    Tick(Instant),
    /// The focused element's visual reported being ready.
    ElementLoaded,
    /// A neighbor preview or thumbnail visual reported being ready.
    /// Previews need no entrance choreography, so this is informational.
    NeighborLoaded,
    /// A strip thumbnail was clicked.
    ThumbnailClicked(T),
    /// The close button was pressed.
    CloseRequested,
    /// The on-screen next button was pressed.
    NavigateNext,
    /// The on-screen previous button was pressed.
    NavigateBefore,
    /// An edge load completed. `generation` identifies the window instance
    /// the load was started for; stale completions are dropped.
    ElementsLoaded {
        edge: Edge,
        generation: u64,
        batch: Result<Vec<T>>,
    },
    /// The wheel-zoom quiet period elapsed.
    ZoomHoldElapsed { generation: u64 },
    /// The post-fling click-suppression period elapsed.
    ScrollHoldElapsed { generation: u64 },
}

/// Side effects the host application should perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<T> {
    /// No effect.
    None,
    /// The user asked to close the viewer (Escape, close button). The host
    /// owns `open` and should sync with `open = false`.
    CloseRequested,
    /// The viewer wants to focus another item. The host owns the focus and
    /// should sync with the new value.
    FocusChanged(T),
}

/// Lifecycle phase of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Closed,
    Open,
}

/// Lightbox component state.
pub struct Lightbox<A: LightboxAdapter> {
    adapter: Arc<A>,
    config: LightboxConfig,
    phase: Phase,
    focus: A::Item,
    window: ElementWindow<A::Item>,
    gesture: gesture::State,
    thumbnails: thumbnails::State,
    viewport: Size,
    cursor_position: Option<Point>,
    /// Set once any touch input is seen; hides the desktop nav buttons.
    touch_session: bool,
    /// Backdrop opacity factor, 0 (closed) to 1 (mounted).
    backdrop: Animated,
    /// Entering/exiting morph progress, 0 (at origin) to 1 (in place).
    morph: Animated,
    /// Host-supplied rectangle of the originating element, if any.
    origin: Option<Rectangle>,
    /// Content-ready: the focused element has loaded since the last open.
    ready: bool,
    entrance_played: bool,
    load_generation: u64,
}

impl<A: LightboxAdapter> Lightbox<A> {
    /// Creates a closed lightbox around `focus`.
    pub fn new(adapter: Arc<A>, focus: A::Item) -> Self {
        Self::with_config(adapter, focus, LightboxConfig::default())
    }

    /// Creates a closed lightbox with explicit settings.
    pub fn with_config(adapter: Arc<A>, focus: A::Item, config: LightboxConfig) -> Self {
        let thumbnail_width = config.thumbnail_width();
        Self {
            adapter,
            config,
            phase: Phase::Closed,
            window: ElementWindow::new(focus.clone()),
            focus,
            gesture: gesture::State::new(),
            thumbnails: thumbnails::State::new(thumbnail_width),
            viewport: Size::ZERO,
            cursor_position: None,
            touch_session: false,
            backdrop: Animated::new(0.0),
            morph: Animated::new(0.0),
            origin: None,
            ready: false,
            entrance_played: false,
            load_generation: 0,
        }
    }

    /// Whether the overlay is mounted.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// The focus value the component currently mirrors.
    #[must_use]
    pub fn focus(&self) -> &A::Item {
        &self.focus
    }

    /// The materialized window, for inspection.
    #[must_use]
    pub fn window(&self) -> &ElementWindow<A::Item> {
        &self.window
    }

    /// Whether the viewer is in a zoomed state (neighbor previews and the
    /// thumbnail strip are hidden).
    #[must_use]
    pub fn zooming(&self) -> bool {
        self.gesture.zooming()
    }

    /// Supplies the screen rectangle of the element the viewer visually
    /// originates from (and returns to on close).
    pub fn set_origin(&mut self, origin: Option<Rectangle>) {
        self.origin = origin;
    }

    /// Informs the component of the viewport size when the host knows it
    /// ahead of the first resize event.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
        let now = Instant::now();
        if !self.thumbnails.scroll_state().is_ready() {
            self.rebuild_strip(now);
        } else {
            self.thumbnails.resized(size.width, now);
        }
    }

    /// Reconciles the component against the host-owned props.
    ///
    /// Call this whenever `open` or the focus value may have changed, in
    /// particular after applying an [`Effect::FocusChanged`]. If the focus
    /// is not found in the window, the window collapses to `[focus]` and
    /// both edges are re-armed.
    pub fn sync(&mut self, open: bool, focus: A::Item) -> Task<Message<A::Item>> {
        let now = Instant::now();

        match (self.phase, open) {
            (Phase::Closed, true) => self.open_viewer(focus.clone(), now),
            (Phase::Open, false) => self.close_viewer(now),
            _ => {}
        }

        if self.phase != Phase::Open {
            self.focus = focus;
            return Task::none();
        }

        if self.window.index_of(&focus).is_none() {
            // Discontinuity: the host jumped somewhere outside the window.
            self.focus = focus.clone();
            self.reset_window(focus, now);
        } else if self.focus != focus {
            self.focus = focus;
            self.gesture
                .handle(gesture::Message::Reset, &self.gesture_context(now));
            if let Some(index) = self.window.index_of(&self.focus) {
                self.thumbnails.center_on(index, now);
            }
        }

        Task::batch([self.maybe_load_more(), self.strip_sync_task(now)])
    }

    /// Handle a lightbox message.
    pub fn update(&mut self, message: Message<A::Item>) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        match message {
            Message::RawEvent(event) => self.handle_raw_event(event),
            Message::Tick(now) => {
                self.gesture.settle(now);
                self.thumbnails.settle(now);
                self.backdrop.settle(now);
                self.morph.settle(now);
                (Effect::None, self.strip_sync_task(now))
            }
            Message::ElementLoaded => {
                let now = Instant::now();
                if self.phase == Phase::Open && !self.entrance_played {
                    self.entrance_played = true;
                    self.ready = true;
                    self.morph
                        .set(1.0, duration::COMPLEX, Easing::EaseOut, now);
                }
                (Effect::None, Task::none())
            }
            Message::NeighborLoaded => (Effect::None, Task::none()),
            Message::ThumbnailClicked(item) => {
                if self.thumbnails.click_allowed() && item != self.focus {
                    (Effect::FocusChanged(item), Task::none())
                } else {
                    (Effect::None, Task::none())
                }
            }
            Message::CloseRequested => (Effect::CloseRequested, Task::none()),
            Message::NavigateNext => (self.select_next(), Task::none()),
            Message::NavigateBefore => (self.select_before(), Task::none()),
            Message::ElementsLoaded {
                edge,
                generation,
                batch,
            } => self.handle_elements_loaded(edge, generation, batch),
            Message::ZoomHoldElapsed { generation } => {
                let now = Instant::now();
                let ctx = self.gesture_context(now);
                self.gesture
                    .handle(gesture::Message::DebounceElapsed { generation }, &ctx);
                (Effect::None, Task::none())
            }
            Message::ScrollHoldElapsed { generation } => {
                let now = Instant::now();
                self.thumbnails
                    .handle(thumbnails::Message::HoldElapsed { generation }, now);
                (Effect::None, Task::none())
            }
        }
    }

    /// Event and animation subscriptions for the current state.
    pub fn subscription(&self) -> Subscription<Message<A::Item>> {
        if self.phase != Phase::Open {
            return Subscription::none();
        }

        let events = event::listen().map(Message::RawEvent);

        let now = Instant::now();
        let frames = if self.is_animating(now) {
            iced::time::every(Duration::from_millis(16)).map(Message::Tick)
        } else {
            Subscription::none()
        };

        Subscription::batch([events, frames])
    }

    /// Renders the overlay. Returns an empty element while closed.
    pub fn view(&self) -> Element<'_, Message<A::Item>> {
        view::view(self)
    }

    fn is_animating(&self, now: Instant) -> bool {
        self.gesture.is_animating(now)
            || self.thumbnails.is_animating(now)
            || self.backdrop.is_animating(now)
            || self.morph.is_animating(now)
    }

    fn open_viewer(&mut self, focus: A::Item, now: Instant) {
        self.phase = Phase::Open;
        self.focus = focus.clone();
        self.ready = false;
        self.entrance_played = false;
        self.touch_session = false;
        self.backdrop
            .set(1.0, duration::ENTERING, Easing::EaseOut, now);
        self.morph = Animated::new(0.0);
        self.reset_window(focus, now);
    }

    fn close_viewer(&mut self, now: Instant) {
        self.phase = Phase::Closed;
        self.ready = false;
        self.backdrop
            .set(0.0, duration::LEAVING, Easing::EaseOut, now);
        self.morph.set(0.0, duration::SHORT, Easing::EaseOut, now);
        self.cursor_position = None;
    }

    /// The full reset: window collapses to the focus singleton, both edges
    /// re-arm, gesture and strip state restart from scratch. In-flight load
    /// completions are orphaned by the generation bump.
    fn reset_window(&mut self, focus: A::Item, now: Instant) {
        self.load_generation += 1;
        self.window.reset(focus);
        self.gesture = gesture::State::new();
        self.rebuild_strip(now);
        debug_assert!(
            self.window.contains(&self.focus),
            "window reset must seed the focus"
        );
    }

    fn rebuild_strip(&mut self, now: Instant) {
        let focus_index = self.window.index_of(&self.focus).unwrap_or(0);
        self.thumbnails
            .reset(self.window.len(), focus_index, self.viewport.width, now);
    }

    fn handle_elements_loaded(
        &mut self,
        edge: Edge,
        generation: u64,
        batch: Result<Vec<A::Item>>,
    ) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        let now = Instant::now();
        if generation != self.load_generation {
            // The window was reset while this load was in flight.
            return (Effect::None, Task::none());
        }
        match batch {
            Ok(items) => {
                let added = self.window.finish_load(edge, items);
                self.thumbnails.extend(edge == Edge::Before, added, now);
            }
            Err(error) => self.window.fail_load(edge, &error),
        }
        (
            Effect::None,
            Task::batch([self.maybe_load_more(), self.strip_sync_task(now)]),
        )
    }

    /// Evaluates the strip's edge triggers and claims any edge that both
    /// wants more and is free. Safe to call every update: the window's
    /// loading flags coalesce repeated triggers into one request per edge.
    fn maybe_load_more(&mut self) -> Task<Message<A::Item>> {
        if self.phase != Phase::Open {
            return Task::none();
        }
        let (before, next) = self.thumbnails.wants_load();
        let mut tasks = Vec::new();
        if before {
            tasks.push(self.spawn_load(Edge::Before));
        }
        if next {
            tasks.push(self.spawn_load(Edge::Next));
        }
        Task::batch(tasks)
    }

    fn spawn_load(&mut self, edge: Edge) -> Task<Message<A::Item>> {
        let Some(pivot) = self.window.begin_load(edge) else {
            return Task::none();
        };
        let future = match edge {
            Edge::Before => self.adapter.load_elements_before(pivot),
            Edge::Next => self.adapter.load_elements_next(pivot),
        };
        let generation = self.load_generation;
        Task::perform(future, move |batch| Message::ElementsLoaded {
            edge,
            generation,
            batch,
        })
    }

    fn select_before(&self) -> Effect<A::Item> {
        match self.window.before(&self.focus) {
            Some(item) => Effect::FocusChanged(item.clone()),
            None => Effect::None,
        }
    }

    fn select_next(&self) -> Effect<A::Item> {
        match self.window.next(&self.focus) {
            Some(item) => Effect::FocusChanged(item.clone()),
            None => Effect::None,
        }
    }

    fn handle_raw_event(&mut self, event: Event) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        if self.phase != Phase::Open {
            return (Effect::None, Task::none());
        }
        let now = Instant::now();

        match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => {
                    (Effect::CloseRequested, Task::none())
                }
                keyboard::Key::Named(
                    keyboard::key::Named::ArrowLeft | keyboard::key::Named::ArrowUp,
                ) => (self.select_before(), Task::none()),
                keyboard::Key::Named(
                    keyboard::key::Named::ArrowRight | keyboard::key::Named::ArrowDown,
                ) => (self.select_next(), Task::none()),
                _ => (Effect::None, Task::none()),
            },
            Event::Window(window::Event::Resized(size)) => {
                self.viewport = size;
                if self.thumbnails.scroll_state().is_ready() {
                    self.thumbnails.resized(size.width, now);
                } else {
                    // First layout metrics: placement becomes computable.
                    self.rebuild_strip(now);
                }
                (
                    Effect::None,
                    Task::batch([self.maybe_load_more(), self.strip_sync_task(now)]),
                )
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event, now),
            Event::Touch(touch_event) => {
                self.touch_session = true;
                self.handle_touch_event(touch_event, now)
            }
            _ => (Effect::None, Task::none()),
        }
    }

    fn handle_mouse_event(
        &mut self,
        event: mouse::Event,
        now: Instant,
    ) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        match event {
            mouse::Event::CursorMoved { position } => {
                self.cursor_position = Some(position);
                self.pointer_moved(Pointer::Mouse, position, now)
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let Some(position) = self.cursor_position else {
                    return (Effect::None, Task::none());
                };
                self.pointer_pressed(Pointer::Mouse, position, now)
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                let position = self.cursor_position.unwrap_or(Point::ORIGIN);
                self.pointer_released(Pointer::Mouse, position, now)
            }
            mouse::Event::CursorLeft => {
                // The release may never arrive; end any mouse gesture here.
                let position = self.cursor_position.take().unwrap_or(Point::ORIGIN);
                self.pointer_released(Pointer::Mouse, position, now)
            }
            mouse::Event::WheelScrolled { delta } => {
                let Some(position) = self.cursor_position else {
                    return (Effect::None, Task::none());
                };
                if self.in_strip(position) {
                    self.thumbnails
                        .handle(thumbnails::Message::Wheel { delta }, now);
                    (
                        Effect::None,
                        Task::batch([self.maybe_load_more(), self.strip_sync_task(now)]),
                    )
                } else {
                    let effect = self.gesture.handle(
                        gesture::Message::Wheel { delta, position },
                        &self.gesture_context(now),
                    );
                    self.apply_gesture_effect(effect)
                }
            }
            _ => (Effect::None, Task::none()),
        }
    }

    fn handle_touch_event(
        &mut self,
        event: touch::Event,
        now: Instant,
    ) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        match event {
            touch::Event::FingerPressed { id, position } => {
                self.pointer_pressed(Pointer::Finger(id), position, now)
            }
            touch::Event::FingerMoved { id, position } => {
                self.pointer_moved(Pointer::Finger(id), position, now)
            }
            touch::Event::FingerLifted { id, position }
            | touch::Event::FingerLost { id, position } => {
                self.pointer_released(Pointer::Finger(id), position, now)
            }
        }
    }

    /// Routes a fresh pointer to the strip or the element area by position.
    fn pointer_pressed(
        &mut self,
        pointer: Pointer,
        position: Point,
        now: Instant,
    ) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        if self.in_strip(position) {
            self.thumbnails.handle(
                thumbnails::Message::Pressed {
                    pointer,
                    x: position.x,
                },
                now,
            );
            (Effect::None, Task::none())
        } else {
            let ctx = self.gesture_context(now);
            let effect = self
                .gesture
                .handle(gesture::Message::Pressed { pointer, position }, &ctx);
            self.apply_gesture_effect(effect)
        }
    }

    fn pointer_moved(
        &mut self,
        pointer: Pointer,
        position: Point,
        now: Instant,
    ) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        if self.thumbnails.owns(pointer) {
            self.thumbnails.handle(
                thumbnails::Message::Moved {
                    pointer,
                    x: position.x,
                },
                now,
            );
            return (
                Effect::None,
                Task::batch([self.maybe_load_more(), self.strip_sync_task(now)]),
            );
        }
        if self.gesture.owns(pointer) {
            let ctx = self.gesture_context(now);
            let effect = self
                .gesture
                .handle(gesture::Message::Moved { pointer, position }, &ctx);
            return self.apply_gesture_effect(effect);
        }
        (Effect::None, Task::none())
    }

    fn pointer_released(
        &mut self,
        pointer: Pointer,
        position: Point,
        now: Instant,
    ) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        if self.thumbnails.owns(pointer) {
            let effect = self
                .thumbnails
                .handle(thumbnails::Message::Released { pointer }, now);
            let hold = match effect {
                thumbnails::Effect::StartHold { generation } => Task::perform(
                    tokio::time::sleep(self.config.scroll_hold()),
                    move |()| Message::ScrollHoldElapsed { generation },
                ),
                thumbnails::Effect::None => Task::none(),
            };
            return (
                Effect::None,
                Task::batch([hold, self.maybe_load_more(), self.strip_sync_task(now)]),
            );
        }
        if self.gesture.owns(pointer) {
            let ctx = self.gesture_context(now);
            let effect = self
                .gesture
                .handle(gesture::Message::Released { pointer, position }, &ctx);
            return self.apply_gesture_effect(effect);
        }
        (Effect::None, Task::none())
    }

    fn apply_gesture_effect(
        &mut self,
        effect: gesture::Effect,
    ) -> (Effect<A::Item>, Task<Message<A::Item>>) {
        match effect {
            gesture::Effect::None => (Effect::None, Task::none()),
            gesture::Effect::SelectBefore => (self.select_before(), Task::none()),
            gesture::Effect::SelectNext => (self.select_next(), Task::none()),
            gesture::Effect::StartDebounce { generation } => (
                Effect::None,
                Task::perform(tokio::time::sleep(zoom::RESET_DEBOUNCE), move |()| {
                    Message::ZoomHoldElapsed { generation }
                }),
            ),
        }
    }

    fn gesture_context(&self, now: Instant) -> gesture::Context {
        gesture::Context {
            now,
            viewport: self.viewport,
            center: self.element_center(),
            has_before: self.window.before(&self.focus).is_some(),
            has_next: self.window.next(&self.focus).is_some(),
        }
    }

    /// Center of the element area: below the heading margin, above the strip.
    fn element_center(&self) -> Point {
        use crate::config::layout;
        let strip = self.config.strip_height();
        let height = self.viewport.height - layout::TOP - layout::INNER - strip;
        Point::new(self.viewport.width / 2.0, height / 2.0 + layout::TOP)
    }

    /// The strip occupies the viewport bottom while it is visible.
    fn in_strip(&self, position: Point) -> bool {
        !self.gesture.zooming()
            && self.viewport.height > 0.0
            && position.y >= self.viewport.height - self.config.strip_height()
    }

    /// Mirrors the strip's presented offset into the scrollable widget.
    ///
    /// The strip is drawn as lead padding (when the strip hangs right of the
    /// origin) plus a scroll offset (when it hangs left); exactly one of the
    /// two is nonzero at any time.
    fn strip_sync_task(&self, now: Instant) -> Task<Message<A::Item>> {
        let scroll = self.thumbnails.scroll_state();
        if !scroll.is_ready() {
            return Task::none();
        }
        let base = self.thumbnails.presented_offset(now) + scroll.placement_offset;
        let native = (-base).max(0.0);
        let lead = base.max(0.0);
        let max_scroll = (lead + scroll.placement_width - scroll.viewport_width).max(0.0);
        let relative = if max_scroll > 0.0 {
            (native / max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        };
        operation::snap_to(
            Id::new(STRIP_SCROLLABLE_ID),
            RelativeOffset {
                x: relative,
                y: 0.0,
            },
        )
    }
}
