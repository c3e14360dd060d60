// SPDX-License-Identifier: MPL-2.0
//! Component-level scenarios driven through the public Message/Effect
//! surface with a scripted adapter.

use futures_util::future::BoxFuture;
use iced::touch::{self, Finger};
use iced::widget::Space;
use iced::{mouse, Element, Event, Point, Size};
use iced_lightbox::state::Edge;
use iced_lightbox::{Effect, ElementEvent, ElementParams, Lightbox, LightboxAdapter, Message};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Adapter over `u32` gallery ids that pages one item per call and counts
/// how often each loader was invoked.
#[derive(Default)]
struct ScriptedAdapter {
    before_calls: AtomicUsize,
    next_calls: AtomicUsize,
}

impl LightboxAdapter for ScriptedAdapter {
    type Item = u32;

    fn load_elements_before(
        &self,
        pivot: u32,
    ) -> BoxFuture<'static, iced_lightbox::Result<Vec<u32>>> {
        self.before_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(pivot.checked_sub(1).map_or_else(Vec::new, |p| vec![p])) })
    }

    fn load_elements_next(
        &self,
        pivot: u32,
    ) -> BoxFuture<'static, iced_lightbox::Result<Vec<u32>>> {
        self.next_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(vec![pivot + 1]) })
    }

    fn render_element(&self, _element: &u32, params: ElementParams) -> Element<'_, ElementEvent> {
        Space::new().width(params.width).height(params.height).into()
    }

    fn render_thumbnail(&self, _element: &u32, params: ElementParams) -> Element<'_, ElementEvent> {
        Space::new().width(params.width).height(params.height).into()
    }
}

/// An open 1000x800 viewer focused on `focus`, with the scripted adapter.
fn open_lightbox(focus: u32) -> (Lightbox<ScriptedAdapter>, Arc<ScriptedAdapter>) {
    let adapter = Arc::new(ScriptedAdapter::default());
    let mut lightbox = Lightbox::new(Arc::clone(&adapter), focus);
    lightbox.set_viewport(Size::new(1000.0, 800.0));
    let _ = lightbox.sync(true, focus);
    (lightbox, adapter)
}

/// Materializes `[focus - 1, focus, focus + 1]` by resolving the initial
/// edge loads that opening triggered (window generation 1).
fn materialize_neighbors(lightbox: &mut Lightbox<ScriptedAdapter>, focus: u32) {
    let (_, _) = lightbox.update(Message::ElementsLoaded {
        edge: Edge::Before,
        generation: 1,
        batch: Ok(vec![focus - 1]),
    });
    let (_, _) = lightbox.update(Message::ElementsLoaded {
        edge: Edge::Next,
        generation: 1,
        batch: Ok(vec![focus + 1]),
    });
}

fn touch_drag(
    lightbox: &mut Lightbox<ScriptedAdapter>,
    from: Point,
    to: Point,
) -> Effect<u32> {
    let finger = Finger(7);
    let _ = lightbox.update(Message::RawEvent(Event::Touch(touch::Event::FingerPressed {
        id: finger,
        position: from,
    })));
    let _ = lightbox.update(Message::RawEvent(Event::Touch(touch::Event::FingerMoved {
        id: finger,
        position: to,
    })));
    let (effect, _) = lightbox.update(Message::RawEvent(Event::Touch(touch::Event::FingerLifted {
        id: finger,
        position: to,
    })));
    effect
}

#[test]
fn opening_seeds_the_window_with_the_focus() {
    let (lightbox, _) = open_lightbox(10);
    assert!(lightbox.is_open());
    assert_eq!(lightbox.window().as_slice(), &[10]);
    assert!(lightbox.window().has_more(Edge::Before));
    assert!(lightbox.window().has_more(Edge::Next));
}

#[test]
fn opening_requests_both_edges_once() {
    let (mut lightbox, adapter) = open_lightbox(10);
    assert_eq!(adapter.before_calls.load(Ordering::SeqCst), 1);
    assert_eq!(adapter.next_calls.load(Ordering::SeqCst), 1);

    // Re-evaluating the trigger while the loads are in flight does not
    // issue duplicates: the per-edge loading flag coalesces them.
    let _ = lightbox.sync(true, 10);
    let _ = lightbox.sync(true, 10);
    assert_eq!(adapter.before_calls.load(Ordering::SeqCst), 1);
    assert_eq!(adapter.next_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_batch_closes_the_edge_for_this_window() {
    let (mut lightbox, adapter) = open_lightbox(10);
    let (_, _) = lightbox.update(Message::ElementsLoaded {
        edge: Edge::Before,
        generation: 1,
        batch: Ok(vec![]),
    });
    assert!(!lightbox.window().has_more(Edge::Before));

    // Scrolling the strip toward the closed edge asks for nothing more.
    let _ = lightbox.update(Message::RawEvent(Event::Mouse(mouse::Event::CursorMoved {
        position: Point::new(500.0, 700.0),
    })));
    let _ = lightbox.update(Message::RawEvent(Event::Mouse(mouse::Event::WheelScrolled {
        delta: mouse::ScrollDelta::Pixels { x: 0.0, y: -400.0 },
    })));
    assert_eq!(adapter.before_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn loader_failure_is_equivalent_to_an_empty_batch() {
    let (mut lightbox, _) = open_lightbox(10);
    let (effect, _) = lightbox.update(Message::ElementsLoaded {
        edge: Edge::Next,
        generation: 1,
        batch: Err(iced_lightbox::Error::Load("backend unreachable".into())),
    });
    // Nothing surfaces to the host; the edge is closed until reset.
    assert_eq!(effect, Effect::None);
    assert!(!lightbox.window().has_more(Edge::Next));
    assert!(lightbox.window().has_more(Edge::Before));
}

#[test]
fn stale_load_completion_is_dropped_after_a_reset() {
    let (mut lightbox, _) = open_lightbox(10);
    // The host jumps to an unrelated item; generation 1 loads are orphaned.
    let _ = lightbox.sync(true, 99);
    let (_, _) = lightbox.update(Message::ElementsLoaded {
        edge: Edge::Before,
        generation: 1,
        batch: Ok(vec![9]),
    });
    assert_eq!(lightbox.window().as_slice(), &[99]);
}

#[test]
fn unknown_focus_collapses_the_window() {
    let (mut lightbox, _) = open_lightbox(10);
    materialize_neighbors(&mut lightbox, 10);
    assert_eq!(lightbox.window().as_slice(), &[9, 10, 11]);

    let _ = lightbox.sync(true, 42);
    assert_eq!(lightbox.window().as_slice(), &[42]);
    assert!(lightbox.window().has_more(Edge::Before));
    assert!(lightbox.window().has_more(Edge::Next));
}

#[test]
fn swipe_commit_requests_the_previous_item_once() {
    let (mut lightbox, _) = open_lightbox(10);
    materialize_neighbors(&mut lightbox, 10);

    // +150px on a 1000px viewport: past the 100px commit threshold.
    let effect = touch_drag(
        &mut lightbox,
        Point::new(400.0, 300.0),
        Point::new(550.0, 300.0),
    );
    assert_eq!(effect, Effect::FocusChanged(9));

    // The host applies the change; the transform is back at identity.
    let _ = lightbox.sync(true, 9);
    assert_eq!(lightbox.focus(), &9);
    assert_eq!(lightbox.window().as_slice(), &[9, 10, 11]);
}

#[test]
fn swipe_below_threshold_changes_nothing() {
    let (mut lightbox, _) = open_lightbox(10);
    materialize_neighbors(&mut lightbox, 10);

    let effect = touch_drag(
        &mut lightbox,
        Point::new(400.0, 300.0),
        Point::new(450.0, 300.0),
    );
    assert_eq!(effect, Effect::None);
    assert_eq!(lightbox.focus(), &10);
}

#[test]
fn swipe_at_the_window_edge_is_inert() {
    let (mut lightbox, _) = open_lightbox(10);
    // No neighbors materialized: the request is simply not issued.
    let effect = touch_drag(
        &mut lightbox,
        Point::new(400.0, 300.0),
        Point::new(700.0, 300.0),
    );
    assert_eq!(effect, Effect::None);
}

#[test]
fn thumbnail_click_requests_focus_change() {
    let (mut lightbox, _) = open_lightbox(10);
    materialize_neighbors(&mut lightbox, 10);

    let (effect, _) = lightbox.update(Message::ThumbnailClicked(11));
    assert_eq!(effect, Effect::FocusChanged(11));

    // Clicking the focused thumbnail is a no-op.
    let (effect, _) = lightbox.update(Message::ThumbnailClicked(10));
    assert_eq!(effect, Effect::None);
}

#[test]
fn strip_drag_suppresses_thumbnail_clicks() {
    let (mut lightbox, _) = open_lightbox(10);
    materialize_neighbors(&mut lightbox, 10);

    // A horizontal drag inside the strip region (bottom 196px).
    let finger = Finger(3);
    let _ = lightbox.update(Message::RawEvent(Event::Touch(touch::Event::FingerPressed {
        id: finger,
        position: Point::new(500.0, 700.0),
    })));
    let _ = lightbox.update(Message::RawEvent(Event::Touch(touch::Event::FingerMoved {
        id: finger,
        position: Point::new(450.0, 700.0),
    })));

    let (effect, _) = lightbox.update(Message::ThumbnailClicked(11));
    assert_eq!(effect, Effect::None);
}

#[test]
fn close_button_requests_close_and_sync_tears_down() {
    let (mut lightbox, _) = open_lightbox(10);
    let (effect, _) = lightbox.update(Message::CloseRequested);
    assert_eq!(effect, Effect::CloseRequested);

    let _ = lightbox.sync(false, 10);
    assert!(!lightbox.is_open());
}

#[test]
fn navigation_buttons_respect_window_bounds() {
    let (mut lightbox, _) = open_lightbox(10);
    materialize_neighbors(&mut lightbox, 10);

    let (effect, _) = lightbox.update(Message::NavigateNext);
    assert_eq!(effect, Effect::FocusChanged(11));
    let _ = lightbox.sync(true, 11);

    // 12 is not materialized yet; the request is not issued.
    let (effect, _) = lightbox.update(Message::NavigateNext);
    assert_eq!(effect, Effect::None);
}
