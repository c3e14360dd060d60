// SPDX-License-Identifier: MPL-2.0
//! View composition for the lightbox overlay.
//!
//! Rendering is a pure projection of component state: the gesture engine's
//! presented transform positions the focused element and its neighbor
//! previews, and the thumbnail strip is laid out from the scroll state's
//! placement. All visual content comes from the host adapter.

use super::{Lightbox, Message, STRIP_SCROLLABLE_ID};
use crate::adapter::{ElementEvent, ElementParams, LightboxAdapter};
use crate::config::{layout, strip};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, container, mouse_area, Container, Id, Row, Scrollable, Space, Stack};
use iced::widget::{text, Text};
use iced::{Background, Border, Color, Element, Length, Padding, Point, Rectangle, Size};
use std::time::Instant;

const BACKDROP_ALPHA: f32 = 0.8;
const CHROME_BACKGROUND: Color = Color {
    r: 0.125,
    g: 0.125,
    b: 0.125,
    a: 0.79,
};
const CHROME_FOREGROUND: Color = Color {
    r: 0.84,
    g: 0.84,
    b: 0.84,
    a: 1.0,
};
const FOCUS_RING: Color = Color {
    r: 0.14,
    g: 0.53,
    b: 1.0,
    a: 0.9,
};

pub(super) fn view<A: LightboxAdapter>(lightbox: &Lightbox<A>) -> Element<'_, Message<A::Item>> {
    if !lightbox.is_open() {
        return Space::new().width(0).height(0).into();
    }

    let now = Instant::now();
    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(backdrop(lightbox, now));

    layers = layers.push(element_layer(lightbox, now));

    let heading = lightbox.adapter.render_heading(&lightbox.focus);
    if !heading.is_empty() {
        layers = layers.push(heading_layer(heading));
    }

    if !lightbox.zooming() {
        layers = layers.push(strip_layer(lightbox, now));
    }

    layers = layers.push(close_button());
    if !lightbox.touch_session && !lightbox.zooming() {
        layers = layers.push(navigate_button("‹", Horizontal::Left, Message::NavigateBefore));
        layers = layers.push(navigate_button("›", Horizontal::Right, Message::NavigateNext));
    }

    layers.into()
}

fn backdrop<A: LightboxAdapter>(
    lightbox: &Lightbox<A>,
    now: Instant,
) -> Element<'_, Message<A::Item>> {
    let base = if lightbox.ready { BACKDROP_ALPHA } else { 0.0 };
    let alpha = base * lightbox.backdrop.present(now);
    container(Space::new().width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(Color {
                a: alpha,
                ..Color::BLACK
            })),
            ..container::Style::default()
        })
        .into()
}

/// The focused element plus its slide-in neighbor previews.
fn element_layer<A: LightboxAdapter>(
    lightbox: &Lightbox<A>,
    now: Instant,
) -> Element<'_, Message<A::Item>> {
    let viewport = lightbox.viewport;
    let strip_height = lightbox.config.strip_height();
    let area = Size::new(
        (viewport.width - layout::SIDE * 2.0).max(1.0),
        (viewport.height - layout::TOP - layout::INNER - strip_height).max(1.0),
    );
    let center = lightbox.element_center();
    let transform = lightbox.gesture.presented(now);
    let params = ElementParams {
        width: area.width,
        height: area.height,
    };

    let mut layer = Stack::new().width(Length::Fill).height(Length::Fill);

    // Neighbor previews exist only at rest and slide in proportionally to
    // the swipe translation.
    if !lightbox.zooming() && transform.scale == 1.0 {
        if transform.translate.x > 0.0 {
            if let Some(before) = lightbox.window.before(&lightbox.focus) {
                let offset =
                    transform.translate.x - viewport.width + (viewport.width - area.width) / 2.0;
                let rect = centered_rect(Point::new(center.x + offset, center.y), area);
                let visual = lightbox
                    .adapter
                    .render_element(before, params)
                    .map(|ElementEvent::Loaded| Message::NeighborLoaded);
                layer = layer.push(place(visual, rect));
            }
        } else if transform.translate.x < 0.0 {
            if let Some(next) = lightbox.window.next(&lightbox.focus) {
                let offset =
                    transform.translate.x + viewport.width - (viewport.width - area.width) / 2.0;
                let rect = centered_rect(Point::new(center.x + offset, center.y), area);
                let visual = lightbox
                    .adapter
                    .render_element(next, params)
                    .map(|ElementEvent::Loaded| Message::NeighborLoaded);
                layer = layer.push(place(visual, rect));
            }
        }
    }

    // The focused element: scaled and panned by the gesture transform, or
    // mid-morph between the originating rectangle and its resting place.
    let scaled = Size::new(area.width * transform.scale, area.height * transform.scale);
    let resting = centered_rect(
        Point::new(
            center.x + transform.translate.x,
            center.y + transform.translate.y,
        ),
        scaled,
    );
    let progress = lightbox.morph.present(now);
    let rect = match lightbox.origin {
        Some(origin) if progress < 1.0 => lerp_rect(origin, resting, progress),
        _ => resting,
    };
    let visual = lightbox
        .adapter
        .render_element(&lightbox.focus, params)
        .map(|ElementEvent::Loaded| Message::ElementLoaded);
    mouse_area(layer.push(place(visual, rect)))
        .interaction(lightbox.gesture.mouse_interaction())
        .into()
}

fn heading_layer<T: Clone + 'static>(heading: String) -> Element<'static, Message<T>> {
    container(
        text(heading)
            .size(24)
            .color(Color::WHITE)
            .wrapping(text::Wrapping::None),
    )
    .width(Length::Fill)
    .align_x(Horizontal::Center)
    .padding(16)
    .into()
}

/// The horizontally scrollable thumbnail strip along the viewport bottom.
fn strip_layer<A: LightboxAdapter>(
    lightbox: &Lightbox<A>,
    now: Instant,
) -> Element<'_, Message<A::Item>> {
    let config = &lightbox.config;
    let scroll = lightbox.thumbnails.scroll_state();
    let widths = lightbox.thumbnails.widths();
    let base = lightbox.thumbnails.presented_offset(now) + scroll.placement_offset;

    let mut thumbs = Row::new().spacing(strip::GAP);

    for (index, item) in lightbox.window.as_slice().iter().enumerate() {
        let width = widths
            .get(index)
            .copied()
            .unwrap_or_else(|| config.thumbnail_width());
        let params = ElementParams {
            width,
            height: config.thumbnail_height,
        };
        let focused = *item == lightbox.focus;
        let visual = lightbox
            .adapter
            .render_thumbnail(item, params)
            .map(|ElementEvent::Loaded| Message::NeighborLoaded);
        let framed = container(visual)
            .width(width)
            .height(config.thumbnail_height)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(Color {
                    a: if focused { 0.35 } else { 0.1 },
                    ..Color::WHITE
                })),
                border: if focused {
                    Border {
                        color: FOCUS_RING,
                        width: 2.0,
                        ..Border::default()
                    }
                } else {
                    Border::default()
                },
                ..container::Style::default()
            });
        thumbs = thumbs.push(mouse_area(framed).on_release(Message::ThumbnailClicked(item.clone())));
    }

    // The strip hangs right of its origin as lead padding, or left of it as
    // scroll offset; the component mirrors the latter into this scrollable.
    let content = container(thumbs).padding(Padding {
        left: base.max(0.0),
        ..Padding::ZERO
    });
    let strip: Element<'_, Message<A::Item>> = Scrollable::new(content)
        .id(Id::new(STRIP_SCROLLABLE_ID))
        .direction(Direction::Horizontal(
            Scrollbar::new().width(0).scroller_width(0),
        ))
        .width(Length::Fill)
        .height(config.thumbnail_height)
        .into();

    container(container(strip).padding(Padding {
        top: strip::PADDING,
        bottom: strip::PADDING,
        ..Padding::ZERO
    }))
    .width(Length::Fill)
    .height(Length::Fill)
    .align_y(Vertical::Bottom)
    .into()
}

fn close_button<T: Clone + 'static>() -> Element<'static, Message<T>> {
    container(chrome_button("✕", Message::CloseRequested))
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .padding(8)
        .into()
}

fn navigate_button<T: Clone + 'static>(
    glyph: &'static str,
    side: Horizontal,
    message: Message<T>,
) -> Element<'static, Message<T>> {
    container(chrome_button(glyph, message))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(side)
        .align_y(Vertical::Center)
        .padding(40)
        .into()
}

fn chrome_button<T: Clone + 'static>(
    glyph: &'static str,
    message: Message<T>,
) -> Element<'static, Message<T>> {
    button(Text::new(glyph).size(28).color(CHROME_FOREGROUND))
        .on_press(message)
        .padding(8)
        .style(|_theme, status| {
            let background = match status {
                button::Status::Hovered | button::Status::Pressed => Color {
                    a: CHROME_BACKGROUND.a,
                    r: 0.08,
                    g: 0.08,
                    b: 0.08,
                },
                _ => CHROME_BACKGROUND,
            };
            button::Style {
                background: Some(Background::Color(background)),
                text_color: CHROME_FOREGROUND,
                ..button::Style::default()
            }
        })
        .into()
}

/// Positions fixed-size `content` at `rect` inside a fill container.
/// Off-viewport placement is clipped at the top-left; the overlay never
/// scrolls, so the lost fraction is invisible anyway.
fn place<M: 'static>(content: Element<'_, M>, rect: Rectangle) -> Element<'_, M> {
    container(
        Container::new(content)
            .width(rect.width.max(1.0))
            .height(rect.height.max(1.0)),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(Padding {
        left: rect.x.max(0.0),
        top: rect.y.max(0.0),
        ..Padding::ZERO
    })
    .clip(true)
    .into()
}

fn centered_rect(center: Point, size: Size) -> Rectangle {
    Rectangle {
        x: center.x - size.width / 2.0,
        y: center.y - size.height / 2.0,
        width: size.width,
        height: size.height,
    }
}

fn lerp_rect(from: Rectangle, to: Rectangle, t: f32) -> Rectangle {
    Rectangle {
        x: from.x + (to.x - from.x) * t,
        y: from.y + (to.y - from.y) * t,
        width: from.width + (to.width - from.width) * t,
        height: from.height + (to.height - from.height) * t,
    }
}
