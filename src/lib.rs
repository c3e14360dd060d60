// SPDX-License-Identifier: MPL-2.0
//! `iced_lightbox` is a full-screen lightbox overlay for the Iced GUI toolkit.
//!
//! It shows one focused item out of a conceptually unbounded gallery that is
//! materialized lazily around the focus, supports swipe/pinch/wheel
//! navigation and zoom, and keeps a horizontally scrollable thumbnail strip
//! synchronized with the focused item. Item visuals and the paging backend
//! are supplied by the host through the [`LightboxAdapter`] port; the host
//! keeps ownership of the `open` flag and the focused item and applies the
//! component's [`Effect`]s to its own state.

#![doc(html_root_url = "https://docs.rs/iced_lightbox/0.1.0")]

pub mod adapter;
pub mod animation;
pub mod config;
pub mod error;
pub mod lightbox;
pub mod state;

pub use adapter::{ElementEvent, ElementParams, LightboxAdapter};
pub use config::LightboxConfig;
pub use error::{Error, Result};
pub use lightbox::{Effect, Lightbox, Message};

#[cfg(test)]
pub mod test_utils;
