// SPDX-License-Identifier: MPL-2.0
//! Host adapter port.
//!
//! This module defines the [`LightboxAdapter`] trait through which the host
//! supplies everything the lightbox does not own: how gallery items load
//! around a pivot, and what their full-size and thumbnail visuals look like.
//! The component never renders items itself and never interprets their
//! contents; items are opaque values compared with `==`.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync`: load futures are handed to the
//! runtime behind iced's task executor.

use crate::error::Result;
use futures_util::future::BoxFuture;
use iced::Element;

/// Dimensions offered to a rendered visual.
///
/// Full-size elements receive the element area; thumbnails receive the
/// configured thumbnail size. Visuals may be smaller (letterboxing is the
/// component's job) but should not exceed these bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementParams {
    pub width: f32,
    pub height: f32,
}

/// Events a rendered visual reports back to the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEvent {
    /// The visual is ready to be measured and animated. The focused
    /// element's entering morph waits for this; thumbnails may emit it
    /// freely (it is ignored for them).
    Loaded,
}

/// Port through which the host feeds the lightbox.
///
/// The two loaders page the gallery outward from a pivot item. The returned
/// batch's relative order is preserved when it is spliced onto the window;
/// an empty batch means the edge is exhausted for the current window. The
/// loaders are never invoked concurrently for the same edge.
///
/// # Example
///
/// ```ignore
/// struct Photos { client: PhotoClient }
///
/// impl LightboxAdapter for Photos {
///     type Item = PhotoId;
///
///     fn load_elements_before(&self, pivot: PhotoId) -> BoxFuture<'static, Result<Vec<PhotoId>>> {
///         let client = self.client.clone();
///         Box::pin(async move { client.page_before(pivot, 10).await.map_err(Into::into) })
///     }
///     // ...
/// }
/// ```
pub trait LightboxAdapter: Send + Sync {
    /// Host-defined item identity. Two items are the same gallery entry
    /// exactly when they compare equal; the component never hashes or
    /// orders items itself.
    type Item: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static;

    /// Loads the items immediately preceding `pivot`, nearest last.
    ///
    /// # Errors
    ///
    /// A failed load is logged and treated as an empty batch: the edge is
    /// closed until the window is next reset.
    fn load_elements_before(&self, pivot: Self::Item)
        -> BoxFuture<'static, Result<Vec<Self::Item>>>;

    /// Loads the items immediately following `pivot`, nearest first.
    ///
    /// # Errors
    ///
    /// Same policy as [`LightboxAdapter::load_elements_before`].
    fn load_elements_next(&self, pivot: Self::Item)
        -> BoxFuture<'static, Result<Vec<Self::Item>>>;

    /// Renders the full-size visual for `element`.
    fn render_element(
        &self,
        element: &Self::Item,
        params: ElementParams,
    ) -> Element<'_, ElementEvent>;

    /// Renders the strip thumbnail for `element`.
    fn render_thumbnail(
        &self,
        element: &Self::Item,
        params: ElementParams,
    ) -> Element<'_, ElementEvent>;

    /// Text shown above the focused element. Defaults to no heading.
    fn render_heading(&self, element: &Self::Item) -> String {
        let _ = element;
        String::new()
    }
}
