// SPDX-License-Identifier: MPL-2.0
//! Windowed sequence store.
//!
//! The window is the ordered, identity-unique run of gallery items currently
//! materialized around the focus. It only ever grows at its two edges; the
//! single operation that can shrink it is a reset, which happens when the
//! host's focus value is not found in the window: a discontinuity, where
//! prior neighbors are discarded rather than merged.
//!
//! Loads are gated per edge: at most one in-flight request, and an edge that
//! returned an empty batch is closed until the next reset.

use crate::error::Error;

/// One of the window's two growth edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Items preceding the window's first element.
    Before,
    /// Items following the window's last element.
    Next,
}

/// Per-edge load cursor.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    loading: bool,
    has_more: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            loading: false,
            has_more: true,
        }
    }
}

/// The materialized neighborhood around the focus.
///
/// Items are compared with `==` only; the store never hashes and imposes no
/// order of its own. Order is purely the order batches arrived in.
#[derive(Debug, Clone)]
pub struct ElementWindow<T> {
    elements: Vec<T>,
    before: Cursor,
    next: Cursor,
}

impl<T: Clone + PartialEq> ElementWindow<T> {
    /// Creates a window containing only `focus`, with both edges open.
    #[must_use]
    pub fn new(focus: T) -> Self {
        Self {
            elements: vec![focus],
            before: Cursor::default(),
            next: Cursor::default(),
        }
    }

    /// Collapses the window to `[focus]` and re-arms both edges.
    ///
    /// Called when the externally supplied focus is absent from the window.
    /// In-flight loads are orphaned by this: their completions are matched
    /// against the generation the caller tracks, not against this store.
    pub fn reset(&mut self, focus: T) {
        self.elements.clear();
        self.elements.push(focus);
        self.before = Cursor::default();
        self.next = Cursor::default();
    }

    /// The materialized items in window order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// The window always contains at least the focus.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.elements.contains(item)
    }

    /// Position of `item` in the window, by identity.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.elements.iter().position(|candidate| candidate == item)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// The window neighbor preceding `item`, if any is materialized.
    #[must_use]
    pub fn before(&self, item: &T) -> Option<&T> {
        let index = self.index_of(item)?;
        index.checked_sub(1).and_then(|i| self.elements.get(i))
    }

    /// The window neighbor following `item`, if any is materialized.
    #[must_use]
    pub fn next(&self, item: &T) -> Option<&T> {
        let index = self.index_of(item)?;
        self.elements.get(index + 1)
    }

    /// Whether a load is in flight on `edge`.
    #[must_use]
    pub fn is_loading(&self, edge: Edge) -> bool {
        self.cursor(edge).loading
    }

    /// Whether `edge` may still yield items for this window instance.
    #[must_use]
    pub fn has_more(&self, edge: Edge) -> bool {
        self.cursor(edge).has_more
    }

    /// Claims `edge` for a load and returns the pivot to query around.
    ///
    /// Returns `None` when the edge is already loading or exhausted. The
    /// check-then-set happens within one synchronous turn, which is what
    /// coalesces concurrent duplicate triggers into a single request.
    pub fn begin_load(&mut self, edge: Edge) -> Option<T> {
        let cursor = self.cursor(edge);
        if cursor.loading || !cursor.has_more {
            return None;
        }
        let pivot = match edge {
            Edge::Before => self.elements.first()?.clone(),
            Edge::Next => self.elements.last()?.clone(),
        };
        self.cursor_mut(edge).loading = true;
        Some(pivot)
    }

    /// Completes a load on `edge`, splicing `batch` onto the window.
    ///
    /// The batch's relative order is preserved; items already present (or
    /// repeated within the batch) are dropped so the window stays unique
    /// under identity. An empty batch closes the edge for this window
    /// instance. Returns the number of items actually added.
    pub fn finish_load(&mut self, edge: Edge, batch: Vec<T>) -> usize {
        self.cursor_mut(edge).loading = false;

        if batch.is_empty() {
            self.cursor_mut(edge).has_more = false;
            return 0;
        }

        let mut accepted: Vec<T> = Vec::with_capacity(batch.len());
        for item in batch {
            if !self.elements.contains(&item) && !accepted.contains(&item) {
                accepted.push(item);
            }
        }

        let added = accepted.len();
        match edge {
            Edge::Before => {
                accepted.extend(self.elements.drain(..));
                self.elements = accepted;
            }
            Edge::Next => self.elements.extend(accepted),
        }
        added
    }

    /// Records a failed load on `edge`.
    ///
    /// A rejection is treated like an empty batch: the edge is closed so the
    /// trigger condition cannot storm the loader, and nothing reaches UI
    /// state. A window reset re-arms the edge.
    pub fn fail_load(&mut self, edge: Edge, error: &Error) {
        tracing::warn!(?edge, %error, "edge load failed; closing edge until reset");
        let cursor = self.cursor_mut(edge);
        cursor.loading = false;
        cursor.has_more = false;
    }

    fn cursor(&self, edge: Edge) -> &Cursor {
        match edge {
            Edge::Before => &self.before,
            Edge::Next => &self.next,
        }
    }

    fn cursor_mut(&mut self, edge: Edge) -> &mut Cursor {
        match edge {
            Edge::Before => &mut self.before,
            Edge::Next => &mut self.next,
        }
    }
}
