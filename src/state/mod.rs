// SPDX-License-Identifier: MPL-2.0
//! Core state of the lightbox, separated from the component shell.
//!
//! Everything in here is pure, clock-explicit state: the windowed sequence
//! store, the focused element's transform, and the thumbnail strip's scroll
//! placement. The `lightbox` module wires these to iced events and tasks.

pub mod scroll;
pub mod transform;
pub mod window;

// Re-export commonly used types for convenience
pub use scroll::ScrollState;
pub use transform::Transform;
pub use window::{Edge, ElementWindow};
