// SPDX-License-Identifier: MPL-2.0
//! Lightbox configuration and tuning constants.
//!
//! `LightboxConfig` carries the host-tunable knobs. The constant modules
//! below hold the interaction-feel values shared by the gesture engine and
//! the thumbnail strip; tuning should happen here so every lightbox instance
//! behaves consistently.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default height of the thumbnail strip's thumbnails, in pixels.
pub const DEFAULT_THUMBNAIL_HEIGHT: f32 = 180.0;

/// Minimum thumbnail height accepted from the host.
pub const MIN_THUMBNAIL_HEIGHT: f32 = 48.0;

/// Maximum thumbnail height accepted from the host.
pub const MAX_THUMBNAIL_HEIGHT: f32 = 512.0;

/// Width/height ratio used for thumbnails until the host reports otherwise.
pub const THUMBNAIL_ASPECT: f32 = 21.0 / 9.0;

/// Transition timings, mirroring the standard UI motion scale.
pub mod duration {
    use std::time::Duration;

    /// Default transition time for transform and scroll animations.
    pub const STANDARD: Duration = Duration::from_millis(300);
    /// Exiting morph animation.
    pub const SHORT: Duration = Duration::from_millis(250);
    /// Chrome (buttons, strip) fades.
    pub const SHORTER: Duration = Duration::from_millis(200);
    /// Entering morph and backdrop-ready transition.
    pub const COMPLEX: Duration = Duration::from_millis(375);
    /// Overlay mount fade-in.
    pub const ENTERING: Duration = Duration::from_millis(225);
    /// Overlay unmount fade-out.
    pub const LEAVING: Duration = Duration::from_millis(195);
}

/// Zoom and swipe behavior of the element area.
pub mod zoom {
    use std::time::Duration;

    /// Lower bound of the transform scale. Pinching below this is clamped.
    pub const MIN_SCALE: f32 = 0.5;
    /// Upper bound of the transform scale.
    pub const MAX_SCALE: f32 = 3.0;
    /// Scale applied by a double-click/double-tap from the identity state.
    pub const DOUBLE_TAP_SCALE: f32 = 2.0;
    /// Scale change contributed by one normalized wheel step.
    pub const WHEEL_SCALE_STEP: f32 = 0.12;
    /// Quiet time after the last wheel tick before an under-1x scale is
    /// animated back to identity.
    pub const RESET_DEBOUNCE: Duration = super::duration::STANDARD;
    /// A swipe commits to a neighbor once the horizontal displacement
    /// exceeds the viewport width divided by this.
    pub const SWIPE_COMMIT_DIVISOR: f32 = 10.0;
    /// Two clicks within this window count as a double-click.
    pub const DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(350);
    /// Maximum pointer travel for a press/release pair to count as a click.
    pub const CLICK_SLOP: f32 = 10.0;
}

/// Thumbnail strip scrolling behavior.
pub mod strip {
    /// Horizontal gap between neighboring thumbnails.
    pub const GAP: f32 = 8.0;
    /// Vertical padding above and below the thumbnails.
    pub const PADDING: f32 = 8.0;
    /// The strip's first/last thumbnail may not retreat further than this
    /// from the viewport edge (unless the strip is narrower than the
    /// viewport, in which case it is centered).
    pub const CLAMP_MARGIN: f32 = 100.0;
    /// Pointer travel required before a drag starts scrolling the strip.
    pub const DRAG_DEAD_ZONE: f32 = 5.0;
    /// Initial-velocity factor of the ease-out curve; multiplied by the
    /// release velocity and the standard duration to project fling distance.
    pub const MOMENTUM_FACTOR: f32 = 0.42;
}

/// Fixed margins of the element area, in pixels.
pub mod layout {
    /// Space reserved above the element for the heading.
    pub const TOP: f32 = 64.0;
    /// Horizontal padding on each side of the element.
    pub const SIDE: f32 = 16.0;
    /// Gap between the element area and the thumbnail strip.
    pub const INNER: f32 = 8.0;
}

/// Host-tunable lightbox settings.
///
/// Everything here has a sensible default; hosts typically only override
/// `thumbnail_height`. The struct is serde-enabled so hosts that persist
/// their preferences can embed it directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LightboxConfig {
    /// Height of the thumbnails in the strip.
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: f32,
}

fn default_thumbnail_height() -> f32 {
    DEFAULT_THUMBNAIL_HEIGHT
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            thumbnail_height: DEFAULT_THUMBNAIL_HEIGHT,
        }
    }
}

impl LightboxConfig {
    /// Creates a configuration with a clamped thumbnail height.
    #[must_use]
    pub fn new(thumbnail_height: f32) -> Self {
        Self {
            thumbnail_height: thumbnail_height.clamp(MIN_THUMBNAIL_HEIGHT, MAX_THUMBNAIL_HEIGHT),
        }
    }

    /// Default width of one thumbnail at the configured height.
    #[must_use]
    pub fn thumbnail_width(&self) -> f32 {
        self.thumbnail_height * THUMBNAIL_ASPECT
    }

    /// Total height of the thumbnail strip including its padding.
    #[must_use]
    pub fn strip_height(&self) -> f32 {
        strip::PADDING + self.thumbnail_height + strip::PADDING
    }

    /// Quiet time after a fling before thumbnail clicks are accepted again.
    #[must_use]
    pub fn scroll_hold(&self) -> Duration {
        duration::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_consistent() {
        let config = LightboxConfig::default();
        assert_eq!(config.thumbnail_height, DEFAULT_THUMBNAIL_HEIGHT);
        assert!(config.thumbnail_width() > config.thumbnail_height);
    }

    #[test]
    fn new_clamps_thumbnail_height() {
        assert_eq!(
            LightboxConfig::new(1.0).thumbnail_height,
            MIN_THUMBNAIL_HEIGHT
        );
        assert_eq!(
            LightboxConfig::new(9999.0).thumbnail_height,
            MAX_THUMBNAIL_HEIGHT
        );
    }

    #[test]
    fn strip_height_includes_padding() {
        let config = LightboxConfig::new(180.0);
        assert_eq!(config.strip_height(), 8.0 + 180.0 + 8.0);
    }
}
