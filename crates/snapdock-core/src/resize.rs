#![forbid(unsafe_code)]

//! Aspect-locked resize arithmetic.
//!
//! Resizing has a single degree of freedom: a width clamped to
//! `[min_width, max_width]`, with height always `width / aspect_ratio`.
//!
//! The resize direction passed to [`resized_size`] is the edge or corner the
//! window is pinned to. The handle sits on the opposite side
//! ([`Anchor::opposite`]), so growing means dragging away from the pinned
//! side:
//!
//! | direction | width |
//! |---|---|
//! | `NE`, `E`, `SE` | `start_width - delta.x` |
//! | `NW`, `W`, `SW` | `start_width + delta.x` |
//! | `N` | `start_width + delta.y` |
//! | `S` | `start_width - delta.y` |

use serde::{Deserialize, Serialize};

use crate::anchor::Anchor;
use crate::vector::Vector2;

/// Default width-to-height ratio (16:9).
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Width bounds and aspect ratio for a resizable window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeLimits {
    pub min_width: f64,
    pub max_width: f64,
    /// Width divided by height.
    pub aspect_ratio: f64,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            min_width: 240.0,
            max_width: 960.0,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

impl ResizeLimits {
    #[must_use]
    pub const fn new(min_width: f64, max_width: f64, aspect_ratio: f64) -> Self {
        Self {
            min_width,
            max_width,
            aspect_ratio,
        }
    }

    /// Clamp `width` into `[min_width, max_width]`.
    ///
    /// Never panics: with inverted bounds the result is `max_width`, and a
    /// `NaN` width collapses to `min_width`.
    #[must_use]
    pub fn clamp_width(&self, width: f64) -> f64 {
        let width = if width.is_nan() { self.min_width } else { width };
        width.max(self.min_width).min(self.max_width)
    }
}

/// Size after dragging the resize handle by `drag_delta` from `start_size`.
#[must_use]
pub fn resized_size(
    direction: Anchor,
    start_size: Vector2,
    drag_delta: Vector2,
    limits: &ResizeLimits,
) -> Vector2 {
    let width = if direction.is_east() {
        start_size.x - drag_delta.x
    } else if direction.is_west() {
        start_size.x + drag_delta.x
    } else if direction == Anchor::N {
        start_size.x + drag_delta.y
    } else {
        start_size.x - drag_delta.y
    };
    width_from_target(width, limits)
}

/// Full size for an absolute target width, clamped and aspect-locked.
#[must_use]
pub fn width_from_target(width: f64, limits: &ResizeLimits) -> Vector2 {
    let width = limits.clamp_width(width);
    Vector2::new(width, width / limits.aspect_ratio)
}
