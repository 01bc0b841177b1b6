#![forbid(unsafe_code)]

//! Core: pure geometry for anchor-snapping windows.
//!
//! # Role in snapdock
//! `snapdock-core` holds everything that can be computed without state:
//! the [`Vector2`] value type, the anchor placement table and its inverse,
//! the two anchor pickers used on drag release, and the aspect-locked resize
//! arithmetic. The runtime (`snapdock-runtime`) owns all mutable motion state
//! and delegates every geometric decision here.
//!
//! # Totality
//! No function in this crate fails or panics. Zero-length vectors normalize to
//! zero, `acos` inputs are clamped, and unknown anchor names fall back to
//! [`Anchor::NW`].

pub mod anchor;
pub mod geometry;
pub mod resize;
pub mod vector;

pub use anchor::{
    ANCHOR_EVALUATION_ORDER, Anchor, AnchorParseError, AnchorPick, AnchorSet, AnchorSetError,
    DEFAULT_ANGLE_TIE_EPSILON, Placement, anchor_name_to_position, anchor_to_position,
    closest_by_angle, closest_by_distance, position_to_anchor,
};
pub use geometry::WindowGeometry;
pub use resize::{DEFAULT_ASPECT_RATIO, ResizeLimits, resized_size, width_from_target};
pub use vector::Vector2;
