#![forbid(unsafe_code)]

//! Window placement rectangle.

use serde::{Deserialize, Serialize};

use crate::vector::Vector2;

/// On-screen placement of a window: top-left position plus size.
///
/// Derived from the viewport, the element size and the margin every time it
/// is needed; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub position: Vector2,
    pub size: Vector2,
}

impl WindowGeometry {
    #[inline]
    pub const fn new(position: Vector2, size: Vector2) -> Self {
        Self { position, size }
    }

    /// Left edge.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.position.x
    }

    /// Top edge.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.position.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vector2 {
        self.position + self.size.scale(0.5)
    }

    /// Check if a point lies inside the window.
    #[inline]
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Check if the window fits entirely inside a viewport of `viewport` size.
    pub fn fits_within(&self, viewport: Vector2) -> bool {
        self.left() >= 0.0
            && self.top() >= 0.0
            && self.right() <= viewport.x
            && self.bottom() <= viewport.y
    }
}

#[cfg(test)]
mod tests {
    use super::WindowGeometry;
    use crate::vector::Vector2;

    #[test]
    fn contains_edges() {
        let geometry = WindowGeometry::new(Vector2::new(2.0, 3.0), Vector2::new(4.0, 5.0));
        assert!(geometry.contains(Vector2::new(2.0, 3.0)));
        assert!(geometry.contains(Vector2::new(5.9, 7.9)));
        assert!(!geometry.contains(Vector2::new(6.0, 3.0)));
        assert!(!geometry.contains(Vector2::new(2.0, 8.0)));
    }

    #[test]
    fn center_and_edges() {
        let geometry = WindowGeometry::new(Vector2::new(10.0, 20.0), Vector2::new(100.0, 50.0));
        assert_eq!(geometry.right(), 110.0);
        assert_eq!(geometry.bottom(), 70.0);
        assert_eq!(geometry.center(), Vector2::new(60.0, 45.0));
    }

    #[test]
    fn fits_within_viewport() {
        let geometry = WindowGeometry::new(Vector2::new(15.0, 15.0), Vector2::new(100.0, 100.0));
        assert!(geometry.fits_within(Vector2::new(1000.0, 800.0)));
        assert!(!geometry.fits_within(Vector2::new(100.0, 100.0)));
    }
}
