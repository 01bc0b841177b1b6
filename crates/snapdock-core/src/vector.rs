#![forbid(unsafe_code)]

//! Immutable 2D vector.
//!
//! Every operation returns a new value. All functions are total: a
//! zero-length vector normalizes to [`Vector2::ZERO`] and angles involving a
//! zero-length vector are `0.0`, so no `NaN` escapes from a degenerate input.

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2D vector in viewport units (pixels, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// The unit vector `(1, 1)`.
    pub const ONE: Self = Self::new(1.0, 1.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise product.
    #[inline]
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise quotient. Division by a zero component follows IEEE-754.
    #[inline]
    #[must_use]
    pub fn divide(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    /// Multiply both components by `factor`.
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Euclidean distance between two points.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        other.subtract(self).magnitude()
    }

    /// Linear interpolation `self + (other - self) * t`.
    ///
    /// `t` is not clamped; values outside `[0, 1]` extrapolate.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + other.subtract(self).scale(t)
    }

    #[inline]
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    #[inline]
    #[must_use]
    pub fn sqr_magnitude(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction, or [`Vector2::ZERO`] for a
    /// zero-length input.
    #[must_use]
    pub fn normalize(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Self::ZERO;
        }
        self.scale(1.0 / magnitude)
    }

    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unsigned angle between two vectors in radians, in `[0, π]`.
    ///
    /// Returns `0.0` when either vector has zero length.
    #[must_use]
    pub fn angle_to(self, other: Self) -> f64 {
        let denominator = (self.sqr_magnitude() * other.sqr_magnitude()).sqrt();
        if denominator == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denominator).clamp(-1.0, 1.0).acos()
    }

    /// True when both components are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for (f64, f64) {
    fn from(v: Vector2) -> Self {
        (v.x, v.y)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl Mul for Vector2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Div for Vector2 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.divide(rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
