#![forbid(unsafe_code)]

//! Bounded history of recent pointer deltas used as a release velocity proxy.
//!
//! # Invariants
//!
//! 1. The window never holds more than `capacity` samples; pushing into a
//!    full window evicts the oldest.
//! 2. [`VelocityWindow::average`] of an empty window is [`Vector2::ZERO`].

use std::collections::VecDeque;

use snapdock_core::Vector2;

/// Rolling window of the last N drag deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityWindow {
    samples: VecDeque<Vector2>,
    capacity: usize,
}

impl VelocityWindow {
    /// Create a window holding at most `capacity` samples (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, delta: Vector2) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(delta);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Mean of the retained deltas.
    #[must_use]
    pub fn average(&self) -> Vector2 {
        if self.samples.is_empty() {
            return Vector2::ZERO;
        }
        let sum = self
            .samples
            .iter()
            .fold(Vector2::ZERO, |acc, &sample| acc + sample);
        sum / self.samples.len() as f64
    }
}

impl Default for VelocityWindow {
    fn default() -> Self {
        Self::new(5)
    }
}
