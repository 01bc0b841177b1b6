#![forbid(unsafe_code)]

//! Fixed-tick animation loop for headless hosts.
//!
//! Browsers schedule frames for us; tests, replay tools and native hosts do
//! not. [`FixedTickLoop`] turns arbitrary elapsed time into whole ticks of a
//! fixed length using an accumulator, and stops as soon as the controller no
//! longer [needs a frame](WindowMotionController::needs_frame).
//!
//! # Invariants
//!
//! 1. The controller only ever sees ticks of exactly `tick` length, so a
//!    replay is bit-for-bit reproducible regardless of how elapsed time was
//!    chunked.
//! 2. Leftover time below one tick is carried in the accumulator and
//!    discarded once the window comes to rest.
//! 3. At most `max_catch_up` ticks run per [`advance`](FixedTickLoop::advance)
//!    call; a long stall does not turn into an unbounded burst.

use core::time::Duration;

use tracing::{debug, warn};
use web_time::Instant;

use crate::motion::{MotionEffect, WindowMotionController};

/// Default tick length (60 Hz).
pub const DEFAULT_TICK: Duration = Duration::from_nanos(16_666_667);

/// Default cap on ticks per [`FixedTickLoop::advance`] call.
pub const DEFAULT_MAX_CATCH_UP: u32 = 240;

/// Outcome of one loop call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Controller ticks executed.
    pub ticks: u32,
    /// The window reached rest during this call.
    pub settled: bool,
    /// Whether the controller still wants frames.
    pub needs_frame: bool,
}

/// Accumulator-based fixed-step driver for a [`WindowMotionController`].
#[derive(Debug, Clone)]
pub struct FixedTickLoop {
    tick: Duration,
    max_catch_up: u32,
    accumulator: Duration,
    last_pump: Option<Instant>,
    total_ticks: u64,
}

impl Default for FixedTickLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl FixedTickLoop {
    /// Loop with the given tick length. A zero tick is promoted to 1ms.
    #[must_use]
    pub fn new(tick: Duration) -> Self {
        let tick = if tick.is_zero() {
            Duration::from_millis(1)
        } else {
            tick
        };
        Self {
            tick,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
            accumulator: Duration::ZERO,
            last_pump: None,
            total_ticks: 0,
        }
    }

    #[must_use]
    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    #[must_use]
    pub const fn tick(&self) -> Duration {
        self.tick
    }

    /// Ticks executed since construction.
    #[must_use]
    pub const fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Feed `elapsed` time and run every whole tick it covers.
    pub fn advance(
        &mut self,
        controller: &mut WindowMotionController,
        elapsed: Duration,
    ) -> TickReport {
        if !controller.needs_frame() {
            self.accumulator = Duration::ZERO;
            return TickReport::default();
        }
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let mut report = TickReport::default();
        while self.accumulator >= self.tick && report.ticks < self.max_catch_up {
            self.accumulator -= self.tick;
            report.ticks += 1;
            self.total_ticks += 1;
            if matches!(controller.tick(self.tick), MotionEffect::Settled { .. }) {
                report.settled = true;
            }
            if !controller.needs_frame() {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        if self.accumulator >= self.tick {
            warn!(
                dropped_secs = self.accumulator.as_secs_f64(),
                "frame loop fell behind; dropping accumulated time"
            );
            self.accumulator = Duration::ZERO;
        }
        report.needs_frame = controller.needs_frame();
        report
    }

    /// Tick until the window is at rest or `max_ticks` have run.
    ///
    /// A held window (still dragging) never settles, so callers should end
    /// the drag first.
    pub fn run_until_settled(
        &mut self,
        controller: &mut WindowMotionController,
        max_ticks: u32,
    ) -> TickReport {
        let mut report = TickReport::default();
        while controller.needs_frame() && report.ticks < max_ticks {
            report.ticks += 1;
            self.total_ticks += 1;
            if matches!(controller.tick(self.tick), MotionEffect::Settled { .. }) {
                report.settled = true;
            }
        }
        self.accumulator = Duration::ZERO;
        report.needs_frame = controller.needs_frame();
        debug!(
            ticks = report.ticks,
            settled = report.settled,
            anchor = %controller.anchor(),
            "run_until_settled finished"
        );
        report
    }

    /// Advance by wall-clock time since the previous pump.
    ///
    /// The first pump only records the start instant.
    pub fn pump(&mut self, controller: &mut WindowMotionController) -> TickReport {
        let now = Instant::now();
        let elapsed = self
            .last_pump
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_pump = Some(now);
        self.advance(controller, elapsed)
    }
}
