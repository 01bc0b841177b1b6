#![forbid(unsafe_code)]

//! `snapdock-web` binds a snapdock window to a host that pushes pointer
//! events and animation frames, such as a browser page through a thin JS
//! shim.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes pointer, focus and
//!   frame callbacks; nothing here polls or blocks.
//! - **Deterministic time**: the host supplies frame timestamps explicitly
//!   through [`FrameClock`].
//! - **Scoped listeners**: document-level listeners live exactly as long as
//!   one drag or resize gesture, tracked by a [`pointer_capture::ListenerLease`].
//!
//! The crate does not bind to `wasm-bindgen`; it is the building block such a
//! binding would wrap.

pub mod pointer_capture;

use core::time::Duration;

pub use pointer_capture::{
    ListenerChange, ListenerHost, ListenerLease, ListenerScope, WindowPointerAdapter,
    WindowPointerButton, WindowPointerDispatch, WindowPointerIgnoredReason, WindowPointerOutcome,
    WindowPointerPhase, WindowPointerTarget,
};

/// Largest frame delta handed to the controller; longer gaps (a background
/// tab, a debugger pause) are treated as this long.
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Monotonic frame clock controlled by the host.
///
/// The host sets the timestamp of each animation frame; [`begin_frame`]
/// yields the time since the previous frame of the same run.
///
/// [`begin_frame`]: FrameClock::begin_frame
#[derive(Debug, Clone)]
pub struct FrameClock {
    now: Duration,
    last_frame: Option<Duration>,
    max_frame_delta: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            last_frame: None,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }

    #[must_use]
    pub fn with_max_frame_delta(mut self, max: Duration) -> Self {
        self.max_frame_delta = max;
        self
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Timestamps earlier than the current one
    /// are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Mark the start of a frame at the current time and return the capped
    /// time since the previous frame. The first frame of a run returns zero.
    pub fn begin_frame(&mut self) -> Duration {
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last| self.now.saturating_sub(last))
            .min(self.max_frame_delta);
        self.last_frame = Some(self.now);
        dt
    }

    /// End the current run; the next frame starts from zero again.
    pub fn pause(&mut self) {
        self.last_frame = None;
    }

    /// Whether a run of frames is in progress.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.last_frame.is_some()
    }
}
