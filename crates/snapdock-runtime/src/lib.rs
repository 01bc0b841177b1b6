#![forbid(unsafe_code)]

//! snapdock runtime
//!
//! Stateful half of snapdock: the per-window motion controller that eases a
//! floating window between anchors, its configuration, and a fixed-tick loop
//! for running it without a browser frame scheduler.
//!
//! # Key Components
//!
//! - [`WindowConfig`] - Anchors, margin, resize limits and tuning; loadable
//!   from TOML/JSON
//! - [`WindowMotionController`] - Owns [`MotionState`] and reacts to drag,
//!   resize, viewport and frame inputs
//! - [`MotionEffect`] / [`MotionEvent`] - Per-input transition diagnostics and
//!   drained observable events
//! - [`FixedTickLoop`] - Accumulator-based headless animation driver
//!
//! # How it fits in the system
//! Geometry lives in `snapdock-core` as pure functions. This crate sequences
//! it over time. Host bindings (`snapdock-web`) translate raw pointer events
//! into controller calls.

pub mod config;
pub mod frame_loop;
pub mod motion;
pub mod velocity;

pub use config::{ConfigError, DEFAULT_MARGIN, MotionTuning, ResizeConfig, WindowConfig};
pub use frame_loop::{DEFAULT_TICK, FixedTickLoop, TickReport};
pub use motion::{
    MotionEffect, MotionEvent, MotionNoopReason, MotionPhase, MotionState, WindowMotionController,
};
pub use velocity::VelocityWindow;
