#![forbid(unsafe_code)]

//! Scripted, headless replay of snapdock window sessions.
//!
//! Scripts ([`script::ReplayScript`]) describe a window config, a viewport
//! and a list of pointer/viewport/frame steps. [`replay::replay`] runs them
//! against a [`snapdock_runtime::WindowMotionController`] on a fixed tick and
//! reports every step as a JSON-serializable record.

pub mod cli;
pub mod replay;
pub mod script;

pub use cli::{Cli, run, run_from_env};
pub use replay::{
    ReplayError, ReplayOptions, ReplayRecord, ReplaySummary, replay, replay_to_writer,
};
pub use script::{DEFAULT_SETTLE_TICKS, ReplayScript, ScriptStep};
