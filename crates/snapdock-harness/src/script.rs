#![forbid(unsafe_code)]

//! Replay script format.
//!
//! A script is a JSON document describing one window and the gestures
//! applied to it:
//!
//! ```json
//! {
//!   "config": { "anchors": ["NW", "NE"], "margin": 15 },
//!   "viewport": { "x": 1000, "y": 800 },
//!   "steps": [
//!     { "op": "pointer_down", "x": 50, "y": 50 },
//!     { "op": "pointer_move", "x": 550, "y": 50 },
//!     { "op": "pointer_up" },
//!     { "op": "settle" }
//!   ]
//! }
//! ```
//!
//! `config` accepts every field of [`WindowConfig`] and defaults like it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use snapdock_core::Vector2;
use snapdock_runtime::WindowConfig;

use crate::replay::ReplayError;

/// Ticks allowed for a `settle` step that does not say otherwise.
pub const DEFAULT_SETTLE_TICKS: u32 = 10_000;

/// Scripted window session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub config: WindowConfig,
    /// Initial viewport size.
    pub viewport: Vector2,
    /// Tick length in milliseconds (default: one 60 Hz frame).
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f64,
    pub steps: Vec<ScriptStep>,
}

fn default_tick_ms() -> f64 {
    1000.0 / 60.0
}

fn default_settle_ticks() -> u32 {
    DEFAULT_SETTLE_TICKS
}

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Press on the window body.
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// Interrupt the drag (blur, lost capture).
    PointerCancel,
    /// Press on the resize handle.
    ResizeDown { x: f64, y: f64 },
    ResizeMove { x: f64, y: f64 },
    ResizeUp,
    /// Host viewport resized.
    Viewport { width: f64, height: f64 },
    /// Run up to `count` animation ticks.
    Frames { count: u32 },
    /// Run ticks until the window rests.
    Settle {
        #[serde(default = "default_settle_ticks")]
        max_ticks: u32,
    },
}

impl ScriptStep {
    /// Stable operation name used in output records.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::ResizeDown { .. } => "resize_down",
            Self::ResizeMove { .. } => "resize_move",
            Self::ResizeUp => "resize_up",
            Self::Viewport { .. } => "viewport",
            Self::Frames { .. } => "frames",
            Self::Settle { .. } => "settle",
        }
    }
}

impl ReplayScript {
    /// Parse a script from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, ReplayError> {
        let script: Self = serde_json::from_str(s).map_err(ReplayError::Json)?;
        script.validate()?;
        Ok(script)
    }

    /// Read and parse a script file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ReplayError::Io)?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<(), ReplayError> {
        if !(self.tick_ms.is_finite() && self.tick_ms > 0.0) {
            return Err(ReplayError::Script(format!(
                "tick_ms must be finite and > 0, got {}",
                self.tick_ms
            )));
        }
        if !self.viewport.is_finite() {
            return Err(ReplayError::Script("viewport must be finite".into()));
        }
        Ok(())
    }
}
