#![forbid(unsafe_code)]

//! Headless replay of a [`ReplayScript`].
//!
//! One [`WindowMotionController`] is built from the script's config and
//! driven through every step in order. Each step is reported as one
//! [`ReplayRecord`]; with `emit_frames` every animation tick is reported
//! too. A final `summary` record closes the stream.
//!
//! # Invariants
//!
//! 1. Replays are deterministic: the same script yields byte-identical
//!    output.
//! 2. Controller events are drained after every step, so each event appears
//!    in exactly one record.

use core::time::Duration;
use std::io::Write;

use serde::Serialize;
use snapdock_core::{Anchor, Vector2, WindowGeometry};
use snapdock_runtime::{
    ConfigError, FixedTickLoop, MotionEffect, MotionEvent, MotionPhase, WindowMotionController,
};
use tracing::{debug, info};

use crate::script::{ReplayScript, ScriptStep};

/// Output knobs for a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Emit a `frame` record for every animation tick.
    pub emit_frames: bool,
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum ReplayRecord {
    Step {
        index: usize,
        op: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        effect: Option<MotionEffect>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ticks: Option<u32>,
        events: Vec<MotionEvent>,
        anchor: Anchor,
        phase: MotionPhase,
        geometry: WindowGeometry,
    },
    Frame {
        tick: u64,
        position: Vector2,
        phase: MotionPhase,
    },
    Summary(ReplaySummary),
}

/// Final state after a replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub steps: usize,
    pub ticks: u64,
    pub anchor: Anchor,
    pub geometry: WindowGeometry,
    /// The window ended at rest.
    pub at_rest: bool,
}

/// Errors that can occur while loading or replaying a script.
#[derive(Debug)]
pub enum ReplayError {
    /// I/O error reading the script or writing output.
    Io(std::io::Error),
    /// Script is not valid JSON for the script schema.
    Json(serde_json::Error),
    /// Script parsed but is semantically invalid.
    Script(String),
    /// Window configuration rejected.
    Config(ConfigError),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "script parse error: {e}"),
            Self::Script(msg) => write!(f, "invalid script: {msg}"),
            Self::Config(e) => write!(f, "invalid window config: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Script(_) => None,
        }
    }
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Replay `script`, handing every record to `sink` in order.
pub fn replay<F>(
    script: &ReplayScript,
    options: ReplayOptions,
    mut sink: F,
) -> Result<ReplaySummary, ReplayError>
where
    F: FnMut(&ReplayRecord) -> Result<(), ReplayError>,
{
    let mut controller = WindowMotionController::new(script.config.clone(), script.viewport)?;
    let tick = Duration::try_from_secs_f64(script.tick_ms / 1000.0)
        .map_err(|e| ReplayError::Script(format!("tick_ms {}: {e}", script.tick_ms)))?;
    let mut frame_loop = FixedTickLoop::new(tick);
    info!(
        steps = script.steps.len(),
        anchor = %controller.anchor(),
        "replay started"
    );

    for (index, step) in script.steps.iter().enumerate() {
        let (effect, ticks) = match *step {
            ScriptStep::PointerDown { x, y } => {
                (Some(controller.drag_start(Vector2::new(x, y))), None)
            }
            ScriptStep::PointerMove { x, y } => {
                (Some(controller.drag_move(Vector2::new(x, y))), None)
            }
            ScriptStep::PointerUp => (Some(controller.drag_end()), None),
            ScriptStep::PointerCancel => (Some(controller.drag_cancel()), None),
            ScriptStep::ResizeDown { x, y } => {
                (Some(controller.resize_start(Vector2::new(x, y))), None)
            }
            ScriptStep::ResizeMove { x, y } => {
                (Some(controller.resize_move(Vector2::new(x, y))), None)
            }
            ScriptStep::ResizeUp => (Some(controller.resize_end()), None),
            ScriptStep::Viewport { width, height } => (
                Some(controller.viewport_resized(Vector2::new(width, height))),
                None,
            ),
            ScriptStep::Frames { count } | ScriptStep::Settle { max_ticks: count } => {
                let ticks = run_ticks(&mut controller, &mut frame_loop, count, options, &mut sink)?;
                (None, Some(ticks))
            }
        };
        debug!(index, op = step.op(), ?effect, "step applied");
        sink(&ReplayRecord::Step {
            index,
            op: step.op(),
            effect,
            ticks,
            events: controller.drain_events(),
            anchor: controller.anchor(),
            phase: controller.phase(),
            geometry: controller.geometry(),
        })?;
    }

    let summary = ReplaySummary {
        steps: script.steps.len(),
        ticks: frame_loop.total_ticks(),
        anchor: controller.anchor(),
        geometry: controller.geometry(),
        at_rest: !controller.needs_frame(),
    };
    info!(
        anchor = %summary.anchor,
        ticks = summary.ticks,
        at_rest = summary.at_rest,
        "replay finished"
    );
    sink(&ReplayRecord::Summary(summary))?;
    Ok(summary)
}

/// Replay `script` writing one JSON object per line to `out`.
pub fn replay_to_writer<W: Write>(
    script: &ReplayScript,
    options: ReplayOptions,
    mut out: W,
) -> Result<ReplaySummary, ReplayError> {
    let summary = replay(script, options, |record| {
        serde_json::to_writer(&mut out, record).map_err(ReplayError::Json)?;
        out.write_all(b"\n").map_err(ReplayError::Io)
    })?;
    out.flush().map_err(ReplayError::Io)?;
    Ok(summary)
}

fn run_ticks<F>(
    controller: &mut WindowMotionController,
    frame_loop: &mut FixedTickLoop,
    max_ticks: u32,
    options: ReplayOptions,
    sink: &mut F,
) -> Result<u32, ReplayError>
where
    F: FnMut(&ReplayRecord) -> Result<(), ReplayError>,
{
    if !options.emit_frames {
        return Ok(frame_loop.run_until_settled(controller, max_ticks).ticks);
    }
    let mut ran = 0;
    while ran < max_ticks && controller.needs_frame() {
        let report = frame_loop.run_until_settled(controller, 1);
        ran += report.ticks;
        sink(&ReplayRecord::Frame {
            tick: frame_loop.total_ticks(),
            position: controller.geometry().position,
            phase: controller.phase(),
        })?;
    }
    Ok(ran)
}
