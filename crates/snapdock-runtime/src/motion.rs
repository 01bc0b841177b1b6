#![forbid(unsafe_code)]

//! Deterministic motion controller for one snapping window.
//!
//! [`WindowMotionController`] owns the [`MotionState`] of a window and is the
//! only thing that mutates it. Hosts feed it pointer and viewport events and
//! call [`tick`](WindowMotionController::tick) once per animation frame while
//! [`needs_frame`](WindowMotionController::needs_frame) is true. All geometry
//! decisions go through the pure resolvers in `snapdock_core`.
//!
//! ```text
//! Idle --drag_start--> Dragging --drag_end--> Animating --settle--> Idle
//!   \                      \--drag_cancel--/
//!    \--resize_start--> Resizing --resize_end--> Idle
//! ```
//!
//! # Invariants
//!
//! 1. Dragging and resizing are mutually exclusive. Starting one while the
//!    other is active is a [`MotionEffect::Noop`].
//! 2. When not dragging and no frame is needed, `current_pos == target_pos ==
//!    anchor_to_position(current_anchor, ..)`: the window only rests on an
//!    anchor.
//! 3. `current_anchor` is always a member of the configured anchor set.
//! 4. Width stays within the configured resize limits and height is always
//!    `width / aspect_ratio` when resizing is enabled.
//!
//! # Failure Modes
//!
//! - Out-of-order events (move without start, end without start) never
//!   panic; they return `Noop` with a [`MotionNoopReason`].
//! - A zero viewport is not special-cased: placement arithmetic runs on it
//!   unchanged and may put the window at negative coordinates.

use core::time::Duration;

use serde::Serialize;
use snapdock_core::{
    Anchor, AnchorPick, Placement, ResizeLimits, Vector2, WindowGeometry, anchor_to_position,
    closest_by_angle, closest_by_distance, position_to_anchor, resized_size, width_from_target,
};
use tracing::{debug, trace};

use crate::config::{ConfigError, MotionTuning, WindowConfig};
use crate::velocity::VelocityWindow;

/// Coarse lifecycle phase, derived from [`MotionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPhase {
    /// At rest on `current_anchor`.
    Idle,
    /// Pointer is holding the window body.
    Dragging,
    /// Gliding toward `target_pos` after a release.
    Animating,
    /// Pointer is holding the resize handle.
    Resizing,
}

/// Mutable per-window motion state.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    /// Rendered position (top-left corner).
    pub current_pos: Vector2,
    /// Position the window eases toward.
    pub target_pos: Vector2,
    pub current_anchor: Anchor,
    pub is_dragging: bool,
    pub is_resizing: bool,
    /// Recent drag deltas, the velocity proxy used on release.
    pub recent_deltas: VelocityWindow,
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionNoopReason {
    /// Drag move/end/cancel without an active drag.
    NotDragging,
    /// Resize move/end without an active resize.
    NotResizing,
    /// Drag start while a drag is already active.
    DragAlreadyActive,
    /// Resize start while a resize is already active.
    ResizeAlreadyActive,
    /// Drag start while the resize handle is held.
    ResizeInProgress,
    /// Resize start while the window body is held.
    DragInProgress,
    /// Resize input on a window configured without a resize handle.
    ResizeDisabled,
    /// Frame requested while the window is already at rest.
    AtRest,
}

/// Transition diagnostic returned by every controller input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum MotionEffect {
    DragStarted {
        pointer: Vector2,
    },
    DragMoved {
        delta: Vector2,
        target: Vector2,
    },
    /// Drag released and a new anchor chosen.
    Released {
        anchor: Anchor,
        target: Vector2,
        flick: bool,
    },
    /// Drag interrupted; gliding back to the unchanged anchor.
    DragCanceled {
        anchor: Anchor,
        target: Vector2,
    },
    ResizeStarted {
        size: Vector2,
    },
    ResizeUpdated {
        size: Vector2,
        position: Vector2,
    },
    ResizeEnded {
        size: Vector2,
    },
    ViewportChanged {
        viewport: Vector2,
        size: Vector2,
        target: Vector2,
    },
    /// One animation step; more frames are needed.
    Stepped {
        position: Vector2,
    },
    /// Animation finished exactly on the anchor.
    Settled {
        anchor: Anchor,
        position: Vector2,
    },
    Noop {
        reason: MotionNoopReason,
    },
}

/// Externally observable changes, queued until drained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MotionEvent {
    AnchorChanged { from: Anchor, to: Anchor },
    Resized { size: Vector2 },
    Settled { anchor: Anchor, position: Vector2 },
}

/// Owner of one window's [`MotionState`].
#[derive(Debug, Clone)]
pub struct WindowMotionController {
    config: WindowConfig,
    state: MotionState,
    size: Vector2,
    viewport: Vector2,
    last_pointer: Vector2,
    resize_origin: Option<ResizeOrigin>,
    events: Vec<MotionEvent>,
}

#[derive(Debug, Clone, Copy)]
struct ResizeOrigin {
    pointer: Vector2,
    size: Vector2,
    /// Most recent handle position.
    latest: Vector2,
}

impl WindowMotionController {
    /// Mount a window at its default anchor inside `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `config` fails validation.
    pub fn new(config: WindowConfig, viewport: Vector2) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let anchor = config.anchors.default_anchor();
        let size = config.initial_size();
        let position = anchor_to_position(
            anchor,
            &Placement::new(config.margin, size, viewport),
        );
        debug!(
            anchor = %anchor,
            x = position.x,
            y = position.y,
            width = size.x,
            height = size.y,
            "window mounted"
        );
        Ok(Self {
            state: MotionState {
                current_pos: position,
                target_pos: position,
                current_anchor: anchor,
                is_dragging: false,
                is_resizing: false,
                recent_deltas: VelocityWindow::new(config.tuning.velocity_window),
            },
            config,
            size,
            viewport,
            last_pointer: Vector2::ZERO,
            resize_origin: None,
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    #[must_use]
    pub fn tuning(&self) -> &MotionTuning {
        &self.config.tuning
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.state.current_anchor
    }

    #[must_use]
    pub fn size(&self) -> Vector2 {
        self.size
    }

    #[must_use]
    pub fn viewport(&self) -> Vector2 {
        self.viewport
    }

    /// Rendered geometry for the current frame.
    #[must_use]
    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry::new(self.state.current_pos, self.size)
    }

    /// Anchor the resize handle is drawn at, if resizing is enabled.
    #[must_use]
    pub fn resize_handle(&self) -> Option<Anchor> {
        self.config
            .resize_enabled()
            .then(|| self.state.current_anchor.opposite())
    }

    #[must_use]
    pub fn phase(&self) -> MotionPhase {
        if self.state.is_dragging {
            MotionPhase::Dragging
        } else if self.state.is_resizing {
            MotionPhase::Resizing
        } else if self.state.current_pos != self.state.target_pos {
            MotionPhase::Animating
        } else {
            MotionPhase::Idle
        }
    }

    /// Whether the host should schedule another animation frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.state.is_dragging || self.state.current_pos != self.state.target_pos
    }

    /// Take every queued [`MotionEvent`] in emission order.
    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------
    // Drag
    // -----------------------------------------------------------------

    /// Pointer down on the window body.
    pub fn drag_start(&mut self, pointer: Vector2) -> MotionEffect {
        if self.state.is_resizing {
            return self.noop(MotionNoopReason::ResizeInProgress);
        }
        if self.state.is_dragging {
            return self.noop(MotionNoopReason::DragAlreadyActive);
        }
        self.state.is_dragging = true;
        self.state.recent_deltas.clear();
        // Grabbing a gliding window holds it where it is drawn.
        self.state.target_pos = self.state.current_pos;
        self.last_pointer = pointer;
        debug!(x = pointer.x, y = pointer.y, anchor = %self.state.current_anchor, "drag started");
        MotionEffect::DragStarted { pointer }
    }

    /// Pointer moved while holding the window body.
    pub fn drag_move(&mut self, pointer: Vector2) -> MotionEffect {
        if !self.state.is_dragging {
            return self.noop(MotionNoopReason::NotDragging);
        }
        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;
        self.state.target_pos = self.state.target_pos + delta;
        self.state.recent_deltas.push(delta);
        trace!(dx = delta.x, dy = delta.y, "drag moved");
        MotionEffect::DragMoved {
            delta,
            target: self.state.target_pos,
        }
    }

    /// Pointer released: pick the next anchor and start gliding to it.
    pub fn drag_end(&mut self) -> MotionEffect {
        if !self.state.is_dragging {
            return self.noop(MotionNoopReason::NotDragging);
        }
        self.state.is_dragging = false;

        let velocity = self.state.recent_deltas.average();
        self.state.recent_deltas.clear();
        let flick = velocity.magnitude() > self.config.tuning.flick_threshold;
        let placement = self.placement();
        let release = self.state.target_pos;
        let pick = if flick {
            closest_by_angle(
                release,
                velocity,
                &self.config.anchors,
                &placement,
                self.config.tuning.angle_tie_epsilon,
            )
        } else {
            closest_by_distance(release, &self.config.anchors, &placement)
        };

        let anchor = self.resolve_anchor(pick, &placement);
        self.state.target_pos = pick.position;
        self.set_anchor(anchor);
        debug!(
            anchor = %anchor,
            flick,
            speed = velocity.magnitude(),
            "drag released"
        );
        MotionEffect::Released {
            anchor,
            target: pick.position,
            flick,
        }
    }

    /// Interrupted drag (blur, lost capture, unmount): glide back home.
    pub fn drag_cancel(&mut self) -> MotionEffect {
        if !self.state.is_dragging {
            return self.noop(MotionNoopReason::NotDragging);
        }
        self.state.is_dragging = false;
        self.state.recent_deltas.clear();
        let anchor = self.state.current_anchor;
        self.state.target_pos = anchor_to_position(anchor, &self.placement());
        debug!(anchor = %anchor, "drag canceled");
        MotionEffect::DragCanceled {
            anchor,
            target: self.state.target_pos,
        }
    }

    // -----------------------------------------------------------------
    // Resize handle
    // -----------------------------------------------------------------

    /// Pointer down on the resize handle.
    pub fn resize_start(&mut self, pointer: Vector2) -> MotionEffect {
        if self.limits().is_none() {
            return self.noop(MotionNoopReason::ResizeDisabled);
        }
        if self.state.is_dragging {
            return self.noop(MotionNoopReason::DragInProgress);
        }
        if self.state.is_resizing {
            return self.noop(MotionNoopReason::ResizeAlreadyActive);
        }
        self.state.is_resizing = true;
        self.resize_origin = Some(ResizeOrigin {
            pointer,
            size: self.size,
            latest: pointer,
        });
        debug!(width = self.size.x, handle = %self.state.current_anchor.opposite(), "resize started");
        MotionEffect::ResizeStarted { size: self.size }
    }

    /// Pointer moved while holding the resize handle.
    pub fn resize_move(&mut self, pointer: Vector2) -> MotionEffect {
        let (Some(limits), Some(origin)) = (self.limits(), self.resize_origin) else {
            return self.noop(MotionNoopReason::NotResizing);
        };
        self.resize_origin = Some(ResizeOrigin {
            latest: pointer,
            ..origin
        });
        let size = resized_size(
            self.state.current_anchor,
            origin.size,
            pointer - origin.pointer,
            &limits,
        );
        self.apply_size(size);
        // Pinned edge stays put while the opposite one follows the handle.
        self.retarget();
        MotionEffect::ResizeUpdated {
            size,
            position: self.state.target_pos,
        }
    }

    /// Pointer released from the resize handle.
    pub fn resize_end(&mut self) -> MotionEffect {
        if self.resize_origin.take().is_none() {
            return self.noop(MotionNoopReason::NotResizing);
        }
        self.state.is_resizing = false;
        debug!(width = self.size.x, height = self.size.y, "resize ended");
        MotionEffect::ResizeEnded { size: self.size }
    }

    // -----------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------

    /// Host viewport changed size.
    ///
    /// The window keeps its anchor. With resizing enabled its width keeps
    /// the same fraction of the viewport width. A held window keeps its
    /// target; an animating one is retargeted; a resting one jumps.
    pub fn viewport_resized(&mut self, viewport: Vector2) -> MotionEffect {
        let previous = self.viewport;
        self.viewport = viewport;
        if let Some(limits) = self.limits()
            && previous.x > 0.0
        {
            let fraction = self.size.x / previous.x;
            self.apply_size(width_from_target(fraction * viewport.x, &limits));
            // Later handle moves continue from the rescaled size.
            if let Some(origin) = self.resize_origin.as_mut() {
                origin.pointer = origin.latest;
                origin.size = self.size;
            }
        }
        if !self.state.is_dragging {
            self.retarget();
        }
        debug!(
            width = viewport.x,
            height = viewport.y,
            anchor = %self.state.current_anchor,
            "viewport resized"
        );
        MotionEffect::ViewportChanged {
            viewport,
            size: self.size,
            target: self.state.target_pos,
        }
    }

    // -----------------------------------------------------------------
    // Animation
    // -----------------------------------------------------------------

    /// Advance the animation by `dt` of wall time.
    ///
    /// Smoothing factors are per reference frame; `dt` is converted into a
    /// (possibly fractional) frame count so easing speed does not depend on
    /// the host's frame rate.
    pub fn tick(&mut self, dt: Duration) -> MotionEffect {
        let frames = dt.as_secs_f64() * self.config.tuning.reference_frame_rate;
        self.advance_frames(frames)
    }

    /// Advance the animation by exactly one reference frame.
    pub fn step(&mut self) -> MotionEffect {
        self.advance_frames(1.0)
    }

    fn advance_frames(&mut self, frames: f64) -> MotionEffect {
        if !self.needs_frame() {
            return MotionEffect::Noop {
                reason: MotionNoopReason::AtRest,
            };
        }
        let smoothing = if self.state.is_dragging {
            self.config.tuning.drag_smoothing
        } else {
            self.config.tuning.snap_smoothing
        };
        let factor = 1.0 - (1.0 - smoothing).powf(frames.max(0.0));
        self.state.current_pos = self.state.current_pos.lerp(self.state.target_pos, factor);

        if !self.state.is_dragging
            && self.state.current_pos.distance(self.state.target_pos)
                <= self.config.tuning.settle_epsilon
        {
            self.state.current_pos = self.state.target_pos;
            let anchor = self.state.current_anchor;
            let position = self.state.current_pos;
            self.events.push(MotionEvent::Settled { anchor, position });
            debug!(anchor = %anchor, x = position.x, y = position.y, "window settled");
            return MotionEffect::Settled { anchor, position };
        }
        MotionEffect::Stepped {
            position: self.state.current_pos,
        }
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn placement(&self) -> Placement {
        Placement::new(self.config.margin, self.size, self.viewport)
    }

    fn limits(&self) -> Option<ResizeLimits> {
        self.config.resize.as_ref().map(|resize| resize.limits())
    }

    /// Anchor of `pick`'s position per the canonical table, provided it is
    /// one the window may use.
    fn resolve_anchor(&self, pick: AnchorPick, placement: &Placement) -> Anchor {
        let resolved = position_to_anchor(pick.position, placement);
        if self.config.anchors.contains(resolved) {
            resolved
        } else {
            pick.anchor
        }
    }

    fn set_anchor(&mut self, anchor: Anchor) {
        let from = self.state.current_anchor;
        if from != anchor {
            self.state.current_anchor = anchor;
            self.events.push(MotionEvent::AnchorChanged { from, to: anchor });
        }
    }

    fn apply_size(&mut self, size: Vector2) {
        if size != self.size {
            self.size = size;
            self.events.push(MotionEvent::Resized { size });
        }
    }

    /// Re-resolve the target for the current anchor. A resting window
    /// follows immediately.
    fn retarget(&mut self) {
        let at_rest = self.state.current_pos == self.state.target_pos;
        self.state.target_pos = anchor_to_position(self.state.current_anchor, &self.placement());
        if at_rest {
            self.state.current_pos = self.state.target_pos;
        }
    }

    fn noop(&self, reason: MotionNoopReason) -> MotionEffect {
        trace!(?reason, phase = ?self.phase(), "input ignored");
        MotionEffect::Noop { reason }
    }
}
