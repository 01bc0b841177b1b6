#![forbid(unsafe_code)]

//! Deterministic pointer adapter for snapping windows.
//!
//! This module bridges host pointer lifecycle signals into
//! [`WindowMotionController`] calls while enforcing:
//! - one active pointer at a time,
//! - document-level listeners scoped to a single gesture through a
//!   [`ListenerLease`], and
//! - cancellation on interruption paths (blur/visibility/lost-capture/unmount).
//!
//! # Invariants
//!
//! 1. A lease exists exactly while a pointer is active.
//! 2. Every `attach` the host sees is followed by exactly one `detach` for
//!    the same scope and pointer, including when the adapter is dropped
//!    mid-gesture.
//! 3. At most one animation frame request is outstanding at a time.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use snapdock_core::Vector2;
use snapdock_runtime::{MotionEffect, MotionEvent, MotionNoopReason, WindowMotionController};
use tracing::{debug, trace};

use crate::FrameClock;

/// Element that received the pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPointerTarget {
    /// The window body: starts a drag.
    Body,
    /// The resize handle: starts a resize.
    ResizeHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
}

/// Group of document-level listeners registered for one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerScope {
    Drag,
    Resize,
}

impl From<WindowPointerTarget> for ListenerScope {
    fn from(target: WindowPointerTarget) -> Self {
        match target {
            WindowPointerTarget::Body => Self::Drag,
            WindowPointerTarget::ResizeHandle => Self::Resize,
        }
    }
}

/// Host side of the adapter: listener registration and frame scheduling.
///
/// Implementations are expected to be cheap handles (a JS object reference,
/// an `Rc` to a recorder) since every [`ListenerLease`] keeps a clone.
pub trait ListenerHost: Clone {
    /// Register pointer-move/up listeners for `scope` and capture `pointer_id`.
    fn attach(&mut self, scope: ListenerScope, pointer_id: u32);

    /// Remove the listeners registered by the matching [`attach`](Self::attach).
    fn detach(&mut self, scope: ListenerScope, pointer_id: u32);

    /// Schedule one animation frame callback.
    fn request_frame(&mut self);
}

/// Scoped listener registration. Attaches on acquire, detaches on drop.
#[derive(Debug)]
pub struct ListenerLease<H: ListenerHost> {
    host: H,
    scope: ListenerScope,
    pointer_id: u32,
}

impl<H: ListenerHost> ListenerLease<H> {
    /// Register listeners for `scope` on `host`.
    pub fn acquire(mut host: H, scope: ListenerScope, pointer_id: u32) -> Self {
        host.attach(scope, pointer_id);
        debug!(?scope, pointer_id, "listener lease acquired");
        Self {
            host,
            scope,
            pointer_id,
        }
    }

    #[must_use]
    pub const fn scope(&self) -> ListenerScope {
        self.scope
    }

    #[must_use]
    pub const fn pointer_id(&self) -> u32 {
        self.pointer_id
    }
}

impl<H: ListenerHost> Drop for ListenerLease<H> {
    fn drop(&mut self) {
        self.host.detach(self.scope, self.pointer_id);
        debug!(scope = ?self.scope, pointer_id = self.pointer_id, "listener lease released");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePointer {
    pointer_id: u32,
    target: WindowPointerTarget,
    button: WindowPointerButton,
    capture_state: CaptureState,
}

/// Lifecycle phase recorded for one adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPointerPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    PointerLeave,
    Blur,
    VisibilityHidden,
    LostPointerCapture,
    CaptureAcquired,
    Unmount,
}

/// Deterministic reason why an incoming lifecycle signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPointerIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    LeaveWhileCaptured,
    /// The controller refused the input.
    ControllerNoop(MotionNoopReason),
}

/// Listener registration change caused by one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum ListenerChange {
    Attached { scope: ListenerScope, pointer_id: u32 },
    Detached { scope: ListenerScope, pointer_id: u32 },
}

/// Outcome category for one lifecycle dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum WindowPointerOutcome {
    Forwarded,
    CaptureStateUpdated,
    Ignored(WindowPointerIgnoredReason),
}

/// Result of one pointer lifecycle dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowPointerDispatch {
    pub phase: WindowPointerPhase,
    pub pointer_id: Option<u32>,
    pub target: Option<WindowPointerTarget>,
    pub effect: Option<MotionEffect>,
    pub listeners: Option<ListenerChange>,
    pub outcome: WindowPointerOutcome,
}

impl WindowPointerDispatch {
    fn ignored(
        phase: WindowPointerPhase,
        reason: WindowPointerIgnoredReason,
        pointer_id: Option<u32>,
        target: Option<WindowPointerTarget>,
    ) -> Self {
        trace!(?phase, ?reason, ?pointer_id, "pointer signal ignored");
        Self {
            phase,
            pointer_id,
            target,
            effect: None,
            listeners: None,
            outcome: WindowPointerOutcome::Ignored(reason),
        }
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, WindowPointerOutcome::Ignored(_))
    }
}

/// Pointer and frame adapter for one mounted window.
///
/// Owns the window's [`WindowMotionController`] and translates host pointer
/// lifecycle into controller calls, keeping a [`ListenerLease`] alive for
/// the duration of each gesture. Dropping the adapter is unmounting it.
#[derive(Debug)]
pub struct WindowPointerAdapter<H: ListenerHost> {
    controller: WindowMotionController,
    host: H,
    clock: FrameClock,
    activation_button: WindowPointerButton,
    active: Option<ActivePointer>,
    lease: Option<ListenerLease<H>>,
    frame_requested: bool,
}

impl<H: ListenerHost> WindowPointerAdapter<H> {
    /// Mount `controller` on `host`.
    pub fn new(controller: WindowMotionController, host: H) -> Self {
        Self {
            controller,
            host,
            clock: FrameClock::new(),
            activation_button: WindowPointerButton::Primary,
            active: None,
            lease: None,
            frame_requested: false,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn controller(&self) -> &WindowMotionController {
        &self.controller
    }

    /// Take every queued controller event in emission order.
    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        self.controller.drain_events()
    }

    /// Unmount and hand back the controller.
    #[must_use]
    pub fn into_controller(mut self) -> WindowMotionController {
        self.unmount();
        self.controller
    }

    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|active| active.pointer_id)
    }

    /// Scope of the live listener lease, if any.
    #[must_use]
    pub fn lease_scope(&self) -> Option<ListenerScope> {
        self.lease.as_ref().map(ListenerLease::scope)
    }

    /// Whether a frame request is outstanding.
    #[must_use]
    pub const fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Handle pointer-down on the window body or resize handle.
    pub fn pointer_down(
        &mut self,
        target: WindowPointerTarget,
        pointer_id: u32,
        button: WindowPointerButton,
        position: Vector2,
    ) -> WindowPointerDispatch {
        let phase = WindowPointerPhase::PointerDown;
        if pointer_id == 0 {
            return WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::InvalidPointerId,
                Some(pointer_id),
                Some(target),
            );
        }
        if button != self.activation_button {
            return WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
                Some(target),
            );
        }
        if self.active.is_some() {
            return WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::ActivePointerAlreadyInProgress,
                Some(pointer_id),
                Some(target),
            );
        }

        let effect = match target {
            WindowPointerTarget::Body => self.controller.drag_start(position),
            WindowPointerTarget::ResizeHandle => self.controller.resize_start(position),
        };
        if let MotionEffect::Noop { reason } = effect {
            return WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::ControllerNoop(reason),
                Some(pointer_id),
                Some(target),
            );
        }

        let scope = ListenerScope::from(target);
        self.lease = Some(ListenerLease::acquire(self.host.clone(), scope, pointer_id));
        self.active = Some(ActivePointer {
            pointer_id,
            target,
            button,
            capture_state: CaptureState::Requested,
        });
        self.schedule_frame();
        Self::forwarded(
            phase,
            Some(pointer_id),
            Some(target),
            effect,
            Some(ListenerChange::Attached { scope, pointer_id }),
        )
    }

    /// Mark host pointer capture as successfully acquired.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> WindowPointerDispatch {
        let phase = WindowPointerPhase::CaptureAcquired;
        let active = match self.matching_active(phase, Some(pointer_id)) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        self.active = Some(ActivePointer {
            capture_state: CaptureState::Acquired,
            ..active
        });
        WindowPointerDispatch {
            phase,
            pointer_id: Some(pointer_id),
            target: Some(active.target),
            effect: None,
            listeners: None,
            outcome: WindowPointerOutcome::CaptureStateUpdated,
        }
    }

    /// Handle pointer-move during an active gesture.
    pub fn pointer_move(&mut self, pointer_id: u32, position: Vector2) -> WindowPointerDispatch {
        let phase = WindowPointerPhase::PointerMove;
        let active = match self.matching_active(phase, Some(pointer_id)) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        let effect = match active.target {
            WindowPointerTarget::Body => self.controller.drag_move(position),
            WindowPointerTarget::ResizeHandle => self.controller.resize_move(position),
        };
        Self::forwarded(phase, Some(pointer_id), Some(active.target), effect, None)
    }

    /// Handle pointer-up and end the active gesture.
    pub fn pointer_up(
        &mut self,
        pointer_id: u32,
        button: WindowPointerButton,
    ) -> WindowPointerDispatch {
        let phase = WindowPointerPhase::PointerUp;
        let active = match self.matching_active(phase, Some(pointer_id)) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        if active.button != button {
            return WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::ButtonMismatch,
                Some(pointer_id),
                Some(active.target),
            );
        }
        let effect = match active.target {
            WindowPointerTarget::Body => self.controller.drag_end(),
            WindowPointerTarget::ResizeHandle => self.controller.resize_end(),
        };
        let listeners = self.release();
        self.schedule_frame();
        Self::forwarded(phase, Some(pointer_id), Some(active.target), effect, listeners)
    }

    /// Handle host pointer-cancel events.
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> WindowPointerDispatch {
        self.cancel_active(WindowPointerPhase::PointerCancel, pointer_id)
    }

    /// Handle pointer-leave. Cancels only if capture was never acknowledged.
    pub fn pointer_leave(&mut self, pointer_id: u32) -> WindowPointerDispatch {
        let phase = WindowPointerPhase::PointerLeave;
        let active = match self.matching_active(phase, Some(pointer_id)) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        if active.capture_state == CaptureState::Requested {
            self.cancel_active(phase, Some(pointer_id))
        } else {
            WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::LeaveWhileCaptured,
                Some(pointer_id),
                Some(active.target),
            )
        }
    }

    /// Handle window blur.
    pub fn blur(&mut self) -> WindowPointerDispatch {
        self.cancel_active(WindowPointerPhase::Blur, None)
    }

    /// Handle visibility-hidden interruptions.
    pub fn visibility_hidden(&mut self) -> WindowPointerDispatch {
        self.cancel_active(WindowPointerPhase::VisibilityHidden, None)
    }

    /// Handle `lostpointercapture`.
    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> WindowPointerDispatch {
        self.cancel_active(WindowPointerPhase::LostPointerCapture, Some(pointer_id))
    }

    /// Tear down any active gesture ahead of dropping the adapter.
    pub fn unmount(&mut self) -> WindowPointerDispatch {
        let dispatch = self.cancel_active(WindowPointerPhase::Unmount, None);
        self.clock.pause();
        dispatch
    }

    /// Host viewport changed size.
    pub fn viewport_resized(&mut self, viewport: Vector2) -> MotionEffect {
        let effect = self.controller.viewport_resized(viewport);
        self.schedule_frame();
        effect
    }

    /// Animation frame callback with the host's monotonic timestamp.
    ///
    /// Advances the controller by the time since the previous frame and
    /// requests another frame only while the window is still moving.
    pub fn animation_frame(&mut self, now: Duration) -> MotionEffect {
        self.frame_requested = false;
        self.clock.set(now);
        let dt = self.clock.begin_frame();
        let effect = self.controller.tick(dt);
        if self.controller.needs_frame() {
            self.schedule_frame();
        } else {
            self.clock.pause();
        }
        effect
    }

    fn schedule_frame(&mut self) {
        if self.controller.needs_frame() && !self.frame_requested {
            self.frame_requested = true;
            self.host.request_frame();
        }
    }

    fn matching_active(
        &self,
        phase: WindowPointerPhase,
        pointer_id: Option<u32>,
    ) -> Result<ActivePointer, WindowPointerDispatch> {
        let Some(active) = self.active else {
            return Err(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::NoActivePointer,
                pointer_id,
                None,
            ));
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            return Err(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::PointerMismatch,
                Some(id),
                Some(active.target),
            ));
        }
        Ok(active)
    }

    fn cancel_active(
        &mut self,
        phase: WindowPointerPhase,
        pointer_id: Option<u32>,
    ) -> WindowPointerDispatch {
        let active = match self.matching_active(phase, pointer_id) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        // An interrupted resize keeps the size reached so far.
        let effect = match active.target {
            WindowPointerTarget::Body => self.controller.drag_cancel(),
            WindowPointerTarget::ResizeHandle => self.controller.resize_end(),
        };
        debug!(?phase, pointer_id = active.pointer_id, "gesture interrupted");
        let listeners = self.release();
        self.schedule_frame();
        Self::forwarded(
            phase,
            Some(active.pointer_id),
            Some(active.target),
            effect,
            listeners,
        )
    }

    /// Drop the lease (detaching listeners) and clear the active pointer.
    fn release(&mut self) -> Option<ListenerChange> {
        self.active = None;
        self.lease.take().map(|lease| ListenerChange::Detached {
            scope: lease.scope(),
            pointer_id: lease.pointer_id(),
        })
    }

    fn forwarded(
        phase: WindowPointerPhase,
        pointer_id: Option<u32>,
        target: Option<WindowPointerTarget>,
        effect: MotionEffect,
        listeners: Option<ListenerChange>,
    ) -> WindowPointerDispatch {
        WindowPointerDispatch {
            phase,
            pointer_id,
            target,
            effect: Some(effect),
            listeners,
            outcome: WindowPointerOutcome::Forwarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snapdock_core::{Anchor, AnchorSet};
    use snapdock_runtime::{MotionPhase, ResizeConfig, WindowConfig};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum HostCall {
        Attach(ListenerScope, u32),
        Detach(ListenerScope, u32),
        RequestFrame,
    }

    #[derive(Debug, Clone, Default)]
    struct RecordingHost(Rc<RefCell<Vec<HostCall>>>);

    impl RecordingHost {
        fn calls(&self) -> Vec<HostCall> {
            self.0.borrow().clone()
        }

        fn listener_calls(&self) -> Vec<HostCall> {
            self.calls()
                .into_iter()
                .filter(|call| !matches!(call, HostCall::RequestFrame))
                .collect()
        }

        fn frame_requests(&self) -> usize {
            self.calls()
                .iter()
                .filter(|call| matches!(call, HostCall::RequestFrame))
                .count()
        }
    }

    impl ListenerHost for RecordingHost {
        fn attach(&mut self, scope: ListenerScope, pointer_id: u32) {
            self.0.borrow_mut().push(HostCall::Attach(scope, pointer_id));
        }
        fn detach(&mut self, scope: ListenerScope, pointer_id: u32) {
            self.0.borrow_mut().push(HostCall::Detach(scope, pointer_id));
        }
        fn request_frame(&mut self) {
            self.0.borrow_mut().push(HostCall::RequestFrame);
        }
    }

    fn controller(resize: bool) -> WindowMotionController {
        let mut config = WindowConfig::new(AnchorSet::new([Anchor::NW, Anchor::NE]).unwrap())
            .with_element_size(Vector2::new(100.0, 100.0));
        if resize {
            config = config.with_resize(ResizeConfig::default());
        }
        WindowMotionController::new(config, Vector2::new(1000.0, 800.0)).unwrap()
    }

    fn adapter(resize: bool) -> (WindowPointerAdapter<RecordingHost>, RecordingHost) {
        let host = RecordingHost::default();
        (WindowPointerAdapter::new(controller(resize), host.clone()), host)
    }

    fn down(adapter: &mut WindowPointerAdapter<RecordingHost>, id: u32) -> WindowPointerDispatch {
        adapter.pointer_down(
            WindowPointerTarget::Body,
            id,
            WindowPointerButton::Primary,
            Vector2::new(50.0, 50.0),
        )
    }

    #[test]
    fn pointer_down_acquires_drag_lease() {
        let (mut adapter, host) = adapter(false);
        let dispatch = down(&mut adapter, 7);
        assert_eq!(dispatch.outcome, WindowPointerOutcome::Forwarded);
        assert_eq!(
            dispatch.listeners,
            Some(ListenerChange::Attached {
                scope: ListenerScope::Drag,
                pointer_id: 7
            })
        );
        assert_eq!(adapter.active_pointer_id(), Some(7));
        assert_eq!(adapter.lease_scope(), Some(ListenerScope::Drag));
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Attach(ListenerScope::Drag, 7),
                HostCall::RequestFrame
            ]
        );
    }

    #[test]
    fn pointer_up_releases_lease() {
        let (mut adapter, host) = adapter(false);
        down(&mut adapter, 7);
        adapter.pointer_move(7, Vector2::new(650.0, 50.0));
        let dispatch = adapter.pointer_up(7, WindowPointerButton::Primary);
        assert!(matches!(
            dispatch.effect,
            Some(MotionEffect::Released {
                anchor: Anchor::NE,
                ..
            })
        ));
        assert_eq!(adapter.lease_scope(), None);
        assert_eq!(
            host.listener_calls(),
            vec![
                HostCall::Attach(ListenerScope::Drag, 7),
                HostCall::Detach(ListenerScope::Drag, 7),
            ]
        );
    }

    #[test]
    fn every_interruption_releases_lease() {
        type Interrupt = fn(&mut WindowPointerAdapter<RecordingHost>) -> WindowPointerDispatch;
        let interrupts: [(WindowPointerPhase, Interrupt); 6] = [
            (WindowPointerPhase::PointerCancel, |a| a.pointer_cancel(Some(3))),
            (WindowPointerPhase::PointerLeave, |a| a.pointer_leave(3)),
            (WindowPointerPhase::Blur, |a| a.blur()),
            (WindowPointerPhase::VisibilityHidden, |a| a.visibility_hidden()),
            (WindowPointerPhase::LostPointerCapture, |a| a.lost_pointer_capture(3)),
            (WindowPointerPhase::Unmount, |a| a.unmount()),
        ];
        for (phase, interrupt) in interrupts {
            let (mut adapter, host) = adapter(false);
            down(&mut adapter, 3);
            adapter.pointer_move(3, Vector2::new(400.0, 300.0));
            let dispatch = interrupt(&mut adapter);
            assert_eq!(dispatch.phase, phase);
            assert!(
                matches!(dispatch.effect, Some(MotionEffect::DragCanceled { .. })),
                "{phase:?} should cancel the drag"
            );
            assert_eq!(adapter.active_pointer_id(), None, "{phase:?}");
            assert_eq!(
                host.listener_calls(),
                vec![
                    HostCall::Attach(ListenerScope::Drag, 3),
                    HostCall::Detach(ListenerScope::Drag, 3),
                ],
                "{phase:?}"
            );
        }
    }

    #[test]
    fn drop_releases_live_lease() {
        let (mut adapter, host) = adapter(true);
        adapter.pointer_down(
            WindowPointerTarget::ResizeHandle,
            9,
            WindowPointerButton::Primary,
            Vector2::new(400.0, 300.0),
        );
        drop(adapter);
        assert_eq!(
            host.listener_calls(),
            vec![
                HostCall::Attach(ListenerScope::Resize, 9),
                HostCall::Detach(ListenerScope::Resize, 9),
            ]
        );
    }

    #[test]
    fn leave_after_capture_is_ignored() {
        let (mut adapter, _host) = adapter(false);
        down(&mut adapter, 4);
        adapter.capture_acquired(4);
        let dispatch = adapter.pointer_leave(4);
        assert_eq!(
            dispatch.outcome,
            WindowPointerOutcome::Ignored(WindowPointerIgnoredReason::LeaveWhileCaptured)
        );
        assert_eq!(adapter.active_pointer_id(), Some(4));
    }

    #[test]
    fn invalid_inputs_are_ignored_deterministically() {
        let (mut adapter, host) = adapter(false);
        let zero = down(&mut adapter, 0);
        assert_eq!(
            zero.outcome,
            WindowPointerOutcome::Ignored(WindowPointerIgnoredReason::InvalidPointerId)
        );
        let secondary = adapter.pointer_down(
            WindowPointerTarget::Body,
            1,
            WindowPointerButton::Secondary,
            Vector2::ZERO,
        );
        assert_eq!(
            secondary.outcome,
            WindowPointerOutcome::Ignored(WindowPointerIgnoredReason::ButtonNotAllowed)
        );
        let orphan_move = adapter.pointer_move(1, Vector2::ZERO);
        assert_eq!(
            orphan_move.outcome,
            WindowPointerOutcome::Ignored(WindowPointerIgnoredReason::NoActivePointer)
        );
        let no_resize = adapter.pointer_down(
            WindowPointerTarget::ResizeHandle,
            1,
            WindowPointerButton::Primary,
            Vector2::ZERO,
        );
        assert_eq!(
            no_resize.outcome,
            WindowPointerOutcome::Ignored(WindowPointerIgnoredReason::ControllerNoop(
                MotionNoopReason::ResizeDisabled
            ))
        );
        assert!(host.calls().is_empty());

        down(&mut adapter, 2);
        assert!(down(&mut adapter, 5).is_ignored());
        let mismatch = adapter.pointer_up(5, WindowPointerButton::Primary);
        assert_eq!(
            mismatch.outcome,
            WindowPointerOutcome::Ignored(WindowPointerIgnoredReason::PointerMismatch)
        );
        let wrong_button = adapter.pointer_up(2, WindowPointerButton::Auxiliary);
        assert_eq!(
            wrong_button.outcome,
            WindowPointerOutcome::Ignored(WindowPointerIgnoredReason::ButtonMismatch)
        );
    }

    #[test]
    fn frames_run_until_settled() {
        let (mut adapter, host) = adapter(false);
        down(&mut adapter, 1);
        adapter.pointer_move(1, Vector2::new(650.0, 50.0));
        adapter.pointer_up(1, WindowPointerButton::Primary);

        let mut now = Duration::ZERO;
        let mut frames = 0;
        while adapter.frame_requested() {
            now += Duration::from_millis(16);
            adapter.animation_frame(now);
            frames += 1;
            assert!(frames < 5_000, "window never settled");
        }
        assert_eq!(adapter.controller().phase(), MotionPhase::Idle);
        assert_eq!(
            adapter.controller().geometry().position,
            Vector2::new(885.0, 15.0)
        );
        assert!(!adapter.clock().is_running());
        // One request per frame that still needed another.
        assert_eq!(host.frame_requests(), frames);
    }

    #[test]
    fn resize_gesture_uses_resize_scope() {
        let (mut adapter, host) = adapter(true);
        adapter.pointer_down(
            WindowPointerTarget::ResizeHandle,
            2,
            WindowPointerButton::Primary,
            Vector2::new(495.0, 285.0),
        );
        let dispatch = adapter.pointer_move(2, Vector2::new(535.0, 285.0));
        assert!(matches!(
            dispatch.effect,
            Some(MotionEffect::ResizeUpdated { .. })
        ));
        adapter.pointer_up(2, WindowPointerButton::Primary);
        assert_eq!(adapter.controller().size().x, 520.0);
        assert_eq!(
            host.listener_calls(),
            vec![
                HostCall::Attach(ListenerScope::Resize, 2),
                HostCall::Detach(ListenerScope::Resize, 2),
            ]
        );
    }
}
