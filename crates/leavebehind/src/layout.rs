//! The LeaveBehind container: owns the panels and turns a pointer stream into
//! drags, release decisions and frame-driven settles.

use crate::config::LeaveBehindConfig;
use crate::drag::{DragStateMachine, DragTransition, SwipeDirections, TouchState};
use crate::error::{LeaveBehindError, Result};
use crate::event::LeaveBehindEvent;
use crate::geometry::{layout_panels, HorizontalSpan, Panel, PanelGeometry};
use crate::host::{AncestorSnapshot, DetachedHost, GestureHost};
use crate::params::{Gravity, PanelParameters, RawPanelParameters};
use crate::release::{decide_release, ReleaseDecision, SettleTarget};
use crate::settle::{SettleController, SettleStep, SettleToken};
use crate::velocity::VelocityTracker;
use indexmap::IndexMap;
use leavebehind_animation::{
    FrameCallbackRegistration, FrameClock, IntTween, SettleDriver, TweenSettleDriver,
};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One normalized pointer sample in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    pub uptime_ms: u64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f32, y: f32, uptime_ms: u64) -> Self {
        Self {
            kind,
            x,
            y,
            uptime_ms,
        }
    }

    pub fn down(x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::new(PointerEventKind::Down, x, y, uptime_ms)
    }

    pub fn moved(x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::new(PointerEventKind::Move, x, y, uptime_ms)
    }

    pub fn up(x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::new(PointerEventKind::Up, x, y, uptime_ms)
    }

    pub fn cancel(uptime_ms: u64) -> Self {
        Self::new(PointerEventKind::Cancel, 0.0, 0.0, uptime_ms)
    }
}

type Listener = Rc<dyn Fn(&LeaveBehindLayout, LeaveBehindEvent)>;

/// Host call deferred until the widget state is no longer borrowed.
enum HostRequest {
    Invalidate(HorizontalSpan),
    /// Disallow interception and disable nested scrolling ancestors.
    BeginDrag,
    EndDrag(Option<AncestorSnapshot>),
}

/// Side effects of one state transition, flushed host first, then listener.
#[derive(Default)]
struct Effects {
    host: SmallVec<[HostRequest; 8]>,
    events: SmallVec<[LeaveBehindEvent; 4]>,
}

impl Effects {
    fn invalidate(&mut self, spans: &[HorizontalSpan]) {
        self.host
            .extend(spans.iter().copied().map(HostRequest::Invalidate));
    }
}

/// Panel grabbed on pointer down.
#[derive(Debug, Clone, Copy)]
struct Capture {
    panel: Gravity,
    initial_left: i32,
    /// Pointer x already applied to the panel; fractional movement carries over.
    last_x: f32,
}

struct ResetRun {
    token: u64,
    tween: IntTween,
    registration: Option<FrameCallbackRegistration>,
}

struct LayoutState {
    children: SmallVec<[PanelParameters; 3]>,
    geometry: Option<PanelGeometry>,
    drag: DragStateMachine,
    velocity: VelocityTracker,
    capture: Option<Capture>,
    settle: SettleController,
    reset: Option<ResetRun>,
    next_reset_token: u64,
    left_swipe_enabled: bool,
    right_swipe_enabled: bool,
    ancestors: Option<AncestorSnapshot>,
    clamp_reported: bool,
    detached: bool,
}

impl LayoutState {
    fn side_enabled(&self, gravity: Gravity) -> bool {
        self.children
            .iter()
            .rev()
            .find(|params| params.gravity == gravity)
            .is_some_and(|params| params.swipe_enabled)
    }

    fn left_swipe_enabled(&self) -> bool {
        self.left_swipe_enabled && self.side_enabled(Gravity::Left)
    }

    fn right_swipe_enabled(&self) -> bool {
        self.right_swipe_enabled && self.side_enabled(Gravity::Right)
    }

    fn report_clamped(&mut self, swiped_right: bool, effects: &mut Effects) {
        if self.clamp_reported {
            log::debug!("clamp already reported for this gesture");
            return;
        }
        self.clamp_reported = true;
        effects.events.push(LeaveBehindEvent::Clamped { swiped_right });
    }
}

struct Shared {
    config: LeaveBehindConfig,
    clock: FrameClock,
    state: RefCell<LayoutState>,
    host: RefCell<Box<dyn GestureHost>>,
    listener: RefCell<Option<Listener>>,
}

/// Container with a draggable CENTER panel and optional LEFT/RIGHT panels.
///
/// Cloning yields another handle to the same widget. Settle and reset
/// animations run from callbacks on the supplied [`FrameClock`]; the host
/// must drain it once per frame for them to progress.
#[derive(Clone)]
pub struct LeaveBehindLayout {
    shared: Rc<Shared>,
}

impl LeaveBehindLayout {
    pub fn new(config: LeaveBehindConfig, clock: FrameClock) -> Self {
        let driver = TweenSettleDriver::new(config.settle_easing);
        Self::with_settle_driver(config, clock, Box::new(driver))
    }

    pub fn with_settle_driver(
        config: LeaveBehindConfig,
        clock: FrameClock,
        driver: Box<dyn SettleDriver>,
    ) -> Self {
        let state = LayoutState {
            children: SmallVec::new(),
            geometry: None,
            drag: DragStateMachine::new(config.touch_slop()),
            velocity: VelocityTracker::new(),
            capture: None,
            settle: SettleController::new(driver),
            reset: None,
            next_reset_token: 0,
            left_swipe_enabled: true,
            right_swipe_enabled: true,
            ancestors: None,
            clamp_reported: false,
            detached: false,
        };
        Self {
            shared: Rc::new(Shared {
                config,
                clock,
                state: RefCell::new(state),
                host: RefCell::new(Box::new(DetachedHost)),
                listener: RefCell::new(None),
            }),
        }
    }

    fn from_shared(shared: Rc<Shared>) -> Self {
        Self { shared }
    }

    pub fn config(&self) -> &LeaveBehindConfig {
        &self.shared.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.shared.clock
    }

    /// Attaches a child. Its gravity is fixed from here on.
    pub fn add_child(&self, params: PanelParameters) {
        log::debug!("child attached with {:?} gravity", params.gravity);
        self.shared.state.borrow_mut().children.push(params);
    }

    /// Attaches a child described by the raw integer encoding.
    pub fn add_raw_child(&self, raw: RawPanelParameters) -> Result<()> {
        let params = PanelParameters::from_raw(raw)?;
        self.add_child(params);
        Ok(())
    }

    pub fn set_host(&self, host: impl GestureHost + 'static) {
        *self.shared.host.borrow_mut() = Box::new(host);
    }

    pub fn set_listener(&self, listener: impl Fn(&LeaveBehindLayout, LeaveBehindEvent) + 'static) {
        *self.shared.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn clear_listener(&self) {
        self.shared.listener.borrow_mut().take();
    }

    /// Positions the children once the host has measured them. `widths` is in
    /// attachment order. CENTER keeps its current offset across re-layouts.
    pub fn layout(&self, container_width: i32, widths: &[i32]) -> Result<()> {
        let mut state = self.shared.state.borrow_mut();
        if widths.len() != state.children.len() {
            return Err(LeaveBehindError::ChildCountMismatch {
                expected: state.children.len(),
                actual: widths.len(),
            });
        }

        // Later children replace earlier ones with the same gravity.
        let mut slots: IndexMap<Gravity, (PanelParameters, i32)> = IndexMap::with_capacity(3);
        for (params, &width) in state.children.iter().zip(widths) {
            slots.insert(params.gravity, (*params, width));
        }
        if !slots.contains_key(&Gravity::Center) {
            return Err(LeaveBehindError::MissingRequiredPanel);
        }
        if container_width <= 0 {
            log::warn!("laying out LeaveBehind with non-positive width {container_width}");
        }

        let center_left = state
            .geometry
            .as_ref()
            .map_or(0, |geometry| geometry.center().left);
        let lefts = layout_panels(
            container_width,
            center_left,
            slots.iter().map(|(gravity, (_, width))| (*gravity, *width)),
        );
        let panel = |gravity: Gravity| {
            slots.get(&gravity).map(|&(params, width)| {
                let left = lefts.get(&gravity).copied().unwrap_or(center_left);
                Panel::new(params, left, width)
            })
        };
        let (Some(center), left, right) = (
            panel(Gravity::Center),
            panel(Gravity::Left),
            panel(Gravity::Right),
        ) else {
            return Err(LeaveBehindError::MissingRequiredPanel);
        };

        log::debug!(
            "layout width={container_width} left={} right={} offset={center_left}",
            left.is_some(),
            right.is_some()
        );
        state.geometry = Some(PanelGeometry::new(container_width, center, left, right));
        state.detached = false;
        Ok(())
    }

    /// Snapshot of the current panel geometry, if laid out.
    pub fn geometry(&self) -> Option<PanelGeometry> {
        self.shared.state.borrow().geometry.clone()
    }

    /// CENTER's left edge; 0 before the first layout.
    pub fn offset(&self) -> i32 {
        self.shared
            .state
            .borrow()
            .geometry
            .as_ref()
            .map_or(0, |geometry| geometry.center().left)
    }

    /// Moves every panel so CENTER's left edge lands on `offset`.
    pub fn set_offset(&self, offset: i32) -> Result<()> {
        let mut state = self.shared.state.borrow_mut();
        let geometry = state.geometry.as_mut().ok_or(LeaveBehindError::NotLaidOut)?;
        let dx = offset - geometry.center().left;
        let mut effects = Effects::default();
        effects.invalidate(&geometry.offset_children(None, dx));
        drop(state);
        self.flush(effects);
        Ok(())
    }

    pub fn touch_state(&self) -> TouchState {
        self.shared.state.borrow().drag.state()
    }

    pub fn is_settling(&self) -> bool {
        self.shared.state.borrow().settle.is_settling()
    }

    pub fn is_resetting(&self) -> bool {
        self.shared.state.borrow().reset.is_some()
    }

    pub fn is_left_swipe_enabled(&self) -> bool {
        self.shared.state.borrow().left_swipe_enabled()
    }

    pub fn is_right_swipe_enabled(&self) -> bool {
        self.shared.state.borrow().right_swipe_enabled()
    }

    pub fn is_swipe_enabled(&self) -> bool {
        self.is_left_swipe_enabled() || self.is_right_swipe_enabled()
    }

    pub fn set_left_swipe_enabled(&self, enabled: bool) {
        self.shared.state.borrow_mut().left_swipe_enabled = enabled;
    }

    pub fn set_right_swipe_enabled(&self, enabled: bool) {
        self.shared.state.borrow_mut().right_swipe_enabled = enabled;
    }

    /// Feeds one pointer sample. Returns whether the widget consumed it; a
    /// rejected gesture returns `false` so the host can route it elsewhere.
    pub fn on_touch_event(&self, event: PointerEvent) -> bool {
        let mut effects = Effects::default();
        let consumed = self.handle_touch(event, &mut effects);
        self.flush(effects);
        consumed
    }

    fn handle_touch(&self, event: PointerEvent, effects: &mut Effects) -> bool {
        let mut state = self.shared.state.borrow_mut();
        if state.detached || state.geometry.is_none() {
            return false;
        }
        let directions = SwipeDirections {
            left: state.left_swipe_enabled(),
            right: state.right_swipe_enabled(),
        };
        if !directions.left && !directions.right {
            return false;
        }

        match event.kind {
            PointerEventKind::Down => {
                self.pointer_down(&mut state, event);
                true
            }
            PointerEventKind::Move => {
                state.velocity.add_position(event.uptime_ms, event.x);
                match state.drag.pointer_move(event.x, event.y, directions) {
                    DragTransition::Pending => true,
                    DragTransition::Rejected | DragTransition::Unchanged(TouchState::Rejected) => {
                        false
                    }
                    DragTransition::Started { swiped_right } => {
                        effects.host.push(HostRequest::BeginDrag);
                        effects
                            .events
                            .push(LeaveBehindEvent::SwipeStarted { swiped_right });
                        self.drag_to(&mut state, event.x, effects);
                        true
                    }
                    DragTransition::Unchanged(_) => {
                        self.drag_to(&mut state, event.x, effects);
                        true
                    }
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let rejected = state.drag.state() == TouchState::Rejected;
                let velocity = if event.kind == PointerEventKind::Up {
                    state.velocity.add_position(event.uptime_ms, event.x);
                    state
                        .velocity
                        .velocity_with_max(self.shared.config.max_fling_velocity())
                } else {
                    0.0
                };
                if state.drag.pointer_up() {
                    effects.host.push(HostRequest::EndDrag(state.ancestors.take()));
                    self.release(&mut state, velocity, effects);
                }
                state.capture = None;
                state.velocity.reset();
                !rejected
            }
        }
    }

    fn pointer_down(&self, state: &mut LayoutState, event: PointerEvent) {
        state.drag.pointer_down(event.x, event.y);
        state.velocity.reset();
        state.velocity.add_position(event.uptime_ms, event.x);
        state.clamp_reported = false;
        state.settle.cancel();
        state.reset = None;
        state.capture = state.geometry.as_ref().map(|geometry| {
            let panel = geometry.panel_at(event.x);
            Capture {
                panel,
                initial_left: geometry.left_of(panel),
                last_x: event.x,
            }
        });
        log::trace!("pointer down at ({}, {}) captured {:?}", event.x, event.y, state.capture);
    }

    fn drag_to(&self, state: &mut LayoutState, x: f32, effects: &mut Effects) {
        let (Some(capture), Some(geometry)) = (state.capture.as_mut(), state.geometry.as_mut())
        else {
            return;
        };
        let dx = (x - capture.last_x).trunc() as i32;
        if dx == 0 {
            return;
        }
        capture.last_x += dx as f32;

        let panel = capture.panel;
        let current = geometry.left_of(panel);
        let moved = geometry.clamp_move(panel, current + dx, dx) - current;
        log::trace!("drag {panel:?} by {dx} (applied {moved})");
        effects.invalidate(&move_rigidly(geometry, panel, moved));
        effects.events.extend(geometry.sticky_edge_crossings(moved));
    }

    fn release(&self, state: &mut LayoutState, velocity: f32, effects: &mut Effects) {
        let (Some(capture), Some(geometry)) = (state.capture.take(), state.geometry.as_ref())
        else {
            return;
        };
        let dx = geometry.left_of(capture.panel) - capture.initial_left;
        let decision = decide_release(
            geometry,
            capture.panel,
            dx,
            velocity,
            self.shared.config.velocity_threshold(),
        );
        match decision {
            ReleaseDecision::Ignored => {}
            ReleaseDecision::ClampReached { swiped_right } => {
                state.report_clamped(swiped_right, effects);
            }
            ReleaseDecision::Fling(target)
            | ReleaseDecision::NoOpposingPanel(target)
            | ReleaseDecision::NearClamp(target)
            | ReleaseDecision::Sticking(target)
            | ReleaseDecision::Unhandled(target) => {
                self.start_scroll_animation(state, capture.panel, target, effects);
            }
        }
    }

    /// Settles `panel` toward `target.left`, siblings following every step.
    fn start_scroll_animation(
        &self,
        state: &mut LayoutState,
        panel: Gravity,
        target: SettleTarget,
        effects: &mut Effects,
    ) {
        let Some(geometry) = state.geometry.as_ref() else {
            return;
        };
        let from = geometry.left_of(panel);
        let duration = self
            .shared
            .config
            .settle_duration_ms(target.left - from, geometry.container_width());

        let Some(token) = state.settle.start(
            panel,
            from,
            target.left,
            duration,
            target.clamped,
            target.swiped_right,
        ) else {
            if target.clamped {
                state.report_clamped(target.swiped_right, effects);
            }
            return;
        };
        let registration = self.schedule_settle_step(token);
        state.settle.arm(token, registration);
    }

    fn schedule_settle_step(&self, token: SettleToken) -> FrameCallbackRegistration {
        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        self.shared.clock.with_frame_nanos(move |frame_time_nanos| {
            if let Some(shared) = weak.upgrade() {
                LeaveBehindLayout::from_shared(shared).settle_step(token, frame_time_nanos);
            }
        })
    }

    fn settle_step(&self, token: SettleToken, frame_time_nanos: u64) {
        let mut effects = Effects::default();
        {
            let mut state = self.shared.state.borrow_mut();
            let SettleStep::Moved {
                panel,
                left,
                finished,
            } = state.settle.step(token, frame_time_nanos)
            else {
                log::trace!("stale settle step ignored");
                return;
            };

            if let Some(geometry) = state.geometry.as_mut() {
                let dx = left - geometry.left_of(panel);
                effects.invalidate(&move_rigidly(geometry, panel, dx));
                effects.events.extend(geometry.sticky_edge_crossings(dx));
            }

            match finished {
                None => {
                    let registration = self.schedule_settle_step(token);
                    state.settle.arm(token, registration);
                }
                Some(finished) => {
                    log::debug!("settle finished at {left}");
                    if finished.clamped {
                        state.report_clamped(finished.swiped_right, &mut effects);
                    }
                }
            }
        }
        self.flush(effects);
    }

    /// Returns CENTER to offset 0. Any in-flight reset or settle is abandoned
    /// where it is first. Does nothing once detached.
    pub fn reset(&self, animate: bool) {
        let mut state = self.shared.state.borrow_mut();
        if state.detached {
            log::debug!("reset ignored, widget is detached");
            return;
        }
        state.reset = None;
        state.settle.cancel();
        state.capture = None;

        let Some(geometry) = state.geometry.as_mut() else {
            return;
        };
        let from = geometry.center().left;
        log::debug!("reset from {from} (animate={animate})");
        if !animate {
            let mut effects = Effects::default();
            effects.invalidate(&geometry.offset_children(None, -from));
            drop(state);
            self.flush(effects);
            return;
        }
        if from == 0 {
            return;
        }

        state.next_reset_token += 1;
        let token = state.next_reset_token;
        let tween = IntTween::new(
            from,
            0,
            self.shared.config.reset_duration_ms,
            self.shared.config.reset_easing,
        );
        let registration = self.schedule_reset_step(token);
        state.reset = Some(ResetRun {
            token,
            tween,
            registration: Some(registration),
        });
    }

    fn schedule_reset_step(&self, token: u64) -> FrameCallbackRegistration {
        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        self.shared.clock.with_frame_nanos(move |frame_time_nanos| {
            if let Some(shared) = weak.upgrade() {
                LeaveBehindLayout::from_shared(shared).reset_step(token, frame_time_nanos);
            }
        })
    }

    fn reset_step(&self, token: u64, frame_time_nanos: u64) {
        let mut effects = Effects::default();
        {
            let mut state = self.shared.state.borrow_mut();
            let LayoutState {
                reset, geometry, ..
            } = &mut *state;
            let (Some(run), Some(geometry)) = (reset.as_mut(), geometry.as_mut()) else {
                return;
            };
            if run.token != token {
                return;
            }

            let (value, finished) = run.tween.sample(frame_time_nanos);
            effects.invalidate(&geometry.offset_children(None, value - geometry.center().left));

            if finished {
                log::debug!("reset finished");
                *reset = None;
            } else {
                run.registration = Some(self.schedule_reset_step(token));
            }
        }
        self.flush(effects);
    }

    /// Invalidates pending settle and reset steps and drops the current
    /// gesture. Touch input is ignored until the next [`layout`](Self::layout).
    pub fn detach(&self) {
        let mut state = self.shared.state.borrow_mut();
        state.settle.cancel();
        state.reset = None;
        state.capture = None;
        let mut effects = Effects::default();
        if state.drag.pointer_up() {
            effects.host.push(HostRequest::EndDrag(state.ancestors.take()));
        }
        state.detached = true;
        drop(state);
        log::debug!("detached");
        self.flush(effects);
    }

    /// Runs deferred host calls, then notifies the listener. No state borrow
    /// is held, so both may call back into the widget.
    fn flush(&self, effects: Effects) {
        for request in effects.host {
            match request {
                HostRequest::Invalidate(span) => self.shared.host.borrow_mut().invalidate(span),
                HostRequest::BeginDrag => {
                    let snapshot = {
                        let mut host = self.shared.host.borrow_mut();
                        host.request_disallow_intercept(true);
                        AncestorSnapshot::capture(&mut **host)
                    };
                    self.shared.state.borrow_mut().ancestors = Some(snapshot);
                }
                HostRequest::EndDrag(snapshot) => {
                    let mut host = self.shared.host.borrow_mut();
                    if let Some(snapshot) = snapshot {
                        snapshot.restore(&mut **host);
                    }
                    host.request_disallow_intercept(false);
                }
            }
        }
        self.dispatch(effects.events);
    }

    fn dispatch(&self, events: SmallVec<[LeaveBehindEvent; 4]>) {
        if events.is_empty() {
            return;
        }
        if self.shared.state.borrow().detached {
            return;
        }
        let listener = self.shared.listener.borrow().clone();
        for event in events {
            log::debug!("notify {event:?}");
            if let Some(listener) = &listener {
                listener(self, event);
            }
        }
    }
}

/// Moves `panel` by `dx` and every sibling with it.
fn move_rigidly(
    geometry: &mut PanelGeometry,
    panel: Gravity,
    dx: i32,
) -> SmallVec<[HorizontalSpan; 3]> {
    let mut spans = geometry.offset_children(Some(panel), dx);
    spans.extend(geometry.move_panel(panel, dx));
    spans
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
