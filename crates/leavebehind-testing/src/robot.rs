//! Robot-style driver for headless LeaveBehind tests.
//!
//! The robot owns a virtual clock. Pointer events are stamped with it and
//! frames are drained at its current time, so velocity and animation timing
//! are fully deterministic.
//!
//! # Example
//!
//! ```
//! use leavebehind::PanelParameters;
//! use leavebehind_testing::SwipeRobot;
//!
//! let mut robot = SwipeRobot::with_panels(Some((PanelParameters::left(), 200)), None);
//! robot.slow_swipe(500.0, 620.0);
//! robot.pump_until_idle();
//! assert_eq!(robot.offset(), 0);
//! ```

use crate::host::RecordingHost;
use leavebehind::{
    LeaveBehindConfig, LeaveBehindEvent, LeaveBehindLayout, PanelParameters, PointerEvent,
    Result,
};
use leavebehind_animation::{FrameClock, NANOS_PER_MILLI};
use std::cell::RefCell;
use std::rc::Rc;

/// Roughly one 60 Hz frame.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Gap between release and the last move that makes the tracker read 0 px/s.
const PAUSE_MS: u64 = 100;

const MAX_PUMPED_FRAMES: usize = 10_000;

/// Listener sink collecting every notification in delivery order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Rc<RefCell<Vec<LeaveBehindEvent>>>,
}

impl EventLog {
    /// Installs a listener on `layout` that appends to this log.
    pub fn attach(layout: &LeaveBehindLayout) -> Self {
        let log = Self::default();
        let sink = log.events.clone();
        layout.set_listener(move |_, event| sink.borrow_mut().push(event));
        log
    }

    pub fn events(&self) -> Vec<LeaveBehindEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<LeaveBehindEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn count(&self, predicate: impl Fn(&LeaveBehindEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }

    pub fn clamped_count(&self) -> usize {
        self.count(|event| matches!(event, LeaveBehindEvent::Clamped { .. }))
    }
}

pub struct SwipeRobot {
    layout: LeaveBehindLayout,
    clock: FrameClock,
    host: RecordingHost,
    events: EventLog,
    now_nanos: u64,
    pointer: Option<(f32, f32)>,
    /// Time between synthesized move samples.
    pub step_ms: u64,
}

impl SwipeRobot {
    /// Lays out a widget `container_width` wide with a full-width CENTER and
    /// the given siblings.
    pub fn new(
        config: LeaveBehindConfig,
        container_width: i32,
        left: Option<(PanelParameters, i32)>,
        right: Option<(PanelParameters, i32)>,
    ) -> Result<Self> {
        let clock = FrameClock::new();
        let layout = LeaveBehindLayout::new(config, clock.clone());
        let mut widths = vec![container_width];
        layout.add_child(PanelParameters::center());
        for (params, width) in left.into_iter().chain(right) {
            layout.add_child(params);
            widths.push(width);
        }
        layout.layout(container_width, &widths)?;
        Ok(Self::attach(layout, clock))
    }

    /// Default config, 1000 px container.
    ///
    /// Panics if layout fails, which a full-width CENTER never does.
    pub fn with_panels(
        left: Option<(PanelParameters, i32)>,
        right: Option<(PanelParameters, i32)>,
    ) -> Self {
        match Self::new(LeaveBehindConfig::default(), 1000, left, right) {
            Ok(robot) => robot,
            Err(err) => panic!("robot layout failed: {err}"),
        }
    }

    /// Drives an already laid-out widget whose animations run on `clock`.
    pub fn attach(layout: LeaveBehindLayout, clock: FrameClock) -> Self {
        let host = RecordingHost::new();
        layout.set_host(host.clone());
        let events = EventLog::attach(&layout);
        Self {
            layout,
            clock,
            host,
            events,
            now_nanos: 0,
            pointer: None,
            step_ms: 8,
        }
    }

    pub fn layout(&self) -> &LeaveBehindLayout {
        &self.layout
    }

    pub fn host(&self) -> &RecordingHost {
        &self.host
    }

    /// Replaces the host with one that has nested scrolling ancestors.
    pub fn set_host(&mut self, host: RecordingHost) {
        self.layout.set_host(host.clone());
        self.host = host;
    }

    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    pub fn events(&self) -> Vec<LeaveBehindEvent> {
        self.events.events()
    }

    pub fn offset(&self) -> i32 {
        self.layout.offset()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_nanos / NANOS_PER_MILLI
    }

    pub fn advance_time(&mut self, millis: u64) {
        self.now_nanos += millis * NANOS_PER_MILLI;
    }

    pub fn press(&mut self, x: f32, y: f32) -> bool {
        self.pointer = Some((x, y));
        let now = self.now_ms();
        self.layout.on_touch_event(PointerEvent::down(x, y, now))
    }

    /// One move sample, `step_ms` after the previous sample.
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.advance_time(self.step_ms);
        self.pointer = Some((x, y));
        let now = self.now_ms();
        self.layout.on_touch_event(PointerEvent::moved(x, y, now))
    }

    /// Moves in `steps` evenly spaced samples from the current pointer position.
    pub fn drag_to(&mut self, x: f32, y: f32, steps: usize) -> bool {
        let (from_x, from_y) = self.pointer.unwrap_or((x, y));
        let steps = steps.max(1);
        let mut consumed = true;
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            consumed = self.move_to(from_x + (x - from_x) * t, from_y + (y - from_y) * t);
        }
        consumed
    }

    pub fn release(&mut self) -> bool {
        self.advance_time(self.step_ms);
        let (x, y) = self.pointer.take().unwrap_or_default();
        let now = self.now_ms();
        self.layout.on_touch_event(PointerEvent::up(x, y, now))
    }

    /// Holds still long enough for the velocity tracker to read zero, then lifts.
    pub fn release_after_pause(&mut self) -> bool {
        self.advance_time(PAUSE_MS);
        self.release()
    }

    pub fn cancel(&mut self) -> bool {
        self.advance_time(self.step_ms);
        self.pointer = None;
        let now = self.now_ms();
        self.layout.on_touch_event(PointerEvent::cancel(now))
    }

    /// Quick horizontal swipe at y = 50 in ten samples.
    pub fn swipe(&mut self, from_x: f32, to_x: f32) {
        self.press(from_x, 50.0);
        self.drag_to(to_x, 50.0, 10);
        self.release();
    }

    /// Horizontal swipe released with zero velocity.
    pub fn slow_swipe(&mut self, from_x: f32, to_x: f32) {
        self.press(from_x, 50.0);
        self.drag_to(to_x, 50.0, 10);
        self.release_after_pause();
    }

    /// Advances the clock one frame and runs due frame callbacks.
    pub fn advance_frame(&mut self) {
        self.now_nanos += FRAME_NANOS;
        self.clock.drain_frame_callbacks(self.now_nanos);
    }

    /// Runs frames until no callback is pending. Returns how many ran.
    pub fn pump_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.clock.has_frame_callbacks() {
            if frames == MAX_PUMPED_FRAMES {
                log::warn!("still animating after {MAX_PUMPED_FRAMES} frames");
                break;
            }
            self.advance_frame();
            frames += 1;
        }
        frames
    }
}
