use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use web_time::Instant;

type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct FrameClockInner {
    callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_id: Cell<FrameCallbackId>,
    epoch: Instant,
}

impl FrameClockInner {
    fn register(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(callback),
        });
        id
    }

    fn cancel(&self, id: FrameCallbackId) {
        let mut callbacks = self.callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }
}

/// Single-threaded per-frame callback queue.
///
/// The host calls [`FrameClock::drain_frame_callbacks`] once per display frame.
/// Callbacks registered while a frame is being drained run on the next frame,
/// which is what makes self-rescheduling animation steps cooperative.
#[derive(Clone)]
pub struct FrameClock {
    inner: Rc<FrameClockInner>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(FrameClockInner {
                callbacks: RefCell::new(VecDeque::new()),
                next_id: Cell::new(1),
                epoch: Instant::now(),
            }),
        }
    }

    /// Runs `callback` with the timestamp of the next drained frame.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.inner.register(Box::new(callback));
        FrameCallbackRegistration {
            clock: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.callbacks.borrow().is_empty()
    }

    /// Runs every callback queued before this call, in registration order.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let pending: Vec<Box<dyn FnOnce(u64) + 'static>> = {
            let mut callbacks = self.inner.callbacks.borrow_mut();
            callbacks
                .drain(..)
                .filter_map(|mut entry| entry.callback.take())
                .collect()
        };
        if !pending.is_empty() {
            log::trace!(
                "draining {} frame callback(s) at {frame_time_nanos}ns",
                pending.len()
            );
        }
        for callback in pending {
            callback(frame_time_nanos);
        }
    }

    /// Drains using wall-clock time measured from the clock's creation.
    pub fn drain_now(&self) {
        let elapsed = self.inner.epoch.elapsed().as_nanos();
        self.drain_frame_callbacks(u64::try_from(elapsed).unwrap_or(u64::MAX));
    }
}

/// Handle to a queued frame callback. Dropping it cancels the callback.
pub struct FrameCallbackRegistration {
    clock: Weak<FrameClockInner>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let (Some(id), Some(clock)) = (self.id.take(), self.clock.upgrade()) {
            clock.cancel(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for FrameCallbackRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCallbackRegistration")
            .field("id", &self.id)
            .finish()
    }
}
