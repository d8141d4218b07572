//! Settle drivers move a single horizontal coordinate toward a target, one
//! frame at a time.

use crate::{Easing, NANOS_PER_MILLI};

/// The physical settle computation behind a drag release.
///
/// A driver owns no scheduling: callers invoke [`SettleDriver::continue_settling`]
/// once per frame and read [`SettleDriver::current`] afterwards.
pub trait SettleDriver {
    /// Starts settling from `from` toward `target` over roughly `duration_millis`.
    ///
    /// Returns `false` when `from == target`; nothing is started in that case.
    fn settle_to(&mut self, from: i32, target: i32, duration_millis: u64) -> bool;

    /// Advances one frame. Returns `true` while further steps remain; the
    /// current position has been updated either way.
    fn continue_settling(&mut self, frame_time_nanos: u64) -> bool;

    fn current(&self) -> i32;

    fn is_settling(&self) -> bool;

    /// Stops settling at the current position.
    fn abort(&mut self);
}

#[derive(Debug, Clone)]
struct SettleRun {
    from: i32,
    target: i32,
    duration_millis: u64,
    start_frame_nanos: Option<u64>,
}

/// Time-based settle along an easing curve.
///
/// Every step moves at least one pixel toward the target and never past it, so
/// the remaining distance shrinks strictly on each call until it reaches zero.
#[derive(Debug, Clone, Default)]
pub struct TweenSettleDriver {
    easing: Easing,
    current: i32,
    run: Option<SettleRun>,
}

impl TweenSettleDriver {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            current: 0,
            run: None,
        }
    }
}

impl SettleDriver for TweenSettleDriver {
    fn settle_to(&mut self, from: i32, target: i32, duration_millis: u64) -> bool {
        self.current = from;
        if from == target {
            self.run = None;
            return false;
        }
        self.run = Some(SettleRun {
            from,
            target,
            duration_millis,
            start_frame_nanos: None,
        });
        true
    }

    fn continue_settling(&mut self, frame_time_nanos: u64) -> bool {
        let Some(run) = self.run.as_mut() else {
            return false;
        };

        let start = *run.start_frame_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(start);
        let duration = run.duration_millis.saturating_mul(NANOS_PER_MILLI);
        let fraction = if duration == 0 {
            1.0
        } else {
            (elapsed as f64 / duration as f64).min(1.0) as f32
        };

        let distance = run.target - run.from;
        let direction = distance.signum();
        let eased = run.from + (distance as f32 * self.easing.transform(fraction)).round() as i32;

        let mut next = eased;
        if (next - self.current) * direction < 1 {
            next = self.current + direction;
        }
        if (next - run.target) * direction > 0 {
            next = run.target;
        }
        self.current = next;

        if next == run.target {
            self.run = None;
            false
        } else {
            true
        }
    }

    fn current(&self) -> i32 {
        self.current
    }

    fn is_settling(&self) -> bool {
        self.run.is_some()
    }

    fn abort(&mut self) {
        self.run = None;
    }
}

#[cfg(test)]
#[path = "tests/settle_tests.rs"]
mod tests;
