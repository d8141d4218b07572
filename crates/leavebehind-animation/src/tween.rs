use crate::{Easing, NANOS_PER_MILLI};

/// Integer tween between two values over a fixed duration.
///
/// The first sampled frame becomes the start time, so a tween created between
/// frames does not skip ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct IntTween {
    from: i32,
    to: i32,
    duration_millis: u64,
    easing: Easing,
    start_frame_nanos: Option<u64>,
}

impl IntTween {
    pub fn new(from: i32, to: i32, duration_millis: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_millis,
            easing,
            start_frame_nanos: None,
        }
    }

    /// Samples the tween at `frame_time_nanos`, returning the value and whether
    /// the tween has finished.
    pub fn sample(&mut self, frame_time_nanos: u64) -> (i32, bool) {
        let start = *self.start_frame_nanos.get_or_insert(frame_time_nanos);
        if self.duration_millis == 0 {
            return (self.to, true);
        }
        let elapsed = frame_time_nanos.saturating_sub(start);
        let duration = self.duration_millis.saturating_mul(NANOS_PER_MILLI);
        if elapsed >= duration {
            return (self.to, true);
        }
        let fraction = elapsed as f32 / duration as f32;
        let progress = self.easing.transform(fraction);
        let distance = (self.to - self.from) as f32;
        (self.from + (distance * progress).round() as i32, false)
    }
}
