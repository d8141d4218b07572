//! Release velocity estimation from the timestamped pointer stream.
//!
//! Impulse strategy over absolute horizontal positions: the kinetic energy
//! imparted between consecutive samples is accumulated and converted back
//! into a velocity.

const HISTORY_SIZE: usize = 20;

/// Only samples this recent contribute.
const HORIZON_MS: u64 = 100;

/// A sample this much older than the newest one means the pointer had stopped.
pub const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Debug, Clone, Copy)]
struct Sample {
    time_ms: u64,
    x: f32,
}

#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_position(&mut self, time_ms: u64, x: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, x });
    }

    /// Horizontal velocity in px/s; 0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.newest;

        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || (count > 0 && age > ASSUME_STOPPED_MS) {
                break;
            }
            positions[count] = sample.x;
            times[count] = -(age as f32);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            index = index.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// [`velocity`](Self::velocity) limited to `±max_velocity`.
    pub fn velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// Samples are ordered newest first; `times` are non-positive ages in ms.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;

    for i in (1..=oldest).rev() {
        let (older_time, newer_time) = (times[i], times[i - 1]);
        if older_time == newer_time {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / (older_time - newer_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_two_samples_is_still() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), 0.0);
        tracker.add_position(0, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn steady_motion_measures_its_speed() {
        let mut tracker = VelocityTracker::new();
        for step in 0..4u64 {
            tracker.add_position(step * 10, step as f32 * 20.0);
        }
        let velocity = tracker.velocity();
        assert!((velocity - 2000.0).abs() < 200.0, "got {velocity}");
    }

    #[test]
    fn leftward_motion_is_negative() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, 300.0);
        tracker.add_position(8, 250.0);
        tracker.add_position(16, 200.0);
        assert!(tracker.velocity() < 0.0);
    }

    #[test]
    fn pause_before_release_reads_as_stopped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, 0.0);
        tracker.add_position(10, 100.0);
        tracker.add_position(10 + ASSUME_STOPPED_MS + 1, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn stale_samples_outside_horizon_are_ignored() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, -5000.0);
        tracker.add_position(200, 0.0);
        tracker.add_position(210, 10.0);
        tracker.add_position(220, 20.0);
        assert!(tracker.velocity() > 0.0);
    }

    #[test]
    fn cap_applies_in_both_directions() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, 0.0);
        tracker.add_position(1, 10_000.0);
        assert_eq!(tracker.velocity_with_max(8000.0), 8000.0);

        tracker.reset();
        tracker.add_position(0, 10_000.0);
        tracker.add_position(1, 0.0);
        assert_eq!(tracker.velocity_with_max(8000.0), -8000.0);
        assert_eq!(tracker.velocity_with_max(0.0), 0.0);
    }
}
