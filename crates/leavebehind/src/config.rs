//! Widget-wide tuning values.
//!
//! Densities and dp values are supplied by the host; nothing here reads
//! platform configuration.

use leavebehind_animation::Easing;

const DEFAULT_VELOCITY_THRESHOLD_DP: f32 = 1500.0;
const DEFAULT_TOUCH_SLOP_DP: f32 = 8.0;
const DEFAULT_MAX_FLING_VELOCITY_DP: f32 = 8000.0;
const DEFAULT_RESET_DURATION_MS: u64 = 200;
const BASE_SETTLE_DURATION_MS: u64 = 256;
const MAX_SETTLE_DURATION_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct LeaveBehindConfig {
    pub density: f32,
    pub velocity_threshold_dp: f32,
    pub touch_slop_dp: f32,
    pub max_fling_velocity_dp: f32,
    pub reset_duration_ms: u64,
    pub reset_easing: Easing,
    pub settle_easing: Easing,
    pub base_settle_duration_ms: u64,
    pub max_settle_duration_ms: u64,
}

impl Default for LeaveBehindConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            velocity_threshold_dp: DEFAULT_VELOCITY_THRESHOLD_DP,
            touch_slop_dp: DEFAULT_TOUCH_SLOP_DP,
            max_fling_velocity_dp: DEFAULT_MAX_FLING_VELOCITY_DP,
            reset_duration_ms: DEFAULT_RESET_DURATION_MS,
            reset_easing: Easing::Accelerate,
            settle_easing: Easing::QuinticOut,
            base_settle_duration_ms: BASE_SETTLE_DURATION_MS,
            max_settle_duration_ms: MAX_SETTLE_DURATION_MS,
        }
    }
}

impl LeaveBehindConfig {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_velocity_threshold_dp(mut self, dp: f32) -> Self {
        self.velocity_threshold_dp = dp;
        self
    }

    pub fn with_touch_slop_dp(mut self, dp: f32) -> Self {
        self.touch_slop_dp = dp;
        self
    }

    pub fn with_max_fling_velocity_dp(mut self, dp: f32) -> Self {
        self.max_fling_velocity_dp = dp;
        self
    }

    pub fn with_reset_duration_ms(mut self, millis: u64) -> Self {
        self.reset_duration_ms = millis;
        self
    }

    /// Release velocity (px/s) above which a release counts as a fling.
    pub fn velocity_threshold(&self) -> f32 {
        self.velocity_threshold_dp * self.density
    }

    /// Distance (px) a pointer must travel before its direction is classified.
    pub fn touch_slop(&self) -> f32 {
        self.touch_slop_dp * self.density
    }

    pub fn max_fling_velocity(&self) -> f32 {
        self.max_fling_velocity_dp * self.density
    }

    /// Settle duration for a move of `distance` px inside a container of
    /// `container_width` px: longer moves take longer, up to the configured cap.
    pub fn settle_duration_ms(&self, distance: i32, container_width: i32) -> u64 {
        if container_width <= 0 {
            return self.base_settle_duration_ms.min(self.max_settle_duration_ms);
        }
        let ratio = distance.unsigned_abs() as f32 / container_width as f32;
        let duration = (self.base_settle_duration_ms as f32 * (1.0 + ratio)) as u64;
        duration.min(self.max_settle_duration_ms)
    }
}
