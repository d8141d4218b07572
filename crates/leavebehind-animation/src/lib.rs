//! Frame-driven animation primitives for LeaveBehind.
//!
//! Everything here runs on the UI thread. Animations never own a timer; they
//! register a one-shot callback on a [`FrameClock`] and re-register from inside
//! that callback while work remains. Dropping the returned
//! [`FrameCallbackRegistration`] cancels the pending step.

mod easing;
mod frame_clock;
mod settle;
mod tween;

pub use easing::Easing;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use settle::{SettleDriver, TweenSettleDriver};
pub use tween::IntTween;

/// Nanoseconds per millisecond, used when converting frame timestamps.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
