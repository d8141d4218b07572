/// Easing curves mapping a linear time fraction in `[0, 1]` to progress.
///
/// None of the curves overshoot, so a settle driven by them approaches its
/// target monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// `t²`, the accelerating curve used by reset animations.
    Accelerate,
    /// `(t - 1)⁵ + 1`, the fast-start curve drag settles use.
    #[default]
    QuinticOut,
}

impl Easing {
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Accelerate => t * t,
            Easing::QuinticOut => {
                let shifted = t - 1.0;
                shifted * shifted * shifted * shifted * shifted + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 2] = [Easing::Accelerate, Easing::QuinticOut];

    #[test]
    fn curves_pin_their_endpoints() {
        for easing in ALL {
            assert_eq!(easing.transform(0.0), 0.0, "{easing:?} at 0");
            assert!((easing.transform(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn curves_never_decrease() {
        for easing in ALL {
            let mut previous = 0.0;
            for step in 0..=100 {
                let value = easing.transform(step as f32 / 100.0);
                assert!(
                    value + 1e-5 >= previous,
                    "{easing:?} decreased at step {step}"
                );
                previous = value;
            }
        }
    }

    #[test]
    fn accelerate_starts_slow() {
        assert!(Easing::Accelerate.transform(0.5) < 0.5);
        assert!(Easing::QuinticOut.transform(0.5) > 0.5);
    }

    #[test]
    fn out_of_range_fraction_is_clamped() {
        assert_eq!(Easing::Accelerate.transform(-1.0), 0.0);
        assert_eq!(Easing::QuinticOut.transform(2.0), 1.0);
    }
}
