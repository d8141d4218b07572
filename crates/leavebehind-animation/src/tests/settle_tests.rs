use super::*;
use proptest::prelude::*;

const FRAME: u64 = 16_666_667;

fn run_to_end(driver: &mut TweenSettleDriver, max_frames: usize) -> Vec<i32> {
    let mut positions = vec![driver.current()];
    let mut time = 0u64;
    for _ in 0..max_frames {
        let more = driver.continue_settling(time);
        positions.push(driver.current());
        if !more {
            break;
        }
        time += FRAME;
    }
    positions
}

#[test]
fn settle_to_same_position_does_not_start() {
    let mut driver = TweenSettleDriver::default();
    assert!(!driver.settle_to(40, 40, 256));
    assert!(!driver.is_settling());
    assert_eq!(driver.current(), 40);
    assert!(!driver.continue_settling(0));
}

#[test]
fn settle_reaches_target_exactly() {
    let mut driver = TweenSettleDriver::default();
    assert!(driver.settle_to(150, 200, 256));
    let positions = run_to_end(&mut driver, 1_000);

    assert_eq!(positions.last().copied(), Some(200));
    assert!(!driver.is_settling());
}

#[test]
fn first_step_still_makes_progress() {
    let mut driver = TweenSettleDriver::new(Easing::Accelerate);
    driver.settle_to(0, -300, 600);
    assert!(driver.continue_settling(1_000));
    assert_eq!(driver.current(), -1);
}

#[test]
fn abort_stops_in_place() {
    let mut driver = TweenSettleDriver::default();
    driver.settle_to(0, 500, 256);
    driver.continue_settling(0);
    driver.continue_settling(FRAME * 3);
    let position = driver.current();

    driver.abort();

    assert!(!driver.is_settling());
    assert!(!driver.continue_settling(FRAME * 4));
    assert_eq!(driver.current(), position);
}

#[test]
fn zero_duration_jumps_to_target() {
    let mut driver = TweenSettleDriver::default();
    driver.settle_to(10, -90, 0);
    assert!(!driver.continue_settling(0));
    assert_eq!(driver.current(), -90);
}

proptest! {
    #[test]
    fn each_step_strictly_shrinks_remaining_distance(
        from in -2_000i32..2_000,
        target in -2_000i32..2_000,
        duration in 0u64..800,
    ) {
        prop_assume!(from != target);
        let mut driver = TweenSettleDriver::default();
        prop_assert!(driver.settle_to(from, target, duration));

        let positions = run_to_end(&mut driver, 10_000);
        for pair in positions.windows(2) {
            let before = (target - pair[0]).abs();
            let after = (target - pair[1]).abs();
            prop_assert!(after < before, "{} -> {} toward {}", pair[0], pair[1], target);
        }
        prop_assert_eq!(positions.last().copied(), Some(target));
    }
}
