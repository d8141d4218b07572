//! End-to-end gestures driven through the robot: pointer stream in,
//! notifications and final offsets out.

use leavebehind::{
    ClampingPoint, HorizontalSpan, LeaveBehindEvent, PanelParameters, RawPanelParameters,
    StickingPoint, TouchState,
};
use leavebehind_testing::robot_assertions::{
    assert_clamped_once, assert_not_clamped, assert_siblings_attached, assert_swipe_started_first,
};
use leavebehind_testing::{RecordingHost, SwipeRobot};

fn left_panel() -> (PanelParameters, i32) {
    (
        PanelParameters::left()
            .with_clamping_point(ClampingPoint::View)
            .with_sticking_point(StickingPoint::None),
        200,
    )
}

fn sticky_right_panel(clamp: ClampingPoint) -> (PanelParameters, i32) {
    (
        PanelParameters::right()
            .with_sticking_point(StickingPoint::View)
            .with_sticking_point_epsilon(10)
            .with_clamping_point(clamp),
        150,
    )
}

#[test]
fn center_only_widget_ignores_gestures() {
    let mut robot = SwipeRobot::with_panels(None, None);
    assert!(!robot.layout().is_swipe_enabled());

    assert!(!robot.press(500.0, 50.0));
    robot.drag_to(450.0, 50.0, 5);
    robot.release();

    assert_eq!(robot.offset(), 0);
    assert!(robot.events().is_empty());
    assert_eq!(robot.pump_until_idle(), 0);
}

#[test]
fn fling_past_threshold_clamps_to_left_width() {
    let mut robot = SwipeRobot::with_panels(Some(left_panel()), None);

    robot.press(500.0, 50.0);
    robot.drag_to(660.0, 50.0, 4);
    assert_eq!(robot.offset(), 160);
    robot.release();
    robot.pump_until_idle();

    assert_eq!(robot.offset(), 200);
    let events = robot.events();
    assert_swipe_started_first(&events, true);
    assert_clamped_once(&events, true);
    assert_eq!(events.len(), 2);
}

#[test]
fn slow_release_near_right_sticking_point_snaps_and_clamps() {
    let mut robot = SwipeRobot::with_panels(None, Some(sticky_right_panel(ClampingPoint::View)));

    robot.press(500.0, 50.0);
    robot.drag_to(355.0, 50.0, 5);
    assert_eq!(robot.offset(), -145);
    robot.release_after_pause();
    robot.pump_until_idle();

    assert_eq!(robot.offset(), -150);
    assert_eq!(
        robot.events(),
        vec![
            LeaveBehindEvent::SwipeStarted {
                swiped_right: false
            },
            LeaveBehindEvent::RightViewSticked {
                swiped_right: false
            },
            LeaveBehindEvent::Clamped {
                swiped_right: false
            },
        ]
    );
}

#[test]
fn sticking_short_of_parent_clamp_does_not_clamp() {
    let mut robot =
        SwipeRobot::with_panels(None, Some(sticky_right_panel(ClampingPoint::Parent)));

    robot.press(500.0, 50.0);
    robot.drag_to(358.0, 50.0, 4);
    robot.release_after_pause();
    robot.pump_until_idle();

    assert_eq!(robot.offset(), -150);
    assert_not_clamped(&robot.events());
}

#[test]
fn disabled_left_swipe_rejects_rightward_drag() {
    let left = (PanelParameters::left().with_swipe_enabled(false), 200);
    let mut robot = SwipeRobot::with_panels(Some(left), Some((PanelParameters::right(), 150)));

    assert!(robot.press(500.0, 50.0));
    assert!(!robot.move_to(540.0, 50.0));
    assert_eq!(robot.layout().touch_state(), TouchState::Rejected);
    assert!(!robot.drag_to(700.0, 50.0, 5));
    robot.release();

    assert_eq!(robot.offset(), 0);
    assert!(robot.events().is_empty());
    assert!(robot.host().log().disallow_requests.is_empty());
}

#[test]
fn ancestors_stay_disabled_only_while_dragging() {
    let mut robot = SwipeRobot::with_panels(Some(left_panel()), None);
    robot.set_host(RecordingHost::with_ancestors([(7, true), (8, false)]));

    robot.press(500.0, 50.0);
    robot.drag_to(560.0, 50.0, 3);
    {
        let log = robot.host().log();
        assert_eq!(log.ancestor_enabled(7), Some(false));
        assert_eq!(log.ancestor_enabled(8), Some(false));
        assert!(log.intercept_disallowed());
    }

    robot.release_after_pause();
    let log = robot.host().log();
    assert_eq!(log.ancestor_enabled(7), Some(true));
    assert_eq!(log.ancestor_enabled(8), Some(false));
    assert_eq!(log.disallow_requests, vec![true, false]);
}

#[test]
fn cancel_settles_back_like_a_still_release() {
    let mut robot = SwipeRobot::with_panels(Some(left_panel()), None);
    robot.set_host(RecordingHost::with_ancestors([(1, true)]));

    robot.press(500.0, 50.0);
    robot.drag_to(620.0, 50.0, 3);
    robot.cancel();
    assert!(!robot.host().log().intercept_disallowed());
    assert_eq!(robot.host().log().ancestor_enabled(1), Some(true));

    robot.pump_until_idle();
    assert_eq!(robot.offset(), 0);
    assert_not_clamped(&robot.events());
}

#[test]
fn left_sticky_edge_fires_once_per_crossing() {
    let left = (
        PanelParameters::left().with_sticking_point(StickingPoint::Px(100)),
        200,
    );
    let mut robot = SwipeRobot::with_panels(Some(left), None);

    robot.press(500.0, 50.0);
    robot.drag_to(650.0, 50.0, 15);
    robot.release_after_pause();
    robot.pump_until_idle();

    assert_eq!(robot.offset(), 0);
    assert_eq!(
        robot.events(),
        vec![
            LeaveBehindEvent::SwipeStarted { swiped_right: true },
            LeaveBehindEvent::LeftViewSticked { swiped_right: true },
            LeaveBehindEvent::LeftViewSticked {
                swiped_right: false
            },
        ]
    );
}

#[test]
fn each_gesture_may_clamp_once() {
    let mut robot = SwipeRobot::with_panels(Some(left_panel()), None);

    robot.press(500.0, 50.0);
    robot.drag_to(800.0, 50.0, 3);
    robot.release_after_pause();
    assert_eq!(robot.event_log().clamped_count(), 1);

    let first = robot.event_log().take();
    assert_clamped_once(&first, true);

    robot.layout().reset(false);
    robot.swipe(500.0, 800.0);
    robot.pump_until_idle();

    assert_clamped_once(&robot.events(), true);
    assert_eq!(robot.offset(), 200);
}

#[test]
fn siblings_track_center_through_drag_and_settle() {
    let mut robot = SwipeRobot::with_panels(
        Some(left_panel()),
        Some(sticky_right_panel(ClampingPoint::View)),
    );

    robot.press(500.0, 50.0);
    robot.drag_to(380.0, 50.0, 6);
    assert_siblings_attached(&robot.layout().geometry().unwrap());
    robot.release_after_pause();

    while robot.layout().is_settling() {
        robot.advance_frame();
        assert_siblings_attached(&robot.layout().geometry().unwrap());
    }
    assert_eq!(robot.offset(), 0);
}

#[test]
fn movements_report_damaged_regions() {
    let mut robot = SwipeRobot::with_panels(Some(left_panel()), None);
    robot.host().clear_invalidations();

    robot.press(500.0, 50.0);
    robot.move_to(530.0, 50.0);

    let log = robot.host().log();
    assert!(log.invalidated.contains(&HorizontalSpan::new(0, 1030)));
    assert!(log.invalidated.contains(&HorizontalSpan::new(-200, 30)));
}

#[test]
fn animated_reset_returns_every_panel_to_rest() {
    let mut robot = SwipeRobot::with_panels(Some(left_panel()), None);
    robot.press(500.0, 50.0);
    robot.drag_to(800.0, 50.0, 3);
    robot.release_after_pause();
    assert_eq!(robot.offset(), 200);

    robot.layout().reset(true);
    let frames = robot.pump_until_idle();

    assert!(frames >= 12, "reset took only {frames} frames");
    assert_eq!(robot.offset(), 0);
    assert_siblings_attached(&robot.layout().geometry().unwrap());
}

#[test]
fn largest_raw_pixel_values_drag_and_settle_normally() {
    let raw = RawPanelParameters {
        gravity: 1,
        sticking_point: i32::MAX,
        clamping_point: i32::MAX,
        ..RawPanelParameters::default()
    };
    let right = (PanelParameters::from_raw(raw).unwrap(), 150);
    let mut robot = SwipeRobot::with_panels(None, Some(right));

    robot.press(500.0, 50.0);
    robot.drag_to(400.0, 50.0, 5);
    assert_eq!(robot.offset(), -100);
    robot.release_after_pause();
    robot.pump_until_idle();

    assert_eq!(robot.offset(), 0);
    assert_siblings_attached(&robot.layout().geometry().unwrap());
    assert_eq!(
        robot.events(),
        vec![LeaveBehindEvent::SwipeStarted {
            swiped_right: false
        }]
    );
}
