use super::*;
use crate::params::{ClampingEpsilon, ClampingPoint, PanelParameters, StickingPoint};

const THRESHOLD: f32 = 1500.0;

fn dragged(mut geometry: PanelGeometry, dx: i32) -> PanelGeometry {
    geometry.offset_children(None, dx);
    geometry
}

fn with_left(params: PanelParameters, width: i32) -> PanelGeometry {
    PanelGeometry::at_rest(1000, (PanelParameters::center(), 1000), Some((params, width)), None)
}

fn with_right(params: PanelParameters, width: i32) -> PanelGeometry {
    PanelGeometry::at_rest(1000, (PanelParameters::center(), 1000), None, Some((params, width)))
}

#[test]
fn zero_displacement_is_ignored() {
    let geometry = with_left(PanelParameters::left(), 200);
    assert_eq!(
        decide_release(&geometry, Gravity::Center, 0, 5000.0, THRESHOLD),
        ReleaseDecision::Ignored
    );
}

#[test]
fn center_only_release_returns_to_rest_without_clamp() {
    let geometry = PanelGeometry::at_rest(1000, (PanelParameters::center(), 1000), None, None);
    let decision = decide_release(&geometry, Gravity::Center, -50, 0.0, THRESHOLD);

    let target = decision.settle_target().expect("settles");
    assert_eq!(target.left, 0);
    assert!(!target.clamped);
    assert!(!target.swiped_right);
}

#[test]
fn fast_fling_right_clamps_to_left_panel_width() {
    let left = PanelParameters::left()
        .with_clamping_point(ClampingPoint::View)
        .with_sticking_point(StickingPoint::None);
    let geometry = dragged(with_left(left, 200), 160);

    assert_eq!(
        decide_release(&geometry, Gravity::Center, 160, 2000.0, THRESHOLD),
        ReleaseDecision::Fling(SettleTarget {
            left: 200,
            clamped: true,
            swiped_right: true,
        })
    );
}

#[test]
fn fling_toward_missing_panel_settles_at_rest_unclamped() {
    let geometry = with_right(PanelParameters::right(), 150);
    assert_eq!(
        decide_release(&geometry, Gravity::Center, 20, 2000.0, THRESHOLD),
        ReleaseDecision::Fling(SettleTarget {
            left: 0,
            clamped: false,
            swiped_right: true,
        })
    );
}

#[test]
fn opposite_fling_reverses_the_handler() {
    let geometry = dragged(
        PanelGeometry::at_rest(
            1000,
            (PanelParameters::center(), 1000),
            Some((PanelParameters::left(), 200)),
            Some((PanelParameters::right(), 150)),
        ),
        100,
    );

    assert_eq!(
        decide_release(&geometry, Gravity::Center, 100, -2000.0, THRESHOLD),
        ReleaseDecision::Fling(SettleTarget {
            left: 0,
            clamped: false,
            swiped_right: false,
        })
    );
}

#[test]
fn already_clamped_reports_without_settling() {
    let geometry = dragged(with_left(PanelParameters::left(), 200), 200);
    let decision = decide_release(&geometry, Gravity::Center, 200, 10.0, THRESHOLD);

    assert_eq!(decision, ReleaseDecision::ClampReached { swiped_right: true });
    assert_eq!(decision.settle_target(), None);
}

#[test]
fn near_clamp_finishes_the_reveal() {
    let left = PanelParameters::left()
        .with_sticking_point(StickingPoint::None)
        .with_clamping_point_epsilon(ClampingEpsilon::Px(20));
    let geometry = dragged(with_left(left, 200), 185);

    assert_eq!(
        decide_release(&geometry, Gravity::Center, 185, 0.0, THRESHOLD),
        ReleaseDecision::NearClamp(SettleTarget {
            left: 200,
            clamped: true,
            swiped_right: true,
        })
    );
}

#[test]
fn near_clamp_needs_agreeing_velocity() {
    let left = PanelParameters::left()
        .with_sticking_point(StickingPoint::None)
        .with_clamping_point_epsilon(ClampingEpsilon::Px(20));
    let geometry = dragged(with_left(left, 200), 190);

    let decision = decide_release(&geometry, Gravity::Center, -5, 50.0, THRESHOLD);
    assert_eq!(
        decision,
        ReleaseDecision::Unhandled(SettleTarget {
            left: 0,
            clamped: false,
            swiped_right: false,
        })
    );
}

#[test]
fn right_sticking_snap_clamps_when_sticking_equals_clamp() {
    let right = PanelParameters::right()
        .with_sticking_point(StickingPoint::View)
        .with_sticking_point_epsilon(10);
    let geometry = dragged(with_right(right, 150), -145);

    assert_eq!(
        decide_release(&geometry, Gravity::Center, -145, -100.0, THRESHOLD),
        ReleaseDecision::Sticking(SettleTarget {
            left: -150,
            clamped: true,
            swiped_right: false,
        })
    );
}

#[test]
fn right_sticking_snap_is_unclamped_against_parent_clamp() {
    let right = PanelParameters::right()
        .with_sticking_point(StickingPoint::View)
        .with_sticking_point_epsilon(10)
        .with_clamping_point(ClampingPoint::Parent);
    let geometry = dragged(with_right(right, 150), -158);

    assert_eq!(
        decide_release(&geometry, Gravity::Center, -158, -100.0, THRESHOLD),
        ReleaseDecision::Sticking(SettleTarget {
            left: -150,
            clamped: false,
            swiped_right: false,
        })
    );
}

#[test]
fn left_sticking_at_literal_point() {
    let left = PanelParameters::left()
        .with_sticking_point(StickingPoint::Px(80))
        .with_sticking_point_epsilon(15);
    let geometry = dragged(with_left(left, 200), 70);

    assert_eq!(
        decide_release(&geometry, Gravity::Center, 70, 300.0, THRESHOLD),
        ReleaseDecision::Sticking(SettleTarget {
            left: 80,
            clamped: false,
            swiped_right: true,
        })
    );
}

#[test]
fn outside_every_band_is_unhandled() {
    let left = PanelParameters::left().with_sticking_point(StickingPoint::None);
    let geometry = dragged(with_left(left, 200), 80);

    assert_eq!(
        decide_release(&geometry, Gravity::Center, 80, 0.0, THRESHOLD),
        ReleaseDecision::Unhandled(SettleTarget {
            left: 0,
            clamped: false,
            swiped_right: true,
        })
    );
}

#[test]
fn sibling_release_targets_its_own_left_edge() {
    let geometry = dragged(with_left(PanelParameters::left(), 200), 120);

    assert_eq!(
        decide_release(&geometry, Gravity::Left, 120, 1600.0, THRESHOLD),
        ReleaseDecision::Fling(SettleTarget {
            left: 0,
            clamped: true,
            swiped_right: true,
        })
    );
}
