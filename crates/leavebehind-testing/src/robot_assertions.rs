//! Assertion helpers for robot tests.

use leavebehind::{LeaveBehindEvent, PanelGeometry};

/// Assert that exactly one `Clamped` was delivered, as the last notification,
/// carrying `swiped_right`.
pub fn assert_clamped_once(events: &[LeaveBehindEvent], swiped_right: bool) {
    let clamped: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, LeaveBehindEvent::Clamped { .. }))
        .collect();
    assert_eq!(clamped.len(), 1, "expected one Clamped in {:?}", events);
    assert_eq!(
        events.last(),
        Some(&LeaveBehindEvent::Clamped { swiped_right }),
        "Clamped must be the terminal notification in {:?}",
        events
    );
}

pub fn assert_not_clamped(events: &[LeaveBehindEvent]) {
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, LeaveBehindEvent::Clamped { .. })),
        "unexpected Clamped in {:?}",
        events
    );
}

/// Assert that `SwipeStarted` precedes every other notification.
pub fn assert_swipe_started_first(events: &[LeaveBehindEvent], swiped_right: bool) {
    assert_eq!(
        events.first(),
        Some(&LeaveBehindEvent::SwipeStarted { swiped_right }),
        "SwipeStarted must come first in {:?}",
        events
    );
}

/// Assert that LEFT and RIGHT hug CENTER's edges.
pub fn assert_siblings_attached(geometry: &PanelGeometry) {
    let center = geometry.center();
    if let Some(left) = geometry.left_panel() {
        assert_eq!(left.right(), center.left, "LEFT detached from CENTER");
    }
    if let Some(right) = geometry.right_panel() {
        assert_eq!(right.left, center.right(), "RIGHT detached from CENTER");
    }
}
