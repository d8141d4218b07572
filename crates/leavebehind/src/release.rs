//! Terminal-offset selection when a drag ends.
//!
//! [`decide_release`] is pure: it inspects the geometry at the moment of
//! release and returns what the settle controller should do. Targets are
//! left edges of the *dragged* panel, so siblings follow through
//! [`PanelGeometry::offset_children`].

use crate::geometry::PanelGeometry;
use crate::params::Gravity;

/// Where the dragged panel should come to rest and what to report on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTarget {
    /// Left edge of the dragged panel at the end of the settle.
    pub left: i32,
    /// Fire `Clamped` once the settle finishes.
    pub clamped: bool,
    pub swiped_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// No net displacement; nothing to do.
    Ignored,
    /// Velocity above the threshold snapped to full reveal or back to rest.
    Fling(SettleTarget),
    /// No panel on the revealed side; back to rest.
    NoOpposingPanel(SettleTarget),
    /// The drag already reached the clamp. `Clamped` fires without a settle.
    ClampReached { swiped_right: bool },
    /// Close enough to the clamp to finish the reveal.
    NearClamp(SettleTarget),
    /// Released inside the sticking band.
    Sticking(SettleTarget),
    /// Nothing matched; the panel returns to its position relative to CENTER.
    Unhandled(SettleTarget),
}

impl ReleaseDecision {
    pub fn settle_target(&self) -> Option<SettleTarget> {
        match *self {
            ReleaseDecision::Ignored | ReleaseDecision::ClampReached { .. } => None,
            ReleaseDecision::Fling(target)
            | ReleaseDecision::NoOpposingPanel(target)
            | ReleaseDecision::NearClamp(target)
            | ReleaseDecision::Sticking(target)
            | ReleaseDecision::Unhandled(target) => Some(target),
        }
    }
}

/// Picks the outcome of releasing `dragged` after a net displacement of `dx`
/// with velocity `velocity` (px/s, positive to the right).
///
/// A fast fling against the net displacement flips the handler: a rightward
/// drag released with negative velocity is judged as a reveal of RIGHT.
pub fn decide_release(
    geometry: &PanelGeometry,
    dragged: Gravity,
    dx: i32,
    velocity: f32,
    velocity_threshold: f32,
) -> ReleaseDecision {
    if dx == 0 {
        return ReleaseDecision::Ignored;
    }

    let reveals_left = if dx > 0 {
        velocity >= 0.0
    } else {
        velocity > 0.0
    };
    let handled = if reveals_left {
        reveal_left(geometry, dragged, dx, velocity, velocity_threshold)
    } else {
        reveal_right(geometry, dragged, dx, velocity, velocity_threshold)
    };

    let decision = handled.unwrap_or_else(|| {
        ReleaseDecision::Unhandled(SettleTarget {
            left: rest_left(geometry, dragged),
            clamped: false,
            swiped_right: dx > 0,
        })
    });
    log::debug!("release dx={dx} v={velocity}: {decision:?}");
    decision
}

/// Left edge `dragged` takes when CENTER is back at 0.
fn rest_left(geometry: &PanelGeometry, dragged: Gravity) -> i32 {
    geometry.left_of(dragged) - geometry.center().left
}

fn reveal_left(
    geometry: &PanelGeometry,
    dragged: Gravity,
    dx: i32,
    velocity: f32,
    velocity_threshold: f32,
) -> Option<ReleaseDecision> {
    let center_left = geometry.center().left;
    let child_left = geometry.left_of(dragged);

    if velocity > velocity_threshold {
        let toward_rest = center_left < 0;
        let proposed = if toward_rest {
            child_left - center_left
        } else {
            geometry.container_width()
        };
        return Some(ReleaseDecision::Fling(SettleTarget {
            left: geometry.clamp_move_right(dragged, proposed),
            clamped: !toward_rest && geometry.left_panel().is_some(),
            swiped_right: true,
        }));
    }

    let Some(panel) = geometry.left_panel() else {
        return Some(ReleaseDecision::NoOpposingPanel(SettleTarget {
            left: rest_left(geometry, dragged),
            clamped: false,
            swiped_right: true,
        }));
    };

    let agrees = dx > 0 && velocity >= 0.0;
    let clamp = panel
        .params
        .clamping_point
        .resolve(panel.width, geometry.container_width());
    let reveal = panel.right();

    if agrees && reveal >= clamp {
        return Some(ReleaseDecision::ClampReached { swiped_right: true });
    }

    if let Some(epsilon) = panel.params.clamping_point_epsilon.resolve() {
        if agrees && reveal >= clamp - epsilon {
            return Some(ReleaseDecision::NearClamp(SettleTarget {
                left: child_left + clamp - reveal,
                clamped: true,
                swiped_right: true,
            }));
        }
    }

    let bound = panel.params.sticking_bound(panel.width)?;
    if (reveal - bound).abs() <= panel.params.sticking_epsilon() {
        return Some(ReleaseDecision::Sticking(SettleTarget {
            left: child_left + bound - reveal,
            clamped: bound == clamp,
            swiped_right: true,
        }));
    }
    None
}

fn reveal_right(
    geometry: &PanelGeometry,
    dragged: Gravity,
    dx: i32,
    velocity: f32,
    velocity_threshold: f32,
) -> Option<ReleaseDecision> {
    let center_left = geometry.center().left;
    let child_left = geometry.left_of(dragged);
    let width = geometry.container_width();

    if -velocity > velocity_threshold {
        let toward_rest = center_left > 0;
        let proposed = if toward_rest {
            child_left - center_left
        } else {
            -width
        };
        return Some(ReleaseDecision::Fling(SettleTarget {
            left: geometry.clamp_move_left(dragged, proposed),
            clamped: !toward_rest && geometry.right_panel().is_some(),
            swiped_right: false,
        }));
    }

    let Some(panel) = geometry.right_panel() else {
        return Some(ReleaseDecision::NoOpposingPanel(SettleTarget {
            left: rest_left(geometry, dragged),
            clamped: false,
            swiped_right: false,
        }));
    };

    let agrees = dx < 0 && velocity <= 0.0;
    let clamp = panel.params.clamping_point.resolve(panel.width, width);
    let reveal = width - panel.left;

    if agrees && reveal >= clamp {
        return Some(ReleaseDecision::ClampReached {
            swiped_right: false,
        });
    }

    if let Some(epsilon) = panel.params.clamping_point_epsilon.resolve() {
        if agrees && reveal >= clamp - epsilon {
            return Some(ReleaseDecision::NearClamp(SettleTarget {
                left: child_left - (clamp - reveal),
                clamped: true,
                swiped_right: false,
            }));
        }
    }

    let bound = panel.params.sticking_bound(panel.width)?;
    if (reveal - bound).abs() <= panel.params.sticking_epsilon() {
        return Some(ReleaseDecision::Sticking(SettleTarget {
            left: child_left - (bound - reveal),
            clamped: bound == clamp,
            swiped_right: false,
        }));
    }
    None
}

#[cfg(test)]
#[path = "tests/release_tests.rs"]
mod tests;
