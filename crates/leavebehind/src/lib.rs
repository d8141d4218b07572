//! LeaveBehind: a fixed-size container with a draggable CENTER surface and
//! optional LEFT/RIGHT panels revealed beneath it.
//!
//! The crate is split along the data flow of a gesture:
//! - [`drag`] classifies the pointer stream into WAIT / DRAGGING / REJECTED.
//! - [`geometry`] clamps each drag movement and keeps siblings in lockstep.
//! - [`release`] picks the terminal offset once the pointer lifts.
//! - [`LeaveBehindLayout`] settles there frame by frame and raises
//!   [`LeaveBehindEvent`]s along the way.

pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod params;
pub mod release;
mod settle;
pub mod velocity;

pub use config::LeaveBehindConfig;
pub use drag::{DragStateMachine, DragTransition, SwipeDirections, TouchState};
pub use error::{LeaveBehindError, Result};
pub use event::LeaveBehindEvent;
pub use geometry::{layout_panels, HorizontalSpan, Panel, PanelGeometry};
pub use host::{AncestorId, DetachedHost, GestureHost};
pub use layout::{LeaveBehindLayout, PointerEvent, PointerEventKind};
pub use params::{
    resolve_sticking_point, ClampingEpsilon, ClampingPoint, Gravity, PanelParameters,
    ParameterField, RawPanelParameters, StickingPoint, MAX_RESOLVED_PX,
};
pub use release::{decide_release, ReleaseDecision, SettleTarget};
pub use velocity::VelocityTracker;

pub use leavebehind_animation::{Easing, FrameClock, SettleDriver, TweenSettleDriver};

pub mod prelude {
    pub use crate::{
        ClampingEpsilon, ClampingPoint, Gravity, LeaveBehindConfig, LeaveBehindEvent,
        LeaveBehindLayout, PanelParameters, PointerEvent, StickingPoint,
    };
    pub use leavebehind_animation::FrameClock;
}
