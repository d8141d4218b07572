//! Per-panel parameters.
//!
//! Typed values can only describe valid configurations. Hosts that read the
//! integer encoding (negative sentinels) go through [`PanelParameters::from_raw`],
//! which is where invalid values are rejected.

use crate::error::{LeaveBehindError, Result};
use std::fmt;

/// Which slot a child occupies. Fixed once the child is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Gravity {
    Left,
    #[default]
    Center,
    Right,
}

impl Gravity {
    pub const RAW_LEFT: i32 = -1;
    pub const RAW_CENTER: i32 = 0;
    pub const RAW_RIGHT: i32 = 1;

    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            Self::RAW_LEFT => Ok(Gravity::Left),
            Self::RAW_CENTER => Ok(Gravity::Center),
            Self::RAW_RIGHT => Ok(Gravity::Right),
            value => Err(LeaveBehindError::InvalidConfiguration {
                field: ParameterField::Gravity,
                value,
            }),
        }
    }
}

/// Intermediate offset a release gravitates toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StickingPoint {
    None,
    /// The panel's own width.
    #[default]
    View,
    Px(u32),
}

impl StickingPoint {
    pub const RAW_NONE: i32 = -2;
    pub const RAW_VIEW: i32 = -1;

    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            Self::RAW_NONE => Ok(StickingPoint::None),
            Self::RAW_VIEW => Ok(StickingPoint::View),
            value => non_negative(ParameterField::StickingPoint, value).map(StickingPoint::Px),
        }
    }

    pub fn resolve(self, view_width: i32) -> Option<i32> {
        match self {
            StickingPoint::None => None,
            StickingPoint::View => Some(view_width),
            StickingPoint::Px(px) => Some(clamp_px(px)),
        }
    }
}

/// Resolves a sticking point against the width of the panel it belongs to.
pub fn resolve_sticking_point(point: StickingPoint, view_width: i32) -> Option<i32> {
    point.resolve(view_width)
}

/// Reveal distance at which a panel counts as fully revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampingPoint {
    /// The panel's own width.
    #[default]
    View,
    /// The container's width.
    Parent,
    Px(u32),
}

impl ClampingPoint {
    pub const RAW_VIEW: i32 = -2;
    pub const RAW_PARENT: i32 = -1;

    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            Self::RAW_VIEW => Ok(ClampingPoint::View),
            Self::RAW_PARENT => Ok(ClampingPoint::Parent),
            value => non_negative(ParameterField::ClampingPoint, value).map(ClampingPoint::Px),
        }
    }

    pub fn resolve(self, view_width: i32, parent_width: i32) -> i32 {
        match self {
            ClampingPoint::View => view_width,
            ClampingPoint::Parent => parent_width,
            ClampingPoint::Px(px) => clamp_px(px),
        }
    }
}

/// How close to full reveal a slow release must be to snap the rest of the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampingEpsilon {
    #[default]
    None,
    Px(u32),
}

impl ClampingEpsilon {
    pub const RAW_NONE: i32 = -1;

    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            Self::RAW_NONE => Ok(ClampingEpsilon::None),
            value => {
                non_negative(ParameterField::ClampingPointEpsilon, value).map(ClampingEpsilon::Px)
            }
        }
    }

    pub fn resolve(self) -> Option<i32> {
        match self {
            ClampingEpsilon::None => None,
            ClampingEpsilon::Px(px) => Some(clamp_px(px)),
        }
    }
}

/// Names the field an [`LeaveBehindError::InvalidConfiguration`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterField {
    Gravity,
    StickingPoint,
    StickingPointEpsilon,
    ClampingPoint,
    ClampingPointEpsilon,
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterField::Gravity => "gravity",
            ParameterField::StickingPoint => "sticking point",
            ParameterField::StickingPointEpsilon => "sticking point epsilon",
            ParameterField::ClampingPoint => "clamping point",
            ParameterField::ClampingPointEpsilon => "clamping point epsilon",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelParameters {
    pub gravity: Gravity,
    pub sticking_point: StickingPoint,
    pub sticking_point_epsilon: u32,
    pub clamping_point: ClampingPoint,
    pub clamping_point_epsilon: ClampingEpsilon,
    pub swipe_enabled: bool,
}

impl Default for PanelParameters {
    fn default() -> Self {
        Self::new(Gravity::Center)
    }
}

impl PanelParameters {
    pub fn new(gravity: Gravity) -> Self {
        Self {
            gravity,
            sticking_point: StickingPoint::default(),
            sticking_point_epsilon: 0,
            clamping_point: ClampingPoint::default(),
            clamping_point_epsilon: ClampingEpsilon::default(),
            swipe_enabled: true,
        }
    }

    pub fn left() -> Self {
        Self::new(Gravity::Left)
    }

    pub fn center() -> Self {
        Self::new(Gravity::Center)
    }

    pub fn right() -> Self {
        Self::new(Gravity::Right)
    }

    pub fn with_sticking_point(mut self, point: StickingPoint) -> Self {
        self.sticking_point = point;
        self
    }

    pub fn with_sticking_point_epsilon(mut self, epsilon: u32) -> Self {
        self.sticking_point_epsilon = epsilon;
        self
    }

    pub fn with_clamping_point(mut self, point: ClampingPoint) -> Self {
        self.clamping_point = point;
        self
    }

    pub fn with_clamping_point_epsilon(mut self, epsilon: ClampingEpsilon) -> Self {
        self.clamping_point_epsilon = epsilon;
        self
    }

    pub fn with_swipe_enabled(mut self, enabled: bool) -> Self {
        self.swipe_enabled = enabled;
        self
    }

    /// Validates the integer encoding and builds typed parameters.
    pub fn from_raw(raw: RawPanelParameters) -> Result<Self> {
        Ok(Self {
            gravity: Gravity::from_raw(raw.gravity)?,
            sticking_point: StickingPoint::from_raw(raw.sticking_point)?,
            sticking_point_epsilon: non_negative(
                ParameterField::StickingPointEpsilon,
                raw.sticking_point_epsilon,
            )?,
            clamping_point: ClampingPoint::from_raw(raw.clamping_point)?,
            clamping_point_epsilon: ClampingEpsilon::from_raw(raw.clamping_point_epsilon)?,
            swipe_enabled: raw.swipe_enabled,
        })
    }

    pub fn sticking_bound(&self, view_width: i32) -> Option<i32> {
        self.sticking_point.resolve(view_width)
    }

    pub fn sticking_epsilon(&self) -> i32 {
        clamp_px(self.sticking_point_epsilon)
    }
}

/// Panel parameters as read from static configuration, sentinels included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPanelParameters {
    pub gravity: i32,
    pub sticking_point: i32,
    pub sticking_point_epsilon: i32,
    pub clamping_point: i32,
    pub clamping_point_epsilon: i32,
    pub swipe_enabled: bool,
}

impl Default for RawPanelParameters {
    fn default() -> Self {
        Self {
            gravity: Gravity::RAW_CENTER,
            sticking_point: StickingPoint::RAW_VIEW,
            sticking_point_epsilon: 0,
            clamping_point: ClampingPoint::RAW_VIEW,
            clamping_point_epsilon: ClampingEpsilon::RAW_NONE,
            swipe_enabled: true,
        }
    }
}

fn non_negative(field: ParameterField, value: i32) -> Result<u32> {
    u32::try_from(value).map_err(|_| LeaveBehindError::InvalidConfiguration { field, value })
}

/// Largest literal pixel value a parameter resolves to. Far beyond any
/// display, and small enough that edge arithmetic on it cannot overflow.
pub const MAX_RESOLVED_PX: i32 = 1 << 24;

fn clamp_px(px: u32) -> i32 {
    i32::try_from(px).map_or(MAX_RESOLVED_PX, |px| px.min(MAX_RESOLVED_PX))
}
