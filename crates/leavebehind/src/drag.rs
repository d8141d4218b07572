//! Direction disambiguation for an in-progress touch.
//!
//! The machine only classifies. It does not move panels or talk to the host;
//! [`LeaveBehindLayout`](crate::LeaveBehindLayout) reacts to the transitions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    /// No direction committed yet.
    #[default]
    Wait,
    /// Confirmed horizontal swipe in an enabled direction.
    Dragging,
    /// Vertical or disabled-direction gesture; nothing is forwarded.
    Rejected,
}

/// Which reveal directions are currently allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeDirections {
    /// Rightward drags, which reveal the LEFT panel.
    pub left: bool,
    /// Leftward drags, which reveal the RIGHT panel.
    pub right: bool,
}

impl SwipeDirections {
    pub const BOTH: Self = Self {
        left: true,
        right: true,
    };

    pub fn allows(&self, moving_right: bool) -> bool {
        if moving_right {
            self.left
        } else {
            self.right
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTransition {
    /// Still inside the touch slop.
    Pending,
    /// WAIT → DRAGGING on this movement.
    Started { swiped_right: bool },
    /// WAIT → REJECTED on this movement.
    Rejected,
    /// Already committed; carries the current state.
    Unchanged(TouchState),
}

#[derive(Debug, Clone)]
pub struct DragStateMachine {
    state: TouchState,
    touch_slop: f32,
    origin: Option<(f32, f32)>,
}

impl DragStateMachine {
    pub fn new(touch_slop: f32) -> Self {
        Self {
            state: TouchState::Wait,
            touch_slop,
            origin: None,
        }
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    pub fn origin(&self) -> Option<(f32, f32)> {
        self.origin
    }

    /// Starts a fresh gesture at `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.state = TouchState::Wait;
        self.origin = Some((x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, directions: SwipeDirections) -> DragTransition {
        if self.state != TouchState::Wait {
            return DragTransition::Unchanged(self.state);
        }
        let Some((origin_x, origin_y)) = self.origin else {
            log::warn!("pointer move at ({x}, {y}) without a preceding pointer down");
            return DragTransition::Pending;
        };

        let dx = (x - origin_x).abs();
        let dy = (y - origin_y).abs();
        if dx < self.touch_slop && dy < self.touch_slop {
            return DragTransition::Pending;
        }

        let moving_right = x - origin_x > 0.0;
        let horizontal = dy == 0.0 || dx / dy > 1.0;
        if !directions.allows(moving_right) || !horizontal {
            log::debug!(
                "touch rejected: dx={dx} dy={dy} moving_right={moving_right} allowed={directions:?}"
            );
            self.state = TouchState::Rejected;
            return DragTransition::Rejected;
        }

        log::debug!("swipe started: moving_right={moving_right}");
        self.state = TouchState::Dragging;
        DragTransition::Started {
            swiped_right: moving_right,
        }
    }

    /// Ends the gesture (pointer up or cancel). Returns whether it was dragging.
    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.state == TouchState::Dragging;
        self.state = TouchState::Wait;
        self.origin = None;
        was_dragging
    }
}
