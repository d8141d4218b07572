/// Notifications a [`LeaveBehindLayout`](crate::LeaveBehindLayout) raises to the embedding app.
///
/// `swiped_right` is true when the movement that caused the notification went
/// toward the right edge (revealing the LEFT panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaveBehindEvent {
    SwipeStarted { swiped_right: bool },
    /// A panel reached its clamping point. Terminal for the gesture.
    Clamped { swiped_right: bool },
    LeftViewSticked { swiped_right: bool },
    RightViewSticked { swiped_right: bool },
}

impl LeaveBehindEvent {
    pub fn swiped_right(&self) -> bool {
        match *self {
            LeaveBehindEvent::SwipeStarted { swiped_right }
            | LeaveBehindEvent::Clamped { swiped_right }
            | LeaveBehindEvent::LeftViewSticked { swiped_right }
            | LeaveBehindEvent::RightViewSticked { swiped_right } => swiped_right,
        }
    }
}
