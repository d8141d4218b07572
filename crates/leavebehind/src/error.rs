use crate::params::ParameterField;

/// Errors raised while attaching or laying out a [`LeaveBehindLayout`](crate::LeaveBehindLayout).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeaveBehindError {
    /// A raw panel parameter is negative and not one of that field's sentinels.
    #[error("invalid {field} value {value}")]
    InvalidConfiguration { field: ParameterField, value: i32 },
    /// Layout was attempted without a CENTER (surface) child.
    #[error("surface panel is missing: exactly one child must have CENTER gravity")]
    MissingRequiredPanel,
    /// The host passed a different number of measured widths than attached children.
    #[error("expected {expected} measured widths, got {actual}")]
    ChildCountMismatch { expected: usize, actual: usize },
    /// The operation needs panel geometry and the layout has not run yet.
    #[error("layout has not been performed yet")]
    NotLaidOut,
}

pub type Result<T, E = LeaveBehindError> = std::result::Result<T, E>;
