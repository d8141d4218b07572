//! Testing utilities and harness for LeaveBehind

pub mod host;
pub mod robot;
pub mod robot_assertions;

pub use host::{HostLog, RecordingHost};
pub use robot::{EventLog, SwipeRobot};

pub mod prelude {
    pub use crate::host::*;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}
