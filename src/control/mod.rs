pub mod clock;
pub mod reactor;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use reactor::{ControlLoop, TickRecord};
pub use state::{AgentControlState, ControlMode};
