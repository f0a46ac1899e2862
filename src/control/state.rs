use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Running,
    Paused,
}

/// The last alert actually handed to the voice sink, kept for throttling.
#[derive(Debug, Clone)]
pub struct LastAlert {
    pub message: String,
    pub at: f64,
}

/// Process-wide mutable agent state.
///
/// Mutated exclusively by the control loop; the reasoning engine and the
/// pathfinder only ever see copies of the position/goal pair. If ticks are
/// driven from concurrent callers, the whole loop (and thus this struct)
/// must sit behind one mutex.
#[derive(Debug, Clone)]
pub struct AgentControlState {
    pub position: [f64; 2],
    pub goal: [f64; 2],
    pub mode: ControlMode,
    /// Clock reading of the last safety reset; starts the grace period.
    pub last_reset: f64,
    pub last_alert: Option<LastAlert>,
}

impl AgentControlState {
    /// `now` stamps the initial reset time, so the boot itself opens a
    /// grace period.
    pub fn new(now: f64) -> Self {
        Self {
            position: [0.0, 0.0],
            goal: [10.0, 10.0],
            mode: ControlMode::Running,
            last_reset: now,
            last_alert: None,
        }
    }
}
