use std::collections::HashMap;
use tracing::info;

/// Hardware/robot actuation boundary. Receives the decision's parameter
/// map (at least `vx`/`vy`) once per running tick.
pub trait ActuationSink: Send {
    fn apply(&mut self, params: &HashMap<String, f64>) -> anyhow::Result<()>;
}

/// Logs the velocity command instead of driving hardware.
pub struct LogActuator;

impl ActuationSink for LogActuator {
    fn apply(&mut self, params: &HashMap<String, f64>) -> anyhow::Result<()> {
        let vx = params.get("vx").copied().unwrap_or(0.0);
        let vy = params.get("vy").copied().unwrap_or(0.0);
        info!(vx, vy, "actuation command");
        Ok(())
    }
}
