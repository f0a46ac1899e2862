use thiserror::Error;

/// Failures surfaced by the control loop.
///
/// Sink failures (voice, mission log, actuation) are deliberately NOT here:
/// they are logged and swallowed at the tick boundary so a bad collaborator
/// can never stall the loop. Only a failed perception pull abandons a tick,
/// and it does so before any shared state has been touched.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("perception source failed: {0}")]
    Perception(anyhow::Error),
}
