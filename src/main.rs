use std::time::Duration;

use rova::alerts::WorkerVoice;
use rova::bridge::LogActuator;
use rova::control::{ControlLoop, MonotonicClock};
use rova::perception::simulator::ScenarioSimulator;
use rova::telemetry::JsonlMissionLog;

const TICK_MS: u64 = 500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("rova autonomy controller booting");

    let mut agent = ControlLoop::new(
        Box::new(ScenarioSimulator::new()),
        Box::new(WorkerVoice::spawn()),
        Box::new(JsonlMissionLog::new("mission_history.jsonl")),
        Box::new(LogActuator),
        Box::new(MonotonicClock::new()),
    );

    let mut cadence = tokio::time::interval(Duration::from_millis(TICK_MS));
    cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!("control loop active; tick {TICK_MS}ms. Ctrl+C to stop.");

    loop {
        cadence.tick().await;

        match agent.tick() {
            Ok(record) => {
                tracing::info!(
                    "[{}] action: {} | safety: {:.2} | pos: [{:.1}, {:.1}] | {}",
                    record.perception.timestamp.format("%H:%M:%S%.3f"),
                    record.decision.action.as_str(),
                    record.reasoning.safety_score,
                    record.position[0],
                    record.position[1],
                    record.feedback_status,
                );
                for alert in &record.reasoning.alerts {
                    tracing::warn!("[ALERT] {alert}");
                }
            }
            // A bad perception pull abandons the tick but never the loop.
            Err(e) => tracing::warn!("tick abandoned: {e}"),
        }
    }
}
