use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::alerts::VoiceSink;
use crate::bridge::ActuationSink;
use crate::error::ControlError;
use crate::nav::agent::ARENA_SIZE;
use crate::nav::{ActionId, ActionRecommendation, DecisionAgent};
use crate::perception::{PerceptionSnapshot, PerceptionSource};
use crate::reasoning::{ReasoningEngine, ReasoningReport};
use crate::telemetry::learn::SafetyModel;
use crate::telemetry::mission::{MissionLog, MissionRecord};

use super::clock::Clock;
use super::state::{AgentControlState, ControlMode, LastAlert};

/// Arriving within this distance of the goal counts as reaching it.
const GOAL_RADIUS: f64 = 0.8;
/// Seconds after a safety reset during which critical breaches warn
/// instead of pausing.
const GRACE_PERIOD: f64 = 2.0;
/// An identical alert is re-announced only after this many seconds.
const ALERT_REPEAT_INTERVAL: f64 = 5.0;
/// New goals are drawn inside the arena with this much margin.
const GOAL_MARGIN: f64 = 2.0;

/// Consolidated output of one tick: everything the transport layer streams
/// to observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickRecord {
    pub id: Uuid,
    pub perception: PerceptionSnapshot,
    pub reasoning: ReasoningReport,
    pub decision: ActionRecommendation,
    pub position: [f64; 2],
    pub goal: [f64; 2],
    pub scene_description: String,
    pub feedback_status: String,
}

/// Sequences one full sense -> reason -> decide -> update cycle per tick
/// and owns the armed/paused state machine.
///
/// Single-threaded cooperative: a tick runs to completion before the next
/// begins, and nothing inside a tick suspends. Callers driving ticks from
/// concurrent contexts must serialize around the whole loop.
pub struct ControlLoop {
    state: AgentControlState,
    reasoning: ReasoningEngine,
    decision: DecisionAgent,
    perception: Box<dyn PerceptionSource>,
    voice: Box<dyn VoiceSink>,
    mission_log: Box<dyn MissionLog>,
    actuation: Box<dyn ActuationSink>,
    model: SafetyModel,
    clock: Box<dyn Clock>,
}

impl ControlLoop {
    pub fn new(
        perception: Box<dyn PerceptionSource>,
        voice: Box<dyn VoiceSink>,
        mission_log: Box<dyn MissionLog>,
        actuation: Box<dyn ActuationSink>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        Self {
            state: AgentControlState::new(now),
            reasoning: ReasoningEngine::new(),
            decision: DecisionAgent::new(),
            perception,
            voice,
            mission_log,
            actuation,
            model: SafetyModel::new(),
            clock,
        }
    }

    pub fn state(&self) -> &AgentControlState {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state.mode == ControlMode::Paused
    }

    /// The path planned by the most recent running tick.
    pub fn current_path(&self) -> &[[f64; 2]] {
        self.decision.current_path()
    }

    /// Replaces the goal; takes effect on the next tick.
    pub fn set_goal(&mut self, goal: [f64; 2]) {
        self.state.goal = goal;
        info!(x = goal[0], y = goal[1], "new goal set");
        let now = self.clock.now();
        self.announce(
            now,
            &format!(
                "New mission coordinates received. Navigating to grid {}, {}.",
                goal[0] as i64, goal[1] as i64
            ),
        );
    }

    /// Paused -> Running transition; restarts the grace-period clock.
    /// Idempotent when already running.
    pub fn reset_safety(&mut self) {
        let now = self.clock.now();
        self.state.mode = ControlMode::Running;
        self.state.last_reset = now;
        info!("safety reset; grace period open");
        self.announce(now, "Safety system reset confirmed. Resuming mission.");
    }

    /// Runs one tick and returns the consolidated record.
    ///
    /// Perception failure abandons the tick before any shared state is
    /// touched. Sink failures are logged and never abort the tick.
    pub fn tick(&mut self) -> Result<TickRecord, ControlError> {
        // Even while paused, pull a fresh snapshot so observers keep
        // seeing live sensor data.
        let snapshot = self.perception.sample().map_err(ControlError::Perception)?;
        let now = self.clock.now();
        let scene = snapshot.scene_description();

        if self.state.mode == ControlMode::Paused {
            return Ok(self.paused_record(snapshot, scene));
        }

        // === REASON ===
        let mut report = self.reasoning.reason(&snapshot);

        // === DECIDE ===
        let mut decision = self.decision.decide(&report, self.state.position, self.state.goal);

        // === UPDATE POSITION === (Euler, unit time step)
        self.state.position[0] += decision.vx();
        self.state.position[1] += decision.vy();

        // === GOAL ARRIVAL ===
        let dx = self.state.position[0] - self.state.goal[0];
        let dy = self.state.position[1] - self.state.goal[1];
        if (dx * dx + dy * dy).sqrt() < GOAL_RADIUS {
            let mut rng = rand::thread_rng();
            let bound = ARENA_SIZE / 2.0 - GOAL_MARGIN;
            self.state.goal = [rng.gen_range(-bound..bound), rng.gen_range(-bound..bound)];
            report.alerts.push("Goal reached - new objective assigned".to_string());
            info!(x = self.state.goal[0], y = self.state.goal[1], "goal reached, new goal drawn");
            self.announce(
                now,
                &format!(
                    "Objective complete. New target at grid {}, {}.",
                    self.state.goal[0] as i64, self.state.goal[1] as i64
                ),
            );
        }

        // === CRITICAL BREACH POLICY ===
        if report.has_critical() {
            if now - self.state.last_reset > GRACE_PERIOD {
                report
                    .alerts
                    .push("SAFETY BREACH: Critical condition - mission paused".to_string());
                self.state.mode = ControlMode::Paused;
                // The pause preempts the emergency-stop command in the
                // emitted record; IDLE_STANDBY takes over next tick.
                decision = ActionRecommendation {
                    action: ActionId::SafetyPause,
                    description: "Critical breach outside grace period; auto-pausing mission"
                        .to_string(),
                    confidence: 1.0,
                    params: ActionRecommendation::velocity(0.0, 0.0),
                };
                warn!("critical breach outside grace period; pausing");
                self.announce(now, "Safety breach detected. Pausing mission. Awaiting manual reset.");
            } else {
                report
                    .alerts
                    .push("GRACE PERIOD: Critical condition tolerated after recent reset".to_string());
                self.announce(now, "Critical readings during grace period. Proceeding with caution.");
            }
        }

        // === LEARN === (monitoring only; never feeds back into decisions)
        self.model.learn(&snapshot.sensors, report.safety_score);

        // === SINKS ===
        let mission = MissionRecord {
            timestamp: Utc::now(),
            safety_score: report.safety_score,
            mae: self.model.mae(),
            alerts: report.alerts.clone(),
            scene_description: scene.clone(),
            snapshot_path: None,
        };
        if let Err(e) = self.mission_log.log_tick(&mission) {
            warn!("mission log failed: {e:#}");
        }
        if let Err(e) = self.actuation.apply(&decision.params) {
            warn!("actuation bridge failed: {e:#}");
        }

        Ok(TickRecord {
            id: Uuid::new_v4(),
            perception: snapshot,
            reasoning: report,
            decision,
            position: self.state.position,
            goal: self.state.goal,
            scene_description: scene,
            feedback_status: self.model.status(),
        })
    }

    /// Synthetic record for paused ticks: live perception, no reasoning or
    /// decision, zero safety score, explicit pause alert.
    fn paused_record(&self, snapshot: PerceptionSnapshot, scene: String) -> TickRecord {
        let mut world_model = HashMap::new();
        world_model.insert("safety_prob".to_string(), 0.0);
        world_model.insert("efficiency_prob".to_string(), 0.85);
        let reasoning = ReasoningReport {
            timestamp: Utc::now(),
            conclusions: vec!["STATUS: Mission paused - awaiting safety reset".to_string()],
            world_model,
            suggested_actions: vec!["STOP".to_string()],
            safety_score: 0.0,
            alerts: vec!["MISSION PAUSED - Awaiting manual safety reset".to_string()],
        };
        let decision = ActionRecommendation {
            action: ActionId::IdleStandby,
            description: "Mission paused; holding position".to_string(),
            confidence: 1.0,
            params: ActionRecommendation::velocity(0.0, 0.0),
        };
        TickRecord {
            id: Uuid::new_v4(),
            perception: snapshot,
            reasoning,
            decision,
            position: self.state.position,
            goal: self.state.goal,
            scene_description: scene,
            feedback_status: self.model.status(),
        }
    }

    /// Hands a message to the voice sink unless the identical message went
    /// out less than `ALERT_REPEAT_INTERVAL` seconds ago.
    fn announce(&mut self, now: f64, message: &str) {
        let due = match &self.state.last_alert {
            Some(last) => last.message != message || now - last.at >= ALERT_REPEAT_INTERVAL,
            None => true,
        };
        if due {
            self.voice.announce(message);
            self.state.last_alert = Some(LastAlert { message: message.to_string(), at: now });
        }
    }
}
