use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::reasoning::ReasoningReport;

use super::TacticalPathfinder;

/// Side length of the square arena in meters.
pub const ARENA_SIZE: f64 = 40.0;
/// Meters per occupancy grid cell.
pub const GRID_RESOLUTION: f64 = 1.0;

const NOMINAL_SPEED: f64 = 0.5;
const CAUTION_SPEED: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionId {
    StopEmergency,
    AStarNavigation,
    SafetyPause,
    IdleStandby,
}

impl ActionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::StopEmergency => "STOP_EMERGENCY",
            ActionId::AStarNavigation => "A_STAR_NAVIGATION",
            ActionId::SafetyPause => "SAFETY_PAUSE",
            ActionId::IdleStandby => "IDLE_STANDBY",
        }
    }
}

/// One velocity command plus enough context to explain it. Immutable once
/// constructed; the control loop applies `vx`/`vy` and forwards the
/// parameter map to the actuation bridge untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecommendation {
    pub action: ActionId,
    pub description: String,
    pub confidence: f64,
    pub params: HashMap<String, f64>,
}

impl ActionRecommendation {
    pub fn velocity(vx: f64, vy: f64) -> HashMap<String, f64> {
        let mut params = HashMap::new();
        params.insert("vx".to_string(), vx);
        params.insert("vy".to_string(), vy);
        params
    }

    pub fn vx(&self) -> f64 {
        self.params.get("vx").copied().unwrap_or(0.0)
    }

    pub fn vy(&self) -> f64 {
        self.params.get("vy").copied().unwrap_or(0.0)
    }
}

/// Turns reasoning conclusions and a planned path into one bounded
/// velocity command per tick.
pub struct DecisionAgent {
    pathfinder: TacticalPathfinder,
    history: Vec<ActionRecommendation>,
    current_path: Vec<[f64; 2]>,
}

impl DecisionAgent {
    pub fn new() -> Self {
        Self {
            pathfinder: TacticalPathfinder::new(ARENA_SIZE, GRID_RESOLUTION),
            history: Vec::new(),
            current_path: Vec::new(),
        }
    }

    /// Diagnostic only; never consulted when deciding.
    pub fn history(&self) -> &[ActionRecommendation] {
        &self.history
    }

    /// The path planned by the most recent `decide` call.
    pub fn current_path(&self) -> &[[f64; 2]] {
        &self.current_path
    }

    pub fn decide(
        &mut self,
        report: &ReasoningReport,
        current_pos: [f64; 2],
        goal_pos: [f64; 2],
    ) -> ActionRecommendation {
        // Fresh grid every cycle. Vision entities carry no reliable world
        // coordinates in this design, so under CAUTION/ALERT we inject two
        // fixed demonstrative zones rather than localized ones.
        self.pathfinder.reset();
        if report.has_caution() || report.has_alert() {
            self.pathfinder.add_manual_obstacle([5.0, 5.0], 3.0);
            self.pathfinder.add_manual_obstacle([-5.0, -2.0], 2.0);
        }

        let full_path = self.pathfinder.find_path(current_pos, goal_pos);
        self.current_path = full_path.clone();

        // Look-ahead: skip the immediate next cell on longer paths for
        // smoother motion; fall back to the raw goal when planning failed.
        let target = if full_path.len() > 2 {
            full_path[2]
        } else if full_path.len() > 1 {
            full_path[1]
        } else {
            goal_pos
        };

        let dx = target[0] - current_pos[0];
        let dy = target[1] - current_pos[1];
        let dist = (dx * dx + dy * dy).sqrt();
        let (ux, uy) = if dist > 0.0 { (dx / dist, dy / dist) } else { (0.0, 0.0) };

        // CRITICAL overrides everything, including the steering we just
        // computed.
        if report.has_critical() {
            let rec = ActionRecommendation {
                action: ActionId::StopEmergency,
                description: "A* pathfinding halted by critical safety logic".to_string(),
                confidence: 1.0,
                params: ActionRecommendation::velocity(0.0, 0.0),
            };
            self.history.push(rec.clone());
            return rec;
        }

        let mut speed = if report.has_caution() { CAUTION_SPEED } else { NOMINAL_SPEED };

        let description = if full_path.is_empty() {
            // Unreachable goal is not an error; creep toward it instead.
            speed *= 0.5;
            format!(
                "A* found no valid path; moving cautiously toward [{:.1}, {:.1}]",
                goal_pos[0], goal_pos[1]
            )
        } else {
            format!(
                "A* path active; navigating via {} waypoints to [{:.1}, {:.1}]",
                full_path.len(),
                goal_pos[0],
                goal_pos[1]
            )
        };
        debug!(waypoints = full_path.len(), speed, "navigation decision");

        let rec = ActionRecommendation {
            action: ActionId::AStarNavigation,
            description,
            confidence: 0.98,
            params: ActionRecommendation::velocity(ux * speed, uy * speed),
        };
        self.history.push(rec.clone());
        rec
    }
}

impl Default for DecisionAgent {
    fn default() -> Self {
        Self::new()
    }
}
