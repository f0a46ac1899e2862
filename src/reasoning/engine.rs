use chrono::Utc;
use std::collections::HashMap;

use crate::perception::PerceptionSnapshot;

use super::ReasoningReport;

/// Labels that force an emergency stop when seen at all.
const CRITICAL_LABELS: [&str; 2] = ["person", "obstacle"];
/// Labels that only warrant slowing down.
const CAUTION_LABELS: [&str; 3] = ["cell phone", "scissors", "backpack"];

/// One row of the rule table. Kept for introspection (dashboards, docs);
/// evaluation is the hard-coded cascade in [`ReasoningEngine::reason`],
/// not a generic interpreter over these strings.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub condition: &'static str,
    pub conclusion: &'static str,
}

pub const RULES: [Rule; 3] = [
    Rule { condition: "proximity < 5", conclusion: "Caution: Collision Risk" },
    Rule { condition: "vibration > 0.8", conclusion: "Warning: Mechanical Stress" },
    Rule { condition: "obstacle_count > 0", conclusion: "Notice: Path Obstructed" },
];

/// Stateless symbolic rule evaluator. `reason` is a pure function of the
/// snapshot; the engine carries no cross-tick state.
pub struct ReasoningEngine;

impl ReasoningEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn rules(&self) -> &'static [Rule] {
        &RULES
    }

    /// Runs the ordered rule cascade over one snapshot.
    ///
    /// Branches are non-exclusive except where noted: the proximity/entity
    /// cascade picks CRITICAL or CAUTION (never both), while the vibration
    /// ALERT and the obstacle OBSERVATION fire independently on top.
    pub fn reason(&self, snapshot: &PerceptionSnapshot) -> ReasoningReport {
        let mut conclusions: Vec<String> = Vec::new();

        let proximity = snapshot.sensor("proximity", 100.0);
        let vibration = snapshot.sensor("vibration", 0.0);

        let obstacle_count = snapshot
            .entities
            .iter()
            .filter(|e| CRITICAL_LABELS.contains(&e.label.as_str()))
            .count();
        let caution_count = snapshot
            .entities
            .iter()
            .filter(|e| CAUTION_LABELS.contains(&e.label.as_str()))
            .count();

        if proximity < 5.0 || obstacle_count > 0 {
            conclusions.push(format!(
                "CRITICAL: Emergency Stop - {} high-risk entities detected",
                obstacle_count
            ));
        } else if proximity < 15.0 || caution_count > 0 {
            conclusions.push(format!(
                "CAUTION: Potential risk - {} objects detected",
                caution_count
            ));
        }

        if vibration > 0.85 {
            conclusions.push("ALERT: High vibration detected - Maintenance required".to_string());
        }

        if obstacle_count > 0 {
            conclusions.push(format!("OBSERVATION: {} obstacle(s) in vision", obstacle_count));
        }

        if conclusions.is_empty() {
            conclusions.push("STATUS: Nominal operations".to_string());
        }

        // Coarse two-valued safety signal keyed off the anomaly flag alone.
        // Intentionally NOT a function of which rules fired.
        let safety_score = if snapshot.anomaly { 0.4 } else { 0.99 };

        let mut world_model = HashMap::new();
        world_model.insert("safety_prob".to_string(), safety_score);
        world_model.insert("efficiency_prob".to_string(), 0.85);

        let suggested_actions = conclusions
            .iter()
            .map(|c| if c.contains("CRITICAL") { "STOP" } else { "CONTINUE" }.to_string())
            .collect();

        ReasoningReport {
            timestamp: Utc::now(),
            conclusions,
            world_model,
            suggested_actions,
            safety_score,
            alerts: Vec::new(),
        }
    }
}

impl Default for ReasoningEngine {
    fn default() -> Self {
        Self::new()
    }
}
