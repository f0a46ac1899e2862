pub mod engine;

pub use engine::ReasoningEngine;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Severity tokens used as conclusion prefixes, strongest first.
pub const SEVERITY_CRITICAL: &str = "CRITICAL";
pub const SEVERITY_CAUTION: &str = "CAUTION";
pub const SEVERITY_ALERT: &str = "ALERT";

/// What the rule engine concluded about one snapshot.
///
/// `conclusions` is never empty: when nothing fires the engine emits the
/// nominal STATUS line. `alerts` starts empty and is appended to by the
/// control loop (breach / grace / pause notices) after reasoning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningReport {
    pub timestamp: DateTime<Utc>,
    pub conclusions: Vec<String>,
    pub world_model: HashMap<String, f64>,
    pub suggested_actions: Vec<String>,
    pub safety_score: f64,
    #[serde(default)]
    pub alerts: Vec<String>,
}

impl ReasoningReport {
    pub fn has_critical(&self) -> bool {
        self.contains_severity(SEVERITY_CRITICAL)
    }

    pub fn has_caution(&self) -> bool {
        self.contains_severity(SEVERITY_CAUTION)
    }

    pub fn has_alert(&self) -> bool {
        self.contains_severity(SEVERITY_ALERT)
    }

    fn contains_severity(&self, token: &str) -> bool {
        self.conclusions.iter().any(|c| c.contains(token))
    }
}
