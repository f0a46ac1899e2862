pub mod simulator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One detected object. Ids are unique within a tick but NOT stable across
/// ticks; entities are rebuilt from scratch by every perception pull.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub label: String,
    pub confidence: f32,
    /// [x1, y1, x2, y2] in image coordinates, when the source provides one.
    pub bbox: Option<[f32; 4]>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Everything the sensors saw during one tick.
///
/// Sensor readings are plain floats; units are domain convention only
/// (temperature in degrees C, proximity in meters, vibration unitless 0-1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptionSnapshot {
    pub timestamp: DateTime<Utc>,
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub sensors: HashMap<String, f64>,
    pub anomaly: bool,
}

impl PerceptionSnapshot {
    /// Reads a sensor by name, falling back to a default when the source
    /// did not report it this tick.
    pub fn sensor(&self, name: &str, default: f64) -> f64 {
        self.sensors.get(name).copied().unwrap_or(default)
    }

    /// One-line summary of the entity list for logs and the tick record.
    pub fn scene_description(&self) -> String {
        if self.entities.is_empty() {
            return "no entities in view".to_string();
        }
        // Count per label, preserving first-seen order.
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for ent in &self.entities {
            let n = counts.entry(ent.label.as_str()).or_insert(0);
            if *n == 0 {
                order.push(ent.label.as_str());
            }
            *n += 1;
        }
        let parts: Vec<String> = order
            .iter()
            .map(|label| format!("{} {}", counts[label], label))
            .collect();
        format!("{} in view", parts.join(", "))
    }
}

/// Supplies one snapshot per tick, synchronously.
///
/// Implementations must be fast and non-blocking; a stalled source blocks
/// the whole tick (see the concurrency notes on [`crate::ControlLoop`]).
pub trait PerceptionSource: Send {
    fn sample(&mut self) -> anyhow::Result<PerceptionSnapshot>;
}
