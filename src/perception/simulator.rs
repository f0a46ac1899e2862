use chrono::Utc;
use rand::Rng;
use std::collections::HashMap;

use super::{Entity, PerceptionSnapshot, PerceptionSource};

/// One entity archetype the simulator keeps spawning.
struct Archetype {
    label: &'static str,
    count: usize,
}

/// Scenario generator standing in for a real camera + sensor stack.
///
/// Produces a fixed roster of entities with randomized confidences and
/// boxes, sensor readings drawn uniformly from per-sensor ranges, and an
/// obstacle that pops in and out of view. The anomaly flag mirrors what a
/// real anomaly detector would raise: heavy vibration or a visible obstacle.
pub struct ScenarioSimulator {
    archetypes: Vec<Archetype>,
    sensor_ranges: HashMap<&'static str, (f64, f64)>,
}

impl ScenarioSimulator {
    pub fn new() -> Self {
        let mut sensor_ranges = HashMap::new();
        sensor_ranges.insert("temperature", (20.0, 35.0));
        sensor_ranges.insert("vibration", (0.0, 1.0));
        sensor_ranges.insert("proximity", (2.0, 50.0));
        Self {
            archetypes: vec![
                Archetype { label: "human", count: 2 },
                Archetype { label: "vehicle", count: 5 },
                Archetype { label: "obstacle", count: 0 },
            ],
            sensor_ranges,
        }
    }
}

impl Default for ScenarioSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PerceptionSource for ScenarioSimulator {
    fn sample(&mut self) -> anyhow::Result<PerceptionSnapshot> {
        let mut rng = rand::thread_rng();

        // Obstacle flickers into view roughly one tick in ten.
        if rng.gen::<f64>() > 0.8 {
            let last = self
                .archetypes
                .last_mut()
                .ok_or_else(|| anyhow::anyhow!("empty archetype roster"))?;
            last.count = if rng.gen::<f64>() > 0.5 { 1 } else { 0 };
        }

        let mut entities = Vec::new();
        for arch in &self.archetypes {
            for i in 0..arch.count {
                entities.push(Entity {
                    id: format!("{}_{}", arch.label, i),
                    label: arch.label.to_string(),
                    confidence: rng.gen_range(0.8..0.99),
                    bbox: Some([
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..100.0),
                    ]),
                    metadata: HashMap::new(),
                });
            }
        }

        let sensors: HashMap<String, f64> = self
            .sensor_ranges
            .iter()
            .map(|(name, (lo, hi))| (name.to_string(), rng.gen_range(*lo..*hi)))
            .collect();

        let obstacle_visible = entities.iter().any(|e| e.label == "obstacle");
        let anomaly = sensors.get("vibration").copied().unwrap_or(0.0) > 0.9 || obstacle_visible;

        Ok(PerceptionSnapshot {
            timestamp: Utc::now(),
            entities,
            sensors,
            anomaly,
        })
    }
}
