use chrono::Utc;
use std::collections::HashMap;

use rova::perception::{Entity, PerceptionSnapshot};
use rova::reasoning::ReasoningEngine;

fn entity(label: &str) -> Entity {
    Entity {
        id: format!("{label}_0"),
        label: label.to_string(),
        confidence: 0.9,
        bbox: None,
        metadata: HashMap::new(),
    }
}

fn snapshot(labels: &[&str], proximity: f64, vibration: f64, anomaly: bool) -> PerceptionSnapshot {
    let mut sensors = HashMap::new();
    sensors.insert("proximity".to_string(), proximity);
    sensors.insert("vibration".to_string(), vibration);
    sensors.insert("temperature".to_string(), 25.0);
    PerceptionSnapshot {
        timestamp: Utc::now(),
        entities: labels.iter().map(|l| entity(l)).collect(),
        sensors,
        anomaly,
    }
}

#[test]
fn test_nominal_operations_single_status_line() {
    let engine = ReasoningEngine::new();
    let report = engine.reason(&snapshot(&[], 20.0, 0.1, false));

    assert_eq!(report.conclusions, vec!["STATUS: Nominal operations".to_string()]);
    assert_eq!(report.suggested_actions, vec!["CONTINUE".to_string()]);
    assert!((report.safety_score - 0.99).abs() < 1e-9);
}

#[test]
fn test_close_proximity_is_critical() {
    let engine = ReasoningEngine::new();
    let report = engine.reason(&snapshot(&[], 3.0, 0.1, false));

    assert!(report.has_critical());
    // No critical entities in view, only the proximity trigger.
    assert!(report.conclusions[0].contains("0 high-risk"));
}

#[test]
fn test_person_at_close_range_scenario() {
    // Concrete scenario: proximity=3.0, one "person", vibration=0.1.
    let engine = ReasoningEngine::new();
    let report = engine.reason(&snapshot(&["person"], 3.0, 0.1, false));

    assert!(report
        .conclusions
        .iter()
        .any(|c| c == "CRITICAL: Emergency Stop - 1 high-risk entities detected"));
    assert!(report
        .conclusions
        .iter()
        .any(|c| c == "OBSERVATION: 1 obstacle(s) in vision"));
    assert_eq!(report.suggested_actions.len(), report.conclusions.len());
    assert_eq!(report.suggested_actions[0], "STOP");
}

#[test]
fn test_caution_entities_without_proximity_trigger() {
    let engine = ReasoningEngine::new();
    let report = engine.reason(&snapshot(&["backpack", "scissors"], 30.0, 0.1, false));

    assert!(report.has_caution());
    assert!(!report.has_critical());
    assert!(report.conclusions[0].contains("2 objects detected"));
}

#[test]
fn test_vibration_alert_fires_alongside_critical() {
    let engine = ReasoningEngine::new();
    let report = engine.reason(&snapshot(&["person"], 3.0, 0.9, false));

    assert!(report.has_critical());
    assert!(report.has_alert());
    assert!(report
        .conclusions
        .iter()
        .any(|c| c.contains("High vibration")));
}

#[test]
fn test_anomaly_drops_safety_score() {
    let engine = ReasoningEngine::new();
    let report = engine.reason(&snapshot(&[], 20.0, 0.1, true));

    assert!((report.safety_score - 0.4).abs() < 1e-9);
    assert!((report.world_model["safety_prob"] - 0.4).abs() < 1e-9);
    assert!((report.world_model["efficiency_prob"] - 0.85).abs() < 1e-9);
}

#[test]
fn test_unknown_labels_stay_nominal() {
    let engine = ReasoningEngine::new();
    let report = engine.reason(&snapshot(&["vehicle", "chair"], 20.0, 0.1, false));

    assert_eq!(report.conclusions, vec!["STATUS: Nominal operations".to_string()]);
}

#[test]
fn test_rule_table_exposed_for_introspection() {
    let engine = ReasoningEngine::new();
    assert_eq!(engine.rules().len(), 3);
}
