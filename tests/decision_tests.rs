use chrono::Utc;
use std::collections::HashMap;

use rova::nav::{ActionId, DecisionAgent};
use rova::perception::{Entity, PerceptionSnapshot};
use rova::reasoning::ReasoningEngine;

fn snapshot(labels: &[&str], proximity: f64, vibration: f64) -> PerceptionSnapshot {
    let mut sensors = HashMap::new();
    sensors.insert("proximity".to_string(), proximity);
    sensors.insert("vibration".to_string(), vibration);
    PerceptionSnapshot {
        timestamp: Utc::now(),
        entities: labels
            .iter()
            .map(|l| Entity {
                id: format!("{l}_0"),
                label: l.to_string(),
                confidence: 0.9,
                bbox: None,
                metadata: HashMap::new(),
            })
            .collect(),
        sensors,
        anomaly: false,
    }
}

fn speed(rec: &rova::nav::ActionRecommendation) -> f64 {
    (rec.vx() * rec.vx() + rec.vy() * rec.vy()).sqrt()
}

#[test]
fn test_critical_overrides_with_zero_velocity_stop() {
    let engine = ReasoningEngine::new();
    let mut agent = DecisionAgent::new();
    let report = engine.reason(&snapshot(&["person"], 3.0, 0.1));

    let rec = agent.decide(&report, [0.0, 0.0], [10.0, 10.0]);

    assert_eq!(rec.action, ActionId::StopEmergency);
    assert_eq!(rec.confidence, 1.0);
    assert_eq!(rec.vx(), 0.0);
    assert_eq!(rec.vy(), 0.0);
}

#[test]
fn test_nominal_navigation_at_half_speed() {
    let engine = ReasoningEngine::new();
    let mut agent = DecisionAgent::new();
    let report = engine.reason(&snapshot(&[], 30.0, 0.1));

    let rec = agent.decide(&report, [0.0, 0.0], [10.0, 10.0]);

    assert_eq!(rec.action, ActionId::AStarNavigation);
    assert!((rec.confidence - 0.98).abs() < 1e-9);
    assert!((speed(&rec) - 0.5).abs() < 1e-6, "unit steering scaled by 0.5");
    assert!(!agent.current_path().is_empty());
}

#[test]
fn test_caution_halves_the_speed() {
    let engine = ReasoningEngine::new();
    let mut agent = DecisionAgent::new();
    let report = engine.reason(&snapshot(&["backpack"], 30.0, 0.1));

    let rec = agent.decide(&report, [-10.0, -10.0], [10.0, 10.0]);

    assert_eq!(rec.action, ActionId::AStarNavigation);
    assert!((speed(&rec) - 0.25).abs() < 1e-6);
}

#[test]
fn test_caution_injects_demonstrative_obstacle_zones() {
    let engine = ReasoningEngine::new();
    let mut agent = DecisionAgent::new();
    let report = engine.reason(&snapshot(&["backpack"], 30.0, 0.1));

    agent.decide(&report, [0.0, 0.0], [10.0, 10.0]);

    // The planned route must skirt the zone at (5, 5).
    for wp in agent.current_path() {
        let dx = wp[0] - 5.0;
        let dy = wp[1] - 5.0;
        assert!((dx * dx + dy * dy).sqrt() > 2.0, "waypoint {wp:?} inside obstacle zone");
    }
}

#[test]
fn test_already_at_goal_yields_zero_vector() {
    let engine = ReasoningEngine::new();
    let mut agent = DecisionAgent::new();
    let report = engine.reason(&snapshot(&[], 30.0, 0.1));

    let rec = agent.decide(&report, [4.0, 4.0], [4.0, 4.0]);

    // Degenerate geometry: no division by zero, just a zero command.
    assert_eq!(rec.action, ActionId::AStarNavigation);
    assert_eq!(rec.vx(), 0.0);
    assert_eq!(rec.vy(), 0.0);
}

#[test]
fn test_history_accumulates_every_decision() {
    let engine = ReasoningEngine::new();
    let mut agent = DecisionAgent::new();

    let nominal = engine.reason(&snapshot(&[], 30.0, 0.1));
    let critical = engine.reason(&snapshot(&["person"], 3.0, 0.1));

    agent.decide(&nominal, [0.0, 0.0], [10.0, 10.0]);
    agent.decide(&critical, [0.0, 0.0], [10.0, 10.0]);

    assert_eq!(agent.history().len(), 2);
    assert_eq!(agent.history()[1].action, ActionId::StopEmergency);
}
