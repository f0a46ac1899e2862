use chrono::Utc;
use std::collections::HashMap;

use rova::telemetry::mission::{JsonlMissionLog, MissionLog, MissionRecord};
use rova::telemetry::SafetyModel;

fn features(proximity: f64, vibration: f64) -> HashMap<String, f64> {
    let mut f = HashMap::new();
    f.insert("proximity".to_string(), proximity);
    f.insert("vibration".to_string(), vibration);
    f.insert("temperature".to_string(), 25.0);
    f
}

#[test]
fn test_safety_model_converges_on_constant_target() {
    let mut model = SafetyModel::new();
    for _ in 0..500 {
        model.learn(&features(30.0, 0.2), 0.99);
    }

    let prediction = model.predict(&features(30.0, 0.2));
    assert!((prediction - 0.99).abs() < 0.05, "prediction {prediction} far from target");
    assert_eq!(model.steps(), 500);
    assert!(model.mae().is_finite());
}

#[test]
fn test_safety_model_status_format() {
    let mut model = SafetyModel::new();
    assert_eq!(model.status(), "Learning: MAE=0.0000 | Steps=0");

    model.learn(&features(30.0, 0.2), 0.99);
    assert!(model.status().starts_with("Learning: MAE="));
    assert!(model.status().ends_with("Steps=1"));
}

fn record(scene: &str) -> MissionRecord {
    MissionRecord {
        timestamp: Utc::now(),
        safety_score: 0.99,
        mae: 0.01,
        alerts: vec!["GRACE PERIOD: test".to_string()],
        scene_description: scene.to_string(),
        snapshot_path: None,
    }
}

#[test]
fn test_jsonl_mission_log_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mission.jsonl");
    let mut log = JsonlMissionLog::new(&path);

    log.log_tick(&record("2 vehicle in view")).unwrap();
    log.log_tick(&record("no entities in view")).unwrap();
    log.log_tick(&record("1 person in view")).unwrap();

    let recent = log.recent(2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].scene_description, "no entities in view");
    assert_eq!(recent[1].scene_description, "1 person in view");
}

#[test]
fn test_jsonl_mission_log_skips_corrupt_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mission.jsonl");
    let mut log = JsonlMissionLog::new(&path);

    log.log_tick(&record("a")).unwrap();
    std::fs::write(&path, "not json at all\n").unwrap();
    log.log_tick(&record("b")).unwrap();

    let recent = log.recent(10).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].scene_description, "b");
}
