use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// One row of the persistent mission history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionRecord {
    pub timestamp: DateTime<Utc>,
    pub safety_score: f64,
    /// Running prediction error of the safety model at log time.
    pub mae: f64,
    pub alerts: Vec<String>,
    pub scene_description: String,
    pub snapshot_path: Option<String>,
}

/// Per-tick mission logging. Called once per running tick; a failing
/// implementation must not abort the tick (the control loop logs and
/// carries on).
pub trait MissionLog: Send {
    fn log_tick(&mut self, record: &MissionRecord) -> anyhow::Result<()>;
}

/// Append-only JSON-lines file, one record per running tick.
pub struct JsonlMissionLog {
    path: PathBuf,
}

impl JsonlMissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads back the most recent `limit` records, oldest first. Rows that
    /// fail to parse (e.g. from an older schema) are skipped.
    pub fn recent(&self, limit: usize) -> anyhow::Result<Vec<MissionRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("open mission log {}", self.path.display()))?;
        let mut records: Vec<MissionRecord> = BufReader::new(file)
            .lines()
            .filter_map(|line| line.ok())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect();
        if records.len() > limit {
            records.drain(..records.len() - limit);
        }
        Ok(records)
    }
}

impl MissionLog for JsonlMissionLog {
    fn log_tick(&mut self, record: &MissionRecord) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open mission log {}", self.path.display()))?;
        let line = serde_json::to_string(record).context("serialize mission record")?;
        writeln!(file, "{line}").context("append mission record")?;
        Ok(())
    }
}

/// Discards everything; for tests and headless runs.
pub struct NullMissionLog;

impl MissionLog for NullMissionLog {
    fn log_tick(&mut self, _record: &MissionRecord) -> anyhow::Result<()> {
        Ok(())
    }
}
