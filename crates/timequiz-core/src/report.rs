//! Session report types with JSON persistence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::QuizConfig;
use crate::model::{SessionOutcome, SessionResult, TerminalState};

/// A record of one finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the session finished.
    pub created_at: DateTime<Utc>,
    /// The question bank the session was drawn from.
    pub source: String,
    /// Time limit in seconds.
    pub limit_secs: u64,
    /// Whether the questions were shuffled.
    pub shuffled: bool,
    /// Shuffle seed, if one was fixed.
    #[serde(default)]
    pub seed: Option<u64>,
    /// How the session ended.
    pub state: TerminalState,
    /// Final score.
    pub result: SessionResult,
    /// Wall-clock session duration in milliseconds.
    pub duration_ms: u64,
}

impl SessionReport {
    pub fn new(config: &QuizConfig, outcome: &SessionOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: config.problems.display().to_string(),
            limit_secs: config.limit_secs,
            shuffled: config.shuffle,
            seed: config.seed,
            state: outcome.state,
            result: outcome.result,
            duration_ms: outcome.elapsed.as_millis() as u64,
        }
    }

    /// Share of all questions answered correctly, in `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        if self.result.total_count() == 0 {
            return 0.0;
        }
        self.result.correct_count() as f64 / self.result.total_count() as f64
    }

    /// File name for this report inside a report directory.
    pub fn file_name(&self) -> String {
        format!(
            "session-{}.json",
            self.created_at.format("%Y-%m-%dT%H%M%S")
        )
    }

    /// Save into `dir` under [`file_name`](Self::file_name), returning the path.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        self.save_json(&path)?;
        Ok(path)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
