use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::outcome::{compute_outcome_probabilities, OutcomeProbabilities};
use crate::rules::BetAction;

/// Final result of a trial; ties count as losses.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrialOutcome {
    Win,
    Loss,
}

/// State of one stage at decision time, completed with the rolls that
/// followed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub trial_id: u32,
    /// Stage number, starting at 1
    pub stage: u32,
    pub p_roll: Option<u32>,
    pub h_roll: Option<u32>,
    /// Player total before this stage's roll
    pub p_sum: i64,
    /// House total before this stage's roll
    pub h_sum: i64,
    #[serde(default)]
    pub p_sum_after_roll: Option<i64>,
    #[serde(default)]
    pub h_sum_after_roll: Option<i64>,
    /// Wealth left after the action was applied
    pub wealth_available: i64,
    /// Stake before the action
    pub current_bet: u32,
    /// Stages still to roll, this one included
    pub remaining_stages: u32,
    pub ground_truth_probs: OutcomeProbabilities,
    pub entropy: f64,
    pub action_taken: BetAction,
    pub belief_reported: Option<f64>,
    pub bet_after_action: u32,
    #[serde(default)]
    pub brier_score: Option<f64>,
    #[serde(default)]
    pub accuracy_score: Option<f64>,
}

/// Complete record of one trial. Serialized one per line (JSONL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub participant: String,
    pub trial_id: u32,
    pub outcome: TrialOutcome,
    /// Wealth before the ante was taken
    pub wealth_start: i64,
    pub wealth_end: i64,
    pub history: Vec<StageSnapshot>,
    /// Session-wide figures, stamped on every trial once the session ends.
    #[serde(default)]
    pub mean_accuracy: Option<f64>,
    #[serde(default)]
    pub performance_reward: Option<f64>,
    #[serde(default)]
    pub total_payment: Option<f64>,
    /// Timestamp when the trial was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

/// Exact reference values for one input tuple, used to cross-check other
/// implementations of the outcome calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthCase {
    /// `[player_current, house_current, remaining_stages, sides]`
    pub input: [i64; 4],
    pub expected_probs: OutcomeProbabilities,
    pub expected_entropy: f64,
}

/// Inputs written when no explicit case list is given.
pub const DEFAULT_TRUTH_INPUTS: [[i64; 4]; 4] =
    [[0, 0, 3, 6], [10, 5, 1, 6], [5, 10, 1, 6], [7, 7, 2, 6]];

impl GroundTruthCase {
    pub fn compute(input: [i64; 4]) -> Result<Self, EngineError> {
        let [player, house, stages, sides] = input;
        let probs = compute_outcome_probabilities(player, house, stages, sides)?;
        Ok(Self {
            input,
            expected_entropy: probs.entropy(),
            expected_probs: probs,
        })
    }
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`TrialRecord`]s to a JSONL file, LF line endings only.
pub struct TrialLogger {
    writer: BufWriter<File>,
    written: u32,
}

impl TrialLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
            written: 0,
        })
    }

    pub fn written(&self) -> u32 {
        self.written
    }

    pub fn write(&mut self, record: &TrialRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}
