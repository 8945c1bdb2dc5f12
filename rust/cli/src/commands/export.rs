//! `export`: flatten a JSONL trial log.
//!
//! Every stage snapshot becomes one row. CSV output has a fixed header;
//! JSON output is an array of row objects with the same keys.

use crate::error::CliError;
use crate::io_utils::{read_text_auto, write_text};
use crate::ui;
use serde::Serialize;
use stagedice_engine::logger::{TrialOutcome, TrialRecord};
use stagedice_engine::rules::BetAction;
use std::io::Write;

/// CSV header, in column order.
pub const EXPORT_COLUMNS: [&str; 24] = [
    "participant_number",
    "trial_id",
    "stage",
    "outcome",
    "wealth_start",
    "wealth_end",
    "p_roll",
    "h_roll",
    "p_sum",
    "h_sum",
    "wealth_available",
    "current_bet",
    "remaining_stages",
    "win_prob",
    "loss_prob",
    "entropy",
    "action_taken",
    "belief_reported",
    "bet_after_action",
    "brier_score",
    "accuracy_score",
    "mean_accuracy",
    "performance_reward",
    "total_payment",
];

#[derive(Debug, Serialize)]
struct ExportRow {
    participant_number: usize,
    trial_id: u32,
    stage: u32,
    outcome: TrialOutcome,
    wealth_start: i64,
    wealth_end: i64,
    p_roll: Option<u32>,
    h_roll: Option<u32>,
    p_sum: i64,
    h_sum: i64,
    wealth_available: i64,
    current_bet: u32,
    remaining_stages: u32,
    win_prob: f64,
    loss_prob: f64,
    entropy: f64,
    action_taken: BetAction,
    belief_reported: Option<f64>,
    bet_after_action: u32,
    brier_score: Option<f64>,
    accuracy_score: Option<f64>,
    mean_accuracy: Option<f64>,
    performance_reward: Option<f64>,
    total_payment: Option<f64>,
}

pub fn handle_export_command(
    input: String,
    output: String,
    format: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(&input).map_err(|e| {
        let _ = ui::write_error(err, &format!("Failed to read {}: {}", input, e));
        CliError::InvalidInput(format!("Failed to read {}: {}", input, e))
    })?;

    let rows = match format.as_str() {
        f if f.eq_ignore_ascii_case("csv") || f.eq_ignore_ascii_case("json") => {
            flatten(&content, err)?
        }
        _ => {
            ui::write_error(err, &format!("Unsupported format: {}", format))?;
            return Err(CliError::InvalidInput(format!(
                "Unsupported format: {}",
                format
            )));
        }
    };

    let values = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(std::io::Error::other)?;
    let text = if format.eq_ignore_ascii_case("csv") {
        to_csv(&values)
    } else {
        let json = serde_json::to_string_pretty(&values).map_err(std::io::Error::other)?;
        format!("{}\n", json)
    };

    write_text(&output, &text).map_err(|e| {
        let _ = ui::write_error(err, &e);
        CliError::Io(std::io::Error::other(e))
    })?;
    writeln!(out, "Exported {} row(s) to {}", rows.len(), output)?;
    Ok(())
}

fn flatten(content: &str, err: &mut dyn Write) -> Result<Vec<ExportRow>, CliError> {
    let mut participants: Vec<String> = Vec::new();
    let mut rows = Vec::new();
    for (idx, line) in content.lines().filter(|l| !l.trim().is_empty()).enumerate() {
        let rec: TrialRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                ui::write_error(err, &format!("Invalid record at line {}: {}", idx + 1, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Invalid record at line {}: {}",
                    idx + 1,
                    e
                )));
            }
        };
        let participant_number = match participants.iter().position(|p| *p == rec.participant) {
            Some(i) => i + 1,
            None => {
                participants.push(rec.participant.clone());
                participants.len()
            }
        };
        for snap in &rec.history {
            rows.push(ExportRow {
                participant_number,
                trial_id: rec.trial_id,
                stage: snap.stage,
                outcome: rec.outcome,
                wealth_start: rec.wealth_start,
                wealth_end: rec.wealth_end,
                p_roll: snap.p_roll,
                h_roll: snap.h_roll,
                p_sum: snap.p_sum,
                h_sum: snap.h_sum,
                wealth_available: snap.wealth_available,
                current_bet: snap.current_bet,
                remaining_stages: snap.remaining_stages,
                win_prob: snap.ground_truth_probs.win,
                loss_prob: snap.ground_truth_probs.loss,
                entropy: snap.entropy,
                action_taken: snap.action_taken,
                belief_reported: snap.belief_reported,
                bet_after_action: snap.bet_after_action,
                brier_score: snap.brier_score,
                accuracy_score: snap.accuracy_score,
                mean_accuracy: rec.mean_accuracy,
                performance_reward: rec.performance_reward,
                total_payment: rec.total_payment,
            });
        }
    }
    Ok(rows)
}

fn to_csv(rows: &[serde_json::Value]) -> String {
    let mut text = EXPORT_COLUMNS.join(",");
    text.push('\n');
    for row in rows {
        let cells: Vec<String> = EXPORT_COLUMNS
            .iter()
            .map(|col| match &row[*col] {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s.clone(),
                v => v.to_string(),
            })
            .collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}
