//! `probs`: exact outcome probabilities for one game state.
//!
//! Stage count, side count and tie rule fall back to the resolved
//! configuration when not given on the command line.

use super::load_config;
use crate::error::CliError;
use crate::ui;
use stagedice_engine::outcome::{GameState, TieRule, compute_outcome_probabilities_with};
use std::io::Write;

pub fn handle_probs_command(
    player: i64,
    house: i64,
    stages: Option<i64>,
    sides: Option<i64>,
    ties: Option<TieRule>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let stages = stages.unwrap_or(i64::from(cfg.stages));
    let sides = sides.unwrap_or(i64::from(cfg.sides));
    let rule = ties.unwrap_or(cfg.tie_rule);

    let state = GameState::new(player, house, stages, sides).map_err(|e| {
        let _ = ui::write_error(err, &e.to_string());
        CliError::InvalidInput(e.to_string())
    })?;
    let probs = compute_outcome_probabilities_with(&state, rule)?;

    let display = serde_json::json!({
        "input": [player, house, stages, sides],
        "tie_rule": rule,
        "win": probs.win,
        "loss": probs.loss,
        "push": probs.push,
        "entropy": probs.entropy(),
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
