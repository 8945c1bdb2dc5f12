//! `verify`: recompute a ground-truth file and compare.
//!
//! Win and entropy are compared directly. Loss is compared against
//! `loss + push` from the file, so vectors written by implementations that
//! fold pushes into losses still verify. Every mismatch is collected with
//! its 1-based case index before the command fails.

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text_auto;
use crate::ui;
use stagedice_engine::logger::GroundTruthCase;
use stagedice_engine::outcome::compute_outcome_probabilities;
use std::io::Write;

/// Absolute tolerance for every compared value.
pub const VERIFY_TOLERANCE: f64 = 1e-9;

type VerifyError = BatchValidationError<usize>;

pub fn handle_verify_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(&input).map_err(|e| {
        let _ = ui::write_error(err, &format!("Failed to read {}: {}", input, e));
        CliError::InvalidInput(format!("Failed to read {}: {}", input, e))
    })?;
    let cases: Vec<GroundTruthCase> = serde_json::from_str(&content).map_err(|e| {
        let _ = ui::write_error(err, &format!("Invalid ground-truth file: {}", e));
        CliError::InvalidInput(format!("Invalid ground-truth file: {}", e))
    })?;

    let mut errors: Vec<VerifyError> = Vec::new();
    for (idx, case) in cases.iter().enumerate() {
        errors.extend(check_case(idx + 1, case));
    }

    writeln!(
        out,
        "Verified: {} case(s), {} mismatch(es)",
        cases.len(),
        errors.len()
    )?;
    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        ui::write_error(err, &format!("Case {}", e))?;
    }
    Err(CliError::InvalidInput(format!(
        "{} ground-truth mismatch(es) in {}",
        errors.len(),
        input
    )))
}

fn check_case(index: usize, case: &GroundTruthCase) -> Vec<VerifyError> {
    let [player, house, stages, sides] = case.input;
    let probs = match compute_outcome_probabilities(player, house, stages, sides) {
        Ok(p) => p,
        Err(e) => {
            return vec![VerifyError {
                item_context: index,
                message: e.to_string(),
            }];
        }
    };

    let expected = &case.expected_probs;
    let checks = [
        ("win", probs.win, expected.win),
        ("loss", probs.loss, expected.loss + expected.push),
        ("entropy", probs.entropy(), case.expected_entropy),
    ];
    checks
        .iter()
        .filter(|(_, got, want)| (got - want).abs() >= VERIFY_TOLERANCE)
        .map(|(name, got, want)| VerifyError {
            item_context: index,
            message: format!("{} mismatch: computed {}, expected {}", name, got, want),
        })
        .collect()
}
