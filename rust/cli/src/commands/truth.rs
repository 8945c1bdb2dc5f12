//! `truth`: generate ground-truth vectors.
//!
//! Each case pairs an input tuple with the exact outcome probabilities and
//! entropy. The file is a pretty-printed JSON array so other
//! implementations can be checked against it with `verify` or their own
//! tooling.

use crate::error::CliError;
use crate::io_utils::write_text;
use crate::ui;
use stagedice_engine::logger::{DEFAULT_TRUTH_INPUTS, GroundTruthCase};
use std::io::Write;

pub fn handle_truth_command(
    cases: Vec<[i64; 4]>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let inputs = if cases.is_empty() {
        DEFAULT_TRUTH_INPUTS.to_vec()
    } else {
        cases
    };

    let mut records = Vec::with_capacity(inputs.len());
    for input in inputs {
        let case = GroundTruthCase::compute(input).map_err(|e| {
            let _ = ui::write_error(err, &format!("case {:?}: {}", input, e));
            CliError::InvalidInput(format!("case {:?}: {}", input, e))
        })?;
        records.push(case);
    }

    let json = serde_json::to_string_pretty(&records).map_err(std::io::Error::other)?;
    match output {
        Some(path) => {
            write_text(&path, &format!("{}\n", json)).map_err(|e| {
                let _ = ui::write_error(err, &e);
                CliError::Io(std::io::Error::other(e))
            })?;
            writeln!(out, "Wrote {} case(s) to {}", records.len(), path)?;
        }
        None => writeln!(out, "{}", json)?,
    }
    Ok(())
}
