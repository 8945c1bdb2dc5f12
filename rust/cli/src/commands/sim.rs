//! `sim`: run a seeded session with the calibrated policy.
//!
//! Session parameters come from the resolved configuration; `--trials` and
//! `--seed` override it. With `--output`, each trial is written as one
//! JSONL record. The same seed always reproduces the same session.

use super::load_config;
use crate::error::CliError;
use crate::ui;
use stagedice_engine::logger::TrialLogger;
use stagedice_engine::session::{CalibratedPolicy, Session};
use std::io::Write;
use tracing::info;

pub fn handle_sim_command(
    trials: Option<u32>,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if trials == Some(0) {
        ui::write_error(err, "trials must be >= 1")?;
        return Err(CliError::InvalidInput("trials must be >= 1".to_string()));
    }
    let cfg = load_config(err)?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut session_cfg = cfg.session(base_seed);
    if let Some(n) = trials {
        session_cfg.trials = n;
    }

    info!(
        seed = base_seed,
        trials = session_cfg.trials,
        "starting simulated session"
    );
    let mut session = Session::new(session_cfg, CalibratedPolicy)?;
    let mut logger = match output.as_deref() {
        Some(path) => Some(TrialLogger::create(path).map_err(|e| {
            let _ = ui::write_error(err, &format!("Failed to open output file: {}", e));
            CliError::Io(e)
        })?),
        None => None,
    };

    let mut records = Vec::new();
    while !session.is_complete() {
        match session.play_trial() {
            Ok(r) => records.push(r),
            Err(stagedice_engine::EngineError::SessionComplete { .. }) => break,
            Err(e) => return Err(e.into()),
        }
    }

    // final figures are only known once the last trial resolves
    let summary = session.summary();
    if let Some(l) = logger.as_mut() {
        for record in &mut records {
            summary.stamp(record);
            l.write(record)?;
        }
    }
    writeln!(out, "Participant: {}", session.participant())?;
    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(out, "Simulated: {} trials", summary.trials_played)?;
    writeln!(out, "Wins: {}", summary.wins)?;
    writeln!(out, "Final wealth: {}", summary.final_wealth)?;
    writeln!(out, "Mean accuracy: {:.4}", summary.mean_accuracy)?;
    writeln!(out, "Total payment: {:.2}", summary.total_payment)?;
    if summary.bankrupt {
        ui::display_warning(err, "participant went bankrupt before the last trial")?;
    }
    if let (Some(path), Some(l)) = (output.as_deref(), logger.as_ref()) {
        writeln!(out, "Wrote {} record(s) to {}", l.written(), path)?;
    }
    Ok(())
}
