use crate::error::CliError;
use crate::ui;
use crate::validation::check_distribution;
use stagedice_engine::entropy::compute_entropy;
use std::io::Write;

/// Print the entropy (bits) of a win/loss/push split.
///
/// Inputs that do not form a distribution still produce a value, with a
/// warning on `err`.
pub fn handle_entropy_command(
    win: f64,
    loss: f64,
    push: f64,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if let Some(warning) = check_distribution(win, loss, push) {
        ui::display_warning(err, &warning)?;
    }
    writeln!(out, "{}", compute_entropy(win, loss, push))?;
    Ok(())
}
