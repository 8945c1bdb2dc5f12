//! Command handler modules for the Stagedice CLI.
//!
//! Each subcommand lives in its own module and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, taking output
//! streams (`&mut dyn Write`) as parameters so tests can capture them.

mod cfg;
mod entropy;
mod export;
mod probs;
mod sim;
mod truth;
mod verify;

pub use cfg::handle_cfg_command;
pub use entropy::handle_entropy_command;
pub use export::handle_export_command;
pub use probs::handle_probs_command;
pub use sim::handle_sim_command;
pub use truth::handle_truth_command;
pub use verify::handle_verify_command;

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Load configuration, reporting failures on `err`.
fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    config::load().map_err(|e| {
        let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
        CliError::from(e)
    })
}
