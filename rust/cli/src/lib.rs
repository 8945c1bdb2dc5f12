//! # Stagedice CLI Library
//!
//! Command-line harness around the `stagedice-engine` core. It computes
//! outcome probabilities and entropy for single game states, writes and
//! verifies ground-truth vectors, and runs seeded betting sessions.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```
//! let args = vec!["stagedice", "probs", "--player", "0", "--house", "0", "--stages", "1", "--sides", "2"];
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = stagedice_cli::run(args, &mut out, &mut err);
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `probs`: Outcome probabilities and entropy for one state
//! - `entropy`: Entropy of an arbitrary win/loss/push split
//! - `truth`: Generate ground-truth vectors (pretty JSON)
//! - `verify`: Recompute a ground-truth file and report mismatches
//! - `sim`: Seeded betting session, JSONL trial log
//! - `export`: Trial log to CSV or JSON array
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
#[macro_use]
mod macros;
pub mod cli;
mod commands;
mod config;
mod error;
mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, StagediceCli};
use commands::{
    handle_cfg_command, handle_entropy_command, handle_export_command, handle_probs_command,
    handle_sim_command, handle_truth_command, handle_verify_command,
};

pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["probs", "entropy", "truth", "verify", "sim", "export", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses `args` and dispatches to the matching subcommand handler, writing
/// normal output to `out` and diagnostics to `err`.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match StagediceCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Stagedice CLI");
            write_or_exit!(err, "Usage: stagedice <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: stagedice --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Probs {
            player,
            house,
            stages,
            sides,
            ties,
        } => handle_probs_command(player, house, stages, sides, ties, out, err),
        Commands::Entropy { win, loss, push } => handle_entropy_command(win, loss, push, out, err),
        Commands::Truth { output, cases } => handle_truth_command(cases, output, out, err),
        Commands::Verify { input } => {
            let Some(path) = input else {
                let _ = ui::write_error(err, "input required");
                return exit_code::ERROR;
            };
            handle_verify_command(path, out, err)
        }
        Commands::Sim {
            trials,
            seed,
            output,
        } => handle_sim_command(trials, seed, output, out, err),
        Commands::Export {
            input,
            output,
            format,
        } => handle_export_command(input, output, format, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
