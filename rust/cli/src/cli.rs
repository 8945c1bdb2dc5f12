//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use stagedice_engine::outcome::TieRule;

use crate::validation::{parse_case, parse_tie_rule};

#[derive(Parser, Debug)]
#[command(
    name = "stagedice",
    version,
    about = "Exact outcome probabilities for staged dice contests"
)]
pub struct StagediceCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Win/loss/push probabilities and entropy for one game state
    Probs {
        #[arg(long, allow_hyphen_values = true)]
        player: i64,
        #[arg(long, allow_hyphen_values = true)]
        house: i64,
        /// Remaining stages (defaults to the configured stage count)
        #[arg(long, allow_hyphen_values = true)]
        stages: Option<i64>,
        #[arg(long, allow_hyphen_values = true)]
        sides: Option<i64>,
        /// How exact ties are scored: loss (default) or push
        #[arg(long, value_parser = parse_tie_rule)]
        ties: Option<TieRule>,
    },
    /// Shannon entropy (bits) of a win/loss/push distribution
    Entropy {
        #[arg(long)]
        win: f64,
        #[arg(long)]
        loss: f64,
        #[arg(long, default_value_t = 0.0)]
        push: f64,
    },
    /// Write ground-truth vectors for cross-implementation checks
    Truth {
        #[arg(long)]
        output: Option<String>,
        /// PLAYER,HOUSE,STAGES,SIDES; repeatable
        #[arg(long = "case", value_parser = parse_case, allow_hyphen_values = true)]
        cases: Vec<[i64; 4]>,
    },
    /// Recompute a ground-truth file and report mismatches
    Verify {
        #[arg(long)]
        input: Option<String>,
    },
    /// Run a seeded betting session with the calibrated policy
    Sim {
        #[arg(long)]
        trials: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Convert a JSONL trial log to CSV or a JSON array
    Export {
        #[arg(long)]
        input: String,
        #[arg(long)]
        output: String,
        #[arg(long, default_value = "csv")]
        format: String,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}
