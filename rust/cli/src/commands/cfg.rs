//! `cfg`: show the resolved configuration.
//!
//! Every key is printed with its value and where the value came from
//! (`default`, `file` or `env`).
//!
//! ```json
//! {
//!   "sides": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "sides": { "value": config.sides, "source": sources.sides },
        "stages": { "value": config.stages, "source": sources.stages },
        "seed": { "value": config.seed, "source": sources.seed },
        "tie_rule": { "value": config.tie_rule, "source": sources.tie_rule },
        "log_level": { "value": config.log_level, "source": sources.log_level },
        "start_wealth": { "value": config.start_wealth, "source": sources.start_wealth },
        "ante": { "value": config.ante, "source": sources.ante },
        "bet_step": { "value": config.bet_step, "source": sources.bet_step },
        "trials": { "value": config.trials, "source": sources.trials },
        "starting_bias": { "value": config.starting_bias, "source": sources.starting_bias },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
