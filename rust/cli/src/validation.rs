//! Parsing and validation of command-line values.

use stagedice_engine::outcome::TieRule;

/// Parse a `PLAYER,HOUSE,STAGES,SIDES` tuple.
///
/// Only the shape is checked here; value ranges are the engine's concern.
///
/// # Example
///
/// ```rust
/// # use stagedice_cli::validation::parse_case;
/// assert_eq!(parse_case("7, 7, 2, 6"), Ok([7, 7, 2, 6]));
/// assert!(parse_case("7,7,2").is_err());
/// ```
pub fn parse_case(input: &str) -> Result<[i64; 4], String> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!(
            "expected PLAYER,HOUSE,STAGES,SIDES, got {} value(s)",
            parts.len()
        ));
    }
    let mut values = [0i64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("'{}' is not an integer", part))?;
    }
    Ok(values)
}

/// Parse a tie rule name (`loss` or `push`, case-insensitive).
pub fn parse_tie_rule(input: &str) -> Result<TieRule, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "loss" | "house" => Ok(TieRule::Loss),
        "push" => Ok(TieRule::Push),
        other => Err(format!(
            "unknown tie rule '{}' (expected loss or push)",
            other
        )),
    }
}

/// Returns a warning when `probs` cannot describe a distribution.
pub fn check_distribution(win: f64, loss: f64, push: f64) -> Option<String> {
    let values = [("win", win), ("loss", loss), ("push", push)];
    if let Some((name, v)) = values.iter().find(|(_, v)| !(0.0..=1.0).contains(v)) {
        return Some(format!("{} = {} is outside [0, 1] and was clamped", name, v));
    }
    let total = win + loss + push;
    if (total - 1.0).abs() > 1e-9 {
        return Some(format!("probabilities sum to {}, not 1", total));
    }
    None
}
