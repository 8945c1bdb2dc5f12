//! Information and scoring measures over outcome distributions.

use crate::errors::EngineError;

/// Shannon entropy, in bits, of a three-way outcome distribution.
///
/// Inputs are clamped into `[0, 1]` (NaN counts as 0) and any value that
/// ends up `<= 0` contributes nothing, so `log2(0)` is never evaluated.
///
/// # Examples
///
/// ```
/// use stagedice_engine::entropy::compute_entropy;
///
/// assert_eq!(compute_entropy(1.0, 0.0, 0.0), 0.0);
/// assert_eq!(compute_entropy(0.5, 0.5, 0.0), 1.0);
/// ```
pub fn compute_entropy(p_win: f64, p_loss: f64, p_push: f64) -> f64 {
    let mut entropy = 0.0;
    for p in [p_win, p_loss, p_push] {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// Squared error between a reported win belief and the realised outcome.
///
/// # Errors
///
/// Returns [`EngineError::InvalidBelief`] when `belief` is outside `[0, 1]`.
pub fn brier_score(belief: f64, won: bool) -> Result<f64, EngineError> {
    if !(0.0..=1.0).contains(&belief) {
        return Err(EngineError::InvalidBelief { belief });
    }
    let outcome = if won { 1.0 } else { 0.0 };
    Ok((belief - outcome).powi(2))
}
