//! Joint win/loss/push probabilities for a player and a house that each
//! add `remaining_stages` fair dice to their current totals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{uniform_die, MIN_SIDES};
use crate::entropy::compute_entropy;
use crate::errors::EngineError;
use crate::pmf::{compound, PMF_TOLERANCE};

/// How an exact tie between final totals is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieRule {
    /// The house takes ties; `push` is always zero.
    #[default]
    Loss,
    /// Ties are pushes.
    Push,
}

/// Validated snapshot of a contest before the remaining rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    player_current: i64,
    house_current: i64,
    remaining_stages: u32,
    sides: u32,
}

impl GameState {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when `remaining_stages < 0` or
    /// `sides < 2`.
    pub fn new(
        player_current: i64,
        house_current: i64,
        remaining_stages: i64,
        sides: i64,
    ) -> Result<Self, EngineError> {
        let remaining_stages = u32::try_from(remaining_stages).map_err(|_| {
            EngineError::invalid(format!(
                "remaining_stages must be >= 0, got {}",
                remaining_stages
            ))
        })?;
        let sides = u32::try_from(sides)
            .ok()
            .filter(|s| *s >= MIN_SIDES)
            .ok_or_else(|| {
                EngineError::invalid(format!("sides must be >= {}, got {}", MIN_SIDES, sides))
            })?;
        Ok(Self {
            player_current,
            house_current,
            remaining_stages,
            sides,
        })
    }

    pub fn player_current(&self) -> i64 {
        self.player_current
    }
    pub fn house_current(&self) -> i64 {
        self.house_current
    }
    pub fn remaining_stages(&self) -> u32 {
        self.remaining_stages
    }
    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn is_terminal(&self) -> bool {
        self.remaining_stages == 0
    }
}

/// Probabilities of the three final outcomes, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub win: f64,
    pub loss: f64,
    pub push: f64,
}

impl OutcomeProbabilities {
    pub const CERTAIN_WIN: Self = Self {
        win: 1.0,
        loss: 0.0,
        push: 0.0,
    };
    pub const CERTAIN_LOSS: Self = Self {
        win: 0.0,
        loss: 1.0,
        push: 0.0,
    };
    pub const CERTAIN_PUSH: Self = Self {
        win: 0.0,
        loss: 0.0,
        push: 1.0,
    };

    pub fn total(&self) -> f64 {
        self.win + self.loss + self.push
    }

    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= PMF_TOLERANCE
    }

    /// Shannon entropy of the three-way distribution, in bits.
    pub fn entropy(&self) -> f64 {
        compute_entropy(self.win, self.loss, self.push)
    }
}

/// Outcome probabilities under the default rule (ties go to the house).
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `remaining_stages < 0` or
/// `sides < 2`; nothing is computed in that case.
///
/// # Examples
///
/// ```
/// use stagedice_engine::outcome::compute_outcome_probabilities;
///
/// // one coin-like die each, both at zero: only (2, 1) wins
/// let probs = compute_outcome_probabilities(0, 0, 1, 2).unwrap();
/// assert_eq!(probs.win, 0.25);
/// assert_eq!(probs.loss, 0.75);
/// assert_eq!(probs.push, 0.0);
/// ```
pub fn compute_outcome_probabilities(
    player_current: i64,
    house_current: i64,
    remaining_stages: i64,
    sides: i64,
) -> Result<OutcomeProbabilities, EngineError> {
    let state = GameState::new(player_current, house_current, remaining_stages, sides)?;
    compute_outcome_probabilities_with(&state, TieRule::Loss)
}

/// Outcome probabilities for `state` with an explicit tie rule.
pub fn compute_outcome_probabilities_with(
    state: &GameState,
    rule: TieRule,
) -> Result<OutcomeProbabilities, EngineError> {
    if state.is_terminal() {
        return Ok(settle(state.player_current, state.house_current, rule));
    }

    let die = uniform_die(state.sides)?;
    let player_future = compound(&die, state.remaining_stages)?;
    let house_future = compound(&die, state.remaining_stages)?;
    // Both futures share the same support, so only the index offset and
    // the current lead matter. i128 keeps extreme totals from overflowing.
    let lead = i128::from(state.player_current) - i128::from(state.house_current);

    let mut probs = OutcomeProbabilities {
        win: 0.0,
        loss: 0.0,
        push: 0.0,
    };
    for (p_idx, p_prob) in player_future.iter().enumerate() {
        for (h_idx, h_prob) in house_future.iter().enumerate() {
            let margin = lead + p_idx as i128 - h_idx as i128;
            let joint = p_prob * h_prob;
            if margin > 0 {
                probs.win += joint;
            } else if margin == 0 && rule == TieRule::Push {
                probs.push += joint;
            } else {
                probs.loss += joint;
            }
        }
    }

    debug!(
        player = state.player_current,
        house = state.house_current,
        stages = state.remaining_stages,
        sides = state.sides,
        win = probs.win,
        loss = probs.loss,
        push = probs.push,
        "aggregated outcome probabilities"
    );
    Ok(probs)
}

/// Outcome once no rolls remain.
fn settle(player: i64, house: i64, rule: TieRule) -> OutcomeProbabilities {
    if player > house {
        OutcomeProbabilities::CERTAIN_WIN
    } else if player == house && rule == TieRule::Push {
        OutcomeProbabilities::CERTAIN_PUSH
    } else {
        OutcomeProbabilities::CERTAIN_LOSS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_cases_match_house_takes_ties() {
        assert_eq!(
            compute_outcome_probabilities(5, 3, 0, 6).unwrap(),
            OutcomeProbabilities::CERTAIN_WIN
        );
        assert_eq!(
            compute_outcome_probabilities(3, 5, 0, 6).unwrap(),
            OutcomeProbabilities::CERTAIN_LOSS
        );
        assert_eq!(
            compute_outcome_probabilities(5, 5, 0, 6).unwrap(),
            OutcomeProbabilities::CERTAIN_LOSS
        );
    }

    #[test]
    fn push_rule_scores_terminal_tie_as_push() {
        let state = GameState::new(5, 5, 0, 6).unwrap();
        let probs = compute_outcome_probabilities_with(&state, TieRule::Push).unwrap();
        assert_eq!(probs, OutcomeProbabilities::CERTAIN_PUSH);
    }

    #[test]
    fn push_rule_moves_only_tie_mass() {
        let state = GameState::new(0, 0, 1, 2).unwrap();
        let probs = compute_outcome_probabilities_with(&state, TieRule::Push).unwrap();
        assert_eq!(probs.win, 0.25);
        assert_eq!(probs.push, 0.5);
        assert_eq!(probs.loss, 0.25);

        let default = compute_outcome_probabilities_with(&state, TieRule::Loss).unwrap();
        assert_eq!(default.win, probs.win);
        assert_eq!(default.loss, probs.loss + probs.push);
    }

    #[test]
    fn rejects_negative_stages_and_small_dice() {
        assert!(matches!(
            compute_outcome_probabilities(0, 0, -1, 6),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_outcome_probabilities(0, 0, 2, 1),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_outcome_probabilities(0, 0, 2, -6),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn symmetric_start_with_d6_favours_house() {
        let probs = compute_outcome_probabilities(0, 0, 1, 6).unwrap();
        // 15 of 36 ordered pairs have player strictly ahead
        assert!((probs.win - 15.0 / 36.0).abs() < 1e-12);
        assert!((probs.loss - 21.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn unreachable_lead_is_certain() {
        let probs = compute_outcome_probabilities(20, 0, 1, 6).unwrap();
        assert!((probs.win - 1.0).abs() < 1e-12);
        assert_eq!(probs.loss, 0.0);
    }
}
