use serde::{Deserialize, Serialize};

/// Stake adjustment a participant may request before a stage is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetAction {
    /// Pull one bet step back into wealth
    Retract,
    /// Leave the stake as is
    Hold,
    /// Move one bet step from wealth onto the stake
    Add,
}

/// Wealth and stake after an action has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stakes {
    pub wealth: i64,
    pub bet: u32,
    /// The action actually performed; unaffordable requests become `Hold`.
    pub applied: BetAction,
}

/// Applies `action` to the current wealth and stake.
///
/// A retract needs at least one `step` on the stake and an add needs at
/// least one `step` of wealth; otherwise the request degrades to
/// [`BetAction::Hold`] and nothing moves.
///
/// # Examples
///
/// ```
/// use stagedice_engine::rules::{apply_action, BetAction};
///
/// let s = apply_action(100, 15, 5, BetAction::Add);
/// assert_eq!((s.wealth, s.bet, s.applied), (95, 20, BetAction::Add));
///
/// // not enough wealth left to add
/// let s = apply_action(3, 15, 5, BetAction::Add);
/// assert_eq!((s.wealth, s.bet, s.applied), (3, 15, BetAction::Hold));
/// ```
pub fn apply_action(wealth: i64, bet: u32, step: u32, action: BetAction) -> Stakes {
    let step_i = i64::from(step);
    match action {
        BetAction::Retract if bet >= step => Stakes {
            wealth: wealth + step_i,
            bet: bet - step,
            applied: BetAction::Retract,
        },
        BetAction::Add if wealth >= step_i => Stakes {
            wealth: wealth - step_i,
            bet: bet + step,
            applied: BetAction::Add,
        },
        _ => Stakes {
            wealth,
            bet,
            applied: BetAction::Hold,
        },
    }
}

/// Amount returned to the participant when a trial resolves.
pub fn payout(bet: u32, won: bool) -> i64 {
    if won {
        2 * i64::from(bet)
    } else {
        0
    }
}
