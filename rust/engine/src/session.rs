use tracing::{debug, info};

use crate::dice::DiceRoller;
use crate::entropy::brier_score;
use crate::errors::EngineError;
use crate::logger::{StageSnapshot, TrialOutcome, TrialRecord};
use crate::outcome::{compute_outcome_probabilities, OutcomeProbabilities};
use crate::rules::{apply_action, payout, BetAction};

/// Fixed participation fee added to the performance reward.
pub const BASE_PAY: f64 = 3.0;

/// Parameters of a betting session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub start_wealth: i64,
    pub ante: u32,
    pub bet_step: u32,
    pub trials: u32,
    pub stages: u32,
    pub sides: u32,
    /// House total at the start of every trial
    pub starting_bias: i64,
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_wealth: 500,
            ante: 15,
            bet_step: 5,
            trials: 10,
            stages: 3,
            sides: 6,
            starting_bias: 0,
            seed: 0xD1CE_5EED,
        }
    }
}

/// What a decision maker sees before choosing an action.
#[derive(Debug, Clone, PartialEq)]
pub struct StageView {
    pub trial_id: u32,
    pub stage: u32,
    pub remaining_stages: u32,
    pub player_sum: i64,
    pub house_sum: i64,
    pub wealth: i64,
    pub bet: u32,
    pub probs: OutcomeProbabilities,
}

/// Action plus the reported probability of winning the trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: BetAction,
    pub belief: f64,
}

pub trait DecisionMaker {
    fn decide(&mut self, view: &StageView) -> Decision;
}

/// Reports the exact win probability and leans the stake toward it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalibratedPolicy;

impl DecisionMaker for CalibratedPolicy {
    fn decide(&mut self, view: &StageView) -> Decision {
        let win = view.probs.win;
        let action = if win > 0.5 {
            BetAction::Add
        } else if win < 0.5 {
            BetAction::Retract
        } else {
            BetAction::Hold
        };
        Decision {
            action,
            belief: win,
        }
    }
}

/// End-of-session figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub trials_played: u32,
    pub wins: u32,
    pub final_wealth: i64,
    pub mean_accuracy: f64,
    pub performance_reward: f64,
    pub base_pay: f64,
    pub total_payment: f64,
    pub bankrupt: bool,
}

impl SessionSummary {
    /// Copies the session-wide figures onto `record`.
    pub fn stamp(&self, record: &mut TrialRecord) {
        record.mean_accuracy = Some(self.mean_accuracy);
        record.performance_reward = Some(self.performance_reward);
        record.total_payment = Some(self.total_payment);
    }
}

/// Seeded, headless run of the staged betting experiment.
#[derive(Debug)]
pub struct Session<D: DecisionMaker> {
    config: SessionConfig,
    roller: DiceRoller,
    decider: D,
    participant: String,
    wealth: i64,
    played: u32,
    wins: u32,
    bankrupt: bool,
    accuracy_scores: Vec<f64>,
}

impl<D: DecisionMaker> Session<D> {
    pub fn new(config: SessionConfig, decider: D) -> Result<Self, EngineError> {
        if config.stages == 0 {
            return Err(EngineError::invalid("stages must be >= 1"));
        }
        if config.ante == 0 || config.bet_step == 0 {
            return Err(EngineError::invalid("ante and bet_step must be > 0"));
        }
        let mut roller = DiceRoller::new_with_seed(config.sides, config.seed)?;
        let participant = roller.participant_id();
        Ok(Self {
            wealth: config.start_wealth,
            config,
            roller,
            decider,
            participant,
            played: 0,
            wins: 0,
            bankrupt: false,
            accuracy_scores: Vec::new(),
        })
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }
    pub fn wealth(&self) -> i64 {
        self.wealth
    }
    pub fn is_bankrupt(&self) -> bool {
        self.bankrupt
    }

    pub fn is_complete(&self) -> bool {
        self.bankrupt || self.played >= self.config.trials
    }

    /// Plays the next trial to resolution.
    ///
    /// A trial cannot start when wealth is below the ante; the session is
    /// then marked bankrupt.
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionComplete`] once every trial has been played or
    /// the participant is bankrupt, [`EngineError::InvalidBelief`] when the
    /// decision maker reports a belief outside `[0, 1]`.
    pub fn play_trial(&mut self) -> Result<TrialRecord, EngineError> {
        if !self.is_complete() && self.wealth < i64::from(self.config.ante) {
            info!(wealth = self.wealth, "participant cannot cover the ante");
            self.bankrupt = true;
        }
        if self.is_complete() {
            return Err(EngineError::SessionComplete {
                trials: self.played,
            });
        }

        let trial_id = self.played + 1;
        let wealth_start = self.wealth;
        let mut bet = self.config.ante;
        let mut wealth = self.wealth - i64::from(bet);
        let mut player_sum = 0i64;
        let mut house_sum = self.config.starting_bias;
        let mut history = Vec::with_capacity(self.config.stages as usize);

        for stage in 1..=self.config.stages {
            let remaining = self.config.stages - stage + 1;
            let probs = compute_outcome_probabilities(
                player_sum,
                house_sum,
                i64::from(remaining),
                i64::from(self.config.sides),
            )?;
            let view = StageView {
                trial_id,
                stage,
                remaining_stages: remaining,
                player_sum,
                house_sum,
                wealth,
                bet,
                probs,
            };
            let decision = self.decider.decide(&view);
            if !(0.0..=1.0).contains(&decision.belief) {
                return Err(EngineError::InvalidBelief {
                    belief: decision.belief,
                });
            }
            let stakes = apply_action(wealth, bet, self.config.bet_step, decision.action);

            let p_roll = self.roller.roll();
            let h_roll = self.roller.roll();
            debug!(trial_id, stage, p_roll, h_roll, "stage rolled");

            history.push(StageSnapshot {
                trial_id,
                stage,
                p_roll: Some(p_roll),
                h_roll: Some(h_roll),
                p_sum: player_sum,
                h_sum: house_sum,
                p_sum_after_roll: Some(player_sum + i64::from(p_roll)),
                h_sum_after_roll: Some(house_sum + i64::from(h_roll)),
                wealth_available: stakes.wealth,
                current_bet: stakes.bet,
                remaining_stages: remaining,
                entropy: probs.entropy(),
                ground_truth_probs: probs,
                action_taken: stakes.applied,
                belief_reported: Some(decision.belief),
                bet_after_action: stakes.bet,
                brier_score: None,
                accuracy_score: None,
            });

            wealth = stakes.wealth;
            bet = stakes.bet;
            player_sum += i64::from(p_roll);
            house_sum += i64::from(h_roll);
        }

        let won = player_sum > house_sum;
        wealth += payout(bet, won);
        for snap in &mut history {
            if let Some(belief) = snap.belief_reported {
                let brier = brier_score(belief, won)?;
                snap.brier_score = Some(brier);
                snap.accuracy_score = Some(1.0 - brier);
                self.accuracy_scores.push(1.0 - brier);
            }
        }

        self.wealth = wealth;
        self.played += 1;
        if won {
            self.wins += 1;
        }
        let outcome = if won {
            TrialOutcome::Win
        } else {
            TrialOutcome::Loss
        };
        info!(
            trial_id,
            player_sum,
            house_sum,
            ?outcome,
            wealth,
            "trial resolved"
        );

        Ok(TrialRecord {
            participant: self.participant.clone(),
            trial_id,
            outcome,
            wealth_start,
            wealth_end: wealth,
            history,
            mean_accuracy: None,
            performance_reward: None,
            total_payment: None,
            ts: None,
        })
    }

    /// Plays every remaining trial, returning the records in order.
    pub fn play_all(&mut self) -> Result<Vec<TrialRecord>, EngineError> {
        let mut records = Vec::new();
        loop {
            match self.play_trial() {
                Ok(rec) => records.push(rec),
                Err(EngineError::SessionComplete { .. }) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }

    pub fn summary(&self) -> SessionSummary {
        let final_wealth = self.wealth.max(0);
        let mean_accuracy = if self.accuracy_scores.is_empty() {
            0.0
        } else {
            self.accuracy_scores.iter().sum::<f64>() / self.accuracy_scores.len() as f64
        };
        let performance_reward = final_wealth as f64 * mean_accuracy / 100.0;
        SessionSummary {
            trials_played: self.played,
            wins: self.wins,
            final_wealth,
            mean_accuracy,
            performance_reward,
            base_pay: BASE_PAY,
            total_payment: performance_reward + BASE_PAY,
            bankrupt: self.bankrupt,
        }
    }
}
