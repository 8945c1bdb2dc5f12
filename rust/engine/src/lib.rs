//! # stagedice-engine: Staged Dice Contest Core
//!
//! Exact outcome probabilities for a contest in which a player and a house
//! each roll one fair die per remaining stage and the higher final total
//! wins. Ties go to the house unless the push rule is selected explicitly.
//!
//! ## Core Modules
//!
//! - [`pmf`] - Probability mass functions, convolution and stage compounding
//! - [`dice`] - Single-die distribution and seeded ChaCha20 roller
//! - [`outcome`] - Joint win/loss/push aggregation over two future totals
//! - [`entropy`] - Shannon entropy of an outcome distribution, Brier score
//! - [`rules`] - Stake adjustments and payouts for the betting session
//! - [`session`] - Seeded headless run of the staged betting experiment
//! - [`logger`] - Trial and ground-truth records, JSONL trial logger
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use stagedice_engine::entropy::compute_entropy;
//! use stagedice_engine::outcome::compute_outcome_probabilities;
//!
//! let probs = compute_outcome_probabilities(7, 7, 2, 6).unwrap();
//! assert!((probs.win + probs.loss + probs.push - 1.0).abs() < 1e-9);
//! assert_eq!(probs.push, 0.0);
//!
//! let bits = compute_entropy(probs.win, probs.loss, probs.push);
//! assert!(bits > 0.0 && bits <= 1.0);
//! ```
//!
//! ## Deterministic Sessions
//!
//! ```rust
//! use stagedice_engine::session::{CalibratedPolicy, Session, SessionConfig};
//!
//! let config = SessionConfig { trials: 3, seed: 42, ..SessionConfig::default() };
//! let mut a = Session::new(config.clone(), CalibratedPolicy).unwrap();
//! let mut b = Session::new(config, CalibratedPolicy).unwrap();
//! assert_eq!(a.play_all().unwrap(), b.play_all().unwrap());
//! ```

pub mod dice;
pub mod entropy;
pub mod errors;
pub mod logger;
pub mod outcome;
pub mod pmf;
pub mod rules;
pub mod session;

pub use entropy::compute_entropy;
pub use errors::EngineError;
pub use outcome::{compute_outcome_probabilities, OutcomeProbabilities, TieRule};
