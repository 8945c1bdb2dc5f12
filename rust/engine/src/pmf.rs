//! Probability mass functions over consecutive integer outcomes.
//!
//! A [`Pmf`] stores only the probabilities; the integer value of index 0
//! (the *base*) is context the caller carries. Convolving two pmfs adds
//! their bases, so the sum of `n` dice valued `1..=sides` has base `n`.

use tracing::debug;

use crate::errors::EngineError;

/// Tolerance used when checking that a pmf carries unit mass.
pub const PMF_TOLERANCE: f64 = 1e-9;

/// Immutable probability mass function indexed from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Pmf {
    probs: Vec<f64>,
}

impl Pmf {
    /// Builds a pmf from explicit probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when `probs` is empty, holds a
    /// negative or non-finite entry, or does not sum to 1 within
    /// [`PMF_TOLERANCE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stagedice_engine::pmf::Pmf;
    ///
    /// let coin = Pmf::new(vec![0.5, 0.5]).unwrap();
    /// assert_eq!(coin.len(), 2);
    /// assert!(Pmf::new(vec![0.5, 0.6]).is_err());
    /// ```
    pub fn new(probs: Vec<f64>) -> Result<Self, EngineError> {
        if probs.is_empty() {
            return Err(EngineError::invalid("pmf must have at least one entry"));
        }
        if let Some(p) = probs.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(EngineError::invalid(format!(
                "pmf entries must be finite and non-negative, got {}",
                p
            )));
        }
        let total: f64 = probs.iter().sum();
        if (total - 1.0).abs() > PMF_TOLERANCE {
            return Err(EngineError::invalid(format!(
                "pmf must sum to 1, got {}",
                total
            )));
        }
        Ok(Self { probs })
    }

    /// Uniform distribution over `sides` outcomes, each `1/sides`.
    pub(crate) fn uniform(sides: u32) -> Self {
        let p = 1.0 / f64::from(sides);
        Self {
            probs: vec![p; sides as usize],
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.probs.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.probs.iter().copied()
    }

    /// Total mass; 1 up to floating error for every constructed pmf.
    pub fn total(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Expected value when index 0 stands for `base`.
    pub fn mean(&self, base: i64) -> f64 {
        self.probs
            .iter()
            .enumerate()
            .map(|(i, p)| (base as f64 + i as f64) * p)
            .sum()
    }
}

/// Distribution of the sum of two independent variables.
///
/// The result has `a.len() + b.len() - 1` entries and its base is the sum
/// of the two input bases. Neither input is modified.
///
/// # Examples
///
/// ```
/// use stagedice_engine::pmf::{convolve, Pmf};
///
/// let coin = Pmf::new(vec![0.5, 0.5]).unwrap();
/// let two = convolve(&coin, &coin);
/// assert_eq!(two.as_slice(), &[0.25, 0.5, 0.25]);
/// ```
pub fn convolve(a: &Pmf, b: &Pmf) -> Pmf {
    let mut probs = vec![0.0; a.len() + b.len() - 1];
    for (i, pa) in a.iter().enumerate() {
        for (j, pb) in b.iter().enumerate() {
            probs[i + j] += pa * pb;
        }
    }
    Pmf { probs }
}

/// Distribution of the sum of `stages` independent draws from `die`.
///
/// `stages == 1` returns a copy of `die`; each further stage convolves
/// the running result with `die` once more.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `stages` is zero.
pub fn compound(die: &Pmf, stages: u32) -> Result<Pmf, EngineError> {
    if stages == 0 {
        return Err(EngineError::invalid("stage count must be >= 1"));
    }
    let mut acc = die.clone();
    for _ in 1..stages {
        acc = convolve(&acc, die);
    }
    debug!(stages, support = acc.len(), "compounded stage pmf");
    Ok(acc)
}
