use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("Belief must lie in [0, 1], got {belief}")]
    InvalidBelief { belief: f64 },
    #[error("Session complete after {trials} trial(s)")]
    SessionComplete { trials: u32 },
}

impl EngineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }
}
