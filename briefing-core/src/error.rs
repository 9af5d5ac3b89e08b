//! Error types for the briefing core

use thiserror::Error;

/// Briefing-wide error type
#[derive(Error, Debug)]
pub enum BriefingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BriefingError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        BriefingError::InvalidInput(msg.into())
    }
}
