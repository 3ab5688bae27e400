//! Error types for Horizon Combobox core systems.

use crate::timer::TimerId;

/// The main error type for core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid, already fired, or already cancelled.
    #[error("Invalid or expired timer ID {0:?}")]
    InvalidTimerId(TimerId),
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
