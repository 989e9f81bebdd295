//! # Floor Error Types
//!
//! Error types for the runtime layer.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Floor Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Engine      │  │     Runtime             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Rejected       │  │  ShuttingDown           │ │
//! │  │  ConfigLoad     │  │  Validation     │  │  Io, Internal           │ │
//! │  │  ConfigSave     │  │  MalformedEvent │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tableflow_core::{CoreError, RejectReason, ValidationError};
use thiserror::Error;

/// Result type alias for floor operations.
pub type FloorResult<T> = Result<T, FloorError>;

#[derive(Debug, Error)]
pub enum FloorError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid floor configuration.
    #[error("Invalid floor configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// The engine refused the event; state is unchanged.
    #[error(transparent)]
    Rejected(#[from] RejectReason),

    /// Caller input failed validation before reaching the engine.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A known event kind arrived with a payload that does not parse.
    #[error("Malformed {kind} event: {reason}")]
    MalformedEvent { kind: String, reason: String },

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The timer monitor loop has already exited.
    #[error("Timer monitor is shutting down")]
    ShuttingDown,

    #[error("Internal error: {0}")]
    Internal(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for FloorError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Rejected(reason) => FloorError::Rejected(reason),
            CoreError::Validation(e) => FloorError::Validation(e),
            CoreError::MalformedEvent { kind, reason } => {
                FloorError::MalformedEvent { kind, reason }
            }
        }
    }
}

impl From<toml::de::Error> for FloorError {
    fn from(err: toml::de::Error) -> Self {
        FloorError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for FloorError {
    fn from(err: toml::ser::Error) -> Self {
        FloorError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl FloorError {
    /// Returns true if the engine refused the event.
    pub fn is_rejection(&self) -> bool {
        matches!(self, FloorError::Rejected(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FloorError::InvalidConfig(_)
                | FloorError::ConfigLoadFailed(_)
                | FloorError::ConfigSaveFailed(_)
        )
    }

    /// The rejection reason, if this is a rejection.
    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            FloorError::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}
