//! # State Error Types
//!
//! Errors raised by the state layer: configuration file handling and
//! vault construction from configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / toml errors ──► StateError::ConfigLoadFailed / Save  │
//! │                                                                         │
//! │  VaultError (teller-core) ──────► StateError::Vault                    │
//! │                                                                         │
//! │  Deposit / withdraw on VaultState return VaultError directly: the      │
//! │  state layer adds locking and logging, not new failure modes.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use teller_core::VaultError;
use thiserror::Error;

/// Result type alias for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// State layer errors.
#[derive(Debug, Error)]
pub enum StateError {
    /// The configured limits or denomination table were rejected by the core.
    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config file could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

impl From<std::io::Error> for StateError {
    fn from(err: std::io::Error) -> Self {
        StateError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StateError {
    fn from(err: toml::de::Error) -> Self {
        StateError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StateError {
    fn from(err: toml::ser::Error) -> Self {
        StateError::ConfigSaveFailed(err.to_string())
    }
}
