//! Crate error type.
//!
//! Storage and parse failures never reach gameplay: the persistence layer
//! logs them and falls back to defaults. Transition errors are returned to
//! the host when it asks for something the current state does not allow.

use std::fmt;

use crate::game::SessionState;

#[derive(Debug)]
pub enum GameError {
    /// Reading or writing the backing store failed.
    Storage {
        /// Record key involved.
        key: String,
        source: std::io::Error,
    },

    /// Stored or supplied data could not be parsed or failed validation.
    Corrupt {
        /// What was being decoded (for logging).
        what: &'static str,
        reason: String,
    },

    /// The requested action is not valid in the current session state.
    InvalidTransition {
        from: SessionState,
        action: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Storage { key, source } => {
                write!(f, "storage error for '{}': {}", key, source)
            }
            GameError::Corrupt { what, reason } => {
                write!(f, "corrupt {}: {}", what, reason)
            }
            GameError::InvalidTransition { from, action } => {
                write!(f, "cannot {} while {:?}", action, from)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}
