use thiserror::Error;

use crate::bout::{MatchMode, MatchPhase};
use crate::core::types::Corner;

/// Every variant is a rejection: the engine state is left untouched.
#[derive(Error, Debug)]
pub enum BoutError {
    #[error("Cannot {operation} while {phase}")]
    IllegalTransition {
        operation: &'static str,
        phase: MatchPhase,
    },

    #[error("Cannot {operation} in {mode} mode")]
    WrongMode {
        operation: &'static str,
        mode: MatchMode,
    },

    #[error("{fighter} is still recovering ({remaining_ms}ms left)")]
    CooldownRejected { fighter: Corner, remaining_ms: u64 },

    #[error("{fighter} is knocked out")]
    FighterDown { fighter: Corner },

    #[error("Config read error: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Match driver has shut down")]
    DriverClosed,
}

impl BoutError {
    /// Cooldown rejections are routine in manual play and usually ignored
    pub fn is_cooldown(&self) -> bool {
        matches!(self, BoutError::CooldownRejected { .. })
    }
}

pub type Result<T> = std::result::Result<T, BoutError>;
