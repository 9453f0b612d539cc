pub mod config;
pub mod dice;
pub mod error;
pub mod types;

pub use config::{load_match_config, DecisionRule, MatchConfig};
pub use dice::{RandomSource, ScriptedDice, SeededDice};
pub use error::{BoutError, Result};
pub use types::{Corner, Timestamp};
