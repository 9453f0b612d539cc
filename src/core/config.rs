//! Match configuration
//!
//! Values arriving from the presentation layer or a TOML file are never
//! trusted: [`MatchConfig::clamped`] pulls everything back into range and
//! logs what it changed instead of failing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bout::MatchMode;
use crate::core::error::Result;

pub const MIN_ROUNDS: u32 = 1;
pub const MAX_ROUNDS: u32 = 12;
pub const MIN_EXCHANGES_PER_ROUND: u32 = 1;
pub const MAX_EXCHANGES_PER_ROUND: u32 = 30;
pub const MIN_TICK_INTERVAL_MS: u64 = 50;
pub const MAX_TICK_INTERVAL_MS: u64 = 5_000;

/// How a match that goes the distance is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// Higher score wins; equal scores fall back to remaining health
    #[default]
    ScoreThenHealth,
    /// Remaining health alone decides
    HealthOnly,
}

/// Configuration for a single match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Rounds scheduled before the match goes to a decision
    pub rounds_total: u32,

    /// Exchanges (attack attempts) in each round
    pub exchanges_per_round: u32,

    /// Automatic ticks or caller-driven attacks. Fixed for the whole match.
    pub mode: MatchMode,

    pub decision_rule: DecisionRule,

    /// Period of the automatic tick source
    ///
    /// Around 650ms reads well when every exchange is rendered.
    pub tick_interval_ms: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds_total: 8,
            exchanges_per_round: 10,
            mode: MatchMode::Automatic,
            decision_rule: DecisionRule::ScoreThenHealth,
            tick_interval_ms: 650,
        }
    }
}

impl MatchConfig {
    pub fn new(rounds_total: u32, exchanges_per_round: u32, mode: MatchMode) -> Self {
        Self {
            rounds_total,
            exchanges_per_round,
            mode,
            ..Self::default()
        }
    }

    /// Copy of this config with every field pulled into its valid range
    pub fn clamped(&self) -> Self {
        let rounds_total = self.rounds_total.clamp(MIN_ROUNDS, MAX_ROUNDS);
        let exchanges_per_round = self
            .exchanges_per_round
            .clamp(MIN_EXCHANGES_PER_ROUND, MAX_EXCHANGES_PER_ROUND);
        let tick_interval_ms = self
            .tick_interval_ms
            .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS);

        if rounds_total != self.rounds_total {
            tracing::warn!(
                requested = self.rounds_total,
                applied = rounds_total,
                "rounds_total out of range, clamped"
            );
        }
        if exchanges_per_round != self.exchanges_per_round {
            tracing::warn!(
                requested = self.exchanges_per_round,
                applied = exchanges_per_round,
                "exchanges_per_round out of range, clamped"
            );
        }
        if tick_interval_ms != self.tick_interval_ms {
            tracing::warn!(
                requested = self.tick_interval_ms,
                applied = tick_interval_ms,
                "tick_interval_ms out of range, clamped"
            );
        }

        Self {
            rounds_total,
            exchanges_per_round,
            tick_interval_ms,
            ..*self
        }
    }
}

/// Load a match config from a TOML file. Missing keys take their defaults.
pub fn load_match_config(path: impl AsRef<Path>) -> Result<MatchConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: MatchConfig = toml::from_str(&contents)?;
    Ok(config.clamped())
}
