//! Match phases and the transition table
//!
//! The phase is a closed enum with one writer (the engine). Pausing is a
//! flag inside `RoundInProgress`, so it cannot exist in any other phase.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::DecisionRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// A periodic tick picks attacker and action
    #[default]
    Automatic,
    /// The caller throws every punch
    Manual,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Automatic => f.write_str("automatic"),
            MatchMode::Manual => f.write_str("manual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Idle,
    RoundInProgress {
        paused: bool,
    },
    /// Between rounds, waiting for the next round to be called
    RoundEnded,
    /// Terminal until reset
    MatchFinished,
}

/// Events that move the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTrigger {
    Start,
    Pause,
    Resume,
    /// One attack attempt; legal only in a live, unpaused round
    Exchange,
    /// Exchange budget for the round used up
    RoundComplete,
    NextRound,
    Knockout,
    /// Final round ended without a knockout
    Decision,
    Reset,
}

impl MatchTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchTrigger::Start => "start the match",
            MatchTrigger::Pause => "pause",
            MatchTrigger::Resume => "resume",
            MatchTrigger::Exchange => "attack",
            MatchTrigger::RoundComplete => "end the round",
            MatchTrigger::NextRound => "start the next round",
            MatchTrigger::Knockout => "stop on a knockout",
            MatchTrigger::Decision => "go to a decision",
            MatchTrigger::Reset => "reset",
        }
    }
}

impl MatchPhase {
    pub const LIVE: MatchPhase = MatchPhase::RoundInProgress { paused: false };

    /// Apply a trigger; `None` means the trigger is illegal in this phase
    pub fn next(self, trigger: MatchTrigger) -> Option<MatchPhase> {
        use MatchPhase::*;
        use MatchTrigger::*;

        match (self, trigger) {
            (_, Reset) => Some(Idle),

            (Idle | MatchFinished, Start) => Some(Self::LIVE),

            (RoundInProgress { paused: false }, Pause) => Some(RoundInProgress { paused: true }),
            (RoundInProgress { paused: true }, Resume) => Some(Self::LIVE),

            (RoundInProgress { paused: false }, Exchange) => Some(self),
            (RoundInProgress { paused: false }, RoundComplete) => Some(RoundEnded),
            (RoundInProgress { paused: false }, Knockout) => Some(MatchFinished),

            (RoundEnded, NextRound) => Some(Self::LIVE),
            (RoundEnded, Decision) => Some(MatchFinished),

            _ => None,
        }
    }

    pub fn is_live(self) -> bool {
        self == Self::LIVE
    }

    pub fn is_paused(self) -> bool {
        matches!(self, MatchPhase::RoundInProgress { paused: true })
    }

    pub fn is_finished(self) -> bool {
        self == MatchPhase::MatchFinished
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPhase::Idle => f.write_str("idle"),
            MatchPhase::RoundInProgress { paused: false } => f.write_str("a round is in progress"),
            MatchPhase::RoundInProgress { paused: true } => f.write_str("paused"),
            MatchPhase::RoundEnded => f.write_str("between rounds"),
            MatchPhase::MatchFinished => f.write_str("the match is finished"),
        }
    }
}

/// Round bookkeeping, owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub rounds_total: u32,
    pub exchanges_per_round: u32,
    /// 1-based
    pub current_round: u32,
    pub exchange_in_round: u32,
    pub phase: MatchPhase,
    pub mode: MatchMode,
    pub decision_rule: DecisionRule,
    pub tick_interval_ms: u64,
}

impl MatchState {
    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.rounds_total
    }

    pub fn round_complete(&self) -> bool {
        self.exchange_in_round >= self.exchanges_per_round
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let phase = MatchPhase::Idle;
        let phase = phase.next(MatchTrigger::Start).unwrap();
        assert!(phase.is_live());
        let phase = phase.next(MatchTrigger::RoundComplete).unwrap();
        assert_eq!(phase, MatchPhase::RoundEnded);
        let phase = phase.next(MatchTrigger::NextRound).unwrap();
        assert!(phase.is_live());
        let phase = phase.next(MatchTrigger::Knockout).unwrap();
        assert!(phase.is_finished());
        let phase = phase.next(MatchTrigger::Start).unwrap();
        assert!(phase.is_live());
    }

    #[test]
    fn test_pause_blocks_round_progress() {
        let paused = MatchPhase::LIVE.next(MatchTrigger::Pause).unwrap();
        assert!(paused.is_paused());
        assert_eq!(paused.next(MatchTrigger::Exchange), None);
        assert_eq!(paused.next(MatchTrigger::Pause), None);
        assert_eq!(paused.next(MatchTrigger::RoundComplete), None);
        assert_eq!(paused.next(MatchTrigger::Resume), Some(MatchPhase::LIVE));
    }

    #[test]
    fn test_illegal_triggers() {
        assert_eq!(MatchPhase::Idle.next(MatchTrigger::Exchange), None);
        assert_eq!(MatchPhase::Idle.next(MatchTrigger::NextRound), None);
        assert_eq!(MatchPhase::LIVE.next(MatchTrigger::Start), None);
        assert_eq!(MatchPhase::LIVE.next(MatchTrigger::NextRound), None);
        assert_eq!(MatchPhase::RoundEnded.next(MatchTrigger::Pause), None);
        assert_eq!(MatchPhase::MatchFinished.next(MatchTrigger::Exchange), None);
        assert_eq!(MatchPhase::MatchFinished.next(MatchTrigger::Resume), None);
    }

    #[test]
    fn test_reset_from_anywhere() {
        for phase in [
            MatchPhase::Idle,
            MatchPhase::LIVE,
            MatchPhase::RoundInProgress { paused: true },
            MatchPhase::RoundEnded,
            MatchPhase::MatchFinished,
        ] {
            assert_eq!(phase.next(MatchTrigger::Reset), Some(MatchPhase::Idle));
        }
    }
}
