//! Notifications from the engine to the presentation layer
//!
//! One event per state change. The engine queues them; callers drain the
//! queue after each call (see `MatchEngine::drain_events`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bout::adjudication::Verdict;
use crate::bout::phase::MatchMode;
use crate::combat::exchange::ExchangeOutcome;
use crate::combat::fighter::FighterTally;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    MatchStarted {
        mode: MatchMode,
        rounds_total: u32,
        exchanges_per_round: u32,
    },
    RoundStarted {
        round: u32,
    },
    ExchangeResolved {
        round: u32,
        /// 1-based position within the round
        exchange: u32,
        outcome: ExchangeOutcome,
    },
    RoundEnded {
        round: u32,
        /// Endurance granted to each fighter during the corner rest
        recovered: u32,
    },
    MatchFinished {
        verdict: Verdict,
        red: FighterTally,
        green: FighterTally,
    },
    Paused {
        round: u32,
        exchange: u32,
    },
    Resumed {
        round: u32,
        exchange: u32,
    },
    MatchReset {
        randomized: bool,
    },
}

impl MatchEvent {
    pub fn is_match_finished(&self) -> bool {
        matches!(self, MatchEvent::MatchFinished { .. })
    }
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchEvent::MatchStarted {
                mode,
                rounds_total,
                exchanges_per_round,
            } => write!(
                f,
                "Match started ({mode}). Rounds: {rounds_total}, exchanges/round: {exchanges_per_round}."
            ),
            MatchEvent::RoundStarted { round } => write!(f, "Round {round} starts."),
            MatchEvent::ExchangeResolved { outcome, .. } => write!(f, "{outcome}"),
            MatchEvent::RoundEnded { round, recovered } => write!(
                f,
                "Round {round} ends. Corner rest: both fighters recover {recovered} endurance."
            ),
            MatchEvent::MatchFinished { verdict, red, green } => write!(
                f,
                "Match finished. {verdict}. {} {}hp/{}pts, {} {}hp/{}pts.",
                red.name, red.health, red.score, green.name, green.health, green.score
            ),
            MatchEvent::Paused { .. } => f.write_str("Match paused."),
            MatchEvent::Resumed { .. } => f.write_str("Match resumed."),
            MatchEvent::MatchReset { randomized: true } => {
                f.write_str("Match reset. Attributes randomized.")
            }
            MatchEvent::MatchReset { randomized: false } => {
                f.write_str("Match reset. Attributes kept.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Corner;

    #[test]
    fn test_event_text() {
        let event = MatchEvent::RoundEnded {
            round: 2,
            recovered: 24,
        };
        assert_eq!(
            event.to_string(),
            "Round 2 ends. Corner rest: both fighters recover 24 endurance."
        );
        assert!(!event.is_match_finished());
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = MatchEvent::MatchReset { randomized: true };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "match_reset");
        assert_eq!(json["randomized"], true);

        let verdict = serde_json::to_value(Verdict::Knockout {
            winner: Corner::Green,
        })
        .unwrap();
        assert_eq!(verdict["kind"], "knockout");
        assert_eq!(verdict["winner"], "Green");
    }
}
