//! Bout system - rounds, exchanges and the match lifecycle
//!
//! Idle -> RoundInProgress -> RoundEnded -> (RoundInProgress | MatchFinished)
//!
//! A knockout jumps straight from RoundInProgress to MatchFinished.

pub mod adjudication;
pub mod driver;
pub mod engine;
pub mod events;
pub mod phase;

pub use adjudication::{decide, knockout_winner, DecisionBasis, Verdict};
pub use driver::{next_event, MatchDriver, MatchHandle};
pub use engine::{BoutSummary, MatchEngine, MatchSnapshot, SkipReason, TickOutcome};
pub use events::MatchEvent;
pub use phase::{MatchMode, MatchPhase, MatchState, MatchTrigger};
