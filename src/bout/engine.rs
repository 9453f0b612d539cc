//! Match engine: the single writer for round state and both fighters
//!
//! Every entry point (automatic tick, manual attack, control calls) runs
//! one whole logical step and either succeeds or rejects without touching
//! state. Notifications queue up until `drain_events`.

use serde::{Deserialize, Serialize};

use crate::bout::adjudication::{decide, knockout_winner, Verdict};
use crate::bout::events::MatchEvent;
use crate::bout::phase::{MatchMode, MatchPhase, MatchState, MatchTrigger};
use crate::combat::action::ActionType;
use crate::combat::constants::{RECOVERY_BASE, RECOVERY_JITTER};
use crate::combat::exchange::{resolve_exchange, ExchangeOutcome};
use crate::combat::fighter::{Fighter, FighterTally};
use crate::combat::selection::{select_action, select_attacker};
use crate::core::config::MatchConfig;
use crate::core::dice::RandomSource;
use crate::core::error::{BoutError, Result};
use crate::core::types::{Corner, Timestamp};

/// Why an automatic tick did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ManualMode,
    Paused,
    NotInRound,
    FighterDown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Resolved(ExchangeOutcome),
    /// Late or out-of-phase tick; nothing changed
    Skipped(SkipReason),
}

/// Point-in-time copy of everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub state: MatchState,
    pub red: Fighter,
    pub green: Fighter,
    pub verdict: Option<Verdict>,
}

/// Final report of a finished match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoutSummary {
    pub verdict: Verdict,
    pub rounds_fought: u32,
    pub total_exchanges: u32,
    pub red: FighterTally,
    pub green: FighterTally,
}

pub struct MatchEngine<R> {
    state: MatchState,
    red: Fighter,
    green: Fighter,
    rng: R,
    verdict: Option<Verdict>,
    total_exchanges: u32,
    events: Vec<MatchEvent>,
}

impl<R: RandomSource> MatchEngine<R> {
    pub fn new(config: MatchConfig, red: Fighter, green: Fighter, rng: R) -> Self {
        let config = config.clamped();
        Self {
            state: MatchState {
                rounds_total: config.rounds_total,
                exchanges_per_round: config.exchanges_per_round,
                current_round: 1,
                exchange_in_round: 0,
                phase: MatchPhase::Idle,
                mode: config.mode,
                decision_rule: config.decision_rule,
                tick_interval_ms: config.tick_interval_ms,
            },
            red,
            green,
            rng,
            verdict: None,
            total_exchanges: 0,
            events: Vec::new(),
        }
    }

    /// Engine with the stock Red and Green fighters
    pub fn with_stock_fighters(config: MatchConfig, rng: R) -> Self {
        Self::new(
            config,
            Fighter::stock(Corner::Red),
            Fighter::stock(Corner::Green),
            rng,
        )
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn fighter(&self, corner: Corner) -> &Fighter {
        match corner {
            Corner::Red => &self.red,
            Corner::Green => &self.green,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn total_exchanges(&self) -> u32 {
        self.total_exchanges
    }

    /// True while the automatic tick source should be running
    pub fn wants_ticks(&self) -> bool {
        self.state.mode == MatchMode::Automatic && self.state.phase.is_live()
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            state: self.state,
            red: self.red.clone(),
            green: self.green.clone(),
            verdict: self.verdict,
        }
    }

    /// Summary of the finished match, if it is finished
    pub fn summary(&self) -> Option<BoutSummary> {
        let verdict = self.verdict?;
        Some(BoutSummary {
            verdict,
            rounds_fought: self.state.current_round,
            total_exchanges: self.total_exchanges,
            red: self.red.tally(),
            green: self.green.tally(),
        })
    }

    fn emit(&mut self, event: MatchEvent) {
        tracing::debug!(%event, "match event");
        self.events.push(event);
    }

    fn transition(&mut self, trigger: MatchTrigger) -> Result<()> {
        let next = self
            .state
            .phase
            .next(trigger)
            .ok_or(BoutError::IllegalTransition {
                operation: trigger.as_str(),
                phase: self.state.phase,
            })?;
        self.state.phase = next;
        Ok(())
    }

    /// Start a match from `Idle`, or a rematch from `MatchFinished`
    ///
    /// A rematch restores health, endurance and score but keeps attributes.
    pub fn start_match(&mut self, config: MatchConfig) -> Result<()> {
        let was_finished = self.state.phase.is_finished();
        self.transition(MatchTrigger::Start)?;

        let config = config.clamped();
        if was_finished {
            self.red.refresh();
            self.green.refresh();
        }
        self.state.rounds_total = config.rounds_total;
        self.state.exchanges_per_round = config.exchanges_per_round;
        self.state.mode = config.mode;
        self.state.decision_rule = config.decision_rule;
        self.state.tick_interval_ms = config.tick_interval_ms;
        self.state.current_round = 1;
        self.state.exchange_in_round = 0;
        self.verdict = None;
        self.total_exchanges = 0;

        tracing::info!(
            mode = %config.mode,
            rounds = config.rounds_total,
            exchanges_per_round = config.exchanges_per_round,
            "Match started"
        );
        self.emit(MatchEvent::MatchStarted {
            mode: config.mode,
            rounds_total: config.rounds_total,
            exchanges_per_round: config.exchanges_per_round,
        });
        self.emit(MatchEvent::RoundStarted { round: 1 });
        Ok(())
    }

    /// One automatic exchange. Out-of-phase ticks are harmless no-ops.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.mode != MatchMode::Automatic {
            return TickOutcome::Skipped(SkipReason::ManualMode);
        }
        match self.state.phase {
            MatchPhase::RoundInProgress { paused: false } => {}
            MatchPhase::RoundInProgress { paused: true } => {
                return TickOutcome::Skipped(SkipReason::Paused)
            }
            _ => return TickOutcome::Skipped(SkipReason::NotInRound),
        }

        if let Some(winner) = knockout_winner(&self.red, &self.green) {
            if let Err(e) = self.finish_by_knockout(winner) {
                tracing::warn!(error = %e, "knockout finish rejected");
            }
            return TickOutcome::Skipped(SkipReason::FighterDown);
        }

        let attacker = select_attacker(&self.red, &self.green, &mut self.rng);
        let attacking = match attacker {
            Corner::Red => &self.red,
            Corner::Green => &self.green,
        };
        let action = select_action(attacking, &mut self.rng);

        match self.exchange(attacker, action, None) {
            Ok(outcome) => TickOutcome::Resolved(outcome),
            Err(e) => {
                tracing::debug!(error = %e, "tick exchange rejected");
                TickOutcome::Skipped(SkipReason::FighterDown)
            }
        }
    }

    /// Caller-driven attack in manual mode, rate-limited per fighter
    pub fn manual_attack(
        &mut self,
        attacker: Corner,
        action: ActionType,
        now: Timestamp,
    ) -> Result<ExchangeOutcome> {
        if self.state.mode != MatchMode::Manual {
            return Err(BoutError::WrongMode {
                operation: "throw a manual attack",
                mode: self.state.mode,
            });
        }
        if self.state.phase.is_live() {
            if let Some(winner) = knockout_winner(&self.red, &self.green) {
                self.finish_by_knockout(winner)?;
                return Err(BoutError::FighterDown {
                    fighter: winner.opponent(),
                });
            }
        }
        self.exchange(attacker, action, Some(now))
    }

    fn exchange(
        &mut self,
        attacker: Corner,
        action: ActionType,
        now: Option<Timestamp>,
    ) -> Result<ExchangeOutcome> {
        if self.state.phase.next(MatchTrigger::Exchange).is_none() {
            return Err(BoutError::IllegalTransition {
                operation: MatchTrigger::Exchange.as_str(),
                phase: self.state.phase,
            });
        }

        let (attacking, defending) = match attacker {
            Corner::Red => (&mut self.red, &mut self.green),
            Corner::Green => (&mut self.green, &mut self.red),
        };
        let outcome = resolve_exchange(attacking, defending, action, now, &mut self.rng)?;

        self.state.exchange_in_round += 1;
        self.total_exchanges += 1;
        self.emit(MatchEvent::ExchangeResolved {
            round: self.state.current_round,
            exchange: self.state.exchange_in_round,
            outcome: outcome.clone(),
        });

        if outcome.knockout {
            self.finish_by_knockout(outcome.attacker)?;
        } else if self.state.round_complete() {
            self.end_round()?;
        }
        Ok(outcome)
    }

    fn finish_by_knockout(&mut self, winner: Corner) -> Result<()> {
        self.transition(MatchTrigger::Knockout)?;
        self.finish(Verdict::Knockout { winner });
        Ok(())
    }

    /// Corner rest, then either wait for the next round or go to a decision
    fn end_round(&mut self) -> Result<()> {
        self.transition(MatchTrigger::RoundComplete)?;

        let recovered = RECOVERY_BASE + self.rng.int_inclusive(0, RECOVERY_JITTER);
        self.red.recover_endurance(recovered);
        self.green.recover_endurance(recovered);

        let round = self.state.current_round;
        tracing::info!(round, recovered, "Round ended");
        self.emit(MatchEvent::RoundEnded { round, recovered });

        if self.state.is_final_round() {
            self.transition(MatchTrigger::Decision)?;
            let verdict = decide(&self.red, &self.green, self.state.decision_rule);
            self.finish(verdict);
        }
        Ok(())
    }

    fn finish(&mut self, verdict: Verdict) {
        self.verdict = Some(verdict);
        tracing::info!(
            %verdict,
            round = self.state.current_round,
            exchanges = self.total_exchanges,
            "Match finished"
        );
        self.emit(MatchEvent::MatchFinished {
            verdict,
            red: self.red.tally(),
            green: self.green.tally(),
        });
    }

    pub fn start_next_round(&mut self) -> Result<()> {
        self.transition(MatchTrigger::NextRound)?;
        self.state.current_round += 1;
        self.state.exchange_in_round = 0;
        tracing::info!(round = self.state.current_round, "Round started");
        self.emit(MatchEvent::RoundStarted {
            round: self.state.current_round,
        });
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.transition(MatchTrigger::Pause)?;
        self.emit(MatchEvent::Paused {
            round: self.state.current_round,
            exchange: self.state.exchange_in_round,
        });
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.transition(MatchTrigger::Resume)?;
        self.emit(MatchEvent::Resumed {
            round: self.state.current_round,
            exchange: self.state.exchange_in_round,
        });
        Ok(())
    }

    /// Back to `Idle` from any phase
    ///
    /// `full_reset` rolls fresh attributes for both fighters; otherwise only
    /// bout state is restored.
    pub fn reset_match(&mut self, full_reset: bool) {
        self.state.phase = MatchPhase::Idle;
        self.state.current_round = 1;
        self.state.exchange_in_round = 0;
        self.verdict = None;
        self.total_exchanges = 0;

        if full_reset {
            let red_name = std::mem::take(&mut self.red.name);
            let green_name = std::mem::take(&mut self.green.name);
            self.red = Fighter::random(Corner::Red, &mut self.rng).with_name(red_name);
            self.green = Fighter::random(Corner::Green, &mut self.rng).with_name(green_name);
        } else {
            self.red.refresh();
            self.green.refresh();
        }

        tracing::info!(randomized = full_reset, "Match reset");
        self.emit(MatchEvent::MatchReset {
            randomized: full_reset,
        });
    }

    /// Play an automatic match to the end, calling each next round as soon
    /// as the previous one ends. Starts the match if it is idle.
    pub fn run_to_completion(&mut self) -> Result<BoutSummary> {
        if self.state.mode != MatchMode::Automatic {
            return Err(BoutError::WrongMode {
                operation: "run to completion",
                mode: self.state.mode,
            });
        }

        loop {
            match self.state.phase {
                MatchPhase::Idle => {
                    let config = self.current_config();
                    self.start_match(config)?;
                }
                MatchPhase::RoundInProgress { paused: true } => self.resume()?,
                MatchPhase::RoundInProgress { paused: false } => {
                    if let TickOutcome::Skipped(reason) = self.tick() {
                        tracing::debug!(?reason, "tick skipped");
                    }
                }
                MatchPhase::RoundEnded => self.start_next_round()?,
                MatchPhase::MatchFinished => break,
            }
        }

        self.summary().ok_or(BoutError::IllegalTransition {
            operation: "summarize",
            phase: self.state.phase,
        })
    }

    /// The config this engine is currently running with
    pub fn current_config(&self) -> MatchConfig {
        MatchConfig {
            rounds_total: self.state.rounds_total,
            exchanges_per_round: self.state.exchanges_per_round,
            mode: self.state.mode,
            decision_rule: self.state.decision_rule,
            tick_interval_ms: self.state.tick_interval_ms,
        }
    }
}
