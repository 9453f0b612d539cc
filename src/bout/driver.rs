//! Match driver: an actor task that owns the [`MatchEngine`]
//!
//! All mutation funnels through one task. Control calls arrive as commands
//! from [`MatchHandle`], the automatic tick source lives inside the task's
//! select loop, and notifications go out on a broadcast channel.

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::bout::engine::{MatchEngine, MatchSnapshot, TickOutcome};
use crate::bout::events::MatchEvent;
use crate::combat::action::ActionType;
use crate::combat::exchange::ExchangeOutcome;
use crate::core::config::MatchConfig;
use crate::core::dice::RandomSource;
use crate::core::error::{BoutError, Result};
use crate::core::types::{Corner, Timestamp};

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 256;

/// Commands accepted by the driver
pub enum Command {
    Start {
        config: MatchConfig,
        reply: oneshot::Sender<Result<()>>,
    },
    Pause {
        reply: oneshot::Sender<Result<()>>,
    },
    Resume {
        reply: oneshot::Sender<Result<()>>,
    },
    NextRound {
        reply: oneshot::Sender<Result<()>>,
    },
    Reset {
        full: bool,
        reply: oneshot::Sender<()>,
    },
    ManualAttack {
        corner: Corner,
        action: ActionType,
        at: Timestamp,
        reply: oneshot::Sender<Result<ExchangeOutcome>>,
    },
    Snapshot {
        reply: oneshot::Sender<MatchSnapshot>,
    },
}

pub struct MatchDriver<R> {
    engine: MatchEngine<R>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<MatchEvent>,
}

impl<R: RandomSource + Send + 'static> MatchDriver<R> {
    /// Move the engine into a background task and return a handle to it
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(engine: MatchEngine<R>) -> MatchHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

        let driver = Self {
            engine,
            command_rx,
            event_tx: event_tx.clone(),
        };
        tokio::spawn(driver.run());

        MatchHandle {
            command_tx,
            event_tx,
            epoch: Instant::now(),
        }
    }

    async fn run(mut self) {
        let mut ticker = self.fresh_ticker();
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if self.handle_command(cmd) {
                        ticker = self.fresh_ticker();
                    }
                }
                _ = ticker.tick(), if self.engine.wants_ticks() => {
                    if let TickOutcome::Skipped(reason) = self.engine.tick() {
                        debug!(?reason, "Tick skipped");
                    }
                }
                else => break,
            }
            self.publish();
        }
        debug!("Match driver stopped");
    }

    /// First tick lands one full period from now
    fn fresh_ticker(&self) -> Interval {
        let period = Duration::from_millis(self.engine.state().tick_interval_ms);
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    fn publish(&mut self) {
        for event in self.engine.drain_events() {
            // No subscribers is fine
            let _ = self.event_tx.send(event);
        }
    }

    /// Returns true when the tick schedule should restart
    fn handle_command(&mut self, cmd: Command) -> bool {
        let was_ticking = self.engine.wants_ticks();

        match cmd {
            Command::Start { config, reply } => {
                let result = self.engine.start_match(config);
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Pause { reply } => {
                let result = self.engine.pause();
                if reply.send(result).is_err() {
                    debug!("Pause reply channel closed (caller dropped)");
                }
            }
            Command::Resume { reply } => {
                let result = self.engine.resume();
                if reply.send(result).is_err() {
                    debug!("Resume reply channel closed (caller dropped)");
                }
            }
            Command::NextRound { reply } => {
                let result = self.engine.start_next_round();
                if reply.send(result).is_err() {
                    debug!("NextRound reply channel closed (caller dropped)");
                }
            }
            Command::Reset { full, reply } => {
                self.engine.reset_match(full);
                if reply.send(()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::ManualAttack {
                corner,
                action,
                at,
                reply,
            } => {
                let result = self.engine.manual_attack(corner, action, at);
                if reply.send(result).is_err() {
                    debug!("ManualAttack reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.engine.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }

        !was_ticking && self.engine.wants_ticks()
    }
}

/// Client-facing handle to a running match driver
#[derive(Clone)]
pub struct MatchHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<MatchEvent>,
    epoch: Instant,
}

impl MatchHandle {
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| BoutError::DriverClosed)?;
        reply_rx.await.map_err(|_| BoutError::DriverClosed)
    }

    pub async fn start_match(&self, config: MatchConfig) -> Result<()> {
        self.request(|reply| Command::Start { config, reply }).await?
    }

    pub async fn pause(&self) -> Result<()> {
        self.request(|reply| Command::Pause { reply }).await?
    }

    pub async fn resume(&self) -> Result<()> {
        self.request(|reply| Command::Resume { reply }).await?
    }

    pub async fn start_next_round(&self) -> Result<()> {
        self.request(|reply| Command::NextRound { reply }).await?
    }

    pub async fn reset_match(&self, full_reset: bool) -> Result<()> {
        self.request(|reply| Command::Reset {
            full: full_reset,
            reply,
        })
        .await
    }

    /// Manual attack stamped with milliseconds since this handle was created
    pub async fn manual_attack(
        &self,
        corner: Corner,
        action: ActionType,
    ) -> Result<ExchangeOutcome> {
        let at = self.epoch.elapsed().as_millis() as Timestamp;
        self.manual_attack_at(corner, action, at).await
    }

    /// Manual attack with a caller-supplied timestamp
    pub async fn manual_attack_at(
        &self,
        corner: Corner,
        action: ActionType,
        at: Timestamp,
    ) -> Result<ExchangeOutcome> {
        self.request(|reply| Command::ManualAttack {
            corner,
            action,
            at,
            reply,
        })
        .await?
    }

    pub async fn snapshot(&self) -> Result<MatchSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to match notifications from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.event_tx.subscribe()
    }
}

/// Next notification from a subscription, skipping over any the receiver
/// lagged past. `None` once the driver is gone.
pub async fn next_event(events: &mut broadcast::Receiver<MatchEvent>) -> Option<MatchEvent> {
    loop {
        match events.recv().await {
            Ok(event) => return Some(event),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "event subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}
