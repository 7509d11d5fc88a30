//! Auto-play: an advisor plays the blocking side against the pig.

use anyhow::Result;
use pigpen_advisor::SharedAdvisor;
use pigpen_board::{AdviceResolution, Coord, Game, GameError, Outcome, TokenStep};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from the orchestrator to whoever is watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Board text after a change.
    StateChanged(String),
    /// The advisor is working on a round.
    AdvisorThinking {
        /// Blocking round, starting at 1.
        round: u32,
    },
    /// The advisor's block was placed.
    BlockPlaced {
        /// The blocked cell.
        cell: Coord,
        /// The advisor's reasoning.
        rationale: Vec<String>,
    },
    /// The pig took its turn.
    PigMoved {
        /// Where it stood.
        from: Coord,
        /// What it did.
        step: TokenStep,
    },
    /// The advisor could not produce a usable block.
    AdviceFailed(String),
    /// Game ended.
    GameOver {
        /// How it ended.
        outcome: Outcome,
    },
}

/// Why an auto-play run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The game was decided.
    Finished(Outcome),
    /// An advice round failed.
    AdviceFailed(String),
    /// The round limit was reached first.
    RoundLimit,
}

/// Result of an auto-play run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSummary {
    /// Blocking rounds played.
    pub rounds: u32,
    /// Blocks the advisor placed.
    pub blocks_placed: u32,
    /// Why the run stopped.
    pub stopped: StopReason,
    /// Final board text.
    pub board: String,
}

impl AutoSummary {
    /// The outcome, if the game was decided.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.stopped {
            StopReason::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Drives one game with an advisor on the blocking side.
pub struct AutoPlayer {
    game: Game,
    advisor: SharedAdvisor,
    max_rounds: u32,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl AutoPlayer {
    /// Creates an orchestrator for `game`.
    pub fn new(
        game: Game,
        advisor: SharedAdvisor,
        max_rounds: u32,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            game,
            advisor,
            max_rounds,
            event_tx,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs advice, placement and pig turns until the game ends, an advice
    /// round fails or the round limit is hit.
    #[instrument(skip(self), fields(advisor = self.advisor.name(), max_rounds = self.max_rounds))]
    pub async fn run(&mut self) -> Result<AutoSummary> {
        info!("Starting auto-play");
        self.event_tx
            .send(GameEvent::StateChanged(self.game.board().display()))?;

        let mut rounds = 0;
        let mut applied = 0;

        let stopped = loop {
            if let Some(outcome) = self.game.check_termination().outcome() {
                self.event_tx.send(GameEvent::GameOver { outcome })?;
                break StopReason::Finished(outcome);
            }

            if self.game.is_blocking_turn() {
                if rounds >= self.max_rounds {
                    info!(rounds, "Round limit reached");
                    break StopReason::RoundLimit;
                }
                rounds += 1;
                self.event_tx.send(GameEvent::AdvisorThinking { round: rounds })?;

                match self.game.request_advice(self.advisor.as_ref()).await {
                    Ok(AdviceResolution::Applied {
                        cell, rationale, ..
                    }) => {
                        applied += 1;
                        self.event_tx.send(GameEvent::BlockPlaced { cell, rationale })?;
                    }
                    Ok(AdviceResolution::Discarded) => {
                        debug!("Advice discarded; asking again");
                        continue;
                    }
                    Err(GameError::AdviceUnavailable(message)) => {
                        warn!(%message, "Advice round failed");
                        self.event_tx.send(GameEvent::AdviceFailed(message.clone()))?;
                        break StopReason::AdviceFailed(message);
                    }
                    Err(e) => return Err(e.into()),
                }
            } else {
                let turn = self.game.token_turn()?;
                self.event_tx.send(GameEvent::PigMoved {
                    from: turn.from,
                    step: turn.step,
                })?;
            }

            self.event_tx
                .send(GameEvent::StateChanged(self.game.board().display()))?;
        };

        let summary = AutoSummary {
            rounds,
            blocks_placed: applied,
            stopped,
            board: self.game.board().display(),
        };
        info!(rounds, blocks = applied, stopped = ?summary.stopped, "Auto-play finished");
        Ok(summary)
    }
}
