//! The turn engine: one game of trap-the-pig.
//!
//! Phase flow:
//!
//! ```text
//! OpeningBlock(0) -place-> OpeningBlock(1) -place-> ... -place-> TokenMove
//! TokenMove -token_turn-> MainBlock -place-> TokenMove -> ...
//! any placement or pig move -> Terminal(outcome) once the game is decided
//! Terminal -reset-> OpeningBlock(0)
//! ```

use super::advisory::{
    AdviceQuery, AdviceResolution, AdviceTicket, Advisor, AdvisorError, PendingAdvice, Advice,
};
use super::pursuit::{TokenStep, select_step};
use super::reachability::can_escape;
use super::{Board, BoardConfig, Coord, GameError, GameResult, Outcome, Phase, PhaseTag};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Record of one pig turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTurn {
    /// Where the pig stood.
    pub from: Coord,
    /// What it decided.
    pub step: TokenStep,
    /// Termination check after the move.
    pub result: GameResult,
}

impl TokenTurn {
    /// Where the pig stands now.
    pub fn to(&self) -> Coord {
        self.step.target().unwrap_or(self.from)
    }
}

/// A single game session.
///
/// Owns its board, phase and random source; games share nothing.
#[derive(Debug, Clone)]
pub struct Game {
    config: BoardConfig,
    board: Board,
    phase: Phase,
    rng: StdRng,
    pending: Option<AdviceTicket>,
    next_ticket: u64,
}

impl Game {
    /// Creates a game and scatters its first obstacle field.
    #[instrument(skip(config, rng))]
    pub fn new(config: BoardConfig, rng: StdRng) -> Result<Self, GameError> {
        let grid = config
            .validate()
            .map_err(|e| GameError::InvalidConfig(e.message))?;
        let board = Board::new(Arc::new(grid), *config.start());
        let mut game = Self {
            config,
            board,
            phase: Phase::OpeningBlock(0),
            rng,
            pending: None,
            next_ticket: 0,
        };
        game.reset();
        Ok(game)
    }

    /// Creates a game with a reproducible random source.
    pub fn seeded(config: BoardConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a game seeded from system entropy.
    pub fn from_entropy(config: BoardConfig) -> Result<Self, GameError> {
        Self::new(config, StdRng::from_entropy())
    }

    /// Creates a game on a fixed obstacle layout instead of a random one.
    ///
    /// Later resets scatter random obstacles as usual.
    #[instrument(skip(config, obstacles, rng))]
    pub fn with_obstacles(
        config: BoardConfig,
        obstacles: impl IntoIterator<Item = Coord>,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        let grid = config
            .validate()
            .map_err(|e| GameError::InvalidConfig(e.message))?;
        let board = Board::with_obstacles(Arc::new(grid), *config.start(), obstacles)?;
        Ok(Self {
            config,
            board,
            phase: Phase::OpeningBlock(0),
            rng,
            pending: None,
            next_ticket: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Starts over: fresh obstacles, pig on the start cell, opening phase.
    ///
    /// Any outstanding advice request is abandoned.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset(*self.config.obstacles(), &mut self.rng);
        self.phase = Phase::OpeningBlock(0);
        if let Some(ticket) = self.pending.take() {
            debug!(%ticket, "Reset abandons pending advice");
        }
        info!(blocked = self.board.blocked_count(), "Game reset");
    }

    /// Places a block for the blocking side.
    ///
    /// Legal only during a blocking turn. Runs the termination check, then
    /// either stays in the opening or hands the turn to the pig. Abandons any
    /// outstanding advice request.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn place_block(&mut self, c: Coord) -> Result<GameResult, GameError> {
        if !self.phase.is_blocking() {
            warn!("Placement outside a blocking turn");
            return Err(GameError::transition("place a block", self.phase));
        }

        self.board.place_block(c)?;

        if let Some(ticket) = self.pending.take() {
            debug!(%ticket, "Manual placement abandons pending advice");
        }

        let result = self.evaluate();
        match result.outcome() {
            Some(outcome) => self.finish(outcome),
            None => {
                let placed = self.board.blocks_placed();
                self.phase = if placed < *self.config.opening_blocks() {
                    Phase::OpeningBlock(placed)
                } else {
                    Phase::TokenMove
                };
            }
        }

        info!(cell = %c, ?result, next = %self.phase, "Block placed");
        Ok(result)
    }

    /// Moves the pig one step.
    ///
    /// Legal only in [`Phase::TokenMove`]. After the move the termination
    /// check runs and, if play continues, the blocking side moves next.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn token_turn(&mut self) -> Result<TokenTurn, GameError> {
        if self.phase != Phase::TokenMove {
            warn!("Pig turn requested out of turn");
            return Err(GameError::transition("move the pig", self.phase));
        }

        let from = self.board.token();
        let step = select_step(&self.board, &mut self.rng);
        if let Some(to) = step.target() {
            self.board.move_token(to);
        }

        #[cfg(debug_assertions)]
        super::contracts::check_board(&self.board)?;

        let result = self.evaluate();
        match result.outcome() {
            Some(outcome) => self.finish(outcome),
            None => self.phase = Phase::MainBlock,
        }

        info!(%from, to = %self.board.token(), ?result, "Pig moved");
        Ok(TokenTurn { from, step, result })
    }

    /// Runs the termination check and freezes the game if it is decided.
    ///
    /// Escape is checked before trap. Repeated calls without a mutation in
    /// between return the same result.
    #[instrument(skip(self))]
    pub fn check_termination(&mut self) -> GameResult {
        if let Phase::Terminal(outcome) = self.phase {
            return outcome.into();
        }
        let result = self.evaluate();
        if let Some(outcome) = result.outcome() {
            self.finish(outcome);
        }
        result
    }

    fn evaluate(&self) -> GameResult {
        let token = self.board.token();
        let grid = self.board.grid();
        if grid.is_border(token) {
            GameResult::TokenEscaped
        } else if !can_escape(grid, |c| self.board.is_blocked(c), token) {
            GameResult::TokenTrapped
        } else {
            GameResult::InProgress
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Terminal(outcome);
        self.pending = None;
        info!(%outcome, "Game over");
    }

    // ─────────────────────────────────────────────────────────────
    //  Advisory port
    // ─────────────────────────────────────────────────────────────

    /// Opens an advice request for the current blocking turn.
    ///
    /// Fails with [`GameError::AdvisoryBusy`] while another request is
    /// outstanding.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn begin_advice(&mut self) -> Result<PendingAdvice, GameError> {
        let Some(query) = self.advice_query() else {
            return Err(GameError::transition("request advice", self.phase));
        };
        if let Some(ticket) = self.pending {
            warn!(%ticket, "Advice already pending");
            return Err(GameError::AdvisoryBusy);
        }

        let ticket = AdviceTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        debug!(%ticket, "Advice requested");
        Ok(PendingAdvice { ticket, query })
    }

    /// Applies an advisor's answer to the request identified by `ticket`.
    ///
    /// Stale tickets are discarded without touching the game. Failures, empty
    /// answers and illegal suggestions all become
    /// [`GameError::AdviceUnavailable`]; the engine never picks a block of its
    /// own instead.
    #[instrument(skip(self, outcome))]
    pub fn resolve_advice(
        &mut self,
        ticket: AdviceTicket,
        outcome: Result<Advice, AdvisorError>,
    ) -> Result<AdviceResolution, GameError> {
        if self.pending != Some(ticket) {
            info!(%ticket, "Discarding stale advice");
            return Ok(AdviceResolution::Discarded);
        }
        self.pending = None;

        let advice = outcome.map_err(|e| GameError::AdviceUnavailable(e.message))?;
        let Some(cell) = advice.cell else {
            return Err(GameError::AdviceUnavailable(
                "advisor found no move".to_string(),
            ));
        };

        match self.place_block(cell) {
            Ok(result) => Ok(AdviceResolution::Applied {
                cell,
                rationale: advice.rationale,
                result,
            }),
            Err(e) => {
                warn!(%cell, error = %e, "Advisor suggested an unusable cell");
                Err(GameError::AdviceUnavailable(format!(
                    "advisor suggested {cell}: {e}"
                )))
            }
        }
    }

    /// Abandons the outstanding advice request, if any.
    pub fn cancel_advice(&mut self) -> Option<AdviceTicket> {
        self.pending.take()
    }

    /// Asks `advisor` for a block and applies it.
    #[instrument(skip(self, advisor), fields(advisor = advisor.name()))]
    pub async fn request_advice(
        &mut self,
        advisor: &dyn Advisor,
    ) -> Result<AdviceResolution, GameError> {
        let pending = self.begin_advice()?;
        let outcome = advisor.suggest(&pending.query).await;
        self.resolve_advice(pending.ticket, outcome)
    }

    /// The query an advisor would receive now, if it is a blocking turn.
    pub fn advice_query(&self) -> Option<AdviceQuery> {
        let phase = self.phase.tag()?;
        Some(AdviceQuery {
            token: self.board.token(),
            blocked: self.board.blocked().iter().copied().collect(),
            phase,
        })
    }

    /// True while an advice request is outstanding.
    pub fn advice_pending(&self) -> bool {
        self.pending.is_some()
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current result, without re-evaluating the board.
    pub fn result(&self) -> GameResult {
        match self.phase {
            Phase::Terminal(outcome) => outcome.into(),
            _ => GameResult::InProgress,
        }
    }

    /// True once the game is decided.
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// True when the blocking side may place.
    pub fn is_blocking_turn(&self) -> bool {
        self.phase.is_blocking()
    }

    /// Advisory label for the current phase.
    pub fn phase_tag(&self) -> Option<PhaseTag> {
        self.phase.tag()
    }

    /// Opening placements still to make.
    pub fn opening_remaining(&self) -> u32 {
        self.config
            .opening_blocks()
            .saturating_sub(self.board.blocks_placed())
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The pig's cell.
    pub fn token(&self) -> Coord {
        self.board.token()
    }

    /// Obstacles plus placements.
    pub fn blocked_count(&self) -> usize {
        self.board.blocked_count()
    }

    /// Placements by the blocking side since the last reset.
    pub fn blocks_placed(&self) -> u32 {
        self.board.blocks_placed()
    }

    /// The configuration this game was built from.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }
}
