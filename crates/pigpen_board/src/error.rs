//! Error types for the board engine.

use super::{Coord, Phase};

/// Why a block placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// The cell is not on the board.
    #[display("Cell {} is outside the board", _0)]
    OutOfBounds(Coord),

    /// The cell already holds a block.
    #[display("Cell {} is already blocked", _0)]
    AlreadyBlocked(Coord),

    /// The pig is standing on the cell.
    #[display("Cell {} is occupied by the pig", _0)]
    OccupiedByToken(Coord),
}

impl IllegalMove {
    /// The cell the placement targeted.
    pub fn cell(&self) -> Coord {
        match *self {
            IllegalMove::OutOfBounds(c)
            | IllegalMove::AlreadyBlocked(c)
            | IllegalMove::OccupiedByToken(c) => c,
        }
    }
}

/// Error returned by game operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// The placement target is not a legal cell.
    #[display("Illegal move: {}", _0)]
    #[from]
    IllegalMove(IllegalMove),

    /// The advisor failed or had nothing usable to offer.
    #[display("Advice unavailable: {}", _0)]
    AdviceUnavailable(String),

    /// Another advice request is still outstanding.
    #[display("An advice request is already pending")]
    AdvisoryBusy,

    /// The action is not allowed in the current phase.
    #[display("Cannot {} during {}", action, phase)]
    InvalidStateTransition {
        /// What was attempted.
        action: &'static str,
        /// Phase at the time of the attempt.
        phase: Phase,
    },

    /// The board configuration does not describe a playable game.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// A postcondition failed after a mutation.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

impl GameError {
    /// Convenience constructor for rejected transitions.
    pub(crate) fn transition(action: &'static str, phase: Phase) -> Self {
        GameError::InvalidStateTransition { action, phase }
    }
}
