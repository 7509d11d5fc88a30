//! Contract-based validation for block placement.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}.

use super::invariants::{BoardInvariants, InvariantSet};
use super::{Board, Coord, GameError, IllegalMove};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the cell is on the board.
pub struct InBounds;

impl InBounds {
    /// Checks the precondition.
    pub fn check(c: Coord, board: &Board) -> Result<(), IllegalMove> {
        if board.grid().is_inside(c) {
            Ok(())
        } else {
            Err(IllegalMove::OutOfBounds(c))
        }
    }
}

/// Precondition: the cell is not blocked yet.
pub struct NotBlocked;

impl NotBlocked {
    /// Checks the precondition.
    pub fn check(c: Coord, board: &Board) -> Result<(), IllegalMove> {
        if board.is_blocked(c) {
            Err(IllegalMove::AlreadyBlocked(c))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the pig is not standing on the cell.
pub struct NotToken;

impl NotToken {
    /// Checks the precondition.
    pub fn check(c: Coord, board: &Board) -> Result<(), IllegalMove> {
        if board.token() == c {
            Err(IllegalMove::OccupiedByToken(c))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: a placement is legal if all three checks pass.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    #[instrument(skip(board))]
    pub fn check(c: Coord, board: &Board) -> Result<(), IllegalMove> {
        InBounds::check(c, board)?;
        NotBlocked::check(c, board)?;
        NotToken::check(c, board)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for block placement.
///
/// Preconditions:
/// - Cell is inside the board
/// - Cell is not blocked
/// - Cell is not under the pig
///
/// Postconditions:
/// - Blocked set only grew
/// - Board invariants hold
pub struct PlacementContract;

impl Contract<Board, Coord> for PlacementContract {
    fn pre(board: &Board, c: &Coord) -> Result<(), GameError> {
        LegalPlacement::check(*c, board).map_err(GameError::from)
    }

    fn post(before: &Board, after: &Board) -> Result<(), GameError> {
        if !before.blocked().is_subset(after.blocked()) {
            warn!("Blocked set shrank during placement");
            return Err(GameError::InvariantViolation(
                "Postcondition failed: blocked cells were removed".to_string(),
            ));
        }
        check_board(after)
    }
}

/// Checks every board invariant, folding violations into one error.
pub fn check_board(board: &Board) -> Result<(), GameError> {
    BoardInvariants::check_all(board).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}
