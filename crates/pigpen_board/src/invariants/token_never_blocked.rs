//! The pig never stands on a blocked cell.

use super::super::Board;
use super::Invariant;

/// Invariant: the blocked set never contains the pig's cell.
pub struct TokenNeverBlockedInvariant;

impl Invariant<Board> for TokenNeverBlockedInvariant {
    fn holds(board: &Board) -> bool {
        !board.is_blocked(board.token())
    }

    fn description() -> &'static str {
        "The pig's cell is never blocked"
    }
}
