//! The pig stays on the board.

use super::super::Board;
use super::Invariant;

/// Invariant: the pig's cell is inside the grid.
///
/// Escape happens on border cells, so the pig never needs to leave.
pub struct TokenInsideInvariant;

impl Invariant<Board> for TokenInsideInvariant {
    fn holds(board: &Board) -> bool {
        board.grid().is_inside(board.token())
    }

    fn description() -> &'static str {
        "The pig is on the board"
    }
}
