//! Blocks only ever sit on board cells.

use super::super::Board;
use super::Invariant;

/// Invariant: every blocked cell is inside the grid.
pub struct BlocksInsideInvariant;

impl Invariant<Board> for BlocksInsideInvariant {
    fn holds(board: &Board) -> bool {
        board.blocked().iter().all(|c| board.grid().is_inside(*c))
    }

    fn description() -> &'static str {
        "Every block is on the board"
    }
}
