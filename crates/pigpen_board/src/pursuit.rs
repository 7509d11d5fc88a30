//! How the pig chooses its next cell.

use super::reachability::{Shuffled, shortest_path_first_step};
use super::{Board, Coord};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The pig's decision for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStep {
    /// First step of a shortest route to the border.
    Pursuit(Coord),
    /// No route exists; first open neighbor in direction order.
    Wander(Coord),
    /// Every neighbor is blocked or off the board.
    Stall,
}

impl TokenStep {
    /// The cell the pig moves to, if it moves.
    pub fn target(&self) -> Option<Coord> {
        match *self {
            TokenStep::Pursuit(c) | TokenStep::Wander(c) => Some(c),
            TokenStep::Stall => None,
        }
    }
}

/// Picks the pig's move: shortest route first, then any open neighbor,
/// otherwise stay put.
///
/// Ties between equally short routes are broken by shuffling each cell's
/// neighbors with `rng`.
#[instrument(skip(board, rng), fields(token = %board.token()))]
pub fn select_step<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> TokenStep {
    let token = board.token();
    let step = match shortest_path_first_step(
        board.grid(),
        |c| board.is_blocked(c),
        token,
        &mut Shuffled(rng),
    ) {
        Some(next) => TokenStep::Pursuit(next),
        None => token
            .neighbors()
            .into_iter()
            .find(|n| board.is_open(*n))
            .map_or(TokenStep::Stall, TokenStep::Wander),
    };
    debug!(?step, "Pig chose step");
    step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardShape, Grid};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    #[test]
    fn test_pursuit_when_route_exists() {
        let board = Board::new(Arc::new(Grid::new(BoardShape::rectangle(3, 3))), Coord::new(1, 1));
        let step = select_step(&board, &mut StdRng::seed_from_u64(1));
        assert!(matches!(step, TokenStep::Pursuit(c) if board.grid().is_border(c)));
    }

    #[test]
    fn test_wander_inside_sealed_region() {
        // Pocket of two interior cells, (2, 4) and (2, 5), sealed from the border.
        let grid = Arc::new(Grid::default());
        let pig = Coord::new(2, 5);
        let pocket = [pig, Coord::new(2, 4)];
        let walls: Vec<_> = pocket
            .iter()
            .flat_map(|c| c.neighbors())
            .filter(|n| !pocket.contains(n))
            .collect();
        let board = Board::with_obstacles(grid, pig, walls).expect("valid");
        let step = select_step(&board, &mut StdRng::seed_from_u64(1));
        assert_eq!(step, TokenStep::Wander(Coord::new(2, 4)));
    }

    #[test]
    fn test_stall_when_surrounded() {
        let grid = Arc::new(Grid::default());
        let pig = Coord::new(2, 5);
        let board = Board::with_obstacles(grid, pig, pig.neighbors()).expect("valid");
        let step = select_step(&board, &mut StdRng::seed_from_u64(1));
        assert_eq!(step, TokenStep::Stall);
        assert_eq!(step.target(), None);
    }
}
