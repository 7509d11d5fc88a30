//! Board state: blocked cells, the pig's position and placement counters.

use super::contracts::{Contract, PlacementContract};
use super::{Coord, GameError, Grid, IllegalMove, ObstacleRange};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Mutable board state for one game.
///
/// Invariants:
/// - `blocked` never contains `token`
/// - every blocked cell and the token lie inside the grid
/// - `blocked` only grows until the game is reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) grid: Arc<Grid>,
    pub(crate) start: Coord,
    pub(crate) token: Coord,
    pub(crate) blocked: BTreeSet<Coord>,
    obstacle_count: u32,
    blocks_placed: u32,
}

impl Board {
    /// Creates an empty board with the pig on `start`.
    #[instrument(skip(grid))]
    pub fn new(grid: Arc<Grid>, start: Coord) -> Self {
        Self {
            grid,
            start,
            token: start,
            blocked: BTreeSet::new(),
            obstacle_count: 0,
            blocks_placed: 0,
        }
    }

    /// Creates a board with a fixed set of obstacles.
    ///
    /// Duplicates are ignored. Obstacles must be inside the board and off the
    /// start cell.
    #[instrument(skip(grid, obstacles))]
    pub fn with_obstacles(
        grid: Arc<Grid>,
        start: Coord,
        obstacles: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, GameError> {
        let mut board = Self::new(grid, start);
        for c in obstacles {
            if !board.grid.is_inside(c) {
                return Err(IllegalMove::OutOfBounds(c).into());
            }
            if c == start {
                return Err(IllegalMove::OccupiedByToken(c).into());
            }
            board.blocked.insert(c);
        }
        board.obstacle_count = board.blocked.len() as u32;
        Ok(board)
    }

    /// Clears all blocks, returns the pig to the start and scatters a fresh
    /// random obstacle field.
    #[instrument(skip(self, rng))]
    pub(crate) fn reset<R: Rng + ?Sized>(&mut self, obstacles: ObstacleRange, rng: &mut R) {
        self.blocked.clear();
        self.token = self.start;
        self.blocks_placed = 0;

        // Capped so the sampling loop always terminates.
        let free = self.grid.cell_count().saturating_sub(1) as u32;
        let (low, high) = obstacles.bounds();
        let count = rng.gen_range(low..=high).min(free);
        while (self.blocked.len() as u32) < count {
            let Some(&c) = self.grid.cells().choose(rng) else {
                break;
            };
            if c != self.start {
                self.blocked.insert(c);
            }
        }
        self.obstacle_count = count;
        info!(obstacles = count, "Board reset");
    }

    /// Places a block on `c`.
    ///
    /// Fails with [`GameError::IllegalMove`] if the cell is outside the board,
    /// already blocked or under the pig. The board is unchanged on failure.
    #[instrument(skip(self), fields(token = %self.token))]
    pub fn place_block(&mut self, c: Coord) -> Result<(), GameError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        PlacementContract::pre(self, &c)?;

        self.blocked.insert(c);
        self.blocks_placed += 1;
        debug!(cell = %c, placed = self.blocks_placed, "Block placed");

        #[cfg(debug_assertions)]
        PlacementContract::post(&before, self)?;

        Ok(())
    }

    /// Moves the pig. Callers guarantee the target is inside and unblocked.
    pub(crate) fn move_token(&mut self, to: Coord) {
        debug_assert!(self.grid.is_inside(to), "pig moved off the board");
        debug_assert!(!self.blocked.contains(&to), "pig moved onto a block");
        self.token = to;
    }

    /// True iff `c` holds a block.
    pub fn is_blocked(&self, c: Coord) -> bool {
        self.blocked.contains(&c)
    }

    /// True iff the pig could stand on `c`.
    pub fn is_open(&self, c: Coord) -> bool {
        self.grid.is_inside(c) && !self.is_blocked(c)
    }

    /// The pig's current cell.
    pub fn token(&self) -> Coord {
        self.token
    }

    /// The pig's starting cell.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Blocked cells in coordinate order.
    pub fn blocked(&self) -> &BTreeSet<Coord> {
        &self.blocked
    }

    /// Obstacles plus player placements.
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Blocks placed by the blocking side since the last reset.
    pub fn blocks_placed(&self) -> u32 {
        self.blocks_placed
    }

    /// Random obstacles scattered by the last reset.
    pub fn obstacle_count(&self) -> u32 {
        self.obstacle_count
    }

    /// Board geometry.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Formats the board as text.
    ///
    /// `P` is the pig, `#` a block, `o` a free border cell and `.` a free
    /// interior cell. Odd rows are indented to show the hex offset.
    pub fn display(&self) -> String {
        let cells = self.grid.cells();
        let (Some(min_col), Some(max_col)) = (
            cells.iter().map(|c| c.col).min(),
            cells.iter().map(|c| c.col).max(),
        ) else {
            return String::new();
        };
        let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
            return String::new();
        };

        let mut out = String::new();
        for row in first.row..=last.row {
            out.push_str(&format!("{row:>3} "));
            if row.rem_euclid(2) == 1 {
                out.push(' ');
            }
            for col in min_col..=max_col {
                let c = Coord::new(col, row);
                let symbol = if !self.grid.is_inside(c) {
                    ' '
                } else if c == self.token {
                    'P'
                } else if self.is_blocked(c) {
                    '#'
                } else if self.grid.is_border(c) {
                    'o'
                } else {
                    '.'
                };
                out.push(symbol);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
