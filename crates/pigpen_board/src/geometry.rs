//! Hex grid geometry in the odd-row offset layout.
//!
//! Cells are addressed by `(col, row)`. Odd rows sit half a cell to the right
//! of even rows, so the six neighbor offsets depend on row parity. The two
//! offset tables are a property of the layout, not duplication.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// A single hex cell in offset coordinates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord {
    /// Column index.
    pub col: i32,
    /// Row index.
    pub row: i32,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns true for cells on an odd row.
    pub fn is_odd_row(self) -> bool {
        self.row.rem_euclid(2) == 1
    }

    /// Converts to axial `(q, r)` coordinates.
    ///
    /// Widened to `i64` so every `i32` cell converts without overflow.
    pub fn to_axial(self) -> (i64, i64) {
        let row = i64::from(self.row);
        let q = i64::from(self.col) - (row - row.rem_euclid(2)) / 2;
        (q, row)
    }

    /// Hex distance (number of steps) between two cells, saturating at
    /// `u32::MAX`.
    pub fn distance(self, other: Coord) -> u32 {
        let (q1, r1) = self.to_axial();
        let (q2, r2) = other.to_axial();
        let dq = q1 - q2;
        let dr = r1 - r2;
        let steps = (dq.unsigned_abs() + dr.unsigned_abs() + (dq + dr).unsigned_abs()) / 2;
        u32::try_from(steps).unwrap_or(u32::MAX)
    }

    /// Returns the cell one step away in the given direction.
    ///
    /// Saturates at the `i32` limits, which no valid board reaches.
    pub fn step(self, direction: Direction) -> Coord {
        let (dc, dr) = offsets_for_row(self.row)[direction as usize];
        self.offset(dc, dr)
    }

    /// Returns the six adjacent cells in [`Direction`] order.
    pub fn neighbors(self) -> [Coord; 6] {
        let offsets = offsets_for_row(self.row);
        (*offsets).map(|(dc, dr)| self.offset(dc, dr))
    }

    fn offset(self, dc: i32, dr: i32) -> Coord {
        Coord::new(self.col.saturating_add(dc), self.row.saturating_add(dr))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// The six hex directions, in the order neighbors are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum Direction {
    /// Same row, one column right.
    East,
    /// Row above, right-leaning.
    NorthEast,
    /// Row above, left-leaning.
    NorthWest,
    /// Same row, one column left.
    West,
    /// Row below, left-leaning.
    SouthWest,
    /// Row below, right-leaning.
    SouthEast,
}

impl Direction {
    /// The direction pointing back the way this one came.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::West => Direction::East,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    /// All directions in neighbor order.
    pub fn all() -> impl Iterator<Item = Direction> {
        Direction::iter()
    }
}

const EVEN_ROW_OFFSETS: [(i32, i32); 6] = [(1, 0), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)];

const ODD_ROW_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (1, 1)];

fn offsets_for_row(row: i32) -> &'static [(i32, i32); 6] {
    if row.rem_euclid(2) == 0 {
        &EVEN_ROW_OFFSETS
    } else {
        &ODD_ROW_OFFSETS
    }
}

/// Returns the six cells adjacent to `c`, inside the board or not.
pub fn neighbors(c: Coord) -> [Coord; 6] {
    c.neighbors()
}

/// Extent of the playable board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BoardShape {
    /// Inclusive column and row bounds.
    Rectangle {
        /// Smallest column.
        min_col: i32,
        /// Largest column.
        max_col: i32,
        /// Smallest row.
        min_row: i32,
        /// Largest row.
        max_row: i32,
    },
    /// Every cell within `radius` steps of `center`.
    Hexagon {
        /// Middle cell.
        center: Coord,
        /// Steps from the center to the edge.
        radius: u32,
    },
}

impl BoardShape {
    /// The 5 x 11 rectangle the game is usually played on.
    pub const fn standard() -> Self {
        BoardShape::Rectangle {
            min_col: 0,
            max_col: 4,
            min_row: 0,
            max_row: 10,
        }
    }

    /// Rectangle with columns `0..cols` and rows `0..rows`.
    pub const fn rectangle(cols: i32, rows: i32) -> Self {
        BoardShape::Rectangle {
            min_col: 0,
            max_col: cols - 1,
            min_row: 0,
            max_row: rows - 1,
        }
    }

    fn contains(&self, c: Coord) -> bool {
        match *self {
            BoardShape::Rectangle {
                min_col,
                max_col,
                min_row,
                max_row,
            } => (min_col..=max_col).contains(&c.col) && (min_row..=max_row).contains(&c.row),
            BoardShape::Hexagon { center, radius } => {
                let (rows, cols) = self.scan_window();
                rows.contains(&c.row) && cols.contains(&c.col) && c.distance(center) <= radius
            }
        }
    }

    fn on_edge(&self, c: Coord) -> bool {
        match *self {
            BoardShape::Rectangle {
                min_col,
                max_col,
                min_row,
                max_row,
            } => c.col == min_col || c.col == max_col || c.row == min_row || c.row == max_row,
            BoardShape::Hexagon { center, radius } => c.distance(center) == radius,
        }
    }

    /// Row-major scan window guaranteed to cover every inside cell.
    fn scan_window(&self) -> (std::ops::RangeInclusive<i32>, std::ops::RangeInclusive<i32>) {
        match *self {
            BoardShape::Rectangle {
                min_col,
                max_col,
                min_row,
                max_row,
            } => (min_row..=max_row, min_col..=max_col),
            BoardShape::Hexagon { center, radius } => {
                let r = i32::try_from(radius).unwrap_or(i32::MAX);
                let wide = r.saturating_add(1);
                (
                    center.row.saturating_sub(r)..=center.row.saturating_add(r),
                    center.col.saturating_sub(wide)..=center.col.saturating_add(wide),
                )
            }
        }
    }
}

impl Default for BoardShape {
    fn default() -> Self {
        Self::standard()
    }
}

/// Board geometry: shape plus the precomputed list of inside cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    shape: BoardShape,
    cells: Vec<Coord>,
}

impl Grid {
    /// Builds the grid for a shape.
    #[instrument]
    pub fn new(shape: BoardShape) -> Self {
        let (rows, cols) = shape.scan_window();
        let cells = rows
            .flat_map(|row| cols.clone().map(move |col| Coord::new(col, row)))
            .filter(|c| shape.contains(*c))
            .collect();
        Self { shape, cells }
    }

    /// Returns the shape.
    pub fn shape(&self) -> &BoardShape {
        &self.shape
    }

    /// True iff `c` is on the board.
    pub fn is_inside(&self, c: Coord) -> bool {
        self.shape.contains(c)
    }

    /// True iff `c` is on the board and on its outer edge.
    ///
    /// Border cells are the token's escape set.
    pub fn is_border(&self, c: Coord) -> bool {
        self.is_inside(c) && self.shape.on_edge(c)
    }

    /// The six neighbors of `c`, inside the board or not.
    pub fn neighbors(&self, c: Coord) -> [Coord; 6] {
        c.neighbors()
    }

    /// Neighbors of `c` that lie on the board.
    pub fn inside_neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        c.neighbors().into_iter().filter(|n| self.is_inside(*n))
    }

    /// True if some inside cell sits on the `i32` coordinate limits, where
    /// neighbor steps saturate.
    pub fn reaches_limits(&self) -> bool {
        let (rows, cols) = self.shape.scan_window();
        [*rows.start(), *rows.end(), *cols.start(), *cols.end()]
            .iter()
            .any(|v| *v == i32::MIN || *v == i32::MAX)
    }

    /// Every inside cell, row-major.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of inside cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(BoardShape::standard())
    }
}
