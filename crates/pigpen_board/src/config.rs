//! Board configuration.

use super::{BoardShape, Coord, Grid};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Inclusive range for the number of random obstacles placed on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleRange {
    /// Fewest obstacles.
    pub min: u32,
    /// Most obstacles.
    pub max: u32,
}

impl ObstacleRange {
    /// Creates a range.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// The range as `(low, high)`, reordered if `min` exceeds `max`.
    pub fn bounds(&self) -> (u32, u32) {
        (self.min.min(self.max), self.min.max(self.max))
    }

    /// No obstacles at all.
    pub const fn none() -> Self {
        Self::new(0, 0)
    }
}

impl Default for ObstacleRange {
    fn default() -> Self {
        Self::new(5, 15)
    }
}

/// Static description of a game: board shape, start cell and opening rules.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Playable extent.
    shape: BoardShape,
    /// Where the pig starts.
    start: Coord,
    /// Placements the blocking side makes before the pig's first move.
    opening_blocks: u32,
    /// Random obstacles placed on reset.
    obstacles: ObstacleRange,
}

impl BoardConfig {
    /// Creates a configuration with the default opening and obstacle rules.
    #[instrument]
    pub fn new(shape: BoardShape, start: Coord) -> Self {
        Self {
            shape,
            start,
            ..Self::default()
        }
    }

    /// Replaces the obstacle range.
    pub fn with_obstacles(mut self, obstacles: ObstacleRange) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Replaces the number of opening placements.
    pub fn with_opening_blocks(mut self, opening_blocks: u32) -> Self {
        self.opening_blocks = opening_blocks;
        self
    }

    /// Checks that the configuration describes a playable board.
    #[instrument(skip(self), fields(start = %self.start))]
    pub fn validate(&self) -> Result<Grid, BoardConfigError> {
        let grid = Grid::new(self.shape);
        if grid.reaches_limits() {
            return Err(BoardConfigError::new(
                "Board reaches the coordinate limits".to_string(),
            ));
        }
        if !grid.is_inside(self.start) {
            return Err(BoardConfigError::new(format!(
                "Start cell {} is outside the board",
                self.start
            )));
        }
        if grid.is_border(self.start) {
            return Err(BoardConfigError::new(format!(
                "Start cell {} is on the border",
                self.start
            )));
        }
        if self.obstacles.min > self.obstacles.max {
            return Err(BoardConfigError::new(format!(
                "Obstacle range {}..={} is empty",
                self.obstacles.min, self.obstacles.max
            )));
        }
        let free_cells = grid.cell_count().saturating_sub(1);
        if self.obstacles.max as usize > free_cells {
            return Err(BoardConfigError::new(format!(
                "Up to {} obstacles requested but only {} cells are free",
                self.obstacles.max, free_cells
            )));
        }
        debug!(cells = grid.cell_count(), "Board config valid");
        Ok(grid)
    }
}

impl Default for BoardConfig {
    /// The 5 x 11 board with the pig in the middle.
    fn default() -> Self {
        Self {
            shape: BoardShape::standard(),
            start: Coord::new(2, 5),
            opening_blocks: 3,
            obstacles: ObstacleRange::default(),
        }
    }
}

/// Board configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Board config error: {} at {}:{}", message, file, line)]
pub struct BoardConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let grid = BoardConfig::default().validate().expect("default config");
        assert_eq!(grid.cell_count(), 55);
    }

    #[test]
    fn test_start_on_border_rejected() {
        let config = BoardConfig::new(BoardShape::standard(), Coord::new(0, 5));
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("border"));
    }

    #[test]
    fn test_start_outside_rejected() {
        let config = BoardConfig::new(BoardShape::standard(), Coord::new(9, 9));
        assert!(config.validate().unwrap_err().message.contains("outside"));
    }

    #[test]
    fn test_too_many_obstacles_rejected() {
        let config = BoardConfig::new(BoardShape::rectangle(3, 3), Coord::new(1, 1));
        // Default range asks for up to 15 obstacles on a 9-cell board.
        assert!(config.validate().is_err());
        let config = config.with_obstacles(ObstacleRange::new(0, 8));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parses_from_toml_shaped_json() {
        let config: BoardConfig = serde_json::from_str(
            r#"{"shape": {"kind": "hexagon", "center": {"col": 4, "row": 4}, "radius": 4},
                "start": {"col": 4, "row": 4}}"#,
        )
        .expect("parse");
        assert_eq!(*config.opening_blocks(), 3);
        assert!(config.validate().is_ok());
    }
}
