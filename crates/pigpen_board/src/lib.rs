//! Pigpen board engine - trap-the-pig on an offset hex grid
//!
//! A pig starts in the middle of a hex board and runs for the border. The
//! blocking side places one block per turn and wins when no open route to the
//! border remains.
//!
//! # Architecture
//!
//! - **Geometry**: odd-row offset coordinates, board shapes, neighbor tables
//! - **Reachability**: breadth-first escape checks and shortest routes
//! - **Board**: blocked cells, the pig and placement contracts
//! - **Engine**: the turn state machine with its advisory port
//!
//! # Example
//!
//! ```
//! use pigpen_board::{BoardConfig, Coord, Game, ObstacleRange, Phase};
//!
//! # fn example() -> Result<(), pigpen_board::GameError> {
//! let config = BoardConfig::default().with_obstacles(ObstacleRange::none());
//! let mut game = Game::seeded(config, 42)?;
//!
//! game.place_block(Coord::new(3, 5))?;
//! game.place_block(Coord::new(3, 4))?;
//! game.place_block(Coord::new(3, 6))?;
//! assert_eq!(game.phase(), Phase::TokenMove);
//!
//! let turn = game.token_turn()?;
//! println!("pig moved {} -> {}", turn.from, turn.to());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod advisory;
mod board;
mod config;
mod engine;
mod error;
mod geometry;
mod phases;
mod pursuit;

// Public modules
pub mod contracts;
pub mod invariants;
pub mod reachability;

// Crate-level exports - Geometry
pub use geometry::{BoardShape, Coord, Direction, Grid, neighbors};

// Crate-level exports - Board state
pub use board::Board;
pub use config::{BoardConfig, BoardConfigError, ObstacleRange};

// Crate-level exports - Turn engine
pub use engine::{Game, TokenTurn};
pub use phases::{GameResult, Outcome, Phase, PhaseTag};
pub use pursuit::{TokenStep, select_step};

// Crate-level exports - Advisory port
pub use advisory::{
    Advice, AdviceQuery, AdviceResolution, AdviceTicket, Advisor, AdvisorError, PendingAdvice,
};

// Crate-level exports - Errors
pub use error::{GameError, IllegalMove};
