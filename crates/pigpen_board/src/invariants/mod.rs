//! First-class invariants for the board.
//!
//! Invariants are logical properties that must hold throughout a game.
//! They are testable independently and document the engine's guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so sets compose by type alias.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        collect::<S, I3>(state, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod blocks_inside;
pub mod token_inside;
pub mod token_never_blocked;

pub use blocks_inside::BlocksInsideInvariant;
pub use token_inside::TokenInsideInvariant;
pub use token_never_blocked::TokenNeverBlockedInvariant;

/// All board invariants as a composable set.
pub type BoardInvariants = (
    TokenNeverBlockedInvariant,
    TokenInsideInvariant,
    BlocksInsideInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, BoardShape, Coord, Grid};
    use std::sync::Arc;

    fn board() -> Board {
        Board::new(Arc::new(Grid::new(BoardShape::rectangle(5, 5))), Coord::new(2, 2))
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_board() {
        assert!(BoardInvariants::check_all(&board()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut board = board();
        board.token = Coord::new(9, 9);
        board.blocked.insert(Coord::new(9, 9));
        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TokenOnly = (TokenNeverBlockedInvariant, TokenInsideInvariant);
        assert!(TokenOnly::check_all(&board()).is_ok());
    }
}
