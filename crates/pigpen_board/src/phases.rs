//! Turn phases and game results.

use serde::{Deserialize, Serialize};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The token reached a border cell.
    TokenEscaped,
    /// The token can no longer reach any border cell.
    TokenTrapped,
}

impl Outcome {
    /// Returns true if the blocking side won.
    pub fn blocker_won(&self) -> bool {
        matches!(self, Outcome::TokenTrapped)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::TokenEscaped => write!(f, "The pig escaped"),
            Outcome::TokenTrapped => write!(f, "The pig is trapped"),
        }
    }
}

/// Result of a termination check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Play continues.
    InProgress,
    /// The token reached a border cell.
    TokenEscaped,
    /// The token can no longer reach any border cell.
    TokenTrapped,
}

impl GameResult {
    /// Returns the outcome if the result is terminal.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameResult::InProgress => None,
            GameResult::TokenEscaped => Some(Outcome::TokenEscaped),
            GameResult::TokenTrapped => Some(Outcome::TokenTrapped),
        }
    }

    /// Returns true for any result other than `InProgress`.
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

impl From<Outcome> for GameResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::TokenEscaped => GameResult::TokenEscaped,
            Outcome::TokenTrapped => GameResult::TokenTrapped,
        }
    }
}

/// Whose turn it is, and how far into the opening the blocking side is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Opening placements; holds the number already made.
    OpeningBlock(u32),
    /// A single placement, then the token moves.
    MainBlock,
    /// The token moves next.
    TokenMove,
    /// Game over. Only a reset leaves this phase.
    Terminal(Outcome),
}

impl Phase {
    /// True when the blocking side may place a cell.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Phase::OpeningBlock(_) | Phase::MainBlock)
    }

    /// True once the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }

    /// Advisory label for blocking phases.
    pub fn tag(&self) -> Option<PhaseTag> {
        match self {
            Phase::OpeningBlock(_) => Some(PhaseTag::Opening),
            Phase::MainBlock => Some(PhaseTag::Main),
            Phase::TokenMove | Phase::Terminal(_) => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::OpeningBlock(n) => write!(f, "opening ({n} placed)"),
            Phase::MainBlock => write!(f, "blocking turn"),
            Phase::TokenMove => write!(f, "pig's turn"),
            Phase::Terminal(outcome) => write!(f, "game over: {outcome}"),
        }
    }
}

/// Phase label sent to move advisors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhaseTag {
    /// Still in the opening placements.
    Opening,
    /// Regular alternating play.
    Main,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_outcome_round_trip() {
        for outcome in [Outcome::TokenEscaped, Outcome::TokenTrapped] {
            assert_eq!(GameResult::from(outcome).outcome(), Some(outcome));
        }
        assert_eq!(GameResult::InProgress.outcome(), None);
    }

    #[test]
    fn test_phase_tags() {
        assert_eq!(Phase::OpeningBlock(2).tag(), Some(PhaseTag::Opening));
        assert_eq!(Phase::MainBlock.tag(), Some(PhaseTag::Main));
        assert_eq!(Phase::TokenMove.tag(), None);
        assert!(!Phase::Terminal(Outcome::TokenTrapped).is_blocking());
    }
}
