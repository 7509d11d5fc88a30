//! Move advisory port: the boundary to whatever suggests blocking moves.
//!
//! The engine hands out a ticketed [`AdviceQuery`], the caller awaits an
//! [`Advisor`], and the answer comes back through
//! [`Game::resolve_advice`](crate::Game::resolve_advice). Tickets let the
//! engine discard answers that arrive after the position has moved on.

use super::{Coord, GameResult, PhaseTag};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

/// Snapshot of the position an advisor is asked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceQuery {
    /// The pig's cell.
    pub token: Coord,
    /// Every blocked cell, in coordinate order.
    pub blocked: Vec<Coord>,
    /// Opening or main phase.
    pub phase: PhaseTag,
}

/// An advisor's answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    /// Suggested cell to block, if the advisor found one.
    pub cell: Option<Coord>,
    /// Human-readable reasoning, in order.
    pub rationale: Vec<String>,
}

impl Advice {
    /// Advice suggesting `cell`.
    pub fn suggest(cell: Coord, rationale: Vec<String>) -> Self {
        Self {
            cell: Some(cell),
            rationale,
        }
    }

    /// Advice with no move.
    pub fn nothing(rationale: Vec<String>) -> Self {
        Self {
            cell: None,
            rationale,
        }
    }
}

/// Something that suggests blocking moves.
///
/// Implementations apply their own timeouts; the engine maps every failure to
/// [`GameError::AdviceUnavailable`](crate::GameError::AdviceUnavailable).
#[async_trait::async_trait]
pub trait Advisor: Send + Sync {
    /// Suggests a cell to block in the queried position.
    async fn suggest(&self, query: &AdviceQuery) -> Result<Advice, AdvisorError>;

    /// Returns the advisor's display name.
    fn name(&self) -> &str;
}

/// Identifies one outstanding advice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("advice#{}", _0)]
pub struct AdviceTicket(pub(crate) u64);

/// A request handed out by [`Game::begin_advice`](crate::Game::begin_advice).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAdvice {
    /// Ticket to pass back with the answer.
    pub ticket: AdviceTicket,
    /// What to ask the advisor.
    pub query: AdviceQuery,
}

/// What happened to an advisor's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceResolution {
    /// The suggested block was placed.
    Applied {
        /// The cell that was blocked.
        cell: Coord,
        /// The advisor's reasoning.
        rationale: Vec<String>,
        /// Termination check after the placement.
        result: GameResult,
    },
    /// The request was abandoned before the answer arrived; nothing changed.
    Discarded,
}

/// Advisor failure: transport, timeout or malformed response.
#[derive(Debug, Clone, Display, Error)]
#[display("Advisor error: {} at {}:{}", message, file, line)]
pub struct AdvisorError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AdvisorError {
    /// Creates a new advisor error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Advisor error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
