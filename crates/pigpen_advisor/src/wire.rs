//! JSON wire format of the `/api/move` advisory endpoint.
//!
//! Cells travel as `{"q": col, "r": row}`. A response without a move carries
//! `"error": "No valid moves"` and is sent with status 500.

use derive_more::Display;
use pigpen_board::{Advice, AdviceQuery, Coord, PhaseTag};
use serde::{Deserialize, Serialize};

/// Error text sent when the advisor has no move.
pub const NO_VALID_MOVES: &str = "No valid moves";

/// A cell on the wire: `q` is the column, `r` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("({}, {})", q, r)]
pub struct WireCell {
    /// Column.
    pub q: i32,
    /// Row.
    pub r: i32,
}

impl From<Coord> for WireCell {
    fn from(c: Coord) -> Self {
        Self { q: c.col, r: c.row }
    }
}

impl From<WireCell> for Coord {
    fn from(w: WireCell) -> Self {
        Coord::new(w.q, w.r)
    }
}

/// Body of `POST /api/move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// The pig's cell.
    pub pig_pos: WireCell,
    /// Every blocked cell.
    #[serde(default)]
    pub walls: Vec<WireCell>,
    /// `"OPENING"` or `"MAIN"`.
    pub phase: PhaseTag,
}

impl From<&AdviceQuery> for MoveRequest {
    fn from(query: &AdviceQuery) -> Self {
        Self {
            pig_pos: query.token.into(),
            walls: query.blocked.iter().copied().map(WireCell::from).collect(),
            phase: query.phase,
        }
    }
}

impl From<MoveRequest> for AdviceQuery {
    fn from(request: MoveRequest) -> Self {
        let mut blocked: Vec<Coord> = request.walls.into_iter().map(Coord::from).collect();
        blocked.sort();
        blocked.dedup();
        Self {
            token: request.pig_pos.into(),
            blocked,
            phase: request.phase,
        }
    }
}

/// Body of the `/api/move` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Suggested cell to block.
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<WireCell>,
    /// The advisor's reasoning, in order.
    #[serde(default)]
    pub thoughts: Vec<String>,
    /// Present when there is no move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoveResponse {
    /// True when the response carries a move.
    pub fn has_move(&self) -> bool {
        self.cell.is_some()
    }
}

impl From<Advice> for MoveResponse {
    fn from(advice: Advice) -> Self {
        let error = advice.cell.is_none().then(|| NO_VALID_MOVES.to_string());
        Self {
            cell: advice.cell.map(WireCell::from),
            thoughts: advice.rationale,
            error,
        }
    }
}

impl From<MoveResponse> for Advice {
    fn from(response: MoveResponse) -> Self {
        Self {
            cell: response.cell.map(Coord::from),
            rationale: response.thoughts,
        }
    }
}
