//! Two-ply lookahead advisor.
//!
//! For each candidate block near the pig, place it, let the pig take its
//! deterministic best step, and score the escape distance left over.

use async_trait::async_trait;
use pigpen_board::reachability::{
    ScanOrder, can_escape, escape_distance, shortest_path_first_step,
};
use pigpen_board::{Advice, AdviceQuery, Advisor, AdvisorError, Coord, Grid};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Score of a block that lets the pig reach the border on its next step.
const ESCAPES_NEXT: i64 = -100;
/// Score of a block that leaves the pig sealed in after its step.
const SEALED_AFTER_STEP: i64 = 100;

/// Advisor that searches one block and one pig step ahead.
#[derive(Debug, Clone)]
pub struct LookaheadAdvisor {
    grid: Arc<Grid>,
}

impl LookaheadAdvisor {
    /// Creates an advisor for boards shaped like `grid`.
    pub fn new(grid: Arc<Grid>) -> Self {
        Self { grid }
    }

    /// The board geometry the advisor plays on.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Picks a block for the queried position.
    ///
    /// Fails if the pig is off the board. Walls off the board or under the
    /// pig are ignored.
    #[instrument(skip(self, query), fields(token = %query.token, blocked = query.blocked.len()))]
    pub fn advise(&self, query: &AdviceQuery) -> Result<Advice, AdvisorError> {
        let grid = self.grid.as_ref();
        let token = query.token;
        if !grid.is_inside(token) {
            return Err(AdvisorError::new(format!(
                "Pig position {token} is off the board"
            )));
        }
        let walls: BTreeSet<Coord> = query
            .blocked
            .iter()
            .copied()
            .filter(|c| grid.is_inside(*c) && *c != token)
            .collect();
        if walls.len() < query.blocked.len() {
            debug!(
                dropped = query.blocked.len() - walls.len(),
                "Ignoring walls off the board or under the pig"
            );
        }
        let open = |c: Coord| grid.is_inside(c) && !walls.contains(&c);
        let mut thoughts = Vec::new();

        match escape_distance(grid, |c| walls.contains(&c), token) {
            None => {
                thoughts.push("Current escape distance: trapped".to_string());
                thoughts.push("Pig is already trapped".to_string());
                return Ok(Advice::nothing(thoughts));
            }
            Some(0) => {
                thoughts.push("Current escape distance: 0".to_string());
                thoughts.push("Pig is already at an escape, too late to block".to_string());
                return Ok(Advice::nothing(thoughts));
            }
            Some(d) => thoughts.push(format!("Current escape distance: {d}")),
        }

        let ring: Vec<Coord> = token.neighbors().into_iter().filter(|n| open(*n)).collect();
        let mut candidates: BTreeSet<Coord> = ring.iter().copied().collect();
        for n in &ring {
            candidates.extend(n.neighbors().into_iter().filter(|m| open(*m) && *m != token));
        }
        thoughts.push(format!(
            "Evaluating {} candidate blocks with lookahead",
            candidates.len()
        ));

        let mut best: Option<(Coord, i64)> = None;
        for cell in candidates {
            let blocked = |c: Coord| c == cell || walls.contains(&c);

            if !can_escape(grid, blocked, token) {
                thoughts.push(format!("Blocking {cell} traps the pig"));
                info!(%cell, "Found trapping block");
                return Ok(Advice::suggest(cell, thoughts));
            }

            let score = match shortest_path_first_step(grid, blocked, token, &mut ScanOrder) {
                Some(step) if grid.is_border(step) => ESCAPES_NEXT,
                Some(step) => escape_distance(grid, blocked, step)
                    .map_or(SEALED_AFTER_STEP, i64::from),
                None => SEALED_AFTER_STEP,
            };
            debug!(%cell, score, "Scored candidate");

            if best.is_none_or(|(_, top)| score > top) {
                best = Some((cell, score));
            }
        }

        if let Some((cell, score)) = best {
            thoughts.push(match score {
                SEALED_AFTER_STEP => format!("Best block: {cell}, seals the pig after its step"),
                s if s > 0 => format!("Best block: {cell}, escape distance after pig moves: {s}"),
                _ => format!("Best defensive block: {cell}"),
            });
            info!(%cell, score, "Chose block");
            return Ok(Advice::suggest(cell, thoughts));
        }

        // Only reachable when no candidate exists at all.
        Ok(match ring.first() {
            Some(&cell) => {
                thoughts.push(format!("Fallback: blocking neighbor {cell}"));
                Advice::suggest(cell, thoughts)
            }
            None => {
                thoughts.push("No valid moves available".to_string());
                Advice::nothing(thoughts)
            }
        })
    }
}

#[async_trait]
impl Advisor for LookaheadAdvisor {
    async fn suggest(&self, query: &AdviceQuery) -> Result<Advice, AdvisorError> {
        self.advise(query)
    }

    fn name(&self) -> &str {
        "lookahead"
    }
}
