//! Breadth-first reachability to the board's border.
//!
//! Every search takes the grid, a blocked-cell predicate and a start cell, so
//! callers can ask about hypothetical positions without touching a [`Board`].
//!
//! [`Board`]: crate::Board

use super::{Coord, Grid};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{instrument, trace};

/// Decides the order in which a cell's neighbors are explored.
///
/// Only the choice among equally short routes depends on it.
pub trait NeighborOrder {
    /// Rearranges `cells` in place.
    fn arrange(&mut self, cells: &mut [Coord]);
}

/// Explore neighbors in [`Direction`](crate::Direction) order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOrder;

impl NeighborOrder for ScanOrder {
    fn arrange(&mut self, _cells: &mut [Coord]) {}
}

/// Explore neighbors in a random order drawn from `R`.
#[derive(Debug)]
pub struct Shuffled<'a, R: ?Sized>(pub &'a mut R);

impl<R: Rng + ?Sized> NeighborOrder for Shuffled<'_, R> {
    fn arrange(&mut self, cells: &mut [Coord]) {
        cells.shuffle(&mut *self.0);
    }
}

/// True iff some border cell is reachable from `from` over open cells.
///
/// `from` itself counts, so a pig standing on the border can always escape.
#[instrument(level = "trace", skip_all, fields(from = %from))]
pub fn can_escape(grid: &Grid, is_blocked: impl Fn(Coord) -> bool, from: Coord) -> bool {
    let mut visited = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        if grid.is_border(current) {
            trace!(border = %current, visited = visited.len(), "Escape route exists");
            return true;
        }
        for n in current.neighbors() {
            if grid.is_inside(n) && !is_blocked(n) && visited.insert(n) {
                queue.push_back(n);
            }
        }
    }

    trace!(visited = visited.len(), "No escape route");
    false
}

/// Steps on the shortest route from `from` to any border cell.
///
/// Returns `Some(0)` when `from` is a border cell and `None` when trapped.
#[instrument(level = "trace", skip_all, fields(from = %from))]
pub fn escape_distance(grid: &Grid, is_blocked: impl Fn(Coord) -> bool, from: Coord) -> Option<u32> {
    let mut visited = HashSet::from([from]);
    let mut queue = VecDeque::from([(from, 0u32)]);

    while let Some((current, dist)) = queue.pop_front() {
        if grid.is_border(current) {
            return Some(dist);
        }
        for n in current.neighbors() {
            if grid.is_inside(n) && !is_blocked(n) && visited.insert(n) {
                queue.push_back((n, dist + 1));
            }
        }
    }

    None
}

/// Shortest route from `from` to the first border cell found.
///
/// The route excludes `from` and ends on the border cell; it is empty when
/// `from` is already on the border. `order` breaks ties between routes of the
/// same length.
#[instrument(level = "trace", skip_all, fields(from = %from))]
pub fn shortest_path(
    grid: &Grid,
    is_blocked: impl Fn(Coord) -> bool,
    from: Coord,
    order: &mut impl NeighborOrder,
) -> Option<Vec<Coord>> {
    let mut parents: HashMap<Coord, Coord> = HashMap::new();
    let mut visited = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        if grid.is_border(current) {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(&parent) = parents.get(&cursor) {
                path.push(parent);
                cursor = parent;
            }
            // path runs border -> from; drop `from` and flip.
            path.pop();
            path.reverse();
            trace!(length = path.len(), exit = %current, "Shortest route found");
            return Some(path);
        }

        let mut next = current.neighbors();
        order.arrange(&mut next);
        for n in next {
            if grid.is_inside(n) && !is_blocked(n) && visited.insert(n) {
                parents.insert(n, current);
                queue.push_back(n);
            }
        }
    }

    None
}

/// First step of a shortest route to the border.
///
/// `None` when no border cell is reachable, or when `from` is already on the
/// border and no step is needed.
pub fn shortest_path_first_step(
    grid: &Grid,
    is_blocked: impl Fn(Coord) -> bool,
    from: Coord,
    order: &mut impl NeighborOrder,
) -> Option<Coord> {
    shortest_path(grid, is_blocked, from, order).and_then(|path| path.first().copied())
}
