use std::cmp::Ordering;

use carcassonne::{Grid, Tile};

/// A candidate action for a player, valued by whoever generated it.
pub trait Move {
    /// How good the move is. Negative values mean the move is harmful.
    fn value(&self) -> f64;

    /// Does this move put a meeple on a field?
    fn is_field_move(&self) -> bool;
}

/// A total order used to break ties between moves of equal value.
///
/// Greater means better. Any `Fn(&M, &M) -> Ordering` closure is a comparator.
pub trait MoveComparator<M> {
    fn compare(&self, a: &M, b: &M) -> Ordering;
}

impl<M, F> MoveComparator<M> for F
where
    F: Fn(&M, &M) -> Ordering,
{
    fn compare(&self, a: &M, b: &M) -> Ordering {
        self(a, b)
    }
}

/// Lists every legal move for placing one tile.
pub trait MoveGenerator<T: Tile, P: Player> {
    type Move: Move;

    fn possible_moves(&self, tile: &T, player: &P, grid: &Grid<T>) -> Vec<Self::Move>;
}

/// The parts of a player's state that move selection cares about.
pub trait Player {
    /// Meeples that are not placed on the board yet.
    fn free_meeples(&self) -> usize;
}

/// The pile of tiles that are yet to be drawn.
pub trait DrawStack {
    fn size(&self) -> usize;
}
