use std::cmp::Ordering;

use carcassonne::{Grid, Tile};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::{AiError, DrawStack, Move, MoveComparator, MoveGenerator, Player, RuleSettings};

/// Picks moves by filtering out bad ones with a few fixed rules, and then
/// taking the most valuable of the rest.
///
/// Ties in value are broken by the comparator, remaining ties at random.
/// Use one instance per AI player.
pub struct RuleBasedAi<M, G, C, R = StdRng> {
    settings: RuleSettings,
    generator: G,
    comparator: C,
    rng: R,
    current_move: Option<M>,
}

impl<M, G, C> RuleBasedAi<M, G, C, StdRng> {
    pub fn from_seed(settings: RuleSettings, generator: G, comparator: C, seed: u64) -> Self {
        Self::new(settings, generator, comparator, StdRng::seed_from_u64(seed))
    }
}

impl<M, G, C, R> RuleBasedAi<M, G, C, R> {
    pub fn new(settings: RuleSettings, generator: G, comparator: C, rng: R) -> Self {
        Self {
            settings,
            generator,
            comparator,
            rng,
            current_move: None,
        }
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    /// Gives access to the move generator, e.g. to feed it new candidates.
    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// The result of the last call to [`Self::calculate_best_move_for()`].
    pub fn current_move(&self) -> Option<&M> {
        self.current_move.as_ref()
    }
}

impl<M, G, C, R> RuleBasedAi<M, G, C, R>
where
    M: Move + Clone + std::fmt::Debug,
    C: MoveComparator<M>,
    R: Rng,
{
    /// Choose the best move that places one of `tiles`.
    ///
    /// All legal moves for all tiles are considered, except
    /// 1. moves valued below the value threshold,
    /// 2. field moves, when the player is down to the last meeple and the
    ///    game is not about to end,
    /// 3. field moves valued below the field value threshold.
    ///
    /// Returns `None` if no move is left, which means the player passes.
    pub fn calculate_best_move_for<T, P, S>(
        &mut self,
        tiles: &[T],
        player: &P,
        grid: &Grid<T>,
        stack: &S,
    ) -> Option<M>
    where
        T: Tile,
        P: Player,
        S: DrawStack,
        G: MoveGenerator<T, P, Move = M>,
    {
        self.current_move = None;
        let possible_moves: Vec<M> = tiles
            .iter()
            .flat_map(|tile| self.generator.possible_moves(tile, player, grid))
            .collect();
        trace!("{} possible moves for {} tiles", possible_moves.len(), tiles.len());

        let considered_moves = self.filter_moves(possible_moves, player, stack);
        if !considered_moves.is_empty() {
            self.current_move = self.choose_best_move(considered_moves);
        }
        match &self.current_move {
            Some(chosen) => debug!("Chose move {:?}", chosen),
            None => debug!("No acceptable move, passing"),
        }
        self.current_move.clone()
    }

    fn filter_moves<P: Player, S: DrawStack>(
        &self,
        moves: Vec<M>,
        player: &P,
        stack: &S,
    ) -> Vec<M> {
        let settings = &self.settings;
        // Rule 1: Only consider moves with a positive value. NaN is never >= anything.
        let mut considered: Vec<M> = moves
            .into_iter()
            .filter(|it| it.value() >= settings.value_threshold)
            .collect();
        trace!("{} moves above the value threshold", considered.len());
        // Rule 2: Do not place the last meeple on a field
        if player.free_meeples() == 1 && stack.size() > settings.conservation_limit() {
            considered.retain(|it| !it.is_field_move());
            trace!("{} moves after keeping the last meeple off fields", considered.len());
        }
        // Rule 3: Do not place low value fields
        considered
            .retain(|it| !(it.is_field_move() && it.value() < settings.field_value_threshold));
        trace!("{} moves after removing low value fields", considered.len());
        considered
    }

    fn choose_best_move(&mut self, considered_moves: Vec<M>) -> Option<M> {
        let maximum_value = considered_moves
            .iter()
            .map(Move::value)
            .fold(f64::NEG_INFINITY, f64::max);
        let best_moves: Vec<M> = considered_moves
            .into_iter()
            .filter(|it| it.value() == maximum_value)
            .collect();

        let comparator = &self.comparator;
        let first = best_moves.iter().max_by(|a, b| comparator.compare(a, b))?;
        let top_ranked: Vec<&M> = best_moves
            .iter()
            .filter(|it| comparator.compare(it, first) == Ordering::Equal)
            .collect();
        trace!(
            "{} moves with value {}, {} of them ranked first",
            best_moves.len(),
            maximum_value,
            top_ranked.len()
        );
        // A comparator that doesn't rank `first` equal to itself leaves no ties
        let chosen = choose_random(&mut self.rng, &top_ranked).map_or(first, |&chosen| chosen);
        Some(chosen.clone())
    }
}

impl<M, G, C, R: Rng> RuleBasedAi<M, G, C, R> {
    /// Choose which of `tiles` to discard.
    ///
    /// For now this is a uniformly random choice.
    pub fn choose_tile_to_drop<'a, T>(&mut self, tiles: &'a [T]) -> Result<&'a T, AiError> {
        choose_random(&mut self.rng, tiles)
    }
}

/// Picks one of `elements` uniformly at random.
pub fn choose_random<'a, E, R: Rng + ?Sized>(
    rng: &mut R,
    elements: &'a [E],
) -> Result<&'a E, AiError> {
    elements.choose(rng).ok_or(AiError::EmptyCollection)
}
