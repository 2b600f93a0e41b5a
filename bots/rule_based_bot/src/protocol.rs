use std::cmp::Ordering;

use carcassonne::{Grid, GridDirection, Regions, Tile};
use carcassonne_ai::{DrawStack, Move, MoveGenerator, Player};
use serde::{Deserialize, Serialize};

/// Request for the bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        width: usize,
        height: usize,
        /// Placed in the center of the grid.
        foundation: TileDescription,
    },
    /// A tile was placed on the grid by any player, including this one.
    ///
    /// The response should be a [`Response::Placed`].
    TilePlaced {
        x: i32,
        y: i32,
        tile: TileDescription,
    },
    /// Request to pick one of the candidate moves, or to pass.
    ///
    /// The response should be a [`Response::ChosenMove`].
    ChooseMove {
        /// The tiles the bot may place.
        tiles: Vec<TileDescription>,
        /// The legal, already valued moves for these tiles.
        moves: Vec<CandidateMove>,
        free_meeples: usize,
        stack_size: usize,
    },
    /// Request to discard one of the tiles.
    ///
    /// The response should be the discarded [`TileDescription`].
    ChooseTileToDrop { tiles: Vec<TileDescription> },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Okay(Okay),
    Placed {
        placed: bool,
    },
    ChosenMove {
        #[serde(rename = "move")]
        chosen: Option<CandidateMove>,
    },
    DroppedTile(TileDescription),
}

/// A tile, described by which of its edges and corners are connected.
///
/// Directions in the same region are connected to each other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDescription {
    pub name: String,
    #[serde(default)]
    pub regions: Regions,
}

impl Tile for TileDescription {
    fn is_connected(&self, from: GridDirection, to: GridDirection) -> bool {
        self.regions.is_connected(from, to)
    }
}

/// The error type for [`validate_tile()`].
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidTile {
    pub name: String,
    pub direction: GridDirection,
}

impl std::error::Error for InvalidTile {}

impl std::fmt::Display for InvalidTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tile '{}' lists the {} direction in more than one region",
            self.name, self.direction
        )
    }
}

/// Checks that no direction belongs to two regions of the tile.
///
/// This is the tile factory used for the foundation tile.
pub fn validate_tile(tile: TileDescription) -> Result<TileDescription, InvalidTile> {
    let mut seen = Vec::new();
    for direction in tile.regions.directions() {
        if seen.contains(&direction) {
            return Err(InvalidTile {
                name: tile.name,
                direction,
            });
        }
        seen.push(direction);
    }
    Ok(tile)
}

/// A legal move, valued by the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateMove {
    /// The name of the tile to place.
    pub tile: String,
    pub x: i32,
    pub y: i32,
    /// Where on the tile a meeple goes, if anywhere.
    #[serde(default)]
    pub meeple: Option<GridDirection>,
    pub value: f64,
    #[serde(default)]
    pub field_move: bool,
    /// Breaks ties between moves of equal value, higher is better.
    #[serde(default)]
    pub rank: i64,
}

impl Move for CandidateMove {
    fn value(&self) -> f64 {
        self.value
    }

    fn is_field_move(&self) -> bool {
        self.field_move
    }
}

pub fn compare_rank(a: &CandidateMove, b: &CandidateMove) -> Ordering {
    a.rank.cmp(&b.rank)
}

/// Serves the candidate moves of the current request.
#[derive(Clone, Debug, Default)]
pub struct CandidateMoves(pub Vec<CandidateMove>);

impl MoveGenerator<TileDescription, Seat> for CandidateMoves {
    type Move = CandidateMove;

    // Drops moves onto cells that are taken or outside of the grid.
    fn possible_moves(
        &self,
        tile: &TileDescription,
        _player: &Seat,
        grid: &Grid<TileDescription>,
    ) -> Vec<CandidateMove> {
        self.0
            .iter()
            .filter(|m| m.tile == tile.name && grid.is_free(m.x, m.y).unwrap_or(false))
            .cloned()
            .collect()
    }
}

/// The bot's own player.
pub struct Seat {
    pub free_meeples: usize,
}

impl Player for Seat {
    fn free_meeples(&self) -> usize {
        self.free_meeples
    }
}

pub struct TileStack {
    pub size: usize,
}

impl DrawStack for TileStack {
    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_requests() {
        let req: Request = serde_json::from_str(
            r#"{"type": "NewGame", "width": 5, "height": 5,
                "foundation": {"name": "D", "regions": [["top"], ["left", "right"]]}}"#,
        )
        .unwrap();
        match req {
            Request::NewGame { foundation, .. } => {
                assert!(foundation.is_connected(GridDirection::Left, GridDirection::Right));
                assert!(!foundation.is_connected(GridDirection::Left, GridDirection::Top));
            }
            other => panic!("Parsed as {:?}", other),
        }

        let req: Request = serde_json::from_str(
            r#"{"type": "ChooseMove", "tiles": [{"name": "E"}], "free_meeples": 1, "stack_size": 9,
                "moves": [{"tile": "E", "x": 1, "y": 2, "value": 3.5, "meeple": "top"}]}"#,
        )
        .unwrap();
        match req {
            Request::ChooseMove { moves, .. } => {
                assert_eq!(moves[0].meeple, Some(GridDirection::Top));
                assert!(!moves[0].field_move);
                assert_eq!(moves[0].rank, 0);
            }
            other => panic!("Parsed as {:?}", other),
        }
    }

    #[test]
    fn responses_are_flat() {
        let placed = serde_json::to_string(&Response::Placed { placed: true }).unwrap();
        assert_eq!(placed, r#"{"placed":true}"#);
        let pass = serde_json::to_string(&Response::ChosenMove { chosen: None }).unwrap();
        assert_eq!(pass, r#"{"move":null}"#);
    }

    #[test]
    fn rejects_direction_in_two_regions() {
        let tile = TileDescription {
            name: String::from("X"),
            regions: Regions(vec![
                vec![GridDirection::Top, GridDirection::Left],
                vec![GridDirection::Left],
            ]),
        };
        assert_eq!(
            validate_tile(tile),
            Err(InvalidTile {
                name: String::from("X"),
                direction: GridDirection::Left
            })
        );
    }
}
