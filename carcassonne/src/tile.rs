use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::GridDirection;

/// A tile that can be placed on the [`Grid`](crate::Grid).
///
/// The grid only knows where tiles are. What a tile looks like is up to the
/// implementor, the one thing the grid needs to ask is how the terrain on the
/// tile is connected internally.
pub trait Tile {
    /// Does the terrain at edge/corner `from` continue to edge/corner `to`?
    ///
    /// For a straight road running left to right, `is_connected(Left, Right)`
    /// is true while `is_connected(Left, Top)` is false.
    fn is_connected(&self, from: GridDirection, to: GridDirection) -> bool;
}

impl<T: Tile + ?Sized> Tile for &T {
    fn is_connected(&self, from: GridDirection, to: GridDirection) -> bool {
        (**self).is_connected(from, to)
    }
}

impl<T: Tile + ?Sized> Tile for Box<T> {
    fn is_connected(&self, from: GridDirection, to: GridDirection) -> bool {
        (**self).is_connected(from, to)
    }
}

impl<T: Tile + ?Sized> Tile for Rc<T> {
    fn is_connected(&self, from: GridDirection, to: GridDirection) -> bool {
        (**self).is_connected(from, to)
    }
}

impl<T: Tile + ?Sized> Tile for Arc<T> {
    fn is_connected(&self, from: GridDirection, to: GridDirection) -> bool {
        (**self).is_connected(from, to)
    }
}

/// Edges and corners of a tile, grouped into regions of connected terrain.
///
/// Directions in the same region are connected to each other, directions that
/// appear in no region are connected to nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Regions(pub Vec<Vec<GridDirection>>);

impl Regions {
    /// All directions in all regions, in the order they are listed.
    pub fn directions(&self) -> impl Iterator<Item = GridDirection> + '_ {
        self.0.iter().flatten().copied()
    }
}

impl Tile for Regions {
    fn is_connected(&self, from: GridDirection, to: GridDirection) -> bool {
        self.0
            .iter()
            .any(|region| region.contains(&from) && region.contains(&to))
    }
}

/// Creates tiles from some kind of type tag.
///
/// [`Grid::new()`](crate::Grid::new) uses this once, for the foundation tile
/// in the middle of the grid. Closures of the form
/// `Fn(TileType) -> Result<T, E>` are factories too.
pub trait TileFactory<TileType> {
    type Tile: Tile;
    type Error: std::error::Error + Send + Sync + 'static;

    fn create(&self, tile_type: TileType) -> Result<Self::Tile, Self::Error>;
}

impl<TileType, F, T, E> TileFactory<TileType> for F
where
    F: Fn(TileType) -> Result<T, E>,
    T: Tile,
    E: std::error::Error + Send + Sync + 'static,
{
    type Tile = T;
    type Error = E;

    fn create(&self, tile_type: TileType) -> Result<T, E> {
        self(tile_type)
    }
}
