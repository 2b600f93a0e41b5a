use serde::{Deserialize, Serialize};

/// One of the eight compass directions around a cell.
///
/// Directions serve two purposes: looking up the neighboring cell on the
/// [grid](crate::Grid), and naming the edges and corners of a single tile
/// when asking it about its internal connectivity (see [`Tile`](crate::Tile)).
///
/// The grid's y axis grows downward, so [`GridDirection::Top`] decreases y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GridDirection {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

use GridDirection::*;

/// All directions, clockwise starting from the top.
static NEIGHBORS: [GridDirection; 8] = [
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
];

/// The four edges, clockwise starting from the top.
static DIRECT_NEIGHBORS: [GridDirection; 4] = [Top, Right, Bottom, Left];

impl GridDirection {
    /// All eight directions in canonical order.
    pub fn neighbors() -> &'static [GridDirection; 8] {
        &NEIGHBORS
    }

    /// The four cardinal directions in canonical order.
    pub fn direct_neighbors() -> &'static [GridDirection; 4] {
        &DIRECT_NEIGHBORS
    }

    /// The `(dx, dy)` step to the neighboring cell in this direction.
    pub fn offset(self) -> (i32, i32) {
        let dx = match self {
            TopRight | Right | BottomRight => 1,
            TopLeft | Left | BottomLeft => -1,
            Top | Bottom => 0,
        };
        let dy = match self {
            BottomLeft | Bottom | BottomRight => 1,
            TopLeft | Top | TopRight => -1,
            Left | Right => 0,
        };
        (dx, dy)
    }

    /// The direction pointing the other way, e.g. `Left` for `Right`.
    pub fn opposite(self) -> GridDirection {
        NEIGHBORS[(self as usize + 4) % 8]
    }

    /// Is this one of the four cardinal directions?
    pub fn is_direct(self) -> bool {
        matches!(self, Top | Right | Bottom | Left)
    }
}

impl std::fmt::Display for GridDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Top => "top",
            TopRight => "top-right",
            Right => "right",
            BottomRight => "bottom-right",
            Bottom => "bottom",
            BottomLeft => "bottom-left",
            Left => "left",
            TopLeft => "top-left",
        };
        write!(f, "{}", name)
    }
}
