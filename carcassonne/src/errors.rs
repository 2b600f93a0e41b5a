/// The error type for [`Grid`](crate::Grid) construction and coordinate-based queries.
#[derive(Debug)]
pub enum GridError {
    /// A grid needs at least one cell, and each dimension must fit into an `i32`.
    InvalidDimensions { width: usize, height: usize },
    /// The coordinates lie outside of `[0, width) x [0, height)`.
    OutOfBounds { x: i32, y: i32 },
    /// The tile factory could not create the foundation tile.
    FoundationTile(Box<dyn std::error::Error + Send + Sync>),
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::FoundationTile(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidDimensions { width, height } => write!(
                f,
                "Cannot create a grid of size {} x {}, both dimensions must be positive",
                width, height
            ),
            GridError::OutOfBounds { x, y } => {
                write!(f, "Tile coordinates ({}, {}) are out of the grid", x, y)
            }
            GridError::FoundationTile(_) => write!(f, "Could not create the foundation tile"),
        }
    }
}
