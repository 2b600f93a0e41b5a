use crate::{GridDirection, GridError, Tile, TileFactory};

/// The playing grid: a fixed-size table of cells, each empty or holding one tile.
///
/// A freshly created grid already contains the foundation tile in its center
/// cell. Tiles are added one at a time with [`Grid::place()`] and are never
/// removed or replaced.
///
/// Coordinates are signed so that callers can ask about cells beyond the edge.
/// `x` runs to the right, `y` runs downward.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    // In x-major order, i.e. indexed by [x * height + y].
    cells: Vec<Option<T>>,
    width: usize,
    height: usize,
}

impl<T: Tile> Grid<T> {
    /// Creates a grid of size `width` x `height` with a single tile of type
    /// `foundation_type` in the center.
    ///
    /// Fails if a dimension is zero or doesn't fit into an `i32`, if the cells
    /// can't be allocated, or if the factory fails to create the foundation tile.
    pub fn new<TileType, F>(
        width: usize,
        height: usize,
        foundation_type: TileType,
        factory: &F,
    ) -> Result<Self, GridError>
    where
        F: TileFactory<TileType, Tile = T>,
    {
        let invalid = GridError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || i32::try_from(width.max(height)).is_err() {
            return Err(invalid);
        }
        let Some(cell_count) = width.checked_mul(height) else {
            return Err(invalid);
        };
        let mut cells = Vec::new();
        if cells.try_reserve_exact(cell_count).is_err() {
            return Err(invalid);
        }
        cells.extend(std::iter::repeat_with(|| None).take(cell_count));

        let foundation = factory
            .create(foundation_type)
            .map_err(|err| GridError::FoundationTile(Box::new(err)))?;

        let mut grid = Self {
            cells,
            width,
            height,
        };
        let (center_x, center_y) = grid.center();
        grid.place(center_x, center_y, foundation)?;
        Ok(grid)
    }

    /// Tiles connected to the tile at `(x, y)` through its terrain at `from`.
    ///
    /// For every edge `to` other than `from` to which the tile's terrain at
    /// `from` continues, the tile lying beyond that edge is included, if there
    /// is one. This is the step with which a road, city or field is traced
    /// from one tile to the next.
    ///
    /// An empty cell at `(x, y)` has no connections.
    pub fn get_connected_tiles(
        &self,
        x: i32,
        y: i32,
        from: GridDirection,
    ) -> Result<Vec<&T>, GridError> {
        let idx = self.check_coordinates(x, y)?;
        let Some(tile) = &self.cells[idx] else {
            return Ok(Vec::new());
        };
        let mut connected = Vec::new();
        for &to in GridDirection::direct_neighbors() {
            if to != from && tile.is_connected(from, to) {
                if let Some(neighbour) = self.get_neighbour(x, y, to)? {
                    connected.push(neighbour);
                }
            }
        }
        Ok(connected)
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell the foundation tile is placed on.
    pub fn center(&self) -> (i32, i32) {
        // Dimensions were checked to fit into i32 on construction
        (
            (self.width as i32 - 1) / 2,
            (self.height as i32 - 1) / 2,
        )
    }

    pub fn is_on_grid(&self, x: i32, y: i32) -> bool {
        self.arr_idx(x, y).is_some()
    }

    pub fn is_free(&self, x: i32, y: i32) -> Result<bool, GridError> {
        let idx = self.check_coordinates(x, y)?;
        Ok(self.cells[idx].is_none())
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> Result<bool, GridError> {
        let idx = self.check_coordinates(x, y)?;
        Ok(self.cells[idx].is_some())
    }

    /// True if no cell of the grid is free.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The number of tiles on the grid, including the foundation tile.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Tries to place a tile at `(x, y)`.
    ///
    /// Returns `Ok(false)` without changing the grid if the cell is already
    /// occupied. The rejected tile is dropped.
    pub fn place(&mut self, x: i32, y: i32, tile: T) -> Result<bool, GridError> {
        let idx = self.check_coordinates(x, y)?;
        let cell = &mut self.cells[idx];
        if cell.is_some() {
            return Ok(false);
        }
        *cell = Some(tile);
        Ok(true)
    }

    /// The tile at `(x, y)`, or `None` if the cell is free.
    pub fn get_tile(&self, x: i32, y: i32) -> Result<Option<&T>, GridError> {
        let idx = self.check_coordinates(x, y)?;
        Ok(self.cells[idx].as_ref())
    }

    /// The coordinates of the cell next to `(x, y)` in `direction`, if that
    /// cell is on the grid.
    pub fn neighbour_coordinates(
        &self,
        x: i32,
        y: i32,
        direction: GridDirection,
    ) -> Option<(i32, i32)> {
        let (dx, dy) = direction.offset();
        let (new_x, new_y) = (x.checked_add(dx)?, y.checked_add(dy)?);
        self.is_on_grid(new_x, new_y).then_some((new_x, new_y))
    }

    /// The tile next to `(x, y)` in `direction`.
    ///
    /// Returns `Ok(None)` both when the neighboring cell is free and when it
    /// lies beyond the edge of the grid.
    pub fn get_neighbour(
        &self,
        x: i32,
        y: i32,
        direction: GridDirection,
    ) -> Result<Option<&T>, GridError> {
        self.check_coordinates(x, y)?;
        Ok(self
            .neighbour_coordinates(x, y, direction)
            .and_then(|(n_x, n_y)| self.arr_idx(n_x, n_y))
            .and_then(|idx| self.cells[idx].as_ref()))
    }

    /// All tiles around `(x, y)`, clockwise starting from the top.
    pub fn get_neighbors(&self, x: i32, y: i32) -> Result<Vec<&T>, GridError> {
        self.neighbours_in(x, y, GridDirection::neighbors())
    }

    /// The tiles above, right of, below and left of `(x, y)`, in that order.
    pub fn get_direct_neighbors(&self, x: i32, y: i32) -> Result<Vec<&T>, GridError> {
        self.neighbours_in(x, y, GridDirection::direct_neighbors())
    }

    /// Iterates over the occupied cells as `(x, y, tile)`, in x-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &T)> {
        let height = self.height;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.as_ref()
                .map(|tile| ((idx / height) as i32, (idx % height) as i32, tile))
        })
    }

    fn neighbours_in(
        &self,
        x: i32,
        y: i32,
        directions: &[GridDirection],
    ) -> Result<Vec<&T>, GridError> {
        let mut neighbours = Vec::with_capacity(directions.len());
        for &direction in directions {
            if let Some(tile) = self.get_neighbour(x, y, direction)? {
                neighbours.push(tile);
            }
        }
        Ok(neighbours)
    }

    // Internal helper function that rejects coordinates outside of the grid.
    fn check_coordinates(&self, x: i32, y: i32) -> Result<usize, GridError> {
        self.arr_idx(x, y).ok_or(GridError::OutOfBounds { x, y })
    }

    fn arr_idx(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(x * self.height + y)
    }
}
