pub use direction::*;
pub use errors::*;
pub use grid::*;
pub use tile::*;

#[cfg(test)]
mod arbitrary;
mod direction;
mod errors;
mod grid;
mod tile;
