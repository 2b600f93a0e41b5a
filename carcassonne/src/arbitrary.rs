use crate::{GridDirection, Regions, Tile};

/// A grid size plus a coordinate that may or may not be on that grid.
#[derive(Clone, Debug)]
pub struct GridInput {
    // Both at least 1
    pub width: usize,
    pub height: usize,
    pub x: i32,
    pub y: i32,
}

impl quickcheck::Arbitrary for GridInput {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let width = usize::from(u8::arbitrary(g) % 9) + 1;
        let height = usize::from(u8::arbitrary(g) % 9) + 1;
        // Reach up to two cells beyond each edge
        let x = i32::from(u8::arbitrary(g) % 14) - 2;
        let y = i32::from(u8::arbitrary(g) % 14) - 2;
        GridInput {
            width,
            height,
            x,
            y,
        }
    }
}

impl quickcheck::Arbitrary for GridDirection {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(GridDirection::neighbors()).unwrap()
    }
}

/// A tile whose edges/corners are grouped into connected regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestTile {
    pub id: u32,
    regions: Regions,
}

impl TestTile {
    pub fn new(id: u32, regions: &[&[GridDirection]]) -> Self {
        Self {
            id,
            regions: Regions(regions.iter().map(|region| region.to_vec()).collect()),
        }
    }
}

impl Tile for TestTile {
    fn is_connected(&self, from: GridDirection, to: GridDirection) -> bool {
        self.regions.is_connected(from, to)
    }
}
