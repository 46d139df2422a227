use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// Picks the loneliest apple: among apples with the fewest apple neighbors, one uniformly at
/// random.
///
/// Flagging this tile for free keeps the first chain reveal small.
pub fn find_orphaned_apple(grid: &Grid, rng: &mut SmallRng) -> Result<Coord2> {
    let candidates = loneliest_apples(grid);
    if candidates.is_empty() {
        return Err(GameError::NoApplesPlaced);
    }
    Ok(candidates[rng.random_range(0..candidates.len())])
}

/// Apples tied for the minimum apple-neighbor count, in row-major order.
pub fn loneliest_apples(grid: &Grid) -> Vec<Coord2> {
    let mut best = Vec::new();
    let mut best_count = u8::MAX;

    for coords in grid.apple_tiles() {
        let count = grid.adjacent_apple_count(coords);
        if count < best_count {
            best.clear();
            best_count = count;
        }
        if count == best_count {
            best.push(coords);
        }
    }

    best
}
