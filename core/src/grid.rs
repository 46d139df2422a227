use core::ops::Index;

use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square arena owning every tile of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Array2<Tile>,
    apple_count: CellCount,
}

impl Grid {
    /// Samples every tile independently with `config.apple_chance()`.
    ///
    /// When sampling leaves the board empty a single apple is forced onto a random tile, so a
    /// built grid always has at least one apple.
    pub fn generate(config: GameConfig, rng: &mut SmallRng) -> Result<Self> {
        if config.size == 0 {
            return Err(GameError::InvalidBoardSize);
        }

        let chance = config.apple_chance();
        log::debug!("Apple chance: {}", chance);

        let size = (config.size, config.size);
        let mut tiles: Array2<Tile> = Array2::from_shape_simple_fn(size.to_nd_index(), || {
            Tile::with_apple(rng.random_bool(chance))
        });
        let mut apple_count = count_apples(&tiles);

        if apple_count == 0 {
            let forced = (rng.random_range(0..config.size), rng.random_range(0..config.size));
            log::warn!("No apples sampled, forcing one at {:?}", forced);
            tiles[forced.to_nd_index()] = Tile::with_apple(true);
            apple_count = 1;
        }

        Ok(Self { tiles, apple_count })
    }

    /// Builds a grid with apples exactly at `apple_coords`.
    pub fn from_apple_coords(size: Coord, apple_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidBoardSize);
        }

        let mut tiles: Array2<Tile> = Array2::default((size, size).to_nd_index());
        for &coords in apple_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            tiles[coords.to_nd_index()] = Tile::with_apple(true);
        }

        let apple_count = count_apples(&tiles);
        Ok(Self { tiles, apple_count })
    }

    pub fn size(&self) -> Coord {
        let (dim, _) = self.tiles.dim();
        // only constructed from a Coord side length
        dim as Coord
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn tile(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn apple_count(&self) -> CellCount {
        self.apple_count
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size();
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    pub fn apple_tiles(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords().filter(|&coords| self[coords].has_apple())
    }

    pub fn flagged_tiles(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords().filter(|&coords| self[coords].is_flagged())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    /// Apples among the up to eight bounded neighbors of `coords`.
    pub fn adjacent_apple_count(&self, coords: Coord2) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].has_apple())
            .count();
        // at most eight neighbors
        count as u8
    }

    /// Records the first-reveal count of a tile, later calls are no-ops returning `false`.
    pub fn set_revealed(&mut self, coords: Coord2, count: u8) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tile_mut(coords).reveal(count))
    }

    pub fn set_flagged(&mut self, coords: Coord2, flagged: bool) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tile_mut(coords).set_flagged(flagged))
    }

    pub fn remove_apple(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let removed = self.tile_mut(coords).remove_apple();
        if removed {
            self.apple_count -= 1;
        }
        Ok(removed)
    }

    fn tile_mut(&mut self, coords: Coord2) -> &mut Tile {
        &mut self.tiles[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

fn count_apples(tiles: &Array2<Tile>) -> CellCount {
    let count = tiles.iter().filter(|tile| tile.has_apple()).count();
    CellCount::try_from(count).unwrap_or(CellCount::MAX)
}
