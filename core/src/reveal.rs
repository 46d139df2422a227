use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;

use crate::*;

/// Breadth-first chain reveal seeded at an apple tile the snake just ate.
///
/// Every touched tile that was not yet revealed gets its apple count exactly once. The seed
/// always expands, other tiles only expand when their count is zero. Tiles revealed by an
/// earlier call keep their count and do not expand.
/// Returns the tiles newly revealed, in visit order.
pub fn flood_reveal(grid: &mut Grid, seed: Coord2) -> Result<Vec<Coord2>> {
    let seed = grid.validate_coords(seed)?;

    let mut revealed = Vec::new();
    let mut visited = BTreeSet::from([seed]);
    let mut to_visit = VecDeque::from([seed]);

    while let Some(coords) = to_visit.pop_front() {
        let is_seed = coords == seed;
        if grid[coords].is_revealed() && !is_seed {
            continue;
        }

        let count = grid.adjacent_apple_count(coords);
        if grid.set_revealed(coords, count)? {
            log::trace!("revealed {:?} with {} surrounding apples", coords, count);
            revealed.push(coords);
        }

        if count == 0 || is_seed {
            let unvisited: Vec<_> = grid
                .iter_neighbors(coords)
                .filter(|&pos| !grid[pos].has_apple())
                .filter(|&pos| visited.insert(pos))
                .collect();
            to_visit.extend(unvisited);
        }
    }

    Ok(revealed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_at(grid: &Grid, coords: Coord2) -> Option<u8> {
        grid[coords].surrounding_apples()
    }

    #[test]
    fn seed_expands_even_with_apples_around() {
        let mut grid = Grid::from_apple_coords(5, &[(2, 2), (0, 0)]).unwrap();
        grid.remove_apple((2, 2)).unwrap();

        let revealed = flood_reveal(&mut grid, (2, 2)).unwrap();

        // seed sees nothing once eaten, so the whole board floods except the remaining apple
        assert_eq!(count_at(&grid, (2, 2)), Some(0));
        assert_eq!(count_at(&grid, (1, 1)), Some(1));
        assert_eq!(count_at(&grid, (0, 0)), None);
        assert_eq!(revealed.len(), 24);
    }

    #[test]
    fn nonzero_tiles_do_not_propagate() {
        // ring of apples around the seed's neighbors keeps the reveal local
        let apples = [(3, 3), (3, 1), (5, 3), (3, 5), (1, 3)];
        let mut grid = Grid::from_apple_coords(7, &apples).unwrap();
        grid.remove_apple((3, 3)).unwrap();

        let revealed = flood_reveal(&mut grid, (3, 3)).unwrap();

        assert_eq!(count_at(&grid, (3, 3)), Some(0));
        assert_eq!(count_at(&grid, (3, 2)), Some(1));
        assert_eq!(count_at(&grid, (2, 2)), Some(2));
        assert_eq!(count_at(&grid, (0, 0)), None);
        assert_eq!(count_at(&grid, (6, 6)), None);
        assert_eq!(revealed.len(), 9);
    }

    #[test]
    fn seed_with_apple_neighbors_still_reveals_them_all() {
        let mut grid = Grid::from_apple_coords(5, &[(2, 2), (1, 2), (4, 4)]).unwrap();
        grid.remove_apple((2, 2)).unwrap();

        flood_reveal(&mut grid, (2, 2)).unwrap();

        assert_eq!(count_at(&grid, (2, 2)), Some(1));
        assert_eq!(count_at(&grid, (3, 2)), Some(0));
        assert_eq!(count_at(&grid, (1, 2)), None);
    }

    #[test]
    fn second_reveal_keeps_earlier_counts() {
        let mut grid = Grid::from_apple_coords(6, &[(1, 1), (2, 1), (5, 5)]).unwrap();

        grid.remove_apple((1, 1)).unwrap();
        flood_reveal(&mut grid, (1, 1)).unwrap();
        assert_eq!(count_at(&grid, (2, 2)), Some(1));

        grid.remove_apple((2, 1)).unwrap();
        let revealed = flood_reveal(&mut grid, (2, 1)).unwrap();

        // (2, 2) now has no apple around it but must keep its first count
        assert_eq!(count_at(&grid, (2, 2)), Some(1));
        assert_eq!(count_at(&grid, (2, 1)), Some(0));
        assert!(!revealed.contains(&(2, 2)));
        assert!(revealed.contains(&(2, 1)));
    }

    #[test]
    fn each_tile_is_revealed_at_most_once_per_call() {
        let mut grid = Grid::from_apple_coords(8, &[(0, 0)]).unwrap();
        grid.remove_apple((0, 0)).unwrap();

        let revealed = flood_reveal(&mut grid, (0, 0)).unwrap();
        let unique: BTreeSet<_> = revealed.iter().copied().collect();

        assert_eq!(revealed.len(), 64);
        assert_eq!(unique.len(), revealed.len());
    }

    #[test]
    fn seed_outside_grid_fails() {
        let mut grid = Grid::from_apple_coords(3, &[(0, 0)]).unwrap();

        assert_eq!(flood_reveal(&mut grid, (3, 3)), Err(GameError::OutOfBounds));
    }
}
