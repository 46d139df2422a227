use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board size and positions.
pub type Coord = u8;

/// Count type used for apple counts, scores and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Heading of the snake. `Up` decreases `y`, `Left` decreases `x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub const fn axis(self) -> Axis {
        use Direction::*;
        match self {
            Up | Down => Axis::Vertical,
            Left | Right => Axis::Horizontal,
        }
    }

    pub const fn sign(self) -> i8 {
        use Direction::*;
        match self {
            Up | Left => -1,
            Down | Right => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        use Direction::*;
        match self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
        }
    }

    /// Steps `coords` one tile along this direction on a torus of side `size`.
    pub fn step_wrapping(self, (x, y): Coord2, size: Coord) -> Coord2 {
        match self.axis() {
            Axis::Horizontal => (wrap_add(x, self.sign(), size), y),
            Axis::Vertical => (x, wrap_add(y, self.sign(), size)),
        }
    }
}

impl core::str::FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

fn wrap_add(value: Coord, delta: i8, size: Coord) -> Coord {
    let size = i16::from(size);
    let wrapped = (i16::from(value) + i16::from(delta)).rem_euclid(size);
    // rem_euclid keeps the result in 0..size, which fits a Coord
    wrapped as Coord
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for ndarray::Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (dim_x, dim_y) = self.dim();
        let bounds = (
            Coord::try_from(dim_x).unwrap_or(Coord::MAX),
            Coord::try_from(dim_y).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds)
    }
}

const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
///
/// Adjacency never wraps, only snake movement does.
fn apply_offset(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the up to eight in-bounds tiles around a center tile.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let offset = *NEIGHBOR_OFFSETS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_offset(self.center, offset, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
