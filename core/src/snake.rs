use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub coords: Coord2,
    pub is_head: bool,
}

impl Segment {
    const fn head(coords: Coord2) -> Self {
        Self {
            coords,
            is_head: true,
        }
    }

    const fn body(coords: Coord2) -> Self {
        Self {
            coords,
            is_head: false,
        }
    }
}

/// Ordered body segments on a torus, head first and tail last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    segments: VecDeque<Segment>,
    board_size: Coord,
}

impl Snake {
    /// Places `length` segments starting at `head` and extending towards decreasing `x`, wrapping
    /// around the board when needed.
    pub fn new(head: Coord2, board_size: Coord, length: Coord) -> Result<Self> {
        if board_size == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        if head.0 >= board_size || head.1 >= board_size {
            return Err(GameError::OutOfBounds);
        }

        let length = length.clamp(1, board_size);
        let mut segments = VecDeque::with_capacity(length.into());
        segments.push_back(Segment::head(head));
        let mut coords = head;
        for _ in 1..length {
            coords = Direction::Left.step_wrapping(coords, board_size);
            segments.push_back(Segment::body(coords));
        }

        Ok(Self {
            segments,
            board_size,
        })
    }

    pub fn board_size(&self) -> Coord {
        self.board_size
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> Segment {
        self.segments[0]
    }

    pub fn tail(&self) -> Segment {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Moves the head one tile along `direction`, returning the segment removed from the tail.
    pub fn advance(&mut self, direction: Direction) -> Segment {
        let new_head = direction.step_wrapping(self.head().coords, self.board_size);

        if let Some(old_head) = self.segments.front_mut() {
            old_head.is_head = false;
        }
        self.segments.push_front(Segment::head(new_head));

        // length was at least one before the push
        self.segments.pop_back().unwrap_or(Segment::body(new_head))
    }

    /// Duplicates the tail, the copy is absorbed over the next move.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push_back(Segment::body(tail.coords));
    }

    pub fn is_self_colliding(&self) -> bool {
        let head = self.head().coords;
        self.segments.iter().skip(1).any(|segment| segment.coords == head)
    }

    pub fn is_occupying(&self, coords: Coord2) -> bool {
        self.segments.iter().any(|segment| segment.coords == coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn coords(snake: &Snake) -> Vec<Coord2> {
        snake.segments().map(|segment| segment.coords).collect()
    }

    #[test]
    fn new_snake_extends_backwards_from_head() {
        let snake = Snake::new((5, 5), 10, 3).unwrap();

        assert_eq!(coords(&snake), [(5, 5), (4, 5), (3, 5)]);
        assert!(snake.head().is_head);
        assert_eq!(snake.segments().filter(|segment| segment.is_head).count(), 1);
    }

    #[test]
    fn new_snake_wraps_past_left_edge() {
        let snake = Snake::new((1, 0), 4, 4).unwrap();

        assert_eq!(coords(&snake), [(1, 0), (0, 0), (3, 0), (2, 0)]);
        assert!(!snake.is_self_colliding());
    }

    #[test]
    fn advance_keeps_length_and_returns_old_tail() {
        let mut snake = Snake::new((5, 5), 10, 3).unwrap();

        let old_tail = snake.advance(Direction::Down);

        assert_eq!(old_tail.coords, (3, 5));
        assert_eq!(coords(&snake), [(5, 6), (5, 5), (4, 5)]);
        assert_eq!(snake.segments().filter(|segment| segment.is_head).count(), 1);
    }

    #[test]
    fn advance_wraps_toroidally() {
        let mut snake = Snake::new((9, 0), 10, 1).unwrap();

        snake.advance(Direction::Right);
        assert_eq!(snake.head().coords, (0, 0));
        snake.advance(Direction::Up);
        assert_eq!(snake.head().coords, (0, 9));
    }

    #[test]
    fn grow_is_absorbed_on_next_move() {
        let mut snake = Snake::new((5, 5), 10, 2).unwrap();

        snake.grow();
        assert_eq!(snake.len(), 3);
        assert_eq!(coords(&snake), [(5, 5), (4, 5), (4, 5)]);

        let old_tail = snake.advance(Direction::Right);
        assert_eq!(old_tail.coords, (4, 5));
        assert_eq!(coords(&snake), [(6, 5), (5, 5), (4, 5)]);
    }

    #[test]
    fn turning_into_own_body_collides() {
        let mut snake = Snake::new((5, 5), 10, 5).unwrap();

        snake.advance(Direction::Up);
        snake.advance(Direction::Left);
        assert!(!snake.is_self_colliding());
        snake.advance(Direction::Down);
        assert!(snake.is_self_colliding());
    }

    #[test]
    fn occupancy_covers_every_segment() {
        let snake = Snake::new((5, 5), 10, 3).unwrap();

        assert!(snake.is_occupying((3, 5)));
        assert!(!snake.is_occupying((2, 5)));
    }
}
