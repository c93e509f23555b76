use std::collections::VecDeque;

use crate::{Cell, GridInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Snake body, head first. Cells are unique while the snake is alive.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Builds a snake of `len` cells with its head at `head`, the body
    /// trailing away opposite to `direction`.
    pub fn new(head: Cell, len: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..len as GridInt)
            .map(|i| (head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_head_first_trailing_body() {
        let snake = Snake::new((9, 10), 3, Right);
        let cells: Vec<Cell> = snake.cells().collect();
        assert_eq!(cells, vec![(9, 10), (8, 10), (7, 10)]);
        assert_eq!(snake.head(), (9, 10));
    }

    #[test]
    fn builds_vertical_body() {
        let snake = Snake::new((5, 5), 3, Up);
        let cells: Vec<Cell> = snake.cells().collect();
        assert_eq!(cells, vec![(5, 5), (5, 6), (5, 7)]);
    }

    #[test]
    fn opposites_pair_up() {
        assert_eq!(Up.opposite(), Down);
        assert_eq!(Down.opposite(), Up);
        assert_eq!(Left.opposite(), Right);
        assert_eq!(Right.opposite(), Left);
    }

    #[test]
    fn push_and_pop_keep_order() {
        let mut snake = Snake::new((3, 3), 3, Right);
        snake.push_head((4, 3));
        assert_eq!(snake.head(), (4, 3));
        assert_eq!(snake.pop_tail(), Some((1, 3)));
        assert_eq!(snake.len(), 3);
    }
}
