use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// (Δrow, Δcol)
    pub fn delta(self) -> Cell {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn apply(self, cell: Cell) -> Cell {
        let (dr, dc) = self.delta();
        (cell.0 + dr, cell.1 + dc)
    }
}

/// Body cells, tail first and head last.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A straight snake of `size` cells ending at `head`, laid out so that it
    /// is heading towards `direction`.
    pub fn new(head: Cell, size: i16, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();

        let body = (0..size).rev()
            .map(|i| (head.0 - dr * i, head.1 - dc * i))
            .collect();
        Snake { body }
    }

    #[cfg(test)]
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        Snake { body: cells.into_iter().collect() }
    }

    pub fn head(&self) -> Cell {
        // Never empty: every constructor lays out at least one cell and a
        // move pushes the head before dropping the tail
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body.contains(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    pub fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_front()
    }
}
