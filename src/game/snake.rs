use super::board::Bounds;
use super::direction::Direction;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake: its head, the rest of its body, and its heading
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    head: Position,

    /// The positions of the cells behind the head, nearest first
    body: VecDeque<Position>,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a new snake consisting of just a head at `head`, facing in
    /// `direction`
    pub(super) fn new(head: Position, direction: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            direction,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Iterate over every cell of the snake, head first
    pub(super) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Change the snake's direction to `direction` unless that would turn it
    /// straight back on itself.  Returns `true` if the direction was changed.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    /// Return the cell the head will move into on the next step
    pub(super) fn next_head(&self, bounds: Bounds) -> Position {
        self.direction.advance(self.head, bounds)
    }

    /// Move the head to `pos`, keeping the old head as the first body cell
    pub(super) fn push_head(&mut self, pos: Position) {
        self.body.push_front(self.head);
        self.head = pos;
    }

    /// Remove the last cell of the tail.  The head is never removed.
    pub(super) fn pop_tail(&mut self) {
        let _ = self.body.pop_back();
    }
}

#[cfg(test)]
impl Snake {
    /// Build a snake from its cells, head first
    pub(super) fn from_cells(cells: &[(u16, u16)], direction: Direction) -> Snake {
        let ((hx, hy), rest) = cells.split_first().expect("snake should have a head");
        Snake {
            head: Position::new(*hx, *hy),
            body: rest.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
        }
    }

    pub(super) fn cell_list(&self) -> Vec<Position> {
        self.cells().collect()
    }
}
