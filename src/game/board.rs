use ratatui::layout::{Position, Positions, Rect, Size};

/// The dimensions of a board.  Boards always wrap around at their edges.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Iterate over every cell of the board, row by row
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    /// Total number of cells on the board
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

impl From<Size> for Bounds {
    fn from(size: Size) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
        }
    }
}
