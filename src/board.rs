//! Board representation and coordinate notation.
//!
//! The board is a fixed-size square grid of intersections. Each intersection
//! holds an `Option<Stone>`; `None` means empty. Coordinates are 0-indexed
//! `(x, y)` pairs with `(0, 0)` in the bottom-left corner, and translate to
//! the human-readable notation used at the text boundary: a column letter
//! starting at `'A'` followed by a 1-based row number, e.g. `(0, 0)` is
//! `"A1"` and `(7, 7)` on a 15x15 board is `"H8"`.

use std::fmt;

use thiserror::Error;

/// A stone color. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// The other color.
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "black"),
            Stone::White => write!(f, "white"),
        }
    }
}

/// Errors from board access and coordinate translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size must be at least 1")]
    ZeroSize,
    #[error("coordinate ({x}, {y}) is outside the {size}x{size} board")]
    OutOfRange { x: usize, y: usize, size: usize },
    #[error("column {0} has no single-letter label")]
    ColumnUnrepresentable(usize),
    #[error("'{0}' is not a valid coordinate")]
    BadNotation(String),
}

/// A square grid of intersections.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Stone>>,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    fn check(&self, x: usize, y: usize) -> Result<(), BoardError> {
        if x >= self.size || y >= self.size {
            return Err(BoardError::OutOfRange {
                x,
                y,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Read the cell at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<Option<Stone>, BoardError> {
        self.check(x, y)?;
        Ok(self.cells[self.idx(x, y)])
    }

    /// Overwrite the cell at `(x, y)` with a stone.
    pub fn set(&mut self, x: usize, y: usize, stone: Stone) -> Result<(), BoardError> {
        self.check(x, y)?;
        let i = self.idx(x, y);
        self.cells[i] = Some(stone);
        Ok(())
    }

    /// True iff no empty intersection remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Signed-coordinate read used by the line scanners: `None` when the
    /// point is off the board, `Some(cell)` otherwise. Off-board points are
    /// not an error here; rule windows routinely extend past the edge.
    pub(crate) fn at(&self, x: isize, y: isize) -> Option<Option<Stone>> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.cells[self.idx(x, y)])
    }

    /// Translate `(x, y)` to notation, e.g. `(7, 7)` -> `"H8"`.
    pub fn to_notation(&self, x: usize, y: usize) -> Result<String, BoardError> {
        self.check(x, y)?;
        if x >= 26 {
            return Err(BoardError::ColumnUnrepresentable(x));
        }
        let col = (b'A' + x as u8) as char;
        Ok(format!("{col}{}", y + 1))
    }

    /// Translate notation back to `(x, y)`, e.g. `"H8"` -> `(7, 7)`.
    pub fn from_notation(&self, s: &str) -> Result<(usize, usize), BoardError> {
        let bad = || BoardError::BadNotation(s.to_string());
        let mut chars = s.chars();
        let col = chars.next().ok_or_else(bad)?;
        if !col.is_ascii_uppercase() {
            return Err(bad());
        }
        let x = (col as u8 - b'A') as usize;

        let row = chars.as_str();
        if row.is_empty() || !row.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let row: usize = row.parse().map_err(|_| bad())?;
        if row == 0 {
            return Err(bad());
        }
        let y = row - 1;

        self.check(x, y).map_err(|_| bad())?;
        Ok((x, y))
    }
}

impl fmt::Display for Board {
    /// Render the grid top row first, with row numbers on the left and
    /// column letters underneath.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            write!(f, "{:2} ", y + 1)?;
            for x in 0..self.size {
                let glyph = match self.cells[self.idx(x, y)] {
                    Some(Stone::Black) => '\u{25CF}',
                    Some(Stone::White) => '\u{25CB}',
                    None => '+',
                };
                if x == self.size - 1 {
                    writeln!(f, "{glyph}")?;
                } else {
                    write!(f, "{glyph}-")?;
                }
            }
        }
        write!(f, "   ")?;
        for x in 0..self.size {
            let col = (b'A' + x as u8) as char;
            if x == self.size - 1 {
                writeln!(f, "{col}")?;
            } else {
                write!(f, "{col} ")?;
            }
        }
        Ok(())
    }
}
