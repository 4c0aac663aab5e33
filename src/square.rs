use crate::color::Color;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a square on the chess board as a (row, column) pair.
///
/// Row 0 is White's back rank and row 7 is Black's.  Coordinates are signed so that a
/// request naming a square off the board can still be expressed; use `is_on_board` before
/// handing a square to anything that indexes the grid.
///
/// ```
/// use chess_referee::Square;
///
/// let sq = Square::new(1, 4);
/// assert!(sq.is_on_board());
/// assert_eq!(sq.offset(1, 0), Some(Square::new(2, 4)));
/// assert_eq!(Square::new(7, 7).offset(1, 0), None);
/// assert!(!Square::new(8, 0).is_on_board());
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Square {
    row: i8,
    col: i8,
}

/// How many squares are there?
pub const NUM_SQUARES: usize = 64;

impl Square {
    /// Make a square given a row and a column.
    /// Note: It is allowed to pass in coordinates off the board.  Such a square must never be
    /// used to index a `Board`.
    #[inline]
    pub const fn new(row: i8, col: i8) -> Square {
        Square { row, col }
    }

    /// Make a square from a table index in `0..64`.
    #[inline]
    pub fn from_index(index: usize) -> Square {
        Square::new((index / 8) as i8, (index % 8) as i8)
    }

    /// Return the row of this square.
    #[inline]
    pub fn row(&self) -> i8 {
        self.row
    }

    /// Return the column of this square.
    #[inline]
    pub fn col(&self) -> i8 {
        self.col
    }

    /// Are both coordinates within `0..=7`?
    #[inline]
    pub fn is_on_board(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// The square `rows` up and `cols` to the right of me, if it is on the board.
    #[inline]
    pub fn offset(&self, rows: i8, cols: i8) -> Option<Square> {
        let sq = Square::new(self.row + rows, self.col + cols);
        if sq.is_on_board() {
            Some(sq)
        } else {
            None
        }
    }

    /// If there is a square "forward", given my `Color`, go in that direction.  Otherwise, None.
    #[inline]
    pub fn forward(&self, color: Color) -> Option<Square> {
        self.offset(color.forward(), 0)
    }

    /// Convert this `Square` to a `usize` for table lookup purposes.
    /// Only meaningful for squares on the board.
    #[inline]
    pub fn to_index(&self) -> usize {
        (self.row as usize) * 8 + self.col as usize
    }

    /// Walk from `self` towards `dest`, one step at a time, yielding every square strictly in
    /// between.  Returns `None` if the two squares do not share a row, column or diagonal.
    pub fn between(&self, dest: Square) -> Option<Between> {
        let rows = dest.row - self.row;
        let cols = dest.col - self.col;
        if (rows == 0 && cols == 0) || (rows != 0 && cols != 0 && rows.abs() != cols.abs()) {
            return None;
        }
        Some(Between {
            current: *self,
            dest,
            step: (rows.signum(), cols.signum()),
        })
    }
}

/// Iterator over the squares strictly between two aligned squares.
#[derive(Copy, Clone, Debug)]
pub struct Between {
    current: Square,
    dest: Square,
    step: (i8, i8),
}

impl Iterator for Between {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let next = Square::new(self.current.row + self.step.0, self.current.col + self.step.1);
        if next == self.dest {
            None
        } else {
            self.current = next;
            Some(next)
        }
    }
}

/// Iterate every square on the board, row 0 first.
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0..NUM_SQUARES).map(Square::from_index)
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[test]
fn index_round_trip_covers_board() {
    let squares: Vec<Square> = all_squares().collect();
    assert_eq!(squares.len(), NUM_SQUARES);
    for (i, sq) in squares.iter().enumerate() {
        assert!(sq.is_on_board());
        assert_eq!(sq.to_index(), i);
    }
}

#[test]
fn off_board_squares() {
    assert!(!Square::new(-1, 0).is_on_board());
    assert!(!Square::new(0, 8).is_on_board());
    assert!(!Square::new(100, -100).is_on_board());
    assert_eq!(Square::new(0, 0).offset(-1, 0), None);
    assert_eq!(Square::new(1, 0).forward(Color::Black), Some(Square::new(0, 0)));
}

#[test]
fn between_straight_and_diagonal() {
    let path: Vec<Square> = Square::new(0, 0).between(Square::new(0, 4)).unwrap().collect();
    assert_eq!(path, vec![Square::new(0, 1), Square::new(0, 2), Square::new(0, 3)]);

    let path: Vec<Square> = Square::new(5, 5).between(Square::new(2, 2)).unwrap().collect();
    assert_eq!(path, vec![Square::new(4, 4), Square::new(3, 3)]);

    assert_eq!(Square::new(3, 3).between(Square::new(3, 4)).unwrap().count(), 0);
    assert!(Square::new(0, 0).between(Square::new(1, 2)).is_none());
    assert!(Square::new(0, 0).between(Square::new(0, 0)).is_none());
}
