use crate::color::Color;
use crate::piece::PieceId;
use crate::square::{Square, NUM_SQUARES};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// What can stand on a square.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Occupant {
    /// A real piece, looked up through its owner.
    Piece(PieceId),
    /// The en passant marker of this side.
    Marker(Color),
}

impl Occupant {
    /// Which side does the occupant belong to?
    #[inline]
    pub fn color(&self) -> Color {
        match *self {
            Occupant::Piece(id) => id.color(),
            Occupant::Marker(color) => color,
        }
    }

    /// Is this an en passant marker rather than a real piece?
    #[inline]
    pub fn is_marker(&self) -> bool {
        match *self {
            Occupant::Marker(_) => true,
            Occupant::Piece(_) => false,
        }
    }
}

/// The 8x8 occupancy grid.  It knows nothing about the rules.
///
/// `Board` does no bounds checking: every square handed to it must already be known to be on
/// the board.  It is `Copy`, so trying something out on a private copy is cheap.
///
/// ```
/// use chess_referee::{Board, Square};
///
/// let board = Board::new();
/// assert_eq!(board.occupant(Square::new(3, 3)), None);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    squares: [Option<Occupant>; NUM_SQUARES],
}

impl Board {
    /// Construct a new `Board` that is completely empty.
    pub fn new() -> Board {
        Board {
            squares: [None; NUM_SQUARES],
        }
    }

    /// What is on a particular `Square`?  Is there even something?
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<Occupant> {
        self.squares[square.to_index()]
    }

    /// Put `occupant` on `square`, replacing whatever was there.
    #[inline]
    pub fn place(&mut self, square: Square, occupant: Option<Occupant>) {
        self.squares[square.to_index()] = occupant;
    }

    /// How many squares hold something (markers included)?
    pub fn count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

#[test]
fn place_and_clear() {
    let mut board = Board::new();
    let sq = Square::new(4, 2);
    board.place(sq, Some(Occupant::Marker(Color::Black)));
    assert_eq!(board.occupant(sq), Some(Occupant::Marker(Color::Black)));
    assert_eq!(board.count(), 1);
    assert!(board.occupant(sq).unwrap().is_marker());
    assert!(!Occupant::Piece(PieceId::new(Color::Black, 0)).is_marker());

    let copy = board;
    board.place(sq, None);
    assert_eq!(board.occupant(sq), None);
    assert_eq!(copy.occupant(sq), Some(Occupant::Marker(Color::Black)));
}
