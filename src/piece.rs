use crate::board::Board;
use crate::color::Color;
use crate::error::{MoveError, MoveErrorKind};
use crate::player::Player;
use crate::square::Square;
use arrayvec::ArrayVec;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a kind of chess piece as a very simple enum.
///
/// `EnPassantMarker` is not a real piece.  It sits on the square a pawn skipped over with its
/// double step, for exactly one enemy move, so that an enemy pawn can capture it diagonally.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    EnPassantMarker,
}

/// How many real piece kinds are there?
pub const NUM_PIECES: usize = 6;

/// An array representing each real piece kind, in order of ascending value.
pub const ALL_PIECES: [PieceKind; NUM_PIECES] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The back rank, column 0 first.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl PieceKind {
    /// Convert the `PieceKind` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// The glyph used when printing the board.  Markers print blank.
    pub fn to_char(&self, color: Color) -> char {
        match (*self, color) {
            (PieceKind::Pawn, Color::White) => '\u{2659}',
            (PieceKind::Pawn, Color::Black) => '\u{265f}',
            (PieceKind::Knight, Color::White) => '\u{2658}',
            (PieceKind::Knight, Color::Black) => '\u{265e}',
            (PieceKind::Bishop, Color::White) => '\u{2657}',
            (PieceKind::Bishop, Color::Black) => '\u{265d}',
            (PieceKind::Rook, Color::White) => '\u{2656}',
            (PieceKind::Rook, Color::Black) => '\u{265c}',
            (PieceKind::Queen, Color::White) => '\u{2655}',
            (PieceKind::Queen, Color::Black) => '\u{265b}',
            (PieceKind::King, Color::White) => '\u{2654}',
            (PieceKind::King, Color::Black) => '\u{265a}',
            (PieceKind::EnPassantMarker, _) => ' ',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::EnPassantMarker => "EnPassantMarker",
        };
        write!(f, "{}", name)
    }
}

/// A handle to a piece: its owner and its slot in the owner's piece list.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PieceId {
    color: Color,
    index: u8,
}

impl PieceId {
    #[inline]
    pub(crate) fn new(color: Color, index: usize) -> PieceId {
        PieceId {
            color,
            index: index as u8,
        }
    }

    /// Who owns the piece?
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Where in the owner's piece list does it live?
    #[inline]
    pub fn to_index(&self) -> usize {
        self.index as usize
    }
}

/// A piece, as its owner keeps it.
///
/// `position` is `None` once the piece has been captured.  Only the `Game` moves pieces, and it
/// updates the board slot and `position` together.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    position: Option<Square>,
    moved: bool,
}

impl Piece {
    pub(crate) fn new(kind: PieceKind, color: Color, position: Square) -> Piece {
        Piece {
            kind,
            color,
            position: Some(position),
            moved: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Where is the piece?  `None` if it has been captured.
    #[inline]
    pub fn position(&self) -> Option<Square> {
        self.position
    }

    /// Is the piece still on the board?
    #[inline]
    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    /// Has the piece moved at least once this game?
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// The glyph used when printing the board.
    pub fn glyph(&self) -> char {
        self.kind.to_char(self.color)
    }

    pub(crate) fn set_position(&mut self, position: Option<Square>) {
        self.position = position;
    }

    pub(crate) fn set_moved(&mut self) {
        self.moved = true;
    }

    fn error(&self, message: &'static str, start: Square, dest: Square) -> MoveError {
        MoveError::new(MoveErrorKind::IllegalMove, message, Some(*self), start, dest)
    }

    /// Can this piece go from where it stands to `dest`?
    ///
    /// The caller has already made sure that `dest` is on the board, that it differs from the
    /// piece's square, and that the piece belongs to the side asking.  This only checks the
    /// movement rule of the piece kind and whatever stands in its way.  A king additionally
    /// refuses to step onto a square `opponent` would attack.
    pub fn check_destination(
        &self,
        dest: Square,
        board: &Board,
        opponent: &Player,
    ) -> Result<(), MoveError> {
        let start = match self.position {
            Some(start) => start,
            None => return Err(self.error("Piece has been captured", dest, dest)),
        };

        match self.kind {
            PieceKind::Pawn => {
                let moves = self.pawn_destinations(start, board);
                if moves.is_empty() {
                    return Err(self.error("No Valid Moves for Piece", start, dest));
                }
                if !moves.contains(&dest) {
                    return Err(self.error("Not a Valid Move for Selected Piece", start, dest));
                }
                Ok(())
            }
            PieceKind::EnPassantMarker => {
                Err(self.error("An en passant marker cannot be moved", start, dest))
            }
            PieceKind::King => {
                reach(self.kind, start, dest, board).map_err(|m| self.error(m, start, dest))?;

                // try the step on a private copy and see if anything still on it hits the king
                let mut scratch = *board;
                scratch.place(dest, board.occupant(start));
                scratch.place(start, None);
                if opponent.attacks_square(dest, &scratch) {
                    return Err(self.error("Moving into check", start, dest));
                }
                Ok(())
            }
            _ => reach(self.kind, start, dest, board).map_err(|m| self.error(m, start, dest)),
        }
    }

    /// Does this piece attack `target` on `board`?
    ///
    /// Pawns only attack diagonally forward, whatever is there.  Kings attack their eight
    /// neighbours without asking whether that would be safe for them.
    pub fn attacks(&self, target: Square, board: &Board) -> bool {
        let start = match self.position {
            Some(start) => start,
            None => return false,
        };

        match self.kind {
            PieceKind::Pawn => {
                let forward = self.color.forward();
                start.offset(forward, -1) == Some(target) || start.offset(forward, 1) == Some(target)
            }
            PieceKind::EnPassantMarker => false,
            _ => start != target && reach(self.kind, start, target, board).is_ok(),
        }
    }

    /// Every square this pawn could go to from `start`.
    fn pawn_destinations(&self, start: Square, board: &Board) -> ArrayVec<Square, 4> {
        let mut result = ArrayVec::new();
        let forward = self.color.forward();

        if let Some(one) = start.offset(forward, 0) {
            if board.occupant(one).is_none() {
                result.push(one);
                if !self.moved {
                    if let Some(two) = start.offset(2 * forward, 0) {
                        if board.occupant(two).is_none() {
                            result.push(two);
                        }
                    }
                }
            }
        }

        // a marker belongs to the side that made the double step, so it counts as an enemy here
        for side in [-1, 1].iter() {
            if let Some(diagonal) = start.offset(forward, *side) {
                match board.occupant(diagonal) {
                    Some(occupant) if occupant.color() != self.color => result.push(diagonal),
                    _ => {}
                }
            }
        }

        result
    }
}

/// Movement shape and path blocking for every kind except the pawn.
fn reach(kind: PieceKind, start: Square, dest: Square, board: &Board) -> Result<(), &'static str> {
    let rows = (dest.row() - start.row()).abs();
    let cols = (dest.col() - start.col()).abs();

    match kind {
        PieceKind::Knight => {
            if (rows == 1 && cols == 2) || (rows == 2 && cols == 1) {
                Ok(())
            } else {
                Err("Not a Valid Move for Selected Piece")
            }
        }
        PieceKind::King => {
            if rows.max(cols) == 1 {
                Ok(())
            } else {
                Err("Not a Valid Move for Selected Piece")
            }
        }
        PieceKind::Rook if rows != 0 && cols != 0 => {
            Err("Not a valid method to move this piece type")
        }
        PieceKind::Bishop if rows != cols => Err("Not a Valid Move for Selected Piece"),
        PieceKind::Queen if rows != 0 && cols != 0 && rows != cols => {
            Err("Not a Valid Move for Selected Piece")
        }
        PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => {
            if path_is_clear(start, dest, board) {
                Ok(())
            } else {
                Err("Another piece is in the way")
            }
        }
        PieceKind::Pawn | PieceKind::EnPassantMarker => Err("Not a Valid Move for Selected Piece"),
    }
}

/// Is every square strictly between `start` and `dest` free?  Markers do not block.
fn path_is_clear(start: Square, dest: Square, board: &Board) -> bool {
    match start.between(dest) {
        Some(mut path) => path.all(|sq| board.occupant(sq).map_or(true, |o| o.is_marker())),
        None => false,
    }
}

/// The square a pawn skipped over with its double step.
///
/// It stays on the board for one enemy move.  Capturing it with a pawn captures `parent`.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct EnPassantMarker {
    square: Square,
    parent: PieceId,
}

impl EnPassantMarker {
    pub(crate) fn new(square: Square, parent: PieceId) -> EnPassantMarker {
        EnPassantMarker { square, parent }
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// The pawn that made the double step.
    #[inline]
    pub fn parent(&self) -> PieceId {
        self.parent
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.parent.color()
    }

    /// View the marker as a piece, for renderers and error reports.
    pub fn to_piece(&self) -> Piece {
        Piece::new(PieceKind::EnPassantMarker, self.color(), self.square)
    }
}

#[cfg(test)]
use crate::board::Occupant;

#[cfg(test)]
fn place(board: &mut Board, pieces: &mut Vec<Piece>, kind: PieceKind, color: Color, sq: Square) -> Piece {
    let piece = Piece::new(kind, color, sq);
    board.place(sq, Some(Occupant::Piece(PieceId::new(color, pieces.len()))));
    pieces.push(piece);
    piece
}

#[test]
fn rook_is_blocked_by_any_piece_but_not_by_a_marker() {
    let mut board = Board::new();
    let mut pieces = vec![];
    let nobody = Player::new(Color::Black);
    let rook = place(&mut board, &mut pieces, PieceKind::Rook, Color::White, Square::new(0, 0));
    place(&mut board, &mut pieces, PieceKind::Knight, Color::Black, Square::new(0, 3));

    assert!(rook.check_destination(Square::new(0, 2), &board, &nobody).is_ok());
    assert!(rook.check_destination(Square::new(0, 3), &board, &nobody).is_ok());
    let err = rook
        .check_destination(Square::new(0, 5), &board, &nobody)
        .unwrap_err();
    assert_eq!(err.kind(), MoveErrorKind::IllegalMove);
    assert!(rook.check_destination(Square::new(1, 1), &board, &nobody).is_err());

    board.place(Square::new(3, 0), Some(Occupant::Marker(Color::Black)));
    assert!(rook.check_destination(Square::new(5, 0), &board, &nobody).is_ok());
}

#[test]
fn bishop_and_queen_shapes() {
    let mut board = Board::new();
    let mut pieces = vec![];
    let nobody = Player::new(Color::Black);
    let bishop = place(&mut board, &mut pieces, PieceKind::Bishop, Color::White, Square::new(3, 3));
    let queen = place(&mut board, &mut pieces, PieceKind::Queen, Color::White, Square::new(0, 6));

    assert!(bishop.check_destination(Square::new(6, 6), &board, &nobody).is_ok());
    assert!(bishop.check_destination(Square::new(1, 5), &board, &nobody).is_ok());
    assert!(bishop.check_destination(Square::new(5, 1), &board, &nobody).is_ok());
    assert!(bishop.check_destination(Square::new(3, 6), &board, &nobody).is_err());
    assert!(bishop.check_destination(Square::new(4, 5), &board, &nobody).is_err());

    assert!(queen.check_destination(Square::new(7, 6), &board, &nobody).is_ok());
    assert!(queen.check_destination(Square::new(0, 0), &board, &nobody).is_ok());
    assert!(queen.check_destination(Square::new(2, 4), &board, &nobody).is_ok());
    // blocked by the bishop on (3, 3)
    assert!(queen.check_destination(Square::new(4, 2), &board, &nobody).is_err());
    assert!(queen.check_destination(Square::new(1, 3), &board, &nobody).is_err());
}

#[test]
fn knight_jumps() {
    let mut board = Board::new();
    let mut pieces = vec![];
    let nobody = Player::new(Color::Black);
    let knight = place(&mut board, &mut pieces, PieceKind::Knight, Color::White, Square::new(0, 1));
    for sq in [Square::new(0, 2), Square::new(1, 1), Square::new(1, 2), Square::new(0, 0)].iter() {
        place(&mut board, &mut pieces, PieceKind::Pawn, Color::White, *sq);
    }

    assert!(knight.check_destination(Square::new(2, 2), &board, &nobody).is_ok());
    assert!(knight.check_destination(Square::new(2, 0), &board, &nobody).is_ok());
    assert!(knight.check_destination(Square::new(1, 3), &board, &nobody).is_ok());
    assert!(knight.check_destination(Square::new(2, 1), &board, &nobody).is_err());
    assert!(knight.check_destination(Square::new(3, 4), &board, &nobody).is_err());
}

#[test]
fn pawn_moves() {
    let mut board = Board::new();
    let mut pieces = vec![];
    let nobody = Player::new(Color::White);
    let pawn = place(&mut board, &mut pieces, PieceKind::Pawn, Color::Black, Square::new(6, 4));
    place(&mut board, &mut pieces, PieceKind::Rook, Color::White, Square::new(5, 3));
    place(&mut board, &mut pieces, PieceKind::Rook, Color::Black, Square::new(5, 5));

    assert!(pawn.check_destination(Square::new(5, 4), &board, &nobody).is_ok());
    assert!(pawn.check_destination(Square::new(4, 4), &board, &nobody).is_ok());
    assert!(pawn.check_destination(Square::new(5, 3), &board, &nobody).is_ok());
    assert!(pawn.check_destination(Square::new(5, 5), &board, &nobody).is_err());
    assert!(pawn.check_destination(Square::new(7, 4), &board, &nobody).is_err());
    assert!(pawn.check_destination(Square::new(3, 4), &board, &nobody).is_err());

    let mut moved = pawn;
    moved.set_moved();
    assert!(moved.check_destination(Square::new(4, 4), &board, &nobody).is_err());
}

#[test]
fn pawn_without_moves_says_so() {
    let mut board = Board::new();
    let mut pieces = vec![];
    let nobody = Player::new(Color::Black);
    let pawn = place(&mut board, &mut pieces, PieceKind::Pawn, Color::White, Square::new(1, 0));
    place(&mut board, &mut pieces, PieceKind::Knight, Color::White, Square::new(2, 0));

    let err = pawn
        .check_destination(Square::new(2, 1), &board, &nobody)
        .unwrap_err();
    assert_eq!(err.kind(), MoveErrorKind::IllegalMove);
    assert_eq!(err.message(), "No Valid Moves for Piece");
}

#[test]
fn enemy_in_front_blocks_the_push_but_not_the_capture() {
    let mut board = Board::new();
    let mut pieces = vec![];
    let nobody = Player::new(Color::Black);
    let blocked = place(&mut board, &mut pieces, PieceKind::Pawn, Color::White, Square::new(1, 4));
    let beside = place(&mut board, &mut pieces, PieceKind::Pawn, Color::White, Square::new(1, 3));
    place(&mut board, &mut pieces, PieceKind::Knight, Color::Black, Square::new(2, 4));

    let err = blocked
        .check_destination(Square::new(2, 4), &board, &nobody)
        .unwrap_err();
    assert_eq!(err.message(), "No Valid Moves for Piece");
    assert!(blocked.check_destination(Square::new(3, 4), &board, &nobody).is_err());

    assert!(beside.check_destination(Square::new(2, 4), &board, &nobody).is_ok());
    assert!(beside.check_destination(Square::new(3, 3), &board, &nobody).is_ok());

    // two squares ahead only stops the double step
    let mut board = Board::new();
    let mut pieces = vec![];
    let pawn = place(&mut board, &mut pieces, PieceKind::Pawn, Color::White, Square::new(1, 4));
    place(&mut board, &mut pieces, PieceKind::Knight, Color::Black, Square::new(3, 4));
    assert!(pawn.check_destination(Square::new(2, 4), &board, &nobody).is_ok());
    assert!(pawn.check_destination(Square::new(3, 4), &board, &nobody).is_err());
}

#[test]
fn pawn_takes_enemy_marker_diagonally() {
    let mut board = Board::new();
    let mut pieces = vec![];
    let nobody = Player::new(Color::White);
    let pawn = place(&mut board, &mut pieces, PieceKind::Pawn, Color::Black, Square::new(3, 3));
    board.place(Square::new(2, 4), Some(Occupant::Marker(Color::White)));

    assert!(pawn.check_destination(Square::new(2, 4), &board, &nobody).is_ok());
    assert!(pawn.check_destination(Square::new(2, 2), &board, &nobody).is_err());
}

#[test]
fn attacks_ignore_what_sits_on_the_target() {
    let mut board = Board::new();
    let mut pieces = vec![];
    let pawn = place(&mut board, &mut pieces, PieceKind::Pawn, Color::White, Square::new(3, 3));
    let king = place(&mut board, &mut pieces, PieceKind::King, Color::White, Square::new(0, 0));

    assert!(pawn.attacks(Square::new(4, 2), &board));
    assert!(pawn.attacks(Square::new(4, 4), &board));
    assert!(!pawn.attacks(Square::new(4, 3), &board));
    assert!(!pawn.attacks(Square::new(2, 2), &board));
    assert!(king.attacks(Square::new(1, 1), &board));
    assert!(!king.attacks(Square::new(0, 0), &board));
    assert!(!king.attacks(Square::new(2, 2), &board));
}

#[test]
fn each_side_has_its_own_glyphs() {
    for kind in ALL_PIECES.iter() {
        assert_ne!(kind.to_char(Color::White), kind.to_char(Color::Black));
        assert_ne!(kind.to_char(Color::White), ' ');
    }
    assert_eq!(PieceKind::EnPassantMarker.to_char(Color::White), ' ');
    assert_eq!(Piece::new(PieceKind::King, Color::Black, Square::new(7, 4)).glyph(), '♚');
}
