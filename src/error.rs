use crate::piece::Piece;
use crate::square::Square;
use failure::Fail;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Sometimes, bad stuff happens.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum Error {
    /// The position described by a `GameBuilder` cannot be played.
    #[fail(display = "The board specified did not pass sanity checks: {}", reason)]
    InvalidBoard { reason: String },
}

/// Why was a move refused?
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MoveErrorKind {
    /// The start or end square is off the board.
    OutOfBounds,
    /// There is no piece on the start square.
    NoPieceAtSource,
    /// The piece on the start square belongs to the other side.
    WrongOwner,
    /// The start and end squares are the same.
    NullMove,
    /// The piece cannot reach the end square.
    IllegalMove,
    /// The end square holds a piece of the moving side.
    FriendlyCapture,
}

impl fmt::Display for MoveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match *self {
            MoveErrorKind::OutOfBounds => "OutOfBounds",
            MoveErrorKind::NoPieceAtSource => "NoPieceAtSource",
            MoveErrorKind::WrongOwner => "WrongOwner",
            MoveErrorKind::NullMove => "NullMove",
            MoveErrorKind::IllegalMove => "IllegalMove",
            MoveErrorKind::FriendlyCapture => "FriendlyCapture",
        };
        write!(f, "{}", tag)
    }
}

/// A refused move.  Nothing on the board changed.
///
/// ```
/// use chess_referee::{Color, Game, MoveErrorKind, Square};
///
/// let mut game = Game::new();
/// let err = game
///     .make_move(Color::White, Square::new(0, 0), Square::new(0, 0))
///     .unwrap_err();
/// assert_eq!(err.kind(), MoveErrorKind::NullMove);
/// assert_eq!(err.start(), Square::new(0, 0));
/// assert!(err.piece().is_some());
/// ```
#[derive(Debug, Fail, Clone, Copy, PartialEq)]
#[fail(display = "{}: {}", kind, message)]
pub struct MoveError {
    kind: MoveErrorKind,
    message: &'static str,
    piece: Option<Piece>,
    start: Square,
    end: Square,
}

impl MoveError {
    pub(crate) fn new(
        kind: MoveErrorKind,
        message: &'static str,
        piece: Option<Piece>,
        start: Square,
        end: Square,
    ) -> MoveError {
        MoveError {
            kind,
            message,
            piece,
            start,
            end,
        }
    }

    /// The category of the failure.
    pub fn kind(&self) -> MoveErrorKind {
        self.kind
    }

    /// A human readable explanation.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// The piece involved, if any.
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// The square the move started from.
    pub fn start(&self) -> Square {
        self.start
    }

    /// The square the move tried to reach.
    pub fn end(&self) -> Square {
        self.end
    }
}

#[test]
fn move_error_display() {
    let err = MoveError::new(
        MoveErrorKind::OutOfBounds,
        "Position of Move not on the board",
        None,
        Square::new(1, 1),
        Square::new(8, 1),
    );
    assert_eq!(
        format!("{}", err),
        "OutOfBounds: Position of Move not on the board"
    );
}
