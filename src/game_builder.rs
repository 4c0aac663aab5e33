use crate::color::{Color, ALL_COLORS};
use crate::error::Error;
use crate::game::Game;
use crate::piece::{PieceKind, BACK_RANK};
use crate::square::{all_squares, Square, NUM_SQUARES};

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

/// Represents a position that has *not* been checked for playability.
///
/// This is the way to set up a `Game` other than the standard opening, mostly for tests and
/// puzzles.  Pieces can be placed anywhere; the checks happen when the builder is turned into a
/// `Game`.  Pawns that are not on their starting row are considered to have moved already.
///
/// ```
/// use chess_referee::{Color, Game, GameBuilder, PieceKind, Square};
/// use std::convert::TryFrom;
///
/// let mut position = GameBuilder::new();
/// position.piece(Square::new(0, 0), PieceKind::King, Color::White);
/// position.piece(Square::new(7, 0), PieceKind::Rook, Color::Black);
///
/// // You can index the position by the square:
/// assert_eq!(position[Square::new(0, 0)], Some((PieceKind::King, Color::White)));
///
/// // Black has no king yet.
/// assert!(Game::try_from(&position).is_err());
///
/// position.piece(Square::new(7, 7), PieceKind::King, Color::Black);
/// let game = Game::try_from(position).unwrap();
/// assert!(game.is_checked(Color::White));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameBuilder {
    pieces: [Option<(PieceKind, Color)>; NUM_SQUARES],
    side_to_move: Color,
}

impl GameBuilder {
    /// Construct a new, empty, GameBuilder with White to move.
    pub fn new() -> GameBuilder {
        GameBuilder {
            pieces: [None; NUM_SQUARES],
            side_to_move: Color::White,
        }
    }

    /// Get the side to move.
    pub fn get_side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Set the side to move.
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn side_to_move(&mut self, color: Color) -> &mut Self {
        self.side_to_move = color;
        self
    }

    /// Set a piece on a square, overwriting whatever was there.
    ///
    /// This function can be used on self directly or in a builder pattern.
    ///
    /// ```
    /// use chess_referee::{Color, GameBuilder, PieceKind, Square};
    ///
    /// GameBuilder::new()
    ///     .piece(Square::new(0, 0), PieceKind::Rook, Color::White)
    ///     .piece(Square::new(7, 0), PieceKind::Rook, Color::Black);
    /// ```
    pub fn piece(&mut self, square: Square, kind: PieceKind, color: Color) -> &mut Self {
        self[square] = Some((kind, color));
        self
    }

    /// Clear a square on the board.
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn clear_square(&mut self, square: Square) -> &mut Self {
        self[square] = None;
        self
    }
}

impl Index<Square> for GameBuilder {
    type Output = Option<(PieceKind, Color)>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Square> for GameBuilder {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl Default for GameBuilder {
    /// The standard starting position.
    fn default() -> GameBuilder {
        let mut result = GameBuilder::new();
        for color in ALL_COLORS.iter() {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                result.piece(Square::new(color.to_my_backrank(), col as i8), *kind, *color);
            }
            for col in 0..8 {
                result.piece(Square::new(color.to_second_rank(), col), PieceKind::Pawn, *color);
            }
        }
        result
    }
}

impl TryFrom<&GameBuilder> for Game {
    type Error = Error;

    fn try_from(builder: &GameBuilder) -> Result<Self, Self::Error> {
        for color in ALL_COLORS.iter() {
            let kings = builder
                .pieces
                .iter()
                .filter(|p| **p == Some((PieceKind::King, *color)))
                .count();
            if kings != 1 {
                return Err(Error::InvalidBoard {
                    reason: format!("{} has {} kings", color, kings),
                });
            }
        }

        let mut game = Game::empty();
        for square in all_squares() {
            let (kind, color) = match builder[square] {
                Some(piece) => piece,
                None => continue,
            };
            match kind {
                PieceKind::EnPassantMarker => {
                    return Err(Error::InvalidBoard {
                        reason: format!("en passant marker placed on {}", square),
                    })
                }
                PieceKind::Pawn if square.row() == 0 || square.row() == 7 => {
                    return Err(Error::InvalidBoard {
                        reason: format!("pawn on a back rank at {}", square),
                    })
                }
                _ => {}
            }
            let moved = kind == PieceKind::Pawn && square.row() != color.to_second_rank();
            game.add_piece(kind, color, square, moved);
        }
        game.set_side_to_move(builder.side_to_move);

        Ok(game)
    }
}

impl TryFrom<GameBuilder> for Game {
    type Error = Error;

    fn try_from(builder: GameBuilder) -> Result<Self, Self::Error> {
        Game::try_from(&builder)
    }
}

impl TryFrom<&mut GameBuilder> for Game {
    type Error = Error;

    fn try_from(builder: &mut GameBuilder) -> Result<Self, Self::Error> {
        Game::try_from(&*builder)
    }
}

impl From<&Game> for GameBuilder {
    /// Copy the pieces still on the board.  En passant markers are left behind.
    fn from(game: &Game) -> Self {
        let mut result = GameBuilder::new();
        for color in ALL_COLORS.iter() {
            for (_, piece) in game.player(*color).active_pieces() {
                if let Some(square) = piece.position() {
                    result.piece(square, piece.kind(), piece.color());
                }
            }
        }
        result.side_to_move(game.side_to_move());
        result
    }
}

impl From<Game> for GameBuilder {
    fn from(game: Game) -> Self {
        (&game).into()
    }
}

#[cfg(test)]
use std::convert::TryInto;

#[test]
fn default_builds_the_starting_position() {
    let built: Game = GameBuilder::default().try_into().unwrap();
    let fresh = Game::new();
    for square in all_squares() {
        assert_eq!(built.piece_on(square), fresh.piece_on(square));
    }
    assert_eq!(built.side_to_move(), Color::White);
}

#[test]
fn needs_exactly_one_king_each() {
    let res: Result<Game, _> = GameBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .try_into();
    assert!(res.is_err());

    let res: Result<Game, _> = GameBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(0, 1), PieceKind::King, Color::White)
        .piece(Square::new(7, 7), PieceKind::King, Color::Black)
        .try_into();
    match res {
        Err(Error::InvalidBoard { reason }) => assert_eq!(reason, "White has 2 kings"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn markers_and_stranded_pawns_are_refused() {
    let mut bb = GameBuilder::new();
    bb.piece(Square::new(0, 4), PieceKind::King, Color::White)
        .piece(Square::new(7, 4), PieceKind::King, Color::Black)
        .piece(Square::new(2, 4), PieceKind::EnPassantMarker, Color::White);
    assert!(Game::try_from(&bb).is_err());

    bb.clear_square(Square::new(2, 4));
    assert!(Game::try_from(&bb).is_ok());

    bb.piece(Square::new(7, 0), PieceKind::Pawn, Color::White);
    assert!(Game::try_from(&bb).is_err());
}

#[test]
fn pawns_off_their_start_row_have_moved() {
    let game: Game = GameBuilder::new()
        .piece(Square::new(0, 4), PieceKind::King, Color::White)
        .piece(Square::new(7, 4), PieceKind::King, Color::Black)
        .piece(Square::new(1, 0), PieceKind::Pawn, Color::White)
        .piece(Square::new(3, 1), PieceKind::Pawn, Color::White)
        .piece(Square::new(6, 0), PieceKind::Pawn, Color::Black)
        .side_to_move(Color::Black)
        .try_into()
        .unwrap();

    assert!(!game.piece_on(Square::new(1, 0)).unwrap().has_moved());
    assert!(game.piece_on(Square::new(3, 1)).unwrap().has_moved());
    assert!(!game.piece_on(Square::new(6, 0)).unwrap().has_moved());
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn round_trip_through_a_game() {
    let mut game = Game::new();
    game.play(Square::new(1, 4), Square::new(3, 4)).unwrap();
    let bb: GameBuilder = (&game).into();

    assert_eq!(bb[Square::new(3, 4)], Some((PieceKind::Pawn, Color::White)));
    assert_eq!(bb[Square::new(1, 4)], None);
    // the marker stays behind
    assert_eq!(bb[Square::new(2, 4)], None);
    assert_eq!(bb.get_side_to_move(), Color::Black);

    let copy: Game = bb.try_into().unwrap();
    assert!(copy.piece_on(Square::new(3, 4)).unwrap().has_moved());
}
