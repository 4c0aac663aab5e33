use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::game::Game;
use crate::square::all_squares;
use arrayvec::ArrayVec;
use std::iter::ExactSizeIterator;

/// The most move requests one side can have accepted: every source to every other square.
/// `GameBuilder` allows any number of pieces, so no tighter bound holds.
pub const MAX_MOVES: usize = 64 * 63;

/// Enumerate every move request a side could make right now and have accepted.
///
/// A move is listed when `Game::make_move` would accept it for `color`.  Like `make_move`, only
/// king moves are checked for walking into check; a move that exposes the king some other way
/// is still listed.  `Game::is_checkmate` plays each of them on a copy of the game to find out.
///
/// # Examples
///
/// ```
/// use chess_referee::{Color, Game, MoveGen};
///
/// let game = Game::new();
///
/// // sixteen pawn moves and four knight moves
/// let iterable = MoveGen::new_legal(&game, Color::White);
/// assert_eq!(iterable.len(), 20);
/// ```
pub struct MoveGen {
    moves: ArrayVec<ChessMove, MAX_MOVES>,
    index: usize,
}

impl MoveGen {
    /// Create a new `MoveGen` for `color` on `game`.
    pub fn new_legal(game: &Game, color: Color) -> MoveGen {
        let mut moves = ArrayVec::new();
        for (_, piece) in game.player(color).active_pieces() {
            let source = match piece.position() {
                Some(source) => source,
                None => continue,
            };
            for dest in all_squares() {
                if game.validate(color, source, dest).is_ok() {
                    moves.push(ChessMove::new(source, dest));
                }
            }
        }
        MoveGen { moves, index: 0 }
    }

    /// Is this particular move in the list?
    pub fn contains(&self, chess_move: ChessMove) -> bool {
        self.moves.contains(&chess_move)
    }
}

impl ExactSizeIterator for MoveGen {
    /// Give the exact length of this iterator
    fn len(&self) -> usize {
        self.moves.len() - self.index
    }
}

impl Iterator for MoveGen {
    type Item = ChessMove;

    /// Give a size_hint to some functions that need it
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    /// Find the next chess move.
    fn next(&mut self) -> Option<ChessMove> {
        let result = self.moves.get(self.index).copied();
        if result.is_some() {
            self.index += 1;
        }
        result
    }
}

#[cfg(test)]
use crate::game_builder::GameBuilder;
#[cfg(test)]
use crate::piece::PieceKind;
#[cfg(test)]
use crate::square::Square;
#[cfg(test)]
use std::convert::TryInto;

#[test]
fn both_sides_have_twenty_moves_at_the_start() {
    let mut game = Game::new();
    assert_eq!(MoveGen::new_legal(&game, Color::White).len(), 20);
    assert_eq!(MoveGen::new_legal(&game, Color::Black).len(), 20);

    game.make_move(Color::White, Square::new(1, 4), Square::new(3, 4))
        .unwrap();
    assert_eq!(MoveGen::new_legal(&game, Color::Black).len(), 20);

    // the queen and the bishop on (0, 5) now have room on the freed diagonals, the king one step
    assert_eq!(MoveGen::new_legal(&game, Color::White).len(), 30);
}

#[test]
fn listed_moves_are_accepted() {
    let game = Game::new();
    for m in MoveGen::new_legal(&game, Color::Black) {
        let mut copy = game.clone();
        assert!(copy
            .make_move(Color::Black, m.get_source(), m.get_dest())
            .is_ok());
    }
    let moves = MoveGen::new_legal(&game, Color::White);
    assert!(moves.contains(ChessMove::new(Square::new(0, 1), Square::new(2, 2))));
    assert!(!moves.contains(ChessMove::new(Square::new(0, 0), Square::new(2, 0))));
}

#[test]
fn crowded_board_lists_every_move() {
    // queens on every edge square, the knight on (2, 1) checks the king on (0, 0)
    let mut bb = GameBuilder::new();
    for square in all_squares() {
        if square.row() == 0 || square.row() == 7 || square.col() == 0 || square.col() == 7 {
            bb.piece(square, PieceKind::Queen, Color::White);
        }
    }
    let game: Game = bb
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(7, 7), PieceKind::King, Color::Black)
        .piece(Square::new(2, 1), PieceKind::Knight, Color::Black)
        .try_into()
        .unwrap();

    let moves = game.legal_moves(Color::White);
    assert!(moves.len() > 256);
    assert!(moves.contains(ChessMove::new(Square::new(0, 1), Square::new(2, 1))));
    assert!(moves.contains(ChessMove::new(Square::new(0, 0), Square::new(1, 1))));

    assert!(game.is_checked(Color::White));
    assert!(!game.is_checkmate(Color::White));
}
