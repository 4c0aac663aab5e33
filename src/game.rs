use crate::board::{Board, Occupant};
use crate::color::{Color, ALL_COLORS, NUM_COLORS};
use crate::error::{MoveError, MoveErrorKind};
use crate::movegen::MoveGen;
use crate::piece::{EnPassantMarker, Piece, PieceId, PieceKind, BACK_RANK};
use crate::player::Player;
use crate::square::Square;
use std::fmt;

/// A game in progress: the board, both players, and the pieces each side has lost.
///
/// `Game` is the only thing that moves pieces.  Every change to a board slot is mirrored in the
/// position of the piece concerned in the same step.
///
/// ```
/// use chess_referee::{Color, Game, Square};
///
/// let mut game = Game::new();
/// game.make_move(Color::White, Square::new(1, 4), Square::new(3, 4)).unwrap();
/// game.make_move(Color::Black, Square::new(6, 4), Square::new(4, 4)).unwrap();
/// assert_eq!(game.side_to_move(), Color::White);
/// assert!(!game.is_checked(Color::White));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    players: [Player; NUM_COLORS],
    captured: [Vec<Piece>; NUM_COLORS],
    side_to_move: Color,
}

impl Game {
    /// Create a new `Game` with the initial position.
    pub fn new() -> Game {
        let mut game = Game::empty();
        game.new_game();
        game
    }

    /// A game with nothing on the board.  Only `GameBuilder` hands these out, once populated.
    pub(crate) fn empty() -> Game {
        Game {
            board: Board::new(),
            players: [Player::new(Color::White), Player::new(Color::Black)],
            captured: [vec![], vec![]],
            side_to_move: Color::White,
        }
    }

    /// Throw the current game away and set up the standard starting position.
    pub fn new_game(&mut self) {
        self.board = Board::new();
        for color in ALL_COLORS.iter() {
            self.players[color.to_index()].clear();
            self.captured[color.to_index()].clear();
        }
        self.side_to_move = Color::White;

        for color in ALL_COLORS.iter() {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                self.add_piece(*kind, *color, Square::new(color.to_my_backrank(), col as i8), false);
            }
            for col in 0..8 {
                self.add_piece(PieceKind::Pawn, *color, Square::new(color.to_second_rank(), col), false);
            }
        }
    }

    /// Create a piece for `color` and put it on `square`.
    pub(crate) fn add_piece(&mut self, kind: PieceKind, color: Color, square: Square, moved: bool) {
        let mut piece = Piece::new(kind, color, square);
        if moved {
            piece.set_moved();
        }
        let id = self.players[color.to_index()].add_piece(piece);
        self.board.place(square, Some(Occupant::Piece(id)));
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Whose turn is it?
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The occupancy grid.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player of a particular color.
    #[inline]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.to_index()]
    }

    /// Look a piece up by handle.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        self.player(id.color()).piece(id)
    }

    /// What stands on `square`?  An en passant marker comes back as a piece of kind
    /// `EnPassantMarker`, which renders blank.  Squares off the board hold nothing.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        if !square.is_on_board() {
            return None;
        }
        match self.board.occupant(square)? {
            Occupant::Piece(id) => Some(*self.piece(id)),
            Occupant::Marker(color) => self.player(color).en_passant().map(|m| m.to_piece()),
        }
    }

    /// The pieces of `color` captured so far, in order of capture.
    #[inline]
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color.to_index()]
    }

    /// White pieces captured so far.
    #[inline]
    pub fn captured_white(&self) -> &[Piece] {
        self.captured(Color::White)
    }

    /// Black pieces captured so far.
    #[inline]
    pub fn captured_black(&self) -> &[Piece] {
        self.captured(Color::Black)
    }

    /// Is the king of `color` attacked?
    pub fn is_checked(&self, color: Color) -> bool {
        self.player(color)
            .is_checked(&self.board, self.player(!color))
    }

    /// Is `color` checked with no way out?
    ///
    /// Every move `color` could request is played on a copy of the game; if none of them
    /// leaves the king safe, it is mate.  The game itself is never touched.
    ///
    /// ```
    /// use chess_referee::{Color, Game, Square};
    ///
    /// let mut game = Game::new();
    /// game.play(Square::new(1, 5), Square::new(2, 5)).unwrap();
    /// game.play(Square::new(6, 4), Square::new(4, 4)).unwrap();
    /// game.play(Square::new(1, 6), Square::new(3, 6)).unwrap();
    /// game.play(Square::new(7, 3), Square::new(3, 7)).unwrap();
    /// assert!(game.is_checkmate(Color::White));
    /// ```
    pub fn is_checkmate(&self, color: Color) -> bool {
        if !self.is_checked(color) {
            return false;
        }
        !MoveGen::new_legal(self, color).any(|m| {
            let mut scratch = self.clone();
            match scratch.validate(color, m.get_source(), m.get_dest()) {
                Ok(id) => {
                    scratch.apply(color, id, m.get_source(), m.get_dest());
                    !scratch.is_checked(color)
                }
                Err(_) => false,
            }
        })
    }

    /// Every move request `color` could make right now and have accepted.
    pub fn legal_moves(&self, color: Color) -> MoveGen {
        MoveGen::new_legal(self, color)
    }

    /// Move the piece on `start` to `end` on behalf of `side`.
    ///
    /// The request goes through, in order: both squares on the board, a piece on `start`, the
    /// piece belongs to `side`, `start` differs from `end`, the piece can reach `end`, and `end`
    /// does not hold one of `side`'s own pieces.  The first check that fails is reported and
    /// nothing changes.  Otherwise the move is applied in full and the turn passes to the
    /// other side.
    ///
    /// The side to move is tracked but not enforced here; see `play`.
    pub fn make_move(&mut self, side: Color, start: Square, end: Square) -> Result<(), MoveError> {
        let id = self.validate(side, start, end)?;
        self.apply(side, id, start, end);
        Ok(())
    }

    /// Move for whichever side is to move.
    pub fn play(&mut self, start: Square, end: Square) -> Result<(), MoveError> {
        self.make_move(self.side_to_move, start, end)
    }

    /// Run every check `make_move` does, without changing anything.
    pub(crate) fn validate(&self, side: Color, start: Square, end: Square) -> Result<PieceId, MoveError> {
        let refuse = |kind: MoveErrorKind,
                      message: &'static str,
                      piece: Option<Piece>|
         -> Result<PieceId, MoveError> {
            Err(MoveError::new(kind, message, piece, start, end))
        };

        if !start.is_on_board() {
            return refuse(MoveErrorKind::OutOfBounds, "Position of Piece not on the board", None);
        }
        if !end.is_on_board() {
            return refuse(MoveErrorKind::OutOfBounds, "Position of Move not on the board", None);
        }

        // a marker is bookkeeping, not a piece
        let id = match self.board.occupant(start) {
            Some(Occupant::Piece(id)) => id,
            Some(Occupant::Marker(_)) | None => {
                return refuse(
                    MoveErrorKind::NoPieceAtSource,
                    "No Piece located on the selected position",
                    None,
                )
            }
        };
        let piece = *self.piece(id);

        if id.color() != side {
            return refuse(MoveErrorKind::WrongOwner, "Cannot move the opponent's Piece", Some(piece));
        }
        if start == end {
            return refuse(MoveErrorKind::NullMove, "Can't move a piece to its own location", Some(piece));
        }

        piece.check_destination(end, &self.board, self.player(!side))?;

        if let Some(Occupant::Piece(target)) = self.board.occupant(end) {
            if target.color() == side {
                return refuse(MoveErrorKind::FriendlyCapture, "Cannot capture your own Piece", Some(piece));
            }
        }

        Ok(id)
    }

    /// Apply a move `validate` accepted.  Cannot fail.
    fn apply(&mut self, side: Color, id: PieceId, start: Square, end: Square) {
        let kind = self.piece(id).kind();

        match self.board.occupant(end) {
            None => {}
            Some(Occupant::Piece(target)) => self.capture(target),
            Some(Occupant::Marker(owner)) => {
                // the marker is used up either way; only a pawn takes the pawn behind it
                let marker = self.players[owner.to_index()].take_en_passant();
                if kind == PieceKind::Pawn {
                    if let Some(marker) = marker {
                        self.capture(marker.parent());
                    }
                }
            }
        }

        self.board.place(start, None);
        self.board.place(end, Some(Occupant::Piece(id)));
        {
            let piece = self.players[side.to_index()].piece_mut(id);
            piece.set_position(Some(end));
            piece.set_moved();
        }

        // a marker lives for exactly one enemy move
        if let Some(marker) = self.players[(!side).to_index()].take_en_passant() {
            self.remove_marker(marker);
        }

        if kind == PieceKind::Pawn && (end.row() - start.row()).abs() == 2 {
            if let Some(stale) = self.players[side.to_index()].take_en_passant() {
                self.remove_marker(stale);
            }
            let skipped = Square::new((start.row() + end.row()) / 2, start.col());
            self.board.place(skipped, Some(Occupant::Marker(side)));
            self.players[side.to_index()].set_en_passant(Some(EnPassantMarker::new(skipped, id)));
        }

        self.side_to_move = !side;
    }

    /// Take a piece off the board and onto its owner's captured list.
    fn capture(&mut self, id: PieceId) {
        let color = id.color();
        let piece = self.players[color.to_index()].piece_mut(id);
        if let Some(square) = piece.position() {
            if self.board.occupant(square) == Some(Occupant::Piece(id)) {
                self.board.place(square, None);
            }
        }
        piece.set_position(None);
        let captured = *piece;
        self.captured[color.to_index()].push(captured);
    }

    /// Clear a marker's square, unless something else already stands there.
    fn remove_marker(&mut self, marker: EnPassantMarker) {
        if self.board.occupant(marker.square()) == Some(Occupant::Marker(marker.color())) {
            self.board.place(marker.square(), None);
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl fmt::Display for Game {
    /// Print the board with row 7 on top, one glyph per piece.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let separator = "+---".repeat(8) + "+";
        writeln!(f, "{}", separator)?;
        for row in (0..8).rev() {
            for col in 0..8 {
                let glyph = self
                    .piece_on(Square::new(row, col))
                    .map(|p| p.glyph())
                    .unwrap_or(' ');
                write!(f, "| {} ", glyph)?;
            }
            writeln!(f, "|")?;
            writeln!(f, "{}", separator)?;
        }
        Ok(())
    }
}

#[cfg(test)]
use crate::game_builder::GameBuilder;
#[cfg(test)]
use crate::square::all_squares;
#[cfg(test)]
use std::convert::TryInto;

#[cfg(test)]
fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

#[cfg(test)]
fn build(pieces: &[(Square, PieceKind, Color)]) -> Game {
    let mut builder = GameBuilder::new();
    for (square, kind, color) in pieces.iter() {
        builder.piece(*square, *kind, *color);
    }
    builder.try_into().expect("valid position")
}

#[cfg(test)]
fn kind_of(err: Result<(), MoveError>) -> MoveErrorKind {
    err.expect_err("move should be refused").kind()
}

#[test]
fn new_game_sets_up_standard_position() {
    let game = Game::new();
    for color in ALL_COLORS.iter() {
        let player = game.player(*color);
        assert_eq!(player.pieces().len(), 16);
        assert_eq!(player.active_pieces().count(), 16);
        assert_eq!(player.king().unwrap().position(), Some(sq(color.to_my_backrank(), 4)));
        for col in 0..8 {
            let back = game.piece_on(sq(color.to_my_backrank(), col)).unwrap();
            assert_eq!(back.kind(), BACK_RANK[col as usize]);
            assert_eq!(back.color(), *color);
            assert!(!back.has_moved());
            let pawn = game.piece_on(sq(color.to_second_rank(), col)).unwrap();
            assert_eq!(pawn.kind(), PieceKind::Pawn);
            assert_eq!(pawn.color(), *color);
        }
    }
    for row in 2..6 {
        for col in 0..8 {
            assert!(game.piece_on(sq(row, col)).is_none());
        }
    }
    assert_eq!(game.board().count(), 32);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn new_game_resets_everything() {
    let mut game = Game::new();
    game.play(sq(1, 4), sq(3, 4)).unwrap();
    game.play(sq(6, 3), sq(4, 3)).unwrap();
    game.play(sq(3, 4), sq(4, 3)).unwrap();
    assert_eq!(game.captured_black().len(), 1);

    game.new_game();
    assert_eq!(game, Game::new());
    assert!(game.captured_black().is_empty());
}

#[test]
fn out_of_bounds_is_reported_first() {
    let mut game = Game::new();
    let off_board = [sq(-1, 0), sq(0, -1), sq(8, 0), sq(0, 8), sq(8, 8), sq(-5, 12)];
    for bad in off_board.iter() {
        assert_eq!(kind_of(game.make_move(Color::White, *bad, sq(2, 2))), MoveErrorKind::OutOfBounds);
        assert_eq!(kind_of(game.make_move(Color::White, sq(1, 0), *bad)), MoveErrorKind::OutOfBounds);
        // even from an empty square or an enemy piece
        assert_eq!(kind_of(game.make_move(Color::White, sq(4, 4), *bad)), MoveErrorKind::OutOfBounds);
        assert_eq!(kind_of(game.make_move(Color::Black, sq(1, 0), *bad)), MoveErrorKind::OutOfBounds);
    }
}

#[test]
fn gate_errors() {
    let mut game = Game::new();
    assert_eq!(kind_of(game.make_move(Color::White, sq(3, 3), sq(4, 3))), MoveErrorKind::NoPieceAtSource);
    assert_eq!(kind_of(game.make_move(Color::White, sq(6, 3), sq(5, 3))), MoveErrorKind::WrongOwner);
    assert_eq!(kind_of(game.make_move(Color::White, sq(0, 0), sq(0, 0))), MoveErrorKind::NullMove);
    assert_eq!(kind_of(game.make_move(Color::White, sq(0, 0), sq(3, 0))), MoveErrorKind::IllegalMove);
    assert_eq!(kind_of(game.make_move(Color::White, sq(0, 1), sq(1, 3))), MoveErrorKind::FriendlyCapture);

    let err = game
        .make_move(Color::White, sq(6, 3), sq(5, 3))
        .unwrap_err();
    assert_eq!(err.piece().map(|p| p.kind()), Some(PieceKind::Pawn));
    assert_eq!(err.start(), sq(6, 3));
    assert_eq!(err.end(), sq(5, 3));
}

#[test]
fn failed_moves_change_nothing() {
    let mut game = Game::new();
    game.play(sq(1, 4), sq(3, 4)).unwrap();
    let before = game.clone();

    let attempts = [
        (Color::Black, sq(9, 0), sq(5, 0)),
        (Color::Black, sq(4, 4), sq(3, 4)),
        (Color::Black, sq(2, 4), sq(3, 4)),
        (Color::Black, sq(3, 4), sq(4, 4)),
        (Color::Black, sq(6, 0), sq(6, 0)),
        (Color::Black, sq(7, 0), sq(4, 0)),
        (Color::Black, sq(7, 4), sq(6, 4)),
        (Color::Black, sq(6, 3), sq(2, 4)),
    ];
    for (side, start, end) in attempts.iter() {
        assert!(game.make_move(*side, *start, *end).is_err());
        assert_eq!(game, before);
    }
}

#[test]
fn scenario_null_move_then_double_step() {
    let mut game = Game::new();
    assert_eq!(kind_of(game.make_move(Color::White, sq(0, 0), sq(0, 0))), MoveErrorKind::NullMove);
    game.make_move(Color::White, sq(1, 0), sq(3, 0)).unwrap();
    assert_eq!(game.board().occupant(sq(2, 0)), Some(Occupant::Marker(Color::White)));
    assert_eq!(game.player(Color::White).en_passant().unwrap().square(), sq(2, 0));
    assert_eq!(game.piece_on(sq(2, 0)).unwrap().kind(), PieceKind::EnPassantMarker);
    assert_eq!(game.piece_on(sq(3, 0)).unwrap().kind(), PieceKind::Pawn);
}

#[test]
fn marker_expires_after_one_enemy_move() {
    let mut game = build(&[
        (sq(0, 4), PieceKind::King, Color::White),
        (sq(1, 4), PieceKind::Pawn, Color::White),
        (sq(7, 4), PieceKind::King, Color::Black),
        (sq(3, 3), PieceKind::Pawn, Color::Black),
    ]);
    game.play(sq(1, 4), sq(3, 4)).unwrap();
    assert_eq!(game.board().occupant(sq(2, 4)), Some(Occupant::Marker(Color::White)));

    game.play(sq(7, 4), sq(7, 3)).unwrap();
    assert_eq!(game.board().occupant(sq(2, 4)), None);
    assert!(game.player(Color::White).en_passant().is_none());

    game.play(sq(0, 4), sq(0, 3)).unwrap();
    assert_eq!(kind_of(game.play(sq(3, 3), sq(2, 4))), MoveErrorKind::IllegalMove);
}

#[test]
fn en_passant_captures_the_pawn_behind_the_marker() {
    let mut game = build(&[
        (sq(0, 4), PieceKind::King, Color::White),
        (sq(1, 4), PieceKind::Pawn, Color::White),
        (sq(7, 4), PieceKind::King, Color::Black),
        (sq(3, 3), PieceKind::Pawn, Color::Black),
    ]);
    game.make_move(Color::White, sq(1, 4), sq(3, 4)).unwrap();
    game.make_move(Color::Black, sq(3, 3), sq(2, 4)).unwrap();

    assert_eq!(game.board().occupant(sq(3, 4)), None);
    assert_eq!(game.board().occupant(sq(3, 3)), None);
    let taker = game.piece_on(sq(2, 4)).unwrap();
    assert_eq!((taker.kind(), taker.color()), (PieceKind::Pawn, Color::Black));

    assert_eq!(game.captured_white().len(), 1);
    assert_eq!(game.captured_white()[0].kind(), PieceKind::Pawn);
    assert_eq!(game.captured_white()[0].position(), None);
    assert!(game.captured_black().is_empty());
    assert!(game.player(Color::White).en_passant().is_none());

    // the captured pawn stays in its owner's list, inactive
    assert_eq!(game.player(Color::White).pieces().len(), 2);
    assert_eq!(game.player(Color::White).active_pieces().count(), 1);
}

#[test]
fn black_double_step_can_be_taken_by_white() {
    let mut game = build(&[
        (sq(0, 4), PieceKind::King, Color::White),
        (sq(4, 2), PieceKind::Pawn, Color::White),
        (sq(7, 4), PieceKind::King, Color::Black),
        (sq(6, 3), PieceKind::Pawn, Color::Black),
    ]);
    game.set_side_to_move(Color::Black);
    game.play(sq(6, 3), sq(4, 3)).unwrap();
    assert_eq!(game.board().occupant(sq(5, 3)), Some(Occupant::Marker(Color::Black)));
    game.play(sq(4, 2), sq(5, 3)).unwrap();
    assert_eq!(game.captured_black().len(), 1);
    assert_eq!(game.board().occupant(sq(4, 3)), None);
}

#[test]
fn other_pieces_just_displace_a_marker() {
    let mut game = build(&[
        (sq(0, 0), PieceKind::King, Color::White),
        (sq(1, 4), PieceKind::Pawn, Color::White),
        (sq(7, 7), PieceKind::King, Color::Black),
        (sq(4, 3), PieceKind::Knight, Color::Black),
    ]);
    game.play(sq(1, 4), sq(3, 4)).unwrap();
    game.play(sq(4, 3), sq(2, 4)).unwrap();

    assert!(game.captured_white().is_empty());
    assert_eq!(game.piece_on(sq(3, 4)).unwrap().kind(), PieceKind::Pawn);
    assert_eq!(game.piece_on(sq(2, 4)).unwrap().kind(), PieceKind::Knight);
    assert!(game.player(Color::White).en_passant().is_none());
}

#[test]
fn marker_is_not_a_piece_to_move() {
    let mut game = Game::new();
    game.play(sq(1, 2), sq(3, 2)).unwrap();
    assert_eq!(kind_of(game.make_move(Color::White, sq(2, 2), sq(4, 2))), MoveErrorKind::NoPieceAtSource);
}

#[test]
fn sliders_are_blocked_by_friend_and_foe() {
    for blocker in [Color::White, Color::Black].iter() {
        let mut game = build(&[
            (sq(0, 0), PieceKind::Rook, Color::White),
            (sq(0, 3), PieceKind::Knight, *blocker),
            (sq(2, 7), PieceKind::King, Color::White),
            (sq(7, 7), PieceKind::King, Color::Black),
        ]);
        assert_eq!(kind_of(game.play(sq(0, 0), sq(0, 5))), MoveErrorKind::IllegalMove);
        game.play(sq(0, 0), sq(0, 2)).unwrap();
    }
}

#[test]
fn knights_jump() {
    let mut game = Game::new();
    game.play(sq(0, 1), sq(2, 2)).unwrap();
    assert_eq!(game.piece_on(sq(2, 2)).unwrap().kind(), PieceKind::Knight);
    assert!(game.piece_on(sq(2, 2)).unwrap().has_moved());
}

#[test]
fn pawn_double_step_needs_a_clear_path_and_a_fresh_pawn() {
    let mut game = Game::new();
    game.play(sq(0, 1), sq(2, 0)).unwrap();
    game.play(sq(6, 7), sq(5, 7)).unwrap();
    let err = game.play(sq(1, 0), sq(3, 0)).unwrap_err();
    assert_eq!(err.kind(), MoveErrorKind::IllegalMove);
    assert_eq!(err.message(), "No Valid Moves for Piece");

    game.play(sq(1, 7), sq(2, 7)).unwrap();
    game.play(sq(5, 7), sq(4, 7)).unwrap();
    assert_eq!(kind_of(game.play(sq(2, 7), sq(4, 7))), MoveErrorKind::IllegalMove);
    game.play(sq(2, 7), sq(3, 7)).unwrap();
    assert!(game.player(Color::White).en_passant().is_none());
}

#[test]
fn captures_go_to_the_owners_list() {
    let mut game = Game::new();
    game.play(sq(1, 4), sq(3, 4)).unwrap();
    game.play(sq(6, 3), sq(4, 3)).unwrap();
    game.play(sq(3, 4), sq(4, 3)).unwrap();
    assert_eq!(game.captured_black().len(), 1);
    assert!(game.captured_white().is_empty());
    game.play(sq(7, 3), sq(4, 3)).unwrap();
    assert_eq!(game.captured_white().len(), 1);
    assert_eq!(game.piece_on(sq(4, 3)).unwrap().kind(), PieceKind::Queen);
}

#[test]
fn king_does_not_walk_into_check() {
    let mut game = build(&[
        (sq(3, 3), PieceKind::King, Color::White),
        (sq(5, 3), PieceKind::King, Color::Black),
        (sq(0, 5), PieceKind::Rook, Color::Black),
    ]);
    let err = game.play(sq(3, 3), sq(4, 3)).unwrap_err();
    assert_eq!(err.kind(), MoveErrorKind::IllegalMove);
    assert_eq!(err.message(), "Moving into check");
    assert_eq!(kind_of(game.play(sq(3, 3), sq(2, 5))), MoveErrorKind::IllegalMove);
    game.play(sq(3, 3), sq(2, 2)).unwrap();
}

#[test]
fn king_takes_only_undefended_pieces() {
    let mut game = build(&[
        (sq(0, 4), PieceKind::King, Color::White),
        (sq(7, 0), PieceKind::King, Color::Black),
        (sq(1, 4), PieceKind::Knight, Color::Black),
        (sq(7, 4), PieceKind::Rook, Color::Black),
    ]);
    assert_eq!(kind_of(game.play(sq(0, 4), sq(1, 4))), MoveErrorKind::IllegalMove);

    let mut game = build(&[
        (sq(0, 4), PieceKind::King, Color::White),
        (sq(7, 0), PieceKind::King, Color::Black),
        (sq(1, 4), PieceKind::Knight, Color::Black),
    ]);
    game.play(sq(0, 4), sq(1, 4)).unwrap();
    assert_eq!(game.captured_black().len(), 1);
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    game.play(sq(1, 5), sq(2, 5)).unwrap();
    game.play(sq(6, 4), sq(4, 4)).unwrap();
    game.play(sq(1, 6), sq(3, 6)).unwrap();
    assert!(!game.is_checked(Color::White));
    game.play(sq(7, 3), sq(3, 7)).unwrap();

    let before = game.clone();
    assert!(game.is_checked(Color::White));
    assert!(game.is_checkmate(Color::White));
    assert!(!game.is_checked(Color::Black));
    assert!(!game.is_checkmate(Color::Black));
    assert_eq!(game, before);
}

#[test]
fn check_that_can_be_answered_is_not_mate() {
    let game = build(&[
        (sq(0, 4), PieceKind::King, Color::White),
        (sq(7, 4), PieceKind::Rook, Color::Black),
        (sq(7, 0), PieceKind::King, Color::Black),
    ]);
    assert!(game.is_checked(Color::White));
    assert!(!game.is_checkmate(Color::White));
}

#[test]
fn back_rank_mate() {
    let game = build(&[
        (sq(0, 6), PieceKind::King, Color::White),
        (sq(1, 5), PieceKind::Pawn, Color::White),
        (sq(1, 6), PieceKind::Pawn, Color::White),
        (sq(1, 7), PieceKind::Pawn, Color::White),
        (sq(0, 0), PieceKind::Rook, Color::Black),
        (sq(7, 7), PieceKind::King, Color::Black),
    ]);
    assert!(game.is_checkmate(Color::White));

    // a rook that can take the checker breaks the mate
    let game = build(&[
        (sq(0, 6), PieceKind::King, Color::White),
        (sq(1, 5), PieceKind::Pawn, Color::White),
        (sq(1, 6), PieceKind::Pawn, Color::White),
        (sq(1, 7), PieceKind::Pawn, Color::White),
        (sq(5, 0), PieceKind::Rook, Color::White),
        (sq(0, 0), PieceKind::Rook, Color::Black),
        (sq(7, 7), PieceKind::King, Color::Black),
    ]);
    assert!(game.is_checked(Color::White));
    assert!(!game.is_checkmate(Color::White));
}

#[test]
fn pinned_defender_cannot_save_the_king() {
    // the bishop on (2, 5) could block on (0, 3), but that opens the diagonal from (4, 3)
    let pinned = [
        (sq(0, 7), PieceKind::King, Color::White),
        (sq(1, 7), PieceKind::Pawn, Color::White),
        (sq(2, 5), PieceKind::Bishop, Color::White),
        (sq(0, 0), PieceKind::Rook, Color::Black),
        (sq(3, 5), PieceKind::Knight, Color::Black),
        (sq(7, 7), PieceKind::King, Color::Black),
        (sq(4, 3), PieceKind::Bishop, Color::Black),
    ];
    let game = build(&pinned);
    assert!(game.is_checked(Color::White));
    assert!(game.is_checkmate(Color::White));

    let game = build(&pinned[..6]);
    assert!(game.is_checked(Color::White));
    assert!(!game.is_checkmate(Color::White));
}

#[test]
fn exposing_the_king_is_allowed_and_losing_it_is_mate() {
    let mut game = build(&[
        (sq(0, 4), PieceKind::King, Color::White),
        (sq(1, 4), PieceKind::Knight, Color::White),
        (sq(7, 7), PieceKind::King, Color::Black),
        (sq(7, 4), PieceKind::Rook, Color::Black),
    ]);
    game.play(sq(1, 4), sq(2, 2)).unwrap();
    assert!(game.is_checked(Color::White));

    game.play(sq(7, 4), sq(0, 4)).unwrap();
    assert_eq!(game.captured_white().len(), 1);
    assert_eq!(game.captured_white()[0].kind(), PieceKind::King);
    assert_eq!(game.player(Color::White).king().unwrap().position(), None);
    assert!(game.is_checked(Color::White));
    assert!(game.is_checkmate(Color::White));
}

#[test]
fn turn_passes_after_each_move() {
    let mut game = Game::new();
    assert_eq!(kind_of(game.play(sq(6, 0), sq(5, 0))), MoveErrorKind::WrongOwner);
    game.play(sq(1, 0), sq(2, 0)).unwrap();
    assert_eq!(game.side_to_move(), Color::Black);
    game.play(sq(6, 0), sq(5, 0)).unwrap();
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn positions_stay_in_sync_with_the_board() {
    let mut game = Game::new();
    let moves = [
        (sq(1, 4), sq(3, 4)),
        (sq(6, 3), sq(4, 3)),
        (sq(3, 4), sq(4, 3)),
        (sq(6, 2), sq(4, 2)),
        (sq(4, 3), sq(5, 2)),
        (sq(7, 1), sq(5, 2)),
    ];
    for (start, end) in moves.iter() {
        game.play(*start, *end).unwrap();
        for color in ALL_COLORS.iter() {
            for (id, piece) in game.player(*color).active_pieces() {
                let at = piece.position().unwrap();
                assert_eq!(game.board().occupant(at), Some(Occupant::Piece(id)));
            }
        }
        for square in all_squares() {
            if let Some(Occupant::Piece(id)) = game.board().occupant(square) {
                assert_eq!(game.piece(id).position(), Some(square));
            }
        }
    }
    assert_eq!(game.captured_black().len(), 2);
    assert_eq!(game.captured_white().len(), 1);
}

#[test]
fn display_draws_the_grid() {
    let mut game = Game::new();
    game.play(sq(1, 4), sq(3, 4)).unwrap();
    let text = format!("{}", game);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 17);
    assert_eq!(lines[0], "+---+---+---+---+---+---+---+---+");
    assert_eq!(lines[1], "| ♜ | ♞ | ♝ | ♛ | ♚ | ♝ | ♞ | ♜ |");
    // row 2 holds only the marker, which prints blank
    assert_eq!(lines[11], "|   |   |   |   |   |   |   |   |");
    assert_eq!(lines[9], "|   |   |   |   | ♙ |   |   |   |");
    assert_eq!(lines[15], "| ♖ | ♘ | ♗ | ♕ | ♔ | ♗ | ♘ | ♖ |");
}
