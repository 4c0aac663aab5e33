use crate::board::{Board, Occupant};
use crate::color::Color;
use crate::piece::{EnPassantMarker, Piece, PieceId, PieceKind};
use crate::square::Square;

/// One side of the game: its pieces, which of them is the king, and its live en passant marker.
///
/// Pieces are never removed from the list.  A captured piece stays in it with no position.
/// The opponent is not stored; it is always the player of the other color, owned by the same
/// `Game`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    color: Color,
    pieces: Vec<Piece>,
    king: Option<usize>,
    en_passant: Option<EnPassantMarker>,
}

impl Player {
    pub(crate) fn new(color: Color) -> Player {
        Player {
            color,
            pieces: Vec::with_capacity(16),
            king: None,
            en_passant: None,
        }
    }

    /// Which side is this?
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Which side is my opponent?
    #[inline]
    pub fn opponent(&self) -> Color {
        !self.color
    }

    /// Every piece this player was given, captured ones included, in creation order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Every piece still on the board, with its handle.
    pub fn active_pieces<'a>(&'a self) -> impl Iterator<Item = (PieceId, &'a Piece)> + 'a {
        let color = self.color;
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.is_active())
            .map(move |(index, piece)| (PieceId::new(color, index), piece))
    }

    /// Look a piece up by handle.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.to_index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.to_index()]
    }

    /// My king.
    pub fn king(&self) -> Option<&Piece> {
        self.king.and_then(|index| self.pieces.get(index))
    }

    /// My en passant marker, if my last move was a double pawn step.
    #[inline]
    pub fn en_passant(&self) -> Option<&EnPassantMarker> {
        self.en_passant.as_ref()
    }

    /// Hand a new piece to this player.  The first king handed over becomes the king.
    pub(crate) fn add_piece(&mut self, piece: Piece) -> PieceId {
        let id = PieceId::new(self.color, self.pieces.len());
        if piece.kind() == PieceKind::King && self.king.is_none() {
            self.king = Some(id.to_index());
        }
        self.pieces.push(piece);
        id
    }

    pub(crate) fn set_en_passant(&mut self, marker: Option<EnPassantMarker>) {
        self.en_passant = marker;
    }

    pub(crate) fn take_en_passant(&mut self) -> Option<EnPassantMarker> {
        self.en_passant.take()
    }

    /// Forget everything, ready for a new game.
    pub(crate) fn clear(&mut self) {
        self.pieces.clear();
        self.king = None;
        self.en_passant = None;
    }

    /// Does any of my pieces standing on `board` attack `square`?
    ///
    /// A piece counts only if `board` still shows it where it believes it is, so a board on
    /// which one of my pieces has been taken can be asked about directly.
    pub fn attacks_square(&self, square: Square, board: &Board) -> bool {
        self.active_pieces().any(|(id, piece)| match piece.position() {
            Some(pos) => {
                board.occupant(pos) == Some(Occupant::Piece(id)) && piece.attacks(square, board)
            }
            None => false,
        })
    }

    /// Is my king attacked by `opponent`?
    ///
    /// A player whose king is gone is always considered checked.
    pub fn is_checked(&self, board: &Board, opponent: &Player) -> bool {
        match self.king().and_then(|king| king.position()) {
            Some(square) => opponent.attacks_square(square, board),
            None => true,
        }
    }
}

#[cfg(test)]
fn put(board: &mut Board, player: &mut Player, kind: PieceKind, sq: Square) {
    let id = player.add_piece(Piece::new(kind, player.color(), sq));
    board.place(sq, Some(Occupant::Piece(id)));
}

#[test]
fn rook_gives_check_along_open_file() {
    let mut board = Board::new();
    let mut white = Player::new(Color::White);
    let mut black = Player::new(Color::Black);
    put(&mut board, &mut white, PieceKind::King, Square::new(0, 4));
    put(&mut board, &mut black, PieceKind::King, Square::new(7, 0));
    put(&mut board, &mut black, PieceKind::Rook, Square::new(5, 4));

    assert!(white.is_checked(&board, &black));
    assert!(!black.is_checked(&board, &white));

    put(&mut board, &mut white, PieceKind::Knight, Square::new(3, 4));
    assert!(!white.is_checked(&board, &black));
}

#[test]
fn pawn_checks_only_diagonally() {
    let mut board = Board::new();
    let mut white = Player::new(Color::White);
    let mut black = Player::new(Color::Black);
    put(&mut board, &mut white, PieceKind::King, Square::new(3, 3));
    put(&mut board, &mut black, PieceKind::King, Square::new(7, 7));
    put(&mut board, &mut black, PieceKind::Pawn, Square::new(4, 3));
    assert!(!white.is_checked(&board, &black));

    put(&mut board, &mut black, PieceKind::Pawn, Square::new(4, 4));
    assert!(white.is_checked(&board, &black));
}

#[test]
fn pieces_missing_from_the_board_do_not_attack() {
    let mut board = Board::new();
    let mut white = Player::new(Color::White);
    let mut black = Player::new(Color::Black);
    put(&mut board, &mut white, PieceKind::King, Square::new(0, 0));
    put(&mut board, &mut black, PieceKind::King, Square::new(7, 7));
    put(&mut board, &mut black, PieceKind::Queen, Square::new(0, 7));
    assert!(white.is_checked(&board, &black));

    let mut scratch = board;
    scratch.place(Square::new(0, 7), Some(Occupant::Piece(PieceId::new(Color::White, 0))));
    assert!(!white.is_checked(&scratch, &black));
    assert!(white.is_checked(&board, &black));
}

#[test]
fn lost_king_counts_as_checked() {
    let board = Board::new();
    let white = Player::new(Color::White);
    let black = Player::new(Color::Black);
    assert!(white.is_checked(&board, &black));
}
