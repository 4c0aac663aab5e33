//! A chess referee.
//!
//! `Game` holds the board and both players, accepts or refuses move requests, applies the
//! accepted ones (captures, the double pawn step and en passant included) and answers check and
//! checkmate queries.  Squares are `(row, col)` pairs with row 0 White's back rank.
//!
//! ```
//! use chess_referee::{Color, Game, MoveErrorKind, Square};
//!
//! let mut game = Game::new();
//! game.make_move(Color::White, Square::new(1, 4), Square::new(3, 4)).unwrap();
//!
//! let err = game
//!     .make_move(Color::Black, Square::new(7, 0), Square::new(4, 0))
//!     .unwrap_err();
//! assert_eq!(err.kind(), MoveErrorKind::IllegalMove);
//! ```

mod board;
pub use crate::board::*;

mod chess_move;
pub use crate::chess_move::*;

mod color;
pub use crate::color::*;

mod error;
pub use crate::error::*;

mod game;
pub use crate::game::*;

mod game_builder;
pub use crate::game_builder::*;

mod movegen;
pub use crate::movegen::*;

mod piece;
pub use crate::piece::*;

mod player;
pub use crate::player::*;

mod square;
pub use crate::square::*;
