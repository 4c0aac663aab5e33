use std::fmt;
use std::ops::Not;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a side.
#[derive(PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

/// How many colors are there?
pub const NUM_COLORS: usize = 2;
/// List all colors
pub const ALL_COLORS: [Color; NUM_COLORS] = [Color::White, Color::Black];

impl Color {
    /// Convert the `Color` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Which way do this color's pawns walk?  +1 row for White, -1 row for Black.
    #[inline]
    pub fn forward(&self) -> i8 {
        match *self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The row holding this color's pieces at the start of a game.
    #[inline]
    pub fn to_my_backrank(&self) -> i8 {
        match *self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The row holding this color's pawns at the start of a game.
    #[inline]
    pub fn to_second_rank(&self) -> i8 {
        match *self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
}

impl Not for Color {
    type Output = Color;

    /// Get the other color.
    #[inline]
    fn not(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[test]
fn opponents_are_symmetric() {
    for color in ALL_COLORS.iter() {
        assert_eq!(!!*color, *color);
        assert_ne!(!*color, *color);
        assert_eq!(color.forward(), -(!*color).forward());
    }
}

#[test]
fn pawn_rank_is_one_step_forward_of_backrank() {
    for color in ALL_COLORS.iter() {
        assert_eq!(color.to_my_backrank() + color.forward(), color.to_second_rank());
    }
}
