//! Disc colors.

use serde::{Deserialize, Serialize};

/// Color of a disc, and of the player who owns it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Color {
    /// Black (moves first).
    Black,
    /// White.
    White,
}

impl Color {
    /// Returns the other color.
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Fixture character for this color (`b` or `w`).
    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'b',
            Color::White => 'w',
        }
    }

    /// Parses a fixture character (case-insensitive).
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'b' => Some(Color::Black),
            'w' => Some(Color::White),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opposite_is_involution() {
        for color in Color::iter() {
            assert_ne!(color.opposite(), color);
            assert_eq!(color.opposite().opposite(), color);
        }
    }

    #[test]
    fn test_display_uppercase() {
        assert_eq!(Color::Black.to_string(), "BLACK");
        assert_eq!(Color::White.to_string(), "WHITE");
    }

    #[test]
    fn test_symbol_roundtrip() {
        assert_eq!(Color::from_symbol('B'), Some(Color::Black));
        assert_eq!(Color::from_symbol('w'), Some(Color::White));
        assert_eq!(Color::from_symbol(' '), None);
    }
}
