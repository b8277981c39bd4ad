use core::fmt;

use crate::Position;

/// One logical character as seen by the consumer of a [`Reader`].
///
/// A `Char` may stand for several raw runes. An escape sequence collapses into
/// a single `Char` positioned at its introducing backslash.
///
/// [`Reader`]: crate::Reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Char {
    /// The decoded (and possibly transformed) character.
    pub ch: char,
    /// Position of the first raw rune this character was read from.
    pub pos: Position,
    /// Set by a rune escape (`\n`, `\\`, ...). Later transforms never clear
    /// it.
    pub escaped: bool,
}

impl Char {
    /// Creates an unescaped character at `pos`.
    #[must_use]
    pub const fn new(ch: char, pos: Position) -> Self {
        Self {
            ch,
            pos,
            escaped: false,
        }
    }

    /// Creates a character marked as produced by a rune escape.
    #[must_use]
    pub const fn escaped(ch: char, pos: Position) -> Self {
        Self {
            ch,
            pos,
            escaped: true,
        }
    }
}

impl fmt::Display for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.escaped { "\\" } else { "" };
        write!(f, "<{marker}{},[{}]>", self.ch, self.pos)
    }
}
