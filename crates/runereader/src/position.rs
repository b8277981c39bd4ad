use core::fmt;

/// A row/column location in the source, both 1-based.
///
/// Columns count raw runes, not logical characters: the escape `\u0058`
/// occupies six columns even though the reader emits a single `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Row number (1-indexed)
    pub row: usize,
    /// Column number (1-indexed)
    pub col: usize,
}

impl Position {
    /// The position of the first rune of any source.
    pub const START: Position = Position { row: 1, col: 1 };

    /// Creates a position with the given row and column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.row, self.col)
    }
}

/// Tracks the position of the next raw rune.
///
/// `step` and `newline` are the only ways the position moves. Every raw read
/// and unread, and every newline decision made by a transform, goes through
/// them.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    pos: Position,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self {
            pos: Position::START,
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        self.pos
    }

    /// Moves the column by `delta` and returns the position held before the
    /// move.
    ///
    /// Retreating past column zero falls back one row and clamps the column
    /// to zero. Single-level pushback never crosses a newline, so this only
    /// guards against misuse.
    pub(crate) fn step(&mut self, delta: isize) -> Position {
        let before = self.pos;
        if let Some(col) = self.pos.col.checked_add_signed(delta) {
            self.pos.col = col;
        } else {
            self.pos.row = self.pos.row.saturating_sub(1);
            self.pos.col = 0;
        }
        before
    }

    /// Moves to the first column of the next row.
    pub(crate) fn newline(&mut self) {
        self.pos.row += 1;
        self.pos.col = Position::START.col;
    }
}
