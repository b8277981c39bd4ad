//! The reader: pulls raw runes, runs them through the transform pipeline and
//! serves the results with peek/consume lookahead and checkpoint rollback.
//!
//! Three pieces of state must agree under backtracking:
//! - the lookahead buffer, holding transformed characters between "produced"
//!   and "committed";
//! - the raw source with its single rune of push-back, used only by
//!   transforms probing ahead;
//! - the cursor, the position of the next raw rune.
//!
//! Rollback only moves the buffer's read cursor. Characters produced after a
//! checkpoint are replayed from the buffer and never re-transformed, so the
//! raw source and the cursor always describe the newest produced character,
//! not the one under the read cursor.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;
use std::io::Read;

use tracing::debug;

use crate::{
    Char, Position, ReaderOptions,
    buffer::{BufferState, LookaheadBuffer},
    error::{ReaderError, StateError},
    position::Cursor,
    source::{Input, RuneSource},
    transform::{NormalizeNewline, RuneEscape, Transform, UnicodeEscape},
};

/// Opaque checkpoint of a [`Reader`], for use with [`Reader::rollback`].
///
/// `State::default()` is the zero state; it was not obtained from a reader and
/// every rollback to it fails with [`StateError::Zero`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct State {
    inner: BufferState,
}

/// Reads positioned characters from a byte stream.
///
/// The source is treated as rows and columns of runes, starting at `1:1`.
/// Each returned [`Char`] carries the position of its first raw rune. Since a
/// transform may fold several runes into one character, positions of
/// consecutive characters are not necessarily adjacent.
///
/// Two lookahead styles are supported and may be mixed:
/// - [`peek`](Self::peek) returns the next character without consuming it,
///   [`consume`](Self::consume) moves past it;
/// - [`state`](Self::state) takes a checkpoint and
///   [`rollback`](Self::rollback) returns to it, making every character read
///   since then available again.
///
/// Consumed characters are kept for rollback until [`commit`](Self::commit)
/// discards them.
///
/// ```rust
/// use runereader::{Position, ReaderBuilder};
///
/// let mut reader = ReaderBuilder::new(&b"a\r\nb"[..])
///     .with_normalize_newline()
///     .build();
/// let chars: Vec<_> = reader.chars().map(Result::unwrap).collect();
/// assert_eq!(chars[1].ch, '\n');
/// assert_eq!(chars[2].pos, Position::new(2, 1));
/// ```
pub struct Reader<R> {
    source: RuneSource<R>,
    cursor: Cursor,
    buffer: LookaheadBuffer<Char>,
    transforms: Vec<Box<dyn Transform>>,
}

impl<R: Read> Reader<R> {
    /// Creates a reader with the default buffer size and no transforms.
    ///
    /// Use [`ReaderBuilder`] for anything else.
    pub fn new(source: R) -> Self {
        ReaderBuilder::new(source).build()
    }

    /// Returns the next character without consuming it.
    ///
    /// Repeated calls without [`consume`](Self::consume) return the same
    /// character.
    ///
    /// # Errors
    ///
    /// [`ReaderError::Eof`] once the source is exhausted, on this and every
    /// later call. [`ReaderError::Positioned`] for a failing source or a
    /// malformed escape; the runes read while detecting it stay consumed.
    pub fn peek(&mut self) -> Result<Char, ReaderError> {
        if let Some(ch) = self.buffer.front() {
            return Ok(*ch);
        }
        let ch = self.produce()?;
        self.buffer.push(ch);
        Ok(ch)
    }

    /// Moves past the character last returned by [`peek`](Self::peek).
    pub fn consume(&mut self) {
        self.buffer.advance();
    }

    /// Returns a checkpoint of the current read position.
    #[must_use]
    pub fn state(&self) -> State {
        State {
            inner: self.buffer.state(),
        }
    }

    /// Returns to `state`; the next [`peek`](Self::peek) yields the character
    /// that was next when the checkpoint was taken.
    ///
    /// # Errors
    ///
    /// [`StateError::Zero`] for a default-constructed state,
    /// [`StateError::Illegal`] for a state from another reader or one taken
    /// before a [`commit`](Self::commit) that discarded its history.
    pub fn rollback(&mut self, state: State) -> Result<(), StateError> {
        self.buffer.rollback(state.inner)
    }

    /// Discards consumed characters, bounding memory on long streams.
    ///
    /// Checkpoints taken before the current read position become illegal.
    pub fn commit(&mut self) {
        self.buffer.commit();
    }

    /// Position of the next raw rune the source will yield.
    ///
    /// This runs ahead of [`peek`](Self::peek) results whenever characters are
    /// buffered.
    #[must_use]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Number of characters produced but not yet consumed.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.pending()
    }

    /// Iterates over the remaining characters, consuming each one.
    ///
    /// Ends at end of stream and after the first error.
    pub fn chars(&mut self) -> Chars<'_, R> {
        Chars {
            reader: self,
            done: false,
        }
    }

    /// Pulls one raw rune and runs it through the transforms.
    fn produce(&mut self) -> Result<Char, ReaderError> {
        let mut input = Input::new(&mut self.source, &mut self.cursor);
        let Some(mut ch) = input.read_rune()? else {
            return Err(ReaderError::Eof);
        };
        for transform in &self.transforms {
            ch = transform.transform(&mut input, ch).inspect_err(|err| {
                debug!(%err, ?transform, "transform failed");
            })?;
        }
        Ok(ch)
    }
}

impl<R> fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("position", &self.cursor.position())
            .field("buffer", &self.buffer)
            .field("transforms", &self.transforms)
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`Reader::chars`].
#[derive(Debug)]
pub struct Chars<'a, R> {
    reader: &'a mut Reader<R>,
    done: bool,
}

impl<R: Read> Iterator for Chars<'_, R> {
    type Item = Result<Char, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.peek() {
            Ok(ch) => {
                self.reader.consume();
                Some(Ok(ch))
            }
            Err(ReaderError::Eof) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: Read> core::iter::FusedIterator for Chars<'_, R> {}

/// Assembles a [`Reader`].
///
/// The byte source is required up front; buffer sizing is optional and
/// transforms run in the order they are added.
///
/// ```rust
/// use runereader::ReaderBuilder;
///
/// let mut reader = ReaderBuilder::new(&br"a\u0041\t"[..])
///     .with_size(16, 4)
///     .with_unicode_escape()
///     .with_rune_escape([('t', '\t')])
///     .build();
/// let text: String = reader.chars().map(|c| c.unwrap().ch).collect();
/// assert_eq!(text, "aA\t");
/// ```
#[derive(Debug)]
#[must_use]
pub struct ReaderBuilder<R> {
    source: R,
    options: ReaderOptions,
    transforms: Vec<Box<dyn Transform>>,
}

impl<R: Read> ReaderBuilder<R> {
    /// Starts a builder reading from `source`.
    pub fn new(source: R) -> Self {
        Self {
            source,
            options: ReaderOptions::default(),
            transforms: Vec::new(),
        }
    }

    /// Sets the initial buffer size as `rows` rows of `row_size` characters.
    pub fn with_size(mut self, row_size: usize, rows: usize) -> Self {
        self.options.buffer_row_size = row_size;
        self.options.buffer_rows = rows;
        self
    }

    /// Replaces the buffer sizing options.
    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Appends a [`NormalizeNewline`] transform.
    pub fn with_normalize_newline(self) -> Self {
        self.with_transform(NormalizeNewline)
    }

    /// Appends a [`UnicodeEscape`] transform.
    pub fn with_unicode_escape(self) -> Self {
        self.with_transform(UnicodeEscape)
    }

    /// Appends a [`RuneEscape`] transform with the given mapping.
    pub fn with_rune_escape(self, escapes: impl IntoIterator<Item = (char, char)>) -> Self {
        self.with_transform(RuneEscape::new(escapes))
    }

    /// Appends any transform.
    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Builds the reader.
    pub fn build(self) -> Reader<R> {
        Reader {
            source: RuneSource::new(self.source),
            cursor: Cursor::new(),
            buffer: LookaheadBuffer::with_capacity(self.options.initial_capacity()),
            transforms: self.transforms,
        }
    }
}
