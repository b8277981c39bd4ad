//! Raw rune access: UTF-8 decoding over a byte stream with one rune of
//! push-back, and the position-aware [`Input`] handed to transforms.

use alloc::{boxed::Box, vec};
use std::io::{self, Read};

use tracing::trace;

use crate::{
    Char, Position,
    error::{ErrorKind, PositionalError, PushbackError},
    position::Cursor,
};

const WINDOW: usize = 4096;

/// Decodes runes from a byte stream.
///
/// Owns a byte window over the stream and refills it only while the window
/// does not hold a complete UTF-8 sequence, so a source that trickles bytes
/// is never asked for more than the next rune needs. Invalid sequences decode
/// to U+FFFD.
pub(crate) struct RuneSource<R> {
    inner: R,
    window: Box<[u8]>,
    start: usize,
    end: usize,
    // An I/O error hit while bytes were still buffered; reported once those
    // bytes are drained.
    deferred: Option<io::Error>,
    // The rune returned by the last read, eligible for push-back.
    last: Option<char>,
    pushed_back: Option<char>,
}

impl<R: Read> RuneSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            window: vec![0; WINDOW].into_boxed_slice(),
            start: 0,
            end: 0,
            deferred: None,
            last: None,
            pushed_back: None,
        }
    }

    /// Returns the next rune, or `None` at end of stream.
    ///
    /// End of stream and errors are not sticky: the next call asks the
    /// underlying reader again.
    pub(crate) fn read_rune(&mut self) -> io::Result<Option<char>> {
        if let Some(ch) = self.pushed_back.take() {
            self.last = Some(ch);
            return Ok(Some(ch));
        }
        self.last = None;

        while !self.holds_full_rune() && self.deferred.is_none() {
            match self.fill() {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => self.deferred = Some(err),
            }
        }

        let pending = &self.window[self.start..self.end];
        if pending.is_empty() {
            return match self.deferred.take() {
                Some(err) => Err(err),
                None => Ok(None),
            };
        }

        let (ch, len) = bstr::decode_utf8(pending);
        self.start += len.max(1);
        let ch = ch.unwrap_or('\u{FFFD}');
        self.last = Some(ch);
        Ok(Some(ch))
    }

    /// Makes the rune returned by the last read available again.
    pub(crate) fn unread_rune(&mut self) -> Result<(), PushbackError> {
        let ch = self.last.take().ok_or(PushbackError)?;
        self.pushed_back = Some(ch);
        Ok(())
    }

    fn holds_full_rune(&self) -> bool {
        let pending = &self.window[self.start..self.end];
        pending
            .first()
            .is_some_and(|&lead| pending.len() >= utf8_width(lead))
    }

    fn fill(&mut self) -> io::Result<usize> {
        if self.start > 0 {
            self.window.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        let n = self.inner.read(&mut self.window[self.end..])?;
        self.end += n;
        Ok(n)
    }
}

/// Expected sequence length for a leading byte. Continuation and invalid
/// bytes count as one so they decode to U+FFFD on their own.
#[inline]
fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Object-safe view of a [`RuneSource`], so transforms need not be generic
/// over the byte reader.
pub(crate) trait DecodeRunes {
    fn read_rune(&mut self) -> io::Result<Option<char>>;
    fn unread_rune(&mut self) -> Result<(), PushbackError>;
}

impl<R: Read> DecodeRunes for RuneSource<R> {
    fn read_rune(&mut self) -> io::Result<Option<char>> {
        RuneSource::read_rune(self)
    }

    fn unread_rune(&mut self) -> Result<(), PushbackError> {
        RuneSource::unread_rune(self)
    }
}

/// Raw source access handed to a [`Transform`](crate::Transform).
///
/// Every read advances the position by one column and every push-back
/// retreats it by one, so a transform that reads ahead and pushes back
/// leaves both the stream and the position exactly as it found them.
pub struct Input<'a> {
    source: &'a mut dyn DecodeRunes,
    cursor: &'a mut Cursor,
}

impl<'a> Input<'a> {
    pub(crate) fn new(source: &'a mut dyn DecodeRunes, cursor: &'a mut Cursor) -> Self {
        Self { source, cursor }
    }

    /// Reads the next raw rune together with its position.
    ///
    /// Returns `Ok(None)` at end of stream, without moving the position.
    ///
    /// # Errors
    ///
    /// Any I/O failure of the byte source, positioned where the rune would
    /// have started.
    pub fn read_rune(&mut self) -> Result<Option<Char>, PositionalError> {
        match self.source.read_rune() {
            Ok(Some(ch)) => {
                let pos = self.cursor.step(1);
                trace!(?ch, %pos, "read rune");
                Ok(Some(Char::new(ch, pos)))
            }
            Ok(None) => Ok(None),
            Err(err) => Err(PositionalError::new(
                ErrorKind::Read(err),
                self.cursor.position(),
            )),
        }
    }

    /// Pushes the last read rune back and retreats the position by one.
    ///
    /// # Errors
    ///
    /// Fails if the previous operation was not a successful read. The
    /// position is left untouched in that case.
    pub fn unread_rune(&mut self) -> Result<(), PositionalError> {
        self.source
            .unread_rune()
            .map_err(|err| PositionalError::new(ErrorKind::Unread(err), self.cursor.position()))?;
        self.cursor.step(-1);
        trace!(pos = %self.cursor.position(), "unread rune");
        Ok(())
    }

    /// Position of the next raw rune.
    #[must_use]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Moves the column by `delta` without touching the stream and returns
    /// the position before the move.
    pub fn step(&mut self, delta: isize) -> Position {
        self.cursor.step(delta)
    }

    /// Records a logical line break: the next raw rune starts a new row.
    pub fn newline(&mut self) {
        self.cursor.newline();
    }
}
