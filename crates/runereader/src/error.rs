use alloc::string::String;
use std::io;

use thiserror::Error;

use crate::Position;

/// Error returned by [`Reader::peek`](crate::Reader::peek).
#[derive(Error, Debug)]
pub enum ReaderError {
    /// The source is exhausted. Not an application error: every later peek
    /// reports it again.
    #[error("end of stream")]
    Eof,
    /// A read or transform failure at a known position.
    #[error(transparent)]
    Positioned(#[from] PositionalError),
}

impl ReaderError {
    /// Returns `true` for the end-of-stream signal.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, ReaderError::Eof)
    }

    /// Returns the positioned error, if this is not end-of-stream.
    #[must_use]
    pub fn as_positioned(&self) -> Option<&PositionalError> {
        match self {
            ReaderError::Eof => None,
            ReaderError::Positioned(err) => Some(err),
        }
    }
}

/// An error tied to the row and column where it happened.
#[derive(Error, Debug)]
#[error("{kind} at {}:{}", .pos.row, .pos.col)]
pub struct PositionalError {
    pub(crate) kind: ErrorKind,
    pub(crate) pos: Position,
}

impl PositionalError {
    /// Creates an error of `kind` located at `pos`.
    #[must_use]
    pub fn new(kind: ErrorKind, pos: Position) -> Self {
        Self { kind, pos }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Where it went wrong.
    #[must_use]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Moves the error to `pos`, e.g. the start of the escape sequence whose
    /// tail failed to read.
    #[must_use]
    pub fn at(mut self, pos: Position) -> Self {
        self.pos = pos;
        self
    }
}

/// The cause of a [`PositionalError`].
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// The byte source failed.
    #[error("error reading rune from source: {0}")]
    Read(#[source] io::Error),
    /// A transform could not push a peeked rune back.
    #[error("error unreading rune from source: {0}")]
    Unread(#[source] PushbackError),
    /// The source ended inside a `\uXXXX` escape.
    #[error("unexpected EOF reading unicode escape")]
    UnicodeEscapeEof,
    /// The four digits of a `\uXXXX` escape are not a valid code point.
    /// Holds the escape as typed, e.g. `\u005X`.
    #[error("error parsing unicode escaped rune '{0}': invalid syntax")]
    InvalidUnicodeEscape(String),
    /// The source ended right after an escaping backslash.
    #[error("unexpected EOF reading rune escape")]
    RuneEscapeEof,
}

/// A rune was pushed back without a read since the previous push-back.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no rune to unread")]
pub struct PushbackError;

/// Error returned by [`Reader::rollback`](crate::Reader::rollback).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The state was never obtained from a reader.
    #[error("rollback to zero state")]
    Zero,
    /// The state belongs to another reader or refers to history discarded by
    /// a commit.
    #[error("rollback to illegal state")]
    Illegal,
}
