use alloc::{boxed::Box, string::ToString};
use std::io::{self, Read};

use crate::{Char, Position, Reader, ReaderBuilder, State, StateError};

/// One step of a scripted reader session.
#[derive(Debug, Clone)]
pub(crate) enum Op {
    /// `peek` returns the character.
    Peek(Char),
    /// `peek` returns the character, then `consume`.
    Take(Char),
    /// `peek` fails with exactly this message.
    Fail(&'static str),
    Consume,
    State,
    Rollback,
    RollbackErr(StateError),
    Commit,
    /// `peek` reports end of stream.
    Eof,
    /// `position` reports the next raw rune position.
    Pos(Position),
}

pub(crate) fn c(ch: char, row: usize, col: usize) -> Char {
    Char::new(ch, Position::new(row, col))
}

pub(crate) fn esc(ch: char, row: usize, col: usize) -> Char {
    Char::escaped(ch, Position::new(row, col))
}

pub(crate) type DynReader = Reader<Box<dyn Read>>;

pub(crate) fn text(src: &'static str) -> ReaderBuilder<Box<dyn Read>> {
    ReaderBuilder::new(Box::new(src.as_bytes()) as Box<dyn Read>)
}

pub(crate) fn failing(src: &'static str) -> ReaderBuilder<Box<dyn Read>> {
    ReaderBuilder::new(Box::new(FailingReader::new(src)) as Box<dyn Read>)
}

pub(crate) const FAILING_READER_MESSAGE: &str = "reader test error";

/// Yields its input, then fails on every later read.
pub(crate) struct FailingReader {
    input: &'static [u8],
}

impl FailingReader {
    pub(crate) fn new(input: &'static str) -> Self {
        Self {
            input: input.as_bytes(),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.input.is_empty() {
            return Err(io::Error::other(FAILING_READER_MESSAGE));
        }
        let n = buf.len().min(self.input.len());
        buf[..n].copy_from_slice(&self.input[..n]);
        self.input = &self.input[n..];
        Ok(n)
    }
}

pub(crate) fn run<R: Read>(reader: &mut Reader<R>, ops: &[Op]) {
    let mut state = State::default();
    for (i, op) in ops.iter().enumerate() {
        match op {
            Op::Peek(exp) => {
                let got = reader.peek().unwrap_or_else(|e| panic!("[{i}] peek failed: {e}"));
                assert_eq!(got, *exp, "[{i}] unexpected char from peek");
            }
            Op::Take(exp) => {
                let got = reader.peek().unwrap_or_else(|e| panic!("[{i}] peek failed: {e}"));
                assert_eq!(got, *exp, "[{i}] unexpected char from peek");
                reader.consume();
            }
            Op::Fail(msg) => match reader.peek() {
                Ok(ch) => panic!("[{i}] expected error {msg:?}, got {ch}"),
                Err(err) => assert_eq!(err.to_string(), *msg, "[{i}] unexpected error"),
            },
            Op::Consume => reader.consume(),
            Op::State => state = reader.state(),
            Op::Rollback => reader
                .rollback(state)
                .unwrap_or_else(|e| panic!("[{i}] rollback failed: {e}")),
            Op::RollbackErr(exp) => {
                assert_eq!(reader.rollback(state), Err(*exp), "[{i}] unexpected rollback");
            }
            Op::Commit => reader.commit(),
            Op::Eof => match reader.peek() {
                Err(err) => assert!(err.is_eof(), "[{i}] expected EOF, got {err}"),
                Ok(ch) => panic!("[{i}] expected EOF, got {ch}"),
            },
            Op::Pos(exp) => assert_eq!(reader.position(), *exp, "[{i}] unexpected position"),
        }
    }
}
