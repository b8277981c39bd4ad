//! Character transforms applied between the raw source and the lookahead
//! buffer.
//!
//! Every raw rune the reader pulls becomes a candidate [`Char`] that is passed
//! through the installed transforms in order. A transform either returns the
//! candidate untouched, rewrites it, or reads further raw runes through the
//! [`Input`] to decide what the candidate stands for. A transform that reads a
//! rune it does not claim must push it back, which restores both the stream
//! and the position, so the next transform (or the next character) sees the
//! stream exactly as before. That rule is what lets transforms compose without
//! knowing about each other.
//!
//! Triggers are plain runes: a transform acts on any backslash or line ending
//! it is handed, including one an earlier transform produced.

mod hex;
mod newline;
mod rune_escape;
mod unicode;

use core::fmt;

pub use newline::NormalizeNewline;
pub use rune_escape::RuneEscape;
pub use unicode::UnicodeEscape;

use crate::{Char, Input, PositionalError};

/// One stage of the transform pipeline.
pub trait Transform: fmt::Debug {
    /// Turns the candidate `ch` into the character to emit.
    ///
    /// # Errors
    ///
    /// Malformed input, or a failure of the raw source while reading ahead.
    fn transform(&self, input: &mut Input<'_>, ch: Char) -> Result<Char, PositionalError>;
}
