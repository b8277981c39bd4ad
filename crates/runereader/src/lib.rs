//! A character-stream front end for lexers and parsers.
//!
//! [`Reader`] turns a byte stream into positioned [`Char`]s. It offers
//! single-character lookahead (`peek`/`consume`), arbitrary-depth lookahead
//! through checkpoints (`state`/`rollback`/`commit`), and a pipeline of
//! [`Transform`]s installed through [`ReaderBuilder`]:
//!
//! - [`NormalizeNewline`]: `CR` and `CR LF` become `LF`, rows advance;
//! - [`UnicodeEscape`]: `\uXXXX` becomes the character it names;
//! - [`RuneEscape`]: `\x` becomes a mapped replacement, marked escaped.
//!
//! ```rust
//! use runereader::{Char, Position, ReaderBuilder};
//!
//! let mut reader = ReaderBuilder::new(&br"a\a\b c"[..])
//!     .with_rune_escape([('a', 'x'), ('b', 'y')])
//!     .build();
//!
//! assert_eq!(reader.peek().unwrap(), Char::new('a', Position::new(1, 1)));
//! reader.consume();
//! let checkpoint = reader.state();
//! assert_eq!(reader.peek().unwrap(), Char::escaped('x', Position::new(1, 2)));
//! reader.consume();
//! assert_eq!(reader.peek().unwrap(), Char::escaped('y', Position::new(1, 4)));
//! reader.rollback(checkpoint).unwrap();
//! assert_eq!(reader.peek().unwrap().ch, 'x');
//! ```
//!
//! A reader serves one sequential consumer and is not meant to be shared
//! between threads.

extern crate alloc;

mod buffer;
mod character;
mod error;
mod options;
mod position;
mod reader;
mod source;
mod transform;

#[cfg(test)]
mod tests;

pub use character::Char;
pub use error::{ErrorKind, PositionalError, PushbackError, ReaderError, StateError};
pub use options::ReaderOptions;
pub use position::Position;
pub use reader::{Chars, Reader, ReaderBuilder, State};
pub use source::Input;
pub use transform::{NormalizeNewline, RuneEscape, Transform, UnicodeEscape};
