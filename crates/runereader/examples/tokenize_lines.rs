//! Prints every character of standard input with its position.
//!
//! Escaped characters are prefixed with a backslash, errors end the listing.
//!
//! ```bash
//! printf 'a\\tb\r\nc\\u00e9' | cargo run -p runereader --example tokenize_lines
//! ```
#![allow(missing_docs)]

use std::io::{self, BufWriter, Write};

use runereader::ReaderBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());

    let mut reader = ReaderBuilder::new(stdin)
        .with_normalize_newline()
        .with_unicode_escape()
        .with_rune_escape([('n', '\n'), ('t', '\t'), ('r', '\r'), ('\\', '\\')])
        .build();

    let mut row = 0;
    for res in reader.chars() {
        let ch = res?;
        if ch.pos.row != row {
            row = ch.pos.row;
            writeln!(out, "-- row {row}")?;
        }
        writeln!(out, "{ch}")?;
    }
    out.flush()?;
    Ok(())
}
