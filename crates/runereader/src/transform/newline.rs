use crate::{Char, Input, PositionalError, Transform};

/// Normalizes line endings to a single line feed and moves the position to
/// the next row after each one.
///
/// `LF`, `CR` and `CR LF` all become one `\n` positioned at the first rune of
/// the ending.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeNewline;

impl Transform for NormalizeNewline {
    fn transform(&self, input: &mut Input<'_>, mut ch: Char) -> Result<Char, PositionalError> {
        match ch.ch {
            '\n' => input.newline(),
            '\r' => {
                ch.ch = '\n';
                input.newline();
                match input.read_rune()? {
                    None => {}
                    // Second half of CR LF: swallowed, it occupies no column.
                    Some(next) if next.ch == '\n' => {
                        input.step(-1);
                    }
                    Some(_) => input.unread_rune()?,
                }
            }
            _ => {}
        }
        Ok(ch)
    }
}
