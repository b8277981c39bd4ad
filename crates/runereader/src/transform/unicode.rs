use alloc::string::String;

use tracing::trace;

use super::hex::HexDigits;
use crate::{Char, ErrorKind, Input, PositionalError, Transform};

/// Replaces `\uXXXX` with the character it names.
///
/// The escaped flag of the backslash is kept as is. A backslash followed by
/// anything other than `u` is left alone, with the following rune pushed
/// back, so a later [`RuneEscape`](crate::RuneEscape) can still handle it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeEscape;

impl Transform for UnicodeEscape {
    fn transform(&self, input: &mut Input<'_>, mut ch: Char) -> Result<Char, PositionalError> {
        if ch.ch != '\\' {
            return Ok(ch);
        }
        let Some(marker) = input.read_rune()? else {
            return Err(PositionalError::new(
                ErrorKind::UnicodeEscapeEof,
                input.position(),
            ));
        };
        if marker.ch != 'u' {
            input.unread_rune()?;
            return Ok(ch);
        }

        let mut literal = String::from("\\u");
        let mut digits = HexDigits::new();
        for _ in 0..HexDigits::COUNT {
            let Some(digit) = input.read_rune().map_err(|err| err.at(ch.pos))? else {
                return Err(PositionalError::new(ErrorKind::UnicodeEscapeEof, ch.pos));
            };
            literal.push(digit.ch);
            digits.feed(digit.ch);
        }

        let Some(decoded) = digits.finish() else {
            return Err(PositionalError::new(
                ErrorKind::InvalidUnicodeEscape(literal),
                ch.pos,
            ));
        };
        trace!(%literal, ?decoded, pos = %ch.pos, "unicode escape");
        ch.ch = decoded;
        Ok(ch)
    }
}
