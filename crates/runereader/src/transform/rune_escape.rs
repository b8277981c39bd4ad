use alloc::collections::BTreeMap;

use crate::{Char, ErrorKind, Input, PositionalError, Transform};

/// Resolves `\x` escapes through a mapping.
///
/// A backslash always escapes the following rune: mapped runes are replaced
/// (`\t` → tab with `{'t': '\t'}`), any other rune is emitted as written
/// (`\\` → `\`). Either way the result is marked escaped.
#[derive(Debug, Clone, Default)]
pub struct RuneEscape {
    escapes: BTreeMap<char, char>,
}

impl RuneEscape {
    /// Creates an escape transform mapping each escaped rune to its
    /// replacement.
    pub fn new(escapes: impl IntoIterator<Item = (char, char)>) -> Self {
        escapes.into_iter().collect()
    }
}

impl FromIterator<(char, char)> for RuneEscape {
    fn from_iter<I: IntoIterator<Item = (char, char)>>(iter: I) -> Self {
        Self {
            escapes: iter.into_iter().collect(),
        }
    }
}

impl Transform for RuneEscape {
    fn transform(&self, input: &mut Input<'_>, mut ch: Char) -> Result<Char, PositionalError> {
        if ch.ch != '\\' {
            return Ok(ch);
        }
        let Some(from) = input.read_rune().map_err(|err| err.at(ch.pos))? else {
            return Err(PositionalError::new(ErrorKind::RuneEscapeEof, ch.pos));
        };
        ch.ch = self.escapes.get(&from.ch).copied().unwrap_or(from.ch);
        ch.escaped = true;
        Ok(ch)
    }
}
