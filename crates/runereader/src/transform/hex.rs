/// Accumulates the four hexadecimal digits of a `\uXXXX` escape.
///
/// Digits are fed one at a time; a non-digit poisons the accumulator but
/// feeding may continue, so the caller can read the full escape before
/// reporting it.
#[derive(Debug)]
pub(super) struct HexDigits {
    acc: u32,
    len: u8,
    valid: bool,
}

impl HexDigits {
    pub(super) const COUNT: usize = 4;

    pub(super) fn new() -> Self {
        Self {
            acc: 0,
            len: 0,
            valid: true,
        }
    }

    pub(super) fn feed(&mut self, c: char) {
        match c.to_digit(16) {
            Some(d) if self.valid && usize::from(self.len) < Self::COUNT => {
                self.acc = (self.acc << 4) | d;
                self.len += 1;
            }
            _ => self.valid = false,
        }
    }

    /// The decoded character, if exactly four digits were fed and they name
    /// a Unicode scalar value (surrogates do not).
    pub(super) fn finish(self) -> Option<char> {
        if !self.valid || usize::from(self.len) != Self::COUNT {
            return None;
        }
        char::from_u32(self.acc)
    }
}
