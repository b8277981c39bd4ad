// Upper bound on the capacity reserved up front, in characters.
const MAX_INITIAL_CAPACITY: usize = 1 << 16;

/// Sizing for the lookahead buffer of a [`Reader`](crate::Reader).
///
/// The buffer keeps every character produced since the last
/// [`commit`](crate::Reader::commit), so its size depends on how far callers
/// look ahead and how often they commit. These options only choose the
/// starting capacity, capped at 65536 characters; the buffer grows as needed.
///
/// # Examples
///
/// ```rust
/// use runereader::{ReaderBuilder, ReaderOptions};
///
/// let options = ReaderOptions {
///     buffer_row_size: 16,
///     ..Default::default()
/// };
/// let reader = ReaderBuilder::new(&b"abc"[..]).with_options(options).build();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderOptions {
    /// Number of characters in one buffer row.
    ///
    /// # Default
    ///
    /// `100`
    pub buffer_row_size: usize,

    /// Number of rows allocated up front.
    ///
    /// # Default
    ///
    /// `10`
    pub buffer_rows: usize,
}

impl ReaderOptions {
    pub(crate) fn initial_capacity(&self) -> usize {
        self.buffer_row_size
            .saturating_mul(self.buffer_rows)
            .min(MAX_INITIAL_CAPACITY)
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            buffer_row_size: 100,
            buffer_rows: 10,
        }
    }
}
