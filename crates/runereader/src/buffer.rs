//! Checkpointable lookahead buffer.
//!
//! Elements live in a `VecDeque` between the oldest retained element and the
//! newest produced one. `base` is the absolute index of the front element, so
//! a checkpoint is just an absolute index and stays meaningful after the front
//! is drained by a commit. A checkpoint is valid while `base <= index <= end`.

use alloc::collections::VecDeque;
use core::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::StateError;

// Zero is reserved for the never-constructed state.
static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Snapshot of a [`LookaheadBuffer`] read cursor.
///
/// The default value is the zero state: it was not produced by any buffer and
/// every rollback to it fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BufferState {
    owner: u64,
    index: usize,
}

impl BufferState {
    pub(crate) fn is_zero(self) -> bool {
        self.owner == 0
    }
}

#[derive(Debug)]
pub(crate) struct LookaheadBuffer<T> {
    owner: u64,
    data: VecDeque<T>,
    // Absolute index of `data[0]`.
    base: usize,
    // Absolute index of the next element to hand out.
    cursor: usize,
}

impl<T> LookaheadBuffer<T> {
    /// `capacity` is a starting size only; the buffer grows as needed.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            data: VecDeque::with_capacity(capacity),
            base: 0,
            cursor: 0,
        }
    }

    #[inline]
    fn end(&self) -> usize {
        self.base + self.data.len()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.data.push_back(elem);
    }

    /// The element under the cursor, if one has been produced.
    #[inline]
    pub(crate) fn front(&self) -> Option<&T> {
        self.data.get(self.cursor - self.base)
    }

    /// Number of produced elements not yet passed by the cursor.
    #[inline]
    pub(crate) fn pending(&self) -> usize {
        self.end() - self.cursor
    }

    /// Moves the cursor past the front element. No-op when nothing is
    /// pending.
    pub(crate) fn advance(&mut self) {
        if self.cursor < self.end() {
            self.cursor += 1;
        }
    }

    pub(crate) fn state(&self) -> BufferState {
        BufferState {
            owner: self.owner,
            index: self.cursor,
        }
    }

    pub(crate) fn rollback(&mut self, state: BufferState) -> Result<(), StateError> {
        if state.is_zero() {
            return Err(StateError::Zero);
        }
        if state.owner != self.owner || state.index < self.base || state.index > self.end() {
            debug!(
                index = state.index,
                base = self.base,
                end = self.end(),
                "rejected rollback"
            );
            return Err(StateError::Illegal);
        }
        debug!(from = self.cursor, to = state.index, "rollback");
        self.cursor = state.index;
        Ok(())
    }

    /// Drops every element before the cursor. Checkpoints taken before the
    /// cursor become illegal.
    pub(crate) fn commit(&mut self) {
        let discard = self.cursor - self.base;
        self.data.drain(..discard);
        self.base = self.cursor;
        debug!(discarded = discard, retained = self.data.len(), "commit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> LookaheadBuffer<usize> {
        let mut buf = LookaheadBuffer::with_capacity(4);
        for i in 0..n {
            buf.push(i);
        }
        buf
    }

    #[test]
    fn front_does_not_advance() {
        let mut buf = filled(2);
        assert_eq!(buf.front(), Some(&0));
        assert_eq!(buf.front(), Some(&0));
        buf.advance();
        assert_eq!(buf.front(), Some(&1));
        buf.advance();
        assert_eq!(buf.front(), None);
        assert_eq!(buf.pending(), 0);
        buf.advance();
        assert_eq!(buf.pending(), 0);
    }

    #[test]
    fn rollback_replays() {
        let mut buf = filled(3);
        buf.advance();
        let state = buf.state();
        buf.advance();
        buf.advance();
        assert_eq!(buf.front(), None);
        buf.rollback(state).unwrap();
        assert_eq!(buf.front(), Some(&1));
        assert_eq!(buf.pending(), 2);
    }

    #[test]
    fn zero_state_is_rejected() {
        let mut buf = filled(1);
        assert_eq!(buf.rollback(BufferState::default()), Err(StateError::Zero));
    }

    #[test]
    fn foreign_state_is_rejected() {
        let other = filled(1);
        let mut buf = filled(1);
        assert_eq!(buf.rollback(other.state()), Err(StateError::Illegal));
    }

    #[test]
    fn commit_invalidates_older_states() {
        let mut buf = filled(4);
        let old = buf.state();
        buf.advance();
        buf.advance();
        let current = buf.state();
        buf.commit();
        assert_eq!(buf.rollback(old), Err(StateError::Illegal));
        buf.advance();
        buf.rollback(current).unwrap();
        assert_eq!(buf.front(), Some(&2));
    }

    #[test]
    fn commit_keeps_pending_elements() {
        let mut buf = filled(3);
        buf.advance();
        buf.commit();
        assert_eq!(buf.pending(), 2);
        assert_eq!(buf.front(), Some(&1));
        buf.push(3);
        buf.advance();
        buf.advance();
        assert_eq!(buf.front(), Some(&3));
    }
}
