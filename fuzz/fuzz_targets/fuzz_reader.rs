#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use runereader::{Char, ReaderBuilder, ReaderError, State, StateError};

#[derive(Debug, Arbitrary)]
enum Op {
    Peek,
    Consume,
    State,
    /// Roll back to the n-th checkpoint taken so far, modulo their count.
    Rollback(u8),
    Commit,
}

#[derive(Debug, Arbitrary)]
struct Input {
    newline: bool,
    unicode: bool,
    rune: bool,
    row_size: u8,
    bytes: Vec<u8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut builder =
        ReaderBuilder::new(input.bytes.as_slice()).with_size(usize::from(input.row_size), 2);
    if input.newline {
        builder = builder.with_normalize_newline();
    }
    if input.unicode {
        builder = builder.with_unicode_escape();
    }
    if input.rune {
        builder = builder.with_rune_escape([('n', '\n'), ('t', '\t'), ('\\', '\\')]);
    }
    let mut reader = builder.build();

    // Every character handed out so far, by absolute index, and the index of
    // the next one.
    let mut history: Vec<Char> = Vec::new();
    let mut next = 0usize;
    // Checkpoints with the index they point at. Index below `floor` means
    // discarded by a commit.
    let mut checkpoints: Vec<(State, usize)> = Vec::new();
    let mut floor = 0usize;

    for op in input.ops {
        match op {
            Op::Peek => match reader.peek() {
                Ok(ch) => {
                    assert_eq!(reader.peek().unwrap(), ch, "peek is not idempotent");
                    if let Some(seen) = history.get(next) {
                        assert_eq!(*seen, ch, "replay differs after rollback");
                    } else {
                        if let Some(prev) = history.last() {
                            assert!(
                                (prev.pos.row, prev.pos.col) < (ch.pos.row, ch.pos.col),
                                "positions went backwards: {prev} then {ch}"
                            );
                        }
                        history.push(ch);
                    }
                }
                Err(ReaderError::Eof) => {
                    assert_eq!(next, history.len());
                    assert!(reader.peek().unwrap_err().is_eof(), "eof is not repeated");
                }
                Err(ReaderError::Positioned(_)) => {
                    assert_eq!(next, history.len());
                }
            },
            Op::Consume => {
                if next < history.len() {
                    next += 1;
                }
                reader.consume();
                assert_eq!(reader.buffered(), history.len() - next);
            }
            Op::State => checkpoints.push((reader.state(), next)),
            Op::Rollback(n) => {
                let slot = usize::from(n) % checkpoints.len().max(1);
                let Some(&(state, index)) = checkpoints.get(slot) else {
                    assert_eq!(reader.rollback(State::default()), Err(StateError::Zero));
                    continue;
                };
                match reader.rollback(state) {
                    Ok(()) => {
                        assert!(index >= floor, "rolled back past a commit");
                        next = index;
                    }
                    Err(err) => {
                        assert_eq!(err, StateError::Illegal);
                        assert!(index < floor, "rejected a live checkpoint");
                    }
                }
            }
            Op::Commit => {
                reader.commit();
                floor = next;
            }
        }
    }
});
