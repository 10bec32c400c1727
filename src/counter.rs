//! Word counting over a byte stream.
//!
//! A word is a maximal run of non-whitespace bytes. [`WordCounter`] is the
//! whitespace-transition state machine; [`count_words`] drives it over a reader while
//! publishing every consumed byte to a [`ProgressState`].

use std::io::{self, BufReader, Read};

use crate::{ProgressState, io::ProgressReader};

/// Whether `byte` separates words.
///
/// This is the C-locale whitespace set: space, `\t`, `\n`, vertical tab, form feed
/// and `\r`. Bytes outside ASCII are never whitespace.
#[must_use]
pub const fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Incremental word counter.
///
/// Feed bytes in stream order, then call [`finish`](Self::finish) to count a word
/// that runs up to the end of the stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WordCounter {
    words: u64,
    last_was_space: bool,
}

impl Default for WordCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl WordCounter {
    /// Creates a counter positioned at the start of a stream.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: 0,
            last_was_space: true,
        }
    }

    /// Consumes one byte.
    pub const fn feed(&mut self, byte: u8) {
        if is_separator(byte) {
            // Runs of whitespace close at most one word.
            if !self.last_was_space {
                self.words += 1;
                self.last_was_space = true;
            }
        } else {
            self.last_was_space = false;
        }
    }

    /// Consumes a slice of bytes.
    pub fn feed_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed(byte);
        }
    }

    /// Words closed so far, not counting a word still in progress.
    #[must_use]
    pub const fn words(&self) -> u64 {
        self.words
    }

    /// Ends the stream and returns the total word count.
    #[must_use]
    pub const fn finish(self) -> u64 {
        if self.last_was_space {
            self.words
        } else {
            self.words + 1
        }
    }
}

/// Counts the words in `reader`, advancing `progress` once per byte.
///
/// `progress` is marked finished when the stream ends, including when a read fails,
/// so a renderer waiting on it always terminates.
///
/// # Errors
///
/// Returns the first I/O error raised by `reader`.
// One cursor update per byte; the `BufReader` underneath keeps reads cheap.
#[allow(clippy::unbuffered_bytes)]
pub fn count_words<R: Read>(reader: R, progress: &ProgressState) -> io::Result<u64> {
    let reader = ProgressReader::new(BufReader::new(reader), progress.clone());
    let mut counter = WordCounter::new();

    for byte in reader.bytes() {
        match byte {
            Ok(byte) => counter.feed(byte),
            Err(err) => {
                progress.finish_with_error(err.to_string());
                return Err(err);
            }
        }
    }

    progress.finish();
    Ok(counter.finish())
}
