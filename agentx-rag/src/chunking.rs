//! Boundary-aware document chunking.
//!
//! [`TextChunker`] splits raw text into overlapping windows of at most
//! `chunk_size` chars. Within each window the split point is chosen at the
//! highest-priority separator available: paragraph breaks, then line breaks,
//! sentence terminators, commas, spaces, and finally a raw character cut.
//! Consecutive chunks overlap by exactly `chunk_overlap` chars, so
//! concatenating all chunks while dropping each successor's leading overlap
//! reconstructs the original text losslessly.

/// Split separators in priority order. A raw cut at `chunk_size` is the
/// implicit final fallback.
const SEPARATORS: &[&str] = &["\n\n", "\n", ".", "!", "?", ",", " "];

/// Splits text into overlapping, boundary-aligned chunks.
///
/// Sizes are measured in Unicode scalar values (chars), not bytes, so
/// multi-byte scripts chunk correctly. Requires `chunk_overlap < chunk_size`;
/// the pipeline configuration enforces this before construction.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a new chunker with the given window size and overlap, in chars.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        debug_assert!(chunk_overlap < chunk_size);
        Self { chunk_size, chunk_overlap }
    }

    /// Split `text` into a lazy, finite sequence of chunk texts.
    ///
    /// Empty input yields an empty sequence. The iterator is single-pass and
    /// non-restartable.
    pub fn split(&self, text: &str) -> ChunkIter {
        ChunkIter {
            chars: text.chars().collect(),
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            start: 0,
            done: text.is_empty(),
        }
    }
}

/// Lazy iterator over chunk texts produced by [`TextChunker::split`].
#[derive(Debug)]
pub struct ChunkIter {
    chars: Vec<char>,
    chunk_size: usize,
    chunk_overlap: usize,
    start: usize,
    done: bool,
}

impl ChunkIter {
    /// Find the split point for the window `[start, window_end)`.
    ///
    /// Returns the position just after the last occurrence of the
    /// highest-priority separator that ends strictly past
    /// `start + chunk_overlap` (guaranteeing forward progress), or
    /// `window_end` when no separator qualifies.
    fn split_point(&self, window_end: usize) -> usize {
        let min_end = self.start + self.chunk_overlap;
        for separator in SEPARATORS {
            let sep: Vec<char> = separator.chars().collect();
            if sep.len() > window_end - self.start {
                continue;
            }
            let mut best = None;
            for i in self.start..=window_end - sep.len() {
                let end = i + sep.len();
                if end > min_end && self.chars[i..end] == sep[..] {
                    best = Some(end);
                }
            }
            if let Some(end) = best {
                return end;
            }
        }
        window_end
    }
}

impl Iterator for ChunkIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let window_end = (self.start + self.chunk_size).min(self.chars.len());
        let end = if window_end == self.chars.len() {
            // Remainder fits in one window; emit it whole.
            self.done = true;
            window_end
        } else {
            self.split_point(window_end)
        };

        let chunk: String = self.chars[self.start..end].iter().collect();
        if !self.done {
            // Next chunk starts exactly `chunk_overlap` chars before this one
            // ended. Non-final split points always lie past `start + overlap`,
            // so this cannot underflow; the final chunk may be shorter than
            // the overlap, which is why it skips the update.
            self.start = end - self.chunk_overlap;
        }
        Some(chunk)
    }
}
