//! Text chunking with overlap and boundary-aware cuts

use unicode_segmentation::UnicodeSegmentation;

/// Text chunker with configurable size and overlap
///
/// Splits a document into a sliding window of overlapping chunks. Each cut
/// prefers the latest paragraph break in the window, then a line break, then a
/// sentence boundary, then a word boundary, before falling back to a hard cut
/// at `chunk_size`. With no boundaries in range, consecutive chunks share
/// exactly `chunk_overlap` characters.
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. The overlap is clamped below `chunk_size` so the
    /// window always makes forward progress.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    /// Split text into ordered, overlapping chunks.
    ///
    /// Empty and whitespace-only chunks are dropped. Input no longer than
    /// `chunk_size` comes back as a single chunk.
    pub fn split(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let len = text.len();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < len {
            let hard_cut = start + self.chunk_size;
            let cut = if hard_cut >= len {
                hard_cut
            } else {
                self.find_cut(text, start, prev_char_boundary(text, hard_cut))
            };

            let end = cut.min(len);
            let chunk = &text[start..end];
            if !chunk.trim().is_empty() {
                chunks.push(chunk.to_string());
            }

            let mut next = prev_char_boundary(text, cut.saturating_sub(self.chunk_overlap));
            if next <= start {
                // Boundary clamping must not stall the window.
                next = next_char_boundary(text, start + 1);
            }
            start = next;
        }

        chunks
    }

    /// Pick the best cut position in `(start + overlap, hard_cut]`.
    fn find_cut(&self, text: &str, start: usize, hard_cut: usize) -> usize {
        let floor = start + self.chunk_overlap;
        let window = &text[start..hard_cut];

        if let Some(pos) = window.rfind("\n\n") {
            let cut = start + pos + 2;
            if cut > floor {
                return cut;
            }
        }

        if let Some(pos) = window.rfind('\n') {
            let cut = start + pos + 1;
            if cut > floor {
                return cut;
            }
        }

        if let Some((offset, _)) = window.split_sentence_bound_indices().last() {
            let cut = start + offset;
            if offset > 0 && cut > floor {
                return cut;
            }
        }

        if let Some(pos) = window.rfind(' ') {
            let cut = start + pos + 1;
            if cut > floor {
                return cut;
            }
        }

        hard_cut
    }
}

/// Step back to the nearest UTF-8 character boundary at or before `pos`.
fn prev_char_boundary(text: &str, mut pos: usize) -> usize {
    if pos >= text.len() {
        return pos;
    }
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Step forward to the nearest UTF-8 character boundary at or after `pos`.
fn next_char_boundary(text: &str, mut pos: usize) -> usize {
    while pos < text.len() && !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}
