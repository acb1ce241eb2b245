//! Position converter.
//!
//! Converts between flat character offsets and 1-based `(line, column)` coordinates using a Rope,
//! so lookups stay O(log N) for long documents. Both directions are total: out-of-range input is
//! clamped, never rejected.
//!
//! Offsets and columns count Unicode scalar values (`char`). Only `'\n'` ends a line; a `'\r'`
//! before it is part of the line's content.

use ropey::Rope;

/// Line/column index over a single source text.
pub struct SourceIndex {
    rope: Rope,
}

impl SourceIndex {
    /// Build an index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count (`N` newlines => `N + 1` lines).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Length in characters of a 1-based line, excluding its newline.
    ///
    /// Returns 0 for lines outside the document.
    pub fn line_len(&self, line: usize) -> usize {
        if line == 0 || line > self.rope.len_lines() {
            return 0;
        }
        let line_idx = line - 1;
        let start = self.rope.line_to_char(line_idx);
        if line_idx + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line_idx + 1) - start - 1 // -1 for newline
        } else {
            self.rope.len_chars() - start
        }
    }

    /// Text of a 1-based line, excluding its newline.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line - 1).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// Convert a character offset to a 1-based `(line, column)`.
    ///
    /// Offsets past the end clamp to the end of the document: the last line, one column past
    /// its last character.
    pub fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line_idx = self.rope.char_to_line(offset);
        let line_start = self.rope.line_to_char(line_idx);
        (line_idx + 1, offset - line_start + 1)
    }

    /// Convert a 1-based `(line, column)` to a character offset.
    ///
    /// `line < 1` yields 0, lines past the end yield the document length, and columns are
    /// clamped to `1..=line_len + 1`.
    pub fn position_to_offset(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }
        if line > self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let line_start = self.rope.line_to_char(line - 1);
        let column = column.max(1) - 1;
        line_start + column.min(self.line_len(line))
    }

    /// Replace the character range `start..end` with `text`.
    ///
    /// Both bounds are clamped to the document.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) {
        let len = self.rope.len_chars();
        let start = start.min(len);
        let end = end.clamp(start, len);
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
    }

    /// Get the complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

/// Convert a character offset in `source` into a 1-based `(line, column)`.
pub fn offset_to_line_column(source: &str, offset: usize) -> (usize, usize) {
    SourceIndex::from_text(source).offset_to_position(offset)
}

/// Convert a 1-based `(line, column)` in `source` into a character offset.
pub fn line_column_to_offset(source: &str, line: usize, column: usize) -> usize {
    SourceIndex::from_text(source).position_to_offset(line, column)
}
