//! Byte / codepoint / UTF-16 offset handling.
//!
//! # The Three Coordinate Systems
//!
//! Annotation producers and Rust disagree on how to count positions:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Text: "naïve 👋"                                            │
//! │                                                              │
//! │  BYTE (what str::find / slicing use)                         │
//! │    n  a  [ ï ]  v  e  ␠  [    👋    ]                        │
//! │    0  1  2  3   4  5  6  7  8  9  10                         │
//! │                                                              │
//! │  CHAR (codepoint, default annotation unit)                   │
//! │    n  a  ï  v  e  ␠  👋                                      │
//! │    0  1  2  3  4  5  6                                       │
//! │                                                              │
//! │  UTF-16 (JavaScript producers)                               │
//! │    n  a  ï  v  e  ␠  [ 👋  ]                                 │
//! │    0  1  2  3  4  5  6   7                                   │
//! │                      └pair┘                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine works in codepoints internally (one tag cell per `char`),
//! slices in bytes, and converts annotation offsets from whichever
//! [`OffsetUnit`] the caller configured. An offset that lands inside a
//! surrogate pair has no codepoint equivalent and is rejected.

use std::ops::Range;

use biasmark_core::OffsetUnit;

/// Precomputed conversion tables for one text.
///
/// Lookups are O(1) after construction, except `byte_to_char` (binary
/// search). ASCII text skips the tables
/// entirely since all three units coincide.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    char_len: usize,
    byte_len: usize,
    utf16_len: usize,
    is_ascii: bool,
    /// `char_to_byte[c]` = byte offset of char `c`; has `char_len + 1` entries.
    char_to_byte: Vec<usize>,
    /// `char_to_utf16[c]` = UTF-16 offset of char `c`; has `char_len + 1` entries.
    char_to_utf16: Vec<usize>,
    /// `utf16_to_char[u]` = char index at UTF-16 offset `u`, `None` mid-pair.
    utf16_to_char: Vec<Option<usize>>,
}

impl OffsetMap {
    /// Build the tables for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                char_len: text.len(),
                byte_len: text.len(),
                utf16_len: text.len(),
                is_ascii: true,
                char_to_byte: Vec::new(),
                char_to_utf16: Vec::new(),
                utf16_to_char: Vec::new(),
            };
        }

        let mut char_to_byte = Vec::with_capacity(text.len() + 1);
        let mut char_to_utf16 = Vec::with_capacity(text.len() + 1);
        let mut utf16_to_char = Vec::with_capacity(text.len() + 1);
        let mut utf16 = 0usize;

        for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
            char_to_byte.push(byte_idx);
            char_to_utf16.push(utf16);
            utf16_to_char.push(Some(char_idx));
            // Second half of a surrogate pair
            if ch.len_utf16() == 2 {
                utf16_to_char.push(None);
            }
            utf16 += ch.len_utf16();
        }

        let char_len = char_to_byte.len();
        char_to_byte.push(text.len());
        char_to_utf16.push(utf16);
        utf16_to_char.push(Some(char_len));

        Self {
            char_len,
            byte_len: text.len(),
            utf16_len: utf16,
            is_ascii: false,
            char_to_byte,
            char_to_utf16,
            utf16_to_char,
        }
    }

    /// Number of codepoints.
    #[must_use]
    pub const fn char_len(&self) -> usize {
        self.char_len
    }

    /// Length of the text in `unit`.
    #[must_use]
    pub const fn len_in(&self, unit: OffsetUnit) -> usize {
        match unit {
            OffsetUnit::Char => self.char_len,
            OffsetUnit::Utf16 => self.utf16_len,
        }
    }

    /// Check if this text is ASCII.
    #[must_use]
    pub const fn is_ascii(&self) -> bool {
        self.is_ascii
    }

    /// Convert char offset to byte offset. Offsets past the end clamp.
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        if self.is_ascii {
            char_idx.min(self.byte_len)
        } else {
            self.char_to_byte
                .get(char_idx)
                .copied()
                .unwrap_or(self.byte_len)
        }
    }

    /// Convert byte offset to char offset.
    ///
    /// Only meaningful at char boundaries (e.g. results of `str::find`).
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        if self.is_ascii {
            return byte_idx.min(self.char_len);
        }
        // char_to_byte is strictly increasing
        match self.char_to_byte.binary_search(&byte_idx) {
            Ok(c) => c,
            Err(c) => c.saturating_sub(1),
        }
    }

    /// Convert an offset in `unit` to a char offset.
    ///
    /// Returns `None` if the offset is past the end, or splits a surrogate
    /// pair in UTF-16 mode.
    #[must_use]
    pub fn to_char(&self, unit: OffsetUnit, offset: usize) -> Option<usize> {
        match unit {
            OffsetUnit::Char => (offset <= self.char_len).then_some(offset),
            OffsetUnit::Utf16 if self.is_ascii => (offset <= self.utf16_len).then_some(offset),
            OffsetUnit::Utf16 => self.utf16_to_char.get(offset).copied().flatten(),
        }
    }

    /// Convert a char offset to `unit`. Offsets past the end clamp.
    #[must_use]
    pub fn from_char(&self, unit: OffsetUnit, char_idx: usize) -> usize {
        match unit {
            OffsetUnit::Char => char_idx.min(self.char_len),
            OffsetUnit::Utf16 if self.is_ascii => char_idx.min(self.utf16_len),
            OffsetUnit::Utf16 => self
                .char_to_utf16
                .get(char_idx)
                .copied()
                .unwrap_or(self.utf16_len),
        }
    }

    /// Slice `text` by a char range. `text` must be the text this map was built from.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str, chars: Range<usize>) -> &'a str {
        let start = self.char_to_byte(chars.start);
        let end = self.char_to_byte(chars.end);
        text.get(start..end).unwrap_or("")
    }
}

/// Clamp a located char range into `[0, len)` and guarantee it is non-empty.
///
/// A range that collapses (or starts at/after the end) is widened to one
/// character so the annotation stays highlightable. Returns `None` only
/// when the text itself is empty.
#[must_use]
pub fn clamp_nonempty(start: usize, end: usize, len: usize) -> Option<Range<usize>> {
    if len == 0 {
        return None;
    }
    let start = start.min(len - 1);
    let end = end.min(len);
    let end = if end <= start { start + 1 } else { end };
    Some(start..end)
}

// =============================================================================
// Tests
// =============================================================================
