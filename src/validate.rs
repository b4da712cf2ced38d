//! Offset validation.
//!
//! A claimed range is usable as-is iff both offsets are integers,
//! `0 <= start`, `start < end`, `start < len` and `end <= len`, with `len`
//! measured in the configured [`OffsetUnit`]. Validation never fails
//! loudly: it hands back an [`OffsetIssue`] and the caller decides whether
//! to try recovery.

use std::ops::Range;

use serde::Serialize;

use biasmark_core::{Annotation, OffsetUnit};

use crate::config::EngineConfig;
use crate::locate::eq_ignore_case;
use crate::offset::OffsetMap;

/// A usable, in-bounds range for one annotation.
///
/// Only produced by [`Validator::validate`] or by recovery, so holders can
/// rely on `start < end <= len(text)` without re-checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedSpan {
    /// Index into the input annotation list.
    pub annotation_index: usize,
    /// Start offset in the configured unit (inclusive).
    pub start: usize,
    /// End offset in the configured unit (exclusive).
    pub end: usize,
    /// True if the claimed offsets were replaced by a located range.
    pub recovered: bool,
    #[serde(skip)]
    chars: Range<usize>,
}

impl ValidatedSpan {
    /// `chars` must be a non-empty char range inside the text behind `map`.
    pub(crate) fn from_chars(
        annotation_index: usize,
        chars: Range<usize>,
        map: &OffsetMap,
        unit: OffsetUnit,
        recovered: bool,
    ) -> Self {
        Self {
            annotation_index,
            start: map.from_char(unit, chars.start),
            end: map.from_char(unit, chars.end),
            recovered,
            chars,
        }
    }

    /// The covered range in codepoints.
    #[must_use]
    pub fn char_range(&self) -> Range<usize> {
        self.chars.clone()
    }

    /// Length in the configured unit.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Never true for a constructed span.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Why a claimed range was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffsetIssue {
    /// One or both offsets were missing or not integers.
    NotInteger,
    /// Start is negative.
    Negative {
        /// Claimed start.
        start: i64,
    },
    /// `end <= start`.
    Empty {
        /// Claimed start.
        start: i64,
        /// Claimed end.
        end: i64,
    },
    /// Start at/after the end of text, or end past it.
    OutOfBounds {
        /// Claimed start.
        start: i64,
        /// Claimed end.
        end: i64,
        /// Text length in the configured unit.
        text_len: usize,
    },
    /// A UTF-16 offset falls between the halves of a surrogate pair.
    SplitsSurrogate {
        /// The offending offset.
        offset: usize,
    },
    /// The claimed range is valid but covers different text.
    TextMismatch {
        /// Annotation text (trimmed).
        expected: String,
        /// Text found at the claimed range.
        actual: String,
    },
}

impl std::fmt::Display for OffsetIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetIssue::NotInteger => write!(f, "offsets missing or not integers"),
            OffsetIssue::Negative { start } => write!(f, "negative start {}", start),
            OffsetIssue::Empty { start, end } => {
                write!(f, "empty range [{}, {})", start, end)
            }
            OffsetIssue::OutOfBounds {
                start,
                end,
                text_len,
            } => write!(
                f,
                "range [{}, {}) outside text of length {}",
                start, end, text_len
            ),
            OffsetIssue::SplitsSurrogate { offset } => {
                write!(f, "offset {} splits a surrogate pair", offset)
            }
            OffsetIssue::TextMismatch { expected, actual } => {
                write!(f, "expected '{}', found '{}'", expected, actual)
            }
        }
    }
}

/// Checks claimed ranges against one text.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    text: &'a str,
    map: &'a OffsetMap,
    config: &'a EngineConfig,
}

impl<'a> Validator<'a> {
    /// Create a validator. `map` must have been built from `text`.
    #[must_use]
    pub fn new(text: &'a str, map: &'a OffsetMap, config: &'a EngineConfig) -> Self {
        Self { text, map, config }
    }

    /// Validate the claimed range of `annotation` (at position `index` in its list).
    pub fn validate(
        &self,
        index: usize,
        annotation: &Annotation,
    ) -> Result<ValidatedSpan, OffsetIssue> {
        let unit = self.config.offset_unit;
        let (Some(start), Some(end)) = (annotation.start_index, annotation.end_index) else {
            return Err(OffsetIssue::NotInteger);
        };
        if start < 0 {
            return Err(OffsetIssue::Negative { start });
        }
        if end <= start {
            return Err(OffsetIssue::Empty { start, end });
        }

        let text_len = self.map.len_in(unit);
        let in_bounds = usize::try_from(start).is_ok_and(|s| s < text_len)
            && usize::try_from(end).is_ok_and(|e| e <= text_len);
        if !in_bounds {
            return Err(OffsetIssue::OutOfBounds {
                start,
                end,
                text_len,
            });
        }

        // In bounds, so both fit in usize
        let (start, end) = (start as usize, end as usize);
        let char_start = self
            .map
            .to_char(unit, start)
            .ok_or(OffsetIssue::SplitsSurrogate { offset: start })?;
        let char_end = self
            .map
            .to_char(unit, end)
            .ok_or(OffsetIssue::SplitsSurrogate { offset: end })?;

        if self.config.verify_text {
            let expected = annotation.text.trim();
            let actual = self.map.slice(self.text, char_start..char_end);
            if !eq_ignore_case(actual.trim(), expected) {
                return Err(OffsetIssue::TextMismatch {
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        Ok(ValidatedSpan::from_chars(
            index,
            char_start..char_end,
            self.map,
            unit,
            false,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(
        text: &str,
        ann: &Annotation,
        config: &EngineConfig,
    ) -> Result<ValidatedSpan, OffsetIssue> {
        let map = OffsetMap::new(text);
        Validator::new(text, &map, config).validate(0, ann)
    }

    #[test]
    fn test_valid_range() {
        let span = check(
            "The old guy",
            &Annotation::new("old guy", "Age", 4, 11),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!((span.start, span.end), (4, 11));
        assert!(!span.recovered);
        assert_eq!(span.char_range(), 4..11);
    }

    #[test]
    fn test_rejections() {
        let config = EngineConfig::default();
        let text = "hello";
        let cases = [
            (Annotation::unanchored("x", "Age"), OffsetIssue::NotInteger),
            (
                Annotation::new("x", "Age", -1, 3),
                OffsetIssue::Negative { start: -1 },
            ),
            (
                Annotation::new("x", "Age", 2, 2),
                OffsetIssue::Empty { start: 2, end: 2 },
            ),
            (
                Annotation::new("x", "Age", 3, 1),
                OffsetIssue::Empty { start: 3, end: 1 },
            ),
            (
                Annotation::new("x", "Age", 2, 6),
                OffsetIssue::OutOfBounds {
                    start: 2,
                    end: 6,
                    text_len: 5,
                },
            ),
            (
                Annotation::new("x", "Age", 999, 1000),
                OffsetIssue::OutOfBounds {
                    start: 999,
                    end: 1000,
                    text_len: 5,
                },
            ),
        ];
        for (ann, expected) in cases {
            assert_eq!(check(text, &ann, &config).unwrap_err(), expected);
        }
    }

    #[test]
    fn test_full_text_is_valid() {
        let ann = Annotation::new("hello", "Age", 0, 5);
        let span = check("hello", &ann, &EngineConfig::default()).unwrap();
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_stale_text_passes_without_verification() {
        // Offsets in bounds are trusted even if the text moved
        let span = check(
            "The young guy",
            &Annotation::new("old guy", "Age", 4, 11),
            &EngineConfig::default(),
        );
        assert!(span.is_ok());
    }

    #[test]
    fn test_verify_text_rejects_mismatch() {
        let config = EngineConfig::builder().with_verify_text(true).build();
        let ann = Annotation::new("old guy", "Age", 4, 11);
        let err = check("The young guy", &ann, &config).unwrap_err();
        assert!(matches!(err, OffsetIssue::TextMismatch { .. }));

        // Case differences are tolerated
        assert!(check("The OLD guy", &Annotation::new("old guy", "Age", 4, 11), &config).is_ok());
    }

    #[test]
    fn test_utf16_offsets() {
        let config = EngineConfig::builder()
            .with_offset_unit(OffsetUnit::Utf16)
            .build();
        let text = "👋 old";
        // 👋 = UTF-16 0..2, " " = 2, "old" = 3..6
        let span = check(text, &Annotation::new("old", "Age", 3, 6), &config).unwrap();
        assert_eq!(span.char_range(), 2..5);
        assert_eq!((span.start, span.end), (3, 6));

        let err = check(text, &Annotation::new("👋", "Age", 1, 3), &config).unwrap_err();
        assert_eq!(err, OffsetIssue::SplitsSurrogate { offset: 1 });
    }

    #[test]
    fn test_issue_display() {
        let issue = OffsetIssue::OutOfBounds {
            start: 999,
            end: 999,
            text_len: 13,
        };
        assert_eq!(issue.to_string(), "range [999, 999) outside text of length 13");
    }
}
