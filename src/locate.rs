//! Fallback location of annotations whose claimed offsets are unusable.
//!
//! # Tiers
//!
//! Evaluated in a fixed order, first hit wins:
//!
//! ```text
//! ┌────────────────────┬────────────────────────────────────────────────┐
//! │ 1. Exact           │ first case-sensitive occurrence of trimmed text│
//! │ 2. CaseInsensitive │ first occurrence ignoring case                 │
//! │ 3. WordBracket     │ >=2 words: first occurrence of first word      │
//! │                    │ through LAST occurrence of last word           │
//! │ 4. (none)          │ not found                                      │
//! └────────────────────┴────────────────────────────────────────────────┘
//!
//!   text:       "a bad apple pie"
//!   annotation: "bad pie"
//!   tier 3:        [bad ........ pie]  → "bad apple pie"
//! ```
//!
//! Case-insensitive comparison folds one `char` to one `char`, so positions
//! in the folded text line up with positions in the original. Characters
//! whose lowercase form is longer than one codepoint (e.g. `İ`) compare as
//! themselves.

use std::ops::Range;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::offset::OffsetMap;

/// Which search tier produced a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Case-sensitive substring match.
    Exact,
    /// Substring match ignoring case.
    CaseInsensitive,
    /// First word through last word.
    WordBracket,
}

impl Tier {
    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Tier::Exact => "exact",
            Tier::CaseInsensitive => "case_insensitive",
            Tier::WordBracket => "word_bracket",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A range found by the locator, in codepoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Char range into the searched text. May need clamping by the caller.
    pub chars: Range<usize>,
    /// Tier that matched.
    pub tier: Tier,
}

/// Searches one text for annotation content.
///
/// Construction folds the text once; each [`Locator::locate`] call is then
/// O(text × needle) in the worst case.
#[derive(Debug, Clone)]
pub struct Locator<'a> {
    text: &'a str,
    map: &'a OffsetMap,
    folded: Vec<char>,
    case_insensitive: bool,
    word_bracketing: bool,
}

impl<'a> Locator<'a> {
    /// Create a locator. `map` must have been built from `text`.
    #[must_use]
    pub fn new(text: &'a str, map: &'a OffsetMap, config: &EngineConfig) -> Self {
        Self {
            text,
            map,
            folded: text.chars().map(fold_char).collect(),
            case_insensitive: config.case_insensitive,
            word_bracketing: config.word_bracketing,
        }
    }

    /// Find `needle` in the text. Whitespace around `needle` is ignored;
    /// an empty needle is never found.
    #[must_use]
    pub fn locate(&self, needle: &str) -> Option<Located> {
        let needle = needle.trim();
        if needle.is_empty() {
            return None;
        }

        if let Some(byte_start) = self.text.find(needle) {
            let start = self.map.byte_to_char(byte_start);
            return Some(Located {
                chars: start..start + needle.chars().count(),
                tier: Tier::Exact,
            });
        }

        if self.case_insensitive {
            let folded = fold(needle);
            if let Some(start) = find_chars(&self.folded, &folded) {
                return Some(Located {
                    chars: start..start + folded.len(),
                    tier: Tier::CaseInsensitive,
                });
            }
        }

        if self.word_bracketing {
            return self.bracket(needle);
        }

        None
    }

    fn bracket(&self, needle: &str) -> Option<Located> {
        let words: Vec<&str> = needle.split_whitespace().collect();
        let (first, last) = match words.as_slice() {
            [first, .., last] => (fold(first), fold(last)),
            _ => return None,
        };

        let first_start = find_chars(&self.folded, &first)?;
        let last_start = rfind_chars(&self.folded, &last)?;
        if last_start < first_start {
            return None;
        }

        Some(Located {
            chars: first_start..last_start + last.len(),
            tier: Tier::WordBracket,
        })
    }
}

/// Lowercase a char when that keeps it a single char.
#[must_use]
pub(crate) fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn fold(s: &str) -> Vec<char> {
    s.chars().map(fold_char).collect()
}

/// Compare two strings with [`fold_char`] semantics.
#[must_use]
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().map(fold_char).eq(b.chars().map(fold_char))
}

fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
