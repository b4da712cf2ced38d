//! Output segments.

use serde::{Deserialize, Serialize};

/// A maximal run of text covered by the same set of annotations.
///
/// Segments returned for one text are contiguous, non-overlapping and in
/// order; concatenating their `text` fields gives back the input exactly.
/// `start`/`end` are in the engine's configured offset unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Slice of the original text.
    pub text: String,
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
    /// Categories covering this run, ordered by first introducing annotation.
    pub categories: Vec<String>,
    /// Explanations aligned with `categories`.
    pub explanations: Vec<String>,
    /// Indices into the input annotation list, ascending.
    pub annotation_indices: Vec<usize>,
}

impl Segment {
    /// An uncovered run of text.
    #[must_use]
    pub fn plain(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            categories: Vec::new(),
            explanations: Vec::new(),
            annotation_indices: Vec::new(),
        }
    }

    /// Whether any annotation covers this segment.
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        !self.annotation_indices.is_empty()
    }

    /// The annotation a detail view should open for this segment.
    #[must_use]
    pub fn primary_annotation(&self) -> Option<usize> {
        self.annotation_indices.first().copied()
    }

    /// Whether `category` is among this segment's categories.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Length in the configured offset unit.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if empty (only the segment of an empty text is).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_segment() {
        let seg = Segment::plain("hello", 0, 5);
        assert!(!seg.is_annotated());
        assert_eq!(seg.primary_annotation(), None);
        assert_eq!(seg.len(), 5);
    }

    #[test]
    fn test_primary_annotation_is_first() {
        let seg = Segment {
            annotation_indices: vec![2, 5],
            categories: vec!["Age".into()],
            explanations: vec!["ageist".into()],
            ..Segment::plain("old", 4, 7)
        };
        assert_eq!(seg.primary_annotation(), Some(2));
        assert!(seg.has_category("Age"));
        assert!(!seg.has_category("Disability"));
    }

    #[test]
    fn test_camel_case_json() {
        let json = serde_json::to_string(&Segment::plain("", 0, 0)).unwrap();
        assert!(json.contains("\"annotationIndices\":[]"));
    }
}
