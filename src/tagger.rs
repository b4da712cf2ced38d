//! Per-character tagging.
//!
//! Every codepoint of the text gets three cells: the categories covering it,
//! the explanations aligned with those categories, and the indices of the
//! annotations covering it. Annotations are applied in input order, so at a
//! given position the first annotation to introduce a category also decides
//! its explanation there. Later annotations of the same category still add
//! their index.
//!
//! ```text
//! text:         t  h  e     o  l  d     g  u  y
//! #0 Age [4,7)              ●  ●  ●
//! #1 Age [4,11)             ●  ●  ●  ●  ●  ●  ●
//!
//! categories:   -  -  -  -  A  A  A  A  A  A  A      (A = Age, once)
//! indices:      -  -  -  -  01 01 01 1  1  1  1
//! ```

use biasmark_core::Annotation;

use crate::config::EngineConfig;
use crate::locate::Locator;
use crate::offset::{clamp_nonempty, OffsetMap};
use crate::validate::{ValidatedSpan, Validator};

// =============================================================================
// Ordered Set
// =============================================================================

/// Insertion-ordered, duplicate-free collection.
///
/// Per-position sets hold a handful of entries, so a linear membership scan
/// beats hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T>(Vec<T>);

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: PartialEq> OrderedSet<T> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless present. Returns whether it was inserted.
    pub fn insert(&mut self, value: T) -> bool {
        if self.0.contains(&value) {
            false
        } else {
            self.0.push(value);
            true
        }
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    /// Set equality, ignoring insertion order.
    #[must_use]
    pub fn same_members(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|v| other.0.contains(v))
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: PartialEq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for v in iter {
            set.insert(v);
        }
        set
    }
}

// =============================================================================
// Tag Table
// =============================================================================

/// The three per-character arrays, each `char_len` long.
///
/// Strings are borrowed from the annotations being tagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable<'a> {
    /// Categories per position.
    pub categories: Vec<OrderedSet<&'a str>>,
    /// Explanations per position, aligned with `categories`.
    pub explanations: Vec<Vec<&'a str>>,
    /// Covering annotation indices per position.
    pub annotations: Vec<OrderedSet<usize>>,
}

impl<'a> TagTable<'a> {
    /// An untagged table for `len` positions.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            categories: vec![OrderedSet::new(); len],
            explanations: vec![Vec::new(); len],
            annotations: vec![OrderedSet::new(); len],
        }
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if the table has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Mark every position of `span` as covered by `annotation`.
    pub fn apply(&mut self, span: &ValidatedSpan, annotation: &'a Annotation) {
        for i in span.char_range() {
            if self.categories[i].insert(annotation.category.as_str()) {
                self.explanations[i].push(annotation.explanation.as_str());
            }
            self.annotations[i].insert(span.annotation_index);
        }
    }
}

// =============================================================================
// Tagger
// =============================================================================

/// Result of tagging one text.
#[derive(Debug, Clone)]
pub struct Tagging<'a> {
    /// Per-character tags.
    pub table: TagTable<'a>,
    /// Usable spans, in annotation order.
    pub spans: Vec<ValidatedSpan>,
    /// Annotations that could be neither validated nor located.
    pub skipped: Vec<usize>,
}

/// Validates, recovers and applies annotations for one text.
#[derive(Debug, Clone)]
pub struct Tagger<'a> {
    map: &'a OffsetMap,
    config: &'a EngineConfig,
    validator: Validator<'a>,
    locator: Locator<'a>,
}

impl<'a> Tagger<'a> {
    /// Create a tagger. `map` must have been built from `text`.
    #[must_use]
    pub fn new(text: &'a str, map: &'a OffsetMap, config: &'a EngineConfig) -> Self {
        Self {
            map,
            config,
            validator: Validator::new(text, map, config),
            locator: Locator::new(text, map, config),
        }
    }

    /// Resolve the range of one annotation: claimed if valid, else located.
    #[must_use]
    pub fn resolve(&self, index: usize, annotation: &Annotation) -> Option<ValidatedSpan> {
        let issue = match self.validator.validate(index, annotation) {
            Ok(span) => return Some(span),
            Err(issue) => issue,
        };

        let Some(hit) = self.locator.locate(&annotation.text) else {
            log::warn!(
                "[tagger] skipping annotation {} ({}): {}; text '{}' not found",
                index,
                annotation.category,
                issue,
                annotation.text
            );
            return None;
        };

        let chars = clamp_nonempty(hit.chars.start, hit.chars.end, self.map.char_len())?;
        log::debug!(
            "[tagger] recovered annotation {} via {}: {} -> chars {:?}",
            index,
            hit.tier,
            issue,
            chars
        );
        Some(ValidatedSpan::from_chars(
            index,
            chars,
            self.map,
            self.config.offset_unit,
            true,
        ))
    }

    /// Tag every annotation in order.
    #[must_use]
    pub fn tag(&self, annotations: &'a [Annotation]) -> Tagging<'a> {
        let mut table = TagTable::new(self.map.char_len());
        let mut spans = Vec::with_capacity(annotations.len());
        let mut skipped = Vec::new();

        for (index, annotation) in annotations.iter().enumerate() {
            match self.resolve(index, annotation) {
                Some(span) => {
                    table.apply(&span, annotation);
                    spans.push(span);
                }
                None => skipped.push(index),
            }
        }

        Tagging {
            table,
            spans,
            skipped,
        }
    }
}
