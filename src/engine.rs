//! The segmentation engine.
//!
//! ```text
//! text + annotations
//!        │
//!        ▼
//!   Validator ──invalid──▶ Locator ──not found──▶ skipped[]
//!        │ valid              │ found
//!        ▼                    ▼
//!   ValidatedSpan ◀───────────┘
//!        │
//!        ▼
//!   TagTable (per char) ──▶ merge ──▶ segments[]
//! ```
//!
//! An [`Engine`] holds only its configuration; every call builds its own
//! tables and drops them on return, so one engine can be shared across
//! threads freely.

use serde::Serialize;

use biasmark_core::{Annotation, Result, Segment};

use crate::config::EngineConfig;
use crate::merge::merge;
use crate::offset::OffsetMap;
use crate::tagger::Tagger;
use crate::validate::ValidatedSpan;

/// Output of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segmentation {
    /// Ordered partition of the text.
    pub segments: Vec<Segment>,
    /// Usable spans, in annotation order.
    pub spans: Vec<ValidatedSpan>,
    /// Indices of annotations that were neither valid nor locatable.
    pub skipped: Vec<usize>,
}

impl Segmentation {
    /// Concatenate segment texts. Always equals the input text.
    #[must_use]
    pub fn reconstruct(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Indices of annotations whose offsets were recovered by search.
    #[must_use]
    pub fn recovered(&self) -> Vec<usize> {
        self.spans
            .iter()
            .filter(|s| s.recovered)
            .map(|s| s.annotation_index)
            .collect()
    }

    /// Segments covered by at least one annotation.
    pub fn annotated(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_annotated())
    }

    /// Span for an annotation index, if it was not skipped.
    #[must_use]
    pub fn span_for(&self, annotation_index: usize) -> Option<&ValidatedSpan> {
        self.spans
            .iter()
            .find(|s| s.annotation_index == annotation_index)
    }
}

/// Reconciles annotation offsets with text and segments it.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with `config`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Segment `text` under `annotations`.
    ///
    /// Total: bad offsets are recovered or reported in
    /// [`Segmentation::skipped`], never returned as errors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biasmark::{Annotation, Engine};
    ///
    /// let text = "The QUICK fox";
    /// let anns = vec![Annotation::new("quick fox", "Other", 999, 999)];
    /// let out = Engine::default().segment(text, &anns);
    ///
    /// assert_eq!(out.reconstruct(), text);
    /// assert_eq!(out.segments[1].text, "QUICK fox");
    /// assert_eq!(out.recovered(), vec![0]);
    /// ```
    #[must_use]
    pub fn segment(&self, text: &str, annotations: &[Annotation]) -> Segmentation {
        let map = OffsetMap::new(text);
        let tagging = Tagger::new(text, &map, &self.config).tag(annotations);
        let segments = merge(text, &map, &tagging.table, self.config.offset_unit);

        if !tagging.skipped.is_empty() {
            log::warn!(
                "[engine] {} of {} annotations could not be placed: {:?}",
                tagging.skipped.len(),
                annotations.len(),
                tagging.skipped
            );
        }

        Segmentation {
            segments,
            spans: tagging.spans,
            skipped: tagging.skipped,
        }
    }

    /// Segment `text` under a JSON array of annotation records.
    ///
    /// Fails only when the JSON violates the record contract (see
    /// [`Annotation::parse_list`]).
    pub fn segment_json(&self, text: &str, annotations_json: &str) -> Result<Segmentation> {
        let annotations = Annotation::parse_list(annotations_json)?;
        Ok(self.segment(text, &annotations))
    }
}

/// Segment with the default configuration.
#[must_use]
pub fn segment(text: &str, annotations: &[Annotation]) -> Segmentation {
    Engine::default().segment(text, annotations)
}
