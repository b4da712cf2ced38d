//! # biasmark
//!
//! Span reconciliation and segmentation for bias annotations.
//!
//! An external model flags spans of a text with a category, an
//! explanation and a suggested revision, and claims a character range for
//! each. Those ranges are often wrong: off by a few characters, counted in
//! the wrong unit, or pointing at text that has since been edited. This
//! crate turns `(text, annotations)` into an ordered, gap-free list of
//! segments, each tagged with the annotations covering it.
//!
//! - **Validation**: claimed ranges are used as-is when in bounds
//! - **Recovery**: otherwise the annotation text is searched for (exact,
//!   case-insensitive, first/last-word bracketing)
//! - **Segmentation**: maximal runs of identical tags, concatenating back
//!   to the input exactly
//! - **Diagnostics**: annotations that cannot be placed are reported, not
//!   dropped silently
//!
//! ## Quick Start
//!
//! ```rust
//! use biasmark::{segment, Annotation};
//!
//! let text = "a bad apple pie";
//! let anns = vec![
//!     Annotation::new("bad pie", "Other", -1, -1),
//!     Annotation::new("xyz-not-present", "Other", -1, -1),
//! ];
//! let out = segment(text, &anns);
//!
//! assert_eq!(out.reconstruct(), text);
//! assert_eq!(out.segments[1].text, "bad apple pie");
//! assert_eq!(out.skipped, vec![1]);
//! ```
//!
//! ## Offset Units
//!
//! Offsets are codepoints by default. Producers that count UTF-16 code
//! units (JavaScript) should configure [`OffsetUnit::Utf16`]:
//!
//! ```rust
//! use biasmark::{Annotation, Engine, EngineConfig, OffsetUnit};
//!
//! let engine = Engine::new(
//!     EngineConfig::builder().with_offset_unit(OffsetUnit::Utf16).build(),
//! );
//! // "👋" is two UTF-16 units
//! let out = engine.segment("👋 old", &[Annotation::new("old", "Age", 3, 6)]);
//! assert_eq!(out.segments[1].text, "old");
//! assert_eq!((out.segments[1].start, out.segments[1].end), (3, 6));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod locate;
pub mod merge;
pub mod offset;
pub mod response;
pub mod summary;
pub mod tagger;
pub mod validate;

pub use biasmark_core::{Annotation, Category, Error, OffsetUnit, Result, Segment};

pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::{segment, Engine, Segmentation};
pub use locate::{Located, Locator, Tier};
pub use response::parse_response;
pub use summary::{BiasAnalysis, RiskLevel, Summary};
pub use validate::{OffsetIssue, ValidatedSpan, Validator};
