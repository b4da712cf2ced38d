//! Turning a raw model reply into annotations.
//!
//! The analysis prompt asks the model for:
//!
//! ```json
//! {
//!   "bias_instances": [
//!     {
//!       "text_span": "exact words from the input",
//!       "category": "one of the registry labels",
//!       "explanation": "...",
//!       "suggested_revision": "..."
//!     }
//!   ]
//! }
//! ```
//!
//! Models often wrap this in a ```` ```json ```` fence, sometimes after a
//! line of prose, and never return offsets, so offsets are assigned here by
//! searching the original text.

use serde::Deserialize;

use biasmark_core::{Annotation, Category, Error, OffsetUnit, Result};

use crate::config::EngineConfig;
use crate::locate::Locator;
use crate::offset::OffsetMap;

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    bias_instances: Vec<RawInstance>,
}

#[derive(Debug, Deserialize)]
struct RawInstance {
    #[serde(default)]
    text_span: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    suggested_revision: String,
}

/// Pull the JSON document out of a model reply.
///
/// Accepts a bare object (a stray closing fence is dropped) or the first
/// markdown-fenced block anywhere in the reply (with or without a `json`
/// tag). Failing both, the outermost `{ ... }` pair is taken.
#[must_use]
pub fn extract_json(raw: &str) -> &str {
    let s = raw.trim();
    if s.starts_with('{') {
        // A bare object may still carry a closing fence
        return s.strip_suffix("```").map_or(s, str::trim_end);
    }

    if let Some(fence) = s.find("```") {
        let body = &s[fence + 3..];
        let body = body.strip_prefix("json").unwrap_or(body);
        let body = match body.find("```") {
            Some(end) => &body[..end],
            None => body,
        };
        return body.trim();
    }

    match (s.find('{'), s.rfind('}')) {
        (Some(start), Some(end)) if end > start => &s[start..=end],
        _ => s,
    }
}

/// Parse a model reply for `original_text`.
///
/// Unknown categories become `"Other"`. Each span is placed at its first
/// occurrence in `original_text` (exact, then ignoring case), with offsets
/// counted in `unit`; spans that cannot be found get `-1/-1` so the engine
/// either recovers or skips them.
pub fn parse_response(raw: &str, original_text: &str, unit: OffsetUnit) -> Result<Vec<Annotation>> {
    let parsed: RawResponse = serde_json::from_str(extract_json(raw))
        .map_err(|e| Error::parse(format!("model response is not valid JSON: {}", e)))?;

    let map = OffsetMap::new(original_text);
    let config = EngineConfig::builder()
        .with_offset_unit(unit)
        .with_word_bracketing(false)
        .build();
    let locator = Locator::new(original_text, &map, &config);

    let annotations = parsed
        .bias_instances
        .into_iter()
        .map(|inst| {
            let category = Category::from_label(&inst.category);
            if category == Category::Other && inst.category.trim() != Category::Other.as_label() {
                log::warn!("[response] unknown category '{}', using Other", inst.category);
            }

            let (start, end) = match locator.locate(&inst.text_span) {
                Some(hit) => (
                    map.from_char(unit, hit.chars.start) as i64,
                    map.from_char(unit, hit.chars.end) as i64,
                ),
                None => {
                    log::warn!("[response] span not found in text: '{}'", inst.text_span);
                    (-1, -1)
                }
            };

            Annotation::new(inst.text_span, category.as_label(), start, end)
                .with_explanation(inst.explanation)
                .with_revision(inst.suggested_revision)
        })
        .collect();

    Ok(annotations)
}
