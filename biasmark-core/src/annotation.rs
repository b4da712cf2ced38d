//! Annotation records and the bias category registry.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Offset Unit
// ============================================================================

/// Unit in which annotation offsets are counted.
///
/// ```text
/// Text: "hi 👋 there"
///
///   CHAR (codepoint)   h  i  ␠  👋  ␠  t ...
///                      0  1  2  3   4  5
///
///   UTF-16             h  i  ␠  [👋 ]  ␠  t ...
///                      0  1  2  3  4  5  6
///                            └surrogate pair┘
/// ```
///
/// Producers written in JavaScript count UTF-16 code units; everything else
/// in this crate defaults to codepoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// Unicode scalar values (Rust `char`).
    #[default]
    Char,
    /// UTF-16 code units.
    Utf16,
}

impl OffsetUnit {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            OffsetUnit::Char => "char",
            OffsetUnit::Utf16 => "utf16",
        }
    }
}

impl std::fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Category Registry
// ============================================================================

/// Bias categories the analysis prompt asks the model to choose from.
///
/// The engine treats `Annotation::category` as an opaque string; this
/// registry is only used where model output is normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Skin color, ancestry, or cultural background.
    RaceEthnicity,
    /// Roles or expectations for men, women, non-binary people.
    GenderIdentity,
    /// Age.
    Age,
    /// Faith or lack thereof.
    ReligionBelief,
    /// LGBTQ+ identities.
    SexualOrientation,
    /// Wealth, education, or occupation.
    SocioeconomicStatus,
    /// Country of origin or immigrant status.
    NationalityImmigration,
    /// Physical, cognitive, or mental-health differences.
    Disability,
    /// Formal schooling or credentials.
    EducationLevel,
    /// Stated or assumed political leanings.
    PoliticalIdeology,
    /// Weight, height, attractiveness.
    PhysicalAppearance,
    /// Anything the registry does not know.
    Other,
}

impl Category {
    /// The known categories, in prompt order (excludes `Other`).
    pub const KNOWN: [Category; 11] = [
        Category::RaceEthnicity,
        Category::GenderIdentity,
        Category::Age,
        Category::ReligionBelief,
        Category::SexualOrientation,
        Category::SocioeconomicStatus,
        Category::NationalityImmigration,
        Category::Disability,
        Category::EducationLevel,
        Category::PoliticalIdeology,
        Category::PhysicalAppearance,
    ];

    /// Canonical label, as used in prompts and in `Annotation::category`.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Category::RaceEthnicity => "Race / Ethnicity",
            Category::GenderIdentity => "Gender / Gender Identity",
            Category::Age => "Age",
            Category::ReligionBelief => "Religion / Belief System",
            Category::SexualOrientation => "Sexual Orientation",
            Category::SocioeconomicStatus => "Socioeconomic Status",
            Category::NationalityImmigration => "Nationality / Immigration Status",
            Category::Disability => "Disability",
            Category::EducationLevel => "Education Level",
            Category::PoliticalIdeology => "Political Ideology",
            Category::PhysicalAppearance => "Physical Appearance",
            Category::Other => "Other",
        }
    }

    /// Parse a canonical label. Unknown labels map to [`Category::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::KNOWN
            .iter()
            .copied()
            .find(|c| c.as_label() == label)
            .unwrap_or(Category::Other)
    }

    /// Whether `label` is one of the known canonical labels.
    #[must_use]
    pub fn is_known_label(label: &str) -> bool {
        Self::from_label(label) != Category::Other
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

// ============================================================================
// Annotation
// ============================================================================

/// A claim from the annotation service that a range of text is biased.
///
/// Offsets are whatever the producer sent. They may be negative, reversed,
/// out of range, or not integers at all (`None`); the engine validates and,
/// if needed, recovers them without mutating the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Substring the producer claims it matched.
    pub text: String,
    /// Category identifier.
    pub category: String,
    /// Why the span was flagged.
    #[serde(default)]
    pub explanation: String,
    /// Neutral rewording offered by the producer.
    #[serde(default, alias = "suggested_revision")]
    pub suggested_revision: String,
    /// Claimed start (inclusive). `None` if absent or not an integer.
    #[serde(default, alias = "start_index", deserialize_with = "lenient_offset")]
    pub start_index: Option<i64>,
    /// Claimed end (exclusive). `None` if absent or not an integer.
    #[serde(default, alias = "end_index", deserialize_with = "lenient_offset")]
    pub end_index: Option<i64>,
}

impl Annotation {
    /// Create an annotation with integer offsets and empty explanation.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        start_index: i64,
        end_index: i64,
    ) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            explanation: String::new(),
            suggested_revision: String::new(),
            start_index: Some(start_index),
            end_index: Some(end_index),
        }
    }

    /// Create an annotation with no usable offsets.
    #[must_use]
    pub fn unanchored(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            start_index: None,
            end_index: None,
            ..Self::new(text, category, 0, 0)
        }
    }

    /// Set the explanation.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Set the suggested revision.
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.suggested_revision = revision.into();
        self
    }

    /// Parse a JSON array of annotation records.
    ///
    /// Shape errors (non-string `text`, missing `category`, a record that is
    /// not an object) are contract violations and fail the whole list.
    /// Offsets that are missing, `null`, fractional or non-numeric are not:
    /// they deserialize to `None` and are handled by recovery.
    pub fn parse_list(json: &str) -> Result<Vec<Annotation>> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| Error::parse(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Same as [`Annotation::parse_list`] for an already-parsed value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Vec<Annotation>> {
        let serde_json::Value::Array(items) = value else {
            return Err(Error::invalid_input("annotations must be a JSON array"));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    return Err(Error::malformed(index, "record must be a JSON object"));
                }
                serde_json::from_value(item).map_err(|e| Error::malformed(index, e.to_string()))
            })
            .collect()
    }
}

/// Accept any JSON value for an offset; only integers survive.
///
/// Integral floats (`12.0`) count as integers since JavaScript producers
/// emit them for whole numbers.
fn lenient_offset<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_i64().or_else(|| v.as_f64().and_then(integral))))
}

fn integral(f: f64) -> Option<i64> {
    // 2^63 is exact in f64; anything at or above it overflows i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for c in Category::KNOWN {
            assert_eq!(Category::from_label(c.as_label()), c);
        }
    }

    #[test]
    fn test_unknown_category_is_other() {
        assert_eq!(Category::from_label("Weather"), Category::Other);
        assert_eq!(Category::from_label("  Age "), Category::Age);
        assert!(!Category::is_known_label("age"));
    }

    #[test]
    fn test_parse_camel_and_snake_case() {
        let json = r#"[
            {"text": "old guy", "category": "Age", "startIndex": 4, "endIndex": 11},
            {"text": "bossy", "category": "Gender / Gender Identity",
             "suggested_revision": "assertive", "start_index": 0, "end_index": 5}
        ]"#;
        let anns = Annotation::parse_list(json).unwrap();
        assert_eq!(anns[0].start_index, Some(4));
        assert_eq!(anns[0].end_index, Some(11));
        assert_eq!(anns[1].suggested_revision, "assertive");
        assert_eq!(anns[1].start_index, Some(0));
    }

    #[test]
    fn test_non_integer_offsets_become_none() {
        let json = r#"[{"text": "x", "category": "Age", "startIndex": 1.5, "endIndex": null}]"#;
        let anns = Annotation::parse_list(json).unwrap();
        assert_eq!(anns[0].start_index, None);
        assert_eq!(anns[0].end_index, None);

        let json = r#"[{"text": "x", "category": "Age", "startIndex": "3"}]"#;
        let anns = Annotation::parse_list(json).unwrap();
        assert_eq!(anns[0].start_index, None);
        assert_eq!(anns[0].end_index, None);
    }

    #[test]
    fn test_integral_float_offsets_are_integers() {
        let json = r#"[{"text": "old", "category": "Age", "startIndex": 12.0, "endIndex": 15.0},
                       {"text": "old", "category": "Age", "startIndex": 1.5, "endIndex": -2.0},
                       {"text": "old", "category": "Age", "startIndex": 1e300, "endIndex": 3}]"#;
        let anns = Annotation::parse_list(json).unwrap();
        assert_eq!((anns[0].start_index, anns[0].end_index), (Some(12), Some(15)));
        assert_eq!((anns[1].start_index, anns[1].end_index), (None, Some(-2)));
        assert_eq!((anns[2].start_index, anns[2].end_index), (None, Some(3)));
    }

    #[test]
    fn test_shape_errors_are_malformed() {
        let json = r#"[{"text": "ok", "category": "Age"}, {"text": 5, "category": "Age"}]"#;
        let err = Annotation::parse_list(json).unwrap_err();
        assert!(matches!(err, Error::MalformedAnnotation { index: 1, .. }));

        let err = Annotation::parse_list(r#"["just a string"]"#).unwrap_err();
        assert!(matches!(err, Error::MalformedAnnotation { index: 0, .. }));

        let err = Annotation::parse_list(r#"{"text": "x"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = Annotation::parse_list("not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let ann =
            Annotation::new("bossy", "Gender / Gender Identity", 0, 5).with_revision("direct");
        let json = serde_json::to_string(&ann).unwrap();
        assert!(json.contains("\"startIndex\":0"));
        assert!(json.contains("\"suggestedRevision\":\"direct\""));
    }
}
