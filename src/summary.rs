//! Analysis summaries.

use serde::{Deserialize, Serialize};

use biasmark_core::{Annotation, OffsetUnit, Result};

use crate::response::parse_response;

/// Coarse risk rating derived from the number of instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// No instances.
    Low,
    /// One or two instances.
    Medium,
    /// Three or more.
    High,
}

impl RiskLevel {
    /// Rating for `instances` flagged spans.
    #[must_use]
    pub const fn from_count(instances: usize) -> Self {
        match instances {
            0 => RiskLevel::Low,
            1 | 2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(s)
    }
}

/// Summary statistics for one analysed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of annotations.
    pub total_bias_instances: usize,
    /// Distinct categories, in order of first appearance.
    pub categories_detected: Vec<String>,
    /// One-line human assessment.
    pub overall_assessment: String,
    /// Risk rating.
    pub risk_level: RiskLevel,
    /// Text length in codepoints.
    pub text_length: usize,
    /// Instances per whitespace-separated word.
    pub bias_density: f64,
}

impl Summary {
    /// Summarise `annotations` flagged in `text`.
    #[must_use]
    pub fn from_annotations(annotations: &[Annotation], text: &str) -> Self {
        let total = annotations.len();
        let mut categories_detected: Vec<String> = Vec::new();
        for a in annotations {
            if !categories_detected.contains(&a.category) {
                categories_detected.push(a.category.clone());
            }
        }

        let overall_assessment = match total {
            0 => "No bias detected".to_string(),
            1 => "Minor bias detected (1 instance)".to_string(),
            2 => "Minor bias detected (2 instances)".to_string(),
            n => format!("Multiple bias instances detected ({} instances)", n),
        };

        let words = text.split_whitespace().count().max(1);

        Self {
            total_bias_instances: total,
            categories_detected,
            overall_assessment,
            risk_level: RiskLevel::from_count(total),
            text_length: text.chars().count(),
            bias_density: total as f64 / words as f64,
        }
    }
}

/// A parsed analysis: the text, its annotations and their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasAnalysis {
    /// The analysed text.
    pub original_text: String,
    /// Flagged spans.
    pub bias_spans: Vec<Annotation>,
    /// Summary over `bias_spans`.
    pub summary: Summary,
}

impl BiasAnalysis {
    /// Bundle already-placed annotations.
    #[must_use]
    pub fn new(original_text: impl Into<String>, bias_spans: Vec<Annotation>) -> Self {
        let original_text = original_text.into();
        let summary = Summary::from_annotations(&bias_spans, &original_text);
        Self {
            original_text,
            bias_spans,
            summary,
        }
    }

    /// Parse a raw model reply for `text`.
    ///
    /// Whitespace-only text is never sent for analysis, so the reply is
    /// ignored and an empty analysis returned.
    pub fn from_response(raw: &str, text: &str, unit: OffsetUnit) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new(text, Vec::new()));
        }
        let spans = parse_response(raw, text, unit)?;
        Ok(Self::new(text, spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(category: &str) -> Annotation {
        Annotation::new("x", category, 0, 1)
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::from_count(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_count(2), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_count(3), RiskLevel::High);
    }

    #[test]
    fn test_empty_summary() {
        let s = Summary::from_annotations(&[], "");
        assert_eq!(s.overall_assessment, "No bias detected");
        assert_eq!(s.risk_level, RiskLevel::Low);
        assert!(s.bias_density.abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_counts() {
        let anns = vec![ann("Age"), ann("Disability"), ann("Age")];
        let s = Summary::from_annotations(&anns, "one two three four five six");
        assert_eq!(s.total_bias_instances, 3);
        assert_eq!(s.categories_detected, vec!["Age", "Disability"]);
        assert_eq!(s.overall_assessment, "Multiple bias instances detected (3 instances)");
        assert_eq!(s.risk_level, RiskLevel::High);
        assert!((s.bias_density - 0.5).abs() < 1e-9);
        assert_eq!(s.text_length, 27);
    }

    #[test]
    fn test_minor_wording() {
        let s = Summary::from_annotations(&[ann("Age")], "text");
        assert_eq!(s.overall_assessment, "Minor bias detected (1 instance)");
        let s = Summary::from_annotations(&[ann("Age"), ann("Age")], "text");
        assert_eq!(s.overall_assessment, "Minor bias detected (2 instances)");
    }

    #[test]
    fn test_whitespace_text_skips_parsing() {
        let a = BiasAnalysis::from_response("not json at all", "   ", OffsetUnit::Char).unwrap();
        assert!(a.bias_spans.is_empty());
        assert_eq!(a.summary.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_from_response() {
        let reply = r#"{"bias_instances": [
            {"text_span": "illegals", "category": "Nationality / Immigration Status"}
        ]}"#;
        let text = "They called them illegals.";
        let a = BiasAnalysis::from_response(reply, text, OffsetUnit::Char).unwrap();
        assert_eq!(a.bias_spans.len(), 1);
        assert_eq!(a.summary.categories_detected, vec!["Nationality / Immigration Status"]);
        assert_eq!(a.summary.risk_level, RiskLevel::Medium);
    }
}
