//! End-to-end recovery scenarios for misplaced annotations.

use biasmark::offset::clamp_nonempty;
use biasmark::{segment, Annotation, Engine, EngineConfig, OffsetUnit};

fn texts(out: &biasmark::Segmentation) -> Vec<&str> {
    out.segments.iter().map(|s| s.text.as_str()).collect()
}

#[test]
fn recovers_case_insensitive_match() {
    let text = "The QUICK fox";
    let anns = vec![Annotation::new("quick fox", "Other", 999, 999)];
    let out = segment(text, &anns);

    assert_eq!(texts(&out), vec!["The ", "QUICK fox"]);
    assert_eq!(out.segments[1].categories, vec!["Other"]);
    assert_eq!(out.recovered(), vec![0]);
    assert!(out.skipped.is_empty());
}

#[test]
fn recovers_by_word_bracketing() {
    let text = "a bad apple pie";
    let anns = vec![Annotation::new("bad pie", "Other", -1, -1)];
    let out = segment(text, &anns);
    assert_eq!(texts(&out), vec!["a ", "bad apple pie"]);
    assert_eq!((out.segments[1].start, out.segments[1].end), (2, 15));
}

#[test]
fn unlocatable_annotation_is_skipped() {
    let text = "nothing to see here";
    let anns = vec![
        Annotation::new("see", "Other", 11, 14),
        Annotation::new("xyz-not-present", "Other", -1, -1),
    ];
    let out = segment(text, &anns);

    assert_eq!(out.skipped, vec![1]);
    assert_eq!(out.reconstruct(), text);
    assert!(out
        .segments
        .iter()
        .all(|s| !s.annotation_indices.contains(&1)));
    assert_eq!(out.annotated().count(), 1);
}

#[test]
fn empty_text_yields_one_empty_segment() {
    let out = segment("", &[]);
    assert_eq!(out.segments.len(), 1);
    let seg = &out.segments[0];
    assert_eq!(seg.text, "");
    assert!(seg.categories.is_empty());
    assert!(seg.explanations.is_empty());
    assert!(seg.annotation_indices.is_empty());
}

#[test]
fn empty_text_skips_every_annotation() {
    let anns = vec![Annotation::new("x", "Other", 0, 1)];
    let out = segment("", &anns);
    assert_eq!(out.skipped, vec![0]);
    assert_eq!(out.segments.len(), 1);
}

#[test]
fn degenerate_ranges_widen_to_one_char() {
    assert_eq!(clamp_nonempty(3, 3, 10), Some(3..4));
    assert_eq!(clamp_nonempty(10, 10, 10), Some(9..10));
    assert_eq!(clamp_nonempty(4, 2, 10), Some(4..5));
    assert_eq!(clamp_nonempty(2, 50, 10), Some(2..10));
    assert_eq!(clamp_nonempty(0, 0, 0), None);
}

#[test]
fn recovered_single_char_at_text_end_is_highlightable() {
    let text = "Is that so?";
    let anns = vec![Annotation::new("?", "Other", 11, 11)];
    let out = segment(text, &anns);

    assert_eq!(out.recovered(), vec![0]);
    let span = out.span_for(0).unwrap();
    assert_eq!((span.start, span.end), (10, 11));
    assert_eq!(span.len(), 1);
    assert_eq!(texts(&out), vec!["Is that so", "?"]);
    assert_eq!(out.segments[1].annotation_indices, vec![0]);
}

#[test]
fn integral_float_offsets_are_trusted() {
    let out = Engine::default()
        .segment_json(
            "aaa old bbb old",
            r#"[{"text": "old", "category": "Age", "startIndex": 12.0, "endIndex": 15.0}]"#,
        )
        .unwrap();

    assert!(out.recovered().is_empty());
    let span = out.span_for(0).unwrap();
    assert_eq!((span.start, span.end), (12, 15));
    assert_eq!(texts(&out), vec!["aaa old bbb ", "old"]);
}

#[test]
fn overlapping_annotations_keep_first_explanation() {
    let text = "the old guy";
    let anns = vec![
        Annotation::new("old", "Age", 4, 7).with_explanation("first"),
        Annotation::new("old guy", "Age", 4, 11).with_explanation("second"),
    ];
    let out = segment(text, &anns);

    assert_eq!(texts(&out), vec!["the ", "old", " guy"]);
    assert_eq!(out.segments[1].categories, vec!["Age"]);
    assert_eq!(out.segments[1].explanations, vec!["first"]);
    assert_eq!(out.segments[1].annotation_indices, vec![0, 1]);
    assert_eq!(out.segments[1].primary_annotation(), Some(0));
    assert_eq!(out.segments[2].explanations, vec!["second"]);
    assert_eq!(out.segments[2].annotation_indices, vec![1]);
}

#[test]
fn mixed_valid_and_recovered() {
    let text = "Women are too emotional to lead, said the old man.";
    let anns = vec![
        Annotation::new("too emotional", "Gender / Gender Identity", 10, 23),
        Annotation::new("old man", "Age", 0, 0),
    ];
    let out = segment(text, &anns);

    assert_eq!(out.recovered(), vec![1]);
    let span = out.span_for(1).unwrap();
    assert_eq!((span.start, span.end), (42, 49));
    assert_eq!(
        texts(&out),
        vec!["Women are ", "too emotional", " to lead, said the ", "old man", "."]
    );
}

#[test]
fn verify_text_relocates_stale_offsets() {
    let text = "old dog, old guy";
    let anns = vec![Annotation::new("old guy", "Age", 0, 7)];

    let trusting = segment(text, &anns);
    assert_eq!(trusting.segments[0].text, "old dog");

    let engine = Engine::new(EngineConfig::builder().with_verify_text(true).build());
    let checked = engine.segment(text, &anns);
    assert_eq!(texts(&checked), vec!["old dog, ", "old guy"]);
    assert_eq!(checked.recovered(), vec![0]);
}

#[test]
fn disabled_tiers_skip_instead_of_recovering() {
    let config = EngineConfig::builder()
        .with_case_insensitive(false)
        .with_word_bracketing(false)
        .build();
    let engine = Engine::new(config);

    let out = engine.segment("The QUICK fox", &[Annotation::new("quick fox", "Other", -1, -1)]);
    assert_eq!(out.skipped, vec![0]);

    let out = engine.segment("a bad apple pie", &[Annotation::new("bad pie", "Other", -1, -1)]);
    assert_eq!(out.skipped, vec![0]);
}

#[test]
fn unanchored_annotations_are_located() {
    let out = segment("so crazy", &[Annotation::unanchored("crazy", "Disability")]);
    assert_eq!(texts(&out), vec!["so ", "crazy"]);
    assert_eq!(out.recovered(), vec![0]);
}

#[test]
fn utf16_offsets_around_emoji() {
    let text = "Hi 👋 old timer";
    let engine = Engine::new(EngineConfig::builder().with_offset_unit(OffsetUnit::Utf16).build());

    // "old" starts after the two-unit emoji
    let out = engine.segment(text, &[Annotation::new("old", "Age", 6, 9)]);
    assert!(out.recovered().is_empty());
    assert_eq!(texts(&out), vec!["Hi 👋 ", "old", " timer"]);
    assert_eq!((out.segments[1].start, out.segments[1].end), (6, 9));

    // Codepoint offsets for the same span cover " ol" in UTF-16
    let out = engine.segment(text, &[Annotation::new("old", "Age", 5, 8)]);
    assert_eq!(out.segments[1].text, " ol");

    let checked = Engine::new(
        EngineConfig::builder()
            .with_offset_unit(OffsetUnit::Utf16)
            .with_verify_text(true)
            .build(),
    );
    let out = checked.segment(text, &[Annotation::new("old", "Age", 5, 8)]);
    assert_eq!(out.segments[1].text, "old");
    assert_eq!(out.recovered(), vec![0]);
}

#[test]
fn offset_inside_surrogate_pair_is_recovered() {
    let text = "👋 old";
    let engine = Engine::new(EngineConfig::builder().with_offset_unit(OffsetUnit::Utf16).build());
    let out = engine.segment(text, &[Annotation::new("👋", "Other", 1, 2)]);
    assert_eq!(out.recovered(), vec![0]);
    assert_eq!(out.segments[0].text, "👋");
    assert_eq!((out.segments[0].start, out.segments[0].end), (0, 2));
}

#[test]
fn segment_json_round_trip_through_serde() {
    let engine = Engine::default();
    let out = engine
        .segment_json(
            "a bad apple pie",
            r#"[{"text": "bad pie", "category": "Other", "explanation": "e",
                 "suggestedRevision": "r", "startIndex": -1, "endIndex": -1}]"#,
        )
        .unwrap();

    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["segments"][1]["text"], "bad apple pie");
    assert_eq!(value["segments"][1]["annotationIndices"][0], 0);
    assert_eq!(value["spans"][0]["recovered"], true);
    assert_eq!(value["skipped"].as_array().map(Vec::len), Some(0));
}
