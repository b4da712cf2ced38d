//! Collapsing the per-character tag table into segments.

use biasmark_core::{OffsetUnit, Segment};

use crate::offset::OffsetMap;
use crate::tagger::TagTable;

/// Emit maximal runs of positions with identical tags.
///
/// A boundary falls between `i - 1` and `i` whenever the category set or
/// the annotation-index set differs as a set. Empty text yields one empty,
/// untagged segment. Concatenating the returned texts gives `text` back.
#[must_use]
pub fn merge(text: &str, map: &OffsetMap, table: &TagTable<'_>, unit: OffsetUnit) -> Vec<Segment> {
    let len = table.len();
    if len == 0 {
        return vec![Segment::plain(text, 0, map.len_in(unit))];
    }

    let mut segments = Vec::new();
    let mut run_start = 0;
    for i in 1..len {
        let same = table.categories[i].same_members(&table.categories[i - 1])
            && table.annotations[i].same_members(&table.annotations[i - 1]);
        if !same {
            segments.push(build(text, map, table, unit, run_start, i));
            run_start = i;
        }
    }
    segments.push(build(text, map, table, unit, run_start, len));
    segments
}

fn build(
    text: &str,
    map: &OffsetMap,
    table: &TagTable<'_>,
    unit: OffsetUnit,
    start: usize,
    end: usize,
) -> Segment {
    let mut annotation_indices = table.annotations[start].as_slice().to_vec();
    annotation_indices.sort_unstable();

    Segment {
        text: map.slice(text, start..end).to_string(),
        start: map.from_char(unit, start),
        end: map.from_char(unit, end),
        categories: table.categories[start]
            .as_slice()
            .iter()
            .map(|c| (*c).to_string())
            .collect(),
        explanations: table.explanations[start]
            .iter()
            .map(|e| (*e).to_string())
            .collect(),
        annotation_indices,
    }
}
