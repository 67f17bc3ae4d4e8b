//! Turn display chunks into an ordered list of render segments.

use serde::Serialize;
use tracing::debug;

use crate::containment::Containment;
use crate::model::{Chunk, SyntaxData};

/// A piece of a structural chunk's text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Run<'a> {
    Text { text: &'a str },
    /// A modifier drawn inline as "label above, (text) below".
    Nested { chunk: &'a Chunk },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment<'a> {
    /// A top-level modifier: grammatical label above its parenthesized text.
    Modifier { chunk: &'a Chunk },
    /// A structural chunk: underlined runs with the role tag below.
    Structural { chunk: &'a Chunk, runs: Vec<Run<'a>> },
    /// Sentence text after the last display chunk.
    Tail { offset: usize, text: &'a str },
}

/// Build the segment list for `display` chunks.
///
/// Text between chunks is not emitted; only the remainder after the last
/// chunk's `end` is appended as a [`Segment::Tail`].
pub fn build_segments<'a>(
    data: &'a SyntaxData,
    display: &[&'a Chunk],
    containment: &Containment<'a>,
) -> Vec<Segment<'a>> {
    let mut segments = Vec::with_capacity(display.len() + 1);
    let mut cursor = 0usize;

    for chunk in display.iter().copied() {
        if chunk.is_modifier() {
            segments.push(Segment::Modifier { chunk });
        } else {
            let runs = split_runs(chunk, containment.nested_in(chunk));
            segments.push(Segment::Structural { chunk, runs });
        }
        cursor = chunk.end;
    }

    if cursor < data.char_len() {
        segments.push(Segment::Tail {
            offset: cursor,
            text: data.tail_from(cursor),
        });
    }
    segments
}

/// Split `chunk.text` around each nested modifier, consuming matched text so a
/// repeated substring is not matched twice.
pub fn split_runs<'a>(chunk: &'a Chunk, nested: &[&'a Chunk]) -> Vec<Run<'a>> {
    if nested.is_empty() {
        return vec![Run::Text { text: &chunk.text }];
    }

    let mut runs = Vec::new();
    let mut remaining: &'a str = &chunk.text;
    for m in nested.iter().copied() {
        let Some(idx) = remaining.find(m.text.as_str()) else {
            debug!(container = %chunk.key(), nested = %m.key(), "nested text not found in container, dropped");
            continue;
        };
        let before = &remaining[..idx];
        if !before.is_empty() {
            runs.push(Run::Text { text: before });
        }
        runs.push(Run::Nested { chunk: m });
        remaining = &remaining[idx + m.text.len()..];
    }
    if !remaining.is_empty() {
        runs.push(Run::Text { text: remaining });
    }
    runs
}
