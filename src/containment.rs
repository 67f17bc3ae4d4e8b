//! Resolve which modifier chunks are rendered inside a larger chunk.
//!
//! A chunk with a grammatical tag is nested under the first earlier chunk in
//! the combined sequence that ends at the same offset and whose text contains
//! its text. The match is textual: start offsets are never compared, so two
//! chunks that merely share trailing text can be paired.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::{Chunk, ChunkKey};

#[derive(Debug, Clone, Default)]
pub struct Containment<'a> {
    /// Container key to the chunks nested inside it, in scan order.
    pub nested_by_key: IndexMap<ChunkKey, Vec<&'a Chunk>>,
    /// Keys of chunks that are drawn inside a container instead of at top level.
    pub hidden_keys: HashSet<ChunkKey>,
}

pub fn resolve_containment<'a>(combined: &[&'a Chunk]) -> Containment<'a> {
    let mut out = Containment::default();
    for (idx, chunk) in combined.iter().enumerate() {
        if chunk.gram_ele.is_empty() {
            continue;
        }
        let container = combined[..idx]
            .iter()
            .find(|prev| prev.end == chunk.end && prev.text.contains(chunk.text.as_str()));
        if let Some(container) = container {
            out.nested_by_key
                .entry(container.key())
                .or_default()
                .push(*chunk);
            out.hidden_keys.insert(chunk.key());
        }
    }
    out
}

impl<'a> Containment<'a> {
    pub fn is_hidden(&self, chunk: &Chunk) -> bool {
        self.hidden_keys.contains(&chunk.key())
    }

    pub fn nested_in(&self, chunk: &Chunk) -> &[&'a Chunk] {
        self.nested_by_key
            .get(&chunk.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Combined chunks that stay at top level.
    pub fn display_chunks(&self, combined: &[&'a Chunk]) -> Vec<&'a Chunk> {
        combined
            .iter()
            .copied()
            .filter(|c| !self.is_hidden(c))
            .collect()
    }
}
