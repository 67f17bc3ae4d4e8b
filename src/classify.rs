//! Partition chunks into structural and modifier sets.

use crate::model::Chunk;

/// Chunks split by role and merged back into one start-ordered sequence.
///
/// All sorts are stable, so chunks sharing a `start` keep their input order.
#[derive(Debug, Clone, Default)]
pub struct Classification<'a> {
    /// Chunks with a sentence-element role, sorted by `start`.
    pub structural: Vec<&'a Chunk>,
    /// Chunks with a grammatical tag and no role, in input order.
    pub modifiers: Vec<&'a Chunk>,
    /// `structural` followed by `modifiers`, re-sorted by `start`.
    pub combined: Vec<&'a Chunk>,
}

pub fn classify(chunks: &[Chunk]) -> Classification<'_> {
    let mut structural: Vec<&Chunk> = chunks.iter().filter(|c| c.is_structural()).collect();
    structural.sort_by_key(|c| c.start);

    let modifiers: Vec<&Chunk> = chunks.iter().filter(|c| c.is_modifier()).collect();

    let mut combined: Vec<&Chunk> = structural.iter().chain(modifiers.iter()).copied().collect();
    combined.sort_by_key(|c| c.start);

    Classification {
        structural,
        modifiers,
        combined,
    }
}

impl<'a> Classification<'a> {
    /// Modifiers that carry the arrow flag, in input order.
    pub fn arrow_bearing(&self) -> impl Iterator<Item = &'a Chunk> + '_ {
        self.modifiers.iter().copied().filter(|c| c.modifier)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.structural
            .iter()
            .any(|c| c.sen_ele.eq_ignore_ascii_case(role))
    }
}
