use std::fmt;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Chunk
// ────────────────────────────────────────────────────────────────────────────

/// A labeled span over a sentence.
///
/// `start`/`end` are character offsets into the owning sentence. `sen_ele`
/// carries the sentence-element role (`s`, `v`, `o`, `sc`) and is empty for
/// chunks that are not structural. `gram_ele` is a free-form grammatical tag
/// and is empty for chunks that are not modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sen_ele: String,
    #[serde(default)]
    pub gram_ele: String,
    /// True if an arrow should be drawn from this chunk to the chunk it describes.
    #[serde(default)]
    pub modifier: bool,
    #[serde(default)]
    pub rend_type: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Chunk {
    pub fn is_structural(&self) -> bool {
        !self.sen_ele.is_empty()
    }

    /// Tagged with a grammatical element but without a structural role.
    pub fn is_modifier(&self) -> bool {
        self.sen_ele.is_empty() && !self.gram_ele.is_empty()
    }

    /// `senEle` when present, otherwise `gramEle`.
    pub fn role(&self) -> &str {
        if self.sen_ele.is_empty() {
            &self.gram_ele
        } else {
            &self.sen_ele
        }
    }

    pub fn span(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn key(&self) -> ChunkKey {
        ChunkKey {
            start: self.start,
            end: self.end,
            role: self.role().to_string(),
        }
    }

    /// Upper-cased role tag shown under structural chunks.
    pub fn tag(&self) -> String {
        self.sen_ele.to_uppercase()
    }
}

/// Value identity of a chunk: `(start, end, role)`.
///
/// Two chunks sharing all three components are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChunkKey {
    pub start: usize,
    pub end: usize,
    pub role: String,
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.start, self.end, self.role)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SyntaxData
// ────────────────────────────────────────────────────────────────────────────

/// One annotated sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxData {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    pub sentence: String,
    #[serde(default)]
    pub translation: String,
}

impl SyntaxData {
    /// Sentence length in characters.
    pub fn char_len(&self) -> usize {
        self.sentence.chars().count()
    }

    /// Sentence text from character offset `from` to the end.
    pub fn tail_from(&self, from: usize) -> &str {
        match self.sentence.char_indices().nth(from) {
            Some((byte, _)) => &self.sentence[byte..],
            None => "",
        }
    }
}

/// A parsed input document: every card it contains, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyntaxDocument {
    pub cards: Vec<SyntaxData>,
}

impl SyntaxDocument {
    /// Parse a document that is either an array of cards or a single card object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text).context("Failed to parse JSON")?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let cards = match value {
            serde_json::Value::Array(_) => serde_json::from_value::<Vec<SyntaxData>>(value)
                .context("Failed to deserialize card list")?,
            serde_json::Value::Object(_) => vec![
                serde_json::from_value::<SyntaxData>(value).context("Failed to deserialize card")?,
            ],
            other => bail!("Expected a card object or an array of cards, got {}", json_kind(&other)),
        };
        Ok(Self { cards })
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
