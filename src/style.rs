//! Role-to-color styling for rendered cards.
//!
//! A [`StyleTable`] is passed into rendering rather than read from a global,
//! so callers can swap themes per run. Unknown role tags fall back to
//! [`StyleTable::fallback`].

use std::fmt;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        parse_color(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

/// Parse `#rrggbb`, `#rgb` or one of a few named colors.
pub fn parse_color(val: &str) -> Option<Rgb> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()?;
        return match digits.as_slice() {
            [r, g, b] => Some(Rgb(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Some(Rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            _ => None,
        };
    }
    match val.to_ascii_lowercase().as_str() {
        "white" => Some(Rgb(0xff, 0xff, 0xff)),
        "black" => Some(Rgb(0x00, 0x00, 0x00)),
        "sky" => Some(Rgb(0x0e, 0xa5, 0xe9)),
        "rose" => Some(Rgb(0xf4, 0x3f, 0x5e)),
        "emerald" => Some(Rgb(0x10, 0xb9, 0x81)),
        "amber" => Some(Rgb(0xd9, 0x77, 0x06)),
        "slate" => Some(Rgb(0x94, 0xa3, 0xb8)),
        "blue" => Some(Rgb(0x25, 0x63, 0xeb)),
        "gray" | "grey" => Some(Rgb(0x80, 0x80, 0x80)),
        _ => None,
    }
}

/// Colors for one structural role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStyle {
    /// Underline under the chunk text.
    pub underline: Rgb,
    /// Role tag text below the underline.
    pub text: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    /// Keyed by lower-cased role tag.
    pub roles: IndexMap<String, RoleStyle>,
    pub fallback: RoleStyle,
    /// Grammatical label above modifier text.
    pub modifier_label: Rgb,
    /// Main chunk text.
    pub chunk_text: Rgb,
    /// Parenthesized modifier text and the trailing sentence text.
    pub plain_text: Rgb,
    pub arrow: Rgb,
    pub background: Rgb,
    pub border: Rgb,
}

impl Default for StyleTable {
    fn default() -> Self {
        let sky = RoleStyle {
            underline: Rgb(0x0e, 0xa5, 0xe9),
            text: Rgb(0x02, 0x84, 0xc7),
        };
        let rose = RoleStyle {
            underline: Rgb(0xf4, 0x3f, 0x5e),
            text: Rgb(0xe1, 0x1d, 0x48),
        };
        let emerald = RoleStyle {
            underline: Rgb(0x10, 0xb9, 0x81),
            text: Rgb(0x05, 0x96, 0x69),
        };
        let mut roles = IndexMap::new();
        roles.insert("s".to_string(), sky);
        roles.insert("v".to_string(), rose);
        roles.insert("o".to_string(), emerald);
        roles.insert("sc".to_string(), emerald);
        Self {
            roles,
            fallback: RoleStyle {
                underline: Rgb(0x94, 0xa3, 0xb8),
                text: Rgb(0x64, 0x74, 0x8b),
            },
            modifier_label: Rgb(0xd9, 0x77, 0x06),
            chunk_text: Rgb(0x1e, 0x29, 0x3b),
            plain_text: Rgb(0x33, 0x41, 0x55),
            arrow: Rgb(0x25, 0x63, 0xeb),
            background: Rgb(0xf8, 0xfa, 0xfc),
            border: Rgb(0xe2, 0xe8, 0xf0),
        }
    }
}

impl StyleTable {
    /// Style for a role tag, case-insensitive, falling back for unknown tags.
    pub fn role(&self, tag: &str) -> RoleStyle {
        self.roles
            .get(tag.to_lowercase().as_str())
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Apply a JSON theme on top of this table.
    ///
    /// Role entries in the theme replace or extend existing ones; any other
    /// field present in the theme replaces the current value.
    pub fn merge_json(&mut self, text: &str) -> Result<()> {
        let theme: ThemeOverrides = serde_json::from_str(text).context("Failed to parse theme JSON")?;
        for (tag, style) in theme.roles {
            self.roles.insert(tag.to_lowercase(), style);
        }
        let fields = [
            (theme.fallback_underline, &mut self.fallback.underline),
            (theme.fallback_text, &mut self.fallback.text),
            (theme.modifier_label, &mut self.modifier_label),
            (theme.chunk_text, &mut self.chunk_text),
            (theme.plain_text, &mut self.plain_text),
            (theme.arrow, &mut self.arrow),
            (theme.background, &mut self.background),
            (theme.border, &mut self.border),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ThemeOverrides {
    roles: IndexMap<String, RoleStyle>,
    fallback_underline: Option<Rgb>,
    fallback_text: Option<Rgb>,
    modifier_label: Option<Rgb>,
    chunk_text: Option<Rgb>,
    plain_text: Option<Rgb>,
    arrow: Option<Rgb>,
    background: Option<Rgb>,
    border: Option<Rgb>,
}
