//! Screen-space primitives and text measurement.
//!
//! All coordinates are CSS pixels relative to the top-left corner of a card's
//! diagram container. Text sizes reported by a [`Measurer`] use the same units.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub min: Vec2f,
    pub max: Vec2f,
}

impl RectF {
    pub fn from_min_max(min: Vec2f, max: Vec2f) -> Self {
        Self { min, max }
    }
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_min_max(Vec2f::new(x, y), Vec2f::new(x + w, y + h))
    }
    pub fn left(&self) -> f32 {
        self.min.x
    }
    pub fn top(&self) -> f32 {
        self.min.y
    }
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
    pub fn translate(&self, dx: f32, dy: f32) -> RectF {
        RectF::from_min_max(
            Vec2f::new(self.min.x + dx, self.min.y + dy),
            Vec2f::new(self.max.x + dx, self.max.y + dy),
        )
    }
}

/// Font selection passed to a [`Measurer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }
    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

pub trait Measurer {
    /// Return the size of the rendered text (width, height) in CSS pixels.
    fn measure(&self, text: &str, font: Font) -> (f32, f32);
}

/// Estimates text extents from per-character advance widths.
///
/// Wide characters (Hangul, CJK, fullwidth forms) advance a full em; narrow
/// punctuation and spaces a bit over a quarter em; everything else roughly
/// half an em. Good enough for deterministic layout without font files.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasurer {
    pub line_height: f32,
    pub bold_factor: f32,
}

impl Default for ApproxMeasurer {
    fn default() -> Self {
        Self {
            line_height: 1.4,
            bold_factor: 1.05,
        }
    }
}

impl ApproxMeasurer {
    fn advance(c: char) -> f32 {
        if is_wide(c) {
            1.0
        } else if matches!(c, ' ' | 'i' | 'l' | 'j' | '.' | ',' | ';' | ':' | '\'' | '|' | '!') {
            0.28
        } else if c == '(' || c == ')' || c == 'f' || c == 't' || c == 'r' {
            0.36
        } else if c.is_uppercase() || c == 'm' || c == 'w' {
            0.7
        } else {
            0.55
        }
    }
}

impl Measurer for ApproxMeasurer {
    fn measure(&self, text: &str, font: Font) -> (f32, f32) {
        let ems: f32 = text.chars().map(Self::advance).sum();
        let bold = if font.bold { self.bold_factor } else { 1.0 };
        (ems * font.size * bold, font.size * self.line_height)
    }
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}
