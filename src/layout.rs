//! Deterministic text-flow layout of render segments.
//!
//! Segments are measured into boxes and flowed left to right in rows that
//! wrap at the container's inner width. Each row aligns its boxes to the
//! bottom edge, except standalone modifiers which hang from the row top.
//! The result records where every chunk ended up so arrows can be routed
//! from measured boxes instead of character offsets.

use std::collections::HashMap;

use tracing::trace;

use crate::geometry::{Font, Measurer, RectF, Vec2f};
use crate::model::{Chunk, ChunkKey};
use crate::segment::{Run, Segment};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Chunk text, parenthesized modifier text and trailing text.
    pub text_size: f32,
    /// Grammatical label above a modifier.
    pub label_size: f32,
    /// Role tag under a structural chunk.
    pub tag_size: f32,
    /// Container padding on every side.
    pub padding: f32,
    /// Right margin after each top-level box.
    pub item_gap: f32,
    /// Bottom margin under each top-level box.
    pub row_gap: f32,
    /// Gap between runs inside a structural chunk.
    pub run_gap: f32,
    /// Space between chunk text and its underline.
    pub underline_padding: f32,
    pub underline_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_size: 17.0,
            label_size: 12.0,
            tag_size: 13.0,
            padding: 16.0,
            item_gap: 4.0,
            row_gap: 4.0,
            run_gap: 4.0,
            underline_padding: 4.0,
            underline_width: 2.0,
        }
    }
}

/// Size of the display surface a card is laid out for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Container width in CSS pixels.
    pub width: f32,
    /// Device pixel ratio of the drawing surface.
    pub dpr: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 720.0,
            dpr: 1.0,
        }
    }
}

/// What a piece of laid-out text is, so renderers can pick its color.
#[derive(Debug, Clone, PartialEq)]
pub enum TextRole {
    ChunkText,
    ModifierLabel,
    ModifierText,
    /// Upper-cased role tag; carries the raw tag for style lookup.
    Tag(String),
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    /// Left edge and baseline.
    pub origin: Vec2f,
    pub text: String,
    pub font: Font,
    pub role: TextRole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Underline {
    pub from: Vec2f,
    pub to: Vec2f,
    pub width: f32,
    /// Role tag of the underlined chunk.
    pub tag: String,
}

/// Measured screen boxes by chunk key; a later registration replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorMap {
    rects: HashMap<ChunkKey, RectF>,
}

impl AnchorMap {
    pub fn register(&mut self, key: ChunkKey, rect: RectF) {
        self.rects.insert(key, rect);
    }
    pub fn get(&self, key: &ChunkKey) -> Option<RectF> {
        self.rects.get(key).copied()
    }
    pub fn len(&self) -> usize {
        self.rects.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardLayout {
    /// Container size including padding.
    pub width: f32,
    pub height: f32,
    /// Outer box of every top-level segment, in segment order.
    pub boxes: Vec<RectF>,
    pub texts: Vec<TextItem>,
    pub underlines: Vec<Underline>,
    pub anchors: AnchorMap,
}

/// A measured segment before it is placed. Child coordinates are relative to
/// the box's top-left corner.
#[derive(Debug, Default)]
struct MeasuredBox {
    width: f32,
    height: f32,
    hang_from_top: bool,
    key: Option<ChunkKey>,
    texts: Vec<TextItem>,
    underlines: Vec<Underline>,
    anchors: Vec<(ChunkKey, RectF)>,
}

pub fn layout_segments(
    segments: &[Segment<'_>],
    measurer: &dyn Measurer,
    cfg: &LayoutConfig,
    viewport: Viewport,
) -> CardLayout {
    let inner_width = (viewport.width - 2.0 * cfg.padding).max(0.0);
    let measured: Vec<MeasuredBox> = segments
        .iter()
        .map(|seg| measure_segment(seg, measurer, cfg))
        .collect();

    // Break into rows: a box starts a new row when it would overflow and the
    // current row already holds something.
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut x = 0.0f32;
    for (i, b) in measured.iter().enumerate() {
        if rows.is_empty() || (x > 0.0 && x + b.width > inner_width) {
            rows.push(Vec::new());
            x = 0.0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(i);
        }
        x += b.width + cfg.item_gap;
    }

    let mut layout = CardLayout {
        width: viewport.width,
        ..Default::default()
    };
    let mut placed: Vec<Option<RectF>> = vec![None; measured.len()];
    let mut top = cfg.padding;
    for row in &rows {
        let row_height = row
            .iter()
            .map(|&i| measured[i].height + cfg.row_gap)
            .fold(0.0f32, f32::max);
        let mut left = cfg.padding;
        for &i in row {
            let b = &measured[i];
            let y = if b.hang_from_top {
                top
            } else {
                top + row_height - (b.height + cfg.row_gap)
            };
            placed[i] = Some(RectF::from_xywh(left, y, b.width, b.height));
            left += b.width + cfg.item_gap;
        }
        top += row_height;
    }
    layout.height = top + cfg.padding;

    for (b, rect) in measured.into_iter().zip(placed) {
        let Some(rect) = rect else { continue };
        let (dx, dy) = (rect.left(), rect.top());
        if let Some(key) = b.key {
            trace!(key = %key, x = dx, y = dy, "placed segment");
            layout.anchors.register(key, rect);
        }
        for (key, r) in b.anchors {
            layout.anchors.register(key, r.translate(dx, dy));
        }
        layout.texts.extend(b.texts.into_iter().map(|mut t| {
            t.origin = Vec2f::new(t.origin.x + dx, t.origin.y + dy);
            t
        }));
        layout.underlines.extend(b.underlines.into_iter().map(|mut u| {
            u.from = Vec2f::new(u.from.x + dx, u.from.y + dy);
            u.to = Vec2f::new(u.to.x + dx, u.to.y + dy);
            u
        }));
        layout.boxes.push(rect);
    }
    layout
}

fn baseline(top: f32, height: f32, font: Font) -> f32 {
    top + height / 2.0 + font.size * 0.35
}

/// Label centered above `(text)`; used for standalone and nested modifiers.
fn modifier_column(chunk: &Chunk, measurer: &dyn Measurer, cfg: &LayoutConfig) -> MeasuredBox {
    let label_font = Font::bold(cfg.label_size);
    let text_font = Font::bold(cfg.text_size);
    let body = format!("({})", chunk.text);
    let (lw, lh) = measurer.measure(&chunk.gram_ele, label_font);
    let (tw, th) = measurer.measure(&body, text_font);
    let width = lw.max(tw);

    MeasuredBox {
        width,
        height: lh + th,
        key: Some(chunk.key()),
        texts: vec![
            TextItem {
                origin: Vec2f::new((width - lw) / 2.0, baseline(0.0, lh, label_font)),
                text: chunk.gram_ele.clone(),
                font: label_font,
                role: TextRole::ModifierLabel,
            },
            TextItem {
                origin: Vec2f::new((width - tw) / 2.0, baseline(lh, th, text_font)),
                text: body,
                font: text_font,
                role: TextRole::ModifierText,
            },
        ],
        ..Default::default()
    }
}

fn measure_segment(seg: &Segment<'_>, measurer: &dyn Measurer, cfg: &LayoutConfig) -> MeasuredBox {
    match seg {
        Segment::Modifier { chunk } => MeasuredBox {
            hang_from_top: true,
            ..modifier_column(chunk, measurer, cfg)
        },
        Segment::Structural { chunk, runs } => structural_box(chunk, runs, measurer, cfg),
        Segment::Tail { text, .. } => {
            let font = Font::regular(cfg.text_size);
            let (w, h) = measurer.measure(text, font);
            MeasuredBox {
                width: w,
                height: h,
                texts: vec![TextItem {
                    origin: Vec2f::new(0.0, baseline(0.0, h, font)),
                    text: text.to_string(),
                    font,
                    role: TextRole::Plain,
                }],
                ..Default::default()
            }
        }
    }
}

fn structural_box(
    chunk: &Chunk,
    runs: &[Run<'_>],
    measurer: &dyn Measurer,
    cfg: &LayoutConfig,
) -> MeasuredBox {
    let text_font = Font::bold(cfg.text_size);
    let tag_font = Font::bold(cfg.tag_size);

    // Measure runs first; they sit on a shared bottom edge.
    enum Piece {
        Text(String, f32, f32),
        Nested(MeasuredBox),
    }
    let pieces: Vec<Piece> = runs
        .iter()
        .map(|run| match run {
            Run::Text { text } => {
                let (w, h) = measurer.measure(text, text_font);
                Piece::Text(text.to_string(), w, h)
            }
            Run::Nested { chunk } => Piece::Nested(modifier_column(chunk, measurer, cfg)),
        })
        .collect();
    let size = |p: &Piece| match p {
        Piece::Text(_, w, h) => (*w, *h),
        Piece::Nested(b) => (b.width, b.height),
    };
    let runs_height = pieces.iter().map(|p| size(p).1).fold(0.0f32, f32::max);
    let runs_width = pieces.iter().map(|p| size(p).0).sum::<f32>()
        + cfg.run_gap * pieces.len().saturating_sub(1) as f32;

    let mut out = MeasuredBox {
        key: Some(chunk.key()),
        ..Default::default()
    };
    let mut x = 0.0f32;
    for piece in pieces {
        let (w, h) = size(&piece);
        let y = runs_height - h;
        match piece {
            Piece::Text(text, _, _) => out.texts.push(TextItem {
                origin: Vec2f::new(x, baseline(y, h, text_font)),
                text,
                font: text_font,
                role: TextRole::ChunkText,
            }),
            Piece::Nested(nested) => {
                if let Some(key) = nested.key {
                    out.anchors.push((key, RectF::from_xywh(x, y, w, h)));
                }
                out.texts.extend(nested.texts.into_iter().map(|mut t| {
                    t.origin = Vec2f::new(t.origin.x + x, t.origin.y + y);
                    t
                }));
            }
        }
        x += w + cfg.run_gap;
    }

    let underline_y = runs_height + cfg.underline_padding + cfg.underline_width / 2.0;
    out.underlines.push(Underline {
        from: Vec2f::new(0.0, underline_y),
        to: Vec2f::new(runs_width, underline_y),
        width: cfg.underline_width,
        tag: chunk.sen_ele.clone(),
    });

    let tag = chunk.tag();
    let (tag_w, tag_h) = measurer.measure(&tag, tag_font);
    let tag_top = runs_height + cfg.underline_padding + cfg.underline_width;
    out.texts.push(TextItem {
        origin: Vec2f::new(0.0, baseline(tag_top, tag_h, tag_font)),
        text: tag,
        font: tag_font,
        role: TextRole::Tag(chunk.sen_ele.clone()),
    });

    out.width = runs_width.max(tag_w);
    out.height = tag_top + tag_h;
    out
}
