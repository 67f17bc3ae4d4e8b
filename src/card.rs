//! One sentence card: analysis, layout and arrow overlay.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::arrow::{ArrowConfig, ArrowPlan, plan_arrows};
use crate::classify::{Classification, classify};
use crate::containment::{Containment, resolve_containment};
use crate::geometry::{ApproxMeasurer, Measurer};
use crate::layout::{CardLayout, LayoutConfig, Viewport, layout_segments};
use crate::model::{Chunk, ChunkKey, SyntaxData};
use crate::overlay::{ArrowOverlay, Canvas, SvgCanvas};
use crate::segment::{Segment, build_segments};

pub const GRAMMAR_POINT_BADGE: &str = "문법 포인트";
const GRAMMAR_POINT_COMPLEMENT: &str = "be동사 + 보어(SC) 형태로 주어를 설명하거나 정의합니다.";
const GRAMMAR_POINT_DEFAULT: &str = "주요 성분을 확인하세요.";

/// Settings shared by every card of a run.
#[derive(Clone)]
pub struct RenderOptions {
    pub layout: LayoutConfig,
    pub arrows: ArrowConfig,
    pub viewport: Viewport,
    pub measurer: Arc<dyn Measurer + Send + Sync>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            arrows: ArrowConfig::default(),
            viewport: Viewport::default(),
            measurer: Arc::new(ApproxMeasurer::default()),
        }
    }
}

/// Note shown under a card: complement sentences get a dedicated explanation.
pub fn grammar_point(classification: &Classification<'_>) -> &'static str {
    if classification.has_role("sc") {
        GRAMMAR_POINT_COMPLEMENT
    } else {
        GRAMMAR_POINT_DEFAULT
    }
}

/// A rendered card. Layout and overlay are recomputed on [`CardView::resize`].
pub struct CardView<'a, C: Canvas = SvgCanvas> {
    pub data: &'a SyntaxData,
    pub classification: Classification<'a>,
    pub containment: Containment<'a>,
    pub segments: Vec<Segment<'a>>,
    pub overlay: ArrowOverlay,
    pub layout: CardLayout,
    pub canvas: C,
    /// Arrows painted by the most recent redraw.
    pub arrows_drawn: usize,
    options: RenderOptions,
}

impl<'a> CardView<'a, SvgCanvas> {
    pub fn render(data: &'a SyntaxData, options: &RenderOptions) -> Self {
        Self::render_with(data, options, SvgCanvas::default())
    }
}

impl<'a, C: Canvas> CardView<'a, C> {
    /// Run the full pipeline and draw the overlay onto `canvas`.
    pub fn render_with(data: &'a SyntaxData, options: &RenderOptions, canvas: C) -> Self {
        let classification = classify(&data.chunks);
        let containment = resolve_containment(&classification.combined);
        let display_chunks = containment.display_chunks(&classification.combined);
        let segments = build_segments(data, &display_chunks, &containment);
        let overlay = ArrowOverlay::new(plan_arrows(&classification), options.arrows);
        let display_len = display_chunks.len();
        debug!(
            chunks = data.chunks.len(),
            display = display_len,
            hidden = containment.hidden_keys.len(),
            arrows = overlay.plans.len(),
            "analyzed card"
        );

        let mut view = Self {
            data,
            classification,
            containment,
            segments,
            overlay,
            layout: CardLayout::default(),
            canvas,
            arrows_drawn: 0,
            options: options.clone(),
        };
        view.relayout();
        view
    }

    /// React to a new viewport: lay out again and repaint the overlay once.
    pub fn resize(&mut self, viewport: Viewport) {
        self.options.viewport = viewport;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = layout_segments(
            &self.segments,
            self.options.measurer.as_ref(),
            &self.options.layout,
            self.options.viewport,
        );
        self.arrows_drawn = self
            .overlay
            .redraw(&mut self.canvas, &self.layout, self.options.viewport.dpr);
    }

    pub fn grammar_point(&self) -> &'static str {
        grammar_point(&self.classification)
    }

    pub fn summary(&self, index: usize) -> CardSummary<'_> {
        let mut hidden: Vec<ChunkKey> = self.containment.hidden_keys.iter().cloned().collect();
        hidden.sort();
        CardSummary {
            index,
            sentence: &self.data.sentence,
            translation: &self.data.translation,
            structural: chunk_keys(&self.classification.structural),
            modifiers: chunk_keys(&self.classification.modifiers),
            combined: chunk_keys(&self.classification.combined),
            hidden,
            nested: self
                .containment
                .nested_by_key
                .iter()
                .map(|(k, v)| (k.to_string(), chunk_keys(v)))
                .collect(),
            segments: &self.segments,
            arrows: &self.overlay.plans,
            arrows_drawn: self.arrows_drawn,
            grammar_point: self.grammar_point(),
        }
    }
}

fn chunk_keys(chunks: &[&Chunk]) -> Vec<ChunkKey> {
    chunks.iter().map(|c| c.key()).collect()
}

/// Serializable view of a card's analysis.
#[derive(Debug, Serialize)]
pub struct CardSummary<'v> {
    pub index: usize,
    pub sentence: &'v str,
    pub translation: &'v str,
    pub structural: Vec<ChunkKey>,
    pub modifiers: Vec<ChunkKey>,
    pub combined: Vec<ChunkKey>,
    pub hidden: Vec<ChunkKey>,
    pub nested: IndexMap<String, Vec<ChunkKey>>,
    pub segments: &'v [Segment<'v>],
    pub arrows: &'v [ArrowPlan],
    pub arrows_drawn: usize,
    pub grammar_point: &'static str,
}
