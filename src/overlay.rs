//! Arrow overlay drawn on top of a laid-out card.
//!
//! Every redraw sizes the surface to the container, clears it and paints all
//! arrows again. Nothing is updated incrementally.

use tracing::debug;

use crate::arrow::{ArrowConfig, ArrowPlan, route_arrow};
use crate::geometry::Vec2f;
use crate::layout::CardLayout;

/// A 2D drawing surface sized in CSS pixels with a device pixel ratio.
pub trait Canvas {
    fn resize(&mut self, width: f32, height: f32, dpr: f32);
    fn clear(&mut self);
    fn stroke_polyline(&mut self, points: &[Vec2f], width: f32);
    fn fill_polygon(&mut self, points: &[Vec2f]);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polyline { points: Vec<Vec2f>, width: f32 },
    Polygon { points: Vec<Vec2f> },
}

/// A canvas that records shapes for later SVG serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgCanvas {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
    pub shapes: Vec<Shape>,
}

impl SvgCanvas {
    /// Backing-store size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round() as u32,
            (self.height * self.dpr).round() as u32,
        )
    }
}

impl Canvas for SvgCanvas {
    fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn stroke_polyline(&mut self, points: &[Vec2f], width: f32) {
        self.shapes.push(Shape::Polyline {
            points: points.to_vec(),
            width,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2f]) {
        self.shapes.push(Shape::Polygon {
            points: points.to_vec(),
        });
    }
}

/// The arrows of one card, resolved to chunk keys up front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrowOverlay {
    pub plans: Vec<ArrowPlan>,
    pub config: ArrowConfig,
}

impl ArrowOverlay {
    pub fn new(plans: Vec<ArrowPlan>, config: ArrowConfig) -> Self {
        Self { plans, config }
    }

    /// Resize, clear and repaint `canvas`. Returns how many arrows were drawn.
    ///
    /// Arrows without a target, or whose source or target has no measured box,
    /// are skipped.
    pub fn redraw<C: Canvas + ?Sized>(&self, canvas: &mut C, layout: &CardLayout, dpr: f32) -> usize {
        canvas.resize(layout.width, layout.height, dpr);
        canvas.clear();

        let mut drawn = 0;
        for plan in &self.plans {
            let Some(to_key) = &plan.to else {
                continue;
            };
            let (Some(from), Some(to)) = (layout.anchors.get(&plan.from), layout.anchors.get(to_key)) else {
                debug!(from = %plan.from, to = %to_key, "arrow anchor not laid out, skipped");
                continue;
            };
            let path = route_arrow(from, to, &self.config);
            canvas.stroke_polyline(&path.points, self.config.stroke_width);
            canvas.fill_polygon(&path.head);
            drawn += 1;
        }
        drawn
    }
}
