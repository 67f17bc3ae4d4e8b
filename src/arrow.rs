//! Arrow target resolution and elbow routing.

use std::cmp::Reverse;
use std::f32::consts::PI;

use serde::Serialize;

use crate::classify::Classification;
use crate::geometry::{RectF, Vec2f};
use crate::model::{Chunk, ChunkKey};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowConfig {
    /// Start anchor x as a fraction of the source box width.
    pub start_x_fraction: f32,
    /// Start anchor y as a fraction of the source box height.
    pub start_y_fraction: f32,
    /// End anchor x as a fraction of the target box width.
    pub end_x_fraction: f32,
    /// End anchor distance below the target box's top edge.
    pub end_y_offset: f32,
    /// How far the horizontal run sits above the higher anchor, and the
    /// minimum length of the final vertical run.
    pub elbow_clearance: f32,
    /// Lowest allowed elbow y (distance from the top of the surface).
    pub min_elbow_y: f32,
    pub head_length: f32,
    /// Half-angle between the shaft and each side of the head, in radians.
    pub head_angle: f32,
    pub stroke_width: f32,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            start_x_fraction: 0.25,
            start_y_fraction: 0.5,
            end_x_fraction: 0.2,
            end_y_offset: 25.0,
            elbow_clearance: 24.0,
            min_elbow_y: 4.0,
            head_length: 8.0,
            head_angle: PI / 6.0,
            stroke_width: 2.2,
        }
    }
}

/// Which chunk an arrow-bearing modifier points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrowPlan {
    pub from: ChunkKey,
    /// `None` when no target could be resolved; nothing is drawn then.
    pub to: Option<ChunkKey>,
}

/// Resolve the chunk `modifier` points at.
///
/// Candidates are every other combined chunk that is structural or not itself
/// arrow-bearing. The smallest candidate whose range covers the modifier wins;
/// otherwise the structural candidate ending closest before the modifier's
/// start. Exact ties go to the earliest candidate in `combined` order.
pub fn find_target<'a>(combined: &[&'a Chunk], modifier: &Chunk) -> Option<&'a Chunk> {
    let candidates = || {
        combined
            .iter()
            .copied()
            .filter(move |c| !std::ptr::eq(*c, modifier) && (c.is_structural() || !c.modifier))
    };

    let containing = candidates()
        .filter(|c| c.start <= modifier.start && c.end >= modifier.end)
        .min_by_key(|c| c.span());
    if containing.is_some() {
        return containing;
    }

    candidates()
        .filter(|c| c.is_structural() && c.end <= modifier.start)
        .min_by_key(|c| Reverse(c.end))
}

/// Plan an arrow for every arrow-bearing modifier, in input order.
pub fn plan_arrows(classification: &Classification<'_>) -> Vec<ArrowPlan> {
    classification
        .arrow_bearing()
        .map(|m| ArrowPlan {
            from: m.key(),
            to: find_target(&classification.combined, m).map(Chunk::key),
        })
        .collect()
}

/// A routed arrow: the elbow polyline and a filled triangular head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPath {
    /// Start, up to the elbow, across to the target, down to the end anchor.
    pub points: [Vec2f; 4],
    /// Tip followed by the two back corners.
    pub head: [Vec2f; 3],
}

pub fn route_arrow(from: RectF, to: RectF, cfg: &ArrowConfig) -> ArrowPath {
    let start = Vec2f::new(
        from.left() + from.width() * cfg.start_x_fraction,
        from.top() + from.height() * cfg.start_y_fraction,
    );
    let end = Vec2f::new(
        to.left() + to.width() * cfg.end_x_fraction,
        to.top() + cfg.end_y_offset,
    );

    let raw_elbow_y = start.y.min(end.y) - cfg.elbow_clearance;
    let elbow_y = raw_elbow_y.min(end.y - cfg.elbow_clearance).max(cfg.min_elbow_y);

    let points = [
        start,
        Vec2f::new(start.x, elbow_y),
        Vec2f::new(end.x, elbow_y),
        end,
    ];

    let prev = points[2];
    let mut dx = end.x - prev.x;
    if dx == 0.0 {
        dx = 0.001;
    }
    let dy = end.y - prev.y;
    let angle = dy.atan2(dx);
    let head = [
        end,
        Vec2f::new(
            end.x - cfg.head_length * (angle - cfg.head_angle).cos(),
            end.y - cfg.head_length * (angle - cfg.head_angle).sin(),
        ),
        Vec2f::new(
            end.x - cfg.head_length * (angle + cfg.head_angle).cos(),
            end.y - cfg.head_length * (angle + cfg.head_angle).sin(),
        ),
    ];

    ArrowPath { points, head }
}
