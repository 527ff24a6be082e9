//! Snapping engine for interactive moves
//!
//! Each axis is solved independently: the moving box's leading edge,
//! trailing edge, and center are compared against the same three lines of
//! every candidate rectangle, and the closest pair within the threshold wins.

use serde::Serialize;

use crate::geometry::{bounds_of, CanvasConfig, NodeBounds, Point, Rect};
use crate::model::{NodeId, Vec2};

/// Snapping configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SnapConfig {
    /// Maximum distance (inclusive) at which two lines align
    pub threshold: f64,

    /// When false, proposals pass through untouched
    pub enabled: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: 8.0,
            enabled: true,
        }
    }
}

impl SnapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Outcome of a snap query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapResult {
    /// Proposed top-left with each matched axis replaced
    pub position: Point,
    /// Vertical guide line (an x coordinate) when the horizontal axis snapped
    pub guide_x: Option<f64>,
    /// Horizontal guide line (a y coordinate) when the vertical axis snapped
    pub guide_y: Option<f64>,
}

impl SnapResult {
    fn unchanged(position: Point) -> Self {
        Self {
            position,
            guide_x: None,
            guide_y: None,
        }
    }

    pub fn snapped(&self) -> bool {
        self.guide_x.is_some() || self.guide_y.is_some()
    }
}

/// Best match found on one axis
#[derive(Debug, Clone, Copy)]
struct AxisMatch {
    distance: f64,
    start: f64,
    guide: f64,
}

/// Snap a box of `size` proposed at `proposed` against `candidates`
pub fn snap(size: Vec2, proposed: Point, candidates: &[Rect], config: &SnapConfig) -> SnapResult {
    if !config.enabled || candidates.is_empty() {
        return SnapResult::unchanged(proposed);
    }

    let columns = candidates
        .iter()
        .map(|r| [r.left(), r.right(), r.center_x()]);
    let rows = candidates
        .iter()
        .map(|r| [r.top(), r.bottom(), r.center_y()]);
    let horizontal = snap_axis(proposed.x, size.x, config.threshold, columns);
    let vertical = snap_axis(proposed.y, size.y, config.threshold, rows);

    SnapResult {
        position: Point::new(
            horizontal.map_or(proposed.x, |m| m.start),
            vertical.map_or(proposed.y, |m| m.start),
        ),
        guide_x: horizontal.map(|m| m.guide),
        guide_y: vertical.map(|m| m.guide),
    }
}

/// Scan order is candidate, then moving line (lead, trail, center), then
/// candidate line in the same order. Only a strictly closer match replaces
/// the current best, so earlier scans win ties.
fn snap_axis(
    start: f64,
    extent: f64,
    threshold: f64,
    candidates: impl Iterator<Item = [f64; 3]>,
) -> Option<AxisMatch> {
    let moving = [0.0, extent, extent / 2.0];
    let mut best: Option<AxisMatch> = None;

    for lines in candidates {
        for shift in moving {
            let line = start + shift;
            for target in lines {
                let distance = (target - line).abs();
                if distance > threshold {
                    continue;
                }
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(AxisMatch {
                        distance,
                        start: target - shift,
                        guide: target,
                    });
                }
            }
        }
    }
    best
}

/// Candidate scope for moving the nodes in `moving`, all sharing `parent`:
/// every sibling under the same parent that is not itself moving, followed by
/// the parent's rectangle (or the canvas for root-level moves).
pub fn candidate_rects(
    bounds: &[NodeBounds],
    parent: Option<NodeId>,
    moving: &[NodeId],
    canvas: &CanvasConfig,
) -> Vec<Rect> {
    let mut rects: Vec<Rect> = bounds
        .iter()
        .filter(|b| b.parent == parent && !moving.contains(&b.id))
        .map(|b| b.rect)
        .collect();

    match parent {
        Some(p) => {
            if let Some(entry) = bounds_of(bounds, p) {
                rects.push(entry.rect);
            }
        }
        None => rects.push(canvas.rect()),
    }
    rects
}

/// Snap the primary node of a (possibly multi-node) move.
///
/// `proposed` is the primary node's new absolute top-left. Every id in
/// `moving` is excluded from the candidates. Returns `None` when `primary`
/// has no bounds entry.
pub fn snap_move(
    bounds: &[NodeBounds],
    primary: NodeId,
    moving: &[NodeId],
    proposed: Point,
    config: &SnapConfig,
    canvas: &CanvasConfig,
) -> Option<SnapResult> {
    let entry = bounds_of(bounds, primary)?;
    let mut excluded = moving.to_vec();
    if !excluded.contains(&primary) {
        excluded.push(primary);
    }

    let candidates = candidate_rects(bounds, entry.parent, &excluded, canvas);
    let size = Vec2::new(entry.rect.width, entry.rect.height);
    let result = snap(size, proposed, &candidates, config);
    tracing::trace!(
        node = %primary,
        candidates = candidates.len(),
        snapped = result.snapped(),
        "snap move"
    );
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_edge_to_trailing_edge() {
        let siblings = [Rect::new(0.0, 0.0, 100.0, 40.0), Rect::new(0.0, 300.0, 100.0, 40.0)];
        let result = snap(
            Vec2::new(50.0, 20.0),
            Point::new(104.0, 150.0),
            &siblings,
            &SnapConfig::default(),
        );
        assert_eq!(result.position.x, 100.0);
        assert_eq!(result.guide_x, Some(100.0));
        assert_eq!(result.position.y, 150.0);
        assert_eq!(result.guide_y, None);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let rect = [Rect::new(0.0, 500.0, 100.0, 10.0)];
        let size = Vec2::new(10.0, 10.0);
        let config = SnapConfig::default();

        let at_eight = snap(size, Point::new(108.0, 0.0), &rect, &config);
        assert_eq!(at_eight.position.x, 100.0);

        let at_nine = snap(size, Point::new(109.0, 0.0), &rect, &config);
        assert_eq!(at_nine.position.x, 109.0);
        assert_eq!(at_nine.guide_x, None);
    }

    #[test]
    fn test_axes_snap_to_different_rects() {
        let rects = [
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(400.0, 400.0, 100.0, 100.0),
        ];
        // x within reach of rect A's right edge, y within reach of rect B's top edge
        let result = snap(
            Vec2::new(30.0, 30.0),
            Point::new(103.0, 395.0),
            &rects,
            &SnapConfig::default(),
        );
        assert_eq!(result.position, Point::new(100.0, 400.0));
        assert_eq!(result.guide_x, Some(100.0));
        assert_eq!(result.guide_y, Some(400.0));
    }

    #[test]
    fn test_closest_match_wins() {
        let rects = [Rect::new(0.0, 0.0, 100.0, 100.0), Rect::new(0.0, 0.0, 103.0, 100.0)];
        let result = snap(
            Vec2::new(10.0, 10.0),
            Point::new(104.0, 900.0),
            &rects,
            &SnapConfig::default(),
        );
        assert_eq!(result.position.x, 103.0);
    }

    #[test]
    fn test_ties_keep_first_scanned() {
        // Both rects' right edges are 2 units away on either side
        let rects = [Rect::new(0.0, 0.0, 98.0, 10.0), Rect::new(0.0, 0.0, 102.0, 10.0)];
        let result = snap(
            Vec2::new(0.0, 0.0),
            Point::new(100.0, 900.0),
            &rects,
            &SnapConfig::default(),
        );
        assert_eq!(result.position.x, 98.0);
    }

    #[test]
    fn test_center_alignment() {
        let rects = [Rect::new(0.0, 0.0, 200.0, 10.0)];
        let result = snap(
            Vec2::new(40.0, 10.0),
            Point::new(83.0, 900.0),
            &rects,
            &SnapConfig::default(),
        );
        // moving center 103 aligns with candidate center 100
        assert_eq!(result.position.x, 80.0);
        assert_eq!(result.guide_x, Some(100.0));
    }

    #[test]
    fn test_disabled_passes_through() {
        let rects = [Rect::new(0.0, 0.0, 100.0, 100.0)];
        let proposed = Point::new(101.0, 101.0);
        let result = snap(
            Vec2::new(10.0, 10.0),
            proposed,
            &rects,
            &SnapConfig::default().with_enabled(false),
        );
        assert_eq!(result.position, proposed);
        assert!(!result.snapped());
    }

    #[test]
    fn test_no_candidates() {
        let proposed = Point::new(3.0, 4.0);
        let result = snap(Vec2::new(1.0, 1.0), proposed, &[], &SnapConfig::default());
        assert_eq!(result, SnapResult::unchanged(proposed));
    }

    #[test]
    fn test_candidate_scope_excludes_moving_nodes() {
        let bounds = vec![
            NodeBounds {
                id: NodeId(1),
                parent: None,
                rect: Rect::new(0.0, 0.0, 500.0, 500.0),
            },
            NodeBounds {
                id: NodeId(2),
                parent: Some(NodeId(1)),
                rect: Rect::new(10.0, 10.0, 50.0, 50.0),
            },
            NodeBounds {
                id: NodeId(3),
                parent: Some(NodeId(1)),
                rect: Rect::new(100.0, 10.0, 50.0, 50.0),
            },
            NodeBounds {
                id: NodeId(4),
                parent: Some(NodeId(1)),
                rect: Rect::new(200.0, 10.0, 50.0, 50.0),
            },
        ];
        let canvas = CanvasConfig::default();

        let scoped = candidate_rects(&bounds, Some(NodeId(1)), &[NodeId(2), NodeId(3)], &canvas);
        assert_eq!(
            scoped,
            vec![Rect::new(200.0, 10.0, 50.0, 50.0), Rect::new(0.0, 0.0, 500.0, 500.0)]
        );

        let roots = candidate_rects(&bounds, None, &[NodeId(1)], &canvas);
        assert_eq!(roots, vec![canvas.rect()]);
    }

    #[test]
    fn test_snap_move_ignores_self() {
        let bounds = vec![NodeBounds {
            id: NodeId(1),
            parent: None,
            rect: Rect::new(300.0, 300.0, 100.0, 100.0),
        }];
        let canvas = CanvasConfig::default();
        // 3 units from its own old position, far from the canvas edges
        let result = snap_move(
            &bounds,
            NodeId(1),
            &[],
            Point::new(303.0, 303.0),
            &SnapConfig::default(),
            &canvas,
        )
        .unwrap();
        assert_eq!(result.position, Point::new(303.0, 303.0));
        assert!(!result.snapped());
    }
}
