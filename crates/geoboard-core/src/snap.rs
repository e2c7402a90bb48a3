//! Snapping pen input to instrument edges.

use crate::items::{CanvasItem, ItemId, Widget, WidgetKind};
use kurbo::Point;

pub use crate::config::SNAP_THRESHOLD;

/// Which instrument edge a point was snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapEdge {
    /// Ruler edge at local `y = -height / 2`.
    RulerTop,
    /// Ruler edge at local `y = height / 2`.
    RulerBottom,
    /// Triangle leg along local +X.
    TriangleBase,
    /// Triangle leg along local +Y.
    TriangleUpright,
}

/// A successful snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapHit {
    /// The snapped point in world coordinates.
    pub point: Point,
    /// Widget whose edge was hit.
    pub widget: ItemId,
    pub edge: SnapEdge,
}

/// Snap `cursor` to the first eligible instrument edge within `threshold`.
///
/// Only visible rulers and triangles take part. Widgets are tried in store
/// order and the first match wins; overlapping candidates are not ranked.
pub fn resolve_snap(cursor: Point, items: &[CanvasItem], threshold: f64) -> Option<Point> {
    resolve_snap_hit(cursor, items, threshold).map(|hit| hit.point)
}

/// Like [`resolve_snap`], but also reports which widget edge was hit.
pub fn resolve_snap_hit(cursor: Point, items: &[CanvasItem], threshold: f64) -> Option<SnapHit> {
    items
        .iter()
        .filter_map(CanvasItem::as_widget)
        .filter(|w| w.visible)
        .find_map(|w| {
            snap_to_widget(w, cursor, threshold).map(|(point, edge)| SnapHit {
                point,
                widget: w.id(),
                edge,
            })
        })
}

/// Snap against a single widget. `None` for widgets that are not snap targets.
pub fn snap_to_widget(widget: &Widget, cursor: Point, threshold: f64) -> Option<(Point, SnapEdge)> {
    let local = widget.to_local(cursor);
    let (snapped, edge) = match widget.kind {
        WidgetKind::Ruler { width, height } => snap_ruler(local, width, height, threshold)?,
        WidgetKind::Triangle { width, height } => snap_triangle(local, width, height, threshold)?,
        WidgetKind::Protractor { .. }
        | WidgetKind::Compass { .. }
        | WidgetKind::Image { .. }
        | WidgetKind::Text { .. } => return None,
    };
    Some((widget.to_world(snapped), edge))
}

fn snap_ruler(local: Point, width: f64, height: f64, threshold: f64) -> Option<(Point, SnapEdge)> {
    let half_w = width / 2.0;
    if local.x < -half_w - threshold || local.x > half_w + threshold {
        return None;
    }
    let x = local.x.clamp(-half_w, half_w);
    let top = -height / 2.0;
    let bottom = height / 2.0;
    if (local.y - top).abs() < threshold {
        Some((Point::new(x, top), SnapEdge::RulerTop))
    } else if (local.y - bottom).abs() < threshold {
        Some((Point::new(x, bottom), SnapEdge::RulerBottom))
    } else {
        None
    }
}

fn snap_triangle(local: Point, width: f64, height: f64, threshold: f64) -> Option<(Point, SnapEdge)> {
    if local.y.abs() < threshold && (0.0..=width).contains(&local.x) {
        Some((Point::new(local.x, 0.0), SnapEdge::TriangleBase))
    } else if local.x.abs() < threshold && (0.0..=height).contains(&local.y) {
        Some((Point::new(0.0, local.y), SnapEdge::TriangleUpright))
    } else {
        None
    }
}
