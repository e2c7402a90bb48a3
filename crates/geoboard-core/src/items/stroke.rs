//! Freehand stroke item.

use super::{ItemId, SerializableColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Line pattern applied when a stroke is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    /// Translucent highlighter ink.
    Marker,
}

impl StrokeStyle {
    /// Cycle to the next stroke style.
    pub fn next(self) -> Self {
        match self {
            StrokeStyle::Solid => StrokeStyle::Dashed,
            StrokeStyle::Dashed => StrokeStyle::Dotted,
            StrokeStyle::Dotted => StrokeStyle::Marker,
            StrokeStyle::Marker => StrokeStyle::Solid,
        }
    }
}

/// A freehand polyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ItemId,
    /// Points in drawing order.
    pub points: Vec<Point>,
    pub color: SerializableColor,
    pub width: f64,
    pub style: StrokeStyle,
}

impl Stroke {
    /// Create an empty stroke.
    pub fn new(color: SerializableColor, width: f64, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            color,
            width,
            style,
        }
    }

    /// Create a stroke from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor, width: f64, style: StrokeStyle) -> Self {
        Self {
            points,
            ..Self::new(color, width, style)
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than two points cannot be drawn.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Whether any sample point lies strictly within `radius` of `point`.
    pub fn has_point_near(&self, point: Point, radius: f64) -> bool {
        self.points.iter().any(|p| p.distance(point) < radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke::from_points(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            SerializableColor::black(),
            2.0,
            StrokeStyle::Solid,
        )
    }

    #[test]
    fn test_degenerate() {
        assert!(stroke(&[]).is_degenerate());
        assert!(stroke(&[(0.0, 0.0)]).is_degenerate());
        assert!(!stroke(&[(0.0, 0.0), (1.0, 1.0)]).is_degenerate());
    }

    #[test]
    fn test_point_proximity() {
        let s = stroke(&[(0.0, 0.0), (100.0, 0.0)]);
        assert!(s.has_point_near(Point::new(10.0, 10.0), 20.0));
        // Only sample points count, not the segment between them.
        assert!(!s.has_point_near(Point::new(50.0, 0.0), 20.0));
    }

    #[test]
    fn test_style_cycle() {
        assert_eq!(StrokeStyle::Solid.next(), StrokeStyle::Dashed);
        assert_eq!(StrokeStyle::Marker.next(), StrokeStyle::Solid);
    }
}
