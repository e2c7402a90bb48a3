//! Freehand stroke styling and smoothing.

use geoboard_core::{Stroke, StrokeStyle};
use kurbo::{BezPath, Cap, Join, Point};
use peniko::{BlendMode, Color, Mix};

pub const DASH_PATTERN: [f64; 2] = [12.0, 8.0];
pub const DOT_PATTERN: [f64; 2] = [2.0, 6.0];
/// Opacity applied to marker ink.
pub const MARKER_ALPHA: f32 = 0.4;

/// How a stroke's pixels are produced.
#[derive(Debug, Clone)]
pub struct StrokeAppearance {
    pub style: kurbo::Stroke,
    pub color: Color,
    pub blend: Option<BlendMode>,
}

pub fn appearance(stroke: &Stroke) -> StrokeAppearance {
    let color: Color = stroke.color.into();
    let base = kurbo::Stroke::new(stroke.width)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    match stroke.style {
        StrokeStyle::Solid => StrokeAppearance {
            style: base,
            color,
            blend: None,
        },
        StrokeStyle::Dashed => StrokeAppearance {
            style: base.with_caps(Cap::Butt).with_dashes(0.0, DASH_PATTERN),
            color,
            blend: None,
        },
        StrokeStyle::Dotted => StrokeAppearance {
            style: base.with_dashes(0.0, DOT_PATTERN),
            color,
            blend: None,
        },
        StrokeStyle::Marker => StrokeAppearance {
            style: base,
            color: color.multiply_alpha(MARKER_ALPHA),
            blend: Some(BlendMode::from(Mix::Multiply)),
        },
    }
}

/// Smooth a polyline with quadratic segments through successive midpoints.
///
/// Each interior sample becomes a control point and the curve passes through
/// the midpoints between samples; the ends are joined to the first and last
/// samples. `None` for fewer than two points.
pub fn smooth_path(points: &[Point]) -> Option<BezPath> {
    let (&first, rest) = points.split_first()?;
    let &last = rest.last()?;

    let mut path = BezPath::new();
    path.move_to(first);
    if points.len() > 2 {
        for pair in points[1..].windows(2) {
            path.quad_to(pair[0], pair[0].midpoint(pair[1]));
        }
    }
    path.line_to(last);
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoboard_core::SerializableColor;
    use kurbo::PathEl;

    fn stroke(style: StrokeStyle) -> Stroke {
        Stroke::from_points(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            SerializableColor::new(255, 0, 0, 255),
            4.0,
            style,
        )
    }

    #[test]
    fn test_degenerate_strokes_have_no_path() {
        assert!(smooth_path(&[]).is_none());
        assert!(smooth_path(&[Point::new(1.0, 1.0)]).is_none());
    }

    #[test]
    fn test_two_points_is_a_line() {
        let path = smooth_path(&[Point::ZERO, Point::new(5.0, 5.0)]).unwrap();
        let elements: Vec<_> = path.elements().to_vec();
        assert_eq!(elements, vec![PathEl::MoveTo(Point::ZERO), PathEl::LineTo(Point::new(5.0, 5.0))]);
    }

    #[test]
    fn test_midpoint_quadratics() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let path = smooth_path(&points).unwrap();
        let elements = path.elements();
        assert_eq!(elements[0], PathEl::MoveTo(points[0]));
        assert_eq!(elements[1], PathEl::QuadTo(points[1], Point::new(10.0, 5.0)));
        assert_eq!(elements[2], PathEl::QuadTo(points[2], Point::new(5.0, 10.0)));
        assert_eq!(elements.last(), Some(&PathEl::LineTo(points[3])));
    }

    #[test]
    fn test_style_patterns() {
        let dashed = appearance(&stroke(StrokeStyle::Dashed));
        assert_eq!(dashed.style.dash_pattern.as_slice(), &DASH_PATTERN);

        let dotted = appearance(&stroke(StrokeStyle::Dotted));
        assert_eq!(dotted.style.dash_pattern.as_slice(), &DOT_PATTERN);
        assert_eq!(dotted.style.start_cap, Cap::Round);

        let solid = appearance(&stroke(StrokeStyle::Solid));
        assert!(solid.style.dash_pattern.is_empty());
        assert!(solid.blend.is_none());
        assert_eq!(solid.style.width, 4.0);
    }

    #[test]
    fn test_marker_is_translucent_multiply() {
        let marker = appearance(&stroke(StrokeStyle::Marker));
        assert_eq!(marker.blend, Some(BlendMode::from(Mix::Multiply)));
        assert!((marker.color.components[3] - MARKER_ALPHA).abs() < 1e-6);
    }
}
