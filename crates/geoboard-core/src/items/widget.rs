//! Positionable, rotatable widgets: drawing instruments and decorations.

use super::{ImageData, ItemId};
use crate::geometry;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_RULER_WIDTH: f64 = 400.0;
pub const DEFAULT_RULER_HEIGHT: f64 = 50.0;
pub const DEFAULT_PROTRACTOR_RADIUS: f64 = 150.0;
pub const DEFAULT_COMPASS_HEIGHT: f64 = 150.0;
pub const DEFAULT_TRIANGLE_WIDTH: f64 = 300.0;
pub const DEFAULT_TRIANGLE_HEIGHT: f64 = 200.0;
pub const DEFAULT_TEXT_SIZE: f64 = 24.0;

/// The four singleton drawing instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    Ruler,
    Protractor,
    Compass,
    Triangle,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 4] = [
        InstrumentKind::Ruler,
        InstrumentKind::Protractor,
        InstrumentKind::Compass,
        InstrumentKind::Triangle,
    ];

    /// Widget geometry for a freshly created instrument.
    pub fn default_widget_kind(self) -> WidgetKind {
        match self {
            InstrumentKind::Ruler => WidgetKind::Ruler {
                width: DEFAULT_RULER_WIDTH,
                height: DEFAULT_RULER_HEIGHT,
            },
            InstrumentKind::Protractor => WidgetKind::Protractor {
                radius: DEFAULT_PROTRACTOR_RADIUS,
            },
            InstrumentKind::Compass => WidgetKind::Compass {
                height: DEFAULT_COMPASS_HEIGHT,
            },
            InstrumentKind::Triangle => WidgetKind::Triangle {
                width: DEFAULT_TRIANGLE_WIDTH,
                height: DEFAULT_TRIANGLE_HEIGHT,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InstrumentKind::Ruler => "ruler",
            InstrumentKind::Protractor => "protractor",
            InstrumentKind::Compass => "compass",
            InstrumentKind::Triangle => "triangle",
        }
    }
}

/// Widget type together with its type-specific extents.
///
/// Local frames: the ruler is centered on its pivot; the protractor's pivot is
/// the center of its baseline; the compass pivot is the hinge with legs
/// pointing along local +Y; the triangle's right angle sits at the pivot with
/// legs along local +X and +Y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetKind {
    Ruler { width: f64, height: f64 },
    Protractor { radius: f64 },
    Compass { height: f64 },
    Triangle { width: f64, height: f64 },
    Image { image: ImageData },
    Text { text: String, font_size: f64 },
}

impl WidgetKind {
    /// The instrument this widget represents, if it is one.
    pub fn instrument(&self) -> Option<InstrumentKind> {
        match self {
            WidgetKind::Ruler { .. } => Some(InstrumentKind::Ruler),
            WidgetKind::Protractor { .. } => Some(InstrumentKind::Protractor),
            WidgetKind::Compass { .. } => Some(InstrumentKind::Compass),
            WidgetKind::Triangle { .. } => Some(InstrumentKind::Triangle),
            WidgetKind::Image { .. } | WidgetKind::Text { .. } => None,
        }
    }
}

/// A positionable instrument or decoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    pub(crate) id: ItemId,
    pub kind: WidgetKind,
    /// World-space pivot (`x, y`).
    pub position: Point,
    /// Rotation about the pivot, in degrees.
    pub angle: f64,
    /// Display scale; applies to image and text content.
    pub scale: f64,
    pub selected: bool,
    pub visible: bool,
}

impl Widget {
    pub fn new(kind: WidgetKind, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            angle: 0.0,
            scale: 1.0,
            selected: false,
            visible: true,
        }
    }

    /// Create an instrument with its default extents.
    pub fn instrument(kind: InstrumentKind, position: Point) -> Self {
        Self::new(kind.default_widget_kind(), position)
    }

    pub fn image(image: ImageData, position: Point) -> Self {
        Self::new(WidgetKind::Image { image }, position)
    }

    pub fn text(text: impl Into<String>, position: Point) -> Self {
        Self::new(
            WidgetKind::Text {
                text: text.into(),
                font_size: DEFAULT_TEXT_SIZE,
            },
            position,
        )
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn instrument_kind(&self) -> Option<InstrumentKind> {
        self.kind.instrument()
    }

    pub fn is_compass(&self) -> bool {
        matches!(self.kind, WidgetKind::Compass { .. })
    }

    pub fn angle_radians(&self) -> f64 {
        self.angle.to_radians()
    }

    /// Map a point from this widget's local frame into world space.
    pub fn to_world(&self, local: Point) -> Point {
        geometry::local_to_world(local, self.position, self.angle_radians())
    }

    /// Map a world point into this widget's local frame.
    pub fn to_local(&self, world: Point) -> Point {
        geometry::world_to_local(world, self.position, self.angle_radians())
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_defaults() {
        let ruler = Widget::instrument(InstrumentKind::Ruler, Point::new(10.0, 20.0));
        assert_eq!(
            ruler.kind,
            WidgetKind::Ruler {
                width: 400.0,
                height: 50.0
            }
        );
        assert_eq!(ruler.instrument_kind(), Some(InstrumentKind::Ruler));
        assert!(ruler.visible);
        assert!(!ruler.selected);
        assert_eq!(ruler.angle, 0.0);
        assert_eq!(ruler.scale, 1.0);
    }

    #[test]
    fn test_decorations_are_not_instruments() {
        let text = Widget::text("x^2", Point::ZERO);
        assert_eq!(text.instrument_kind(), None);
        assert!(!text.is_compass());
    }

    #[test]
    fn test_local_frame_follows_angle() {
        let w = Widget::instrument(InstrumentKind::Ruler, Point::new(100.0, 100.0)).with_angle(90.0);
        let world = w.to_world(Point::new(10.0, 0.0));
        assert!((world.x - 100.0).abs() < 1e-9);
        assert!((world.y - 110.0).abs() < 1e-9);
        let back = w.to_local(world);
        assert!((back.x - 10.0).abs() < 1e-9);
        assert!(back.y.abs() < 1e-9);
    }

    #[test]
    fn test_translate() {
        let mut w = Widget::instrument(InstrumentKind::Protractor, Point::new(1.0, 2.0));
        w.translate(Vec2::new(3.0, -4.0));
        assert_eq!(w.position, Point::new(4.0, -2.0));
    }
}
