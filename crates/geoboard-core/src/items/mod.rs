//! Drawable items on the board: freehand strokes and positionable widgets.

pub(crate) mod image;
mod stroke;
mod widget;

pub use self::image::{ImageData, ImageFormat};
pub use stroke::{Stroke, StrokeStyle};
pub use widget::{
    DEFAULT_COMPASS_HEIGHT, DEFAULT_PROTRACTOR_RADIUS, DEFAULT_RULER_HEIGHT, DEFAULT_RULER_WIDTH,
    DEFAULT_TEXT_SIZE, DEFAULT_TRIANGLE_HEIGHT, DEFAULT_TRIANGLE_WIDTH, InstrumentKind, Widget,
    WidgetKind,
};

use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for items.
pub type ItemId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => Some(Self::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
                255,
            )),
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Any item stored on the board. Store order is draw order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CanvasItem {
    Stroke(Stroke),
    Widget(Widget),
}

impl CanvasItem {
    pub fn id(&self) -> ItemId {
        match self {
            CanvasItem::Stroke(s) => s.id(),
            CanvasItem::Widget(w) => w.id(),
        }
    }

    /// Strokes are always visible; widgets carry a visibility flag.
    pub fn is_visible(&self) -> bool {
        match self {
            CanvasItem::Stroke(_) => true,
            CanvasItem::Widget(w) => w.visible,
        }
    }

    /// Strokes are never selectable.
    pub fn is_selected(&self) -> bool {
        match self {
            CanvasItem::Stroke(_) => false,
            CanvasItem::Widget(w) => w.selected,
        }
    }

    pub fn as_widget(&self) -> Option<&Widget> {
        match self {
            CanvasItem::Widget(w) => Some(w),
            CanvasItem::Stroke(_) => None,
        }
    }

    pub fn as_widget_mut(&mut self) -> Option<&mut Widget> {
        match self {
            CanvasItem::Widget(w) => Some(w),
            CanvasItem::Stroke(_) => None,
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            CanvasItem::Stroke(s) => Some(s),
            CanvasItem::Widget(_) => None,
        }
    }

    pub fn is_stroke(&self) -> bool {
        matches!(self, CanvasItem::Stroke(_))
    }
}

impl From<Stroke> for CanvasItem {
    fn from(stroke: Stroke) -> Self {
        CanvasItem::Stroke(stroke)
    }
}

impl From<Widget> for CanvasItem {
    fn from(widget: Widget) -> Self {
        CanvasItem::Widget(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(SerializableColor::from_hex("#fff"), Some(SerializableColor::new(255, 255, 255, 255)));
        assert_eq!(SerializableColor::from_hex("#1e40af"), Some(SerializableColor::new(30, 64, 175, 255)));
        assert_eq!(SerializableColor::from_hex("#00000080"), Some(SerializableColor::new(0, 0, 0, 128)));
        assert_eq!(SerializableColor::from_hex("red"), None);
        assert_eq!(SerializableColor::from_hex("#12345"), None);
    }

    #[test]
    fn test_hex_rejects_non_ascii() {
        assert_eq!(SerializableColor::from_hex("#aé"), None);
        assert_eq!(SerializableColor::from_hex("#ééé"), None);
        assert_eq!(SerializableColor::from_hex("#ff00é0"), None);
    }

    #[test]
    fn test_color_conversion() {
        let color = SerializableColor::new(10, 20, 30, 40);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_strokes_are_never_selected() {
        let item = CanvasItem::from(Stroke::new(SerializableColor::black(), 2.0, StrokeStyle::Solid));
        assert!(item.is_visible());
        assert!(!item.is_selected());
        assert!(item.as_widget().is_none());
    }
}
