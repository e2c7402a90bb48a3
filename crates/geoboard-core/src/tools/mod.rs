//! Tool modes and drag kinds.

use crate::items::InstrumentKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolMode {
    #[default]
    Select,
    Pen,
    Eraser,
    Text,
    /// The four instrument modes are entered when an instrument is toggled
    /// and handle the pointer exactly like `Select`.
    Ruler,
    Protractor,
    Compass,
    Triangle,
}

impl ToolMode {
    /// Whether pointer handling follows select-mode rules.
    pub fn behaves_as_select(self) -> bool {
        matches!(
            self,
            ToolMode::Select | ToolMode::Ruler | ToolMode::Protractor | ToolMode::Compass | ToolMode::Triangle
        )
    }

    /// The instrument toggled by this tool, if any.
    pub fn instrument(self) -> Option<InstrumentKind> {
        match self {
            ToolMode::Ruler => Some(InstrumentKind::Ruler),
            ToolMode::Protractor => Some(InstrumentKind::Protractor),
            ToolMode::Compass => Some(InstrumentKind::Compass),
            ToolMode::Triangle => Some(InstrumentKind::Triangle),
            ToolMode::Select | ToolMode::Pen | ToolMode::Eraser | ToolMode::Text => None,
        }
    }
}

impl From<InstrumentKind> for ToolMode {
    fn from(kind: InstrumentKind) -> Self {
        match kind {
            InstrumentKind::Ruler => ToolMode::Ruler,
            InstrumentKind::Protractor => ToolMode::Protractor,
            InstrumentKind::Compass => ToolMode::Compass,
            InstrumentKind::Triangle => ToolMode::Triangle,
        }
    }
}

/// What a held pointer is currently doing to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragKind {
    #[default]
    None,
    Move,
    Rotate,
    /// Rotating the compass about its locked needle while the pencil traces.
    CompassArc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_modes_behave_as_select() {
        for kind in InstrumentKind::ALL {
            let mode = ToolMode::from(kind);
            assert!(mode.behaves_as_select());
            assert_eq!(mode.instrument(), Some(kind));
        }
        assert!(ToolMode::Select.behaves_as_select());
        assert!(!ToolMode::Pen.behaves_as_select());
        assert!(!ToolMode::Eraser.behaves_as_select());
        assert!(!ToolMode::Text.behaves_as_select());
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(ToolMode::default(), ToolMode::Select);
        assert_eq!(DragKind::default(), DragKind::None);
    }
}
