//! UI-facing application state threaded through the engine.

use crate::items::{SerializableColor, StrokeStyle};
use crate::tools::ToolMode;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Tool mode, ink settings and view toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub tool: ToolMode,
    pub color: SerializableColor,
    pub stroke_width: f64,
    pub stroke_style: StrokeStyle,
    pub snap_enabled: bool,
    pub grid_enabled: bool,
    /// Visible board area in world units.
    pub viewport: Size,
    pub assist_panel_open: bool,
    pub diagram_panel_open: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            tool: ToolMode::Select,
            color: SerializableColor::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_style: StrokeStyle::Solid,
            snap_enabled: true,
            grid_enabled: true,
            viewport: Size::new(1280.0, 800.0),
            assist_panel_open: false,
            diagram_panel_open: false,
        }
    }
}

impl AppState {
    /// Center of the viewport, where new widgets are placed.
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_center() {
        let state = AppState {
            viewport: Size::new(800.0, 600.0),
            ..AppState::default()
        };
        assert_eq!(state.viewport_center(), Point::new(400.0, 300.0));
    }
}
