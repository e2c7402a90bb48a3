//! Renderer trait abstraction.

use crate::instruments;
use crate::scene::{DisplayList, DrawCommand, Layer};
use crate::strokes;
use geoboard_core::config::{COMPASS_SPREAD, GRID_PITCH, RULER_TICK_PITCH};
use geoboard_core::{Board, CanvasItem, SnapHit, Stroke};
use kurbo::{Affine, BezPath, Circle, Rect, Shape as _, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Image decode failed: {0}")]
    ImageDecode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything needed to draw one frame. Rendering reads nothing else.
pub struct RenderContext<'a> {
    /// Items in draw order.
    pub items: &'a [CanvasItem],
    /// Stroke being drawn; painted after every item.
    pub in_progress: Option<&'a Stroke>,
    pub viewport_size: Size,
    pub background_color: Color,
    pub grid_enabled: bool,
    pub grid_pitch: f64,
    pub grid_color: Color,
    pub ruler_tick_pitch: f64,
    pub compass_spread: f64,
    /// Outline and reference-mark color for instruments.
    pub instrument_color: Color,
    /// Default color for text widgets.
    pub ink_color: Color,
    pub selection_color: Color,
    pub snap_indicator: Option<SnapHit>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(items: &'a [CanvasItem], viewport_size: Size) -> Self {
        Self {
            items,
            in_progress: None,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            grid_enabled: true,
            grid_pitch: GRID_PITCH,
            grid_color: Color::from_rgba8(200, 200, 200, 100),
            ruler_tick_pitch: RULER_TICK_PITCH,
            compass_spread: COMPASS_SPREAD,
            instrument_color: Color::from_rgba8(60, 60, 60, 255),
            ink_color: Color::from_rgba8(0, 0, 0, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            snap_indicator: None,
        }
    }

    /// Snapshot of a board: its items, in-progress stroke, view toggles and
    /// tuning constants.
    pub fn from_board(board: &'a Board) -> Self {
        let config = board.config();
        let state = board.state();
        Self {
            in_progress: board.in_progress(),
            grid_enabled: state.grid_enabled,
            grid_pitch: config.grid_pitch,
            ruler_tick_pitch: config.ruler_tick_pitch,
            compass_spread: config.compass_spread,
            ink_color: state.color.into(),
            snap_indicator: board.snap_indicator(),
            ..Self::new(board.store().items(), state.viewport)
        }
    }

    pub fn with_in_progress(mut self, stroke: Option<&'a Stroke>) -> Self {
        self.in_progress = stroke;
        self
    }

    pub fn with_grid(mut self, enabled: bool) -> Self {
        self.grid_enabled = enabled;
        self
    }

    pub fn with_snap_indicator(mut self, hit: Option<SnapHit>) -> Self {
        self.snap_indicator = hit;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the draw commands for a frame from scratch.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Produce the full command list for a frame.
///
/// Order: clear, grid, visible items in store order, snap indicator, then
/// the in-progress stroke.
pub fn build_display_list(ctx: &RenderContext) -> DisplayList {
    let mut list = DisplayList::new();
    list.push(
        Layer::Background,
        DrawCommand::Clear {
            color: ctx.background_color,
        },
    );

    if ctx.grid_enabled && ctx.grid_pitch > 0.0 {
        list.push(
            Layer::Grid,
            DrawCommand::Stroke {
                path: grid_path(ctx.viewport_size, ctx.grid_pitch),
                style: kurbo::Stroke::new(0.5),
                color: ctx.grid_color,
                blend: None,
                transform: Affine::IDENTITY,
            },
        );
    }

    for item in ctx.items.iter().filter(|item| item.is_visible()) {
        match item {
            CanvasItem::Stroke(stroke) => push_stroke(&mut list, Layer::Item(stroke.id()), stroke),
            CanvasItem::Widget(widget) => instruments::draw_widget(&mut list, widget, ctx),
        }
    }

    if let Some(hit) = ctx.snap_indicator {
        list.push(
            Layer::Overlay,
            DrawCommand::Stroke {
                path: Circle::new(hit.point, 5.0).to_path(0.1),
                style: kurbo::Stroke::new(1.5),
                color: ctx.selection_color,
                blend: None,
                transform: Affine::IDENTITY,
            },
        );
    }

    if let Some(stroke) = ctx.in_progress {
        push_stroke(&mut list, Layer::InProgress, stroke);
    }
    log::trace!("display list built: {} commands", list.len());
    list
}

/// Grid lines at multiples of `pitch` covering the viewport.
fn grid_path(viewport: Size, pitch: f64) -> BezPath {
    let bounds = Rect::from_origin_size((0.0, 0.0), viewport);
    let mut path = BezPath::new();
    let mut x = 0.0;
    while x <= bounds.x1 {
        path.move_to((x, bounds.y0));
        path.line_to((x, bounds.y1));
        x += pitch;
    }
    let mut y = 0.0;
    while y <= bounds.y1 {
        path.move_to((bounds.x0, y));
        path.line_to((bounds.x1, y));
        y += pitch;
    }
    path
}

/// Strokes with fewer than two points are skipped.
fn push_stroke(list: &mut DisplayList, layer: Layer, stroke: &Stroke) {
    let Some(path) = strokes::smooth_path(&stroke.points) else {
        return;
    };
    let look = strokes::appearance(stroke);
    list.push(
        layer,
        DrawCommand::Stroke {
            path,
            style: look.style,
            color: look.color,
            blend: look.blend,
            transform: Affine::IDENTITY,
        },
    );
}

/// Renderer that records the display list without drawing it.
///
/// Used headless and in tests; GPU backends replay the same list.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    list: DisplayList,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    pub fn take_display_list(&mut self) -> DisplayList {
        std::mem::take(&mut self.list)
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.list = build_display_list(ctx);
    }
}
