//! The board runtime: item store, application state and interaction engine.

use crate::config::EngineConfig;
use crate::error::{BoardError, BoardResult};
use crate::input::PointerEvent;
use crate::interaction::{EventResponse, InteractionEngine};
use crate::items::{CanvasItem, ImageData, ItemId, SerializableColor, Stroke, Widget};
use crate::snap::SnapHit;
use crate::state::AppState;
use crate::store::ItemStore;
use crate::tools::ToolMode;
use kurbo::{Point, Size};

/// A whiteboard session.
///
/// Everything here is in memory; the board is gone when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct Board {
    store: ItemStore,
    state: AppState,
    engine: InteractionEngine,
    /// Dismissable message for the user.
    notice: Option<String>,
}

impl Board {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: InteractionEngine::new(config),
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = state;
        self
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    pub fn engine(&self) -> &InteractionEngine {
        &self.engine
    }

    /// The stroke currently being drawn, drawn on top of everything.
    pub fn in_progress(&self) -> Option<&Stroke> {
        self.engine.in_progress()
    }

    pub fn snap_indicator(&self) -> Option<SnapHit> {
        self.engine.snap_indicator()
    }

    /// Feed a pointer event to the interaction engine.
    pub fn handle(&mut self, event: PointerEvent) -> EventResponse {
        self.engine.handle(&mut self.store, &self.state, event)
    }

    /// Switch tool mode. Instrument tools create their instrument at the
    /// viewport center on first use and toggle its visibility afterwards.
    pub fn invoke_tool(&mut self, mode: ToolMode) -> EventResponse {
        let mut response = self.engine.cancel();
        self.state.tool = mode;
        if let Some(kind) = mode.instrument() {
            self.store.toggle_instrument(kind, self.state.viewport_center());
            response.redraw = true;
        }
        response
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.state.color = color;
    }

    /// Non-positive or non-finite widths are ignored.
    pub fn set_stroke_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state.stroke_width = width;
        }
    }

    pub fn cycle_stroke_style(&mut self) {
        self.state.stroke_style = self.state.stroke_style.next();
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.state.snap_enabled = enabled;
    }

    pub fn toggle_grid(&mut self) -> EventResponse {
        self.state.grid_enabled = !self.state.grid_enabled;
        EventResponse {
            redraw: true,
            ..EventResponse::default()
        }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.state.viewport = viewport;
    }

    pub fn set_assist_panel_open(&mut self, open: bool) {
        self.state.assist_panel_open = open;
    }

    pub fn set_diagram_panel_open(&mut self, open: bool) {
        self.state.diagram_panel_open = open;
    }

    /// Remove every item, hidden instruments included.
    pub fn clear_board(&mut self) {
        self.engine.cancel();
        let count = self.store.len();
        self.store.clear();
        log::info!("board cleared ({count} items)");
    }

    /// Delete the selected widget.
    pub fn delete_selected(&mut self) -> Option<CanvasItem> {
        let id = self.store.selected_id()?;
        self.store.remove(id)
    }

    /// Place a text widget. Blank text is ignored.
    pub fn add_text(&mut self, text: &str, at: Point) -> Option<ItemId> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.store.add(Widget::text(text, at)))
    }

    /// Place an image at the viewport center, scaled down to fit the
    /// configured placement box.
    pub fn insert_image(&mut self, image: ImageData) -> ItemId {
        let config = self.engine.config();
        let scale = image.fit_scale(config.image_max_width, config.image_max_height);
        let center = self.state.viewport_center();
        log::info!(
            "placing {}x{} {} image at scale {scale:.3}",
            image.width,
            image.height,
            image.format.mime_type()
        );
        self.store.add(Widget::image(image, center).with_scale(scale))
    }

    /// Validate encoded bytes and place them as an image widget.
    pub fn insert_image_bytes(&mut self, bytes: &[u8]) -> BoardResult<ItemId> {
        let image = ImageData::from_bytes(bytes)?;
        Ok(self.insert_image(image))
    }

    /// Default paste target: pasted image bytes become an image widget.
    /// Failures leave the board untouched and raise a notice.
    pub fn paste_image(&mut self, bytes: &[u8]) -> BoardResult<ItemId> {
        self.insert_image_bytes(bytes).inspect_err(|err| self.report(err))
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Surface an error to the user as a dismissable notice.
    pub fn report(&mut self, err: &BoardError) {
        log::warn!("{err}");
        self.notice = Some(err.notice());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
