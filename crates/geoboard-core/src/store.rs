//! The canonical ordered collection of board items and the selection model.

use crate::items::{CanvasItem, InstrumentKind, ItemId, Widget};
use kurbo::{Point, Vec2};

/// What [`ItemStore::toggle_instrument`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentToggle {
    Created(ItemId),
    Shown(ItemId),
    Hidden(ItemId),
}

impl InstrumentToggle {
    pub fn id(self) -> ItemId {
        match self {
            InstrumentToggle::Created(id) | InstrumentToggle::Shown(id) | InstrumentToggle::Hidden(id) => id,
        }
    }
}

/// Items in draw order (back to front). At most one item is selected.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<CanvasItem>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item on top of everything else.
    pub fn add(&mut self, item: impl Into<CanvasItem>) -> ItemId {
        let mut item = item.into();
        // Keep selection exclusive even when a pre-selected widget is inserted.
        if item.is_selected() {
            self.select(None);
        }
        if let CanvasItem::Widget(w) = &mut item {
            if !w.visible {
                w.selected = false;
            }
        }
        let id = item.id();
        self.items.push(item);
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<CanvasItem> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut CanvasItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn widget(&self, id: ItemId) -> Option<&Widget> {
        self.get(id).and_then(CanvasItem::as_widget)
    }

    pub fn widget_mut(&mut self, id: ItemId) -> Option<&mut Widget> {
        self.get_mut(id).and_then(CanvasItem::as_widget_mut)
    }

    /// Items in draw order.
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanvasItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Show or hide a widget. Hiding a selected widget deselects it.
    /// Returns false if `id` is not a widget.
    pub fn set_visible(&mut self, id: ItemId, visible: bool) -> bool {
        let Some(widget) = self.widget_mut(id) else {
            return false;
        };
        widget.visible = visible;
        if !visible {
            widget.selected = false;
        }
        true
    }

    /// Select a single widget, or clear the selection with `None`.
    ///
    /// Every other item is deselected. Strokes and hidden widgets cannot be
    /// selected; asking for one just clears the selection.
    pub fn select(&mut self, id: Option<ItemId>) {
        for item in &mut self.items {
            if let CanvasItem::Widget(w) = item {
                w.selected = Some(w.id()) == id && w.visible;
            }
        }
    }

    /// The selected item, if any.
    pub fn selected(&self) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.is_selected())
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected().map(CanvasItem::id)
    }

    /// Translate a widget by a delta. Returns false for strokes and unknown ids.
    pub fn update_transform(&mut self, id: ItemId, delta: Vec2) -> bool {
        match self.widget_mut(id) {
            Some(widget) => {
                widget.translate(delta);
                true
            }
            None => false,
        }
    }

    /// Replace a widget's angle (degrees).
    pub fn update_angle(&mut self, id: ItemId, angle: f64) -> bool {
        match self.widget_mut(id) {
            Some(widget) => {
                widget.angle = angle;
                true
            }
            None => false,
        }
    }

    /// The singleton widget of an instrument kind, visible or not.
    pub fn instrument(&self, kind: InstrumentKind) -> Option<&Widget> {
        self.items
            .iter()
            .filter_map(CanvasItem::as_widget)
            .find(|w| w.instrument_kind() == Some(kind))
    }

    /// Create the instrument at `at` if it does not exist, otherwise flip its
    /// visibility.
    pub fn toggle_instrument(&mut self, kind: InstrumentKind, at: Point) -> InstrumentToggle {
        if let Some((id, visible)) = self.instrument(kind).map(|w| (w.id(), w.visible)) {
            self.set_visible(id, !visible);
            let outcome = if visible {
                InstrumentToggle::Hidden(id)
            } else {
                InstrumentToggle::Shown(id)
            };
            log::info!("{} {:?}", kind.name(), outcome);
            return outcome;
        }
        let id = self.add(Widget::instrument(kind, at));
        log::info!("{} created at ({:.1}, {:.1})", kind.name(), at.x, at.y);
        InstrumentToggle::Created(id)
    }

    /// Topmost visible widget whose pivot is strictly within `radius` of `point`.
    pub fn hit_test_widget(&self, point: Point, radius: f64) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .filter_map(CanvasItem::as_widget)
            .find(|w| w.visible && w.position.distance(point) < radius)
            .map(Widget::id)
    }

    /// Remove every stroke with a sample point within `radius` of `point`.
    /// Widgets are never touched. Returns the number of strokes removed.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> usize {
        let before = self.items.len();
        self.items.retain(|item| match item {
            CanvasItem::Stroke(s) => !s.has_point_near(point, radius),
            CanvasItem::Widget(_) => true,
        });
        before - self.items.len()
    }
}
