//! Backend-neutral draw commands.

use geoboard_core::ItemId;
use kurbo::{Affine, BezPath, Size, Stroke};
use peniko::{BlendMode, Color};

/// What a command belongs to, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Grid,
    /// Drawing for a stored item.
    Item(ItemId),
    /// Snap indicator and other transient guides.
    Overlay,
    /// The stroke still being drawn.
    InProgress,
}

/// A single drawing operation. Paths are in local coordinates and mapped to
/// world space by `transform`.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Stroke {
        path: BezPath,
        style: Stroke,
        color: Color,
        /// Non-default blending (marker ink).
        blend: Option<BlendMode>,
        transform: Affine,
    },
    Fill {
        path: BezPath,
        color: Color,
        transform: Affine,
    },
    /// An image widget's pixels, drawn into `size` at the local origin.
    Image {
        id: ItemId,
        size: Size,
        transform: Affine,
    },
    /// Text laid out with its top-left corner at the local origin.
    Text {
        text: String,
        font_size: f64,
        color: Color,
        transform: Affine,
    },
}

#[derive(Debug, Clone)]
pub struct DisplayEntry {
    pub layer: Layer,
    pub command: DrawCommand,
}

/// Ordered draw commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    entries: Vec<DisplayEntry>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer, command: DrawCommand) {
        self.entries.push(DisplayEntry { layer, command });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commands belonging to one layer, in paint order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.entries.iter().filter(move |e| e.layer == layer).map(|e| &e.command)
    }

    /// Stored items in the order they were painted, without repeats.
    pub fn painted_items(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = Vec::new();
        for entry in &self.entries {
            if let Layer::Item(id) = entry.layer {
                if ids.last() != Some(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }
}
