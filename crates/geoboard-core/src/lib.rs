//! GeoBoard Core Library
//!
//! Instrument geometry, item model and pointer interaction for the GeoBoard
//! math whiteboard. Nothing here renders or touches the network.

pub mod board;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod items;
pub mod services;
pub mod snap;
pub mod state;
pub mod store;
pub mod tools;

pub use board::Board;
pub use clipboard::{ClipboardSource, MemoryClipboard, PasteOutcome, PasteTarget};
pub use config::EngineConfig;
pub use error::{BoardError, BoardResult};
pub use geometry::{CompassLandmarks, compass_landmarks, local_to_world, world_to_local};
pub use input::{MouseButton, PointerEvent};
pub use interaction::{EventResponse, InteractionEngine};
pub use items::{CanvasItem, ImageData, InstrumentKind, ItemId, SerializableColor, Stroke, StrokeStyle, Widget, WidgetKind};
pub use services::{AssistPanel, DiagramKind, RequestState, Solution};
pub use snap::{SnapEdge, SnapHit, resolve_snap};
pub use state::AppState;
pub use store::{InstrumentToggle, ItemStore};
pub use tools::{DragKind, ToolMode};
