//! GeoBoard Render Library
//!
//! Turns a board snapshot into draw commands. The display list is backend
//! neutral; the optional Vello backend replays it on the GPU.

pub mod instruments;
mod renderer;
pub mod scene;
pub mod strokes;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{
    DisplayListRenderer, RenderContext, RenderResult, Renderer, RendererError, build_display_list,
};
pub use scene::{DisplayEntry, DisplayList, DrawCommand, Layer};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
