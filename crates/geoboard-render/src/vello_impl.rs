//! Vello renderer implementation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::renderer::{RenderContext, Renderer, RendererError, RenderResult, build_display_list};
use crate::scene::{DisplayList, DrawCommand};
use geoboard_core::{CanvasItem, ItemId, WidgetKind};
use kurbo::{Affine, Point, Rect, Shape as _, Size};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (cached to avoid re-scanning fonts).
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
    /// Decoded pixels per image widget.
    image_cache: HashMap<ItemId, peniko::ImageData>,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            image_cache: HashMap::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Drop cached pixels for images no longer on the board.
    fn prune_images(&mut self, items: &[CanvasItem]) {
        self.image_cache
            .retain(|id, _| items.iter().any(|item| item.id() == *id));
    }

    /// Replay a display list into the scene.
    fn replay(&mut self, list: &DisplayList, items: &[CanvasItem], viewport: Size) {
        for entry in list.entries() {
            match &entry.command {
                DrawCommand::Clear { color } => {
                    let rect = Rect::from_origin_size(Point::ZERO, viewport);
                    self.scene.fill(Fill::NonZero, Affine::IDENTITY, *color, None, &rect);
                }
                DrawCommand::Stroke {
                    path,
                    style,
                    color,
                    blend,
                    transform,
                } => match blend {
                    Some(mode) => {
                        let clip = path.bounding_box().inflate(style.width, style.width);
                        self.scene.push_layer(*mode, 1.0, *transform, &clip);
                        self.scene.stroke(style, *transform, *color, None, path);
                        self.scene.pop_layer();
                    }
                    None => self.scene.stroke(style, *transform, *color, None, path),
                },
                DrawCommand::Fill {
                    path,
                    color,
                    transform,
                } => self.scene.fill(Fill::NonZero, *transform, *color, None, path),
                DrawCommand::Image { id, size, transform } => {
                    if let Err(err) = self.render_image(*id, *size, *transform, items) {
                        log::warn!("Skipping image {id}: {err}");
                        self.render_image_placeholder(*size, *transform);
                    }
                }
                DrawCommand::Text {
                    text,
                    font_size,
                    color,
                    transform,
                } => self.render_text(text, *font_size, *color, *transform),
            }
        }
    }

    /// Decoded pixels for an image widget, decoding on first use.
    fn image_data(&mut self, id: ItemId, items: &[CanvasItem]) -> RenderResult<peniko::ImageData> {
        if let Some(cached) = self.image_cache.get(&id) {
            return Ok(cached.clone());
        }
        let bytes = items
            .iter()
            .filter_map(CanvasItem::as_widget)
            .find(|w| w.id() == id)
            .and_then(|w| match &w.kind {
                WidgetKind::Image { image } => image.data(),
                _ => None,
            })
            .ok_or_else(|| RendererError::ImageDecode(format!("no image data for {id}")))?;

        let decoded =
            ::image::load_from_memory(&bytes).map_err(|e| RendererError::ImageDecode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = peniko::ImageData {
            data: peniko::Blob::new(Arc::new(rgba.into_vec())),
            format: peniko::ImageFormat::Rgba8,
            width,
            height,
            alpha_type: peniko::ImageAlphaType::Alpha,
        };
        self.image_cache.insert(id, data.clone());
        Ok(data)
    }

    fn render_image(&mut self, id: ItemId, size: Size, transform: Affine, items: &[CanvasItem]) -> RenderResult<()> {
        let image_data = self.image_data(id, items)?;
        if image_data.width == 0 || image_data.height == 0 {
            return Err(RendererError::ImageDecode(format!("image {id} is empty")));
        }
        let scale_x = size.width / image_data.width as f64;
        let scale_y = size.height / image_data.height as f64;
        let image_transform = transform * Affine::scale_non_uniform(scale_x, scale_y);
        self.scene.draw_image(&image_data.into(), image_transform);
        Ok(())
    }

    /// Gray box with an X where an image could not be drawn.
    fn render_image_placeholder(&mut self, size: Size, transform: Affine) {
        let bounds = Rect::from_origin_size(Point::ZERO, size);
        let rect_path = bounds.to_path(0.1);
        self.scene
            .fill(Fill::NonZero, transform, Color::from_rgba8(200, 200, 200, 255), None, &rect_path);

        let stroke = kurbo::Stroke::new(2.0);
        let mut x_path = kurbo::BezPath::new();
        x_path.move_to(Point::new(bounds.x0, bounds.y0));
        x_path.line_to(Point::new(bounds.x1, bounds.y1));
        x_path.move_to(Point::new(bounds.x1, bounds.y0));
        x_path.line_to(Point::new(bounds.x0, bounds.y1));
        self.scene
            .stroke(&stroke, transform, Color::from_rgba8(150, 150, 150, 255), None, &x_path);
    }

    fn render_text(&mut self, text: &str, font_size: f64, color: Color, transform: Affine) {
        if text.is_empty() {
            return;
        }
        let brush = Brush::Solid(color);

        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size as f32));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Single(
            parley::FontFamily::Generic(parley::GenericFamily::SansSerif),
        )));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        let mut glyph_count = 0;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        glyph_count += 1;
                        vello::Glyph { id: glyph.id, x: gx, y: gy }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(run.font())
                        .brush(&brush)
                        .hint(true)
                        .transform(transform)
                        .glyph_transform(glyph_xform)
                        .font_size(run.font_size())
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        // No font available: mark where the text would be.
        if glyph_count == 0 {
            let width = text.chars().count() as f64 * font_size * 0.6;
            let rect = Rect::new(0.0, 0.0, width.max(20.0), font_size * 1.2);
            self.scene
                .fill(Fill::NonZero, transform, Color::from_rgba8(255, 100, 100, 100), None, &rect);
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.prune_images(ctx.items);
        let list = build_display_list(ctx);
        self.replay(&list, ctx.items, ctx.viewport_size);
    }
}
