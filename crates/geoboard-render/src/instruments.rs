//! Drawing routines for widgets: instrument bodies, reference marks,
//! decorations and the selection highlight.
//!
//! Every routine builds paths in the widget's local frame and lets the
//! command transform place them in the world.

use crate::renderer::RenderContext;
use crate::scene::{DisplayList, DrawCommand, Layer};
use geoboard_core::geometry;
use geoboard_core::{Widget, WidgetKind};
use kurbo::{Affine, Arc, BezPath, Circle, Point, Rect, Shape as _, Size, Stroke, Vec2};
use peniko::Color;
use std::f64::consts::PI;

/// Every fifth ruler tick is a major tick.
pub const RULER_MAJOR_EVERY: usize = 5;
pub const PROTRACTOR_TICK_DEGREES: u32 = 10;
pub const PROTRACTOR_MAJOR_DEGREES: u32 = 30;
const LABEL_SIZE: f64 = 10.0;
/// Length of the compass handle above the hinge.
const COMPASS_HANDLE: f64 = 25.0;
const SELECTION_PADDING: f64 = 6.0;

const RULER_FILL: Color = Color::from_rgba8(250, 230, 140, 170);
const PROTRACTOR_FILL: Color = Color::from_rgba8(170, 210, 250, 120);
const TRIANGLE_FILL: Color = Color::from_rgba8(190, 240, 190, 120);
const COMPASS_METAL: Color = Color::from_rgba8(90, 90, 100, 255);
const PENCIL_LEAD: Color = Color::from_rgba8(230, 120, 40, 255);
const FRAME: Color = Color::from_rgba8(180, 180, 180, 255);

/// Append everything needed to draw `widget`.
pub fn draw_widget(list: &mut DisplayList, widget: &Widget, ctx: &RenderContext) {
    let layer = Layer::Item(widget.id());
    let frame = geometry::frame(widget.position, widget.angle_radians());

    match &widget.kind {
        WidgetKind::Ruler { width, height } => {
            draw_ruler(list, layer, frame, *width, *height, ctx);
        }
        WidgetKind::Protractor { radius } => draw_protractor(list, layer, frame, *radius, ctx),
        WidgetKind::Compass { height } => draw_compass(list, layer, frame, *height, ctx),
        WidgetKind::Triangle { width, height } => draw_triangle(list, layer, frame, *width, *height, ctx),
        WidgetKind::Image { image } => {
            let size = Size::new(image.width as f64, image.height as f64);
            let transform = frame * Affine::scale(widget.scale) * Affine::translate(-size.to_vec2() / 2.0);
            list.push(layer, DrawCommand::Image { id: widget.id(), size, transform });
            list.push(
                layer,
                DrawCommand::Stroke {
                    path: size.to_rect().to_path(0.1),
                    style: Stroke::new(1.0 / widget.scale.max(f64::EPSILON)),
                    color: FRAME,
                    blend: None,
                    transform,
                },
            );
        }
        WidgetKind::Text { text, font_size } => list.push(
            layer,
            DrawCommand::Text {
                text: text.clone(),
                font_size: *font_size,
                color: ctx.ink_color,
                transform: frame * Affine::scale(widget.scale),
            },
        ),
    }

    if widget.selected {
        let bounds = local_bounds(widget, ctx.compass_spread).inflate(SELECTION_PADDING, SELECTION_PADDING);
        list.push(
            layer,
            DrawCommand::Stroke {
                path: bounds.to_path(0.1),
                style: Stroke::new(2.0),
                color: ctx.selection_color,
                blend: None,
                transform: frame,
            },
        );
    }
}

/// Axis-aligned bounds of a widget in its local frame.
pub fn local_bounds(widget: &Widget, compass_spread: f64) -> Rect {
    match &widget.kind {
        WidgetKind::Ruler { width, height } => Rect::new(-width / 2.0, -height / 2.0, width / 2.0, height / 2.0),
        WidgetKind::Protractor { radius } => Rect::new(-radius, -radius, *radius, 0.0),
        WidgetKind::Compass { height } => Rect::new(-compass_spread, -COMPASS_HANDLE, compass_spread, *height),
        WidgetKind::Triangle { width, height } => Rect::new(0.0, 0.0, *width, *height),
        WidgetKind::Image { image } => {
            let size = Size::new(image.width as f64, image.height as f64) * widget.scale;
            Rect::from_center_size(Point::ZERO, size)
        }
        WidgetKind::Text { text, font_size } => {
            // Rough advance estimate; the backend owns real text metrics.
            let width = (text.chars().count() as f64 * font_size * 0.6).max(*font_size);
            Rect::new(0.0, 0.0, width * widget.scale, font_size * 1.2 * widget.scale)
        }
    }
}

fn outline(list: &mut DisplayList, layer: Layer, path: BezPath, fill: Color, ctx: &RenderContext, transform: Affine) {
    list.push(
        layer,
        DrawCommand::Fill {
            path: path.clone(),
            color: fill,
            transform,
        },
    );
    list.push(
        layer,
        DrawCommand::Stroke {
            path,
            style: Stroke::new(1.5),
            color: ctx.instrument_color,
            blend: None,
            transform,
        },
    );
}

fn label(list: &mut DisplayList, layer: Layer, text: String, at: Point, ctx: &RenderContext, frame: Affine) {
    list.push(
        layer,
        DrawCommand::Text {
            text,
            font_size: LABEL_SIZE,
            color: ctx.instrument_color,
            transform: frame * Affine::translate(at.to_vec2()),
        },
    );
}

fn ruler_tick_count(width: f64, pitch: f64) -> usize {
    (width / pitch).floor() as usize + 1
}

fn draw_ruler(list: &mut DisplayList, layer: Layer, frame: Affine, width: f64, height: f64, ctx: &RenderContext) {
    let body = Rect::new(-width / 2.0, -height / 2.0, width / 2.0, height / 2.0);
    outline(list, layer, body.to_path(0.1), RULER_FILL, ctx, frame);

    let pitch = ctx.ruler_tick_pitch;
    let top = -height / 2.0;
    let mut minor = BezPath::new();
    let mut major = BezPath::new();
    for i in 0..ruler_tick_count(width, pitch) {
        let x = -width / 2.0 + i as f64 * pitch;
        if i % RULER_MAJOR_EVERY == 0 {
            let length = height * 0.4;
            major.move_to((x, top));
            major.line_to((x, top + length));
            label(
                list,
                layer,
                format!("{}", i / RULER_MAJOR_EVERY),
                Point::new(x - LABEL_SIZE * 0.3, top + length + 2.0),
                ctx,
                frame,
            );
        } else {
            minor.move_to((x, top));
            minor.line_to((x, top + height * 0.2));
        }
    }
    for (path, stroke_width) in [(minor, 1.0), (major, 1.5)] {
        list.push(
            layer,
            DrawCommand::Stroke {
                path,
                style: Stroke::new(stroke_width),
                color: ctx.instrument_color,
                blend: None,
                transform: frame,
            },
        );
    }
}

/// Unit vector for a protractor reading; 0° points along local +X, 90° up.
fn protractor_direction(degrees: f64) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

fn draw_protractor(list: &mut DisplayList, layer: Layer, frame: Affine, radius: f64, ctx: &RenderContext) {
    let mut body = BezPath::new();
    body.move_to((-radius, 0.0));
    let arc = Arc {
        center: Point::ZERO,
        radii: Vec2::new(radius, radius),
        start_angle: PI,
        sweep_angle: PI,
        x_rotation: 0.0,
    };
    body.extend(arc.append_iter(0.1));
    body.close_path();
    outline(list, layer, body, PROTRACTOR_FILL, ctx, frame);

    let mut ticks = BezPath::new();
    for degrees in (0..=180).step_by(PROTRACTOR_TICK_DEGREES as usize) {
        let dir = protractor_direction(degrees as f64);
        let major = degrees % PROTRACTOR_MAJOR_DEGREES == 0;
        let length = if major { 20.0 } else { 10.0 };
        ticks.move_to((dir * radius).to_point());
        ticks.line_to((dir * (radius - length)).to_point());
        if major {
            let at = (dir * (radius - length - 12.0)).to_point() - Vec2::new(LABEL_SIZE * 0.6, LABEL_SIZE * 0.6);
            label(list, layer, format!("{degrees}°"), at, ctx, frame);
        }
    }
    // Center mark on the baseline.
    ticks.move_to((0.0, -8.0));
    ticks.line_to((0.0, 0.0));
    list.push(
        layer,
        DrawCommand::Stroke {
            path: ticks,
            style: Stroke::new(1.0),
            color: ctx.instrument_color,
            blend: None,
            transform: frame,
        },
    );
}

fn draw_triangle(list: &mut DisplayList, layer: Layer, frame: Affine, width: f64, height: f64, ctx: &RenderContext) {
    let mut body = BezPath::new();
    body.move_to((0.0, 0.0));
    body.line_to((width, 0.0));
    body.line_to((0.0, height));
    body.close_path();
    outline(list, layer, body, TRIANGLE_FILL, ctx, frame);

    let corner = 14.0_f64.min(width / 4.0).min(height / 4.0);
    let mut marker = BezPath::new();
    marker.move_to((corner, 0.0));
    marker.line_to((corner, corner));
    marker.line_to((0.0, corner));
    list.push(
        layer,
        DrawCommand::Stroke {
            path: marker,
            style: Stroke::new(1.0),
            color: ctx.instrument_color,
            blend: None,
            transform: frame,
        },
    );
}

fn draw_compass(list: &mut DisplayList, layer: Layer, frame: Affine, height: f64, ctx: &RenderContext) {
    let spread = ctx.compass_spread;
    let needle = geometry::needle_offset(height, spread).to_point();
    let pencil = geometry::pencil_offset(height, spread).to_point();

    let mut legs = BezPath::new();
    legs.move_to(needle);
    legs.line_to(Point::ZERO);
    legs.line_to(pencil);
    legs.move_to(Point::ZERO);
    legs.line_to((0.0, -COMPASS_HANDLE));
    list.push(
        layer,
        DrawCommand::Stroke {
            path: legs,
            style: Stroke::new(4.0).with_caps(kurbo::Cap::Round),
            color: COMPASS_METAL,
            blend: None,
            transform: frame,
        },
    );

    for (center, radius, color) in [
        (Point::ZERO, 8.0, COMPASS_METAL),
        (needle, 3.0, ctx.instrument_color),
        (pencil, 4.0, PENCIL_LEAD),
    ] {
        list.push(
            layer,
            DrawCommand::Fill {
                path: Circle::new(center, radius).to_path(0.1),
                color,
                transform: frame,
            },
        );
    }
}
