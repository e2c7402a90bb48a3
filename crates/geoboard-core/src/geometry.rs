//! Coordinate-frame transforms and instrument landmarks.
//!
//! Instruments are described in an axis-aligned local frame whose origin is
//! the widget pivot. These helpers move points between that frame and world
//! space; they are pure and hold no board state.

use crate::items::{Widget, WidgetKind};
use kurbo::{Affine, Point, Vec2};

/// Rotate `local` by `angle` radians about the origin, then translate by `pivot`.
pub fn local_to_world(local: Point, pivot: Point, angle: f64) -> Point {
    frame(pivot, angle) * local
}

/// Inverse of [`local_to_world`]: subtract `pivot`, then rotate by `-angle`.
pub fn world_to_local(world: Point, pivot: Point, angle: f64) -> Point {
    frame(pivot, angle).inverse() * world
}

/// Affine taking local coordinates to world coordinates.
pub fn frame(pivot: Point, angle: f64) -> Affine {
    Affine::translate(pivot.to_vec2()) * Affine::rotate(angle)
}

/// World positions of the compass leg tips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassLandmarks {
    pub needle_tip: Point,
    pub pencil_tip: Point,
}

/// Local offset of the needle tip from the hinge.
pub fn needle_offset(height: f64, spread: f64) -> Vec2 {
    Vec2::new(-spread, height)
}

/// Local offset of the pencil tip from the hinge.
pub fn pencil_offset(height: f64, spread: f64) -> Vec2 {
    Vec2::new(spread, height)
}

/// Leg-tip positions of a compass widget, `None` for any other widget.
pub fn compass_landmarks(widget: &Widget, spread: f64) -> Option<CompassLandmarks> {
    let WidgetKind::Compass { height } = widget.kind else {
        return None;
    };
    let angle = widget.angle_radians();
    Some(CompassLandmarks {
        needle_tip: local_to_world(needle_offset(height, spread).to_point(), widget.position, angle),
        pencil_tip: local_to_world(pencil_offset(height, spread).to_point(), widget.position, angle),
    })
}

/// Hinge position that puts the needle tip at `needle` for the given angle.
pub fn compass_hinge_for_needle(needle: Point, height: f64, spread: f64, angle: f64) -> Point {
    let offset = Affine::rotate(angle) * needle_offset(height, spread).to_point();
    needle - offset.to_vec2()
}

/// Angle of `to` as seen from `from`, in degrees.
pub fn bearing_degrees(from: Point, to: Point) -> f64 {
    (to - from).atan2().to_degrees()
}

/// Difference `to - from` in degrees, wrapped into `[-180, 180)`.
pub fn signed_angle_delta(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}
