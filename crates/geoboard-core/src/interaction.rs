//! Pointer and wheel handling: moving, rotating, compass arcs, drawing and erasing.

use crate::config::EngineConfig;
use crate::geometry::{self, bearing_degrees, compass_landmarks, signed_angle_delta};
use crate::input::{MouseButton, PointerEvent};
use crate::items::{ItemId, Stroke, WidgetKind};
use crate::snap::{SnapHit, resolve_snap_hit};
use crate::state::AppState;
use crate::store::ItemStore;
use crate::tools::{DragKind, ToolMode};
use kurbo::Point;

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventResponse {
    /// The board changed and must be redrawn.
    pub redraw: bool,
    /// Swallow the platform context menu (every right-button event).
    pub suppress_context_menu: bool,
    /// Text mode was clicked here; the caller should prompt for text.
    pub text_anchor: Option<Point>,
}

/// Transient gesture state.
///
/// Owns the in-progress stroke, which never lives in the store until the
/// pointer is released.
#[derive(Debug, Clone, Default)]
pub struct InteractionEngine {
    config: EngineConfig,
    drag: DragKind,
    /// Widget being moved or rotated.
    active: Option<ItemId>,
    /// Needle tip held fixed during a compass arc.
    pivot_lock: Option<Point>,
    last_pointer: Option<Point>,
    held: Option<MouseButton>,
    in_progress: Option<Stroke>,
    snap_hit: Option<SnapHit>,
}

impl InteractionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn drag_kind(&self) -> DragKind {
        self.drag
    }

    pub fn pivot_lock(&self) -> Option<Point> {
        self.pivot_lock
    }

    /// The stroke being drawn, if any.
    pub fn in_progress(&self) -> Option<&Stroke> {
        self.in_progress.as_ref()
    }

    /// The last edge the pen snapped to during the current gesture.
    pub fn snap_indicator(&self) -> Option<SnapHit> {
        self.snap_hit
    }

    pub fn is_active(&self) -> bool {
        self.held.is_some()
    }

    /// Dispatch a pointer event.
    pub fn handle(&mut self, store: &mut ItemStore, state: &AppState, event: PointerEvent) -> EventResponse {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(store, state, position, button),
            PointerEvent::Move { position } => self.pointer_move(store, state, position),
            PointerEvent::Up { button, .. } => self.pointer_up(store, button),
            PointerEvent::Wheel { delta_y, .. } => self.wheel(store, delta_y),
        }
    }

    pub fn pointer_down(
        &mut self,
        store: &mut ItemStore,
        state: &AppState,
        position: Point,
        button: MouseButton,
    ) -> EventResponse {
        let mut response = EventResponse {
            suppress_context_menu: button == MouseButton::Right,
            ..EventResponse::default()
        };
        // A second button pressed mid-gesture is ignored; the first gesture
        // owns the engine until its own button is released.
        if let Some(held) = self.held {
            log::debug!("ignoring {button:?} press while {held:?} is held");
            return response;
        }
        self.reset_gesture();
        self.held = Some(button);
        self.last_pointer = Some(position);

        let select_like = state.tool.behaves_as_select();
        match store.hit_test_widget(position, self.config.hit_radius) {
            Some(id) if button == MouseButton::Right => {
                let landmarks = store
                    .widget(id)
                    .and_then(|w| compass_landmarks(w, self.config.compass_spread));
                if let Some(marks) = landmarks {
                    self.drag = DragKind::CompassArc;
                    self.pivot_lock = Some(marks.needle_tip);
                    self.in_progress = Some(Stroke::from_points(
                        vec![marks.pencil_tip],
                        state.color,
                        state.stroke_width,
                        state.stroke_style,
                    ));
                } else {
                    self.drag = DragKind::Rotate;
                }
                self.active = Some(id);
                store.select(Some(id));
                response.redraw = true;
                log::debug!("{:?} started on {id}", self.drag);
            }
            Some(id) if button == MouseButton::Left && select_like => {
                self.drag = DragKind::Move;
                self.active = Some(id);
                store.select(Some(id));
                response.redraw = true;
                log::debug!("move started on {id}");
            }
            Some(_) => {}
            None if select_like => {
                if store.selected().is_some() {
                    store.select(None);
                    response.redraw = true;
                }
            }
            None => {}
        }

        if button != MouseButton::Left {
            return response;
        }
        match state.tool {
            ToolMode::Pen => {
                // Pen overrides any drag started by the hit above.
                self.drag = DragKind::None;
                self.active = None;
                let point = self.snapped(store, state, position);
                self.in_progress = Some(Stroke::from_points(
                    vec![point],
                    state.color,
                    state.stroke_width,
                    state.stroke_style,
                ));
                response.redraw = true;
            }
            ToolMode::Eraser => {
                if store.erase_at(position, self.config.eraser_radius) > 0 {
                    response.redraw = true;
                }
            }
            ToolMode::Text => response.text_anchor = Some(position),
            _ => {}
        }
        response
    }

    /// Only acts while a button is held.
    pub fn pointer_move(&mut self, store: &mut ItemStore, state: &AppState, position: Point) -> EventResponse {
        let previous = self.last_pointer.replace(position);
        let (Some(held), Some(last)) = (self.held, previous) else {
            return EventResponse::default();
        };
        let mut redraw = false;

        match (self.drag, self.active) {
            (DragKind::CompassArc, Some(id)) => redraw |= self.trace_arc(store, id, last, position),
            (DragKind::Rotate, Some(id)) => {
                if let Some(widget) = store.widget_mut(id) {
                    widget.angle += (position.y - last.y) * self.config.rotate_sensitivity;
                    redraw = true;
                }
            }
            (DragKind::Move, Some(id)) => redraw |= store.update_transform(id, position - last),
            _ => {}
        }

        if self.drag == DragKind::None && state.tool == ToolMode::Pen {
            let point = self.snapped(store, state, position);
            if let Some(stroke) = &mut self.in_progress {
                stroke.add_point(point);
                redraw = true;
            }
        }
        if state.tool == ToolMode::Eraser && held == MouseButton::Left {
            redraw |= store.erase_at(position, self.config.eraser_radius) > 0;
        }

        EventResponse {
            redraw,
            ..EventResponse::default()
        }
    }

    /// Finalize any in-progress stroke and end the gesture.
    pub fn pointer_up(&mut self, store: &mut ItemStore, button: MouseButton) -> EventResponse {
        let mut response = EventResponse {
            suppress_context_menu: button == MouseButton::Right,
            ..EventResponse::default()
        };
        if self.held.is_some_and(|held| held != button) {
            return response;
        }
        if let Some(stroke) = self.in_progress.take() {
            log::debug!("stroke finalized with {} points", stroke.len());
            store.add(stroke);
            response.redraw = true;
        }
        if self.drag != DragKind::None {
            response.redraw = true;
        }
        self.reset_gesture();
        response
    }

    /// Rotate the selected widget one step in the direction of `delta_y`.
    pub fn wheel(&mut self, store: &mut ItemStore, delta_y: f64) -> EventResponse {
        if delta_y == 0.0 {
            return EventResponse::default();
        }
        let Some(id) = store.selected_id() else {
            return EventResponse::default();
        };
        let step = self.config.wheel_step * delta_y.signum();
        let redraw = match store.widget_mut(id) {
            Some(widget) => {
                widget.angle += step;
                true
            }
            None => false,
        };
        EventResponse {
            redraw,
            ..EventResponse::default()
        }
    }

    /// Abandon the current gesture without touching the store.
    pub fn cancel(&mut self) -> EventResponse {
        let redraw = self.in_progress.is_some();
        self.reset_gesture();
        EventResponse {
            redraw,
            ..EventResponse::default()
        }
    }

    fn reset_gesture(&mut self) {
        self.drag = DragKind::None;
        self.active = None;
        self.pivot_lock = None;
        self.held = None;
        self.in_progress = None;
        self.snap_hit = None;
    }

    fn snapped(&mut self, store: &ItemStore, state: &AppState, cursor: Point) -> Point {
        if !state.snap_enabled {
            return cursor;
        }
        self.snap_hit = resolve_snap_hit(cursor, store.items(), self.config.snap_threshold);
        self.snap_hit.map_or(cursor, |hit| hit.point)
    }

    /// Turn the compass about the locked needle by the cursor's sweep and
    /// record where the pencil lands.
    fn trace_arc(&mut self, store: &mut ItemStore, id: ItemId, last: Point, cursor: Point) -> bool {
        let Some(pivot) = self.pivot_lock else {
            return false;
        };
        let spread = self.config.compass_spread;
        let Some(widget) = store.widget_mut(id) else {
            return false;
        };
        let WidgetKind::Compass { height } = widget.kind else {
            return false;
        };

        // The bearing is undefined on the needle itself.
        if cursor.distance(pivot) < f64::EPSILON || last.distance(pivot) < f64::EPSILON {
            return false;
        }
        let delta = signed_angle_delta(bearing_degrees(pivot, last), bearing_degrees(pivot, cursor));
        widget.angle += delta;
        widget.position = geometry::compass_hinge_for_needle(pivot, height, spread, widget.angle_radians());

        if let (Some(marks), Some(stroke)) = (compass_landmarks(widget, spread), &mut self.in_progress) {
            stroke.add_point(marks.pencil_tip);
        }
        true
    }
}
