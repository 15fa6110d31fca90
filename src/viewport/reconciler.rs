//! Transform reconciler - folds normalized intents into the viewport state.
//!
//! Every zoom value is clamped before it is stored:
//! - wheel, button and tap zoom stay within `[MIN_ZOOM, MAX_ZOOM]`
//! - pinch zoom stays within `[PINCH_MIN_ZOOM, PINCH_MAX_ZOOM]`
//!
//! Any operation that lands on `MIN_ZOOM` also clears the translation.

use super::input::{ViewportIntent, ZoomDirection};
use super::state::{GestureState, PinchSession, ViewportState};
use crate::constants::{
    BUTTON_ZOOM_STEP, MAX_ZOOM, MIN_ZOOM, PINCH_MAX_ZOOM, PINCH_MIN_ZOOM, TAP_ZOOM, WHEEL_ZOOM_IN,
    WHEEL_ZOOM_OUT,
};
use crate::geometry::{CoordinateConverter, Point, Size};
use tracing::debug;

/// Applies intents to a `ViewportState` for a container of a given size.
#[derive(Debug, Clone, Copy)]
pub struct TransformReconciler {
    container: Size,
}

impl TransformReconciler {
    pub fn new(container: Size) -> Self {
        Self { container }
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn set_container(&mut self, container: Size) {
        self.container = container;
    }

    /// Apply one intent. Returns true if the visible transform changed.
    pub fn apply(&self, state: &mut ViewportState, intent: ViewportIntent) -> bool {
        match intent {
            ViewportIntent::PanStart(anchor) => {
                if state.is_pannable() {
                    state.gesture = GestureState::Panning { anchor };
                }
                false
            }
            ViewportIntent::PanMove(current) => self.pan(state, current),
            ViewportIntent::PanEnd => {
                if state.is_dragging() {
                    state.gesture = GestureState::Idle;
                }
                false
            }
            ViewportIntent::ZoomAt(cursor, direction) => self.wheel_zoom(state, cursor, direction),
            ViewportIntent::PinchStart(distance) => {
                state.gesture = GestureState::Pinching(PinchSession {
                    initial_distance: distance,
                    initial_zoom: state.zoom,
                });
                false
            }
            ViewportIntent::PinchMove(distance) => self.pinch(state, distance),
            ViewportIntent::PinchEnd => {
                if state.is_pinching() {
                    state.gesture = GestureState::Idle;
                }
                false
            }
            ViewportIntent::TapZoom(point) => self.tap_zoom(state, point),
        }
    }

    /// translation += current - anchor, only while zoomed in
    fn pan(&self, state: &mut ViewportState, current: Point) -> bool {
        let Some(anchor) = state.drag_anchor() else {
            return false;
        };
        if !state.is_pannable() {
            return false;
        }
        let delta = current - anchor;
        state.translate = state.translate + delta;
        state.gesture = GestureState::Panning { anchor: current };
        delta != Point::ZERO
    }

    /// Zoom by a fixed factor while keeping the image point under the cursor
    /// at the same screen position.
    fn wheel_zoom(&self, state: &mut ViewportState, cursor: Point, direction: ZoomDirection) -> bool {
        let factor = match direction {
            ZoomDirection::In => WHEEL_ZOOM_IN,
            ZoomDirection::Out => WHEEL_ZOOM_OUT,
        };
        let old_zoom = state.zoom;
        let new_zoom = (old_zoom * factor).clamp(MIN_ZOOM, step_ceiling(old_zoom));
        if new_zoom == old_zoom {
            return false;
        }
        let cursor = CoordinateConverter::to_centered(cursor, self.container);
        let translate = cursor - (cursor - state.translate) * (new_zoom / old_zoom);
        state.set_transform(new_zoom, translate);
        debug!(zoom = new_zoom, "wheel zoom");
        true
    }

    /// Scale relative to the distance captured at gesture start
    fn pinch(&self, state: &mut ViewportState, distance: f64) -> bool {
        let Some(session) = state.pinch_session() else {
            return false;
        };
        if session.initial_distance <= 0.0 {
            return false;
        }
        let new_zoom = (session.initial_zoom * (distance / session.initial_distance))
            .clamp(PINCH_MIN_ZOOM, PINCH_MAX_ZOOM);
        if new_zoom == state.zoom {
            return false;
        }
        state.set_transform(new_zoom, state.translate);
        true
    }

    /// Toggle between the fitted view and `TAP_ZOOM` anchored on the tap point
    fn tap_zoom(&self, state: &mut ViewportState, point: Point) -> bool {
        state.gesture = GestureState::Idle;
        if state.is_pannable() {
            state.reset();
        } else {
            let zoom = TAP_ZOOM.clamp(MIN_ZOOM, MAX_ZOOM);
            let translate = (self.container.center() - point) * (zoom - 1.0);
            state.set_transform(zoom, translate);
        }
        debug!(zoom = state.zoom, "tap zoom");
        true
    }

    /// Zoom in or out by the button step, keeping the current translation
    pub fn step_zoom(&self, state: &mut ViewportState, direction: ZoomDirection) -> bool {
        let old_zoom = state.zoom;
        let new_zoom = match direction {
            ZoomDirection::In => old_zoom * BUTTON_ZOOM_STEP,
            ZoomDirection::Out => old_zoom / BUTTON_ZOOM_STEP,
        }
        .clamp(MIN_ZOOM, step_ceiling(old_zoom));
        if new_zoom == old_zoom {
            return false;
        }
        state.set_transform(new_zoom, state.translate);
        true
    }

    /// Back to zoom 1 with no translation
    pub fn reset(&self, state: &mut ViewportState) -> bool {
        let changed = !state.is_identity();
        state.reset();
        changed
    }
}

/// Upper bound for wheel and button steps. A pinch may leave zoom above
/// `MAX_ZOOM`; a step from there must not jump back down to it.
fn step_ceiling(old_zoom: f64) -> f64 {
    MAX_ZOOM.max(old_zoom)
}
