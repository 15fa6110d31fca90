//! Viewport state - the single source of truth for the image transform.
//!
//! The gesture in progress is an explicit state machine rather than a set of
//! booleans, so a pan and a pinch can never be active at the same time.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning      (pointer down while zoomed in)
//! Idle -> Pinching     (second finger lands)
//! Panning -> Pinching  (second finger lands mid-pan)
//!
//! Any -> Idle          (pointer up / pinch end / reset)
//! ```

use crate::constants::MIN_ZOOM;
use crate::geometry::Point;

/// Snapshot taken when a two-finger gesture begins.
///
/// The zoom for every later move is derived from these values, never from
/// the previous move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSession {
    /// Finger distance at gesture start
    pub initial_distance: f64,
    /// Zoom level at gesture start
    pub initial_zoom: f64,
}

/// Gesture currently driving the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,

    /// Dragging the zoomed image
    Panning {
        /// Last pointer position, in container coordinates
        anchor: Point,
    },

    /// Two-finger pinch zoom
    Pinching(PinchSession),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub(crate) zoom: f64,
    pub(crate) translate: Point,
    pub(crate) gesture: GestureState,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            translate: Point::ZERO,
            gesture: GestureState::Idle,
        }
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Returns true while a pan drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, GestureState::Panning { .. })
    }

    /// Returns true while a pinch is in progress
    pub fn is_pinching(&self) -> bool {
        matches!(self.gesture, GestureState::Pinching(_))
    }

    /// Anchor of the active pan, if any
    pub fn drag_anchor(&self) -> Option<Point> {
        match self.gesture {
            GestureState::Panning { anchor } => Some(anchor),
            _ => None,
        }
    }

    /// Active pinch session, if any
    pub fn pinch_session(&self) -> Option<PinchSession> {
        match self.gesture {
            GestureState::Pinching(session) => Some(session),
            _ => None,
        }
    }

    /// The image can only be panned while magnified
    pub fn is_pannable(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    /// True when the transform is the identity
    pub fn is_identity(&self) -> bool {
        self.zoom == MIN_ZOOM && self.translate == Point::ZERO
    }

    /// Set zoom and translation together. A zoom at (or below) the minimum
    /// always carries a zero translation.
    pub(crate) fn set_transform(&mut self, zoom: f64, translate: Point) {
        if zoom <= MIN_ZOOM {
            self.zoom = MIN_ZOOM;
            self.translate = Point::ZERO;
        } else {
            self.zoom = zoom;
            self.translate = translate;
        }
    }

    /// Back to the identity transform with no gesture in progress
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
