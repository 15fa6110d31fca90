//! Input normalizer - turns raw mouse, wheel and touch events into viewport intents.
//!
//! Mouse and single-finger touch share one pointer path. A press that is
//! released without travelling further than `TAP_SLOP` becomes a tap.
//!
//! Once two fingers are down, single-finger input is ignored until every
//! finger has lifted and `PINCH_COOLDOWN` has passed since the pinch ended.
//! Lifting fingers one at a time would otherwise start a pan from wherever
//! the remaining finger happens to be.

use crate::constants::{PINCH_COOLDOWN, TAP_SLOP};
use crate::geometry::Point;
use std::time::Instant;
use tracing::trace;

/// Direction of a discrete zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// A raw event as delivered by the host. Positions are container-relative.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    PointerLeave,
    /// Negative `delta_y` scrolls up, which zooms in
    Wheel { position: Point, delta_y: f64 },
    /// `touches` lists every finger still on the surface after the change
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd { touches: Vec<Point> },
}

/// Normalized, modality-independent intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportIntent {
    PanStart(Point),
    PanMove(Point),
    PanEnd,
    ZoomAt(Point, ZoomDirection),
    PinchStart(f64),
    PinchMove(f64),
    PinchEnd,
    TapZoom(Point),
}

/// Stateful translator from `RawInput` to `ViewportIntent`s.
#[derive(Debug, Default)]
pub struct InputNormalizer {
    /// Where the current press started
    press_origin: Option<Point>,
    /// Furthest the current press has travelled from its origin
    press_travel: f64,
    /// Latest position of the current press
    last_position: Option<Point>,
    /// A two-finger gesture is active
    pinching: bool,
    /// Single-finger input is ignored until all fingers lift
    suppress_single: bool,
    /// When the last pinch ended
    pinch_ended_at: Option<Instant>,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any gesture in progress
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True while single-finger input is being ignored
    pub fn is_suppressing(&self, now: Instant) -> bool {
        self.suppress_single || self.in_cooldown(now)
    }

    fn in_cooldown(&self, now: Instant) -> bool {
        self.pinch_ended_at
            .is_some_and(|ended| now.saturating_duration_since(ended) < PINCH_COOLDOWN)
    }

    /// Translate one raw event. Most events produce zero or one intent; a
    /// pinch interrupting a press produces the pan end first.
    pub fn normalize(&mut self, input: &RawInput, now: Instant) -> Vec<ViewportIntent> {
        let intents = match input {
            RawInput::PointerDown { position } => self.press(*position, now),
            RawInput::PointerMove { position } => self.drag(*position),
            RawInput::PointerUp { position } => self.release(*position),
            RawInput::PointerLeave => self.cancel_press(),
            RawInput::Wheel { position, delta_y } => {
                if *delta_y == 0.0 {
                    Vec::new()
                } else if *delta_y < 0.0 {
                    vec![ViewportIntent::ZoomAt(*position, ZoomDirection::In)]
                } else {
                    vec![ViewportIntent::ZoomAt(*position, ZoomDirection::Out)]
                }
            }
            RawInput::TouchStart { touches } => self.touch_start(touches, now),
            RawInput::TouchMove { touches } => self.touch_move(touches),
            RawInput::TouchEnd { touches } => self.touch_end(touches, now),
        };
        if !intents.is_empty() {
            trace!(?input, ?intents, "normalized input");
        }
        intents
    }

    fn press(&mut self, position: Point, now: Instant) -> Vec<ViewportIntent> {
        if self.pinching || self.is_suppressing(now) {
            return Vec::new();
        }
        self.press_origin = Some(position);
        self.press_travel = 0.0;
        self.last_position = Some(position);
        vec![ViewportIntent::PanStart(position)]
    }

    fn drag(&mut self, position: Point) -> Vec<ViewportIntent> {
        let Some(origin) = self.press_origin else {
            return Vec::new();
        };
        self.press_travel = self.press_travel.max(origin.distance(position));
        self.last_position = Some(position);
        vec![ViewportIntent::PanMove(position)]
    }

    fn release(&mut self, position: Point) -> Vec<ViewportIntent> {
        let Some(origin) = self.press_origin.take() else {
            return Vec::new();
        };
        let travel = self.press_travel.max(origin.distance(position));
        self.press_travel = 0.0;
        self.last_position = None;
        if travel <= TAP_SLOP {
            vec![ViewportIntent::TapZoom(position)]
        } else {
            vec![ViewportIntent::PanEnd]
        }
    }

    fn cancel_press(&mut self) -> Vec<ViewportIntent> {
        if self.press_origin.take().is_some() {
            self.press_travel = 0.0;
            self.last_position = None;
            vec![ViewportIntent::PanEnd]
        } else {
            Vec::new()
        }
    }

    fn touch_start(&mut self, touches: &[Point], now: Instant) -> Vec<ViewportIntent> {
        match touches {
            [a, b, ..] => {
                let mut intents = self.cancel_press();
                if !self.pinching {
                    self.pinching = true;
                    self.suppress_single = true;
                    intents.push(ViewportIntent::PinchStart(a.distance(*b)));
                }
                intents
            }
            [single] => self.press(*single, now),
            [] => Vec::new(),
        }
    }

    fn touch_move(&mut self, touches: &[Point]) -> Vec<ViewportIntent> {
        match touches {
            [a, b, ..] if self.pinching => vec![ViewportIntent::PinchMove(a.distance(*b))],
            [single] if !self.suppress_single => self.drag(*single),
            _ => Vec::new(),
        }
    }

    fn touch_end(&mut self, touches: &[Point], now: Instant) -> Vec<ViewportIntent> {
        let mut intents = Vec::new();
        if self.pinching && touches.len() < 2 {
            self.pinching = false;
            self.pinch_ended_at = Some(now);
            intents.push(ViewportIntent::PinchEnd);
        }
        if touches.is_empty() {
            if self.suppress_single {
                self.suppress_single = false;
            } else if let Some(lifted) = self.last_position.take() {
                // Touch end carries no position for the lifted finger
                intents.extend(self.release(lifted));
            }
        }
        intents
    }
}
