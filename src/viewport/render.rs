//! Render sync - pushes the reconciled transform to whatever displays the image.

use super::state::ViewportState;
use crate::geometry::Point;
use serde::Serialize;
use std::fmt;

/// Cursor affordance shown over the zoom container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorAffordance {
    /// Image fits its container; clicking zooms in
    Default,
    /// Zoomed in and idle, the image can be grabbed
    Grab,
    /// A pan drag is in progress
    Grabbing,
}

impl CursorAffordance {
    pub fn for_state(state: &ViewportState) -> Self {
        if state.is_dragging() {
            Self::Grabbing
        } else if state.is_pannable() {
            Self::Grab
        } else {
            Self::Default
        }
    }

    /// CSS `cursor` keyword
    pub fn css(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Translate-then-scale transform applied around the container centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub translate: Point,
    pub scale: f64,
}

impl Transform {
    pub fn from_state(state: &ViewportState) -> Self {
        Self {
            translate: state.translate(),
            scale: state.zoom(),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

/// Target of render updates. A DOM binding implements this on the image
/// element; tests use `StyleRecorder`.
pub trait RenderSurface {
    fn apply_transform(&mut self, transform: &Transform);
    fn set_cursor(&mut self, cursor: CursorAffordance);
}

/// Push the current state to a surface
pub fn sync<S: RenderSurface + ?Sized>(state: &ViewportState, surface: &mut S) {
    surface.apply_transform(&Transform::from_state(state));
    surface.set_cursor(CursorAffordance::for_state(state));
}

/// Surface that keeps the last applied style, the way an element's inline
/// style would.
#[derive(Debug, Clone, Default)]
pub struct StyleRecorder {
    pub transform: Option<String>,
    pub cursor: Option<CursorAffordance>,
    pub updates: usize,
}

impl RenderSurface for StyleRecorder {
    fn apply_transform(&mut self, transform: &Transform) {
        self.transform = Some(transform.to_string());
        self.updates += 1;
    }

    fn set_cursor(&mut self, cursor: CursorAffordance) {
        self.cursor = Some(cursor);
    }
}
