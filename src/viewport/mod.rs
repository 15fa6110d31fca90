//! Pan/zoom handling for the full-screen image viewer.
//!
//! ## Architecture
//!
//! Mouse-wheel, drag and two-finger pinch input are reconciled into one
//! continuous transform in four stages:
//!
//! - `input` - raw events to modality-independent intents
//! - `reconciler` - intents folded into the state, enforcing zoom bounds
//! - `state` - zoom, translation and the gesture state machine
//! - `render` - the resulting CSS transform and cursor pushed to a surface
//!
//! `controller` owns all four for the lifetime of the image modal.

mod controller;
mod input;
mod reconciler;
mod render;
mod state;

pub use controller::{ImageViewport, OpenImage};
pub use input::{InputNormalizer, RawInput, ViewportIntent, ZoomDirection};
pub use reconciler::TransformReconciler;
pub use render::{sync, CursorAffordance, RenderSurface, StyleRecorder, Transform};
pub use state::{GestureState, PinchSession, ViewportState};
