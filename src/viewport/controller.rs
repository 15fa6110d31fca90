//! Image viewport controller - wires normalizer, reconciler and surface together
//! for the lifetime of the full-screen image modal.

use super::input::{InputNormalizer, RawInput, ZoomDirection};
use super::reconciler::TransformReconciler;
use super::render::{self, RenderSurface};
use super::state::ViewportState;
use crate::geometry::{CoordinateContext, CoordinateConverter, Point, Size};
use std::time::Instant;
use tracing::{debug, warn};

/// The image currently shown in the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenImage {
    pub src: String,
    pub title: String,
}

pub struct ImageViewport<S: RenderSurface> {
    state: ViewportState,
    normalizer: InputNormalizer,
    reconciler: TransformReconciler,
    surface: S,
    image: Option<OpenImage>,
}

impl<S: RenderSurface> ImageViewport<S> {
    pub fn new(surface: S) -> Self {
        Self {
            state: ViewportState::new(),
            normalizer: InputNormalizer::new(),
            reconciler: TransformReconciler::new(Size::new(0.0, 0.0)),
            surface,
            image: None,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn image(&self) -> Option<&OpenImage> {
        self.image.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }

    /// Show an image. The viewport always starts at the identity transform.
    pub fn open(&mut self, src: impl Into<String>, title: impl Into<String>, container: Size) {
        let image = OpenImage {
            src: src.into(),
            title: title.into(),
        };
        debug!(src = %image.src, "opening image viewer");
        self.image = Some(image);
        self.reconciler.set_container(container);
        self.state.reset();
        self.normalizer.reset();
        render::sync(&self.state, &mut self.surface);
    }

    /// Hide the modal and discard the transform
    pub fn close(&mut self) {
        if self.image.take().is_some() {
            debug!("closing image viewer");
        }
        self.state.reset();
        self.normalizer.reset();
        render::sync(&self.state, &mut self.surface);
    }

    /// Container was resized (window resize, rotation)
    pub fn resize(&mut self, container: Size) {
        self.reconciler.set_container(container);
    }

    /// Feed one raw event. Returns true if the transform changed.
    pub fn handle(&mut self, input: &RawInput, now: Instant) -> bool {
        if !self.is_open() {
            return false;
        }
        if self.reconciler.container().is_empty() {
            warn!("image container has no size, ignoring input");
            return false;
        }
        let intents = self.normalizer.normalize(input, now);
        if intents.is_empty() {
            return false;
        }
        let mut changed = false;
        for intent in intents {
            changed |= self.reconciler.apply(&mut self.state, intent);
        }
        render::sync(&self.state, &mut self.surface);
        changed
    }

    /// The zoom-in / zoom-out buttons
    pub fn zoom_step(&mut self, direction: ZoomDirection) -> bool {
        if !self.is_open() {
            return false;
        }
        let changed = self.reconciler.step_zoom(&mut self.state, direction);
        if changed {
            render::sync(&self.state, &mut self.surface);
        }
        changed
    }

    /// Explicit reset control
    pub fn reset(&mut self) -> bool {
        let changed = self.reconciler.reset(&mut self.state);
        render::sync(&self.state, &mut self.surface);
        changed
    }

    /// Map a container point to image percentages under the current transform
    pub fn screen_to_image_percent(&self, screen: Point) -> Option<Point> {
        let ctx = CoordinateContext::new(
            self.state.translate(),
            self.state.zoom(),
            self.reconciler.container(),
        );
        CoordinateConverter::screen_to_percent(screen, &ctx)
    }

    /// Map image percentages to a container point under the current transform
    pub fn image_percent_to_screen(&self, percent: Point) -> Point {
        let ctx = CoordinateContext::new(
            self.state.translate(),
            self.state.zoom(),
            self.reconciler.container(),
        );
        CoordinateConverter::percent_to_screen(percent, &ctx)
    }
}
