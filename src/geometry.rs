//! Coordinate conversion utilities for the image viewer.
//!
//! Screen points are measured from the top-left corner of the zoom container.
//! The displayed image exactly fills the container at zoom 1, and the CSS
//! transform is applied around the container centre, so a screen point `s`
//! and an unscaled image point `q` (both relative to the centre) satisfy
//! `s = translate + zoom * q`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point or vector in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Size of the zoom container in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Context needed for coordinate conversions
pub struct CoordinateContext {
    pub translate: Point,
    pub zoom: f64,
    pub container: Size,
}

impl CoordinateContext {
    #[inline]
    pub fn new(translate: Point, zoom: f64, container: Size) -> Self {
        Self {
            translate,
            zoom,
            container,
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a container point to centre-relative coordinates
    #[inline]
    pub fn to_centered(screen_pos: Point, container: Size) -> Point {
        screen_pos - container.center()
    }

    /// Convert a screen position to an unscaled image position (centre-relative)
    #[inline]
    pub fn screen_to_image(screen_pos: Point, ctx: &CoordinateContext) -> Point {
        let centered = Self::to_centered(screen_pos, ctx.container);
        (centered - ctx.translate) * (1.0 / ctx.zoom)
    }

    /// Convert an unscaled image position (centre-relative) to a screen position
    #[inline]
    pub fn image_to_screen(image_pos: Point, ctx: &CoordinateContext) -> Point {
        ctx.translate + image_pos * ctx.zoom + ctx.container.center()
    }

    /// Convert a screen position to image percentages (0..100 on each axis).
    ///
    /// Returns `None` for an empty container.
    pub fn screen_to_percent(screen_pos: Point, ctx: &CoordinateContext) -> Option<Point> {
        if ctx.container.is_empty() {
            return None;
        }
        let image = Self::screen_to_image(screen_pos, ctx) + ctx.container.center();
        Some(Point::new(
            image.x / ctx.container.width * 100.0,
            image.y / ctx.container.height * 100.0,
        ))
    }

    /// Convert image percentages to a screen position
    pub fn percent_to_screen(percent: Point, ctx: &CoordinateContext) -> Point {
        let image = Point::new(
            percent.x / 100.0 * ctx.container.width,
            percent.y / 100.0 * ctx.container.height,
        ) - ctx.container.center();
        Self::image_to_screen(image, ctx)
    }
}
