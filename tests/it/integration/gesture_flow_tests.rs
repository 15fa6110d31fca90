//! Raw pointer and touch sequences through `ImageViewport`, checked against
//! the style the surface ends up with.

use crate::helpers::VIEWER_SIZE;
use engraving_atlas::constants::{MAX_ZOOM, PINCH_COOLDOWN, PINCH_MAX_ZOOM};
use engraving_atlas::geometry::Point;
use engraving_atlas::viewport::{CursorAffordance, ImageViewport, RawInput, StyleRecorder};
use std::time::{Duration, Instant};

fn viewer() -> ImageViewport<StyleRecorder> {
    let mut viewport = ImageViewport::new(StyleRecorder::default());
    viewport.open("engravings/steel_engraving__0001.jpg", "Public Landing", VIEWER_SIZE);
    viewport
}

fn transform(viewport: &ImageViewport<StyleRecorder>) -> &str {
    viewport.surface().transform.as_deref().unwrap_or_default()
}

fn cursor(viewport: &ImageViewport<StyleRecorder>) -> Option<CursorAffordance> {
    viewport.surface().cursor
}

fn down(x: f64, y: f64) -> RawInput {
    RawInput::PointerDown {
        position: Point::new(x, y),
    }
}

fn moved(x: f64, y: f64) -> RawInput {
    RawInput::PointerMove {
        position: Point::new(x, y),
    }
}

fn up(x: f64, y: f64) -> RawInput {
    RawInput::PointerUp {
        position: Point::new(x, y),
    }
}

fn touches(points: &[(f64, f64)]) -> Vec<Point> {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn test_click_drag_pinch_close() {
    let mut viewport = viewer();
    let now = Instant::now();
    assert_eq!(transform(&viewport), "translate(0px, 0px) scale(1)");
    assert_eq!(cursor(&viewport), Some(CursorAffordance::Default));

    // Click in the centre zooms in without moving the centre
    viewport.handle(&down(400.0, 300.0), now);
    assert!(viewport.handle(&up(400.0, 300.0), now));
    assert_eq!(transform(&viewport), "translate(0px, 0px) scale(2.5)");
    assert_eq!(cursor(&viewport), Some(CursorAffordance::Grab));

    // Drag pans by the pointer delta
    viewport.handle(&down(400.0, 300.0), now);
    assert_eq!(cursor(&viewport), Some(CursorAffordance::Grabbing));
    assert!(viewport.handle(&moved(450.0, 320.0), now));
    viewport.handle(&up(450.0, 320.0), now);
    assert_eq!(transform(&viewport), "translate(50px, 20px) scale(2.5)");
    assert_eq!(cursor(&viewport), Some(CursorAffordance::Grab));

    // Pinch scales relative to the starting distance and keeps the pan
    viewport.handle(
        &RawInput::TouchStart {
            touches: touches(&[(300.0, 300.0), (400.0, 300.0)]),
        },
        now,
    );
    viewport.handle(
        &RawInput::TouchMove {
            touches: touches(&[(250.0, 300.0), (450.0, 300.0)]),
        },
        now,
    );
    assert_eq!(transform(&viewport), "translate(50px, 20px) scale(5)");
    viewport.handle(
        &RawInput::TouchMove {
            touches: touches(&[(0.0, 300.0), (800.0, 300.0)]),
        },
        now,
    );
    assert_eq!(viewport.state().zoom(), PINCH_MAX_ZOOM);
    viewport.handle(&RawInput::TouchEnd { touches: vec![] }, now);
    assert!(!viewport.state().is_pinching());

    // A stray finger right after the pinch is ignored
    let soon = now + Duration::from_millis(50);
    assert!(!viewport.handle(
        &RawInput::TouchStart {
            touches: touches(&[(100.0, 100.0)]),
        },
        soon,
    ));
    assert!(!viewport.state().is_dragging());

    viewport.close();
    assert!(!viewport.is_open());
    assert_eq!(transform(&viewport), "translate(0px, 0px) scale(1)");
    assert_eq!(cursor(&viewport), Some(CursorAffordance::Default));
    assert!(!viewport.handle(&down(10.0, 10.0), now));
}

#[test]
fn test_drag_at_fit_zoom_does_nothing() {
    let mut viewport = viewer();
    let now = Instant::now();

    viewport.handle(&down(100.0, 100.0), now);
    assert!(!viewport.handle(&moved(300.0, 200.0), now));
    assert!(!viewport.handle(&up(300.0, 200.0), now));
    assert!(viewport.state().is_identity());
    assert_eq!(cursor(&viewport), Some(CursorAffordance::Default));
}

#[test]
fn test_wheel_zoom_anchors_on_cursor() {
    let mut viewport = viewer();
    let now = Instant::now();
    let cursor_at = Point::new(200.0, 150.0);
    let under_before = viewport.screen_to_image_percent(cursor_at).unwrap();

    for _ in 0..30 {
        viewport.handle(
            &RawInput::Wheel {
                position: cursor_at,
                delta_y: -100.0,
            },
            now,
        );
    }
    assert_eq!(viewport.state().zoom(), MAX_ZOOM);
    let under_after = viewport.screen_to_image_percent(cursor_at).unwrap();
    assert!((under_before.x - under_after.x).abs() < 1e-6);
    assert!((under_before.y - under_after.y).abs() < 1e-6);

    // Zero delta is not a zoom
    assert!(!viewport.handle(
        &RawInput::Wheel {
            position: cursor_at,
            delta_y: 0.0,
        },
        now,
    ));

    for _ in 0..30 {
        viewport.handle(
            &RawInput::Wheel {
                position: cursor_at,
                delta_y: 100.0,
            },
            now,
        );
    }
    assert!(viewport.state().is_identity());
}

#[test]
fn test_touch_tap_toggles_zoom_after_cooldown() {
    let mut viewport = viewer();
    let start = Instant::now();
    let finger = touches(&[(200.0, 150.0)]);

    viewport.handle(&RawInput::TouchStart { touches: finger.clone() }, start);
    assert!(viewport.handle(&RawInput::TouchEnd { touches: vec![] }, start));
    assert_eq!(viewport.state().zoom(), 2.5);

    // Two-finger touch, then a tap once the cooldown has passed
    viewport.handle(
        &RawInput::TouchStart {
            touches: touches(&[(300.0, 300.0), (500.0, 300.0)]),
        },
        start,
    );
    viewport.handle(&RawInput::TouchEnd { touches: vec![] }, start);

    let later = start + PINCH_COOLDOWN + Duration::from_millis(1);
    viewport.handle(&RawInput::TouchStart { touches: finger }, later);
    assert!(viewport.handle(&RawInput::TouchEnd { touches: vec![] }, later));
    assert!(viewport.state().is_identity());
}
