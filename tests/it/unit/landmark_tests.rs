//! Unit tests for landmark overlays and hit testing under a transform.

use crate::helpers::{VIEWER_SIZE, landmarks_json, standard_collection};
use engraving_atlas::catalog::{Catalog, load_all};
use engraving_atlas::geometry::Point;
use engraving_atlas::landmarks::{Category, CategoryFilter, LandmarkDb, LandmarkOverlay};
use engraving_atlas::viewport::{ImageViewport, RawInput, StyleRecorder};
use std::time::Instant;

fn fixtures() -> (Catalog, LandmarkDb) {
    let collection = standard_collection();
    let source = collection.memory();
    let catalog = Catalog::from(load_all(&source, &collection.ids()));
    let db = LandmarkDb::load(&source).unwrap();
    (catalog, db)
}

fn open_viewport() -> ImageViewport<StyleRecorder> {
    let mut viewport = ImageViewport::new(StyleRecorder::default());
    viewport.open("engravings/steel_engraving__0001.jpg", "Public Landing", VIEWER_SIZE);
    viewport
}

#[test]
fn test_overlay_skips_unknown_landmarks() {
    let (catalog, db) = fixtures();
    let overlay = LandmarkOverlay::build(catalog.get("steel_engraving_0001").unwrap(), &db);

    assert_eq!(overlay.markers().len(), 1);
    assert_eq!(overlay.markers()[0].landmark_id, "roebling");
    assert_eq!(overlay.markers()[0].category, Category::Bridge);
    assert_eq!(overlay.markers()[0].position, Point::new(40.0, 20.0));
}

#[test]
fn test_marker_hit_at_identity() {
    let (catalog, db) = fixtures();
    let overlay = LandmarkOverlay::build(catalog.get("steel_engraving_0001").unwrap(), &db);
    let viewport = open_viewport();

    // 40% of 800 and 20% of 600
    let screen = viewport.image_percent_to_screen(Point::new(40.0, 20.0));
    assert_eq!(screen, Point::new(320.0, 120.0));

    let percent = viewport.screen_to_image_percent(Point::new(322.0, 121.0)).unwrap();
    assert_eq!(overlay.hit_test(percent).unwrap().landmark_id, "roebling");

    let far = viewport.screen_to_image_percent(Point::new(600.0, 500.0)).unwrap();
    assert!(overlay.hit_test(far).is_none());
}

#[test]
fn test_marker_follows_image_when_zoomed() {
    let (catalog, db) = fixtures();
    let overlay = LandmarkOverlay::build(catalog.get("steel_engraving_0001").unwrap(), &db);
    let mut viewport = open_viewport();
    let now = Instant::now();

    for _ in 0..4 {
        viewport.handle(
            &RawInput::Wheel {
                position: Point::new(200.0, 150.0),
                delta_y: -120.0,
            },
            now,
        );
    }
    assert!(viewport.state().zoom() > 1.0);

    let screen = viewport.image_percent_to_screen(Point::new(40.0, 20.0));
    assert_ne!(screen, Point::new(320.0, 120.0));
    let percent = viewport.screen_to_image_percent(screen).unwrap();
    assert!((percent.x - 40.0).abs() < 1e-9 && (percent.y - 20.0).abs() < 1e-9);
    assert_eq!(overlay.hit_test(percent).unwrap().landmark_id, "roebling");

    // The old identity position no longer lies over the marker
    let stale = viewport.screen_to_image_percent(Point::new(320.0, 120.0)).unwrap();
    assert!(overlay.hit_test(stale).is_none());
}

#[test]
fn test_hidden_or_filtered_markers_are_not_hit() {
    let (catalog, db) = fixtures();
    let mut overlay = LandmarkOverlay::build(catalog.get("steel_engraving_0001").unwrap(), &db);
    let on_marker = Point::new(40.0, 20.0);

    overlay.set_filter(CategoryFilter::parse("government"));
    assert!(overlay.hit_test(on_marker).is_none());
    assert_eq!(overlay.visible_markers().count(), 0);

    overlay.set_filter(CategoryFilter::parse("all"));
    assert!(!overlay.toggle());
    assert_eq!(overlay.toggle_label(), "Show Landmarks");
    assert!(overlay.hit_test(on_marker).is_none());

    assert!(overlay.toggle());
    assert!(overlay.hit_test(on_marker).is_some());
}

#[test]
fn test_database_accepts_wrapped_form() {
    let wrapped = serde_json::json!({ "landmarks": landmarks_json() }).to_string();
    let db = LandmarkDb::from_json(&wrapped).unwrap();
    assert_eq!(db.len(), 2);
    assert!(db.get("courthouse").is_some());
}
