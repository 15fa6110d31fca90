//! Unit tests for the transform reconciler and input normalizer.

use engraving_atlas::constants::{MAX_ZOOM, MIN_ZOOM, PINCH_COOLDOWN, PINCH_MAX_ZOOM, TAP_ZOOM};
use engraving_atlas::geometry::{CoordinateContext, CoordinateConverter, Point, Size};
use engraving_atlas::viewport::{
    InputNormalizer, RawInput, TransformReconciler, ViewportIntent, ViewportState, ZoomDirection,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

const CONTAINER: Size = Size::new(800.0, 600.0);
const EPS: f64 = 1e-9;

fn image_point_under(state: &ViewportState, screen: Point) -> Point {
    let ctx = CoordinateContext::new(state.translate(), state.zoom(), CONTAINER);
    CoordinateConverter::screen_to_image(screen, &ctx)
}

fn random_point(rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(0.0..CONTAINER.width),
        rng.gen_range(0.0..CONTAINER.height),
    )
}

// ============================================================================
// Wheel zoom
// ============================================================================

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut state = ViewportState::new();
    let cursors = [
        Point::new(400.0, 300.0),
        Point::new(120.0, 80.0),
        Point::new(700.0, 550.0),
        Point::new(5.0, 590.0),
    ];

    for cursor in cursors {
        for direction in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out] {
            let before = image_point_under(&state, cursor);
            let old_zoom = state.zoom();
            reconciler.apply(&mut state, ViewportIntent::ZoomAt(cursor, direction));
            if state.zoom() == MIN_ZOOM || state.zoom() == old_zoom {
                continue;
            }
            let after = image_point_under(&state, cursor);
            assert!(
                (before.x - after.x).abs() < EPS && (before.y - after.y).abs() < EPS,
                "image point moved from {before:?} to {after:?} at {cursor:?}"
            );
        }
    }
}

#[test]
fn test_wheel_zoom_out_to_fit_resets_translation() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut state = ViewportState::new();
    let corner = Point::new(50.0, 50.0);
    reconciler.apply(&mut state, ViewportIntent::ZoomAt(corner, ZoomDirection::In));
    assert!(state.translate() != Point::ZERO);

    for _ in 0..5 {
        reconciler.apply(&mut state, ViewportIntent::ZoomAt(corner, ZoomDirection::Out));
    }
    assert_eq!(state.zoom(), MIN_ZOOM);
    assert_eq!(state.translate(), Point::ZERO);
}

#[test]
fn test_wheel_zoom_saturates_at_max() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut state = ViewportState::new();
    for _ in 0..40 {
        reconciler.apply(&mut state, ViewportIntent::ZoomAt(CONTAINER.center(), ZoomDirection::In));
    }
    assert_eq!(state.zoom(), MAX_ZOOM);
    assert!(!reconciler.apply(
        &mut state,
        ViewportIntent::ZoomAt(CONTAINER.center(), ZoomDirection::In)
    ));
}

// ============================================================================
// Pinch
// ============================================================================

#[test]
fn test_pinch_doubling_distance_doubles_zoom() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut state = ViewportState::new();
    reconciler.apply(&mut state, ViewportIntent::PinchStart(100.0));
    reconciler.apply(&mut state, ViewportIntent::PinchMove(200.0));
    assert!((state.zoom() - 2.0).abs() < EPS);

    reconciler.apply(&mut state, ViewportIntent::PinchMove(10_000.0));
    assert_eq!(state.zoom(), PINCH_MAX_ZOOM);

    reconciler.apply(&mut state, ViewportIntent::PinchEnd);
    assert!(!state.is_pinching());
}

#[test]
fn test_pinch_returns_to_initial_zoom_without_drift() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut state = ViewportState::new();
    reconciler.apply(&mut state, ViewportIntent::TapZoom(CONTAINER.center()));
    let initial = state.zoom();

    reconciler.apply(&mut state, ViewportIntent::PinchStart(100.0));
    for distance in [200.0, 50.0, 300.0, 100.0, 170.0, 20.0, 100.0] {
        reconciler.apply(&mut state, ViewportIntent::PinchMove(distance));
    }
    assert_eq!(state.zoom(), initial);
}

#[test]
fn test_steps_after_pinch_never_move_against_direction() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut state = ViewportState::new();
    reconciler.apply(&mut state, ViewportIntent::PinchStart(100.0));
    reconciler.apply(&mut state, ViewportIntent::PinchMove(700.0));
    reconciler.apply(&mut state, ViewportIntent::PinchEnd);
    assert_eq!(state.zoom(), 7.0);

    let center = CONTAINER.center();
    assert!(!reconciler.apply(&mut state, ViewportIntent::ZoomAt(center, ZoomDirection::In)));
    assert!(!reconciler.step_zoom(&mut state, ZoomDirection::In));
    assert_eq!(state.zoom(), 7.0);

    assert!(reconciler.apply(&mut state, ViewportIntent::ZoomAt(center, ZoomDirection::Out)));
    let after_wheel = state.zoom();
    assert!(after_wheel < 7.0 && after_wheel > MAX_ZOOM);

    assert!(reconciler.step_zoom(&mut state, ZoomDirection::Out));
    assert!(state.zoom() < after_wheel);
}

#[test]
fn test_pinch_with_zero_start_distance_is_ignored() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut state = ViewportState::new();
    reconciler.apply(&mut state, ViewportIntent::PinchStart(0.0));
    assert!(!reconciler.apply(&mut state, ViewportIntent::PinchMove(150.0)));
    assert_eq!(state.zoom(), MIN_ZOOM);
}

// ============================================================================
// Tap
// ============================================================================

#[test]
fn test_tap_twice_returns_to_identity() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut state = ViewportState::new();
    let tap = Point::new(200.0, 150.0);

    reconciler.apply(&mut state, ViewportIntent::TapZoom(tap));
    assert_eq!(state.zoom(), TAP_ZOOM);
    let expected = (CONTAINER.center() - tap) * (TAP_ZOOM - 1.0);
    assert_eq!(state.translate(), expected);

    reconciler.apply(&mut state, ViewportIntent::TapZoom(tap));
    assert!(state.is_identity());
}

// ============================================================================
// Bounds property
// ============================================================================

#[test]
fn test_zoom_stays_in_bounds_for_random_intent_sequences() {
    let reconciler = TransformReconciler::new(CONTAINER);

    for seed in 0..50u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = ViewportState::new();

        for _ in 0..200 {
            let point = random_point(&mut rng);
            let intent = match rng.gen_range(0..9) {
                0 => ViewportIntent::ZoomAt(point, ZoomDirection::In),
                1 => ViewportIntent::ZoomAt(point, ZoomDirection::Out),
                2 => ViewportIntent::TapZoom(point),
                3 => ViewportIntent::PanStart(point),
                4 => ViewportIntent::PanMove(point),
                5 => ViewportIntent::PanEnd,
                6 => ViewportIntent::PinchStart(rng.gen_range(0.0..400.0)),
                7 => ViewportIntent::PinchMove(rng.gen_range(0.0..800.0)),
                _ => ViewportIntent::PinchEnd,
            };
            reconciler.apply(&mut state, intent);

            // Pinch may go past the wheel limit; nothing goes past the pinch limit
            assert!(
                state.zoom() >= MIN_ZOOM && state.zoom() <= PINCH_MAX_ZOOM,
                "seed {seed}: zoom {} out of range",
                state.zoom()
            );
            if state.zoom() <= MIN_ZOOM {
                assert_eq!(state.translate(), Point::ZERO, "seed {seed}: translated at fit zoom");
            }
        }
    }
}

#[test]
fn test_wheel_and_tap_never_exceed_max_zoom() {
    let reconciler = TransformReconciler::new(CONTAINER);
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = ViewportState::new();
    for _ in 0..500 {
        let point = random_point(&mut rng);
        let intent = match rng.gen_range(0..3) {
            0 => ViewportIntent::ZoomAt(point, ZoomDirection::In),
            1 => ViewportIntent::ZoomAt(point, ZoomDirection::Out),
            _ => ViewportIntent::TapZoom(point),
        };
        reconciler.apply(&mut state, intent);
        assert!(state.zoom() >= MIN_ZOOM && state.zoom() <= MAX_ZOOM);
    }
}

// ============================================================================
// Normalizer
// ============================================================================

#[test]
fn test_single_touch_ignored_until_cooldown_after_pinch() {
    let mut normalizer = InputNormalizer::new();
    let start = Instant::now();
    let a = Point::new(100.0, 100.0);
    let b = Point::new(300.0, 100.0);

    normalizer.normalize(&RawInput::TouchStart { touches: vec![a, b] }, start);
    assert_eq!(
        normalizer.normalize(&RawInput::TouchEnd { touches: vec![] }, start),
        vec![ViewportIntent::PinchEnd]
    );

    let soon = start + PINCH_COOLDOWN / 2;
    assert!(normalizer
        .normalize(&RawInput::TouchStart { touches: vec![a] }, soon)
        .is_empty());

    let later = start + PINCH_COOLDOWN + Duration::from_millis(1);
    assert_eq!(
        normalizer.normalize(&RawInput::TouchStart { touches: vec![a] }, later),
        vec![ViewportIntent::PanStart(a)]
    );
}
