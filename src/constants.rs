//! Application-wide constants.
//!
//! Centralizes magic numbers for the image viewer, map and UI timing so the
//! tuning values live in one place.

use std::time::Duration;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level (the image exactly fits its container)
pub const MIN_ZOOM: f64 = 1.0;

/// Maximum zoom level for wheel, button and tap zoom
pub const MAX_ZOOM: f64 = 5.0;

/// Wheel zoom-in multiplier
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Wheel zoom-out multiplier
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Multiplier for the +/- zoom buttons
pub const BUTTON_ZOOM_STEP: f64 = 1.5;

/// Fixed magnification used by tap-to-zoom
pub const TAP_ZOOM: f64 = 2.5;

/// Lower bound for pinch zoom
pub const PINCH_MIN_ZOOM: f64 = 1.0;

/// Upper bound for pinch zoom (wider than the wheel range)
pub const PINCH_MAX_ZOOM: f64 = 8.0;

/// Maximum pointer travel, in pixels, for a press to count as a tap
pub const TAP_SLOP: f64 = 8.0;

/// Ignore window after a pinch ends during which single touches do not pan
pub const PINCH_COOLDOWN: Duration = Duration::from_millis(300);

// ============================================================================
// Map
// ============================================================================

/// Default map centre (downtown Cincinnati)
pub const DEFAULT_MAP_CENTER: (f64, f64) = (39.1031, -84.5120);

/// Default map zoom
pub const DEFAULT_MAP_ZOOM: u8 = 12;

/// Zoom used when focusing a single item
pub const FOCUS_ZOOM: u8 = 15;

/// Padding applied on every side when fitting markers
pub const FIT_PADDING_PX: f64 = 20.0;

/// Fit-bounds never zooms closer than this
pub const FIT_MAX_ZOOM: u8 = 15;

/// Leaflet tile size
pub const TILE_SIZE: f64 = 256.0;

// ============================================================================
// Catalog & Filters
// ============================================================================

/// Earliest year the date slider can reach
pub const DATE_RANGE_MIN: i32 = 1835;

/// Latest year the date slider can reach
pub const DATE_RANGE_MAX: i32 = 1879;

/// Half width of the window selected by the date slider
pub const DATE_WINDOW_YEARS: i32 = 10;

/// Card descriptions are cut to this many characters
pub const CARD_DESCRIPTION_CHARS: usize = 100;

/// Number of metadata files shipped with the collection
pub const DEFAULT_ENGRAVING_COUNT: usize = 9;

// ============================================================================
// Landmark overlay
// ============================================================================

/// Marker hit box half-size, in image percent
pub const MARKER_HIT_RADIUS_PCT: f64 = 1.5;

// ============================================================================
// Timing & Persistence
// ============================================================================

/// Hover delay before an image preload starts
pub const PRELOAD_DEBOUNCE: Duration = Duration::from_millis(150);

/// How long an error banner stays on screen
pub const BANNER_DURATION: Duration = Duration::from_secs(5);

/// Maximum entries kept in the recently-viewed list
pub const MAX_RECENTLY_VIEWED: usize = 10;

// ============================================================================
// Derived images
// ============================================================================

/// Bounding box for generated thumbnails
pub const THUMBNAIL_MAX_SIZE: (u32, u32) = (400, 300);

/// JPEG quality for generated thumbnails
pub const THUMBNAIL_QUALITY: u8 = 85;
