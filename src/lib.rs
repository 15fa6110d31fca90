//! Headless core of a historical-map viewer for archival engravings.
//!
//! A filterable list of items, a map with modern and historical tile layers,
//! and a full-screen image viewer with pan/zoom gestures and landmark
//! annotations. The front-end renders; this crate owns the state and the
//! algorithms behind it.

pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod imaging;
pub mod landmarks;
pub mod map;
pub mod notifications;
pub mod preferences;
pub mod preload;
pub mod routing;
pub mod viewport;
