//! Unit tests for engraving-atlas.

mod landmark_tests;
mod snapshot_tests;
mod viewport_tests;
