//! Single test binary entry point.
//!
//! All tests are compiled into one binary to keep linking to a single pass.
//!
//! Structure:
//! - helpers: fixture builders for collections and apps
//! - integration: Multi-component workflow tests
//! - unit: Single-component unit tests

mod helpers;
mod unit;
