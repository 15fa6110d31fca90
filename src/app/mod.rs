//! Application module - the viewer's top-level state and logic.
//!
//! This module is organized into several submodules:
//! - `state` - The AppContext struct definition and sub-structs
//! - `lifecycle` - Initialization, timers and card hover preloading
//! - `filters` - Search, date filter, layer switching and list cards
//! - `selection` - Item selection, image viewer, landmarks and hash routes
//! - `navigation` - Tabs, keyboard shortcuts and persisted sidebar settings

mod filters;
mod lifecycle;
mod navigation;
mod selection;
mod state;

pub use filters::ListCard;
pub use lifecycle::InitSummary;
pub use state::{AppContext, NavTab};

// Re-export sub-structs for use in other modules
pub use state::{DataState, NavigationState, ViewState, ViewerState};
