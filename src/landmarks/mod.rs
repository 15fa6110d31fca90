//! Landmark database and annotation overlays
//!
//! `data/landmarks.json` maps landmark ids to descriptive records. Each
//! engraving references landmarks by id with a position in image
//! percentages; the overlay resolves those references into markers and
//! answers hit tests against them.

mod authoring;
mod hit_index;
mod model;
mod overlay;

pub use authoring::CoordinateCapture;
pub use hit_index::{HitEntry, HitIndex};
pub use model::*;
pub use overlay::*;
