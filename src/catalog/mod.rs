//! Engraving metadata: model, loading and filtering
//!
//! Each item lives in its own `metadata/<id>.json` file. The loader fetches
//! the whole list in parallel through a `MetadataSource` and keeps whatever
//! loaded; the filter functions derive the visible list from it.
//!
//! ## Error Handling
//!
//! Fetches return `CatalogResult<T>`. Common errors include:
//! - `NotFound`: the metadata file does not exist
//! - `Json`: the file is not a valid record
//! - `Invalid`: the record parsed but its id or title is unusable

mod error;
mod filter;
mod loader;
mod model;
mod source;

pub use error::*;
pub use filter::*;
pub use loader::*;
pub use model::*;
pub use source::*;
