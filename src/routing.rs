//! URL hash routes.
//!
//! `#item/<id>` deep-links to an item's detail view; every other fragment
//! (including none) is the home view. Ids are percent-encoded in the hash.

use std::fmt;
use tracing::debug;

const ITEM_PREFIX: &str = "item/";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Item(String),
}

impl Route {
    /// Parse a location hash, with or without the leading `#`
    pub fn parse(hash: &str) -> Self {
        let fragment = hash.strip_prefix('#').unwrap_or(hash);
        let Some(encoded) = fragment.strip_prefix(ITEM_PREFIX) else {
            return Route::Home;
        };
        match urlencoding::decode(encoded) {
            Ok(id) if !id.trim().is_empty() => Route::Item(id.into_owned()),
            Ok(_) => Route::Home,
            Err(e) => {
                debug!(%hash, error = %e, "undecodable item route");
                Route::Home
            }
        }
    }

    pub fn item(id: impl Into<String>) -> Self {
        Route::Item(id.into())
    }

    pub fn item_id(&self) -> Option<&str> {
        match self {
            Route::Item(id) => Some(id),
            Route::Home => None,
        }
    }

    /// The hash to write back to the location bar (empty for home)
    pub fn to_hash(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => Ok(()),
            Route::Item(id) => write!(f, "#{ITEM_PREFIX}{}", urlencoding::encode(id)),
        }
    }
}
