//! Landmark records and the landmark database.

use crate::catalog::{CatalogResult, MetadataSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Site-relative path of the landmark database
pub const LANDMARKS_PATH: &str = "data/landmarks.json";

/// Landmark category. Unknown categories are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Government,
    Bridge,
    Transportation,
    Building,
    Church,
    Religious,
    PublicSpace,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Government => "government",
            Category::Bridge => "bridge",
            Category::Transportation => "transportation",
            Category::Building => "building",
            Category::Church => "church",
            Category::Religious => "religious",
            Category::PublicSpace => "public_space",
            Category::Other(s) => s,
        }
    }

    /// Marker CSS class, e.g. `category-public_space`
    pub fn css_class(&self) -> String {
        format!("category-{}", self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "government" => Category::Government,
            "bridge" => Category::Bridge,
            "transportation" => Category::Transportation,
            "building" => Category::Building,
            "church" => Category::Church,
            "religious" => Category::Religious,
            "public_space" => Category::PublicSpace,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the structure still stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Extant,
    Razed,
    Altered,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Extant => "extant",
            Status::Razed => "razed",
            Status::Altered => "altered",
            Status::Other(s) => s,
        }
    }

    /// Lowercase, first space replaced by a dash
    pub fn css_class(&self) -> String {
        self.as_str().to_lowercase().replacen(' ', "-", 1)
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "extant" => Status::Extant,
            "razed" => Status::Razed,
            "altered" => Status::Altered,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLink {
    pub title: String,
    pub url: String,
}

/// One landmark record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blip: String,
    #[serde(default)]
    pub historical_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub appears_in: Vec<String>,
    #[serde(default)]
    pub links: Vec<ReferenceLink>,
}

/// Accepts both `{ "<id>": {..} }` and `{ "landmarks": { "<id>": {..} } }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkFile {
    Wrapped { landmarks: BTreeMap<String, Landmark> },
    Bare(BTreeMap<String, Landmark>),
}

/// All landmarks, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct LandmarkDb {
    records: BTreeMap<String, Landmark>,
}

impl LandmarkDb {
    pub fn new(records: BTreeMap<String, Landmark>) -> Self {
        Self { records }
    }

    pub fn from_json(text: &str) -> CatalogResult<Self> {
        let records = match serde_json::from_str(text)? {
            LandmarkFile::Wrapped { landmarks } => landmarks,
            LandmarkFile::Bare(map) => map,
        };
        Ok(Self { records })
    }

    /// Fetch and parse `data/landmarks.json`
    pub fn load(source: &dyn MetadataSource) -> CatalogResult<Self> {
        let db = Self::from_json(&source.fetch(LANDMARKS_PATH)?)?;
        info!(count = db.len(), "loaded landmark database");
        Ok(db)
    }

    pub fn get(&self, id: &str) -> Option<&Landmark> {
        self.records.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Landmark)> {
        self.records.iter().map(|(id, l)| (id.as_str(), l))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
