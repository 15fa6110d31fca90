//! Core types for engraving metadata.
//!
//! Mirrors the on-disk `metadata/<id>.json` format (camelCase keys). `id`,
//! `title`, `creator`, `dates` and `location` are required; everything else
//! falls back to an empty default.

use serde::{Deserialize, Serialize};

/// Metadata ids share this prefix; image files use a double underscore.
const ID_PREFIX: &str = "steel_engraving_";
const IMAGE_PREFIX: &str = "steel_engraving__";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    #[serde(default)]
    pub engraver: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default)]
    pub publisher: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dates {
    pub created: String,
    #[serde(default)]
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewpoint {
    #[serde(default)]
    pub description: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub neighborhood: String,
    pub viewpoint: Viewpoint,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technical {
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub technique: String,
}

/// A landmark placed on an engraving, in image percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkRef {
    pub landmark_id: String,
    pub x: f64,
    pub y: f64,
}

/// One archival engraving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engraving {
    pub id: String,
    pub title: String,
    pub creator: Creator,
    pub dates: Dates,
    pub location: Location,
    #[serde(default)]
    pub technical: Technical,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<LandmarkRef>,
}

impl Engraving {
    /// Artist if credited, otherwise the engraver, otherwise "Unknown"
    pub fn artist_name(&self) -> &str {
        self.creator
            .artist
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| Some(self.creator.engraver.as_str()).filter(|e| !e.trim().is_empty()))
            .unwrap_or("Unknown")
    }

    /// Publication date, falling back to the creation date
    pub fn published(&self) -> &str {
        if self.dates.published.trim().is_empty() {
            &self.dates.created
        } else {
            &self.dates.published
        }
    }

    /// Year parsed from the leading digits of the creation date
    /// ("1841", "1841-03", "c. 1850" all work).
    pub fn created_year(&self) -> Option<i32> {
        parse_leading_year(&self.dates.created)
    }

    pub fn coordinates(&self) -> Coordinates {
        self.location.viewpoint.coordinates
    }

    /// Neighborhood for display
    pub fn neighborhood_label(&self) -> &str {
        if self.location.neighborhood.trim().is_empty() {
            "Unknown location"
        } else {
            &self.location.neighborhood
        }
    }

    fn image_stem(&self) -> String {
        match self.id.strip_prefix(ID_PREFIX) {
            Some(rest) => format!("{IMAGE_PREFIX}{rest}"),
            None => self.id.clone(),
        }
    }

    /// Full-size image path relative to the site root
    pub fn image_src(&self) -> String {
        format!("engravings/{}.jpg", self.image_stem())
    }

    /// WebP variant of the full-size image
    pub fn webp_src(&self) -> String {
        format!("engravings/{}.webp", self.image_stem())
    }

    /// Thumbnail used by list cards
    pub fn thumbnail_src(&self) -> String {
        format!("engravings/thumbs/{}_thumb.jpg", self.image_stem())
    }
}

fn parse_leading_year(text: &str) -> Option<i32> {
    let digits: String = text
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
