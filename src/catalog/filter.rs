//! Search and filtering over the in-memory collection.

use super::model::Engraving;
use crate::constants::{CARD_DESCRIPTION_CHARS, DATE_RANGE_MAX, DATE_RANGE_MIN, DATE_WINDOW_YEARS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive range of creation years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: DATE_RANGE_MIN,
            end: DATE_RANGE_MAX,
        }
    }
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Window selected by the date slider: year ± 10, clamped to the
    /// collection's span
    pub fn around(year: i32) -> Self {
        Self {
            start: year.saturating_sub(DATE_WINDOW_YEARS).max(DATE_RANGE_MIN),
            end: year.saturating_add(DATE_WINDOW_YEARS).min(DATE_RANGE_MAX),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

/// True if any searchable field contains the query (case-insensitive).
/// An empty query matches everything.
pub fn matches_query(engraving: &Engraving, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [
        engraving.title.as_str(),
        engraving.description.as_str(),
        engraving.artist_name(),
        engraving.location.neighborhood.as_str(),
        engraving.location.subject.as_str(),
        engraving.dates.created.as_str(),
        engraving.creator.publisher.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&query))
}

pub fn search<'a>(items: &'a [Engraving], query: &str) -> Vec<&'a Engraving> {
    items.iter().filter(|e| matches_query(e, query)).collect()
}

/// Items whose creation year falls inside the range. Items without a
/// parseable year are excluded.
pub fn filter_by_date_range<'a>(
    items: impl IntoIterator<Item = &'a Engraving>,
    range: YearRange,
) -> Vec<&'a Engraving> {
    items
        .into_iter()
        .filter(|e| e.created_year().is_some_and(|y| range.contains(y)))
        .collect()
}

pub fn filter_by_neighborhood<'a>(items: &'a [Engraving], neighborhood: &str) -> Vec<&'a Engraving> {
    let needle = neighborhood.to_lowercase();
    items
        .iter()
        .filter(|e| e.location.neighborhood.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort by creation year; undated items go last
pub fn sort_by_date(items: &mut [&Engraving], ascending: bool) {
    items.sort_by(|a, b| match (a.created_year(), b.created_year()) {
        (Some(x), Some(y)) if ascending => x.cmp(&y),
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Distinct neighborhoods, sorted
pub fn unique_neighborhoods(items: &[Engraving]) -> Vec<String> {
    items
        .iter()
        .map(|e| e.location.neighborhood.clone())
        .filter(|n| !n.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Earliest and latest creation year, if any item is dated
pub fn date_span(items: &[Engraving]) -> Option<YearRange> {
    let years = items.iter().filter_map(Engraving::created_year);
    let (min, max) = years.fold(None, |acc: Option<(i32, i32)>, y| match acc {
        None => Some((y, y)),
        Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
    })?;
    Some(YearRange::new(min, max))
}

/// Cut text to `CARD_DESCRIPTION_CHARS` characters, appending "..."
pub fn truncate_description(text: &str) -> String {
    truncate(text, CARD_DESCRIPTION_CHARS)
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Current search and date filter. Applying it yields the visible list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    pub date_range: YearRange,
}

impl FilterState {
    /// Search, then date range, then sort ascending by date
    pub fn apply<'a>(&self, items: &'a [Engraving]) -> Vec<&'a Engraving> {
        let searched = search(items, &self.query);
        let mut filtered = filter_by_date_range(searched, self.date_range);
        sort_by_date(&mut filtered, true);
        filtered
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
