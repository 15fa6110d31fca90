//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestCollection` - Builder for metadata/landmark fixtures, served from
//!   memory or written to a temp directory
//! - `engraving_json()` - A complete metadata record
//! - `test_app()` - An initialized `AppContext` over a collection
//! - `count_errors()` - Runs a closure and counts the ERROR events it logs

use engraving_atlas::app::AppContext;
use engraving_atlas::catalog::{FsSource, MemorySource, MetadataSource};
use engraving_atlas::config::AtlasConfig;
use engraving_atlas::geometry::Size;
use engraving_atlas::landmarks::LANDMARKS_PATH;
use engraving_atlas::preferences::Preferences;
use engraving_atlas::viewport::StyleRecorder;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tempfile::TempDir;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub const MAP_SIZE: Size = Size::new(800.0, 600.0);
pub const VIEWER_SIZE: Size = Size::new(800.0, 600.0);

/// A metadata record with every field filled in
pub fn engraving_json(id: &str, title: &str, created: &str, neighborhood: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "creator": {
            "engraver": "W. Wellstood",
            "publisher": "Virtue, Emmins & Co."
        },
        "dates": { "created": created, "published": "" },
        "location": {
            "subject": format!("{title} from the river"),
            "neighborhood": neighborhood,
            "viewpoint": {
                "description": "Kentucky shore",
                "coordinates": { "lat": 39.10, "lng": -84.51 }
            }
        },
        "technical": { "dimensions": "12 x 18 cm", "technique": "Steel engraving" },
        "description": format!("{title}, engraved for a gazetteer of western cities.")
    })
}

pub fn landmarks_json() -> Value {
    json!({
        "roebling": {
            "name": "Roebling Suspension Bridge",
            "category": "bridge",
            "description": "Suspension bridge across the Ohio.",
            "blip": "Longest span in the world when it opened.",
            "historicalContext": "Completed in 1866.",
            "status": "extant",
            "appearsIn": ["steel_engraving_0001", "steel_engraving_0404"],
            "links": [
                { "title": "Wikipedia", "url": "https://www.wikipedia.org/wiki/John_A._Roebling_Suspension_Bridge" }
            ]
        },
        "courthouse": {
            "name": "Hamilton County Court House",
            "category": "government",
            "status": "razed",
            "appearsIn": ["steel_engraving_0002"]
        }
    })
}

/// Builder for a collection of metadata files.
#[derive(Default)]
pub struct TestCollection {
    files: Vec<(String, String)>,
    ids: Vec<String>,
}

impl TestCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item that is listed and has a metadata file
    pub fn with_item(mut self, record: Value) -> Self {
        let id = record["id"].as_str().unwrap_or_default().to_string();
        self.files.push((format!("metadata/{id}.json"), record.to_string()));
        self.ids.push(id);
        self
    }

    /// List an id without writing its metadata file
    pub fn with_missing(mut self, id: &str) -> Self {
        self.ids.push(id.to_string());
        self
    }

    pub fn with_raw_file(mut self, path: &str, contents: &str) -> Self {
        self.files.push((path.to_string(), contents.to_string()));
        self
    }

    pub fn with_landmarks(self) -> Self {
        let text = landmarks_json().to_string();
        self.with_raw_file(LANDMARKS_PATH, &text)
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.clone()
    }

    pub fn memory(&self) -> MemorySource {
        let mut source = MemorySource::new();
        for (path, contents) in &self.files {
            source.insert(path.clone(), contents.clone());
        }
        source
    }

    /// Write every file below a fresh temp directory
    pub fn on_disk(&self) -> (TempDir, FsSource) {
        let dir = tempfile::tempdir().unwrap();
        for (path, contents) in &self.files {
            let full = dir.path().join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, contents).unwrap();
        }
        let source = FsSource::new(dir.path());
        (dir, source)
    }
}

/// Three dated items in two neighborhoods plus the landmark database
pub fn standard_collection() -> TestCollection {
    let mut first = engraving_json("steel_engraving_0001", "Public Landing", "1841", "Riverfront");
    first["landmarks"] = json!([
        { "landmarkId": "roebling", "x": 40.0, "y": 20.0 },
        { "landmarkId": "unknown", "x": 5.0, "y": 5.0 }
    ]);
    TestCollection::new()
        .with_item(first)
        .with_item(engraving_json("steel_engraving_0002", "Court House", "1852", "Downtown"))
        .with_item(engraving_json("steel_engraving_0003", "Observatory", "1875", "Mount Adams"))
        .with_landmarks()
}

pub fn test_app(
    collection: &TestCollection,
    source: &dyn MetadataSource,
    hash: &str,
) -> AppContext<StyleRecorder> {
    let config = AtlasConfig {
        engraving_ids: collection.ids(),
        ..AtlasConfig::default()
    };
    let mut app = AppContext::new(config, Preferences::in_memory(), StyleRecorder::default(), MAP_SIZE);
    app.init(source, hash, Instant::now());
    app
}

/// Layer counting ERROR-level events
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a subscriber on this thread and return its result together
/// with the number of ERROR events it logged
pub fn count_errors<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, count.load(Ordering::SeqCst))
}
