use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use engraving_atlas::app::AppContext;
use engraving_atlas::catalog::FsSource;
use engraving_atlas::config::AtlasConfig;
use engraving_atlas::geometry::Size;
use engraving_atlas::imaging::{self, BatchReport, Rotation};
use engraving_atlas::landmarks::LandmarkDetail;
use engraving_atlas::preferences::{JsonFileStore, Preferences};
use engraving_atlas::viewport::StyleRecorder;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Default map viewport for headless runs
const MAP_SIZE: Size = Size::new(1280.0, 800.0);

#[derive(Parser)]
#[command(name = "engraving-atlas")]
#[command(version, about = "Browse and maintain an engraving collection", long_about = None)]
struct Cli {
    /// Site root containing metadata/, data/ and engravings/
    #[arg(value_name = "ROOT")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List items after search and date filters
    List {
        /// Case-insensitive search text
        #[arg(long)]
        query: Option<String>,

        /// Centre of the ±10 year window
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i32>,
    },

    /// Print one item as JSON
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List landmarks, or show one in detail
    Landmarks {
        #[arg(value_name = "ID")]
        id: Option<String>,
    },

    /// Regenerate thumbnails and derived images
    Thumbs {
        /// Also write WebP copies of the full images
        #[arg(long)]
        webp: bool,

        /// Rotate one image clockwise in place instead of rebuilding every thumbnail
        #[arg(long, num_args = 2, value_names = ["FILE", "DEGREES"])]
        rotate: Option<Vec<String>>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::List { query, year } => list(&cli.root, query.as_deref(), year),
        Command::Show { id } => show(&cli.root, &id),
        Command::Landmarks { id } => landmarks(&cli.root, id.as_deref()),
        Command::Thumbs { webp, rotate } => thumbs(&cli.root, webp, rotate.as_deref()),
    }
}

fn load(root: &Path) -> AppContext<StyleRecorder> {
    let config = AtlasConfig::load(root);
    let prefs = match JsonFileStore::default_path() {
        Some(path) => Preferences::new(Box::new(JsonFileStore::open(path))),
        None => Preferences::in_memory(),
    };
    let mut app = AppContext::new(config, prefs, StyleRecorder::default(), MAP_SIZE);
    let now = Instant::now();
    app.init(&FsSource::new(root), "", now);
    for banner in app.banners.visible() {
        eprintln!("{}", banner.message);
    }
    app
}

fn list(root: &Path, query: Option<&str>, year: Option<i32>) -> Result<()> {
    let mut app = load(root);
    if let Some(query) = query {
        app.set_search_query(query);
    }
    if year.is_some() {
        app.set_date_filter(year);
    }
    for card in app.cards() {
        println!("{}\t{}\t{}\t{}", card.id, card.date, card.title, card.artist);
    }
    let map = &app.view.map;
    eprintln!(
        "{} of {} items, map centre ({:.4}, {:.4}) zoom {}",
        app.view.visible.len(),
        app.catalog().len(),
        map.center.lat,
        map.center.lng,
        map.zoom
    );
    Ok(())
}

fn show(root: &Path, id: &str) -> Result<()> {
    let mut app = load(root);
    if !app.select_item(id) {
        bail!("no item `{id}`");
    }
    let engraving = app.selected().context("selection vanished")?;
    println!("{}", serde_json::to_string_pretty(engraving)?);
    eprintln!("route: {}", app.route().to_hash());
    Ok(())
}

fn landmarks(root: &Path, id: Option<&str>) -> Result<()> {
    let app = load(root);
    if let Some(id) = id {
        let detail = LandmarkDetail::lookup(id, &app.data.landmarks, app.catalog())
            .with_context(|| format!("no landmark `{id}`"))?;
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }
    for (id, landmark) in app.data.landmarks.iter() {
        println!("{id}\t{}\t{}", landmark.category, landmark.name);
    }
    Ok(())
}

/// `rotate` holds `[file, degrees]`. WebP copies are written after the
/// rotation or thumbnail pass when requested.
fn thumbs(root: &Path, webp: bool, rotate: Option<&[String]>) -> Result<()> {
    let dir = root.join("engravings");

    match rotate {
        Some([file, degrees]) => {
            let degrees: i32 = degrees
                .parse()
                .with_context(|| format!("invalid rotation `{degrees}`"))?;
            let rotation = Rotation::from_degrees(degrees)
                .with_context(|| format!("rotation must be a multiple of 90, got {degrees}"))?;
            let thumb = imaging::rotate_in_place(&dir.join(file), rotation)
                .with_context(|| format!("rotating {file}"))?;
            println!("{}", thumb.display());
        }
        Some(other) => bail!("--rotate needs <FILE> <DEGREES>, got {} values", other.len()),
        None => {
            let report = imaging::generate_thumbnails(&dir)
                .with_context(|| format!("generating thumbnails in {}", dir.display()))?;
            print_report(&report);
        }
    }

    if webp {
        let report = imaging::generate_webp(&dir)
            .with_context(|| format!("generating WebP images in {}", dir.display()))?;
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    for path in &report.written {
        println!("{}", path.display());
    }
    for (path, error) in &report.failures {
        eprintln!("failed: {}: {error}", path.display());
    }
}
