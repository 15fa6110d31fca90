//! Derived image generation: list-card thumbnails, WebP copies of the full
//! images, and an explicit rotation fix for scans stored sideways.
//!
//! Every decode honours the EXIF orientation tag, so outputs are always
//! upright even when the source relies on the tag.

use crate::constants::{THUMBNAIL_MAX_SIZE, THUMBNAIL_QUALITY};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

/// Quality used when rewriting a rotated JPEG in place
const ROTATED_QUALITY: u8 = 95;

const THUMBS_DIR: &str = "thumbs";

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

pub type ImagingResult<T> = Result<T, ImagingError>;

/// Clockwise rotation applied by `rotate_in_place`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            90 => Some(Rotation::Cw90),
            180 => Some(Rotation::Cw180),
            270 => Some(Rotation::Cw270),
            _ => None,
        }
    }

    fn apply(self, img: &DynamicImage) -> DynamicImage {
        match self {
            Rotation::Cw90 => img.rotate90(),
            Rotation::Cw180 => img.rotate180(),
            Rotation::Cw270 => img.rotate270(),
        }
    }
}

/// Decode an image and rotate/flip it upright according to its EXIF tag
pub fn open_upright(path: &Path) -> ImagingResult<DynamicImage> {
    let mut decoder = ImageReader::open(path)?.with_guessed_format()?.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Shrink to fit inside `max`, keeping the aspect ratio. Never enlarges.
pub fn fit_within(img: &DynamicImage, max: (u32, u32)) -> DynamicImage {
    if img.width() <= max.0 && img.height() <= max.1 {
        return img.clone();
    }
    img.resize(max.0, max.1, FilterType::Lanczos3)
}

fn write_jpeg(img: &DynamicImage, output: &Path, quality: u8) -> ImagingResult<()> {
    let mut writer = BufWriter::new(File::create(output)?);
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))?;
    Ok(())
}

/// Thumbnail path for a full image: `<dir>/thumbs/<stem>_thumb.jpg`
pub fn thumbnail_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(THUMBS_DIR)
        .join(format!("{stem}_thumb.jpg"))
}

/// Write a JPEG thumbnail (fit 400×300, quality 85)
pub fn create_thumbnail(input: &Path, output: &Path) -> ImagingResult<(u32, u32)> {
    let img = fit_within(&open_upright(input)?, THUMBNAIL_MAX_SIZE);
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_jpeg(&img, output, THUMBNAIL_QUALITY)?;
    Ok((img.width(), img.height()))
}

/// Write a lossless WebP copy next to the input
pub fn create_webp(input: &Path, output: &Path) -> ImagingResult<()> {
    let img = DynamicImage::ImageRgb8(open_upright(input)?.to_rgb8());
    let writer = BufWriter::new(File::create(output)?);
    img.write_with_encoder(WebPEncoder::new_lossless(writer))?;
    Ok(())
}

/// Rotate a mis-oriented image clockwise and overwrite it, keeping a
/// `<stem>_backup.<ext>` copy of the original if none exists yet.
/// The thumbnail is regenerated from the rotated image.
pub fn rotate_in_place(path: &Path, rotation: Rotation) -> ImagingResult<PathBuf> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "jpg".to_string());
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let backup = path.with_file_name(format!("{stem}_backup.{ext}"));
    if !backup.exists() {
        std::fs::copy(path, &backup)?;
        info!(backup = %backup.display(), "created backup");
    }

    let rotated = rotation.apply(&open_upright(path)?);
    write_jpeg(&rotated, path, ROTATED_QUALITY)?;
    let thumb = thumbnail_path(path);
    create_thumbnail(path, &thumb)?;
    info!(path = %path.display(), ?rotation, "rotated image");
    Ok(thumb)
}

/// Outcome of a batch run over a directory.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, ImagingError)>,
}

/// Source images in a directory: jpg/jpeg/png, not hidden, sorted by name
pub fn source_images(dir: &Path) -> ImagingResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ImagingError::NotADirectory(dir.to_path_buf()));
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            let name = p.file_name().unwrap_or_default().to_string_lossy();
            let lower = name.to_lowercase();
            !name.starts_with('.')
                && (lower.ends_with(".jpg") || lower.ends_with(".jpeg") || lower.ends_with(".png"))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn run_batch(
    dir: &Path,
    output_for: impl Fn(&Path) -> PathBuf,
    task: impl Fn(&Path, &Path) -> ImagingResult<()>,
) -> ImagingResult<BatchReport> {
    let mut report = BatchReport::default();
    for input in source_images(dir)? {
        let output = output_for(&input);
        match task(&input, &output) {
            Ok(()) => report.written.push(output),
            Err(e) => {
                error!(path = %input.display(), error = %e, "image conversion failed");
                report.failures.push((input, e));
            }
        }
    }
    if report.written.is_empty() && report.failures.is_empty() {
        warn!(dir = %dir.display(), "no source images found");
    }
    info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    Ok(report)
}

/// Thumbnails for every source image into `<dir>/thumbs/`
pub fn generate_thumbnails(dir: &Path) -> ImagingResult<BatchReport> {
    run_batch(dir, thumbnail_path, |input, output| {
        create_thumbnail(input, output).map(|_| ())
    })
}

/// WebP copies of every source image, next to the originals
pub fn generate_webp(dir: &Path) -> ImagingResult<BatchReport> {
    run_batch(dir, |input| input.with_extension("webp"), create_webp)
}
