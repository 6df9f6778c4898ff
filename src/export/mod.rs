/// PNG export pipeline
///
/// Takes a composed flyer document plus whatever slot rasters are ready and
/// writes an oversampled PNG. The heavy work (font parse, rasterize, encode)
/// runs on a blocking task; the UI gets a Result back and stays responsive.

pub mod fonts;
pub mod raster;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;
use tokio::task;

use crate::flyer::render::FlyerDocument;
use crate::state::images::{ImageSlots, Slot};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no usable export font found (set FLYER_STUDIO_FONT to a .ttf path)")]
    FontUnavailable,
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("export task failed: {0}")]
    Join(String),
}

/// Immutable snapshot of the decoded slot rasters, taken on the UI side so
/// the blocking export task never touches live state.
#[derive(Debug, Clone, Default)]
pub struct SlotRasters {
    pub profile: Option<Arc<RgbaImage>>,
    pub work: [Option<Arc<RgbaImage>>; 3],
}

impl SlotRasters {
    pub fn capture(slots: &ImageSlots) -> Self {
        Self {
            profile: slots.raster(Slot::Profile),
            work: [
                slots.raster(Slot::Work1),
                slots.raster(Slot::Work2),
                slots.raster(Slot::Work3),
            ],
        }
    }
}

/// Output filename derived from the flyer name: lowercased, whitespace runs
/// collapsed to single hyphens, with a fixed suffix.
pub fn derive_filename(name: &str) -> String {
    let slug = name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase();
    format!("{}-portfolio.png", slug)
}

/// Where exports land by default: the user's download directory, falling
/// back to home, then the current directory.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Export the flyer as a PNG under `out_dir`.
///
/// Fails with `FontUnavailable` rather than writing a textless image when no
/// export font can be loaded.
pub async fn export_flyer(
    doc: FlyerDocument,
    slots: SlotRasters,
    filename: String,
    out_dir: PathBuf,
) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || export_blocking(&doc, &slots, &filename, &out_dir))
        .await
        .map_err(|e| ExportError::Join(e.to_string()))?
}

fn export_blocking(
    doc: &FlyerDocument,
    slots: &SlotRasters,
    filename: &str,
    out_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let font = fonts::load_export_font().ok_or(ExportError::FontUnavailable)?;

    println!("📐 Rasterizing {:?} flyer at {}x scale...", doc.layout, raster::EXPORT_SCALE);
    let img = raster::rasterize(doc, slots, Some(&font));

    std::fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let path = out_dir.join(filename);
    img.save_with_format(&path, image::ImageFormat::Png)?;

    println!("💾 Exported flyer: {} ({}x{})", path.display(), img.width(), img.height());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::layout::LayoutId;
    use crate::flyer::render;
    use crate::state::content::FlyerContent;
    use crate::theme::FlyerTheme;

    #[test]
    fn test_filename_from_the_default_name() {
        assert_eq!(
            derive_filename("Ugwu Chukwuma Emmanuel"),
            "ugwu-chukwuma-emmanuel-portfolio.png"
        );
    }

    #[test]
    fn test_filename_collapses_whitespace_runs() {
        assert_eq!(derive_filename("  A   B "), "a-b-portfolio.png");
        assert_eq!(derive_filename(""), "-portfolio.png");
    }

    #[test]
    fn test_captured_rasters_skip_unready_slots() {
        let slots = ImageSlots::default();
        let captured = SlotRasters::capture(&slots);
        assert!(captured.profile.is_none());
        assert!(captured.work.iter().all(Option::is_none));
    }

    #[test]
    fn test_rasterized_flyer_round_trips_through_png() {
        let content = FlyerContent::default();
        let doc = render::render(&content, FlyerTheme::lookup("bold"), LayoutId::Compact, true, 2026);
        let img = raster::rasterize(&doc, &SlotRasters::default(), None);

        let dir = std::env::temp_dir().join("flyer-studio-test-export");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(derive_filename(&content.name));
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), img.dimensions());
        std::fs::remove_file(&path).ok();
    }
}
