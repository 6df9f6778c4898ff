/// User image slots and asynchronous preview derivation
///
/// Four named slots (the profile photo and three work samples). Selecting a
/// file records the source path synchronously; the displayable preview is
/// decoded on a blocking task and applied later via a message.
///
/// Each slot carries a generation counter: a completing decode is applied
/// only if its token still matches the slot's latest one, so a rapid second
/// selection deterministically wins over a still-running first decode.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbaImage;
use tokio::task;

/// Longest edge of a derived preview; larger uploads are downscaled
const PREVIEW_MAX_DIM: u32 = 1280;

/// The four image slots of the flyer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Profile,
    Work1,
    Work2,
    Work3,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Profile, Slot::Work1, Slot::Work2, Slot::Work3];

    /// Label shown next to the file picker
    pub fn label(self) -> &'static str {
        match self {
            Slot::Profile => "Your Photo",
            Slot::Work1 => "Work Sample 1",
            Slot::Work2 => "Work Sample 2",
            Slot::Work3 => "Work Sample 3",
        }
    }

    /// Project index for the three work slots
    pub fn project_index(self) -> Option<usize> {
        match self {
            Slot::Profile => None,
            Slot::Work1 => Some(0),
            Slot::Work2 => Some(1),
            Slot::Work3 => Some(2),
        }
    }
}

/// A decoded preview: the raw RGBA raster for the export painter plus an
/// iced handle for on-screen display. Both views of the same pixels.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub raster: Arc<RgbaImage>,
    pub handle: iced::widget::image::Handle,
}

impl PreviewImage {
    pub fn from_raster(raster: RgbaImage) -> Self {
        let (width, height) = raster.dimensions();
        let handle = iced::widget::image::Handle::from_rgba(width, height, raster.clone().into_raw());
        Self {
            raster: Arc::new(raster),
            handle,
        }
    }
}

/// Preview lifecycle of one slot.
///
/// `Failed` is deliberately distinct from `Pending`: a decode error is a
/// recoverable per-slot condition, not a preview that never arrives.
#[derive(Debug, Clone, Default)]
pub enum Preview {
    #[default]
    Empty,
    Pending,
    Ready(PreviewImage),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
struct SlotState {
    source: Option<PathBuf>,
    preview: Preview,
    /// Token of the most recent `begin_load` for this slot
    generation: u64,
}

/// All four slots. One instance per session, created empty.
#[derive(Debug, Clone, Default)]
pub struct ImageSlots {
    profile: SlotState,
    work: [SlotState; 3],
}

impl ImageSlots {
    fn slot(&self, slot: Slot) -> &SlotState {
        match slot {
            Slot::Profile => &self.profile,
            Slot::Work1 => &self.work[0],
            Slot::Work2 => &self.work[1],
            Slot::Work3 => &self.work[2],
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut SlotState {
        match slot {
            Slot::Profile => &mut self.profile,
            Slot::Work1 => &mut self.work[0],
            Slot::Work2 => &mut self.work[1],
            Slot::Work3 => &mut self.work[2],
        }
    }

    /// Record a newly selected file and stamp a fresh generation token.
    ///
    /// The returned token must be passed back to `apply_decoded` when the
    /// derivation finishes.
    pub fn begin_load(&mut self, slot: Slot, source: PathBuf) -> u64 {
        let state = self.slot_mut(slot);
        state.generation += 1;
        state.source = Some(source);
        state.preview = Preview::Pending;
        state.generation
    }

    /// Apply a finished derivation if its token is still current.
    ///
    /// Returns false (and changes nothing) when a newer `begin_load` has
    /// superseded this result.
    pub fn apply_decoded(
        &mut self,
        slot: Slot,
        generation: u64,
        result: Result<PreviewImage, String>,
    ) -> bool {
        let state = self.slot_mut(slot);
        if generation != state.generation {
            println!("🕰️  Dropping stale preview for {:?} (gen {})", slot, generation);
            return false;
        }
        state.preview = match result {
            Ok(preview) => Preview::Ready(preview),
            Err(reason) => {
                eprintln!("⚠️  Preview decode failed for {:?}: {}", slot, reason);
                Preview::Failed(reason)
            }
        };
        true
    }

    pub fn preview(&self, slot: Slot) -> &Preview {
        &self.slot(slot).preview
    }

    pub fn source(&self, slot: Slot) -> Option<&Path> {
        self.slot(slot).source.as_deref()
    }

    /// Decoded raster for the export painter, if ready
    pub fn raster(&self, slot: Slot) -> Option<Arc<RgbaImage>> {
        match &self.slot(slot).preview {
            Preview::Ready(p) => Some(Arc::clone(&p.raster)),
            _ => None,
        }
    }

    /// Display handle for the iced preview, if ready
    pub fn handle(&self, slot: Slot) -> Option<iced::widget::image::Handle> {
        match &self.slot(slot).preview {
            Preview::Ready(p) => Some(p.handle.clone()),
            _ => None,
        }
    }
}

/// Decode a selected file into a displayable preview.
///
/// Runs the CPU-bound decode on a blocking task, the same way thumbnail
/// derivation does in the rest of the pipeline.
pub async fn derive_preview(path: PathBuf) -> Result<PreviewImage, String> {
    task::spawn_blocking(move || derive_preview_blocking(&path))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking implementation of preview derivation
fn derive_preview_blocking(path: &Path) -> Result<PreviewImage, String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }

    let img = image::open(path).map_err(|e| format!("Failed to decode image: {}", e))?;

    let (w, h) = (img.width(), img.height());
    let img = if w > PREVIEW_MAX_DIM || h > PREVIEW_MAX_DIM {
        img.resize(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM, FilterType::Triangle)
    } else {
        img
    };

    println!("🖼️  Decoded preview: {} ({}x{})", path.display(), img.width(), img.height());

    Ok(PreviewImage::from_raster(img.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_preview(color: [u8; 4]) -> PreviewImage {
        let raster = RgbaImage::from_pixel(4, 4, image::Rgba(color));
        PreviewImage::from_raster(raster)
    }

    #[test]
    fn test_latest_load_wins_over_racing_decodes() {
        let mut slots = ImageSlots::default();

        let first = slots.begin_load(Slot::Work1, PathBuf::from("/a.png"));
        let second = slots.begin_load(Slot::Work1, PathBuf::from("/b.png"));
        assert_ne!(first, second);

        // The stale decode completes first and must be dropped
        assert!(!slots.apply_decoded(Slot::Work1, first, Ok(test_preview([255, 0, 0, 255]))));
        assert!(matches!(slots.preview(Slot::Work1), Preview::Pending));

        // The current decode lands
        assert!(slots.apply_decoded(Slot::Work1, second, Ok(test_preview([0, 255, 0, 255]))));
        match slots.preview(Slot::Work1) {
            Preview::Ready(p) => assert_eq!(p.raster.get_pixel(0, 0).0, [0, 255, 0, 255]),
            other => panic!("expected ready preview, got {:?}", other),
        }
    }

    #[test]
    fn test_completion_order_does_not_matter() {
        let mut slots = ImageSlots::default();
        let first = slots.begin_load(Slot::Profile, PathBuf::from("/a.png"));
        let second = slots.begin_load(Slot::Profile, PathBuf::from("/b.png"));

        // Current decode completes before the stale one
        assert!(slots.apply_decoded(Slot::Profile, second, Ok(test_preview([1, 2, 3, 255]))));
        assert!(!slots.apply_decoded(Slot::Profile, first, Ok(test_preview([9, 9, 9, 255]))));

        match slots.preview(Slot::Profile) {
            Preview::Ready(p) => assert_eq!(p.raster.get_pixel(0, 0).0, [1, 2, 3, 255]),
            other => panic!("expected ready preview, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_failure_is_distinct_from_pending() {
        let mut slots = ImageSlots::default();
        let generation = slots.begin_load(Slot::Work2, PathBuf::from("/broken.png"));

        assert!(slots.apply_decoded(Slot::Work2, generation, Err("not an image".into())));
        assert!(matches!(slots.preview(Slot::Work2), Preview::Failed(_)));
        assert!(slots.raster(Slot::Work2).is_none());
    }

    #[test]
    fn test_other_slots_are_untouched() {
        let mut slots = ImageSlots::default();
        let generation = slots.begin_load(Slot::Work3, PathBuf::from("/c.png"));
        slots.apply_decoded(Slot::Work3, generation, Ok(test_preview([7, 7, 7, 255])));

        assert!(matches!(slots.preview(Slot::Profile), Preview::Empty));
        assert!(matches!(slots.preview(Slot::Work1), Preview::Empty));
        assert!(matches!(slots.preview(Slot::Work2), Preview::Empty));
    }

    #[tokio::test]
    async fn test_derive_preview_missing_file_errors() {
        let result = derive_preview(PathBuf::from("/nonexistent/photo.png")).await;
        assert!(result.is_err());
    }
}
