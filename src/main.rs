use chrono::Datelike;
use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

pub mod export;
pub mod flyer;
pub mod state;
pub mod theme;
pub mod ui;

use export::SlotRasters;
use flyer::qr;
use state::content::{Field, FlyerContent};
use state::images::{self, ImageSlots, PreviewImage, Slot};
use state::selection::{ActiveView, SelectionState};
use theme::FlyerTheme;

/// Main application state
struct FlyerStudio {
    /// Everything the user has typed
    content: FlyerContent,
    /// The four image slots and their decoded previews
    slots: ImageSlots,
    /// Theme, layout, dark mode, active view
    selection: SelectionState,
    /// Status message shown to the user
    status: String,
    /// An export task is in flight; the button is disabled meanwhile
    exporting: bool,
    /// Pre-rendered QR glyph for the preview, refreshed when the GitHub
    /// handle changes
    qr: Option<iced::widget::image::Handle>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    FieldChanged(Field, String),
    ServiceChanged(usize, String),
    /// User clicked "Choose File" for a slot
    PickImage(Slot),
    /// A preview decode finished; the token guards against stale results
    PreviewDecoded(Slot, u64, Result<PreviewImage, String>),
    ThemePicked(&'static str),
    LayoutPicked(flyer::layout::LayoutId),
    DarkModeToggled(bool),
    ShowPreview,
    ShowEditor,
    /// A project thumbnail was clicked in the preview
    ProjectSelected(usize),
    CloseProject,
    SaveDraft,
    LoadDraft,
    ExportRequested,
    ExportFinished(Result<PathBuf, String>),
}

impl FlyerStudio {
    fn new() -> (Self, Task<Message>) {
        let content = FlyerContent::default();
        let qr = render_qr(&content.github);

        println!("🎨 Flyer Studio initialized");

        (
            FlyerStudio {
                content,
                slots: ImageSlots::default(),
                selection: SelectionState::default(),
                status: "Ready.".into(),
                exporting: false,
                qr,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FieldChanged(field, value) => {
                self.content.set_field(field, value);
                if field == Field::Github {
                    self.qr = render_qr(&self.content.github);
                }
                Task::none()
            }

            Message::ServiceChanged(index, value) => {
                if let Err(e) = self.content.set_service(index, value) {
                    eprintln!("⚠️  {}", e);
                    self.status = format!("⚠️ {}", e);
                }
                Task::none()
            }

            Message::PickImage(slot) => {
                let file = FileDialog::new()
                    .set_title(&format!("Select {}", slot.label()))
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
                    .pick_file();

                if let Some(path) = file {
                    let generation = self.slots.begin_load(slot, path.clone());
                    self.status = format!("Decoding {}...", path.display());
                    return Task::perform(images::derive_preview(path), move |result| {
                        Message::PreviewDecoded(slot, generation, result)
                    });
                }
                Task::none()
            }

            Message::PreviewDecoded(slot, generation, result) => {
                let failed = result.is_err();
                if self.slots.apply_decoded(slot, generation, result) {
                    self.status = if failed {
                        format!("⚠️ Could not load {}", slot.label())
                    } else {
                        format!("✅ {} loaded.", slot.label())
                    };
                }
                Task::none()
            }

            Message::ThemePicked(id) => {
                self.selection.theme_id = id.into();
                Task::none()
            }

            Message::LayoutPicked(layout) => {
                self.selection.layout = layout;
                Task::none()
            }

            Message::DarkModeToggled(enabled) => {
                self.selection.dark_mode = enabled;
                Task::none()
            }

            Message::ShowPreview => {
                self.selection.view = ActiveView::Preview;
                Task::none()
            }

            Message::ShowEditor => {
                self.selection.view = ActiveView::Editor;
                self.selection.selected_project = None;
                Task::none()
            }

            Message::ProjectSelected(index) => {
                self.selection.selected_project = Some(index);
                Task::none()
            }

            Message::CloseProject => {
                self.selection.selected_project = None;
                Task::none()
            }

            Message::SaveDraft => {
                let file = FileDialog::new()
                    .set_title("Save Flyer Draft")
                    .set_file_name("flyer-draft.json")
                    .add_filter("JSON", &["json"])
                    .save_file();

                if let Some(path) = file {
                    self.status = match save_draft(&self.content, &path) {
                        Ok(()) => format!("✅ Draft saved to {}", path.display()),
                        Err(e) => format!("⚠️ Could not save draft: {}", e),
                    };
                }
                Task::none()
            }

            Message::LoadDraft => {
                let file = FileDialog::new()
                    .set_title("Load Flyer Draft")
                    .add_filter("JSON", &["json"])
                    .pick_file();

                if let Some(path) = file {
                    match load_draft(&path) {
                        Ok(content) => {
                            self.content = content;
                            self.qr = render_qr(&self.content.github);
                            self.status = format!("✅ Draft loaded from {}", path.display());
                        }
                        Err(e) => self.status = format!("⚠️ Could not load draft: {}", e),
                    }
                }
                Task::none()
            }

            Message::ExportRequested => {
                if self.exporting {
                    return Task::none();
                }

                let filename = export::derive_filename(&self.content.name);
                let file = FileDialog::new()
                    .set_title("Export Flyer as PNG")
                    .set_directory(export::default_output_dir())
                    .set_file_name(&filename)
                    .add_filter("PNG image", &["png"])
                    .save_file();

                let Some(path) = file else {
                    return Task::none();
                };
                let out_dir = path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or(filename);

                let doc = self.render_document();
                let rasters = SlotRasters::capture(&self.slots);

                self.exporting = true;
                self.status = "Exporting flyer...".into();
                Task::perform(
                    async move {
                        export::export_flyer(doc, rasters, filename, out_dir)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::ExportFinished,
                )
            }

            Message::ExportFinished(result) => {
                self.exporting = false;
                self.status = match result {
                    Ok(path) => format!("✅ Flyer exported to {}", path.display()),
                    Err(e) => {
                        eprintln!("⚠️  Export failed: {}", e);
                        format!("⚠️ Export failed: {}", e)
                    }
                };
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match self.selection.view {
            ActiveView::Editor => {
                ui::editor::view(&self.content, &self.slots, &self.selection, &self.status)
            }
            ActiveView::Preview => {
                let doc = self.render_document();
                ui::preview::view(
                    &doc,
                    &self.slots,
                    self.qr.as_ref(),
                    &self.selection,
                    &self.status,
                    self.exporting,
                )
            }
        }
    }

    /// Compose the current flyer document from the live state.
    fn render_document(&self) -> flyer::render::FlyerDocument {
        flyer::render::render(
            &self.content,
            FlyerTheme::lookup(&self.selection.theme_id),
            self.selection.layout,
            self.selection.dark_mode,
            chrono::Local::now().year(),
        )
    }

    fn theme(&self) -> Theme {
        if self.selection.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

fn main() -> iced::Result {
    iced::application("Flyer Studio", FlyerStudio::update, FlyerStudio::view)
        .theme(FlyerStudio::theme)
        .centered()
        .run_with(FlyerStudio::new)
}

/// Render the QR glyph shown in the on-screen preview.
///
/// The exporter renders its own at export resolution; this one is sized for
/// the widget. A payload the encoder rejects leaves the preview without a
/// glyph rather than failing the view.
fn render_qr(github: &str) -> Option<iced::widget::image::Handle> {
    let payload = qr::github_profile_url(github);
    match qr::qr_image(
        &payload,
        4,
        theme::Rgb::hex(0x000000),
        theme::Rgb::hex(0xffffff),
        true,
    ) {
        Ok(img) => {
            let (w, h) = img.dimensions();
            Some(iced::widget::image::Handle::from_rgba(w, h, img.into_raw()))
        }
        Err(e) => {
            eprintln!("⚠️  QR encoding failed: {:?}", e);
            None
        }
    }
}

fn save_draft(content: &FlyerContent, path: &std::path::Path) -> Result<(), String> {
    let json = content.to_json().map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())?;
    println!("💾 Draft saved: {}", path.display());
    Ok(())
}

fn load_draft(path: &std::path::Path) -> Result<FlyerContent, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let content = FlyerContent::from_json(&json).map_err(|e| e.to_string())?;
    println!("📂 Draft loaded: {}", path.display());
    Ok(content)
}
