/// Transient selection state
///
/// Which theme, which layout, dark or light, and which view is showing.
/// Nothing here is persisted; it resets every session.

use crate::flyer::layout::LayoutId;

/// The two top-level views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    /// The form where content is edited
    #[default]
    Editor,
    /// The composed flyer with the export button
    Preview,
}

/// Everything the user has picked but not typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Id into the theme registry; unknown ids fall back on lookup
    pub theme_id: String,
    pub layout: LayoutId,
    pub dark_mode: bool,
    pub view: ActiveView,
    /// Index of the project shown full-size in the overlay, if any
    pub selected_project: Option<usize>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            theme_id: "modern".into(),
            layout: LayoutId::Standard,
            dark_mode: false,
            view: ActiveView::Editor,
            selected_project: None,
        }
    }
}
