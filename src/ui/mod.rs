/// The two application views
///
/// `editor` is the form; `preview` renders the composed flyer document with
/// iced widgets. Both emit `Message` values handled by the app root.

pub mod editor;
pub mod preview;
