/// State management module
///
/// This module holds all application state:
/// - The flyer content record and draft serialization (content.rs)
/// - Theme/layout/view selection (selection.rs)
/// - User image slots and async preview derivation (images.rs)

pub mod content;
pub mod images;
pub mod selection;
