/// Flyer composition module
///
/// The template renderer: a pure function from content + theme + layout to
/// a typed document tree, consumed by both the on-screen preview and the
/// export rasterizer.
/// - Document node types (doc.rs)
/// - The eight shared fragments (fragments.rs)
/// - Layout registry and data-driven composition plans (layout.rs)
/// - The generic compose/render entry point (render.rs)
/// - Static featured projects (projects.rs)
/// - GitHub URL derivation and QR rasters (qr.rs)

pub mod doc;
pub mod fragments;
pub mod layout;
pub mod projects;
pub mod qr;
pub mod render;
