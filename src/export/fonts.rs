/// Export font loading
///
/// The rasterizer draws text with rusttype, which needs a real TTF/OTF.
/// Nothing is bundled; we take an explicit override from the environment
/// first, then probe the usual system locations.

use rusttype::Font;
use std::fs;

/// Environment override: absolute path to a .ttf/.otf file
pub const FONT_ENV: &str = "FLYER_STUDIO_FONT";

/// Well-known sans-serif font locations, probed in order
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Find and parse a usable export font.
///
/// Returns None when nothing loads; the export pipeline turns that into an
/// explicit error instead of producing a textless flyer.
pub fn load_export_font() -> Option<Font<'static>> {
    let override_path = std::env::var(FONT_ENV).ok();
    let candidates = override_path
        .iter()
        .map(String::as_str)
        .chain(SYSTEM_FONTS.iter().copied());

    for path in candidates {
        if let Ok(bytes) = fs::read(path) {
            if let Some(font) = Font::try_from_vec(bytes) {
                println!("🔤 Export font: {}", path);
                return Some(font);
            }
            eprintln!("⚠️  Could not parse font file: {}", path);
        }
    }
    None
}
