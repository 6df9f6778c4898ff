/// GitHub profile URL derivation and QR glyph rasterization

use image::{Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};

use crate::theme::Rgb;

/// Modules of quiet zone around the glyph when the margin is enabled
const QUIET_MODULES: u32 = 4;

/// Derive the QR payload from the stored GitHub handle.
///
/// The handle is free text; users type anything from `foo` to
/// `github.com/foo` to a full URL. A leading scheme is stripped before the
/// `https://` prefix is applied so the payload never carries it twice.
pub fn github_profile_url(handle: &str) -> String {
    let handle = handle.trim();
    let handle = handle
        .strip_prefix("https://")
        .or_else(|| handle.strip_prefix("http://"))
        .unwrap_or(handle);
    format!("https://{}", handle)
}

/// The handle as shown on the flyer, without the `github.com/` prefix.
pub fn display_handle(handle: &str) -> &str {
    let handle = handle.trim();
    handle.strip_prefix("github.com/").unwrap_or(handle)
}

/// Rasterize a payload into a QR glyph.
///
/// `module` is the edge length of one module in pixels. Error correction is
/// level L and the glyph is dark-on-light regardless of the app theme,
/// matching what scanners expect.
pub fn qr_image(
    payload: &str,
    module: u32,
    fg: Rgb,
    bg: Rgb,
    quiet_zone: bool,
) -> Result<RgbaImage, qrcode::types::QrError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)?;
    let width = code.width() as u32;
    let colors = code.to_colors();

    let margin = if quiet_zone { QUIET_MODULES } else { 0 };
    let edge = (width + 2 * margin) * module;
    let fg: Rgba<u8> = fg.into();
    let bg: Rgba<u8> = bg.into();

    let mut img = RgbaImage::from_pixel(edge, edge, bg);
    for (i, color) in colors.iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let mx = (i as u32 % width + margin) * module;
            let my = (i as u32 / width + margin) * module;
            for dy in 0..module {
                for dx in 0..module {
                    img.put_pixel(mx + dx, my + dy, fg);
                }
            }
        }
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_keeps_explicit_host() {
        assert_eq!(github_profile_url("github.com/foo"), "https://github.com/foo");
    }

    #[test]
    fn test_url_prefixes_bare_handle() {
        assert_eq!(github_profile_url("foo"), "https://foo");
    }

    #[test]
    fn test_url_never_doubles_the_scheme() {
        assert_eq!(github_profile_url("https://github.com/foo"), "https://github.com/foo");
        assert_eq!(github_profile_url("http://github.com/foo"), "https://github.com/foo");
    }

    #[test]
    fn test_display_handle_strips_host() {
        assert_eq!(display_handle("github.com/foo"), "foo");
        assert_eq!(display_handle("foo"), "foo");
    }

    #[test]
    fn test_qr_image_dimensions_scale_with_margin() {
        let fg = Rgb::hex(0x000000);
        let bg = Rgb::hex(0xffffff);
        let bare = qr_image("https://github.com/foo", 2, fg, bg, false).unwrap();
        let padded = qr_image("https://github.com/foo", 2, fg, bg, true).unwrap();
        assert_eq!(padded.width(), bare.width() + 2 * QUIET_MODULES * 2);

        // Corner of the padded glyph sits in the quiet zone
        assert_eq!(padded.get_pixel(0, 0).0, [255, 255, 255, 255]);
        // A finder pattern corner is dark in the bare glyph
        assert_eq!(bare.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
