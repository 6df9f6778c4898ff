/// CPU rasterizer for the export pipeline
///
/// Walks the flyer document and paints it onto an `image::RgbaImage` at a
/// fixed oversampling factor. The same walker runs twice per node: a dry
/// pass to measure heights, then a paint pass. Text goes through rusttype;
/// when no font is supplied (tests on fontless machines) text lines are
/// painted as muted placeholder bars so layout stays exercised.

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use rusttype::{point, Font, Scale};

use super::SlotRasters;
use crate::flyer::doc::{Align, Node};
use crate::flyer::projects::PROJECTS;
use crate::flyer::qr;
use crate::flyer::render::FlyerDocument;
use crate::theme::{ColorRole, ResolvedPalette, Rgb};

/// Logical page width; the original flyer surface
pub const PAGE_WIDTH: u32 = 800;

/// Oversampling factor for output quality
pub const EXPORT_SCALE: u32 = 3;

/// Logical page margin around non-header bands
const PAGE_MARGIN: u16 = 24;

/// Multiplier from font size to line height
const LINE_SPACING: f32 = 1.4;

/// Rasterize a document at export scale.
///
/// The page background is the resolved surface color of the document's
/// palette, i.e. the active theme/dark-mode combination.
pub fn rasterize(doc: &FlyerDocument, slots: &SlotRasters, font: Option<&Font<'_>>) -> RgbaImage {
    let width = PAGE_WIDTH * EXPORT_SCALE;
    let mut painter = Painter {
        canvas: RgbaImage::new(1, 1),
        palette: doc.palette,
        slots,
        font,
        scale: EXPORT_SCALE as f32,
    };

    let height = painter.page(&doc.root, width, true).max(1);
    painter.canvas = RgbaImage::from_pixel(width, height, doc.palette.surface.into());
    painter.page(&doc.root, width, false);
    painter.canvas
}

struct Painter<'a> {
    canvas: RgbaImage,
    palette: ResolvedPalette,
    slots: &'a SlotRasters,
    font: Option<&'a Font<'a>>,
    scale: f32,
}

impl Painter<'_> {
    fn px(&self, logical: u16) -> u32 {
        (logical as f32 * self.scale).round() as u32
    }

    fn color(&self, role: ColorRole) -> Rgb {
        self.palette.color(role)
    }

    /// Lay out the root column. Gradient bands bleed to the page edges;
    /// everything else sits inside the page margin.
    fn page(&mut self, root: &Node, width: u32, dry: bool) -> u32 {
        let Node::Column { spacing, children } = root else {
            return self.layout(root, 0, 0, width, dry);
        };
        let margin = self.px(PAGE_MARGIN);
        let mut y = 0;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                y += self.px(*spacing);
            }
            let h = if matches!(child, Node::GradientBand { .. }) {
                self.layout(child, 0, y, width, dry)
            } else {
                if i == 0 {
                    y += margin;
                }
                self.layout(child, margin, y, width.saturating_sub(2 * margin), dry)
            };
            y += h;
        }
        y + margin
    }

    /// Lay out children stacked vertically; returns the total height.
    fn seq(&mut self, children: &[Node], x: u32, y: u32, width: u32, spacing: u16, dry: bool) -> u32 {
        let mut cursor = 0;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                cursor += self.px(spacing);
            }
            cursor += self.layout(child, x, y + cursor, width, dry);
        }
        cursor
    }

    /// Measure (dry) or paint one node; returns its height in device px.
    fn layout(&mut self, node: &Node, x: u32, y: u32, width: u32, dry: bool) -> u32 {
        match node {
            Node::Column { spacing, children } => self.seq(children, x, y, width, *spacing, dry),

            Node::Split { ratio, spacing, tinted_left, left, right } => {
                self.split(*ratio, *spacing, *tinted_left, left, right, x, y, width, dry)
            }

            Node::GradientBand { padding, children } => {
                let pad = self.px(*padding);
                let inner_w = width.saturating_sub(2 * pad);
                let inner_h = self.seq(children, x + pad, y + pad, inner_w, 10, true);
                let h = inner_h + 2 * pad;
                if !dry {
                    let gradient = self.palette.header_gradient;
                    for dy in 0..h {
                        for dx in 0..width {
                            let t = dx as f32 / width.max(1) as f32;
                            self.put(x + dx, y + dy, gradient.sample(t));
                        }
                    }
                    self.seq(children, x + pad, y + pad, inner_w, 10, false);
                }
                h
            }

            Node::Card { tint, accent, padding, children } => {
                let pad = self.px(*padding);
                let stripe = if accent.is_some() { self.px(4) } else { 0 };
                let inner_x = x + stripe + pad;
                let inner_w = width.saturating_sub(stripe + 2 * pad);
                let inner_h = self.seq(children, inner_x, y + pad, inner_w, 6, true);
                let h = inner_h + 2 * pad;
                if !dry {
                    self.fill_rect(x, y, width, h, self.color(*tint));
                    if let Some(accent) = accent {
                        self.fill_rect(x, y, stripe, h, self.color(*accent));
                    }
                    self.seq(children, inner_x, y + pad, inner_w, 6, false);
                }
                h
            }

            Node::TitledCard { title, title_bg, children } => {
                let pad = self.px(12);
                let bar_pad = self.px(8);
                let title_size = 16.0 * self.scale;
                let bar_h = self.line_height(title_size) + 2 * bar_pad;
                let inner_w = width.saturating_sub(2 * pad);
                let inner_h = self.seq(children, x + pad, y + bar_h + pad, inner_w, 10, true);
                let h = bar_h + inner_h + 2 * pad;
                if !dry {
                    self.fill_rect(x, y, width, bar_h, self.color(*title_bg));
                    self.fill_rect(x, y + bar_h, width, inner_h + 2 * pad, self.color(ColorRole::Card));
                    self.text_line(
                        title,
                        (x + pad) as f32,
                        (y + bar_pad) as f32,
                        title_size,
                        self.color(ColorRole::TextInverse),
                        true,
                    );
                    self.seq(children, x + pad, y + bar_h + pad, inner_w, 10, false);
                }
                h
            }

            Node::Text { content, size, color, bold, align } => {
                self.text_block(content, x, y, width, *size, *color, *bold, *align, dry)
            }

            Node::IconLine { text, color, .. } => {
                let text_size = 14.0 * self.scale;
                let indent = self.px(22);
                let lines = self.wrap(text, text_size, width.saturating_sub(indent) as f32);
                let line_h = self.line_height(text_size);
                let h = (lines.len() as u32 * line_h).max(self.px(12));
                if !dry {
                    let r = 5.0 * self.scale;
                    self.fill_circle(
                        x as f32 + r,
                        y as f32 + line_h as f32 / 2.0,
                        r,
                        self.color(*color),
                    );
                    for (i, line) in lines.iter().enumerate() {
                        self.draw_or_bar(
                            line,
                            (x + indent) as f32,
                            (y + i as u32 * line_h) as f32,
                            text_size,
                            self.color(ColorRole::Text),
                            false,
                        );
                    }
                }
                h
            }

            Node::SectionHeading { text, marker } => {
                let size = 16.0 * self.scale;
                let line_h = self.line_height(size);
                let h = line_h + self.px(8);
                if !dry {
                    let square = self.px(12);
                    let inset = (line_h.saturating_sub(square)) / 2;
                    self.fill_rect(x, y + inset, square, square, self.color(*marker));
                    self.draw_or_bar(
                        text,
                        (x + self.px(20)) as f32,
                        y as f32,
                        size,
                        self.color(ColorRole::Text),
                        true,
                    );
                    self.fill_rect(x, y + h - self.scale as u32, width, self.scale as u32, self.color(ColorRole::Border));
                }
                h
            }

            Node::Avatar { initials, diameter } => {
                let d = self.px(*diameter);
                let cx = (x + width / 2) as f32;
                let cy = (y + d / 2) as f32;
                if !dry {
                    let ring = 3.0 * self.scale;
                    self.fill_circle(cx, cy, d as f32 / 2.0 + ring, self.color(ColorRole::Primary));
                    match self.slots.profile.clone() {
                        Some(raster) => {
                            let photo = cover(&raster, d, d);
                            self.blit_circular(&photo, cx, cy, d as f32 / 2.0);
                        }
                        None => {
                            let size = d as f32 * 0.38;
                            let tw = self.text_width(initials, size);
                            self.text_line(
                                initials,
                                cx - tw / 2.0,
                                cy - self.line_height(size) as f32 / 2.0,
                                size,
                                self.color(ColorRole::TextInverse),
                                true,
                            );
                        }
                    }
                }
                d + self.px(4)
            }

            Node::ProjectGrid { columns, captions } => {
                let cols = (*columns).max(1) as u32;
                let gap = self.px(10);
                let cell_w = (width.saturating_sub((cols - 1) * gap)) / cols;
                let cell_h = cell_w * 9 / 16;
                if !dry {
                    for (i, project) in PROJECTS.iter().enumerate() {
                        let cx = x + (i as u32 % cols) * (cell_w + gap);
                        let cy = y + (i as u32 / cols) * (cell_h + gap);
                        self.project_thumb(i, cx, cy, cell_w, cell_h);
                        if *captions {
                            self.project_caption(project.title, cx, cy, cell_w, cell_h);
                        }
                    }
                }
                let rows = (PROJECTS.len() as u32).div_ceil(cols);
                rows * cell_h + (rows - 1) * gap
            }

            Node::Qr { payload, size } => {
                let pad = self.px(8);
                let target = self.px(*size);
                match qr::qr_image(
                    payload,
                    1,
                    self.color(ColorRole::QrDark),
                    self.color(ColorRole::QrLight),
                    false,
                ) {
                    Ok(glyph) => {
                        let module = (target / glyph.width()).max(1);
                        let edge = glyph.width() * module;
                        let gx = x + (width.saturating_sub(edge + 2 * pad)) / 2;
                        if !dry {
                            self.fill_rect(gx, y, edge + 2 * pad, edge + 2 * pad, self.color(ColorRole::QrLight));
                            let scaled = image::imageops::resize(&glyph, edge, edge, FilterType::Nearest);
                            self.blit(&scaled, gx + pad, y + pad);
                        }
                        edge + 2 * pad
                    }
                    Err(e) => {
                        if !dry {
                            eprintln!("⚠️  QR generation failed: {:?}", e);
                            self.fill_rect(x, y, target + 2 * pad, target + 2 * pad, self.color(ColorRole::QrLight));
                        }
                        target + 2 * pad
                    }
                }
            }

            Node::Spacer(h) => self.px(*h),

            Node::Rule => {
                let h = self.scale.round() as u32;
                if !dry {
                    self.fill_rect(x, y, width, h, self.color(ColorRole::Border));
                }
                h
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn split(
        &mut self,
        ratio: (u16, u16),
        spacing: u16,
        tinted_left: bool,
        left: &[Node],
        right: &[Node],
        x: u32,
        y: u32,
        width: u32,
        dry: bool,
    ) -> u32 {
        let gap = self.px(spacing);
        let total = (ratio.0 + ratio.1).max(1) as u64;
        let left_w = ((width.saturating_sub(gap)) as u64 * ratio.0 as u64 / total) as u32;
        let right_w = width.saturating_sub(gap + left_w);
        let pad = if tinted_left { self.px(12) } else { 0 };

        let left_h = self.seq(left, x + pad, y + pad, left_w.saturating_sub(2 * pad), 14, true) + 2 * pad;
        let right_h = self.seq(right, x + left_w + gap, y, right_w, 14, true);
        let h = left_h.max(right_h);

        if !dry {
            if tinted_left {
                self.fill_rect(x, y, left_w, h, self.color(ColorRole::Card));
            }
            self.seq(left, x + pad, y + pad, left_w.saturating_sub(2 * pad), 14, false);
            self.seq(right, x + left_w + gap, y, right_w, 14, false);
        }
        h
    }

    #[allow(clippy::too_many_arguments)]
    fn text_block(
        &mut self,
        content: &str,
        x: u32,
        y: u32,
        width: u32,
        size: u16,
        color: ColorRole,
        bold: bool,
        align: Align,
        dry: bool,
    ) -> u32 {
        let size_px = size as f32 * self.scale;
        let lines = self.wrap(content, size_px, width as f32);
        let line_h = self.line_height(size_px);
        if !dry {
            for (i, line) in lines.iter().enumerate() {
                let lx = match align {
                    Align::Left => x as f32,
                    Align::Center => {
                        let tw = self.text_width(line, size_px);
                        x as f32 + (width as f32 - tw).max(0.0) / 2.0
                    }
                };
                self.draw_or_bar(line, lx, (y + i as u32 * line_h) as f32, size_px, self.color(color), bold);
            }
        }
        lines.len() as u32 * line_h
    }

    fn line_height(&self, size_px: f32) -> u32 {
        (size_px * LINE_SPACING).round() as u32
    }

    /// Greedy word wrap against measured (or estimated) widths.
    fn wrap(&self, text: &str, size_px: f32, max_w: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if !current.is_empty() && self.text_width(&candidate, size_px) > max_w {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    fn text_width(&self, text: &str, size_px: f32) -> f32 {
        match self.font {
            Some(font) => {
                let scale = Scale::uniform(size_px);
                font.layout(text, scale, point(0.0, 0.0))
                    .last()
                    .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                    .unwrap_or(0.0)
            }
            // Rough average advance; only used on fontless machines
            None => text.chars().count() as f32 * size_px * 0.55,
        }
    }

    /// Draw a text line, or a muted placeholder bar when no font is loaded.
    fn draw_or_bar(&mut self, text: &str, x: f32, y_top: f32, size_px: f32, color: Rgb, bold: bool) {
        if self.font.is_some() {
            self.text_line(text, x, y_top, size_px, color, bold);
        } else if !text.is_empty() {
            let w = self.text_width(text, size_px).min(self.canvas.width() as f32 - x);
            let bar = color.mix(self.palette.surface, 0.6);
            self.fill_rect(
                x as u32,
                (y_top + size_px * 0.3) as u32,
                w.max(0.0) as u32,
                (size_px * 0.5) as u32,
                bar,
            );
        }
    }

    fn text_line(&mut self, text: &str, x: f32, y_top: f32, size_px: f32, color: Rgb, bold: bool) {
        let Some(font) = self.font else { return };
        let scale = Scale::uniform(size_px);
        let ascent = font.v_metrics(scale).ascent;
        // Faux bold: a second pass offset by a fraction of a pixel
        let passes: &[f32] = if bold { &[0.0, 0.8] } else { &[0.0] };
        for &offset in passes {
            let glyphs: Vec<_> = font
                .layout(text, scale, point(x + offset, y_top + ascent))
                .collect();
            for glyph in glyphs {
                if let Some(bb) = glyph.pixel_bounding_box() {
                    glyph.draw(|gx, gy, coverage| {
                        self.blend(bb.min.x + gx as i32, bb.min.y + gy as i32, color, coverage);
                    });
                }
            }
        }
    }

    fn project_thumb(&mut self, index: usize, x: u32, y: u32, w: u32, h: u32) {
        match self.slots.work[index].clone() {
            Some(raster) => {
                let thumb = cover(&raster, w, h);
                self.blit(&thumb, x, y);
            }
            None => {
                // Placeholder art: a per-project blend of the brand colors
                let top = self.palette.primary.mix(self.palette.secondary, index as f32 / 2.0);
                let bottom = top.mix(self.palette.accent, 0.5);
                for dy in 0..h {
                    let row = top.mix(bottom, dy as f32 / h.max(1) as f32);
                    for dx in 0..w {
                        self.put(x + dx, y + dy, row);
                    }
                }
            }
        }
        // 1px frame
        let b = self.color(ColorRole::Border);
        let t = self.scale.round() as u32;
        self.fill_rect(x, y, w, t, b);
        self.fill_rect(x, y + h.saturating_sub(t), w, t, b);
        self.fill_rect(x, y, t, h, b);
        self.fill_rect(x + w.saturating_sub(t), y, t, h, b);
    }

    fn project_caption(&mut self, title: &str, x: u32, y: u32, w: u32, h: u32) {
        let bar_h = self.px(26);
        let bar_y = y + h.saturating_sub(bar_h);
        for dy in 0..bar_h {
            for dx in 0..w {
                self.blend((x + dx) as i32, (bar_y + dy) as i32, Rgb::hex(0x000000), 0.55);
            }
        }
        let size = 10.0 * self.scale;
        let tw = self.text_width(title, size);
        let tx = x as f32 + (w as f32 - tw).max(0.0) / 2.0;
        let ty = bar_y as f32 + (bar_h as f32 - self.line_height(size) as f32) / 2.0;
        self.draw_or_bar(title, tx, ty, size, Rgb::hex(0xffffff), false);
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb) {
        let (w, h) = self.canvas.dimensions();
        if x < w && y < h {
            self.canvas.put_pixel(x, y, color.into());
        }
    }

    fn blend(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if alpha <= 0.0 || x < 0 || y < 0 {
            return;
        }
        let (w, h) = self.canvas.dimensions();
        let (x, y) = (x as u32, y as u32);
        if x >= w || y >= h {
            return;
        }
        let a = alpha.min(1.0);
        let px = self.canvas.get_pixel_mut(x, y);
        let src = [color.r, color.g, color.b];
        for i in 0..3 {
            px.0[i] = (px.0[i] as f32 * (1.0 - a) + src[i] as f32 * a).round() as u8;
        }
        px.0[3] = 255;
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        let x0 = (cx - r - 1.0).max(0.0) as i32;
        let y0 = (cy - r - 1.0).max(0.0) as i32;
        let x1 = (cx + r + 1.0) as i32;
        let y1 = (cy + r + 1.0) as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dist = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
                self.blend(x, y, color, (r - dist + 0.5).clamp(0.0, 1.0));
            }
        }
    }

    fn blit(&mut self, src: &RgbaImage, x: u32, y: u32) {
        for (sx, sy, pixel) in src.enumerate_pixels() {
            let (w, h) = self.canvas.dimensions();
            if x + sx < w && y + sy < h {
                self.canvas.put_pixel(x + sx, y + sy, *pixel);
            }
        }
    }

    fn blit_circular(&mut self, src: &RgbaImage, cx: f32, cy: f32, r: f32) {
        let x0 = (cx - r) as i32;
        let y0 = (cy - r) as i32;
        for (sx, sy, pixel) in src.enumerate_pixels() {
            let x = x0 + sx as i32;
            let y = y0 + sy as i32;
            let dist = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            let coverage = (r - dist + 0.5).clamp(0.0, 1.0);
            self.blend(x, y, Rgb::new(pixel.0[0], pixel.0[1], pixel.0[2]), coverage);
        }
    }
}

/// Resize-and-crop to fill the target rectangle, centered.
fn cover(src: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    DynamicImage::ImageRgba8(src.clone())
        .resize_to_fill(w.max(1), h.max(1), FilterType::Triangle)
        .to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::layout::{LayoutId, LAYOUTS};
    use crate::flyer::render;
    use crate::state::content::FlyerContent;
    use crate::theme::FlyerTheme;
    use std::sync::Arc;

    fn doc(theme: &str, layout: LayoutId, dark: bool) -> FlyerDocument {
        let content = FlyerContent::default();
        render::render(&content, FlyerTheme::lookup(theme), layout, dark, 2026)
    }

    #[test]
    fn test_capture_background_is_the_theme_surface() {
        let doc = doc("bold", LayoutId::Compact, true);
        let img = rasterize(&doc, &SlotRasters::default(), None);

        assert_eq!(img.width(), PAGE_WIDTH * EXPORT_SCALE);
        let expected: image::Rgba<u8> = FlyerTheme::lookup("bold").bg_dark.into();
        // Bottom corners sit in the page margin on every layout
        assert_eq!(*img.get_pixel(0, img.height() - 1), expected);
        assert_eq!(*img.get_pixel(img.width() - 1, img.height() - 1), expected);
    }

    #[test]
    fn test_light_mode_uses_the_light_surface() {
        let doc = doc("bold", LayoutId::Standard, false);
        let img = rasterize(&doc, &SlotRasters::default(), None);
        let expected: image::Rgba<u8> = FlyerTheme::lookup("bold").bg_light.into();
        assert_eq!(*img.get_pixel(0, img.height() - 1), expected);
    }

    #[test]
    fn test_every_layout_rasterizes_without_uploads() {
        // Defaults only: no slot may be required for a successful paint
        for info in LAYOUTS {
            for dark in [false, true] {
                let doc = doc("modern", info.id, dark);
                let img = rasterize(&doc, &SlotRasters::default(), None);
                assert!(img.height() > 200, "{:?} came out {}px tall", info.id, img.height());
            }
        }
    }

    #[test]
    fn test_work_slot_raster_overrides_placeholder() {
        let doc = doc("minimal", LayoutId::Standard, false);
        let marker = RgbaImage::from_pixel(64, 64, image::Rgba([1, 2, 3, 255]));
        let mut slots = SlotRasters::default();
        slots.work[0] = Some(Arc::new(marker));

        let img = rasterize(&doc, &slots, None);
        // The solid-color upload must appear somewhere in the output
        let found = img.pixels().any(|p| p.0 == [1, 2, 3, 255]);
        assert!(found, "uploaded work sample never painted");
    }

    #[test]
    fn test_header_gradient_bleeds_to_the_page_edge() {
        // Standard opens with a full-width gradient ribbon at y = 0
        let doc = doc("modern", LayoutId::Standard, false);
        let img = rasterize(&doc, &SlotRasters::default(), None);

        let surface: image::Rgba<u8> = FlyerTheme::lookup("modern").bg_light.into();
        assert_ne!(*img.get_pixel(0, 0), surface);
        assert_ne!(*img.get_pixel(img.width() - 1, 0), surface);
    }

    #[test]
    fn test_dry_and_paint_passes_agree_on_height() {
        let doc = doc("corporate", LayoutId::Cards, true);
        let a = rasterize(&doc, &SlotRasters::default(), None);
        let b = rasterize(&doc, &SlotRasters::default(), None);
        assert_eq!(a.dimensions(), b.dimensions());
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
