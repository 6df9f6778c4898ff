/// Theme registry: the fixed set of flyer color palettes
///
/// Every color the renderer touches is a typed `Rgb` value resolved through
/// `ResolvedPalette` — fragments never build color strings by hand. The
/// registry is const data; themes are selected by id with a defined fallback.

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed 0xRRGGBB value.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Linear blend toward `other`: t = 0.0 keeps self, t = 1.0 gives other.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl From<Rgb> for iced::Color {
    fn from(c: Rgb) -> Self {
        iced::Color::from_rgb8(c.r, c.g, c.b)
    }
}

impl From<Rgb> for image::Rgba<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgba([c.r, c.g, c.b, 255])
    }
}

/// Header gradient: two or three stops swept left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub stops: &'static [Rgb],
}

impl Gradient {
    /// Sample the gradient at t in 0..=1.
    pub fn sample(&self, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        if self.stops.len() == 1 {
            return self.stops[0];
        }
        let segments = (self.stops.len() - 1) as f32;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(self.stops.len() - 2);
        self.stops[i].mix(self.stops[i + 1], pos - i as f32)
    }
}

/// One entry in the theme registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlyerTheme {
    /// Stable identifier used by the selection state
    pub id: &'static str,
    /// Human-readable name shown in the theme picker
    pub name: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub bg_light: Rgb,
    pub bg_dark: Rgb,
    pub card_light: Rgb,
    pub card_dark: Rgb,
    pub header_gradient: Gradient,
}

/// The six built-in themes. Fixed at build time by design.
pub const THEMES: &[FlyerTheme] = &[
    FlyerTheme {
        id: "modern",
        name: "Modern Professional",
        primary: Rgb::hex(0x2563eb),
        secondary: Rgb::hex(0x7c3aed),
        accent: Rgb::hex(0xf472b6),
        bg_light: Rgb::hex(0xffffff),
        bg_dark: Rgb::hex(0x1a1a1a),
        card_light: Rgb::hex(0xf9fafb),
        card_dark: Rgb::hex(0x1f2937),
        header_gradient: Gradient {
            stops: &[Rgb::hex(0x2563eb), Rgb::hex(0xa855f7), Rgb::hex(0xec4899)],
        },
    },
    FlyerTheme {
        id: "minimal",
        name: "Minimal Clean",
        primary: Rgb::hex(0x0ea5e9),
        secondary: Rgb::hex(0x14b8a6),
        accent: Rgb::hex(0x22d3ee),
        bg_light: Rgb::hex(0xf8fafc),
        bg_dark: Rgb::hex(0x0f172a),
        card_light: Rgb::hex(0xffffff),
        card_dark: Rgb::hex(0x1e293b),
        header_gradient: Gradient {
            stops: &[Rgb::hex(0x06b6d4), Rgb::hex(0x3b82f6)],
        },
    },
    FlyerTheme {
        id: "bold",
        name: "Bold Creative",
        primary: Rgb::hex(0xf97316),
        secondary: Rgb::hex(0xec4899),
        accent: Rgb::hex(0xeab308),
        bg_light: Rgb::hex(0xfffbeb),
        bg_dark: Rgb::hex(0x27272a),
        card_light: Rgb::hex(0xfef3c7),
        card_dark: Rgb::hex(0x3f3f46),
        header_gradient: Gradient {
            stops: &[Rgb::hex(0xf97316), Rgb::hex(0xec4899), Rgb::hex(0xeab308)],
        },
    },
    FlyerTheme {
        id: "elegant",
        name: "Elegant Dark",
        primary: Rgb::hex(0x6d28d9),
        secondary: Rgb::hex(0xdb2777),
        accent: Rgb::hex(0x8b5cf6),
        bg_light: Rgb::hex(0xf5f3ff),
        bg_dark: Rgb::hex(0x18181b),
        card_light: Rgb::hex(0xede9fe),
        card_dark: Rgb::hex(0x27272a),
        header_gradient: Gradient {
            stops: &[Rgb::hex(0x7c3aed), Rgb::hex(0x9333ea), Rgb::hex(0xc026d3)],
        },
    },
    FlyerTheme {
        id: "nature",
        name: "Natural Green",
        primary: Rgb::hex(0x16a34a),
        secondary: Rgb::hex(0x0d9488),
        accent: Rgb::hex(0x84cc16),
        bg_light: Rgb::hex(0xf0fdf4),
        bg_dark: Rgb::hex(0x1c1917),
        card_light: Rgb::hex(0xdcfce7),
        card_dark: Rgb::hex(0x292524),
        header_gradient: Gradient {
            stops: &[Rgb::hex(0x16a34a), Rgb::hex(0x10b981), Rgb::hex(0x84cc16)],
        },
    },
    FlyerTheme {
        id: "corporate",
        name: "Corporate Blue",
        primary: Rgb::hex(0x0369a1),
        secondary: Rgb::hex(0x1e40af),
        accent: Rgb::hex(0x0284c7),
        bg_light: Rgb::hex(0xf0f9ff),
        bg_dark: Rgb::hex(0x0f172a),
        card_light: Rgb::hex(0xe0f2fe),
        card_dark: Rgb::hex(0x1e293b),
        header_gradient: Gradient {
            stops: &[Rgb::hex(0x0284c7), Rgb::hex(0x1d4ed8), Rgb::hex(0x0ea5e9)],
        },
    },
];

impl FlyerTheme {
    /// Look up a theme by id.
    ///
    /// An unknown id resolves to the first registry entry — never an error.
    pub fn lookup(id: &str) -> &'static FlyerTheme {
        THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
    }
}

/// Named color roles the document tree is tagged with.
///
/// Fragments reference roles, not colors; the role → color mapping is
/// resolved once per render by `ResolvedPalette::resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    /// Body text on the page background
    Text,
    /// Secondary text (captions, footer small print)
    TextMuted,
    /// Text on gradient bands
    TextInverse,
    /// Page background
    Surface,
    /// Card background
    Card,
    /// Primary washed toward the surface (panel tints)
    PrimarySoft,
    /// Secondary washed toward the surface
    SecondarySoft,
    Border,
    /// QR codes are always dark-on-white regardless of dark mode
    QrLight,
    QrDark,
}

/// All roles resolved for one (theme, dark mode) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPalette {
    pub theme_id: &'static str,
    pub dark: bool,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub text: Rgb,
    pub text_muted: Rgb,
    pub surface: Rgb,
    pub card: Rgb,
    pub primary_soft: Rgb,
    pub secondary_soft: Rgb,
    pub border: Rgb,
    pub header_gradient: Gradient,
}

impl ResolvedPalette {
    /// Resolve every role once for the given theme and mode.
    pub fn resolve(theme: &'static FlyerTheme, dark: bool) -> Self {
        let surface = if dark { theme.bg_dark } else { theme.bg_light };
        let text = if dark { Rgb::hex(0xf5f5f5) } else { Rgb::hex(0x111111) };
        // Tint strengths match the original's 0x30/0x10 alpha washes
        let wash = if dark { 0.19 } else { 0.06 };
        Self {
            theme_id: theme.id,
            dark,
            primary: theme.primary,
            secondary: theme.secondary,
            accent: theme.accent,
            text,
            text_muted: if dark { Rgb::hex(0x9ca3af) } else { Rgb::hex(0x4b5563) },
            surface,
            card: if dark { theme.card_dark } else { theme.card_light },
            primary_soft: surface.mix(theme.primary, wash),
            secondary_soft: surface.mix(theme.secondary, wash),
            border: surface.mix(text, 0.12),
            header_gradient: theme.header_gradient,
        }
    }

    pub fn color(&self, role: ColorRole) -> Rgb {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Text => self.text,
            ColorRole::TextMuted => self.text_muted,
            ColorRole::TextInverse => Rgb::hex(0xffffff),
            ColorRole::Surface => self.surface,
            ColorRole::Card => self.card,
            ColorRole::PrimarySoft => self.primary_soft,
            ColorRole::SecondarySoft => self.secondary_soft,
            ColorRole::Border => self.border,
            ColorRole::QrLight => Rgb::hex(0xffffff),
            ColorRole::QrDark => Rgb::hex(0x000000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_falls_back_to_first() {
        let fallback = FlyerTheme::lookup("does-not-exist");
        let first = FlyerTheme::lookup(THEMES[0].id);
        assert_eq!(fallback, first);
        assert_eq!(fallback.id, "modern");
    }

    #[test]
    fn test_all_registered_ids_resolve_to_themselves() {
        for theme in THEMES {
            assert_eq!(FlyerTheme::lookup(theme.id).id, theme.id);
        }
    }

    #[test]
    fn test_dark_mode_changes_surface_not_brand_colors() {
        let theme = FlyerTheme::lookup("bold");
        let light = ResolvedPalette::resolve(theme, false);
        let dark = ResolvedPalette::resolve(theme, true);

        assert_eq!(light.primary, dark.primary);
        assert_eq!(light.secondary, dark.secondary);
        assert_eq!(light.accent, dark.accent);
        assert_ne!(light.surface, dark.surface);
        assert_eq!(light.surface, theme.bg_light);
        assert_eq!(dark.surface, theme.bg_dark);
    }

    #[test]
    fn test_gradient_sampling_hits_the_endpoints() {
        let g = FlyerTheme::lookup("modern").header_gradient;
        assert_eq!(g.sample(0.0), g.stops[0]);
        assert_eq!(g.sample(1.0), g.stops[g.stops.len() - 1]);
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Rgb::hex(0x000000);
        let b = Rgb::hex(0xffffff);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_qr_colors_ignore_dark_mode() {
        let theme = FlyerTheme::lookup("elegant");
        let light = ResolvedPalette::resolve(theme, false);
        let dark = ResolvedPalette::resolve(theme, true);
        assert_eq!(light.color(ColorRole::QrLight), dark.color(ColorRole::QrLight));
        assert_eq!(light.color(ColorRole::QrDark), dark.color(ColorRole::QrDark));
    }
}
