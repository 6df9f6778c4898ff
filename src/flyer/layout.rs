/// Layout registry and composition plans
///
/// Each layout is data: a header style plus an ordered list of bands that
/// place fragment ids into regions. One generic compose function (render.rs)
/// instantiates every plan — there is no per-layout tree-building code.

/// The six layout identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutId {
    #[default]
    Standard,
    Centered,
    Grid,
    Sidebar,
    Cards,
    Compact,
}

/// Registry metadata for the layout picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInfo {
    pub id: LayoutId,
    /// Stable string id used by the selection state
    pub key: &'static str,
    pub name: &'static str,
    /// Icon token shown in the picker
    pub icon: &'static str,
}

pub const LAYOUTS: &[LayoutInfo] = &[
    LayoutInfo { id: LayoutId::Standard, key: "standard", name: "Standard", icon: "▥" },
    LayoutInfo { id: LayoutId::Centered, key: "centered", name: "Centered", icon: "▤" },
    LayoutInfo { id: LayoutId::Grid, key: "grid", name: "Grid", icon: "▦" },
    LayoutInfo { id: LayoutId::Sidebar, key: "sidebar", name: "Sidebar", icon: "◧" },
    LayoutInfo { id: LayoutId::Cards, key: "cards", name: "Cards", icon: "▣" },
    LayoutInfo { id: LayoutId::Compact, key: "compact", name: "Compact", icon: "▬" },
];

impl LayoutId {
    /// Resolve a string id; unknown ids fall back to `standard`.
    pub fn lookup(key: &str) -> LayoutId {
        LAYOUTS
            .iter()
            .find(|l| l.key == key)
            .map(|l| l.id)
            .unwrap_or(LayoutId::Standard)
    }

    pub fn info(self) -> &'static LayoutInfo {
        LAYOUTS
            .iter()
            .find(|l| l.id == self)
            .expect("every LayoutId has a registry entry")
    }
}

/// The eight shared fragments every layout arranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentId {
    Profile,
    Contact,
    Social,
    Qr,
    Projects,
    Skills,
    Cta,
    Footer,
}

impl FragmentId {
    /// Display title used by the titled-card layout
    pub fn title(self) -> &'static str {
        match self {
            FragmentId::Profile => "About Me",
            FragmentId::Contact => "Contact Information",
            FragmentId::Social => "Connect With Me",
            FragmentId::Qr => "Scan to view my GitHub",
            FragmentId::Projects => "Featured Projects",
            FragmentId::Skills => "Technical Expertise",
            FragmentId::Cta => "Let's Work Together",
            FragmentId::Footer => "Footer",
        }
    }
}

/// How the top of the flyer opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Thin gradient ribbon; the profile fragment lives in a band below
    Ribbon,
    /// Tall gradient band with the profile fragment centered inside it
    Hero,
    /// Gradient band with the avatar beside name/title/bio
    Banner,
    /// Single-row gradient strip with a small avatar
    CompactRow,
    /// No header at all (sidebar layout)
    None,
}

impl Header {
    /// Whether this header style absorbs the profile fragment.
    pub fn includes_profile(self) -> bool {
        matches!(self, Header::Hero | Header::Banner | Header::CompactRow)
    }
}

/// One horizontal band of the composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Fragments stacked across the full page width
    Full(&'static [FragmentId]),
    /// Two columns with a width ratio
    Split {
        left: &'static [FragmentId],
        right: &'static [FragmentId],
        ratio: (u16, u16),
        /// Paint the left column with the card tint (sidebar layout)
        tinted_left: bool,
    },
    /// Each cell becomes a titled card, laid out two per row
    Cards(&'static [&'static [FragmentId]]),
}

/// A complete layout: header style plus ordered band placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionPlan {
    pub header: Header,
    pub bands: &'static [Band],
}

const STANDARD: CompositionPlan = CompositionPlan {
    header: Header::Ribbon,
    bands: &[
        Band::Split {
            left: &[FragmentId::Profile, FragmentId::Contact, FragmentId::Social, FragmentId::Qr],
            right: &[FragmentId::Projects, FragmentId::Skills, FragmentId::Cta],
            ratio: (1, 2),
            tinted_left: false,
        },
        Band::Full(&[FragmentId::Footer]),
    ],
};

const CENTERED: CompositionPlan = CompositionPlan {
    header: Header::Hero,
    bands: &[
        Band::Full(&[FragmentId::Projects]),
        Band::Full(&[FragmentId::Skills]),
        Band::Split {
            left: &[FragmentId::Contact],
            right: &[FragmentId::Social, FragmentId::Qr],
            ratio: (1, 1),
            tinted_left: false,
        },
        Band::Full(&[FragmentId::Cta]),
        Band::Full(&[FragmentId::Footer]),
    ],
};

const GRID: CompositionPlan = CompositionPlan {
    header: Header::Banner,
    bands: &[
        Band::Split {
            left: &[FragmentId::Projects],
            right: &[FragmentId::Contact, FragmentId::Social, FragmentId::Qr],
            ratio: (2, 1),
            tinted_left: false,
        },
        Band::Full(&[FragmentId::Skills]),
        Band::Full(&[FragmentId::Cta]),
        Band::Full(&[FragmentId::Footer]),
    ],
};

const SIDEBAR: CompositionPlan = CompositionPlan {
    header: Header::None,
    bands: &[
        Band::Split {
            left: &[FragmentId::Profile, FragmentId::Contact, FragmentId::Social, FragmentId::Qr],
            right: &[FragmentId::Projects, FragmentId::Skills, FragmentId::Cta],
            ratio: (1, 2),
            tinted_left: true,
        },
        Band::Full(&[FragmentId::Footer]),
    ],
};

const CARDS: CompositionPlan = CompositionPlan {
    header: Header::Hero,
    bands: &[
        Band::Cards(&[
            &[FragmentId::Projects],
            &[FragmentId::Skills],
            &[FragmentId::Contact],
            &[FragmentId::Social, FragmentId::Qr],
            &[FragmentId::Cta],
        ]),
        Band::Full(&[FragmentId::Footer]),
    ],
};

const COMPACT: CompositionPlan = CompositionPlan {
    header: Header::CompactRow,
    bands: &[
        Band::Full(&[FragmentId::Projects]),
        Band::Full(&[FragmentId::Skills]),
        Band::Split {
            left: &[FragmentId::Contact, FragmentId::Social],
            right: &[FragmentId::Qr],
            ratio: (2, 1),
            tinted_left: false,
        },
        Band::Full(&[FragmentId::Footer]),
    ],
};

/// Total mapping from layout id to its composition plan.
pub fn plan(layout: LayoutId) -> &'static CompositionPlan {
    match layout {
        LayoutId::Standard => &STANDARD,
        LayoutId::Centered => &CENTERED,
        LayoutId::Grid => &GRID,
        LayoutId::Sidebar => &SIDEBAR,
        LayoutId::Cards => &CARDS,
        LayoutId::Compact => &COMPACT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every fragment a plan places, including the profile absorbed by
    /// hero/banner/compact headers.
    fn placed_fragments(plan: &CompositionPlan) -> Vec<FragmentId> {
        let mut out = Vec::new();
        if plan.header.includes_profile() {
            out.push(FragmentId::Profile);
        }
        for band in plan.bands {
            match band {
                Band::Full(ids) => out.extend_from_slice(ids),
                Band::Split { left, right, .. } => {
                    out.extend_from_slice(left);
                    out.extend_from_slice(right);
                }
                Band::Cards(cells) => {
                    for cell in *cells {
                        out.extend_from_slice(cell);
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_unknown_layout_falls_back_to_standard() {
        assert_eq!(LayoutId::lookup("three-column-masonry"), LayoutId::Standard);
        assert_eq!(LayoutId::lookup(""), LayoutId::Standard);
    }

    #[test]
    fn test_registered_keys_resolve() {
        for info in LAYOUTS {
            assert_eq!(LayoutId::lookup(info.key), info.id);
        }
    }

    #[test]
    fn test_every_plan_places_all_eight_fragments_once() {
        const ALL: [FragmentId; 8] = [
            FragmentId::Profile,
            FragmentId::Contact,
            FragmentId::Social,
            FragmentId::Qr,
            FragmentId::Projects,
            FragmentId::Skills,
            FragmentId::Cta,
            FragmentId::Footer,
        ];
        for info in LAYOUTS {
            let placed = placed_fragments(plan(info.id));
            for id in ALL {
                let count = placed.iter().filter(|&&f| f == id).count();
                assert_eq!(count, 1, "{:?} places {:?} {} times", info.id, id, count);
            }
        }
    }

    #[test]
    fn test_footer_is_always_the_last_band() {
        for info in LAYOUTS {
            let bands = plan(info.id).bands;
            assert_eq!(bands.last(), Some(&Band::Full(&[FragmentId::Footer])));
        }
    }
}
