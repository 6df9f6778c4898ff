/// The template renderer entry point
///
/// `render` is a pure function: identical inputs (including the injected
/// year) produce an identical document. One generic composer walks the
/// selected layout's plan; no layout has bespoke tree-building code.

use crate::flyer::doc::Node;
use crate::flyer::fragments::{self, FragmentCtx};
use crate::flyer::layout::{self, Band, CompositionPlan, FragmentId, Header, LayoutId};
use crate::state::content::FlyerContent;
use crate::theme::{ColorRole, FlyerTheme, ResolvedPalette};

/// Vertical gap between bands
const BAND_SPACING: u16 = 18;

/// The composed flyer: a role-tagged tree plus the palette to resolve the
/// roles against. Both the on-screen preview and the export rasterizer
/// consume this and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyerDocument {
    pub layout: LayoutId,
    pub palette: ResolvedPalette,
    pub root: Node,
}

impl FlyerDocument {
    pub fn node_count(&self) -> usize {
        self.root.count()
    }
}

/// Compose the flyer document.
pub fn render(
    content: &FlyerContent,
    theme: &'static FlyerTheme,
    layout: LayoutId,
    dark_mode: bool,
    year: i32,
) -> FlyerDocument {
    let ctx = FragmentCtx { content, year };
    let plan = layout::plan(layout);

    let mut bands = Vec::new();
    if let Some(header) = header_node(plan, &ctx) {
        bands.push(header);
    }
    for band in plan.bands {
        bands.push(band_node(band, &ctx));
    }

    FlyerDocument {
        layout,
        palette: ResolvedPalette::resolve(theme, dark_mode),
        root: Node::column(BAND_SPACING, bands),
    }
}

fn header_node(plan: &CompositionPlan, ctx: &FragmentCtx) -> Option<Node> {
    let node = match plan.header {
        Header::Ribbon => Node::GradientBand { padding: 10, children: vec![] },
        Header::Hero => Node::GradientBand {
            padding: 28,
            children: vec![fragments::profile_hero(ctx)],
        },
        Header::Banner => Node::GradientBand {
            padding: 20,
            children: vec![fragments::profile_banner(ctx)],
        },
        Header::CompactRow => Node::GradientBand {
            padding: 12,
            children: vec![fragments::profile_compact(ctx)],
        },
        Header::None => return None,
    };
    Some(node)
}

fn band_node(band: &Band, ctx: &FragmentCtx) -> Node {
    match band {
        Band::Full(ids) => Node::column(16, ids.iter().map(|id| fragments::build(*id, ctx)).collect()),
        Band::Split { left, right, ratio, tinted_left } => Node::Split {
            ratio: *ratio,
            spacing: 16,
            tinted_left: *tinted_left,
            left: left.iter().map(|id| fragments::build(*id, ctx)).collect(),
            right: right.iter().map(|id| fragments::build(*id, ctx)).collect(),
        },
        Band::Cards(cells) => {
            // Titled cards, two per row; an odd last card spans the row
            let cards: Vec<Node> = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| titled_card(i, cell, ctx))
                .collect();
            let mut rows = Vec::new();
            let mut iter = cards.into_iter().peekable();
            while let Some(first) = iter.next() {
                match iter.next() {
                    Some(second) => rows.push(Node::Split {
                        ratio: (1, 1),
                        spacing: 14,
                        tinted_left: false,
                        left: vec![first],
                        right: vec![second],
                    }),
                    None => rows.push(first),
                }
            }
            Node::column(14, rows)
        }
    }
}

fn titled_card(index: usize, cell: &[FragmentId], ctx: &FragmentCtx) -> Node {
    let title_bg = if index % 2 == 0 { ColorRole::Primary } else { ColorRole::Secondary };
    Node::TitledCard {
        title: cell[0].title().to_string(),
        title_bg,
        children: cell.iter().map(|id| fragments::build(*id, ctx)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(layout: LayoutId, dark: bool) -> FlyerDocument {
        let content = FlyerContent::default();
        render(&content, FlyerTheme::lookup("modern"), layout, dark, 2026)
    }

    #[test]
    fn test_render_is_pure_with_a_frozen_year() {
        let content = FlyerContent::default();
        let theme = FlyerTheme::lookup("bold");
        let a = render(&content, theme, LayoutId::Grid, true, 2026);
        let b = render(&content, theme, LayoutId::Grid, true, 2026);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_layout_id_renders_exactly_like_standard() {
        let content = FlyerContent::default();
        let theme = FlyerTheme::lookup("modern");
        let fallback = render(&content, theme, LayoutId::lookup("mystery"), false, 2026);
        let standard = render(&content, theme, LayoutId::Standard, false, 2026);

        assert_eq!(fallback.root, standard.root);
        assert_eq!(fallback.node_count(), standard.node_count());
    }

    #[test]
    fn test_dark_mode_changes_palette_but_never_the_tree() {
        for info in layout::LAYOUTS {
            let light = doc(info.id, false);
            let dark = doc(info.id, true);
            assert_eq!(light.root, dark.root, "tree changed for {:?}", info.id);
            assert_ne!(light.palette, dark.palette);
        }
    }

    #[test]
    fn test_every_layout_renders_a_nonempty_document() {
        for info in layout::LAYOUTS {
            let d = doc(info.id, false);
            // Header (where present) + bands + fragments; well past trivial
            assert!(d.node_count() > 20, "{:?} produced {} nodes", info.id, d.node_count());
        }
    }

    #[test]
    fn test_layouts_differ_from_each_other() {
        let standard = doc(LayoutId::Standard, false);
        for id in [LayoutId::Centered, LayoutId::Grid, LayoutId::Sidebar, LayoutId::Cards, LayoutId::Compact] {
            assert_ne!(standard.root, doc(id, false).root, "{:?} equals standard", id);
        }
    }

    #[test]
    fn test_default_content_renders_without_any_uploads() {
        // Image slots never feed the tree; defaults alone must compose
        let d = doc(LayoutId::Compact, true);
        assert_eq!(d.palette.surface, FlyerTheme::lookup("modern").bg_dark);
        assert!(d.node_count() > 0);
    }
}
