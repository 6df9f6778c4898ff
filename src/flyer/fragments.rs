/// The eight shared flyer fragments
///
/// Every layout composes the same fragments; only their placement differs.
/// Builders are pure: content in, role-tagged nodes out.

use crate::flyer::doc::{initials, Icon, Node};
use crate::flyer::layout::FragmentId;
use crate::flyer::qr::{display_handle, github_profile_url};
use crate::state::content::FlyerContent;
use crate::theme::ColorRole;

/// Fixed skill labels; not user-editable by design
const CORE_TECHNOLOGIES: [&str; 3] = [
    "HTML5, CSS3, JavaScript (ES6+)",
    "React.js & TypeScript",
    "Tailwind CSS",
];

const DEVELOPMENT_TOOLS: [&str; 3] = ["Git & GitHub", "Scrum & Jira", "UI/UX Development"];

/// Inputs shared by every fragment builder.
pub struct FragmentCtx<'a> {
    pub content: &'a FlyerContent,
    /// Footer copyright year, injected so renders are clock-free
    pub year: i32,
}

/// Build one fragment subtree.
pub fn build(id: FragmentId, ctx: &FragmentCtx) -> Node {
    match id {
        FragmentId::Profile => profile(ctx),
        FragmentId::Contact => contact(ctx),
        FragmentId::Social => social(ctx),
        FragmentId::Qr => qr_block(ctx),
        FragmentId::Projects => projects(ctx),
        FragmentId::Skills => skills(),
        FragmentId::Cta => cta(ctx),
        FragmentId::Footer => footer(ctx),
    }
}

/// Avatar, name, title and the bio panel — the column-style profile used
/// by the standard and sidebar arrangements.
fn profile(ctx: &FragmentCtx) -> Node {
    let c = ctx.content;
    Node::column(
        12,
        vec![
            Node::Avatar { initials: initials(&c.name), diameter: 140 },
            Node::text(&c.name, 22, ColorRole::Text).bold().centered(),
            Node::text(&c.title, 17, ColorRole::Primary).centered(),
            Node::Card {
                tint: ColorRole::PrimarySoft,
                accent: Some(ColorRole::Primary),
                padding: 14,
                children: vec![Node::text(&c.bio, 14, ColorRole::Text)],
            },
        ],
    )
}

/// Profile variant for hero headers: centered on the gradient band.
pub fn profile_hero(ctx: &FragmentCtx) -> Node {
    let c = ctx.content;
    Node::column(
        10,
        vec![
            Node::Avatar { initials: initials(&c.name), diameter: 120 },
            Node::text(&c.name, 26, ColorRole::TextInverse).bold().centered(),
            Node::text(&c.title, 18, ColorRole::TextInverse).centered(),
            Node::text(&c.bio, 14, ColorRole::TextInverse).centered(),
        ],
    )
}

/// Profile variant for banner headers: avatar beside the text block.
pub fn profile_banner(ctx: &FragmentCtx) -> Node {
    let c = ctx.content;
    Node::Split {
        ratio: (1, 3),
        spacing: 18,
        tinted_left: false,
        left: vec![Node::Avatar { initials: initials(&c.name), diameter: 110 }],
        right: vec![
            Node::text(&c.name, 24, ColorRole::TextInverse).bold(),
            Node::text(&c.title, 17, ColorRole::TextInverse),
            Node::text(&c.bio, 13, ColorRole::TextInverse),
        ],
    }
}

/// Profile variant for the compact single-row header.
pub fn profile_compact(ctx: &FragmentCtx) -> Node {
    let c = ctx.content;
    Node::Split {
        ratio: (1, 5),
        spacing: 12,
        tinted_left: false,
        left: vec![Node::Avatar { initials: initials(&c.name), diameter: 64 }],
        right: vec![
            Node::text(&c.name, 19, ColorRole::TextInverse).bold(),
            Node::text(&c.title, 13, ColorRole::TextInverse),
        ],
    }
}

fn contact(ctx: &FragmentCtx) -> Node {
    let c = ctx.content;
    Node::column(
        8,
        vec![
            Node::SectionHeading {
                text: "Contact Information".into(),
                marker: ColorRole::Primary,
            },
            Node::IconLine { icon: Icon::Phone, text: c.phone.clone(), color: ColorRole::Primary },
            Node::IconLine { icon: Icon::Mail, text: c.email.clone(), color: ColorRole::Primary },
            Node::IconLine {
                icon: Icon::MapPin,
                text: c.location.clone(),
                color: ColorRole::Primary,
            },
        ],
    )
}

fn social(ctx: &FragmentCtx) -> Node {
    let c = ctx.content;
    Node::column(
        8,
        vec![
            Node::SectionHeading { text: "Social Media".into(), marker: ColorRole::Secondary },
            Node::IconLine {
                icon: Icon::Instagram,
                text: format!("@{}", c.instagram),
                color: ColorRole::Secondary,
            },
            Node::IconLine {
                icon: Icon::Twitter,
                text: format!("@{}", c.twitter),
                color: ColorRole::Primary,
            },
            Node::IconLine {
                icon: Icon::Github,
                text: display_handle(&c.github).to_string(),
                color: ColorRole::TextMuted,
            },
        ],
    )
}

fn qr_block(ctx: &FragmentCtx) -> Node {
    Node::column(
        6,
        vec![
            Node::text("Scan to view my GitHub", 13, ColorRole::Text).bold().centered(),
            Node::Qr { payload: github_profile_url(&ctx.content.github), size: 100 },
        ],
    )
}

fn projects(ctx: &FragmentCtx) -> Node {
    let url = github_profile_url(&ctx.content.github);
    Node::column(
        10,
        vec![
            Node::SectionHeading { text: "Featured Projects".into(), marker: ColorRole::Primary },
            Node::Card {
                tint: ColorRole::PrimarySoft,
                accent: None,
                padding: 10,
                children: vec![Node::IconLine {
                    icon: Icon::Link,
                    text: format!("View all projects at: {}", url),
                    color: ColorRole::Primary,
                }],
            },
            Node::ProjectGrid { columns: 3, captions: true },
        ],
    )
}

fn skill_card(title: &str, items: [&str; 3], color: ColorRole, tint: ColorRole) -> Node {
    let mut children = vec![Node::text(title, 15, color).bold()];
    children.extend(
        items
            .iter()
            .map(|item| Node::IconLine { icon: Icon::Check, text: (*item).into(), color }),
    );
    Node::Card { tint, accent: Some(color), padding: 14, children }
}

fn skills() -> Node {
    Node::column(
        10,
        vec![
            Node::SectionHeading { text: "Technical Expertise".into(), marker: ColorRole::Primary },
            Node::Split {
                ratio: (1, 1),
                spacing: 12,
                tinted_left: false,
                left: vec![skill_card(
                    "Core Technologies",
                    CORE_TECHNOLOGIES,
                    ColorRole::Primary,
                    ColorRole::PrimarySoft,
                )],
                right: vec![skill_card(
                    "Development Tools",
                    DEVELOPMENT_TOOLS,
                    ColorRole::Secondary,
                    ColorRole::SecondarySoft,
                )],
            },
        ],
    )
}

fn cta(ctx: &FragmentCtx) -> Node {
    let c = ctx.content;
    Node::Card {
        tint: ColorRole::PrimarySoft,
        accent: None,
        padding: 18,
        children: vec![
            Node::text(&c.cta, 18, ColorRole::Primary).bold().centered(),
            Node::Spacer(6),
            Node::IconLine { icon: Icon::Mail, text: c.email.clone(), color: ColorRole::Primary },
            Node::IconLine {
                icon: Icon::Github,
                text: c.github.clone(),
                color: ColorRole::Secondary,
            },
        ],
    }
}

fn footer(ctx: &FragmentCtx) -> Node {
    let c = ctx.content;
    Node::column(
        0,
        vec![
            Node::Card {
                tint: ColorRole::PrimarySoft,
                accent: None,
                padding: 14,
                children: vec![
                    Node::text("View Interactive Portfolio:", 14, ColorRole::Text)
                        .bold()
                        .centered(),
                    Node::text("myportfolio.com", 16, ColorRole::Primary).centered(),
                    Node::text(
                        "Visit the URL above to see my interactive portfolio with project demos",
                        12,
                        ColorRole::TextMuted,
                    )
                    .centered(),
                ],
            },
            Node::Card {
                tint: ColorRole::SecondarySoft,
                accent: None,
                padding: 10,
                children: vec![Node::text(
                    format!("© {} {} | Professional {}", ctx.year, c.name, c.title),
                    12,
                    ColorRole::Text,
                )
                .centered()],
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_interpolates_year_and_identity() {
        let content = FlyerContent::default();
        let ctx = FragmentCtx { content: &content, year: 2031 };
        let node = build(FragmentId::Footer, &ctx);

        let rendered = format!("{:?}", node);
        assert!(rendered.contains("© 2031"));
        assert!(rendered.contains(&content.name));
    }

    #[test]
    fn test_social_strips_github_host_from_display() {
        let content = FlyerContent::default();
        let ctx = FragmentCtx { content: &content, year: 2026 };
        let node = build(FragmentId::Social, &ctx);

        let rendered = format!("{:?}", node);
        assert!(rendered.contains("Chukwwumaemmannuel233"));
        assert!(!rendered.contains("github.com/Chukwwumaemmannuel233"));
    }

    #[test]
    fn test_qr_payload_has_single_scheme() {
        let content = FlyerContent::default();
        let ctx = FragmentCtx { content: &content, year: 2026 };
        match build(FragmentId::Qr, &ctx) {
            Node::Column { children, .. } => match &children[1] {
                Node::Qr { payload, .. } => {
                    assert!(payload.starts_with("https://github.com/"));
                    assert_eq!(payload.matches("https://").count(), 1);
                }
                other => panic!("expected qr node, got {:?}", other),
            },
            other => panic!("expected column, got {:?}", other),
        }
    }
}
