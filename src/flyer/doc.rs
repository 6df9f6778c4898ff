/// Typed document tree produced by the template renderer
///
/// Nodes carry `ColorRole` tokens rather than resolved colors, so toggling
/// dark mode can never change the shape of the tree — only the palette the
/// consumers resolve the tokens against.

use crate::theme::ColorRole;

/// Horizontal text alignment within the available width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Semantic icons; drawn as tinted markers by both consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Phone,
    Mail,
    MapPin,
    Instagram,
    Twitter,
    Github,
    Link,
    Check,
}

/// One visual element of the flyer.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Vertical flow of children
    Column { spacing: u16, children: Vec<Node> },
    /// Two side-by-side regions with a width ratio
    Split {
        ratio: (u16, u16),
        spacing: u16,
        /// Fill the left region with the card color (sidebar layouts)
        tinted_left: bool,
        left: Vec<Node>,
        right: Vec<Node>,
    },
    /// Horizontal band painted with the theme header gradient
    GradientBand { padding: u16, children: Vec<Node> },
    /// Tinted panel, optionally with a colored accent edge on the left
    Card {
        tint: ColorRole,
        accent: Option<ColorRole>,
        padding: u16,
        children: Vec<Node>,
    },
    /// Card with a solid title bar (the cards layout)
    TitledCard {
        title: String,
        title_bg: ColorRole,
        children: Vec<Node>,
    },
    Text {
        content: String,
        size: u16,
        color: ColorRole,
        bold: bool,
        align: Align,
    },
    /// Tinted icon marker followed by a line of text
    IconLine { icon: Icon, text: String, color: ColorRole },
    /// Section title with a colored square marker and an underline
    SectionHeading { text: String, marker: ColorRole },
    /// Round portrait: profile slot preview when ready, monogram otherwise
    Avatar { initials: String, diameter: u16 },
    /// The three featured projects; work-slot previews override placeholders
    ProjectGrid { columns: u8, captions: bool },
    /// QR glyph on a white pad
    Qr { payload: String, size: u16 },
    Spacer(u16),
    Rule,
}

impl Node {
    pub fn column(spacing: u16, children: Vec<Node>) -> Node {
        Node::Column { spacing, children }
    }

    pub fn text(content: impl Into<String>, size: u16, color: ColorRole) -> Node {
        Node::Text {
            content: content.into(),
            size,
            color,
            bold: false,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Node {
        if let Node::Text { bold, .. } = &mut self {
            *bold = true;
        }
        self
    }

    pub fn centered(mut self) -> Node {
        if let Node::Text { align, .. } = &mut self {
            *align = Align::Center;
        }
        self
    }

    /// Total number of nodes in this subtree, including self.
    pub fn count(&self) -> usize {
        let children: usize = match self {
            Node::Column { children, .. }
            | Node::GradientBand { children, .. }
            | Node::Card { children, .. }
            | Node::TitledCard { children, .. } => children.iter().map(Node::count).sum(),
            Node::Split { left, right, .. } => {
                left.iter().map(Node::count).sum::<usize>()
                    + right.iter().map(Node::count).sum::<usize>()
            }
            _ => 0,
        };
        1 + children
    }
}

/// Monogram for the avatar placeholder: first letter of the first two words.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ugwu Chukwuma Emmanuel"), "UC");
        assert_eq!(initials("ada"), "A");
        assert_eq!(initials("  "), "");
    }

    #[test]
    fn test_count_walks_all_containers() {
        let tree = Node::column(
            8,
            vec![
                Node::text("a", 14, ColorRole::Text),
                Node::Split {
                    ratio: (1, 2),
                    spacing: 8,
                    tinted_left: false,
                    left: vec![Node::Rule],
                    right: vec![Node::Spacer(4), Node::text("b", 14, ColorRole::Text)],
                },
            ],
        );
        assert_eq!(tree.count(), 6);
    }
}
