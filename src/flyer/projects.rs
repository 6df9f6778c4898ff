/// Static featured projects
///
/// Fixed showcase entries, not user-editable. A work-sample slot with a
/// ready preview overrides the placeholder art for its project.

/// One featured project entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub caption: &'static str,
}

pub const PROJECTS: [Project; 3] = [
    Project {
        title: "SecureMatch - Dating Platform UI",
        caption: "View at: myportfolio.com",
    },
    Project {
        title: "GreenLife - Eco E-commerce",
        caption: "View at: myportfolio.com",
    },
    Project {
        title: "CoinShares - Crypto Dashboard",
        caption: "View at: myportfolio.com",
    },
];
