//! Finite sets of HTML fragments the data tables display.
//!
//! Each column whose presentation depends on entity state has an enum here;
//! the renderer picks a variant and `render` turns it into a fixed template.
//! Entity text interpolated into a template is always passed through
//! [`escape`].

use shared::{domain::Role, protocol::Markup};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

const NONE_BADGE: &str = r#"<span class="badge bg-secondary">None</span>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Active,
    Inactive,
}

impl StatusBadge {
    pub fn from_active(active: bool) -> Self {
        if active {
            StatusBadge::Active
        } else {
            StatusBadge::Inactive
        }
    }

    pub fn render(self) -> Markup {
        Markup::from_trusted(match self {
            StatusBadge::Active => {
                r#"<span class="badge bg-success"><i class="fas fa-check"></i> Active</span>"#
            }
            StatusBadge::Inactive => {
                r#"<span class="badge bg-warning text-dark"><i class="fas fa-times"></i> Inactive</span>"#
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmBadge {
    Confirmed,
    Outstanding,
}

impl ConfirmBadge {
    pub fn from_confirmed(confirmed: bool) -> Self {
        if confirmed {
            ConfirmBadge::Confirmed
        } else {
            ConfirmBadge::Outstanding
        }
    }

    pub fn render(self) -> Markup {
        Markup::from_trusted(match self {
            ConfirmBadge::Confirmed => {
                r#"<span class="badge bg-success"><i class="fas fa-check"></i> Confirmed</span>"#
            }
            ConfirmBadge::Outstanding => {
                r#"<span class="badge bg-danger"><i class="fas fa-times"></i> Outstanding</span>"#
            }
        })
    }
}

/// Group a tag belongs to. Tags may legitimately have no group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBadge<'a> {
    Named { name: &'a str, active: bool },
    None,
}

impl GroupBadge<'_> {
    pub fn render(self) -> Markup {
        match self {
            GroupBadge::Named { name, active: true } => Markup::from_trusted(format!(
                r#"<span class="badge bg-info text-dark">{}</span>"#,
                escape(name)
            )),
            GroupBadge::Named {
                name,
                active: false,
            } => Markup::from_trusted(format!(
                r#"<span class="badge bg-secondary text-decoration-line-through">{}</span>"#,
                escape(name)
            )),
            GroupBadge::None => none_badge(),
        }
    }
}

/// Placeholder for a cell with nothing to show.
pub fn none_badge() -> Markup {
    Markup::from_trusted(NONE_BADGE)
}

pub fn colour_swatch(colour: Option<&str>) -> Markup {
    match colour {
        Some(colour) => {
            let colour = escape(colour);
            Markup::from_trusted(format!(
                r#"<span class="badge border" style="background-color: {colour};">&emsp;</span> <span class="small font-monospace">{colour}</span>"#
            ))
        }
        None => none_badge(),
    }
}

/// Label rendered in the given colour; falls back to a neutral badge.
pub fn coloured_label(label: &str, colour: Option<&str>, muted: bool) -> Markup {
    let label = escape(label);
    Markup::from_trusted(match (colour, muted) {
        (_, true) => format!(r#"<span class="badge bg-secondary">{label}</span>"#),
        (Some(colour), false) => format!(
            r#"<span class="badge" style="background-color: {};">{label}</span>"#,
            escape(colour)
        ),
        (None, false) => format!(r#"<span class="badge bg-primary">{label}</span>"#),
    })
}

pub fn role_badges(roles: &[Role]) -> Markup {
    if roles.is_empty() {
        return none_badge();
    }
    let badges: Vec<String> = roles
        .iter()
        .map(|role| {
            let style = match role {
                Role::Root => "bg-danger",
                Role::Admin => "bg-warning text-dark",
                Role::Faculty => "bg-primary",
                Role::Office => "bg-info text-dark",
                Role::Student => "bg-secondary",
                Role::Reports => "bg-dark",
            };
            format!(r#"<span class="badge {style}">{}</span>"#, role.as_str())
        })
        .collect();
    Markup::from_trusted(badges.join(" "))
}

pub fn mailto(display: &str, email: &str) -> String {
    format!(
        r#"<a class="text-decoration-none" href="mailto:{}">{}</a>"#,
        escape(email),
        escape(display)
    )
}

/// One entry in a row's action dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Link {
        label: &'static str,
        icon: &'static str,
        href: String,
    },
    Disabled {
        label: &'static str,
        icon: &'static str,
    },
}

impl MenuAction {
    pub fn link(label: &'static str, icon: &'static str, href: String) -> Self {
        MenuAction::Link { label, icon, href }
    }

    pub fn disabled(label: &'static str) -> Self {
        MenuAction::Disabled { label, icon: "ban" }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Link { label, .. } | MenuAction::Disabled { label, .. } => *label,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, MenuAction::Link { .. })
    }

    fn render(&self) -> String {
        match self {
            MenuAction::Link { label, icon, href } => format!(
                r#"<a class="dropdown-item d-flex gap-2" href="{}"><i class="fas fa-{icon} fa-fw"></i> {label}</a>"#,
                escape(href)
            ),
            MenuAction::Disabled { label, icon } => format!(
                r#"<a class="dropdown-item d-flex gap-2 disabled"><i class="fas fa-{icon} fa-fw"></i> {label}</a>"#
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    actions: Vec<MenuAction>,
}

impl ActionMenu {
    pub const MAX_ACTIONS: usize = 4;

    pub fn new(actions: Vec<MenuAction>) -> Self {
        debug_assert!(
            (1..=Self::MAX_ACTIONS).contains(&actions.len()),
            "action menus hold between one and four entries"
        );
        Self { actions }
    }

    pub fn actions(&self) -> &[MenuAction] {
        &self.actions
    }

    pub fn render(&self) -> Markup {
        let items: String = self.actions.iter().map(MenuAction::render).collect();
        Markup::from_trusted(format!(
            r#"<div class="dropdown"><button class="btn btn-secondary btn-sm full-width-button dropdown-toggle" type="button" data-bs-toggle="dropdown" aria-haspopup="true" aria-expanded="false">Actions</button><div class="dropdown-menu dropdown-menu-dark mx-0 border-0 dropdown-menu-end">{items}</div></div>"#
        ))
    }
}

#[cfg(test)]
#[path = "tests/markup_tests.rs"]
mod tests;
