use shared::{
    domain::Faculty,
    error::RenderError,
    protocol::{Cell, RowRecord, TableKind},
};

use super::person_cell;
use crate::{
    markup::{role_badges, ActionMenu, MenuAction, StatusBadge},
    project::RowRenderer,
    routes::RouteName,
};

pub struct FacultyRows;

impl RowRenderer for FacultyRows {
    type Entity = Faculty;
    type Context = ();

    const KIND: TableKind = TableKind::Faculty;

    fn render_row(&self, faculty: &Faculty, _ctx: &()) -> Result<RowRecord, RenderError> {
        let last_active = match faculty.last_active {
            Some(at) => Cell::sortable(at.format("%a %d %b %Y %H:%M").to_string(), at.to_rfc3339()),
            None => Cell::sortable("Never", ""),
        };

        Ok(RowRecord::new(Self::KIND)
            .with("name", person_cell(&faculty.name))
            .with("user", Cell::text(&faculty.username))
            .with("roles", role_badges(&faculty.roles))
            .with("active", StatusBadge::from_active(faculty.active).render())
            .with("last_active", last_active)
            .with("menu", menu(faculty).render()))
    }
}

fn menu(faculty: &Faculty) -> ActionMenu {
    let id = faculty.id.0;
    let toggle = if faculty.active {
        MenuAction::link("Make inactive", "wrench", RouteName::DeactivateUser.url(id))
    } else {
        MenuAction::link("Make active", "wrench", RouteName::ActivateUser.url(id))
    };
    ActionMenu::new(vec![
        MenuAction::link("Edit account...", "pencil-alt", RouteName::EditUser.url(id)),
        toggle,
    ])
}
