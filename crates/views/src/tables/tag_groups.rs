use shared::{
    domain::TagGroup,
    error::RenderError,
    protocol::{Cell, RowRecord, TableKind},
};

use crate::{
    markup::{ActionMenu, MenuAction, StatusBadge},
    project::RowRenderer,
    routes::RouteName,
};

pub struct TagGroupRows;

impl RowRenderer for TagGroupRows {
    type Entity = TagGroup;
    type Context = ();

    const KIND: TableKind = TableKind::TagGroups;

    fn render_row(&self, group: &TagGroup, _ctx: &()) -> Result<RowRecord, RenderError> {
        Ok(RowRecord::new(Self::KIND)
            .with("name", Cell::text(&group.name))
            .with("include_name", Cell::Flag(group.add_group))
            .with("active", StatusBadge::from_active(group.active).render())
            .with("menu", menu(group).render()))
    }
}

fn menu(group: &TagGroup) -> ActionMenu {
    let id = group.id.0;
    let toggle = match (group.active, group.default) {
        (true, true) => MenuAction::disabled("Default group"),
        (true, false) => {
            MenuAction::link("Make inactive", "wrench", RouteName::DeactivateTagGroup.url(id))
        }
        (false, _) => MenuAction::link("Make active", "wrench", RouteName::ActivateTagGroup.url(id)),
    };
    ActionMenu::new(vec![
        MenuAction::link("Edit details...", "pencil-alt", RouteName::EditTagGroup.url(id)),
        toggle,
    ])
}
