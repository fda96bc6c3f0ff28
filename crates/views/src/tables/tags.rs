use shared::{
    domain::Tag,
    error::RenderError,
    protocol::{Cell, RowRecord, TableKind},
};

use crate::{
    markup::{colour_swatch, ActionMenu, GroupBadge, MenuAction, StatusBadge},
    project::RowRenderer,
    routes::RouteName,
};

pub struct TagRows;

impl RowRenderer for TagRows {
    type Entity = Tag;
    type Context = ();

    const KIND: TableKind = TableKind::Tags;

    fn render_row(&self, tag: &Tag, _ctx: &()) -> Result<RowRecord, RenderError> {
        let group = match &tag.group {
            Some(group) => GroupBadge::Named {
                name: &group.name,
                active: group.active,
            },
            None => GroupBadge::None,
        };

        Ok(RowRecord::new(Self::KIND)
            .with("name", Cell::text(tag.display_name()))
            .with("group", group.render())
            .with("colour", colour_swatch(tag.colour.as_deref()))
            .with("active", StatusBadge::from_active(tag.active).render())
            .with("menu", menu(tag).render()))
    }
}

/// Activation depends on the group: a tag without a group, or inside an
/// inactive group, cannot be switched on. Switching off is always allowed
/// for a grouped tag.
fn menu(tag: &Tag) -> ActionMenu {
    let id = tag.id.0;
    let toggle = match (&tag.group, tag.active) {
        (None, _) => MenuAction::disabled("No group"),
        (Some(_), true) => {
            MenuAction::link("Make inactive", "wrench", RouteName::DeactivateTag.url(id))
        }
        (Some(group), false) if group.active => {
            MenuAction::link("Make active", "wrench", RouteName::ActivateTag.url(id))
        }
        (Some(_), false) => MenuAction::disabled("Group inactive"),
    };
    ActionMenu::new(vec![
        MenuAction::link("Edit details...", "pencil-alt", RouteName::EditTag.url(id)),
        toggle,
    ])
}
