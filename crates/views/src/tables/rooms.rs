use shared::{
    domain::Room,
    error::RenderError,
    protocol::{Cell, RowRecord, TableKind},
};

use super::missing_relation;
use crate::{
    markup::{ActionMenu, MenuAction, StatusBadge},
    project::RowRenderer,
    routes::RouteName,
};

pub struct RoomRows;

impl RowRenderer for RoomRows {
    type Entity = Room;
    type Context = ();

    const KIND: TableKind = TableKind::Rooms;

    fn render_row(&self, room: &Room, _ctx: &()) -> Result<RowRecord, RenderError> {
        let building = room
            .building
            .as_ref()
            .ok_or_else(|| missing_relation("room", room.id.0, "building"))?;

        Ok(RowRecord::new(Self::KIND)
            .with(
                "name",
                Cell::sortable(
                    format!("{} {}", building.name, room.name),
                    format!("{}{}", building.name, room.name),
                ),
            )
            .with("building", Cell::text(&building.name))
            .with("capacity", Cell::Integer(i64::from(room.capacity)))
            .with("lecture_capture", Cell::Flag(room.lecture_capture))
            .with("active", StatusBadge::from_active(room.active).render())
            .with("menu", menu(room, building.active).render()))
    }
}

/// An active room can always be retired; an inactive one can only be
/// brought back while its building is active.
fn menu(room: &Room, building_active: bool) -> ActionMenu {
    let id = room.id.0;
    let toggle = match (room.active, building_active) {
        (true, _) => MenuAction::link("Make inactive", "wrench", RouteName::DeactivateRoom.url(id)),
        (false, true) => MenuAction::link("Make active", "wrench", RouteName::ActivateRoom.url(id)),
        (false, false) => MenuAction::disabled("Building inactive"),
    };
    ActionMenu::new(vec![
        MenuAction::link("Edit details...", "pencil-alt", RouteName::EditRoom.url(id)),
        toggle,
    ])
}
