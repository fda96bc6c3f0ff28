use shared::{
    domain::Building,
    error::RenderError,
    protocol::{Cell, RowRecord, TableKind},
};

use crate::{
    markup::{colour_swatch, ActionMenu, MenuAction, StatusBadge},
    project::RowRenderer,
    routes::RouteName,
};

pub struct BuildingRows;

impl RowRenderer for BuildingRows {
    type Entity = Building;
    type Context = ();

    const KIND: TableKind = TableKind::Buildings;

    fn render_row(&self, building: &Building, _ctx: &()) -> Result<RowRecord, RenderError> {
        Ok(RowRecord::new(Self::KIND)
            .with("name", Cell::text(&building.name))
            .with("colour", colour_swatch(building.colour.as_deref()))
            .with("active", StatusBadge::from_active(building.active).render())
            .with("menu", menu(building).render()))
    }
}

fn menu(building: &Building) -> ActionMenu {
    let id = building.id.0;
    let toggle = if building.active {
        MenuAction::link("Make inactive", "wrench", RouteName::DeactivateBuilding.url(id))
    } else {
        MenuAction::link("Make active", "wrench", RouteName::ActivateBuilding.url(id))
    };
    ActionMenu::new(vec![
        MenuAction::link("Edit details...", "pencil-alt", RouteName::EditBuilding.url(id)),
        toggle,
    ])
}
