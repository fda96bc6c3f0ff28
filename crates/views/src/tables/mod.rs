mod assessors;
mod buildings;
mod faculty;
mod projects;
mod rooms;
mod tag_groups;
mod tags;

pub use assessors::AssessorRows;
pub use buildings::BuildingRows;
pub use faculty::FacultyRows;
pub use projects::ProjectRows;
pub use rooms::RoomRows;
pub use tag_groups::TagGroupRows;
pub use tags::TagRows;

use shared::{domain::PersonName, error::RenderError, protocol::Cell};

use crate::markup::mailto;

fn missing_relation(entity: &'static str, id: i64, relation: &'static str) -> RenderError {
    RenderError::MissingRelation {
        entity,
        id,
        relation,
    }
}

/// Full name linked to the person's email, sorted by surname then forename.
fn person_cell(name: &PersonName) -> Cell {
    Cell::sortable(mailto(&name.full_name(), &name.email), name.sort_key())
}

fn optional_text(value: Option<&str>) -> Cell {
    match value {
        Some(text) if !text.trim().is_empty() => Cell::text(text),
        _ => Cell::Empty,
    }
}

#[cfg(test)]
#[path = "../tests/tables_tests.rs"]
mod tests;
