use shared::{
    domain::{Assessment, AssessorAvailability, Faculty},
    error::RenderError,
    protocol::{Cell, RowRecord, TableKind},
};

use super::{missing_relation, optional_text, person_cell};
use crate::{
    markup::{ActionMenu, ConfirmBadge, MenuAction},
    project::RowRenderer,
    routes::RouteName,
};

/// Assessor availability inside one presentation assessment.
pub struct AssessorRows;

impl RowRenderer for AssessorRows {
    type Entity = AssessorAvailability;
    type Context = Assessment;

    const KIND: TableKind = TableKind::Assessors;

    fn render_row(
        &self,
        record: &AssessorAvailability,
        assessment: &Assessment,
    ) -> Result<RowRecord, RenderError> {
        let faculty = record
            .faculty
            .as_ref()
            .ok_or_else(|| missing_relation("assessor", record.faculty_id.0, "faculty"))?;

        Ok(RowRecord::new(Self::KIND)
            .with("name", person_cell(&faculty.name))
            .with("confirmed", ConfirmBadge::from_confirmed(record.confirmed).render())
            .with("available", Cell::Integer(i64::from(record.available_sessions)))
            .with("ifneeded", Cell::Integer(i64::from(record.ifneeded_sessions)))
            .with("unavailable", Cell::Integer(i64::from(record.unavailable_sessions)))
            .with("comment", optional_text(record.comment.as_deref()))
            .with("menu", menu(record, faculty, assessment).render()))
    }
}

/// A deployed schedule freezes everything, then a closed availability
/// window; otherwise the assessor can be edited or removed, and chased when
/// a request went out but no response came back.
fn menu(record: &AssessorAvailability, faculty: &Faculty, assessment: &Assessment) -> ActionMenu {
    if assessment.deployed {
        return ActionMenu::new(vec![MenuAction::disabled("Deployed")]);
    }
    if assessment.availability_closed {
        return ActionMenu::new(vec![MenuAction::disabled("Availability closed")]);
    }

    let (parent, id) = (assessment.id.0, faculty.id.0);
    let mut actions = vec![
        MenuAction::link(
            "Edit availability...",
            "calendar",
            RouteName::AssessorAvailability.nested_url(parent, id),
        ),
        MenuAction::link(
            "Remove",
            "trash",
            RouteName::RemoveAssessor.nested_url(parent, id),
        ),
    ];
    if record.is_outstanding() && assessment.availability_requested {
        actions.push(MenuAction::link(
            "Send reminder",
            "envelope",
            RouteName::AvailabilityReminder.nested_url(parent, id),
        ));
    }
    ActionMenu::new(actions)
}
