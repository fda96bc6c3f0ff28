use shared::{
    domain::{Faculty, Project, UserId},
    error::RenderError,
    protocol::{Cell, Markup, RowRecord, TableKind},
};

use super::{missing_relation, person_cell};
use crate::{
    markup::{coloured_label, none_badge, ActionMenu, MenuAction, StatusBadge},
    project::RowRenderer,
    routes::RouteName,
};

/// Project list. The context is the owner the list was filtered to: an
/// owner's own list links to their edit page, the unfiltered list to the
/// convenor's.
pub struct ProjectRows;

impl RowRenderer for ProjectRows {
    type Entity = Project;
    type Context = Option<UserId>;

    const KIND: TableKind = TableKind::Projects;

    fn render_row(
        &self,
        project: &Project,
        owner_filter: &Option<UserId>,
    ) -> Result<RowRecord, RenderError> {
        let owner = project
            .owner
            .as_ref()
            .ok_or_else(|| missing_relation("project", project.id.0, "owner"))?;

        let group = match &project.group {
            Some(group) => {
                coloured_label(&group.abbreviation, group.colour.as_deref(), !group.active)
            }
            None => none_badge(),
        };

        Ok(RowRecord::new(Self::KIND)
            .with("name", Cell::text(&project.name))
            .with("owner", person_cell(&owner.name))
            .with("group", group)
            .with("tags", tag_labels(project))
            .with("active", StatusBadge::from_active(project.active).render())
            .with("menu", menu(project, owner, owner_filter.is_some()).render()))
    }
}

fn tag_labels(project: &Project) -> Markup {
    if project.tags.is_empty() {
        return none_badge();
    }
    let labels: Vec<String> = project
        .tags
        .iter()
        .map(|tag| {
            coloured_label(&tag.display_name(), tag.colour.as_deref(), !tag.is_active())
                .into_string()
        })
        .collect();
    Markup::from_trusted(labels.join(" "))
}

fn menu(project: &Project, owner: &Faculty, owner_scoped: bool) -> ActionMenu {
    let id = project.id.0;
    let edit = if owner_scoped {
        RouteName::EditOwnProject
    } else {
        RouteName::EditProject
    };
    let toggle = match (project.active, owner.active) {
        (true, _) => {
            MenuAction::link("Make inactive", "wrench", RouteName::DeactivateProject.url(id))
        }
        (false, true) => {
            MenuAction::link("Make active", "wrench", RouteName::ActivateProject.url(id))
        }
        (false, false) => MenuAction::disabled("Owner inactive"),
    };
    ActionMenu::new(vec![
        MenuAction::link("Edit project...", "pencil-alt", edit.url(id)),
        toggle,
    ])
}
