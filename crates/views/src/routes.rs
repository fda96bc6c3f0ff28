//! Addresses of the mutating endpoints the action menus link to. The tables
//! only ever build these paths; they never call them.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    EditBuilding,
    ActivateBuilding,
    DeactivateBuilding,
    EditRoom,
    ActivateRoom,
    DeactivateRoom,
    EditTagGroup,
    ActivateTagGroup,
    DeactivateTagGroup,
    EditTag,
    ActivateTag,
    DeactivateTag,
    EditUser,
    ActivateUser,
    DeactivateUser,
    EditProject,
    EditOwnProject,
    ActivateProject,
    DeactivateProject,
    AssessorAvailability,
    RemoveAssessor,
    AvailabilityReminder,
}

impl RouteName {
    /// Stable endpoint identifier, `blueprint.view`.
    pub fn name(self) -> &'static str {
        match self {
            RouteName::EditBuilding => "admin.edit_building",
            RouteName::ActivateBuilding => "admin.activate_building",
            RouteName::DeactivateBuilding => "admin.deactivate_building",
            RouteName::EditRoom => "admin.edit_room",
            RouteName::ActivateRoom => "admin.activate_room",
            RouteName::DeactivateRoom => "admin.deactivate_room",
            RouteName::EditTagGroup => "admin.edit_project_tag_group",
            RouteName::ActivateTagGroup => "admin.activate_project_tag_group",
            RouteName::DeactivateTagGroup => "admin.deactivate_project_tag_group",
            RouteName::EditTag => "admin.edit_project_tag",
            RouteName::ActivateTag => "admin.activate_project_tag",
            RouteName::DeactivateTag => "admin.deactivate_project_tag",
            RouteName::EditUser => "manage_users.edit_user",
            RouteName::ActivateUser => "manage_users.activate_user",
            RouteName::DeactivateUser => "manage_users.deactivate_user",
            RouteName::EditProject => "convenor.edit_project",
            RouteName::EditOwnProject => "faculty.edit_project",
            RouteName::ActivateProject => "faculty.activate_project",
            RouteName::DeactivateProject => "faculty.deactivate_project",
            RouteName::AssessorAvailability => "admin.assessment_assessor_availability",
            RouteName::RemoveAssessor => "admin.assessment_remove_assessor",
            RouteName::AvailabilityReminder => "admin.availability_reminder_individual",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            RouteName::EditBuilding => "/admin/edit_building/{id}",
            RouteName::ActivateBuilding => "/admin/activate_building/{id}",
            RouteName::DeactivateBuilding => "/admin/deactivate_building/{id}",
            RouteName::EditRoom => "/admin/edit_room/{id}",
            RouteName::ActivateRoom => "/admin/activate_room/{id}",
            RouteName::DeactivateRoom => "/admin/deactivate_room/{id}",
            RouteName::EditTagGroup => "/admin/edit_project_tag_group/{id}",
            RouteName::ActivateTagGroup => "/admin/activate_project_tag_group/{id}",
            RouteName::DeactivateTagGroup => "/admin/deactivate_project_tag_group/{id}",
            RouteName::EditTag => "/admin/edit_project_tag/{id}",
            RouteName::ActivateTag => "/admin/activate_project_tag/{id}",
            RouteName::DeactivateTag => "/admin/deactivate_project_tag/{id}",
            RouteName::EditUser => "/manage_users/edit_user/{id}",
            RouteName::ActivateUser => "/manage_users/activate_user/{id}",
            RouteName::DeactivateUser => "/manage_users/deactivate_user/{id}",
            RouteName::EditProject => "/convenor/edit_project/{id}",
            RouteName::EditOwnProject => "/faculty/edit_project/{id}",
            RouteName::ActivateProject => "/faculty/activate_project/{id}",
            RouteName::DeactivateProject => "/faculty/deactivate_project/{id}",
            RouteName::AssessorAvailability => {
                "/admin/assessment/{parent}/assessor/{id}/availability"
            }
            RouteName::RemoveAssessor => "/admin/assessment/{parent}/assessor/{id}/remove",
            RouteName::AvailabilityReminder => {
                "/admin/assessment/{parent}/assessor/{id}/reminder"
            }
        }
    }

    pub fn is_nested(self) -> bool {
        self.pattern().contains("{parent}")
    }

    pub fn url(self, id: i64) -> String {
        debug_assert!(!self.is_nested(), "{} needs a parent id", self.name());
        self.pattern().replace("{id}", &id.to_string())
    }

    /// Path for routes scoped under a parent entity, e.g. an assessor inside
    /// an assessment.
    pub fn nested_url(self, parent: i64, id: i64) -> String {
        debug_assert!(self.is_nested(), "{} takes a single id", self.name());
        self.pattern()
            .replace("{parent}", &parent.to_string())
            .replace("{id}", &id.to_string())
    }
}
