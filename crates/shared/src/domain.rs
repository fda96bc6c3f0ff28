use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(BuildingId);
id_newtype!(RoomId);
id_newtype!(TagGroupId);
id_newtype!(TagId);
id_newtype!(UserId);
id_newtype!(ResearchGroupId);
id_newtype!(ProjectId);
id_newtype!(AssessmentId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Root,
    Admin,
    Faculty,
    Office,
    Student,
    Reports,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::Admin => "admin",
            Role::Faculty => "faculty",
            Role::Office => "office",
            Role::Student => "student",
            Role::Reports => "reports",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "root" => Some(Role::Root),
            "admin" => Some(Role::Admin),
            "faculty" => Some(Role::Faculty),
            "office" => Some(Role::Office),
            "student" => Some(Role::Student),
            "reports" => Some(Role::Reports),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl PersonName {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Surname first, no delimiter, so a plain string sort groups by surname.
    pub fn sort_key(&self) -> String {
        format!("{}{}", self.last_name, self.first_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub colour: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub lecture_capture: bool,
    pub active: bool,
    pub building: Option<Building>,
}

impl Room {
    /// `None` when the building relation was not loaded.
    pub fn full_name(&self) -> Option<String> {
        self.building
            .as_ref()
            .map(|building| format!("{} {}", building.name, self.name))
    }

    /// A room can only be activated while its building is active.
    pub fn available(&self) -> Option<bool> {
        self.building.as_ref().map(|building| building.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub id: TagGroupId,
    pub name: String,
    pub active: bool,
    /// Prefix tag labels with the group name when displayed.
    pub add_group: bool,
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub colour: Option<String>,
    pub active: bool,
    pub group: Option<TagGroup>,
}

impl Tag {
    pub fn display_name(&self) -> String {
        match &self.group {
            Some(group) if group.add_group => format!("{}: {}", group.name, self.name),
            _ => self.name.clone(),
        }
    }

    /// Active in its own right and inside an active group.
    pub fn is_active(&self) -> bool {
        self.active && self.group.as_ref().is_some_and(|group| group.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchGroup {
    pub id: ResearchGroupId,
    pub abbreviation: String,
    pub name: String,
    pub colour: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: UserId,
    pub name: PersonName,
    pub username: String,
    pub active: bool,
    pub roles: Vec<Role>,
    pub last_active: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub active: bool,
    pub owner: Option<Faculty>,
    pub group: Option<ResearchGroup>,
    pub tags: Vec<Tag>,
    pub last_edited: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub name: String,
    pub availability_requested: bool,
    pub availability_closed: bool,
    pub deployed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessorAvailability {
    /// Key of the assessor within the assessment, present even when the
    /// faculty snapshot is not.
    pub faculty_id: UserId,
    pub faculty: Option<Faculty>,
    pub confirmed: bool,
    pub available_sessions: u32,
    pub ifneeded_sessions: u32,
    pub unavailable_sessions: u32,
    pub comment: Option<String>,
    pub request_email_sent: bool,
    pub last_reminder: Option<DateTime<Utc>>,
}

impl AssessorAvailability {
    pub fn is_outstanding(&self) -> bool {
        !self.confirmed
    }
}
