use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

use shared::domain::{
    Assessment, AssessmentId, AssessorAvailability, Building, BuildingId, Faculty, PersonName,
    Project, ProjectId, ResearchGroup, ResearchGroupId, Role, Room, RoomId, Tag, TagGroup,
    TagGroupId, TagId, UserId,
};

/// Read side of the application database. Every list operation returns
/// snapshots with the relations the table renderers read already joined in.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct NewFaculty<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub active: bool,
    pub last_active: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityRecord {
    pub confirmed: bool,
    pub available_sessions: u32,
    pub ifneeded_sessions: u32,
    pub unavailable_sessions: u32,
    pub comment: Option<String>,
    pub request_email_sent: bool,
    pub last_reminder: Option<DateTime<Utc>>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        // Every connection to `sqlite::memory:` opens its own empty database,
        // so an in-memory pool must stay on one connection that never expires.
        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(connect_options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        debug!(%database_url, "database opened and migrated");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn create_building(
        &self,
        name: &str,
        colour: Option<&str>,
        active: bool,
    ) -> Result<BuildingId> {
        let rec =
            sqlx::query("INSERT INTO buildings (name, colour, active) VALUES (?, ?, ?) RETURNING id")
                .bind(name)
                .bind(colour)
                .bind(active)
                .fetch_one(&self.pool)
                .await?;
        Ok(BuildingId(rec.get::<i64, _>(0)))
    }

    pub async fn set_building_active(&self, building_id: BuildingId, active: bool) -> Result<()> {
        sqlx::query("UPDATE buildings SET active = ? WHERE id = ?")
            .bind(active)
            .bind(building_id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_buildings(&self) -> Result<Vec<Building>> {
        let rows = sqlx::query(
            "SELECT id, name, colour, active FROM buildings ORDER BY lower(name) ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list buildings")?;

        Ok(rows
            .into_iter()
            .map(|r| Building {
                id: BuildingId(r.get::<i64, _>(0)),
                name: r.get::<String, _>(1),
                colour: r.get::<Option<String>, _>(2),
                active: r.get::<bool, _>(3),
            })
            .collect())
    }

    pub async fn create_room(
        &self,
        building_id: BuildingId,
        name: &str,
        capacity: u32,
        lecture_capture: bool,
        active: bool,
    ) -> Result<RoomId> {
        let rec = sqlx::query(
            "INSERT INTO rooms (building_id, name, capacity, lecture_capture, active)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(building_id.0)
        .bind(name)
        .bind(capacity)
        .bind(lecture_capture)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;
        Ok(RoomId(rec.get::<i64, _>(0)))
    }

    pub async fn set_room_active(&self, room_id: RoomId, active: bool) -> Result<()> {
        sqlx::query("UPDATE rooms SET active = ? WHERE id = ?")
            .bind(active)
            .bind(room_id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        let rows = sqlx::query(
            "SELECT r.id, r.name, r.capacity, r.lecture_capture, r.active,
                    b.id, b.name, b.colour, b.active
             FROM rooms r
             LEFT JOIN buildings b ON b.id = r.building_id
             ORDER BY lower(b.name) ASC, lower(r.name) ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list rooms")?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let building = r.get::<Option<i64>, _>(5).map(|building_id| Building {
                    id: BuildingId(building_id),
                    name: r.get::<String, _>(6),
                    colour: r.get::<Option<String>, _>(7),
                    active: r.get::<bool, _>(8),
                });
                Room {
                    id: RoomId(r.get::<i64, _>(0)),
                    name: r.get::<String, _>(1),
                    capacity: r.get::<u32, _>(2),
                    lecture_capture: r.get::<bool, _>(3),
                    active: r.get::<bool, _>(4),
                    building,
                }
            })
            .collect())
    }

    pub async fn create_tag_group(
        &self,
        name: &str,
        add_group: bool,
        default: bool,
        active: bool,
    ) -> Result<TagGroupId> {
        let rec = sqlx::query(
            "INSERT INTO tag_groups (name, add_group, is_default, active)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(add_group)
        .bind(default)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;
        Ok(TagGroupId(rec.get::<i64, _>(0)))
    }

    pub async fn set_tag_group_active(&self, group_id: TagGroupId, active: bool) -> Result<()> {
        sqlx::query("UPDATE tag_groups SET active = ? WHERE id = ?")
            .bind(active)
            .bind(group_id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_tag_groups(&self) -> Result<Vec<TagGroup>> {
        let rows = sqlx::query(
            "SELECT id, name, active, add_group, is_default
             FROM tag_groups ORDER BY lower(name) ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list tag groups")?;

        Ok(rows
            .into_iter()
            .map(|r| TagGroup {
                id: TagGroupId(r.get::<i64, _>(0)),
                name: r.get::<String, _>(1),
                active: r.get::<bool, _>(2),
                add_group: r.get::<bool, _>(3),
                default: r.get::<bool, _>(4),
            })
            .collect())
    }

    pub async fn create_tag(
        &self,
        group_id: Option<TagGroupId>,
        name: &str,
        colour: Option<&str>,
        active: bool,
    ) -> Result<TagId> {
        let rec = sqlx::query(
            "INSERT INTO tags (group_id, name, colour, active) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(group_id.map(|id| id.0))
        .bind(name)
        .bind(colour)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;
        Ok(TagId(rec.get::<i64, _>(0)))
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            "SELECT t.id, t.name, t.colour, t.active,
                    g.id, g.name, g.active, g.add_group, g.is_default
             FROM tags t
             LEFT JOIN tag_groups g ON g.id = t.group_id
             ORDER BY lower(t.name) ASC, t.id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list tags")?;

        Ok(rows.iter().map(|r| tag_from_row(r, 0)).collect())
    }

    pub async fn create_faculty(&self, faculty: &NewFaculty<'_>, roles: &[Role]) -> Result<UserId> {
        let rec = sqlx::query(
            "INSERT INTO users (username, first_name, last_name, email, active, last_active)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(faculty.username)
        .bind(faculty.first_name)
        .bind(faculty.last_name)
        .bind(faculty.email)
        .bind(faculty.active)
        .bind(faculty.last_active)
        .fetch_one(&self.pool)
        .await?;
        let user_id = UserId(rec.get::<i64, _>(0));
        for role in roles {
            self.add_role(user_id, *role).await?;
        }
        Ok(user_id)
    }

    pub async fn add_role(&self, user_id: UserId, role: Role) -> Result<()> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES (?, ?)
             ON CONFLICT(user_id, role) DO NOTHING",
        )
        .bind(user_id.0)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_user_active(&self, user_id: UserId, active: bool) -> Result<()> {
        sqlx::query("UPDATE users SET active = ? WHERE id = ?")
            .bind(active)
            .bind(user_id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_faculty(&self) -> Result<Vec<Faculty>> {
        let rows = sqlx::query(
            "SELECT DISTINCT u.id, u.username, u.first_name, u.last_name, u.email, u.active, u.last_active
             FROM users u
             INNER JOIN user_roles ur ON ur.user_id = u.id
             WHERE ur.role = 'faculty'
             ORDER BY lower(u.last_name) ASC, lower(u.first_name) ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list faculty")?;
        let roles = self.load_roles().await?;

        Ok(rows
            .iter()
            .map(|r| faculty_from_row(r, 0, &roles))
            .collect())
    }

    pub async fn create_research_group(
        &self,
        abbreviation: &str,
        name: &str,
        colour: Option<&str>,
        active: bool,
    ) -> Result<ResearchGroupId> {
        let rec = sqlx::query(
            "INSERT INTO research_groups (abbreviation, name, colour, active)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(abbreviation)
        .bind(name)
        .bind(colour)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;
        Ok(ResearchGroupId(rec.get::<i64, _>(0)))
    }

    pub async fn create_project(
        &self,
        owner_id: UserId,
        group_id: Option<ResearchGroupId>,
        name: &str,
        active: bool,
    ) -> Result<ProjectId> {
        let rec = sqlx::query(
            "INSERT INTO projects (owner_id, group_id, name, active, last_edited)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(owner_id.0)
        .bind(group_id.map(|id| id.0))
        .bind(name)
        .bind(active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(ProjectId(rec.get::<i64, _>(0)))
    }

    pub async fn tag_project(&self, project_id: ProjectId, tag_id: TagId) -> Result<()> {
        sqlx::query(
            "INSERT INTO project_tags (project_id, tag_id) VALUES (?, ?)
             ON CONFLICT(project_id, tag_id) DO NOTHING",
        )
        .bind(project_id.0)
        .bind(tag_id.0)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Projects ordered by name, optionally restricted to a single owner.
    pub async fn list_projects(&self, owner_id: Option<UserId>) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            "SELECT p.id, p.name, p.active, p.last_edited,
                    u.id, u.username, u.first_name, u.last_name, u.email, u.active, u.last_active,
                    g.id, g.abbreviation, g.name, g.colour, g.active
             FROM projects p
             LEFT JOIN users u ON u.id = p.owner_id
             LEFT JOIN research_groups g ON g.id = p.group_id
             WHERE ?1 IS NULL OR p.owner_id = ?1
             ORDER BY lower(p.name) ASC, p.id ASC",
        )
        .bind(owner_id.map(|id| id.0))
        .fetch_all(&self.pool)
        .await
        .context("failed to list projects")?;
        let roles = self.load_roles().await?;
        let mut tags = self.load_project_tags().await?;

        Ok(rows
            .iter()
            .map(|r| {
                let project_id = r.get::<i64, _>(0);
                let owner = r
                    .get::<Option<i64>, _>(4)
                    .map(|_| faculty_from_row(r, 4, &roles));
                let group = r
                    .get::<Option<i64>, _>(11)
                    .map(|group_id| ResearchGroup {
                        id: ResearchGroupId(group_id),
                        abbreviation: r.get::<String, _>(12),
                        name: r.get::<String, _>(13),
                        colour: r.get::<Option<String>, _>(14),
                        active: r.get::<bool, _>(15),
                    });
                Project {
                    id: ProjectId(project_id),
                    name: r.get::<String, _>(1),
                    active: r.get::<bool, _>(2),
                    owner,
                    group,
                    tags: tags.remove(&project_id).unwrap_or_default(),
                    last_edited: r.get::<Option<DateTime<Utc>>, _>(3),
                }
            })
            .collect())
    }

    pub async fn create_assessment(
        &self,
        name: &str,
        availability_requested: bool,
        availability_closed: bool,
        deployed: bool,
    ) -> Result<AssessmentId> {
        let rec = sqlx::query(
            "INSERT INTO assessments (name, availability_requested, availability_closed, deployed)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(availability_requested)
        .bind(availability_closed)
        .bind(deployed)
        .fetch_one(&self.pool)
        .await?;
        Ok(AssessmentId(rec.get::<i64, _>(0)))
    }

    pub async fn assessment(&self, assessment_id: AssessmentId) -> Result<Option<Assessment>> {
        let row = sqlx::query(
            "SELECT id, name, availability_requested, availability_closed, deployed
             FROM assessments WHERE id = ?",
        )
        .bind(assessment_id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Assessment {
            id: AssessmentId(r.get::<i64, _>(0)),
            name: r.get::<String, _>(1),
            availability_requested: r.get::<bool, _>(2),
            availability_closed: r.get::<bool, _>(3),
            deployed: r.get::<bool, _>(4),
        }))
    }

    pub async fn set_availability(
        &self,
        assessment_id: AssessmentId,
        faculty_id: UserId,
        record: &AvailabilityRecord,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO assessor_availability
                (assessment_id, faculty_id, confirmed, available_sessions, ifneeded_sessions,
                 unavailable_sessions, comment, request_email_sent, last_reminder)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(assessment_id, faculty_id) DO UPDATE SET
                confirmed=excluded.confirmed,
                available_sessions=excluded.available_sessions,
                ifneeded_sessions=excluded.ifneeded_sessions,
                unavailable_sessions=excluded.unavailable_sessions,
                comment=excluded.comment,
                request_email_sent=excluded.request_email_sent,
                last_reminder=excluded.last_reminder",
        )
        .bind(assessment_id.0)
        .bind(faculty_id.0)
        .bind(record.confirmed)
        .bind(record.available_sessions)
        .bind(record.ifneeded_sessions)
        .bind(record.unavailable_sessions)
        .bind(record.comment.as_deref())
        .bind(record.request_email_sent)
        .bind(record.last_reminder)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_assessors(
        &self,
        assessment_id: AssessmentId,
    ) -> Result<Vec<AssessorAvailability>> {
        let rows = sqlx::query(
            "SELECT a.confirmed, a.available_sessions, a.ifneeded_sessions, a.unavailable_sessions,
                    a.comment, a.request_email_sent, a.last_reminder, a.faculty_id,
                    u.id, u.username, u.first_name, u.last_name, u.email, u.active, u.last_active
             FROM assessor_availability a
             LEFT JOIN users u ON u.id = a.faculty_id
             WHERE a.assessment_id = ?
             ORDER BY lower(u.last_name) ASC, lower(u.first_name) ASC",
        )
        .bind(assessment_id.0)
        .fetch_all(&self.pool)
        .await
        .context("failed to list assessor availability")?;
        let roles = self.load_roles().await?;

        Ok(rows
            .iter()
            .map(|r| AssessorAvailability {
                faculty_id: UserId(r.get::<i64, _>(7)),
                faculty: r
                    .get::<Option<i64>, _>(8)
                    .map(|_| faculty_from_row(r, 8, &roles)),
                confirmed: r.get::<bool, _>(0),
                available_sessions: r.get::<u32, _>(1),
                ifneeded_sessions: r.get::<u32, _>(2),
                unavailable_sessions: r.get::<u32, _>(3),
                comment: r.get::<Option<String>, _>(4),
                request_email_sent: r.get::<bool, _>(5),
                last_reminder: r.get::<Option<DateTime<Utc>>, _>(6),
            })
            .collect())
    }

    async fn load_roles(&self) -> Result<HashMap<i64, Vec<Role>>> {
        let rows = sqlx::query("SELECT user_id, role FROM user_roles ORDER BY user_id, role")
            .fetch_all(&self.pool)
            .await
            .context("failed to load user roles")?;

        let mut roles: HashMap<i64, Vec<Role>> = HashMap::new();
        for row in rows {
            let raw = row.get::<String, _>(1);
            let Some(role) = Role::parse(&raw) else {
                debug!(role = %raw, "skipping unknown role");
                continue;
            };
            roles.entry(row.get::<i64, _>(0)).or_default().push(role);
        }
        Ok(roles)
    }

    async fn load_project_tags(&self) -> Result<HashMap<i64, Vec<Tag>>> {
        let rows = sqlx::query(
            "SELECT pt.project_id,
                    t.id, t.name, t.colour, t.active,
                    g.id, g.name, g.active, g.add_group, g.is_default
             FROM project_tags pt
             INNER JOIN tags t ON t.id = pt.tag_id
             LEFT JOIN tag_groups g ON g.id = t.group_id
             ORDER BY lower(t.name) ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to load project tags")?;

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in &rows {
            tags.entry(row.get::<i64, _>(0))
                .or_default()
                .push(tag_from_row(row, 1));
        }
        Ok(tags)
    }
}

/// Reads `id, name, colour, active` of a tag followed by its (nullable) group
/// columns `id, name, active, add_group, is_default`, starting at `offset`.
fn tag_from_row(r: &SqliteRow, offset: usize) -> Tag {
    let group = r
        .get::<Option<i64>, _>(offset + 4)
        .map(|group_id| TagGroup {
            id: TagGroupId(group_id),
            name: r.get::<String, _>(offset + 5),
            active: r.get::<bool, _>(offset + 6),
            add_group: r.get::<bool, _>(offset + 7),
            default: r.get::<bool, _>(offset + 8),
        });
    Tag {
        id: TagId(r.get::<i64, _>(offset)),
        name: r.get::<String, _>(offset + 1),
        colour: r.get::<Option<String>, _>(offset + 2),
        active: r.get::<bool, _>(offset + 3),
        group,
    }
}

/// Reads `id, username, first_name, last_name, email, active, last_active`
/// starting at `offset`.
fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn faculty_from_row(r: &SqliteRow, offset: usize, roles: &HashMap<i64, Vec<Role>>) -> Faculty {
    let user_id = r.get::<i64, _>(offset);
    Faculty {
        id: UserId(user_id),
        username: r.get::<String, _>(offset + 1),
        name: PersonName {
            first_name: r.get::<String, _>(offset + 2),
            last_name: r.get::<String, _>(offset + 3),
            email: r.get::<String, _>(offset + 4),
        },
        active: r.get::<bool, _>(offset + 5),
        last_active: r.get::<Option<DateTime<Utc>>, _>(offset + 6),
        roles: roles.get(&user_id).cloned().unwrap_or_default(),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
