//! Ajax table payloads: entity snapshots in, data-table rows out.

pub mod markup;
pub mod project;
pub mod routes;
pub mod tables;

use shared::{
    domain::{AssessmentId, UserId},
    error::{ApiError, ErrorCode, RenderError},
    protocol::RowRecord,
};
use storage::Storage;
use tracing::{debug, error};

pub use project::{encode, project, RowRenderer};
use tables::{
    AssessorRows, BuildingRows, FacultyRows, ProjectRows, RoomRows, TagGroupRows, TagRows,
};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub async fn buildings_table(ctx: &ApiContext) -> Result<Vec<RowRecord>, ApiError> {
    let buildings = ctx.storage.list_buildings().await.map_err(internal)?;
    render(&BuildingRows, &buildings, &())
}

pub async fn rooms_table(ctx: &ApiContext) -> Result<Vec<RowRecord>, ApiError> {
    let rooms = ctx.storage.list_rooms().await.map_err(internal)?;
    render(&RoomRows, &rooms, &())
}

pub async fn tag_groups_table(ctx: &ApiContext) -> Result<Vec<RowRecord>, ApiError> {
    let groups = ctx.storage.list_tag_groups().await.map_err(internal)?;
    render(&TagGroupRows, &groups, &())
}

pub async fn tags_table(ctx: &ApiContext) -> Result<Vec<RowRecord>, ApiError> {
    let tags = ctx.storage.list_tags().await.map_err(internal)?;
    render(&TagRows, &tags, &())
}

pub async fn faculty_table(ctx: &ApiContext) -> Result<Vec<RowRecord>, ApiError> {
    let faculty = ctx.storage.list_faculty().await.map_err(internal)?;
    render(&FacultyRows, &faculty, &())
}

pub async fn projects_table(
    ctx: &ApiContext,
    owner: Option<UserId>,
) -> Result<Vec<RowRecord>, ApiError> {
    let projects = ctx.storage.list_projects(owner).await.map_err(internal)?;
    render(&ProjectRows, &projects, &owner)
}

pub async fn assessors_table(
    ctx: &ApiContext,
    assessment_id: AssessmentId,
) -> Result<Vec<RowRecord>, ApiError> {
    let assessment = ctx
        .storage
        .assessment(assessment_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "assessment not found"))?;
    let assessors = ctx
        .storage
        .list_assessors(assessment_id)
        .await
        .map_err(internal)?;
    render(&AssessorRows, &assessors, &assessment)
}

fn render<R: RowRenderer>(
    renderer: &R,
    entities: &[R::Entity],
    ctx: &R::Context,
) -> Result<Vec<RowRecord>, ApiError> {
    let rows = project(renderer, entities, ctx).map_err(|err: RenderError| {
        error!(table = ?R::KIND, %err, "table projection failed");
        ApiError::from(err)
    })?;
    debug!(table = ?R::KIND, rows = rows.len(), "table projected");
    Ok(rows)
}

fn internal(err: anyhow::Error) -> ApiError {
    error!(error = %err, "table query failed");
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
