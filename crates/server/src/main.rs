use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{
    domain::{AssessmentId, UserId},
    error::{ApiError, ErrorCode},
    protocol::RowRecord,
};
use storage::Storage;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use views::{
    assessors_table, buildings_table, encode, faculty_table, projects_table, rooms_table,
    tag_groups_table, tags_table, ApiContext,
};

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, prepare_database_url};

#[derive(Debug, Deserialize)]
struct ProjectsQuery {
    owner_id: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let cache_control = HeaderValue::from_str(&settings.cache.cache_control())
        .unwrap_or_else(|_| HeaderValue::from_static("no-store"));
    let state = AppState {
        api: ApiContext { storage },
        cache_control,
        profiling: settings.profiling.enabled,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(
        %addr,
        cache = %settings.cache.cache_control(),
        profiling = settings.profiling.enabled,
        "server listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let profiling = state.profiling;
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/ajax/admin/buildings", get(http_buildings))
        .route("/ajax/admin/rooms", get(http_rooms))
        .route("/ajax/admin/tag_groups", get(http_tag_groups))
        .route("/ajax/admin/tags", get(http_tags))
        .route("/ajax/admin/faculty", get(http_faculty))
        .route("/ajax/faculty/projects", get(http_projects))
        .route(
            "/ajax/admin/assessments/:assessment_id/assessors",
            get(http_assessors),
        )
        .with_state(state);

    if profiling {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

async fn healthz(State(state): State<Arc<AppState>>) -> Response {
    match state.api.storage.health_check().await {
        Ok(()) => "ok".into_response(),
        Err(error) => {
            error!(%error, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable").into_response()
        }
    }
}

async fn http_buildings(State(state): State<Arc<AppState>>) -> Response {
    table_response(&state, buildings_table(&state.api).await)
}

async fn http_rooms(State(state): State<Arc<AppState>>) -> Response {
    table_response(&state, rooms_table(&state.api).await)
}

async fn http_tag_groups(State(state): State<Arc<AppState>>) -> Response {
    table_response(&state, tag_groups_table(&state.api).await)
}

async fn http_tags(State(state): State<Arc<AppState>>) -> Response {
    table_response(&state, tags_table(&state.api).await)
}

async fn http_faculty(State(state): State<Arc<AppState>>) -> Response {
    table_response(&state, faculty_table(&state.api).await)
}

async fn http_projects(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ProjectsQuery>,
) -> Response {
    table_response(&state, projects_table(&state.api, q.owner_id.map(UserId)).await)
}

async fn http_assessors(
    State(state): State<Arc<AppState>>,
    Path(assessment_id): Path<i64>,
) -> Response {
    table_response(
        &state,
        assessors_table(&state.api, AssessmentId(assessment_id)).await,
    )
}

/// Whole table or an error body; a partially rendered table is never sent.
fn table_response(state: &AppState, rows: Result<Vec<RowRecord>, ApiError>) -> Response {
    let body = rows.and_then(|rows| encode(&rows).map_err(ApiError::from));
    match body {
        Ok(body) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                ),
                (header::CACHE_CONTROL, state.cache_control.clone()),
            ],
            body,
        )
            .into_response(),
        Err(err) => (status_for(&err), Json(err)).into_response(),
    }
}

fn status_for(err: &ApiError) -> StatusCode {
    match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
