use axum::http::HeaderValue;
use views::ApiContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) cache_control: HeaderValue,
    pub(crate) profiling: bool,
}
