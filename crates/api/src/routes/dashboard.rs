use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes, mounted at `/dashboard`.
pub fn router() -> Router<AppState> {
    Router::new().route("/statuses", get(dashboard::status_overview))
}
