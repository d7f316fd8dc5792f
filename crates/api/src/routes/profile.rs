use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Profile routes, mounted at `/profiles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::list_profiles).post(profile::create_profile))
        .route("/{id}", get(profile::get_profile))
}
