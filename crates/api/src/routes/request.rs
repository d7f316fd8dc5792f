//! Route definitions for requests.
//!
//! ```text
//! GET    /                    list_requests
//! POST   /                    create_request
//! GET    /{id}                get_request
//! GET    /{id}/transitions    request_transitions
//! PUT    /{id}/status         update_request_status
//! GET    /{id}/history        request_history
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::request;
use crate::state::AppState;

/// Request routes, mounted at `/requests`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(request::list_requests).post(request::create_request))
        .route("/{id}", get(request::get_request))
        .route("/{id}/transitions", get(request::request_transitions))
        .route("/{id}/status", put(request::update_request_status))
        .route("/{id}/history", get(request::request_history))
}
