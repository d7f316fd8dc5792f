//! Route definitions for stateless workflow queries.
//!
//! ```text
//! GET /{entity_type}/stages         get_stages
//! GET /{entity_type}/lookup         lookup_status
//! GET /{entity_type}/transitions    list_transitions
//! GET /{entity_type}/breakdown      get_breakdown
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::workflow;
use crate::state::AppState;

/// Workflow routes, mounted at `/workflow`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{entity_type}/stages", get(workflow::get_stages))
        .route("/{entity_type}/lookup", get(workflow::lookup_status))
        .route("/{entity_type}/transitions", get(workflow::list_transitions))
        .route("/{entity_type}/breakdown", get(workflow::get_breakdown))
}
