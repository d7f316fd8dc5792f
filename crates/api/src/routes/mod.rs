pub mod dashboard;
pub mod delivery;
pub mod donation;
pub mod health;
pub mod profile;
pub mod request;
pub mod workflow;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                         WebSocket change feed (?entity_type=)
///
/// /workflow/{entity_type}/stages              stage table + exceptions
/// /workflow/{entity_type}/lookup              status lookup + progress (?status=)
/// /workflow/{entity_type}/transitions         legal transitions (?status=&actor=)
/// /workflow/{entity_type}/breakdown           status counts from the database
///
/// /donations                                  list (?status=&limit=&offset=), create
/// /donations/{id}                             get
/// /donations/{id}/requests                    matched requests
/// /donations/{id}/transitions                 legal transitions (?actor=)
/// /donations/{id}/status                      update status (PUT)
/// /donations/{id}/history                     status history
///
/// /requests                                   list, create
/// /requests/{id}                              get
/// /requests/{id}/transitions                  legal transitions (?actor=)
/// /requests/{id}/status                       update status (PUT)
/// /requests/{id}/history                      status history
///
/// /deliveries                                 list, create
/// /deliveries/{id}                            get
/// /deliveries/{id}/transitions                legal transitions (?actor=)
/// /deliveries/{id}/status                     update status (PUT)
/// /deliveries/{id}/history                    status history
///
/// /profiles                                   list (?role=), create
/// /profiles/{id}                              get
///
/// /dashboard/statuses                         cached status breakdowns
/// ```
///
/// Creates and status updates require the `x-actor-role` header.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/workflow", workflow::router())
        .nest("/donations", donation::router())
        .nest("/requests", request::router())
        .nest("/deliveries", delivery::router())
        .nest("/profiles", profile::router())
        .nest("/dashboard", dashboard::router())
}
