//! Route definitions for deliveries.
//!
//! ```text
//! GET    /                    list_deliveries
//! POST   /                    create_delivery
//! GET    /{id}                get_delivery
//! GET    /{id}/transitions    delivery_transitions
//! PUT    /{id}/status         update_delivery_status
//! GET    /{id}/history        delivery_history
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::delivery;
use crate::state::AppState;

/// Delivery routes, mounted at `/deliveries`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(delivery::list_deliveries).post(delivery::create_delivery),
        )
        .route("/{id}", get(delivery::get_delivery))
        .route("/{id}/transitions", get(delivery::delivery_transitions))
        .route("/{id}/status", put(delivery::update_delivery_status))
        .route("/{id}/history", get(delivery::delivery_history))
}
