//! Route definitions for donations.
//!
//! ```text
//! GET    /                    list_donations
//! POST   /                    create_donation
//! GET    /{id}                get_donation
//! GET    /{id}/requests       list_donation_requests
//! GET    /{id}/transitions    donation_transitions
//! PUT    /{id}/status         update_donation_status
//! GET    /{id}/history        donation_history
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::donation;
use crate::state::AppState;

/// Donation routes, mounted at `/donations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(donation::list_donations).post(donation::create_donation),
        )
        .route("/{id}", get(donation::get_donation))
        .route("/{id}/requests", get(donation::list_donation_requests))
        .route("/{id}/transitions", get(donation::donation_transitions))
        .route("/{id}/status", put(donation::update_donation_status))
        .route("/{id}/history", get(donation::donation_history))
}
