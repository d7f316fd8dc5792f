//! Delivery entity model and DTOs.

use hopelink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A delivery of one claim (donation + request) by one volunteer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Delivery {
    pub id: DbId,
    pub donation_id: DbId,
    pub request_id: DbId,
    pub volunteer_id: Option<DbId>,
    pub volunteer_name: Option<String>,
    pub scheduled_for: Option<Timestamp>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new delivery. The status always starts at `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDelivery {
    pub donation_id: DbId,
    pub request_id: DbId,
    pub volunteer_id: Option<DbId>,
    pub scheduled_for: Option<Timestamp>,
}
