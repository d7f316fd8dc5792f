//! Request entity model and DTOs.

use hopelink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recipient's request for aid, joined with the recipient's display name.
///
/// `donation_id` is set once the request is matched to a donation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Request {
    pub id: DbId,
    pub recipient_id: Option<DbId>,
    pub recipient_name: Option<String>,
    pub donation_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub urgency: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new request. The status always starts at `open`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    pub recipient_id: Option<DbId>,
    pub donation_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `normal` if omitted.
    pub urgency: Option<String>,
}
