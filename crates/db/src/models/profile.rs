//! Profile entity model and DTOs.

use hopelink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table: a donor, recipient, volunteer or admin.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub full_name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub full_name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
