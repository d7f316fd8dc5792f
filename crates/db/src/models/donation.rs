//! Donation entity model and DTOs.

use hopelink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A donation row joined with its donor's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub donor_id: Option<DbId>,
    /// `profiles.full_name` of the donor; `None` when the profile is gone.
    pub donor_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: i32,
    pub pickup_address: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new donation. The status always starts at `available`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDonation {
    pub donor_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Defaults to 1 if omitted.
    pub quantity: Option<i32>,
    pub pickup_address: Option<String>,
}
