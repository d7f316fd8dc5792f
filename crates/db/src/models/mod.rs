//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod delivery;
pub mod donation;
pub mod profile;
pub mod request;
pub mod status_change;

/// Filter for workflow-entity list queries.
///
/// `statuses` holds every raw value to match (a stage id plus its aliases);
/// `None` matches all rows.
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub statuses: Option<Vec<String>>,
    pub limit: i64,
    pub offset: i64,
}
