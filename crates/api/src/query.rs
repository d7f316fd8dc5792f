//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// List parameters for workflow entities (`?status=&limit=&offset=`).
///
/// `status` accepts a stage id, an alias or a terminal exception. Limits
/// are clamped via `hopelink_core::pagination`.
#[derive(Debug, Deserialize)]
pub struct StatusListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?status=` for the stateless workflow lookup endpoints.
#[derive(Debug, Deserialize)]
pub struct StatusParam {
    pub status: Option<String>,
}

/// `?role=` filter for profile listing.
#[derive(Debug, Deserialize)]
pub struct RoleParam {
    pub role: Option<String>,
}

/// `?status=&actor=` for the stateless transition query.
#[derive(Debug, Deserialize)]
pub struct TransitionQuery {
    pub status: Option<String>,
    pub actor: Option<String>,
}

/// `?actor=` for per-row transition queries.
#[derive(Debug, Deserialize)]
pub struct ActorParam {
    pub actor: Option<String>,
}
