//! Declared-role extractor.
//!
//! Session handling lives outside this service; callers state the role they
//! act in via the `x-actor-role` header, and the transition rules decide
//! what that role may do.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hopelink_core::workflow::Actor;

use crate::error::AppError;

/// Header carrying the caller's role.
pub const ACTOR_HEADER: &str = "x-actor-role";

/// The role declared by the caller. Rejects with 400 when missing or invalid.
///
/// ```ignore
/// async fn handler(DeclaredActor(actor): DeclaredActor) -> AppResult<Json<()>> {
///     tracing::info!(%actor, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeclaredActor(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for DeclaredActor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("Missing {ACTOR_HEADER} header")))?;

        Ok(DeclaredActor(raw.parse::<Actor>()?))
    }
}
