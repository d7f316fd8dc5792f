//! Handlers for donor, recipient, volunteer and admin profiles.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hopelink_core::display::or_not_provided;
use hopelink_core::error::CoreError;
use hopelink_core::types::DbId;
use hopelink_core::validation::{validate_one_of, validate_required, VALID_ROLES};
use hopelink_db::models::profile::{CreateProfile, Profile};
use hopelink_db::repositories::ProfileRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::RoleParam;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_NAME_LEN: usize = 120;

/// A profile with contact placeholders filled in.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub email_display: String,
    pub phone_display: String,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        Self {
            email_display: or_not_provided(profile.email.as_deref()),
            phone_display: or_not_provided(profile.phone.as_deref()),
            profile,
        }
    }
}

/// GET /profiles?role=
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(params): Query<RoleParam>,
) -> AppResult<impl IntoResponse> {
    let role = params.role.as_deref().map(str::trim).filter(|r| !r.is_empty());
    if let Some(role) = role {
        validate_one_of("role", role, VALID_ROLES)?;
    }
    let rows = ProfileRepo::list(&state.pool, role).await?;
    let data: Vec<ProfileView> = rows.into_iter().map(ProfileView::from).collect();
    Ok(Json(DataResponse { data }))
}

/// POST /profiles
pub async fn create_profile(
    State(state): State<AppState>,
    Json(body): Json<CreateProfile>,
) -> AppResult<impl IntoResponse> {
    validate_required("full_name", &body.full_name, MAX_NAME_LEN)?;
    validate_one_of("role", &body.role, VALID_ROLES)?;

    let profile = ProfileRepo::create(&state.pool, &body).await?;
    tracing::info!(id = profile.id, role = %profile.role, "Profile created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProfileView::from(profile),
        }),
    ))
}

/// GET /profiles/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id,
            })
        })?;
    Ok(Json(DataResponse {
        data: ProfileView::from(profile),
    }))
}
