//! User management endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, DataDto, Json};
use crate::domain::user::{User, UserId};

/// Query parameters for the birth date range search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthDateRangeQuery {
    pub start_birth_date: NaiveDate,
    pub end_birth_date: NaiveDate,
}

/// Incoming `{data: ...}` envelope.
///
/// A missing or null `data` behaves as the wholly-absent user, which the
/// service rejects as an empty payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub data: Option<User>,
}

impl UserPayload {
    fn into_user(self) -> User {
        self.data.unwrap_or_default()
    }
}

pub const USER_DELETED: &str = "User was successfully deleted.";

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<UserPayload>,
) -> Result<(StatusCode, Json<DataDto<User>>), ApiError> {
    debug!("Creating user");

    let created = state
        .user_service
        .create(request.into_user())
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(DataDto::new(created))))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DataDto<User>>, ApiError> {
    debug!(user_id = id, "Getting user");

    let user = state
        .user_service
        .find_by_id(UserId::new(id))
        .await
        .map_err(ApiError::from)?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(DataDto::new(user)))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UserPayload>,
) -> Result<Json<DataDto<User>>, ApiError> {
    debug!(user_id = id, "Updating user");

    let updated = state
        .user_service
        .update(UserId::new(id), request.into_user())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataDto::new(updated)))
}

/// PATCH /users/{id}
pub async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UserPayload>,
) -> Result<Json<DataDto<User>>, ApiError> {
    debug!(user_id = id, "Patching user");

    let patched = state
        .user_service
        .patch(UserId::new(id), request.into_user())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataDto::new(patched)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    debug!(user_id = id, "Deleting user");

    let deleted = state
        .user_service
        .delete_by_id(UserId::new(id))
        .await
        .map_err(ApiError::from)?;

    if deleted {
        Ok(USER_DELETED)
    } else {
        Err(ApiError::not_found())
    }
}

/// GET /users?startBirthDate=&endBirthDate=
pub async fn find_users_by_birth_date_between(
    State(state): State<AppState>,
    Query(range): Query<BirthDateRangeQuery>,
) -> Result<Json<DataDto<Vec<User>>>, ApiError> {
    debug!(
        start = %range.start_birth_date,
        end = %range.end_birth_date,
        "Searching users by birth date range"
    );

    let users = state
        .user_service
        .find_by_birth_date_between(range.start_birth_date, range.end_birth_date)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataDto::new(users)))
}
