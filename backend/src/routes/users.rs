//! User account routes

use super::extract::ApiJson;
use crate::auth::{CurrentUser, TokenSubject};
use crate::error::ApiError;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use recipedash_shared::{SignUpRequest, UpdateStatusRequest, UserResponse};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_users).post(create_user))
        .route("/:uid", get(get_user))
        .route("/:uid/status", patch(update_status))
}

/// POST /api/v1/users - Register the token's subject
async fn create_user(
    State(state): State<AppState>,
    subject: TokenSubject,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = UserService::create_user(state.db(), &subject.uid, req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users - All accounts (admin)
async fn get_all_users(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    Ok(Json(UserService::get_all_users(state.db(), &user).await?))
}

async fn get_user(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(uid): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserService::get_user_by_uid(state.db(), &uid).await?))
}

/// PATCH /api/v1/users/:uid/status - Block or unblock (admin)
async fn update_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(uid): Path<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = UserService::update_user_status(state.db(), &user, &uid, req.status).await?;
    Ok(Json(updated))
}
