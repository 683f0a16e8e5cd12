//! User profile management endpoints
//!
//! CRUD over `ProfileService` with pagination on listings. Validation
//! failures map to 400, unknown ids to 404; storage degradation is
//! invisible here by design.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use wayfare_common::{DEFAULT_PAGE_SIZE, Pagination, WayfareError};
use wayfare_profile::{CreateProfileRequest, ProfileSummary, UpdateProfileRequest, UserProfile};

use super::{ApiError, AppState, api_error};

/// Response body for single-profile operations
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub profile: UserProfile,
    pub message: String,
}

/// Query parameters for profile listings
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Create a new user profile
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    info!("Creating user profile for {}", request.basic_info.email);

    match state.profiles.create(request).await {
        Ok(profile) => Ok(Json(ProfileResponse {
            user_id: profile.user_id.clone(),
            profile,
            message: "User profile created successfully".to_string(),
        })),
        Err(WayfareError::Validation(detail)) => Err(api_error(StatusCode::BAD_REQUEST, detail)),
        Err(_) => Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )),
    }
}

/// Get a user profile by id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    match state.profiles.get(&user_id).await {
        Some(profile) => Ok(Json(ProfileResponse {
            user_id,
            profile,
            message: "User profile retrieved successfully".to_string(),
        })),
        None => Err(api_error(StatusCode::NOT_FOUND, "User profile not found")),
    }
}

/// Partially update a user profile
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    match state.profiles.update(&user_id, request).await {
        Some(profile) => Ok(Json(ProfileResponse {
            user_id,
            profile,
            message: "User profile updated successfully".to_string(),
        })),
        None => Err(api_error(StatusCode::NOT_FOUND, "User profile not found")),
    }
}

/// Delete a user profile
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.profiles.delete(&user_id).await {
        Ok(Json(serde_json::json!({
            "message": format!("User profile {} deleted successfully", user_id)
        })))
    } else {
        Err(api_error(StatusCode::NOT_FOUND, "User profile not found"))
    }
}

/// List profile summaries with pagination
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Json<Vec<ProfileSummary>> {
    let pagination = Pagination::new(
        params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        params.offset.unwrap_or(0),
    );

    Json(state.profiles.list(pagination).await)
}

/// Mark a user's onboarding as finished
pub async fn complete_onboarding(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.profiles.set_onboarding_completed(&user_id, true).await {
        Ok(Json(serde_json::json!({
            "message": format!("Onboarding completed for user {}", user_id)
        })))
    } else {
        Err(api_error(StatusCode::NOT_FOUND, "User profile not found"))
    }
}

/// Create router for user profile endpoints
pub fn user_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/onboarding", post(complete_onboarding))
        .with_state(state)
}
