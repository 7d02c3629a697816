//! User endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::sync::Arc;

use crate::db::{CreateUserRequest, UserResponse};
use crate::AppState;

use super::error::ApiError;
use super::responses::{CreatedResponse, ListResponse, MessageResponse};

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse<UserResponse>>, ApiError> {
    let users = state.store.list_users().await?;
    let results = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(ListResponse::new(results, "Users retrieved")))
}

/// POST /users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse<UserResponse>>, ApiError> {
    let Json(req) = body?;
    let user = state.store.create_user(req).await?;

    Ok(Json(CreatedResponse::new(
        UserResponse::from(user),
        "User created",
    )))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Path(id) = id?;
    let user = state.store.get_user(id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.store.delete_user(id).await?;

    Ok(Json(MessageResponse::new(format!("User {} deleted", id))))
}
