//! Favorite endpoints.
//!
//! Adding uses `/favorite/...` and removing uses `/favorites/...`; both path
//! shapes are part of the public API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::sync::Arc;

use crate::db::{
    AddFavoritePersonRequest, AddFavoritePlanetRequest, FavoritePerson, FavoritePlanet,
};
use crate::AppState;

use super::error::ApiError;
use super::responses::{CreatedResponse, FavoritesResponse, MessageResponse};

/// GET /users/:id/favorites
///
/// 404 both for an unknown user and for a user without any favorites.
pub async fn list_user_favorites(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let Path(user_id) = id?;
    let favorites = state.store.favorites_for_user(user_id).await?;

    if favorites.is_empty() {
        return Err(ApiError::not_found(format!(
            "User {} has no favorites",
            user_id
        )));
    }

    Ok(Json(FavoritesResponse::new(user_id, favorites)))
}

/// POST /favorite/:user_id/planets
pub async fn add_favorite_planet(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AddFavoritePlanetRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse<FavoritePlanet>>, ApiError> {
    let Path(user_id) = id?;
    let Json(req) = body?;
    let planets_id = req
        .planets_id
        .ok_or_else(|| ApiError::validation_field("planets_id", "planets_id is required"))?;

    let favorite = state.store.add_favorite_planet(user_id, planets_id).await?;

    Ok(Json(CreatedResponse::new(favorite, "Favorite planet added")))
}

/// DELETE /favorites/:user_id/planets/:planet_id
pub async fn remove_favorite_planet(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path((user_id, planet_id)) = ids?;
    state.store.remove_favorite_planet(user_id, planet_id).await?;

    Ok(Json(MessageResponse::new(format!(
        "Planet {} removed from favorites of user {}",
        planet_id, user_id
    ))))
}

/// POST /favorite/:user_id/people
pub async fn add_favorite_person(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AddFavoritePersonRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse<FavoritePerson>>, ApiError> {
    let Path(user_id) = id?;
    let Json(req) = body?;
    let people_id = req
        .people_id
        .ok_or_else(|| ApiError::validation_field("people_id", "people_id is required"))?;

    let favorite = state.store.add_favorite_person(user_id, people_id).await?;

    Ok(Json(CreatedResponse::new(favorite, "Favorite person added")))
}

/// DELETE /favorites/:user_id/people/:people_id
pub async fn remove_favorite_person(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path((user_id, people_id)) = ids?;
    state.store.remove_favorite_person(user_id, people_id).await?;

    Ok(Json(MessageResponse::new(format!(
        "Person {} removed from favorites of user {}",
        people_id, user_id
    ))))
}
