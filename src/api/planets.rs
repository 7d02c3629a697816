use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::sync::Arc;

use crate::db::{CreatePlanetRequest, Planet};
use crate::AppState;

use super::error::ApiError;
use super::responses::{CreatedResponse, ListResponse, MessageResponse};

pub async fn list_planets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse<Planet>>, ApiError> {
    let planets = state.store.list_planets().await?;
    Ok(Json(ListResponse::new(planets, "Planets retrieved")))
}

pub async fn create_planet(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreatePlanetRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse<Planet>>, ApiError> {
    let Json(req) = body?;
    let planet = state.store.create_planet(req).await?;
    Ok(Json(CreatedResponse::new(planet, "Planet created")))
}

pub async fn get_planet(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Planet>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.store.get_planet(id).await?))
}

pub async fn delete_planet(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.store.delete_planet(id).await?;
    Ok(Json(MessageResponse::new(format!("Planet {} deleted", id))))
}
