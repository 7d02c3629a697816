use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::sync::Arc;

use crate::db::{CreatePersonRequest, Person};
use crate::AppState;

use super::error::ApiError;
use super::responses::{CreatedResponse, ListResponse, MessageResponse};

pub async fn list_people(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse<Person>>, ApiError> {
    let people = state.store.list_people().await?;
    Ok(Json(ListResponse::new(people, "People retrieved")))
}

pub async fn create_person(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse<Person>>, ApiError> {
    let Json(req) = body?;
    let person = state.store.create_person(req).await?;
    Ok(Json(CreatedResponse::new(person, "Person created")))
}

pub async fn get_person(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Person>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.store.get_person(id).await?))
}

pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.store.delete_person(id).await?;
    Ok(Json(MessageResponse::new(format!("Person {} deleted", id))))
}
