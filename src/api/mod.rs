pub mod error;
mod favorites;
mod people;
mod planets;
mod responses;
mod users;

use axum::{
    http::{Method, Uri},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

use self::error::ApiError;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Users
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id", delete(users::delete_user))
        .route("/users/:id/favorites", get(favorites::list_user_favorites))
        // People
        .route("/people", get(people::list_people))
        .route("/people", post(people::create_person))
        .route("/people/:id", get(people::get_person))
        .route("/people/:id", delete(people::delete_person))
        // Planets
        .route("/planets", get(planets::list_planets))
        .route("/planets", post(planets::create_planet))
        .route("/planets/:id", get(planets::get_planet))
        .route("/planets/:id", delete(planets::delete_planet))
        // Favorites
        .route("/favorite/:user_id/planets", post(favorites::add_favorite_planet))
        .route(
            "/favorites/:user_id/planets/:planet_id",
            delete(favorites::remove_favorite_planet),
        )
        .route("/favorite/:user_id/people", post(favorites::add_favorite_person))
        .route(
            "/favorites/:user_id/people/:people_id",
            delete(favorites::remove_favorite_person),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!("{} is not allowed on {}", method, uri.path()))
}
