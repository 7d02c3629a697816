//! JSON envelopes shared by the handlers.

use serde::Serialize;

use crate::db::UserFavorites;

/// `{results: [...], message}` for collections
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    pub message: String,
}

impl<T> ListResponse<T> {
    pub fn new(results: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            results,
            message: message.into(),
        }
    }
}

/// `{results: {...}, message}` for a newly created row
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T> {
    pub results: T,
    pub message: String,
}

impl<T> CreatedResponse<T> {
    pub fn new(results: T, message: impl Into<String>) -> Self {
        Self {
            results,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoritePlanetRef {
    pub planet_id: i64,
}

#[derive(Debug, Serialize)]
pub struct FavoritePersonRef {
    pub people_id: i64,
}

/// Favorites of one user, as returned by `GET /users/:id/favorites`
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorite_planets: Vec<FavoritePlanetRef>,
    pub favorite_people: Vec<FavoritePersonRef>,
    pub message: String,
}

impl FavoritesResponse {
    pub fn new(user_id: i64, favorites: UserFavorites) -> Self {
        Self {
            favorite_planets: favorites
                .planets
                .into_iter()
                .map(|planet_id| FavoritePlanetRef { planet_id })
                .collect(),
            favorite_people: favorites
                .people
                .into_iter()
                .map(|people_id| FavoritePersonRef { people_id })
                .collect(),
            message: format!("Favorites of user {}", user_id),
        }
    }
}
