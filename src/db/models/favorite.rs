//! Favorite join rows between users and people/planets.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FavoritePerson {
    pub id: i64,
    pub people_id: i64,
    pub users_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FavoritePlanet {
    pub id: i64,
    pub planets_id: i64,
    pub users_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddFavoritePersonRequest {
    pub people_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddFavoritePlanetRequest {
    pub planets_id: Option<i64>,
}

/// Target ids a user has favorited, oldest favorite first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFavorites {
    pub people: Vec<i64>,
    pub planets: Vec<i64>,
}

impl UserFavorites {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.planets.is_empty()
    }
}
