//! Repository traits.
//!
//! Handlers only see `Arc<dyn Store>`; `SqliteStore` backs production and
//! `MemoryStore` stands in for it in tests.

use async_trait::async_trait;

use super::error::DomainError;
use super::models::{
    CreatePersonRequest, CreatePlanetRequest, CreateUserRequest, FavoritePerson, FavoritePlanet,
    Person, Planet, User, UserFavorites,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    async fn get_user(&self, id: i64) -> Result<User, DomainError>;

    /// Validate, hash the password and insert. Fails with `Conflict` when the
    /// email is already registered.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError>;

    /// Delete a user and every favorite that belongs to them.
    async fn delete_user(&self, id: i64) -> Result<(), DomainError>;
}

#[async_trait]
pub trait PeopleRepository: Send + Sync {
    async fn list_people(&self) -> Result<Vec<Person>, DomainError>;

    async fn get_person(&self, id: i64) -> Result<Person, DomainError>;

    /// Fails with `Conflict` when the name is taken.
    async fn create_person(&self, request: CreatePersonRequest) -> Result<Person, DomainError>;

    async fn delete_person(&self, id: i64) -> Result<(), DomainError>;
}

#[async_trait]
pub trait PlanetRepository: Send + Sync {
    async fn list_planets(&self) -> Result<Vec<Planet>, DomainError>;

    async fn get_planet(&self, id: i64) -> Result<Planet, DomainError>;

    /// Fails with `Conflict` when the name is taken.
    async fn create_planet(&self, request: CreatePlanetRequest) -> Result<Planet, DomainError>;

    async fn delete_planet(&self, id: i64) -> Result<(), DomainError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// `NotFound` if the user or person is missing, `Conflict` if already a favorite.
    async fn add_favorite_person(
        &self,
        user_id: i64,
        people_id: i64,
    ) -> Result<FavoritePerson, DomainError>;

    /// Person ids the user favorited. Empty when there are none or the user is unknown.
    async fn list_favorite_people(&self, user_id: i64) -> Result<Vec<i64>, DomainError>;

    async fn remove_favorite_person(&self, user_id: i64, people_id: i64)
        -> Result<(), DomainError>;

    /// `NotFound` if the user or planet is missing, `Conflict` if already a favorite.
    async fn add_favorite_planet(
        &self,
        user_id: i64,
        planets_id: i64,
    ) -> Result<FavoritePlanet, DomainError>;

    /// Planet ids the user favorited. Empty when there are none or the user is unknown.
    async fn list_favorite_planets(&self, user_id: i64) -> Result<Vec<i64>, DomainError>;

    async fn remove_favorite_planet(
        &self,
        user_id: i64,
        planets_id: i64,
    ) -> Result<(), DomainError>;

    /// Both favorite lists for an existing user; `NotFound` for an unknown one.
    async fn favorites_for_user(&self, user_id: i64) -> Result<UserFavorites, DomainError>;
}

/// Everything the HTTP layer needs from persistence.
pub trait Store: UserRepository + PeopleRepository + PlanetRepository + FavoriteRepository {}

impl<T> Store for T where T: UserRepository + PeopleRepository + PlanetRepository + FavoriteRepository
{}
