//! SQLite-backed store.

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, FromRow, SqliteConnection};
use tracing::info;

use super::error::{conflict_on_unique, DomainError};
use super::models::{
    CreatePersonRequest, CreatePlanetRequest, CreateUserRequest, FavoritePerson, FavoritePlanet,
    Person, Planet, User, UserFavorites,
};
use super::repository::{FavoriteRepository, PeopleRepository, PlanetRepository, UserRepository};
use super::DbPool;

/// Table and column names for one kind of favorite
struct FavoriteTable {
    table: &'static str,
    target_table: &'static str,
    target_column: &'static str,
    target_label: &'static str,
}

const FAVORITE_PEOPLE: FavoriteTable = FavoriteTable {
    table: "favorite_people",
    target_table: "people",
    target_column: "people_id",
    target_label: "Person",
};

const FAVORITE_PLANETS: FavoriteTable = FavoriteTable {
    table: "favorite_planets",
    target_table: "planets",
    target_column: "planets_id",
    target_label: "Planet",
};

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Delete a row by id inside its own transaction
    async fn delete_by_id(&self, table: &str, label: &str, id: i64) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(label, id));
        }

        tx.commit().await?;
        info!(table, id, "Deleted row");
        Ok(())
    }

    async fn add_favorite<T>(
        &self,
        favorites: &FavoriteTable,
        user_id: i64,
        target_id: i64,
    ) -> Result<T, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut tx, "users", user_id).await? {
            return Err(DomainError::not_found("User", user_id));
        }
        if !row_exists(&mut tx, favorites.target_table, target_id).await? {
            return Err(DomainError::not_found(favorites.target_label, target_id));
        }

        let duplicate = format!(
            "{} {} is already a favorite of user {}",
            favorites.target_label, target_id, user_id
        );

        let existing: Option<i64> = sqlx::query_scalar(&format!(
            "SELECT id FROM {} WHERE users_id = ? AND {} = ?",
            favorites.table, favorites.target_column
        ))
        .bind(user_id)
        .bind(target_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Err(DomainError::Conflict(duplicate));
        }

        let row = sqlx::query_as::<_, T>(&format!(
            "INSERT INTO {table} ({column}, users_id) VALUES (?, ?) RETURNING id, {column}, users_id",
            table = favorites.table,
            column = favorites.target_column
        ))
        .bind(target_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(conflict_on_unique(duplicate))?;

        tx.commit().await?;
        info!(
            table = favorites.table,
            user_id, target_id, "Added favorite"
        );
        Ok(row)
    }

    async fn list_favorites(
        &self,
        favorites: &FavoriteTable,
        user_id: i64,
    ) -> Result<Vec<i64>, DomainError> {
        let ids: Vec<i64> = sqlx::query_scalar(&format!(
            "SELECT {} FROM {} WHERE users_id = ? ORDER BY id",
            favorites.target_column, favorites.table
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn remove_favorite(
        &self,
        favorites: &FavoriteTable,
        user_id: i64,
        target_id: i64,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE users_id = ? AND {} = ?",
            favorites.table, favorites.target_column
        ))
        .bind(user_id)
        .bind(target_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "{} {} is not a favorite of user {}",
                favorites.target_label, target_id, user_id
            )));
        }

        tx.commit().await?;
        info!(
            table = favorites.table,
            user_id, target_id, "Removed favorite"
        );
        Ok(())
    }
}

async fn row_exists(conn: &mut SqliteConnection, table: &str, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar(&format!("SELECT id FROM {} WHERE id = ?", table))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, is_active FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, is_active FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let new_user = request.validate()?;
        let duplicate = format!("A user with email {} already exists", new_user.email);

        let mut tx = self.pool.begin().await?;

        let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
            .bind(&new_user.email)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(DomainError::Conflict(duplicate));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, is_active)
            VALUES (?, ?, ?)
            RETURNING id, email, password_hash, is_active
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(conflict_on_unique(duplicate))?;

        tx.commit().await?;
        info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        self.delete_by_id("users", "User", id).await
    }
}

#[async_trait]
impl PeopleRepository for SqliteStore {
    async fn list_people(&self) -> Result<Vec<Person>, DomainError> {
        let people = sqlx::query_as::<_, Person>(
            "SELECT id, name, gender, height, mass, hair_color FROM people ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(people)
    }

    async fn get_person(&self, id: i64) -> Result<Person, DomainError> {
        sqlx::query_as::<_, Person>(
            "SELECT id, name, gender, height, mass, hair_color FROM people WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DomainError::not_found("Person", id))
    }

    async fn create_person(&self, request: CreatePersonRequest) -> Result<Person, DomainError> {
        let new_person = request.validate()?;
        let duplicate = format!("A person named {} already exists", new_person.name);

        let mut tx = self.pool.begin().await?;

        let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM people WHERE name = ?")
            .bind(&new_person.name)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(DomainError::Conflict(duplicate));
        }

        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO people (name, gender, height, mass, hair_color)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, gender, height, mass, hair_color
            "#,
        )
        .bind(&new_person.name)
        .bind(new_person.gender.map(|g| g.as_str()))
        .bind(new_person.height)
        .bind(new_person.mass)
        .bind(&new_person.hair_color)
        .fetch_one(&mut *tx)
        .await
        .map_err(conflict_on_unique(duplicate))?;

        tx.commit().await?;
        info!(person_id = person.id, "Created person");
        Ok(person)
    }

    async fn delete_person(&self, id: i64) -> Result<(), DomainError> {
        self.delete_by_id("people", "Person", id).await
    }
}

#[async_trait]
impl PlanetRepository for SqliteStore {
    async fn list_planets(&self) -> Result<Vec<Planet>, DomainError> {
        let planets = sqlx::query_as::<_, Planet>(
            r#"
            SELECT id, name, diameter, rotation_period, orbital_period, gravity
            FROM planets
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(planets)
    }

    async fn get_planet(&self, id: i64) -> Result<Planet, DomainError> {
        sqlx::query_as::<_, Planet>(
            r#"
            SELECT id, name, diameter, rotation_period, orbital_period, gravity
            FROM planets
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DomainError::not_found("Planet", id))
    }

    async fn create_planet(&self, request: CreatePlanetRequest) -> Result<Planet, DomainError> {
        let new_planet = request.validate()?;
        let duplicate = format!("A planet named {} already exists", new_planet.name);

        let mut tx = self.pool.begin().await?;

        let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM planets WHERE name = ?")
            .bind(&new_planet.name)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(DomainError::Conflict(duplicate));
        }

        let planet = sqlx::query_as::<_, Planet>(
            r#"
            INSERT INTO planets (name, diameter, rotation_period, orbital_period, gravity)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, diameter, rotation_period, orbital_period, gravity
            "#,
        )
        .bind(&new_planet.name)
        .bind(new_planet.diameter)
        .bind(new_planet.rotation_period)
        .bind(new_planet.orbital_period)
        .bind(&new_planet.gravity)
        .fetch_one(&mut *tx)
        .await
        .map_err(conflict_on_unique(duplicate))?;

        tx.commit().await?;
        info!(planet_id = planet.id, "Created planet");
        Ok(planet)
    }

    async fn delete_planet(&self, id: i64) -> Result<(), DomainError> {
        self.delete_by_id("planets", "Planet", id).await
    }
}

#[async_trait]
impl FavoriteRepository for SqliteStore {
    async fn add_favorite_person(
        &self,
        user_id: i64,
        people_id: i64,
    ) -> Result<FavoritePerson, DomainError> {
        self.add_favorite(&FAVORITE_PEOPLE, user_id, people_id).await
    }

    async fn list_favorite_people(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        self.list_favorites(&FAVORITE_PEOPLE, user_id).await
    }

    async fn remove_favorite_person(
        &self,
        user_id: i64,
        people_id: i64,
    ) -> Result<(), DomainError> {
        self.remove_favorite(&FAVORITE_PEOPLE, user_id, people_id)
            .await
    }

    async fn add_favorite_planet(
        &self,
        user_id: i64,
        planets_id: i64,
    ) -> Result<FavoritePlanet, DomainError> {
        self.add_favorite(&FAVORITE_PLANETS, user_id, planets_id)
            .await
    }

    async fn list_favorite_planets(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        self.list_favorites(&FAVORITE_PLANETS, user_id).await
    }

    async fn remove_favorite_planet(
        &self,
        user_id: i64,
        planets_id: i64,
    ) -> Result<(), DomainError> {
        self.remove_favorite(&FAVORITE_PLANETS, user_id, planets_id)
            .await
    }

    async fn favorites_for_user(&self, user_id: i64) -> Result<UserFavorites, DomainError> {
        self.get_user(user_id).await?;

        Ok(UserFavorites {
            people: self.list_favorites(&FAVORITE_PEOPLE, user_id).await?,
            planets: self.list_favorites(&FAVORITE_PLANETS, user_id).await?,
        })
    }
}
