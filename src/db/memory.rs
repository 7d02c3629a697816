//! In-process store.
//!
//! Mirrors the SQLite schema rules: autoincrement ids that are never reused,
//! unique names/emails, unique (user, target) favorites and cascading deletes.
//! Every write happens under one write lock, so a failed check leaves no trace.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::info;

use super::error::DomainError;
use super::models::{
    CreatePersonRequest, CreatePlanetRequest, CreateUserRequest, FavoritePerson, FavoritePlanet,
    Person, Planet, User, UserFavorites,
};
use super::repository::{FavoriteRepository, PeopleRepository, PlanetRepository, UserRepository};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.rows.values().any(pred)
    }

    fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    fn retain(&mut self, keep: impl Fn(&T) -> bool) {
        self.rows.retain(|_, row| keep(row));
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    people: Table<Person>,
    planets: Table<Planet>,
    favorite_people: Table<FavoritePerson>,
    favorite_planets: Table<FavoritePlanet>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.tables.read().users.all())
    }

    async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.tables
            .read()
            .users
            .get(id)
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        // Hash outside the lock
        let new_user = request.validate()?;

        let mut tables = self.tables.write();
        if tables.users.any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict(format!(
                "A user with email {} already exists",
                new_user.email
            )));
        }

        let user = tables.users.insert_with(|id| User {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_active: new_user.is_active,
        });
        info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        let mut tables = self.tables.write();
        if tables.users.remove(id).is_none() {
            return Err(DomainError::not_found("User", id));
        }
        tables.favorite_people.retain(|f| f.users_id != id);
        tables.favorite_planets.retain(|f| f.users_id != id);
        info!(user_id = id, "Deleted user");
        Ok(())
    }
}

#[async_trait]
impl PeopleRepository for MemoryStore {
    async fn list_people(&self) -> Result<Vec<Person>, DomainError> {
        Ok(self.tables.read().people.all())
    }

    async fn get_person(&self, id: i64) -> Result<Person, DomainError> {
        self.tables
            .read()
            .people
            .get(id)
            .ok_or_else(|| DomainError::not_found("Person", id))
    }

    async fn create_person(&self, request: CreatePersonRequest) -> Result<Person, DomainError> {
        let new_person = request.validate()?;

        let mut tables = self.tables.write();
        if tables.people.any(|p| p.name == new_person.name) {
            return Err(DomainError::Conflict(format!(
                "A person named {} already exists",
                new_person.name
            )));
        }

        let person = tables.people.insert_with(|id| new_person.into_person(id));
        info!(person_id = person.id, "Created person");
        Ok(person)
    }

    async fn delete_person(&self, id: i64) -> Result<(), DomainError> {
        let mut tables = self.tables.write();
        if tables.people.remove(id).is_none() {
            return Err(DomainError::not_found("Person", id));
        }
        tables.favorite_people.retain(|f| f.people_id != id);
        info!(person_id = id, "Deleted person");
        Ok(())
    }
}

#[async_trait]
impl PlanetRepository for MemoryStore {
    async fn list_planets(&self) -> Result<Vec<Planet>, DomainError> {
        Ok(self.tables.read().planets.all())
    }

    async fn get_planet(&self, id: i64) -> Result<Planet, DomainError> {
        self.tables
            .read()
            .planets
            .get(id)
            .ok_or_else(|| DomainError::not_found("Planet", id))
    }

    async fn create_planet(&self, request: CreatePlanetRequest) -> Result<Planet, DomainError> {
        let new_planet = request.validate()?;

        let mut tables = self.tables.write();
        if tables.planets.any(|p| p.name == new_planet.name) {
            return Err(DomainError::Conflict(format!(
                "A planet named {} already exists",
                new_planet.name
            )));
        }

        let planet = tables.planets.insert_with(|id| new_planet.into_planet(id));
        info!(planet_id = planet.id, "Created planet");
        Ok(planet)
    }

    async fn delete_planet(&self, id: i64) -> Result<(), DomainError> {
        let mut tables = self.tables.write();
        if tables.planets.remove(id).is_none() {
            return Err(DomainError::not_found("Planet", id));
        }
        tables.favorite_planets.retain(|f| f.planets_id != id);
        info!(planet_id = id, "Deleted planet");
        Ok(())
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn add_favorite_person(
        &self,
        user_id: i64,
        people_id: i64,
    ) -> Result<FavoritePerson, DomainError> {
        let mut tables = self.tables.write();
        if !tables.users.contains(user_id) {
            return Err(DomainError::not_found("User", user_id));
        }
        if !tables.people.contains(people_id) {
            return Err(DomainError::not_found("Person", people_id));
        }
        if tables
            .favorite_people
            .any(|f| f.users_id == user_id && f.people_id == people_id)
        {
            return Err(DomainError::Conflict(format!(
                "Person {} is already a favorite of user {}",
                people_id, user_id
            )));
        }

        let row = tables.favorite_people.insert_with(|id| FavoritePerson {
            id,
            people_id,
            users_id: user_id,
        });
        info!(user_id, people_id, "Added favorite person");
        Ok(row)
    }

    async fn list_favorite_people(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self
            .tables
            .read()
            .favorite_people
            .all()
            .into_iter()
            .filter(|f| f.users_id == user_id)
            .map(|f| f.people_id)
            .collect())
    }

    async fn remove_favorite_person(
        &self,
        user_id: i64,
        people_id: i64,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write();
        let before = tables.favorite_people.rows.len();
        tables
            .favorite_people
            .retain(|f| !(f.users_id == user_id && f.people_id == people_id));

        if tables.favorite_people.rows.len() == before {
            return Err(DomainError::NotFound(format!(
                "Person {} is not a favorite of user {}",
                people_id, user_id
            )));
        }
        info!(user_id, people_id, "Removed favorite person");
        Ok(())
    }

    async fn add_favorite_planet(
        &self,
        user_id: i64,
        planets_id: i64,
    ) -> Result<FavoritePlanet, DomainError> {
        let mut tables = self.tables.write();
        if !tables.users.contains(user_id) {
            return Err(DomainError::not_found("User", user_id));
        }
        if !tables.planets.contains(planets_id) {
            return Err(DomainError::not_found("Planet", planets_id));
        }
        if tables
            .favorite_planets
            .any(|f| f.users_id == user_id && f.planets_id == planets_id)
        {
            return Err(DomainError::Conflict(format!(
                "Planet {} is already a favorite of user {}",
                planets_id, user_id
            )));
        }

        let row = tables.favorite_planets.insert_with(|id| FavoritePlanet {
            id,
            planets_id,
            users_id: user_id,
        });
        info!(user_id, planets_id, "Added favorite planet");
        Ok(row)
    }

    async fn list_favorite_planets(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self
            .tables
            .read()
            .favorite_planets
            .all()
            .into_iter()
            .filter(|f| f.users_id == user_id)
            .map(|f| f.planets_id)
            .collect())
    }

    async fn remove_favorite_planet(
        &self,
        user_id: i64,
        planets_id: i64,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write();
        let before = tables.favorite_planets.rows.len();
        tables
            .favorite_planets
            .retain(|f| !(f.users_id == user_id && f.planets_id == planets_id));

        if tables.favorite_planets.rows.len() == before {
            return Err(DomainError::NotFound(format!(
                "Planet {} is not a favorite of user {}",
                planets_id, user_id
            )));
        }
        info!(user_id, planets_id, "Removed favorite planet");
        Ok(())
    }

    async fn favorites_for_user(&self, user_id: i64) -> Result<UserFavorites, DomainError> {
        let tables = self.tables.read();
        if !tables.users.contains(user_id) {
            return Err(DomainError::not_found("User", user_id));
        }

        Ok(UserFavorites {
            people: tables
                .favorite_people
                .all()
                .into_iter()
                .filter(|f| f.users_id == user_id)
                .map(|f| f.people_id)
                .collect(),
            planets: tables
                .favorite_planets
                .all()
                .into_iter()
                .filter(|f| f.users_id == user_id)
                .map(|f| f.planets_id)
                .collect(),
        })
    }
}
