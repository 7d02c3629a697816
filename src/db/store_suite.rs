//! Behaviour every `Store` implementation must share. Each store's test
//! module runs these against a fresh instance.

use super::models::{CreatePersonRequest, CreatePlanetRequest, CreateUserRequest};
use super::{DomainError, Store};
use crate::crypto::verify_password;

pub fn user_request(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: Some(email.to_string()),
        password: Some("these aren't the droids".to_string()),
    }
}

pub fn planet_request(name: &str) -> CreatePlanetRequest {
    CreatePlanetRequest {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn person_request(name: &str) -> CreatePersonRequest {
    CreatePersonRequest {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub async fn user_roundtrip(store: &dyn Store) {
    let created = store.create_user(user_request("luke@tatooine.org")).await.unwrap();
    assert_eq!(created.id, 1);
    assert!(created.is_active);

    let fetched = store.get_user(created.id).await.unwrap();
    assert_eq!(fetched.email, "luke@tatooine.org");

    let second = store.create_user(user_request("leia@alderaan.org")).await.unwrap();
    assert_eq!(second.id, 2);

    let emails: Vec<String> = store
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.email)
        .collect();
    assert_eq!(emails, vec!["luke@tatooine.org", "leia@alderaan.org"]);
}

pub async fn password_is_stored_hashed(store: &dyn Store) {
    let user = store.create_user(user_request("han@falcon.io")).await.unwrap();
    assert_ne!(user.password_hash, "these aren't the droids");
    assert!(verify_password("these aren't the droids", &user.password_hash));
}

pub async fn duplicate_email_conflicts(store: &dyn Store) {
    store.create_user(user_request("luke@tatooine.org")).await.unwrap();

    // Emails are compared after normalization
    let err = store
        .create_user(user_request("LUKE@tatooine.org"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

    assert_eq!(store.list_users().await.unwrap().len(), 1);
}

pub async fn planet_scenario(store: &dyn Store) {
    let planet = store
        .create_planet(CreatePlanetRequest {
            name: Some("Tatooine".to_string()),
            diameter: Some(10465),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(planet.id, 1);

    let fetched = store.get_planet(1).await.unwrap();
    assert_eq!(
        serde_json::to_value(&fetched).unwrap(),
        serde_json::json!({
            "id": 1,
            "name": "Tatooine",
            "diameter": 10465,
            "rotation_period": null,
            "orbital_period": null,
            "gravity": null
        })
    );
}

pub async fn duplicate_names_conflict(store: &dyn Store) {
    store.create_planet(planet_request("Hoth")).await.unwrap();
    let err = store.create_planet(planet_request("Hoth")).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);
    assert_eq!(store.list_planets().await.unwrap().len(), 1);

    store.create_person(person_request("Yoda")).await.unwrap();
    let err = store.create_person(person_request("Yoda")).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);
    assert_eq!(store.list_people().await.unwrap().len(), 1);
}

pub async fn missing_rows(store: &dyn Store) {
    assert!(matches!(store.get_user(42).await, Err(DomainError::NotFound(_))));
    assert!(matches!(store.get_person(42).await, Err(DomainError::NotFound(_))));
    assert!(matches!(store.get_planet(42).await, Err(DomainError::NotFound(_))));

    assert!(matches!(store.delete_user(42).await, Err(DomainError::NotFound(_))));
    assert!(matches!(store.delete_person(42).await, Err(DomainError::NotFound(_))));
    assert!(matches!(store.delete_planet(42).await, Err(DomainError::NotFound(_))));

    assert!(store.list_users().await.unwrap().is_empty());
    assert!(store.list_favorite_planets(42).await.unwrap().is_empty());
    assert!(matches!(
        store.favorites_for_user(42).await,
        Err(DomainError::NotFound(_))
    ));
}

pub async fn favorite_requires_existing_rows(store: &dyn Store) {
    let user = store.create_user(user_request("luke@tatooine.org")).await.unwrap();
    let planet = store.create_planet(planet_request("Tatooine")).await.unwrap();

    let err = store.add_favorite_planet(99, planet.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "got {:?}", err);

    let err = store.add_favorite_planet(user.id, 99).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "got {:?}", err);

    let err = store.add_favorite_person(user.id, 99).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "got {:?}", err);

    let yoda = store.create_person(person_request("Yoda")).await.unwrap();
    let err = store.add_favorite_person(99, yoda.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "got {:?}", err);

    assert!(store.list_favorite_planets(user.id).await.unwrap().is_empty());
    assert!(store.list_favorite_people(user.id).await.unwrap().is_empty());
}

pub async fn favorite_lifecycle(store: &dyn Store) {
    let user = store.create_user(user_request("luke@tatooine.org")).await.unwrap();
    let tatooine = store.create_planet(planet_request("Tatooine")).await.unwrap();
    let dagobah = store.create_planet(planet_request("Dagobah")).await.unwrap();
    let yoda = store.create_person(person_request("Yoda")).await.unwrap();

    let row = store.add_favorite_planet(user.id, tatooine.id).await.unwrap();
    assert_eq!(row.users_id, user.id);
    assert_eq!(row.planets_id, tatooine.id);
    store.add_favorite_planet(user.id, dagobah.id).await.unwrap();

    let person_row = store.add_favorite_person(user.id, yoda.id).await.unwrap();
    assert_eq!(person_row.people_id, yoda.id);

    let err = store.add_favorite_person(user.id, yoda.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);
    assert_eq!(store.list_favorite_people(user.id).await.unwrap(), vec![yoda.id]);

    // Re-adding the same pair is rejected and does not duplicate the row
    let err = store
        .add_favorite_planet(user.id, tatooine.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

    assert_eq!(
        store.list_favorite_planets(user.id).await.unwrap(),
        vec![tatooine.id, dagobah.id]
    );

    let favorites = store.favorites_for_user(user.id).await.unwrap();
    assert_eq!(favorites.planets, vec![tatooine.id, dagobah.id]);
    assert_eq!(favorites.people, vec![yoda.id]);

    store
        .remove_favorite_planet(user.id, tatooine.id)
        .await
        .unwrap();
    assert_eq!(
        store.list_favorite_planets(user.id).await.unwrap(),
        vec![dagobah.id]
    );

    let err = store
        .remove_favorite_planet(user.id, tatooine.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "got {:?}", err);

    store.remove_favorite_person(user.id, yoda.id).await.unwrap();
    assert!(store.list_favorite_people(user.id).await.unwrap().is_empty());

    let err = store
        .remove_favorite_person(user.id, yoda.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "got {:?}", err);

    // Removing a favorite leaves the target itself alone
    assert!(store.get_planet(tatooine.id).await.is_ok());
}

pub async fn delete_cascades_favorites(store: &dyn Store) {
    let luke = store.create_user(user_request("luke@tatooine.org")).await.unwrap();
    let leia = store.create_user(user_request("leia@alderaan.org")).await.unwrap();
    let hoth = store.create_planet(planet_request("Hoth")).await.unwrap();
    let yoda = store.create_person(person_request("Yoda")).await.unwrap();

    store.add_favorite_planet(luke.id, hoth.id).await.unwrap();
    store.add_favorite_planet(leia.id, hoth.id).await.unwrap();
    store.add_favorite_person(luke.id, yoda.id).await.unwrap();

    store.delete_user(luke.id).await.unwrap();
    assert!(store.list_favorite_planets(luke.id).await.unwrap().is_empty());
    assert!(store.list_favorite_people(luke.id).await.unwrap().is_empty());
    assert_eq!(
        store.list_favorite_planets(leia.id).await.unwrap(),
        vec![hoth.id]
    );

    store.delete_planet(hoth.id).await.unwrap();
    assert!(store.list_favorite_planets(leia.id).await.unwrap().is_empty());

    // Ids are never reused after a delete
    let next = store.create_planet(planet_request("Bespin")).await.unwrap();
    assert!(next.id > hoth.id);
}
