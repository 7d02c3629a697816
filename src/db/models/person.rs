//! People models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::validation::{
    optional_text, validate_name, validate_non_negative, validate_short_text, ValidationErrors,
};
use crate::db::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Female" => Some(Gender::Female),
            "Male" => Some(Gender::Male),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A person row; also its public JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    /// Stored as text, always one of [`Gender::as_str`]
    pub gender: Option<String>,
    pub height: Option<i64>,
    pub mass: Option<i64>,
    pub hair_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePersonRequest {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub height: Option<i64>,
    pub mass: Option<i64>,
    pub hair_color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub gender: Option<Gender>,
    pub height: Option<i64>,
    pub mass: Option<i64>,
    pub hair_color: Option<String>,
}

impl NewPerson {
    pub fn into_person(self, id: i64) -> Person {
        Person {
            id,
            name: self.name,
            gender: self.gender.map(|g| g.as_str().to_string()),
            height: self.height,
            mass: self.mass,
            hair_color: self.hair_color,
        }
    }
}

impl CreatePersonRequest {
    pub fn validate(self) -> Result<NewPerson, DomainError> {
        let mut errors = ValidationErrors::new();

        let name = errors.required_text("name", self.name);
        errors.check("name", validate_name(&name));

        let gender = match optional_text(self.gender) {
            Some(g) => match Gender::from_str(&g) {
                Some(gender) => Some(gender),
                None => {
                    errors.add("gender", "gender must be one of: Female, Male");
                    None
                }
            },
            None => None,
        };

        errors.check("height", validate_non_negative("height", self.height));
        errors.check("mass", validate_non_negative("mass", self.mass));

        let hair_color = optional_text(self.hair_color);
        errors.check("hair_color", validate_short_text("hair_color", &hair_color));

        errors.finish()?;

        Ok(NewPerson {
            name,
            gender,
            height: self.height,
            mass: self.mass,
            hair_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_roundtrip() {
        assert_eq!(Gender::from_str("Female"), Some(Gender::Female));
        assert_eq!(Gender::from_str("Male"), Some(Gender::Male));
        assert_eq!(Gender::from_str("male"), None);
        assert_eq!(Gender::Female.to_string(), "Female");
    }

    #[test]
    fn test_validate_person() {
        let person = CreatePersonRequest {
            name: Some(" Luke Skywalker ".to_string()),
            gender: Some("Male".to_string()),
            height: Some(172),
            mass: Some(77),
            hair_color: Some("blond".to_string()),
        }
        .validate()
        .unwrap()
        .into_person(1);

        assert_eq!(person.name, "Luke Skywalker");
        assert_eq!(person.gender.as_deref(), Some("Male"));
        assert_eq!(person.height, Some(172));
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let result = CreatePersonRequest {
            name: None,
            gender: Some("Droid".to_string()),
            height: Some(-3),
            mass: None,
            hair_color: None,
        }
        .validate();

        match result {
            Err(DomainError::Validation(errors)) => {
                assert!(errors.contains_key("name"));
                assert!(errors.contains_key("gender"));
                assert!(errors.contains_key("height"));
                assert!(!errors.contains_key("mass"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_fields() {
        let person = CreatePersonRequest {
            name: Some("R2-D2".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap()
        .into_person(3);

        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "R2-D2",
                "gender": null,
                "height": null,
                "mass": null,
                "hair_color": null
            })
        );
    }
}
