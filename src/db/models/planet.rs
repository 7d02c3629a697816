//! Planet models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::validation::{
    optional_text, validate_name, validate_non_negative, validate_short_text, ValidationErrors,
};
use crate::db::DomainError;

/// A planet row; also its public JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub diameter: Option<i64>,
    pub rotation_period: Option<i64>,
    pub orbital_period: Option<i64>,
    pub gravity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePlanetRequest {
    pub name: Option<String>,
    pub diameter: Option<i64>,
    pub rotation_period: Option<i64>,
    pub orbital_period: Option<i64>,
    pub gravity: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPlanet {
    pub name: String,
    pub diameter: Option<i64>,
    pub rotation_period: Option<i64>,
    pub orbital_period: Option<i64>,
    pub gravity: Option<String>,
}

impl NewPlanet {
    pub fn into_planet(self, id: i64) -> Planet {
        Planet {
            id,
            name: self.name,
            diameter: self.diameter,
            rotation_period: self.rotation_period,
            orbital_period: self.orbital_period,
            gravity: self.gravity,
        }
    }
}

impl CreatePlanetRequest {
    pub fn validate(self) -> Result<NewPlanet, DomainError> {
        let mut errors = ValidationErrors::new();

        let name = errors.required_text("name", self.name);
        errors.check("name", validate_name(&name));

        errors.check("diameter", validate_non_negative("diameter", self.diameter));
        errors.check(
            "rotation_period",
            validate_non_negative("rotation_period", self.rotation_period),
        );
        errors.check(
            "orbital_period",
            validate_non_negative("orbital_period", self.orbital_period),
        );

        let gravity = optional_text(self.gravity);
        errors.check("gravity", validate_short_text("gravity", &gravity));

        errors.finish()?;

        Ok(NewPlanet {
            name,
            diameter: self.diameter,
            rotation_period: self.rotation_period,
            orbital_period: self.orbital_period,
            gravity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tatooine_serializes_with_nulls() {
        let planet = CreatePlanetRequest {
            name: Some("Tatooine".to_string()),
            diameter: Some(10465),
            ..Default::default()
        }
        .validate()
        .unwrap()
        .into_planet(1);

        let json = serde_json::to_value(&planet).unwrap();
        assert_eq!(
            json,
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

    #[test]
    fn test_serialization_is_deterministic() {
        let make = || Planet {
            id: 2,
            name: "Hoth".to_string(),
            diameter: Some(7200),
            rotation_period: Some(23),
            orbital_period: Some(549),
            gravity: Some("1.1 standard".to_string()),
        };

        assert_eq!(
            serde_json::to_string(&make()).unwrap(),
            serde_json::to_string(&make()).unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_negative_periods() {
        let result = CreatePlanetRequest {
            name: Some("Dagobah".to_string()),
            orbital_period: Some(-341),
            ..Default::default()
        }
        .validate();

        match result {
            Err(DomainError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.contains_key("orbital_period"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_requires_name() {
        assert!(matches!(
            CreatePlanetRequest::default().validate(),
            Err(DomainError::Validation(_))
        ));
    }
}
