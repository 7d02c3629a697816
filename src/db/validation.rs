//! Input validation for create requests.
//!
//! Validators return `Result<(), String>` with a human-readable message;
//! `ValidationErrors` collects them per field so a request reports every
//! problem at once.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{DomainError, FieldErrors};

lazy_static! {
    /// Loose email shape: something@something.tld, no whitespace
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Collects validation errors for several fields
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: FieldErrors,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record the outcome of a validator against `field`
    pub fn check(&mut self, field: &str, result: Result<(), String>) -> &mut Self {
        if let Err(message) = result {
            self.add(field, message);
        }
        self
    }

    /// Take a required text field, trimmed. Missing or blank values are
    /// recorded as errors and come back as an empty string.
    pub fn required_text(&mut self, field: &str, value: Option<String>) -> String {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.add(field, format!("{} is required", field));
                String::new()
            }
        }
    }

    pub fn finish(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.errors))
        }
    }
}

/// Trim an optional text field, treating blank as absent
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.chars().count() > 120 {
        return Err("email is too long (max 120 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("email must be a valid email address".to_string());
    }

    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.chars().count() > 120 {
        return Err("name is too long (max 120 characters)".to_string());
    }
    Ok(())
}

/// Short descriptive strings (hair color, gravity)
pub fn validate_short_text(field: &str, value: &Option<String>) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > 50 => Err(format!("{} is too long (max 50 characters)", field)),
        _ => Ok(()),
    }
}

pub fn validate_non_negative(field: &str, value: Option<i64>) -> Result<(), String> {
    match value {
        Some(v) if v < 0 => Err(format!("{} must not be negative", field)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("luke@tatooine.org").is_ok());
        assert!(validate_email("a.b+c@example.co.uk").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("luke").is_err());
        assert!(validate_email("luke@tatooine").is_err());
        assert!(validate_email("luke skywalker@tatooine.org").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(120))).is_err());
    }

    #[test]
    fn test_length_limits_count_characters() {
        // 120 two-byte characters fit, 121 do not
        assert!(validate_name(&"é".repeat(120)).is_ok());
        assert!(validate_name(&"é".repeat(121)).is_err());

        assert!(validate_short_text("hair_color", &Some("ü".repeat(50))).is_ok());
        assert!(validate_short_text("hair_color", &Some("ü".repeat(51))).is_err());
        assert!(validate_short_text("hair_color", &None).is_ok());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("height", None).is_ok());
        assert!(validate_non_negative("height", Some(0)).is_ok());
        assert!(validate_non_negative("height", Some(172)).is_ok());
        assert!(validate_non_negative("height", Some(-1)).is_err());
    }

    #[test]
    fn test_required_text() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.required_text("name", Some("  Leia ".to_string())), "Leia");
        assert!(errors.is_empty());

        assert_eq!(errors.required_text("name", Some("   ".to_string())), "");
        assert_eq!(errors.required_text("email", None), "");

        match errors.finish() {
            Err(DomainError::Validation(fields)) => {
                assert_eq!(fields["name"], vec!["name is required".to_string()]);
                assert_eq!(fields["email"], vec!["email is required".to_string()]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" blond ".to_string())), Some("blond".to_string()));
    }

    #[test]
    fn test_multiple_errors_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "first");
        errors.check("name", Err("second".to_string()));
        errors.check("name", Ok(()));

        match errors.finish() {
            Err(DomainError::Validation(fields)) => assert_eq!(fields["name"].len(), 2),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
