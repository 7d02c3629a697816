//! User models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::crypto::hash_password;
use crate::db::validation::{validate_email, ValidationErrors};
use crate::db::DomainError;

/// A stored user row. Not serializable: use [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
}

/// Public view of a user. The password hash is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
        }
    }
}

#[derive(Default, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// A validated user ready to insert, password already hashed. New users are
/// always active.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
}

impl CreateUserRequest {
    /// Check required fields, normalize the email and hash the password.
    pub fn validate(self) -> Result<NewUser, DomainError> {
        let mut errors = ValidationErrors::new();

        let email = errors.required_text("email", self.email).to_lowercase();
        if !email.is_empty() {
            errors.check("email", validate_email(&email));
        }

        // Passwords are not trimmed, only checked for content
        let password = match self.password {
            Some(p) if !p.trim().is_empty() => p,
            _ => {
                errors.add("password", "password is required");
                String::new()
            }
        };

        errors.finish()?;

        let password_hash =
            hash_password(&password).map_err(|e| DomainError::PasswordHash(e.to_string()))?;

        Ok(NewUser {
            email,
            password_hash,
            is_active: true,
        })
    }
}
