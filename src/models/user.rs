//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use validator::Validate;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Technician,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "client",
            UserRole::Technician => "technician",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(UserRole::Client),
            "technician" => Ok(UserRole::Technician),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Unknown user role: {}", other)),
        }
    }
}

/// User row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Unknown role strings degrade to the least privileged role
    pub fn role(&self) -> UserRole {
        self.role.parse().unwrap_or(UserRole::Client)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insert model
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
}

/// Partial update model; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<UserRole>,
}

/// Sign-up request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    /// Defaults to `client`; `admin` is rejected
    pub role: Option<UserRole>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Update user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    /// Only admins may change roles
    pub role: Option<UserRole>,
}

/// User resource (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResource {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Embedded user reference
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
}

/// Login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: UserResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in [UserRole::Client, UserRole::Technician, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_unknown_stored_role_is_client() {
        let now = Utc::now();
        let user = User {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Quispe".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "x".to_string(),
            phone: None,
            address: None,
            role: "root".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(user.role(), UserRole::Client);
        assert_eq!(user.full_name(), "Ana Quispe");
    }

    #[test]
    fn test_sign_up_validation() {
        let req = SignUpRequest {
            first_name: "".to_string(),
            last_name: "Quispe".to_string(),
            email: "not-an-email".to_string(),
            password: "Password1".to_string(),
            phone: None,
            address: None,
            role: None,
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_blank_names_rejected() {
        let req = UpdateUserRequest {
            first_name: Some("   ".to_string()),
            last_name: Some("Quispe".to_string()),
            email: None,
            phone: None,
            address: None,
            role: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
        assert!(!errors.field_errors().contains_key("last_name"));
    }
}
