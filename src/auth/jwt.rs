//! JWT token generation and validation
//! Implements access token + refresh token pattern

use crate::{
    config::SecurityConfig,
    error::AppError,
    models::user::{User, UserRole},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    pub role: String,

    /// Token type (access or refresh)
    pub token_type: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl Claims {
    /// Numeric user id carried in `sub`
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

/// Token pair response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// seconds until access token expires
    pub expires_in: u64,
}

/// Token service
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_exp_secs: u64,
    refresh_token_exp_secs: u64,
}

impl TokenService {
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        let secret = config.jwt_secret.expose_secret();

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_exp_secs: config.access_token_exp_secs,
            refresh_token_exp_secs: config.refresh_token_exp_secs,
        })
    }

    pub fn access_token_exp_secs(&self) -> u64 {
        self.access_token_exp_secs
    }

    fn issue(
        &self,
        user_id: i64,
        email: &str,
        role: UserRole,
        token_type: &str,
        lifetime_secs: u64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(lifetime_secs as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode {} token: {:?}", token_type, e);
            AppError::Internal(format!("Failed to encode {} token: {}", token_type, e))
        })
    }

    pub fn generate_access_token(
        &self,
        user_id: i64,
        email: &str,
        role: UserRole,
    ) -> Result<String, AppError> {
        self.issue(user_id, email, role, ACCESS_TOKEN, self.access_token_exp_secs)
    }

    pub fn generate_refresh_token(
        &self,
        user_id: i64,
        email: &str,
        role: UserRole,
    ) -> Result<String, AppError> {
        self.issue(user_id, email, role, REFRESH_TOKEN, self.refresh_token_exp_secs)
    }

    /// Generate token pair for a user
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let role = user.role();

        Ok(TokenPair {
            access_token: self.generate_access_token(user.id, &user.email, role)?,
            refresh_token: self.generate_refresh_token(user.id, &user.email, role)?,
            expires_in: self.access_token_exp_secs,
        })
    }

    /// Validate signature and expiry
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?
            .claims)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.validate_typed(token, ACCESS_TOKEN)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.validate_typed(token, REFRESH_TOKEN)
    }

    fn validate_typed(&self, token: &str, expected: &str) -> Result<Claims, AppError> {
        let claims = self.validate_token(token)?;

        if claims.token_type != expected {
            tracing::debug!(
                "Token type mismatch: expected '{}', got '{}'",
                expected,
                claims.token_type
            );
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }
}
