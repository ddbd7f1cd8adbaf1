//! Password hashing and verification using Argon2id

use crate::{config::SecurityConfig, error::AppError};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Password policy
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl From<&SecurityConfig> for PasswordPolicy {
    fn from(config: &SecurityConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            require_uppercase: config.password_require_uppercase,
            require_digit: config.password_require_digit,
            require_special: config.password_require_special,
        }
    }
}

/// Password hasher with configurable parameters
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    policy: PasswordPolicy,
    // 与真实哈希同参数，用于未知账号的等价校验
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| AppError::Config(format!("Invalid Argon2 params: {}", e)))?;

        let mut hasher = Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            policy: PasswordPolicy::from(config),
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash("repairnow-unknown-account")?;

        Ok(hasher)
    }

    /// Hash a password
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Internal(format!("Failed to hash password: {}", e))
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::debug!("Failed to parse password hash: {:?}", e);
            AppError::Internal(format!("Failed to parse password hash: {}", e))
        })?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)
    }

    /// 对不存在的账号执行一次等成本校验，结果恒为 401
    pub fn reject_unknown(&self, password: &str) -> AppError {
        let _ = self.verify(password, &self.dummy_hash);
        AppError::Unauthorized
    }

    /// Validate password against policy
    pub fn validate_policy(&self, password: &str) -> Result<(), AppError> {
        let policy = &self.policy;

        if password.chars().count() < policy.min_length {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                policy.min_length
            )));
        }

        if policy.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one uppercase letter".to_string(),
            ));
        }

        if policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one digit".to_string(),
            ));
        }

        if policy.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one special character".to_string(),
            ));
        }

        Ok(())
    }
}
