//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, TokenPair, TokenService};
pub use middleware::{extract_token, jwt_middleware, AuthContext};
pub use password::PasswordHasher;
