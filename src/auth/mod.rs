//! Password hashing, signed session tokens, and the bearer-token gate.

pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::require_auth;
pub use password::{ hash_password, verify_password };
pub use token::{ Claims, TokenPair, TokenService };
