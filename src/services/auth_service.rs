use std::sync::Arc;
use serde::Deserialize;

use crate::auth::{ hash_password, verify_password, TokenPair, TokenService };
use crate::db::UserRepository;
use crate::db::entity::user;
use crate::error::{ AppError, Result };

use super::validation::{ email, required };

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct AuthService {
    users: Arc<UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new account. Emails are compared case-insensitively.
    pub async fn register(&self, request: RegisterRequest) -> Result<user::Model> {
        let name = required(request.name, "name")?;
        let email_address = required(request.email, "email")?.trim().to_lowercase();
        email(&email_address)?;
        let password = request.password
            .filter(|password| !password.is_empty())
            .ok_or_else(|| AppError::InvalidInput("password is required".to_string()))?;

        if self.users.find_by_email(&email_address).await?.is_some() {
            tracing::warn!("[REGISTER] Email already registered: {}", email_address);
            return Err(AppError::UserExists);
        }

        let password_hash = hash_password(&password)?;
        let user = self.users.create(name, email_address, password_hash).await?;

        tracing::info!("[REGISTER] Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Verify credentials and issue the access/refresh token pair.
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenPair> {
        let email_address = required(request.email, "email")?.trim().to_lowercase();
        let password = request.password.unwrap_or_default();

        let Some(user) = self.users.find_by_email(&email_address).await? else {
            tracing::warn!("[LOGIN] Unknown email: {}", email_address);
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(&password, &user.password_hash)? {
            tracing::warn!("[LOGIN] Wrong password for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let tokens = self.tokens.issue_pair(&user.id.to_string(), &user.email)?;

        tracing::info!("[LOGIN] User {} logged in", user.id);
        Ok(tokens)
    }
}
