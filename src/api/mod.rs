use std::sync::Arc;

use axum::{ middleware, routing::{ get, post, put }, Router };
use sea_orm::DatabaseConnection;
use serde::{ Deserialize, Serialize };
use tower_http::{ cors::CorsLayer, trace::TraceLayer };

pub mod wallet;
pub mod transaction;
pub mod alert;
pub mod auth;

#[cfg(test)]
mod tests;

use crate::auth::{ require_auth, TokenService };
use crate::db::{ AlertRepository, TransactionRepository, UserRepository, WalletRepository };
use crate::services::{ AlertService, AuthService, TransactionService, WalletService };

#[derive(Clone)]
pub struct AppState {
    pub wallet_service: Arc<WalletService>,
    pub transaction_service: Arc<TransactionService>,
    pub alert_service: Arc<AlertService>,
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        wallet_service: Arc<WalletService>,
        transaction_service: Arc<TransactionService>,
        alert_service: Arc<AlertService>,
        auth_service: Arc<AuthService>,
        token_service: Arc<TokenService>
    ) -> Self {
        Self {
            wallet_service,
            transaction_service,
            alert_service,
            auth_service,
            token_service,
        }
    }

    /// Wire repositories and services over one connection pool.
    pub fn from_connection(db: DatabaseConnection, token_service: Arc<TokenService>) -> Self {
        let wallet_repository = Arc::new(WalletRepository::new(db.clone()));
        let transaction_repository = Arc::new(TransactionRepository::new(db.clone()));
        let alert_repository = Arc::new(AlertRepository::new(db.clone()));
        let user_repository = Arc::new(UserRepository::new(db));

        Self::new(
            Arc::new(WalletService::new(wallet_repository)),
            Arc::new(TransactionService::new(transaction_repository)),
            Arc::new(AlertService::new(alert_repository)),
            Arc::new(AuthService::new(user_repository, token_service.clone())),
            token_service
        )
    }
}

/// Owner filter for list endpoints (`?userId=`).
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl OwnerQuery {
    pub fn require_user_id(&self) -> crate::Result<&str> {
        self.user_id
            .as_deref()
            .filter(|user_id| !user_id.trim().is_empty())
            .ok_or_else(|| crate::AppError::InvalidInput("userId is required".to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Build the full HTTP surface.
///
/// With `gate_resources` set, the wallet/transaction/alert routes require a
/// bearer token as well; the profile route always does.
pub fn router(state: AppState, gate_resources: bool) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.token_service.clone(), require_auth);

    let resources = Router::new()
        .route("/api/wallets", post(wallet::create_wallet).get(wallet::get_wallets))
        .route("/api/wallets/{id}", put(wallet::update_wallet).delete(wallet::delete_wallet))
        .route(
            "/api/transactions",
            post(transaction::create_transaction).get(transaction::get_transactions)
        )
        .route(
            "/api/transactions/{id}",
            put(transaction::update_transaction).delete(transaction::delete_transaction)
        )
        .route("/api/alerts", post(alert::create_alert).get(alert::get_alerts))
        .route("/api/alerts/{id}", put(alert::update_alert).delete(alert::delete_alert));

    let resources = if gate_resources {
        resources.route_layer(auth_layer.clone())
    } else {
        resources
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/profile", get(auth::profile).route_layer(auth_layer))
        .merge(resources)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn root() -> &'static str {
    "Web 3 Terminal Backend is running"
}

async fn health_check() -> &'static str {
    "OK"
}
