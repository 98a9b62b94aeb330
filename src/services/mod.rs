pub mod validation;
pub mod wallet_service;
pub mod transaction_service;
pub mod alert_service;
pub mod auth_service;

pub use wallet_service::WalletService;
pub use transaction_service::TransactionService;
pub use alert_service::AlertService;
pub use auth_service::AuthService;
