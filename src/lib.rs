pub mod config;
pub mod enums;
pub mod error;
pub mod auth;
pub mod db;
pub mod services;
pub mod api;

pub use config::Config;
pub use enums::AlertCondition;
pub use error::{ AppError, Result };
