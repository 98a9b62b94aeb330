use sea_orm::{ entity::prelude::*, DatabaseConnection, QueryOrder };
use uuid::Uuid;

use crate::error::Result;

pub mod entity;
pub use entity::*;

mod transaction_repository;
pub use transaction_repository::TransactionRepository;

mod alert_repository;
pub use alert_repository::AlertRepository;

mod user_repository;
pub use user_repository::UserRepository;

pub struct WalletRepository {
    db: DatabaseConnection,
}

impl WalletRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, wallet: entity::wallet::ActiveModel) -> Result<entity::wallet::Model> {
        let wallet = wallet.insert(&self.db).await?;
        Ok(wallet)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::wallet::Model>> {
        let wallet = entity::wallet::Entity::find_by_id(id).one(&self.db).await?;
        Ok(wallet)
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<entity::wallet::Model>> {
        let wallets = entity::wallet::Entity
            ::find()
            .filter(entity::wallet::Column::UserId.eq(user_id))
            .order_by_asc(entity::wallet::Column::CreatedAt)
            .all(&self.db).await?;

        Ok(wallets)
    }

    pub async fn update(&self, wallet: entity::wallet::ActiveModel) -> Result<entity::wallet::Model> {
        let wallet = wallet.update(&self.db).await?;
        Ok(wallet)
    }

    /// Returns `false` when no wallet had the given id.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = entity::wallet::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
