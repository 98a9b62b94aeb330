use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::error::{ AppError, Result };
use crate::db::entity::{ transaction, Transaction };

pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, transaction_model: transaction::ActiveModel) -> Result<transaction::Model> {
        let transaction = Transaction::insert(transaction_model)
            .exec_with_returning(&self.db).await
            .map_err(|e| AppError::Database(e))?;

        Ok(transaction)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<transaction::Model>> {
        Transaction::find_by_id(id)
            .one(&self.db).await
            .map_err(|e| AppError::Database(e))
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<transaction::Model>> {
        let transactions = Transaction::find()
            .filter(transaction::Column::UserId.eq(user_id))
            .order_by_asc(transaction::Column::CreatedAt)
            .all(&self.db).await
            .map_err(|e| AppError::Database(e))?;

        Ok(transactions)
    }

    pub async fn update(&self, transaction_model: transaction::ActiveModel) -> Result<transaction::Model> {
        let updated = transaction_model
            .update(&self.db).await
            .map_err(|e| AppError::Database(e))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = Transaction::delete_by_id(id)
            .exec(&self.db).await
            .map_err(|e| AppError::Database(e))?;

        Ok(result.rows_affected > 0)
    }
}
