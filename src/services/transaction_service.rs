use std::sync::Arc;
use chrono::Utc;
use sea_orm::{ ActiveModelTrait, ActiveValue };
use serde::Deserialize;
use uuid::Uuid;

use crate::db::TransactionRepository;
use crate::db::entity::transaction;
use crate::error::{ AppError, Result };

use super::validation::{ finite, optional, record_id, required, required_number };

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub hash: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<f64>,
    pub chain: Option<String>,
    pub user_id: Option<String>,
}

pub struct TransactionService {
    repository: Arc<TransactionRepository>,
}

impl TransactionService {
    pub fn new(repository: Arc<TransactionRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_transaction(
        &self,
        payload: TransactionPayload
    ) -> Result<transaction::Model> {
        let transaction_model = transaction::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            tx_hash: ActiveValue::Set(required(payload.hash, "hash")?),
            from_address: ActiveValue::Set(required(payload.from, "from")?),
            to_address: ActiveValue::Set(required(payload.to, "to")?),
            value: ActiveValue::Set(required_number(payload.value, "value")?),
            chain: ActiveValue::Set(required(payload.chain, "chain")?),
            user_id: ActiveValue::Set(required(payload.user_id, "userId")?),
            created_at: ActiveValue::Set(Utc::now()),
        };

        let transaction = self.repository.create(transaction_model).await?;
        tracing::info!(
            "Recorded transaction {} ({}) for user {}",
            transaction.id,
            transaction.tx_hash,
            transaction.user_id
        );

        Ok(transaction)
    }

    pub async fn get_user_transactions(&self, user_id: &str) -> Result<Vec<transaction::Model>> {
        self.repository.find_by_user(user_id).await
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        payload: TransactionPayload
    ) -> Result<transaction::Model> {
        let id = record_id(id, "Transaction")?;

        let transaction = self.repository
            .find_by_id(id).await?
            .ok_or(AppError::NotFound("Transaction"))?;

        let tx_hash = optional(payload.hash, "hash")?;
        let from_address = optional(payload.from, "from")?;
        let to_address = optional(payload.to, "to")?;
        let value = payload.value.map(|value| finite(value, "value")).transpose()?;
        let chain = optional(payload.chain, "chain")?;
        let user_id = optional(payload.user_id, "userId")?;

        let mut transaction_model: transaction::ActiveModel = transaction.clone().into();
        if let Some(tx_hash) = tx_hash {
            transaction_model.tx_hash = ActiveValue::Set(tx_hash);
        }
        if let Some(from_address) = from_address {
            transaction_model.from_address = ActiveValue::Set(from_address);
        }
        if let Some(to_address) = to_address {
            transaction_model.to_address = ActiveValue::Set(to_address);
        }
        if let Some(value) = value {
            transaction_model.value = ActiveValue::Set(value);
        }
        if let Some(chain) = chain {
            transaction_model.chain = ActiveValue::Set(chain);
        }
        if let Some(user_id) = user_id {
            transaction_model.user_id = ActiveValue::Set(user_id);
        }

        if !transaction_model.is_changed() {
            return Ok(transaction);
        }

        self.repository.update(transaction_model).await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<()> {
        let id = record_id(id, "Transaction")?;

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Transaction"));
        }

        tracing::info!("Deleted transaction {}", id);
        Ok(())
    }
}
