use std::sync::Arc;
use chrono::Utc;
use sea_orm::{ ActiveModelTrait, ActiveValue };
use serde::Deserialize;
use uuid::Uuid;

use crate::db::WalletRepository;
use crate::db::entity::wallet;
use crate::error::{ AppError, Result };

use super::validation::{ optional, record_id, required };

/// Wallet fields as sent by the client. Every field is optional here;
/// `create` enforces presence, `update` applies whatever was sent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPayload {
    pub address: Option<String>,
    pub label: Option<String>,
    pub chain: Option<String>,
    pub user_id: Option<String>,
}

pub struct WalletService {
    repository: Arc<WalletRepository>,
}

impl WalletService {
    pub fn new(repository: Arc<WalletRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_wallet(&self, payload: WalletPayload) -> Result<wallet::Model> {
        let wallet = wallet::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            address: ActiveValue::Set(required(payload.address, "address")?),
            label: ActiveValue::Set(required(payload.label, "label")?),
            chain: ActiveValue::Set(required(payload.chain, "chain")?),
            user_id: ActiveValue::Set(required(payload.user_id, "userId")?),
            created_at: ActiveValue::Set(Utc::now()),
        };

        let wallet = self.repository.create(wallet).await?;
        tracing::info!("Created wallet {} for user {}", wallet.id, wallet.user_id);

        Ok(wallet)
    }

    pub async fn list_user_wallets(&self, user_id: &str) -> Result<Vec<wallet::Model>> {
        self.repository.find_by_user(user_id).await
    }

    pub async fn update_wallet(&self, id: &str, payload: WalletPayload) -> Result<wallet::Model> {
        let id = record_id(id, "Wallet")?;

        let wallet = self.repository.find_by_id(id).await?.ok_or(AppError::NotFound("Wallet"))?;

        let address = optional(payload.address, "address")?;
        let label = optional(payload.label, "label")?;
        let chain = optional(payload.chain, "chain")?;
        let user_id = optional(payload.user_id, "userId")?;

        let mut active: wallet::ActiveModel = wallet.clone().into();
        if let Some(address) = address {
            active.address = ActiveValue::Set(address);
        }
        if let Some(label) = label {
            active.label = ActiveValue::Set(label);
        }
        if let Some(chain) = chain {
            active.chain = ActiveValue::Set(chain);
        }
        if let Some(user_id) = user_id {
            active.user_id = ActiveValue::Set(user_id);
        }

        if !active.is_changed() {
            return Ok(wallet);
        }

        self.repository.update(active).await
    }

    pub async fn delete_wallet(&self, id: &str) -> Result<()> {
        let id = record_id(id, "Wallet")?;

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Wallet"));
        }

        tracing::info!("Deleted wallet {}", id);
        Ok(())
    }
}
