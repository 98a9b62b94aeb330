use std::sync::Arc;
use chrono::Utc;
use sea_orm::{ ActiveModelTrait, ActiveValue };
use serde::Deserialize;
use uuid::Uuid;

use crate::db::AlertRepository;
use crate::db::entity::alert;
use crate::enums::AlertCondition;
use crate::error::{ AppError, Result };

use super::validation::{ finite, optional, record_id, required, required_number };

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPayload {
    pub symbol: Option<String>,
    pub target_price: Option<f64>,
    pub condition: Option<String>,
    pub user_id: Option<String>,
}

/// Stored price-alert configuration. Alerts are never evaluated here.
pub struct AlertService {
    repository: Arc<AlertRepository>,
}

impl AlertService {
    pub fn new(repository: Arc<AlertRepository>) -> Self {
        Self { repository }
    }

    /// Create a new price alert
    pub async fn create_alert(&self, payload: AlertPayload) -> Result<alert::Model> {
        let condition: AlertCondition = required(payload.condition, "condition")?.parse()?;

        let alert = alert::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            symbol: ActiveValue::Set(required(payload.symbol, "symbol")?),
            target_price: ActiveValue::Set(required_number(payload.target_price, "targetPrice")?),
            condition: ActiveValue::Set(condition.to_string()),
            user_id: ActiveValue::Set(required(payload.user_id, "userId")?),
            created_at: ActiveValue::Set(Utc::now()),
        };

        let alert = self.repository.create(alert).await?;
        tracing::info!(
            "Created alert {}: {} {} {}",
            alert.id,
            alert.symbol,
            alert.condition,
            alert.target_price
        );

        Ok(alert)
    }

    /// List all alerts for a user
    pub async fn list_user_alerts(&self, user_id: &str) -> Result<Vec<alert::Model>> {
        self.repository.find_by_user(user_id).await
    }

    pub async fn update_alert(&self, id: &str, payload: AlertPayload) -> Result<alert::Model> {
        let id = record_id(id, "Alert")?;

        let alert = self.repository.find_by_id(id).await?.ok_or(AppError::NotFound("Alert"))?;

        let symbol = optional(payload.symbol, "symbol")?;
        let target_price = payload.target_price
            .map(|price| finite(price, "targetPrice"))
            .transpose()?;
        let condition = optional(payload.condition, "condition")?
            .map(|condition| condition.parse::<AlertCondition>())
            .transpose()?;
        let user_id = optional(payload.user_id, "userId")?;

        let mut active: alert::ActiveModel = alert.clone().into();
        if let Some(symbol) = symbol {
            active.symbol = ActiveValue::Set(symbol);
        }
        if let Some(target_price) = target_price {
            active.target_price = ActiveValue::Set(target_price);
        }
        if let Some(condition) = condition {
            active.condition = ActiveValue::Set(condition.to_string());
        }
        if let Some(user_id) = user_id {
            active.user_id = ActiveValue::Set(user_id);
        }

        if !active.is_changed() {
            return Ok(alert);
        }

        self.repository.update(active).await
    }

    /// Delete an alert
    pub async fn delete_alert(&self, id: &str) -> Result<()> {
        let id = record_id(id, "Alert")?;

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Alert"));
        }

        tracing::info!("Deleted alert {}", id);
        Ok(())
    }
}
