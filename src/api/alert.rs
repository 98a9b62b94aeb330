use axum::{
    extract::{ rejection::{ JsonRejection, QueryRejection }, Path, Query, State },
    http::StatusCode,
    Json,
};
use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::db::entity::alert;
use crate::error::{ AppError, Result };
use crate::services::alert_service::AlertPayload;

use super::{ AppState, MessageResponse, OwnerQuery };

pub async fn create_alert(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AlertPayload>, JsonRejection>
) -> Result<(StatusCode, Json<AlertResponse>)> {
    let Json(payload) = payload?;

    let alert = state.alert_service
        .create_alert(payload).await
        .map_err(AppError::into_bad_request)?;

    Ok((StatusCode::CREATED, Json(alert.into())))
}

pub async fn get_alerts(
    State(state): State<AppState>,
    query: std::result::Result<Query<OwnerQuery>, QueryRejection>
) -> Result<Json<Vec<AlertResponse>>> {
    let Query(query) = query?;

    let alerts = state.alert_service.list_user_alerts(query.require_user_id()?).await?;

    Ok(Json(alerts.into_iter().map(AlertResponse::from).collect()))
}

pub async fn update_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
    payload: std::result::Result<Json<AlertPayload>, JsonRejection>
) -> Result<Json<AlertResponse>> {
    let Json(payload) = payload?;

    let alert = state.alert_service
        .update_alert(&alert_id, payload).await
        .map_err(AppError::into_bad_request)?;

    Ok(Json(alert.into()))
}

pub async fn delete_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>
) -> Result<Json<MessageResponse>> {
    state.alert_service.delete_alert(&alert_id).await?;

    Ok(Json(MessageResponse::new("Alert deleted")))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub symbol: String,
    pub target_price: f64,
    pub condition: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<alert::Model> for AlertResponse {
    fn from(alert: alert::Model) -> Self {
        Self {
            id: alert.id,
            symbol: alert.symbol,
            target_price: alert.target_price,
            condition: alert.condition,
            user_id: alert.user_id,
            created_at: alert.created_at,
        }
    }
}
