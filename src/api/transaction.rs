use axum::{
    extract::{ rejection::{ JsonRejection, QueryRejection }, Path, Query, State },
    http::StatusCode,
    Json,
};
use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::db::entity::transaction;
use crate::error::{ AppError, Result };
use crate::services::transaction_service::TransactionPayload;

use super::{ AppState, MessageResponse, OwnerQuery };

pub async fn create_transaction(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TransactionPayload>, JsonRejection>
) -> Result<(StatusCode, Json<TransactionResponse>)> {
    let Json(payload) = payload?;

    let transaction = state.transaction_service
        .create_transaction(payload).await
        .map_err(AppError::into_bad_request)?;

    Ok((StatusCode::CREATED, Json(transaction.into())))
}

pub async fn get_transactions(
    State(state): State<AppState>,
    params: std::result::Result<Query<OwnerQuery>, QueryRejection>
) -> Result<Json<Vec<TransactionResponse>>> {
    let Query(params) = params?;

    let transactions = state.transaction_service.get_user_transactions(
        params.require_user_id()?
    ).await?;

    let response: Vec<TransactionResponse> = transactions
        .into_iter()
        .map(|tx| tx.into())
        .collect();

    Ok(Json(response))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    payload: std::result::Result<Json<TransactionPayload>, JsonRejection>
) -> Result<Json<TransactionResponse>> {
    let Json(payload) = payload?;

    let transaction = state.transaction_service
        .update_transaction(&transaction_id, payload).await
        .map_err(AppError::into_bad_request)?;

    Ok(Json(transaction.into()))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>
) -> Result<Json<MessageResponse>> {
    state.transaction_service.delete_transaction(&transaction_id).await?;

    Ok(Json(MessageResponse::new("Transaction deleted")))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: f64,
    pub chain: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(tx: transaction::Model) -> Self {
        Self {
            id: tx.id,
            hash: tx.tx_hash,
            from: tx.from_address,
            to: tx.to_address,
            value: tx.value,
            chain: tx.chain,
            user_id: tx.user_id,
            created_at: tx.created_at,
        }
    }
}
