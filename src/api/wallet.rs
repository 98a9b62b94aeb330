use axum::{
    extract::{ rejection::{ JsonRejection, QueryRejection }, Path, Query, State },
    http::StatusCode,
    Json,
};
use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::db::entity::wallet;
use crate::error::{ AppError, Result };
use crate::services::wallet_service::WalletPayload;

use super::{ AppState, MessageResponse, OwnerQuery };

pub async fn create_wallet(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WalletPayload>, JsonRejection>
) -> Result<(StatusCode, Json<WalletResponse>)> {
    let Json(payload) = payload?;

    let wallet = state.wallet_service
        .create_wallet(payload).await
        .map_err(AppError::into_bad_request)?;

    Ok((StatusCode::CREATED, Json(wallet.into())))
}

pub async fn get_wallets(
    State(state): State<AppState>,
    query: std::result::Result<Query<OwnerQuery>, QueryRejection>
) -> Result<Json<Vec<WalletResponse>>> {
    let Query(query) = query?;

    let wallets = state.wallet_service.list_user_wallets(query.require_user_id()?).await?;

    Ok(Json(wallets.into_iter().map(WalletResponse::from).collect()))
}

pub async fn update_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    payload: std::result::Result<Json<WalletPayload>, JsonRejection>
) -> Result<Json<WalletResponse>> {
    let Json(payload) = payload?;

    let wallet = state.wallet_service
        .update_wallet(&wallet_id, payload).await
        .map_err(AppError::into_bad_request)?;

    Ok(Json(wallet.into()))
}

pub async fn delete_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>
) -> Result<Json<MessageResponse>> {
    state.wallet_service.delete_wallet(&wallet_id).await?;

    Ok(Json(MessageResponse::new("Wallet deleted")))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub address: String,
    pub label: String,
    pub chain: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<wallet::Model> for WalletResponse {
    fn from(wallet: wallet::Model) -> Self {
        Self {
            id: wallet.id,
            address: wallet.address,
            label: wallet.label,
            chain: wallet.chain,
            user_id: wallet.user_id,
            created_at: wallet.created_at,
        }
    }
}
