use axum::{
    extract::{ rejection::JsonRejection, Extension, State },
    http::StatusCode,
    Json,
};
use serde::{ Deserialize, Serialize };

use crate::auth::Claims;
use crate::error::Result;
use crate::services::auth_service::{ LoginRequest, RegisterRequest };

use super::{ AppState, MessageResponse };

pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(request) = payload?;

    state.auth_service.register(request).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("User registered successfully"))))
}

/// `token` is the short-lived access token, `token1` the long-lived one.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload?;

    let tokens = state.auth_service.login(request).await?;

    Ok(
        Json(LoginResponse {
            message: "Login successful!".to_string(),
            token: tokens.access,
            token1: tokens.refresh,
        })
    )
}

pub async fn profile(Extension(claims): Extension<Claims>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Welcome to your profile!".to_string(),
        user: claims,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub token1: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: Claims,
}
