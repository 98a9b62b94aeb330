//! Bearer-token gate for axum routes.
//!
//! On success the decoded [`Claims`] are inserted into the request
//! extensions, so handlers can take `Extension<Claims>`.

use std::sync::Arc;

use axum::{
    extract::{ Request, State },
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{ debug, warn };

use super::token::{ Claims, TokenService };
use crate::error::{ AppError, Result };

/// Returning `Err` short-circuits the chain: the inner handler never runs
/// once a 401 has been produced.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next
) -> Result<Response> {
    let claims = authenticate(&tokens, &req)?;

    debug!("[AUTH] Authenticated user: {} (id: {})", claims.email, claims.sub);

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn authenticate(tokens: &TokenService, req: &Request) -> Result<Claims> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        warn!("[AUTH] Missing Authorization header");
        return Err(AppError::Unauthorized("token not provided"));
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            warn!("[AUTH] Invalid Authorization header format");
            AppError::Unauthorized("Malformed token")
        })?;

    tokens.verify(token).map_err(|e| {
        warn!("[AUTH] Token validation failed");
        e
    })
}
