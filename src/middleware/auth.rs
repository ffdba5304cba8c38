use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::decode_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin context extracted from a session token
#[derive(Clone, Debug)]
pub struct AdminContext {
    pub jti: Uuid,
}

/// Admin session middleware: validates the Bearer token (signature, expiry,
/// revocation) and injects an AdminContext into the request. Protects the
/// settings write endpoint, which must not rely on UI-side gating alone.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = decode_token(&token, &state.token_secret)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    if state.sessions.is_revoked(claims.jti).await {
        return Err(ApiError::unauthorized("Session has been logged out"));
    }

    request.extensions_mut().insert(AdminContext { jti: claims.jti });

    Ok(next.run(request).await)
}

/// Extract the session token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty session token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
