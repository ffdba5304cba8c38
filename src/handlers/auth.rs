// Admin session endpoints: login, session status, logout

use axum::{extract::State, http::HeaderMap, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{decode_token, issue_token, verify_secret, Claims};
use crate::error::ApiError;
use crate::middleware::AdminContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub secret: String,
}

/// POST /api/auth/login - exchange the shared admin secret for a session
/// token. No lockout or throttling; a mismatch just re-prompts.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    if !verify_secret(&body.secret, &state.admin_secret) {
        return Err(ApiError::unauthorized("Invalid admin secret"));
    }

    let claims = Claims::new(state.token_expiry_hours);
    let token = issue_token(&claims, &state.token_secret)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    Ok(Json(json!({
        "token": token,
        "expiresIn": state.token_expiry_hours * 3600,
    })))
}

/// GET /api/auth/session - reports whether the presented token currently
/// authenticates. Runs behind the admin auth middleware, so reaching the
/// handler at all means yes.
pub async fn session_status(Extension(_admin): Extension<AdminContext>) -> Json<Value> {
    Json(json!({ "authenticated": true }))
}

/// DELETE /api/auth/session - logout. Revokes the token immediately; it no
/// longer authenticates even though its expiry has not passed.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode, ApiError> {
    let token =
        crate::middleware::auth::extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;
    let claims = decode_token(&token, &state.token_secret)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    state.sessions.revoke(claims.jti).await;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
