use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Claims carried by an admin session token. There are no user accounts;
/// possession of a valid token is the whole identity.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self { jti: Uuid::new_v4(), exp, iat: now.timestamp() }
    }
}

#[derive(Debug)]
pub enum TokenError {
    Generation(String),
    Invalid(String),
    MissingSecret,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Generation(msg) => write!(f, "Token generation error: {}", msg),
            TokenError::Invalid(msg) => write!(f, "Invalid token: {}", msg),
            TokenError::MissingSecret => write!(f, "Token secret not configured"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Compare an operator-submitted secret against the configured one.
/// Exact match, case-sensitive. An empty configured secret never matches,
/// so an unconfigured deployment cannot be logged into.
pub fn verify_secret(candidate: &str, configured: &str) -> bool {
    !configured.is_empty() && candidate == configured
}

pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| TokenError::Generation(e.to_string()))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| TokenError::Invalid(e.to_string()))?;

    Ok(token_data.claims)
}

/// Tokens are stateless, but logout must take effect immediately, so revoked
/// token ids are tracked in memory until their natural expiry would have
/// passed anyway. A process restart clears the set; expiry still bounds any
/// token that survives it.
#[derive(Default)]
pub struct AdminSessions {
    revoked: RwLock<HashSet<Uuid>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn revoke(&self, jti: Uuid) {
        self.revoked.write().await.insert(jti);
    }

    pub async fn is_revoked(&self, jti: Uuid) -> bool {
        self.revoked.read().await.contains(&jti)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_comparison_is_exact_and_case_sensitive() {
        assert!(verify_secret("hunter2", "hunter2"));
        assert!(!verify_secret("Hunter2", "hunter2"));
        assert!(!verify_secret("hunter2 ", "hunter2"));
        assert!(!verify_secret("", "hunter2"));
    }

    #[test]
    fn empty_configured_secret_never_matches() {
        assert!(!verify_secret("", ""));
        assert!(!verify_secret("anything", ""));
    }

    #[test]
    fn issued_tokens_round_trip() {
        let claims = Claims::new(1);
        let token = issue_token(&claims, "test-secret").unwrap();
        let decoded = decode_token(&token, "test-secret").unwrap();
        assert_eq!(decoded.jti, claims.jti);
    }

    #[test]
    fn wrong_signing_secret_is_rejected() {
        let token = issue_token(&Claims::new(1), "test-secret").unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[tokio::test]
    async fn revocation_is_immediate() {
        let sessions = AdminSessions::new();
        let jti = Uuid::new_v4();
        assert!(!sessions.is_revoked(jti).await);
        sessions.revoke(jti).await;
        assert!(sessions.is_revoked(jti).await);
    }
}
