use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller of a request.
///
/// Built from the bearer token on every request; there is no ambient
/// "current user". Created at login, ends at logout or token expiry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Seconds until the token expires, zero once expired.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((self.expires_at - now).num_seconds()).unwrap_or(0)
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            session_id: claims.jti,
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
            expires_at: Utc
                .timestamp_opt(claims.exp, 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }
}

/// Token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AppError::Unauthorized)?;

        let claims = state.tokens.verify(token).map_err(|e| {
            debug!("Rejected bearer token: {e}");
            AppError::Forbidden
        })?;

        if state.revocations.is_revoked(claims.jti).await? {
            debug!("Rejected revoked session {}", claims.jti);
            return Err(AppError::Forbidden);
        }

        Ok(Session::from(claims))
    }
}
