use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::password::verify_password_blocking;
use crate::auth::Session;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::users::repo;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// POST /api/users/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = req.username.trim();
    let user = repo::find_user_by_username(&state.db, username).await?;

    let Some(user) = user else {
        warn!("Login failed: unknown user '{username}'");
        return Err(AppError::Unauthorized);
    };
    if !verify_password_blocking(req.password, user.password_hash.clone()).await? {
        warn!("Login failed: wrong password for '{username}'");
        return Err(AppError::Unauthorized);
    }

    let issued = state
        .tokens
        .issue(&user, Utc::now())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {e}")))?;
    let session = Session::from(issued.claims);
    info!("User '{}' logged in (session {})", user.username, session.session_id);

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: session.expires_at,
        user,
    }))
}

/// POST /api/users/logout
///
/// Revokes the session and discards any designer sessions it still holds.
pub async fn handle_logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    state
        .revocations
        .revoke(session.session_id, session.remaining_secs(Utc::now()))
        .await?;
    let dropped = state.designer.close_all_for(session.session_id).await;
    info!(
        "User '{}' logged out (session {}, {dropped} designer session(s) dropped)",
        session.username, session.session_id
    );
    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// GET /api/users/me
pub async fn handle_me(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<User>, AppError> {
    let user = repo::find_user(&state.db, session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.user_id)))?;
    Ok(Json(user))
}
