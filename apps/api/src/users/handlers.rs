use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::password::hash_password_blocking;
use crate::auth::Session;
use crate::errors::AppError;
use crate::models::page::{PageParams, Paginated, Pagination};
use crate::models::user::{NewUser, User, UserUpdate, DEFAULT_ROLE};
use crate::state::AppState;
use crate::users::repo;

const MIN_PASSWORD_LEN: usize = 6;
const USERNAME_TAKEN: &str = "Username already exists.";

fn validate_username(username: &str) -> Result<&str, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }
    Ok(username)
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// GET /api/users
pub async fn handle_list_users(
    State(state): State<AppState>,
    _session: Session,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<User>>, AppError> {
    let page = Pagination::from(params);
    let (users, total) = repo::list_users(&state.db, &page).await?;
    Ok(Json(Paginated::new(users, total, &page)))
}

/// GET /api/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i32>,
) -> Result<Json<User>, AppError> {
    let user = repo::find_user(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;
    Ok(Json(user))
}

/// POST /api/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let username = validate_username(&req.username)?;
    validate_password(&req.password)?;
    let role = req
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_ROLE);

    let hash = hash_password_blocking(req.password).await?;
    let user = repo::insert_user(&state.db, username, &hash, role)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, USERNAME_TAKEN))?;

    info!("User {} created by {}", user.username, session.username);
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/:id
pub async fn handle_update_user(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i32>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<User>, AppError> {
    let username = req.username.as_deref().map(validate_username).transpose()?;
    let password_hash = match req.password {
        Some(password) => {
            validate_password(&password)?;
            Some(hash_password_blocking(password).await?)
        }
        None => None,
    };
    let role = req.role.as_deref().map(str::trim).filter(|r| !r.is_empty());

    let user = repo::update_user(&state.db, id, username, password_hash.as_deref(), role)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, USERNAME_TAKEN))?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;
    Ok(Json(user))
}

/// DELETE /api/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if id == session.user_id {
        return Err(AppError::Validation(
            "you cannot delete your own account".to_string(),
        ));
    }
    if !repo::delete_user(&state.db, id).await? {
        return Err(AppError::NotFound(format!("User {id} not found")));
    }
    info!("User {id} deleted by {}", session.username);
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
