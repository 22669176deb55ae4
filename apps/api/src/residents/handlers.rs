use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::Session;
use crate::errors::AppError;
use crate::models::page::{PageParams, Paginated, Pagination};
use crate::models::resident::{NewResident, Resident, ResidentUpdate};
use crate::residents::repo;
use crate::state::AppState;

const PHONE_TAKEN: &str = "Phone number already exists.";

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// GET /api/residents
pub async fn handle_list_residents(
    State(state): State<AppState>,
    _session: Session,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<Resident>>, AppError> {
    let page = Pagination::from(params);
    let (residents, total) = repo::list_residents(&state.db, &page).await?;
    info!("Resident search '{}' matched {total}", page.search);
    Ok(Json(Paginated::new(residents, total, &page)))
}

/// GET /api/residents/:id
pub async fn handle_get_resident(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i32>,
) -> Result<Json<Resident>, AppError> {
    let resident = repo::find_resident(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resident {id} not found")))?;
    Ok(Json(resident))
}

/// POST /api/residents
pub async fn handle_create_resident(
    State(state): State<AppState>,
    _session: Session,
    Json(req): Json<NewResident>,
) -> Result<(StatusCode, Json<Resident>), AppError> {
    require_non_blank("firstName", &req.first_name)?;
    require_non_blank("lastName", &req.last_name)?;
    require_non_blank("phoneNumber", &req.phone_number)?;

    let resident = repo::insert_resident(&state.db, &req)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, PHONE_TAKEN))?;
    Ok((StatusCode::CREATED, Json(resident)))
}

/// PUT /api/residents/:id
pub async fn handle_update_resident(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i32>,
    Json(req): Json<ResidentUpdate>,
) -> Result<Json<Resident>, AppError> {
    for (field, value) in [
        ("firstName", &req.first_name),
        ("lastName", &req.last_name),
        ("phoneNumber", &req.phone_number),
    ] {
        if let Some(value) = value {
            require_non_blank(field, value)?;
        }
    }

    let resident = repo::update_resident(&state.db, id, &req)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, PHONE_TAKEN))?
        .ok_or_else(|| AppError::NotFound(format!("Resident {id} not found")))?;
    Ok(Json(resident))
}

/// DELETE /api/residents/:id
pub async fn handle_delete_resident(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if !repo::delete_resident(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Resident {id} not found")));
    }
    Ok(Json(json!({ "message": "Resident deleted successfully" })))
}
