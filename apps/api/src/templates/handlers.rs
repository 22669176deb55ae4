use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::Session;
use crate::errors::AppError;
use crate::layout::{starter_layout, Layout};
use crate::models::page::{PageParams, Paginated, Pagination};
use crate::models::template::{DocumentTemplate, NewTemplate, TemplateReplacement};
use crate::state::AppState;
use crate::substitution::tokens::{catalog, PlaceholderInfo};
use crate::templates::print::fill_for_resident;
use crate::templates::repo;

pub(crate) fn validate_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("template name cannot be empty".to_string()));
    }
    Ok(name)
}

/// GET /api/documents
pub async fn handle_list_templates(
    State(state): State<AppState>,
    _session: Session,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<DocumentTemplate>>, AppError> {
    let page = Pagination::from(params);
    let (templates, total) = repo::list_templates(&state.db, &page).await?;
    Ok(Json(Paginated::new(templates, total, &page)))
}

/// GET /api/documents/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i32>,
) -> Result<Json<DocumentTemplate>, AppError> {
    let template = repo::find_template(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))?;
    Ok(Json(template))
}

/// POST /api/documents
pub async fn handle_create_template(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NewTemplate>,
) -> Result<(StatusCode, Json<DocumentTemplate>), AppError> {
    let name = validate_name(&req.name)?;
    let layout = req.layout_settings.unwrap_or_else(starter_layout);
    let template = repo::insert_template(&state.db, name, &layout).await?;
    info!("Template {} '{}' created by {}", template.id, template.name, session.username);
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/documents/:id
///
/// Whole-document replacement of name and layout.
pub async fn handle_replace_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(req): Json<TemplateReplacement>,
) -> Result<Json<DocumentTemplate>, AppError> {
    let name = validate_name(&req.name)?;
    let template = repo::replace_template(&state.db, id, name, &req.layout_settings)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))?;
    info!("Template {id} replaced by {}", session.username);
    Ok(Json(template))
}

/// DELETE /api/documents/:id
pub async fn handle_delete_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if !repo::delete_template(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Template {id} not found")));
    }
    info!("Template {id} deleted by {}", session.username);
    Ok(Json(json!({ "message": "Template deleted successfully" })))
}

/// GET /api/documents/placeholders
pub async fn handle_list_placeholders(_session: Session) -> Json<Vec<PlaceholderInfo>> {
    Json(catalog())
}

/// GET /api/documents/:id/preview/:resident_id
///
/// The template's layout with placeholders filled for the resident.
pub async fn handle_preview(
    State(state): State<AppState>,
    _session: Session,
    Path((id, resident_id)): Path<(i32, i32)>,
) -> Result<Json<Layout>, AppError> {
    let filled = fill_for_resident(&state, id, resident_id).await?;
    Ok(Json(filled.layout))
}

/// GET /api/documents/:id/print/:resident_id
pub async fn handle_print(
    State(state): State<AppState>,
    _session: Session,
    Path((id, resident_id)): Path<(i32, i32)>,
) -> Result<Html<String>, AppError> {
    let filled = fill_for_resident(&state, id, resident_id).await?;
    Ok(Html(filled.to_html()))
}
