use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::Session;
use crate::certificates::archive::certificate_key;
use crate::certificates::repo::{self, CertificateRecord};
use crate::errors::AppError;
use crate::models::certificate::{Certificate, IssueCertificate};
use crate::models::page::{PageParams, Paginated, Pagination};
use crate::state::AppState;
use crate::templates::print::fill_for_resident;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub resident_id: Option<String>,
}

/// POST /api/certificates
///
/// Fills the template for the resident, archives the rendered page and
/// records the issuance. Nothing is recorded if the upload fails.
pub async fn handle_issue_certificate(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<IssueCertificate>,
) -> Result<(StatusCode, Json<Certificate>), AppError> {
    let filled = fill_for_resident(&state, req.template_id, req.resident_id).await?;
    let html = filled.to_html();

    let storage_key = certificate_key(Uuid::new_v4());
    state.archive.store(&storage_key, html).await?;

    let purpose = req
        .purpose
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let certificate = repo::insert_certificate(
        &state.db,
        &CertificateRecord {
            template_id: filled.template.id,
            resident_id: filled.resident.id,
            issued_by: session.user_id,
            purpose,
            rendered_layout: &filled.layout,
            storage_key: &storage_key,
        },
    )
    .await?;

    info!(
        "Certificate {} issued from template {} for resident {} by {}",
        certificate.id, filled.template.id, filled.resident.id, session.username
    );
    Ok((StatusCode::CREATED, Json(certificate)))
}

/// GET /api/certificates
pub async fn handle_list_certificates(
    State(state): State<AppState>,
    _session: Session,
    Query(query): Query<CertificateQuery>,
) -> Result<Json<Paginated<Certificate>>, AppError> {
    let resident_id = query
        .resident_id
        .as_deref()
        .and_then(|s| s.trim().parse::<i32>().ok());
    let page = Pagination::from(PageParams {
        page: query.page,
        limit: query.limit,
        search: None,
    });
    let (certificates, total) = repo::list_certificates(&state.db, resident_id, &page).await?;
    Ok(Json(Paginated::new(certificates, total, &page)))
}

/// GET /api/certificates/:id
pub async fn handle_get_certificate(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i32>,
) -> Result<Json<Certificate>, AppError> {
    let certificate = repo::find_certificate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Certificate {id} not found")))?;
    Ok(Json(certificate))
}
