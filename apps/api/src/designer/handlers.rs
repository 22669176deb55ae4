use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::Session;
use crate::designer::{DesignerOp, DesignerSessionView, UNTITLED_TEMPLATE};
use crate::errors::AppError;
use crate::layout::starter_layout;
use crate::state::AppState;
use crate::templates::handlers::validate_name;
use crate::templates::repo;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDesigner {
    /// Existing template to edit. Absent starts from the starter layout.
    pub template_id: Option<i32>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpResult {
    pub session: DesignerSessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_key: Option<String>,
}

/// POST /api/designer/sessions
pub async fn handle_open_session(
    State(state): State<AppState>,
    session: Session,
    body: Option<Json<OpenDesigner>>,
) -> Result<(StatusCode, Json<DesignerSessionView>), AppError> {
    let req = body.map(|Json(b)| b).unwrap_or_default();

    let purged = state.designer.purge_expired(Utc::now()).await;
    if purged > 0 {
        info!("Purged {purged} expired designer sessions");
    }

    let (template_id, name, layout) = match req.template_id {
        Some(id) => {
            let template = repo::find_template(&state.db, id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))?;
            (Some(template.id), template.name, template.layout_settings.0)
        }
        None => {
            let name = match req.name.as_deref() {
                Some(name) => validate_name(name)?.to_string(),
                None => UNTITLED_TEMPLATE.to_string(),
            };
            (None, name, starter_layout())
        }
    };

    let view = state
        .designer
        .open(session.session_id, session.expires_at, template_id, name, layout)
        .await;
    info!(
        "Designer session {} opened by {} (template {:?})",
        view.id, session.username, template_id
    );
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/designer/sessions/:sid
pub async fn handle_get_session(
    State(state): State<AppState>,
    session: Session,
    Path(sid): Path<Uuid>,
) -> Result<Json<DesignerSessionView>, AppError> {
    Ok(Json(state.designer.get(session.session_id, sid).await?))
}

/// DELETE /api/designer/sessions/:sid
///
/// Unsaved edits are discarded.
pub async fn handle_close_session(
    State(state): State<AppState>,
    session: Session,
    Path(sid): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.designer.close(session.session_id, sid).await?;
    Ok(Json(json!({ "message": "Designer session closed" })))
}

/// POST /api/designer/sessions/:sid/ops
pub async fn handle_apply_op(
    State(state): State<AppState>,
    session: Session,
    Path(sid): Path<Uuid>,
    Json(op): Json<DesignerOp>,
) -> Result<Json<OpResult>, AppError> {
    let (view, added_key) = state.designer.apply(session.session_id, sid, op).await?;
    Ok(Json(OpResult {
        session: view,
        added_key,
    }))
}

/// POST /api/designer/sessions/:sid/save
///
/// Writes the whole layout: create for a new template, replace otherwise.
/// On failure the session keeps its edits so the save can be retried.
pub async fn handle_save_session(
    State(state): State<AppState>,
    session: Session,
    Path(sid): Path<Uuid>,
) -> Result<Json<DesignerSessionView>, AppError> {
    let owner = session.session_id;
    let snapshot = state.designer.snapshot_for_save(owner, sid).await?;

    let saved = match snapshot.template_id {
        None => repo::insert_template(&state.db, &snapshot.name, &snapshot.layout)
            .await
            .map(Some),
        Some(id) => repo::replace_template(&state.db, id, &snapshot.name, &snapshot.layout).await,
    };
    let template = match saved {
        Ok(Some(template)) => template,
        Ok(None) => {
            return Err(AppError::NotFound(format!(
                "Template {} no longer exists",
                snapshot.template_id.unwrap_or_default()
            )));
        }
        Err(e) => {
            warn!("Designer session {sid} save failed; edits kept in memory");
            return Err(e.into());
        }
    };

    let view = state
        .designer
        .mark_saved(owner, sid, template.id, &snapshot)
        .await?;
    info!(
        "Designer session {sid} saved template {} by {}",
        template.id, session.username
    );
    Ok(Json(view))
}
