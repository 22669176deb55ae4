use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::layout::Layout;

/// An issued document. `rendered_layout` is the post-substitution layout, so
/// the certificate stays reproducible after its template or resident changes.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: i32,
    pub template_id: Option<i32>,
    pub resident_id: Option<i32>,
    pub issued_by: Option<i32>,
    pub purpose: Option<String>,
    pub rendered_layout: Json<Layout>,
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCertificate {
    pub template_id: i32,
    pub resident_id: i32,
    pub purpose: Option<String>,
}
