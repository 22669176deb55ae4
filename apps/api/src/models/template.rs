use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::layout::Layout;

/// Layout as JSON text for a `$n::json` parameter. The columns are `JSON`,
/// not `JSONB`, so Postgres keeps the text and its key order as written.
pub fn layout_json(layout: &Layout) -> Result<String, sqlx::Error> {
    serde_json::to_string(layout).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// A named, persisted layout. `layout_settings` is always written whole.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub id: i32,
    pub name: String,
    pub layout_settings: Json<Layout>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    /// Starter layout when omitted.
    pub layout_settings: Option<Layout>,
}

/// Whole-document replacement; both fields are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateReplacement {
    pub name: String,
    pub layout_settings: Layout,
}
