use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{RevocationStore, TokenIssuer};
use crate::certificates::archive::PageArchive;
use crate::config::Config;
use crate::designer::DesignerSessions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub tokens: TokenIssuer,
    /// Revoked login sessions. Redis in production.
    pub revocations: Arc<dyn RevocationStore>,
    /// Where issued certificate pages are archived. S3/MinIO in production.
    pub archive: Arc<dyn PageArchive>,
    pub designer: DesignerSessions,
}
