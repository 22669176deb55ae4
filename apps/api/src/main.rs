mod auth;
mod certificates;
mod config;
mod db;
mod designer;
mod errors;
mod layout;
mod models;
mod render;
mod residents;
mod routes;
mod state;
mod substitution;
mod templates;
mod users;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::auth::{RedisRevocationStore, TokenIssuer};
use crate::certificates::archive::S3PageArchive;
use crate::config::Config;
use crate::db::{create_pool, ensure_bootstrap_admin};
use crate::designer::DesignerSessions;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Barangay records API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL (migrations run on connect)
    let db = create_pool(&config.database_url).await?;
    ensure_bootstrap_admin(&db, &config).await?;

    // Redis holds revoked login sessions
    let redis = redis::Client::open(config.redis_url.clone())?;
    let revocations = Arc::new(RedisRevocationStore::new(redis));
    info!("Redis client initialized");

    // S3 / MinIO archive for issued certificates
    let s3 = build_s3_client(&config).await;
    let archive = Arc::new(S3PageArchive::new(s3, config.s3_bucket.clone()));
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let tokens = TokenIssuer::new(
        &config.jwt_secret,
        chrono::Duration::hours(config.session_ttl_hours),
    );
    info!(
        "Issuing {}h sessions for barangay {}",
        config.session_ttl_hours, config.office.barangay
    );

    let state = AppState {
        db,
        config: config.clone(),
        tokens,
        revocations,
        archive,
        designer: DesignerSessions::default(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to `CORS_ORIGIN` when set; permissive otherwise (local dev).
fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let Some(origin) = &config.cors_origin else {
        return Ok(CorsLayer::permissive());
    };
    Ok(CorsLayer::permissive().allow_origin(origin.parse::<HeaderValue>()?))
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "brgy-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
