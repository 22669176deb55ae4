use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::password::hash_password_blocking;
use crate::config::Config;
use crate::users::repo::{count_users, insert_user};

/// Creates a PostgreSQL connection pool and applies pending migrations.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("database migration failed")?;
    info!("Database migrations applied");

    Ok(pool)
}

/// Creates the first administrator when the users table is empty.
///
/// Without `ADMIN_PASSWORD` nobody could log in, so the gap is only logged.
pub async fn ensure_bootstrap_admin(pool: &PgPool, config: &Config) -> Result<()> {
    if count_users(pool).await? > 0 {
        return Ok(());
    }
    let Some(password) = config.admin_password.clone() else {
        warn!("No users exist and ADMIN_PASSWORD is not set; nobody can log in");
        return Ok(());
    };

    let hash = hash_password_blocking(password).await?;
    let admin = insert_user(pool, &config.admin_username, &hash, "admin").await?;
    info!("Created bootstrap admin '{}' (id {})", admin.username, admin.id);
    Ok(())
}
