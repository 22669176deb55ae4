use sqlx::PgPool;

use crate::models::page::Pagination;
use crate::models::user::User;

pub async fn list_users(pool: &PgPool, page: &Pagination) -> Result<(Vec<User>, i64), sqlx::Error> {
    let pattern = page.like_pattern();

    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users
        WHERE username ILIKE $1 OR role ILIKE $1
        ORDER BY id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username ILIKE $1 OR role ILIKE $1")
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    Ok((users, total))
}

pub async fn find_user(pool: &PgPool, id: i32) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn count_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

pub async fn insert_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    role: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash, role) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await
}

/// Partial update. `None` keeps the stored value.
pub async fn update_user(
    pool: &PgPool,
    id: i32,
    username: Option<&str>,
    password_hash: Option<&str>,
    role: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            username = COALESCE($2, username),
            password_hash = COALESCE($3, password_hash),
            role = COALESCE($4, role),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await
}

pub async fn delete_user(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
