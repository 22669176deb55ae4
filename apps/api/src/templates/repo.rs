use sqlx::PgPool;

use crate::layout::Layout;
use crate::models::page::Pagination;
use crate::models::template::{layout_json, DocumentTemplate};

pub async fn list_templates(
    pool: &PgPool,
    page: &Pagination,
) -> Result<(Vec<DocumentTemplate>, i64), sqlx::Error> {
    let pattern = page.like_pattern();

    let templates = sqlx::query_as::<_, DocumentTemplate>(
        r#"
        SELECT * FROM document_templates
        WHERE name ILIKE $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM document_templates WHERE name ILIKE $1")
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

    Ok((templates, total))
}

pub async fn find_template(pool: &PgPool, id: i32) -> Result<Option<DocumentTemplate>, sqlx::Error> {
    sqlx::query_as::<_, DocumentTemplate>("SELECT * FROM document_templates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_template(
    pool: &PgPool,
    name: &str,
    layout: &Layout,
) -> Result<DocumentTemplate, sqlx::Error> {
    sqlx::query_as::<_, DocumentTemplate>(
        "INSERT INTO document_templates (name, layout_settings) VALUES ($1, $2::json) RETURNING *",
    )
    .bind(name)
    .bind(layout_json(layout)?)
    .fetch_one(pool)
    .await
}

/// Replaces name and the whole layout document. There is no field-level merge;
/// concurrent saves resolve as last write wins.
pub async fn replace_template(
    pool: &PgPool,
    id: i32,
    name: &str,
    layout: &Layout,
) -> Result<Option<DocumentTemplate>, sqlx::Error> {
    sqlx::query_as::<_, DocumentTemplate>(
        r#"
        UPDATE document_templates
        SET name = $2, layout_settings = $3::json, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(layout_json(layout)?)
    .fetch_optional(pool)
    .await
}

pub async fn delete_template(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM document_templates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
