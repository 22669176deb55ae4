use sqlx::PgPool;

use crate::layout::Layout;
use crate::models::certificate::Certificate;
use crate::models::page::Pagination;
use crate::models::template::layout_json;

pub struct CertificateRecord<'a> {
    pub template_id: i32,
    pub resident_id: i32,
    pub issued_by: i32,
    pub purpose: Option<&'a str>,
    pub rendered_layout: &'a Layout,
    pub storage_key: &'a str,
}

pub async fn insert_certificate(
    pool: &PgPool,
    rec: &CertificateRecord<'_>,
) -> Result<Certificate, sqlx::Error> {
    sqlx::query_as::<_, Certificate>(
        r#"
        INSERT INTO certificates
            (template_id, resident_id, issued_by, purpose, rendered_layout, storage_key)
        VALUES ($1, $2, $3, $4, $5::json, $6)
        RETURNING *
        "#,
    )
    .bind(rec.template_id)
    .bind(rec.resident_id)
    .bind(rec.issued_by)
    .bind(rec.purpose)
    .bind(layout_json(rec.rendered_layout)?)
    .bind(rec.storage_key)
    .fetch_one(pool)
    .await
}

/// Newest first, optionally limited to one resident.
pub async fn list_certificates(
    pool: &PgPool,
    resident_id: Option<i32>,
    page: &Pagination,
) -> Result<(Vec<Certificate>, i64), sqlx::Error> {
    let certificates = sqlx::query_as::<_, Certificate>(
        r#"
        SELECT * FROM certificates
        WHERE ($1::INT IS NULL OR resident_id = $1)
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(resident_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM certificates WHERE ($1::INT IS NULL OR resident_id = $1)",
    )
    .bind(resident_id)
    .fetch_one(pool)
    .await?;

    Ok((certificates, total))
}

pub async fn find_certificate(pool: &PgPool, id: i32) -> Result<Option<Certificate>, sqlx::Error> {
    sqlx::query_as::<_, Certificate>("SELECT * FROM certificates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
