use sqlx::PgPool;

use crate::models::page::Pagination;
use crate::models::resident::{NewResident, Resident, ResidentUpdate};

const SEARCH_FILTER: &str =
    "last_name ILIKE $1 OR first_name ILIKE $1 OR phone_number ILIKE $1 OR purok ILIKE $1";

pub async fn list_residents(
    pool: &PgPool,
    page: &Pagination,
) -> Result<(Vec<Resident>, i64), sqlx::Error> {
    let pattern = page.like_pattern();

    let residents = sqlx::query_as::<_, Resident>(&format!(
        "SELECT * FROM residents WHERE {SEARCH_FILTER} ORDER BY id DESC LIMIT $2 OFFSET $3"
    ))
    .bind(&pattern)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM residents WHERE {SEARCH_FILTER}"
    ))
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    Ok((residents, total))
}

pub async fn find_resident(pool: &PgPool, id: i32) -> Result<Option<Resident>, sqlx::Error> {
    sqlx::query_as::<_, Resident>("SELECT * FROM residents WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_resident(pool: &PgPool, r: &NewResident) -> Result<Resident, sqlx::Error> {
    sqlx::query_as::<_, Resident>(
        r#"
        INSERT INTO residents
            (pic, first_name, last_name, birth_date, purok, house_number,
             phone_number, civil_status, is_indigent, is_senior_citizen)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&r.pic)
    .bind(r.first_name.trim())
    .bind(r.last_name.trim())
    .bind(r.birth_date)
    .bind(r.purok.trim())
    .bind(r.house_number.trim())
    .bind(r.phone_number.trim())
    .bind(&r.civil_status)
    .bind(r.is_indigent)
    .bind(r.is_senior_citizen)
    .fetch_one(pool)
    .await
}

/// Partial update. Absent fields keep their stored value; a cleared birth
/// date or civil status is written as NULL.
pub async fn update_resident(
    pool: &PgPool,
    id: i32,
    r: &ResidentUpdate,
) -> Result<Option<Resident>, sqlx::Error> {
    sqlx::query_as::<_, Resident>(
        r#"
        UPDATE residents SET
            pic = COALESCE($2, pic),
            first_name = COALESCE($3, first_name),
            last_name = COALESCE($4, last_name),
            birth_date = CASE WHEN $12 THEN $5 ELSE birth_date END,
            purok = COALESCE($6, purok),
            house_number = COALESCE($7, house_number),
            phone_number = COALESCE($8, phone_number),
            civil_status = CASE WHEN $13 THEN $9 ELSE civil_status END,
            is_indigent = COALESCE($10, is_indigent),
            is_senior_citizen = COALESCE($11, is_senior_citizen),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&r.pic)
    .bind(r.first_name.as_deref().map(str::trim))
    .bind(r.last_name.as_deref().map(str::trim))
    .bind(r.birth_date.flatten())
    .bind(r.purok.as_deref().map(str::trim))
    .bind(r.house_number.as_deref().map(str::trim))
    .bind(r.phone_number.as_deref().map(str::trim))
    .bind(r.civil_status.clone().flatten())
    .bind(r.is_indigent)
    .bind(r.is_senior_citizen)
    .bind(r.birth_date.is_some())
    .bind(r.civil_status.is_some())
    .fetch_optional(pool)
    .await
}

pub async fn delete_resident(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM residents WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
