use sqlx::PgPool;

use crate::db::models::AccessLogEntry;

const COLUMNS: &str = "id, grade, group_name, section, accessed_at";

pub(crate) async fn list_recent(
    pool: &PgPool,
    skip: i64,
    limit: i64,
) -> Result<Vec<AccessLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, AccessLogEntry>(&format!(
        "SELECT {COLUMNS} FROM access_logs ORDER BY accessed_at DESC OFFSET $1 LIMIT $2"
    ))
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_all(pool: &PgPool) -> Result<Vec<AccessLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, AccessLogEntry>(&format!(
        "SELECT {COLUMNS} FROM access_logs ORDER BY accessed_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM access_logs").fetch_one(pool).await
}
