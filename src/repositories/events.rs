use sqlx::{PgPool, QueryBuilder};
use time::{Date, PrimitiveDateTime, Time};

use crate::db::models::Event;
use crate::db::types::{EventType, Grade};

const COLUMNS: &str = "\
    id, title, event_date, start_time, end_time, location, description, \
    event_type, grade, group_name, section, subject, created_at, updated_at";

pub(crate) async fn list_ordered(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(&format!(
        "SELECT {COLUMNS} FROM events ORDER BY event_date, start_time, id"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) struct CreateEvent<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub event_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub location: &'a str,
    pub description: &'a str,
    pub event_type: EventType,
    pub grade: Grade,
    pub group_name: &'a str,
    pub section: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateEvent<'_>) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(&format!(
        "INSERT INTO events (
            id, title, event_date, start_time, end_time, location, description,
            event_type, grade, group_name, section, subject, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.event_date)
    .bind(params.start_time)
    .bind(params.end_time)
    .bind(params.location)
    .bind(params.description)
    .bind(params.event_type)
    .bind(params.grade)
    .bind(params.group_name)
    .bind(params.section)
    .bind(params.subject)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

/// Multi-row insert for one import batch. Not wrapped in a transaction with
/// other batches: a later batch failing leaves earlier ones in place.
pub(crate) async fn create_many(
    pool: &PgPool,
    batch: &[CreateEvent<'_>],
) -> Result<u64, sqlx::Error> {
    if batch.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::new(
        "INSERT INTO events (
            id, title, event_date, start_time, end_time, location, description,
            event_type, grade, group_name, section, subject, created_at, updated_at
        ) ",
    );
    builder.push_values(batch, |mut row, event| {
        row.push_bind(event.id)
            .push_bind(event.title)
            .push_bind(event.event_date)
            .push_bind(event.start_time)
            .push_bind(event.end_time)
            .push_bind(event.location)
            .push_bind(event.description)
            .push_bind(event.event_type)
            .push_bind(event.grade)
            .push_bind(event.group_name)
            .push_bind(event.section)
            .push_bind(event.subject)
            .push_bind(event.created_at)
            .push_bind(event.updated_at);
    });

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected())
}

pub(crate) struct UpdateEvent<'a> {
    pub title: &'a str,
    pub event_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub location: &'a str,
    pub description: &'a str,
    pub event_type: EventType,
    pub grade: Grade,
    pub group_name: &'a str,
    pub section: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub updated_at: PrimitiveDateTime,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateEvent<'_>,
) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(&format!(
        "UPDATE events SET
            title = $1,
            event_date = $2,
            start_time = $3,
            end_time = $4,
            location = $5,
            description = $6,
            event_type = $7,
            grade = $8,
            group_name = $9,
            section = $10,
            subject = $11,
            updated_at = $12
         WHERE id = $13
         RETURNING {COLUMNS}",
    ))
    .bind(params.title)
    .bind(params.event_date)
    .bind(params.start_time)
    .bind(params.end_time)
    .bind(params.location)
    .bind(params.description)
    .bind(params.event_type)
    .bind(params.grade)
    .bind(params.group_name)
    .bind(params.section)
    .bind(params.subject)
    .bind(params.updated_at)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn delete_many(pool: &PgPool, ids: &[String]) -> Result<u64, sqlx::Error> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result =
        sqlx::query("DELETE FROM events WHERE id = ANY($1)").bind(ids).execute(pool).await?;
    Ok(result.rows_affected())
}
