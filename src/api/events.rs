use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::api::validation::validate_classification;
use crate::core::state::AppState;
use crate::core::time::{primitive_now_utc, today_utc};
use crate::repositories;
use crate::schemas::event::{
    BulkDeleteRequest, BulkDeleteResponse, EventPayload, EventResponse, ImportResponse,
    ListEventsQuery,
};
use crate::services::csv;
use crate::services::event_filter::{self, EventFilter};

/// Import rows are inserted sequentially in batches of this size. A failing
/// batch aborts the import; earlier batches are not rolled back.
const IMPORT_BATCH_SIZE: usize = 50;

const EXPORT_FILENAME: &str = "calendrier.csv";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create).delete(bulk_delete))
        .route("/export", get(export))
        .route("/import", post(import))
        .route("/:event_id", put(update).delete(remove))
}

async fn list(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<EventResponse>>, ApiError> {
    let events = repositories::events::list_ordered(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load events"))?;

    let filter = EventFilter {
        grade: query.grade,
        group: query.group,
        section: query.section,
        search: query.search,
        window: query.window,
    };
    let filtered = event_filter::apply(events, &filter, today_utc());

    Ok(Json(filtered.into_iter().map(EventResponse::from_db).collect()))
}

async fn create(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    validate_payload(&payload)?;

    let now = primitive_now_utc();
    let event = repositories::events::create(
        state.db(),
        repositories::events::CreateEvent {
            id: &Uuid::new_v4().to_string(),
            title: &payload.title,
            event_date: payload.event_date,
            start_time: payload.start_time,
            end_time: payload.end_time,
            location: &payload.location,
            description: &payload.description,
            event_type: payload.event_type,
            grade: payload.grade,
            group_name: &payload.group_name,
            section: payload.section.as_deref(),
            subject: payload.subject.as_deref(),
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create event"))?;

    Ok((StatusCode::CREATED, Json(EventResponse::from_db(event))))
}

async fn update(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<EventResponse>, ApiError> {
    validate_payload(&payload)?;

    let updated = repositories::events::update(
        state.db(),
        &event_id,
        repositories::events::UpdateEvent {
            title: &payload.title,
            event_date: payload.event_date,
            start_time: payload.start_time,
            end_time: payload.end_time,
            location: &payload.location,
            description: &payload.description,
            event_type: payload.event_type,
            grade: payload.grade,
            group_name: &payload.group_name,
            section: payload.section.as_deref(),
            subject: payload.subject.as_deref(),
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update event"))?;

    let Some(event) = updated else {
        return Err(ApiError::NotFound(format!("Event {event_id} not found")));
    };

    Ok(Json(EventResponse::from_db(event)))
}

async fn remove(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::events::delete(state.db(), &event_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete event"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Event {event_id} not found")))
    }
}

async fn bulk_delete(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    if payload.ids.is_empty() {
        return Err(ApiError::BadRequest("No event ids given".to_string()));
    }

    let deleted = repositories::events::delete_many(state.db(), &payload.ids)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete events"))?;

    Ok(Json(BulkDeleteResponse { deleted }))
}

async fn export(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let events = repositories::events::list_ordered(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load events"))?;

    let body = csv::export(&events);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}

async fn import(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut body = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Unreadable file field: {e}")))?;
            body = Some(text);
            break;
        }
    }

    let Some(body) = body else {
        return Err(ApiError::BadRequest("Missing 'file' field".to_string()));
    };

    let rows = csv::parse(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if rows.is_empty() {
        return Err(ApiError::BadRequest("The file contains no event rows".to_string()));
    }

    let now = primitive_now_utc();
    let ids: Vec<String> = rows.iter().map(|_| Uuid::new_v4().to_string()).collect();

    let mut imported = 0usize;
    let mut batches = 0usize;

    for (row_chunk, id_chunk) in
        rows.chunks(IMPORT_BATCH_SIZE).zip(ids.chunks(IMPORT_BATCH_SIZE))
    {
        let batch: Vec<repositories::events::CreateEvent<'_>> = row_chunk
            .iter()
            .zip(id_chunk)
            .map(|(row, id)| repositories::events::CreateEvent {
                id,
                title: &row.title,
                event_date: row.event_date,
                start_time: row.start_time,
                end_time: row.end_time,
                location: &row.location,
                description: &row.description,
                event_type: row.event_type,
                grade: row.grade,
                group_name: &row.group_name,
                section: row.section.as_deref(),
                subject: row.subject.as_deref(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        match repositories::events::create_many(state.db(), &batch).await {
            Ok(count) => {
                imported += count as usize;
                batches += 1;
            }
            Err(err) => {
                tracing::error!(error = %err, imported, "Import batch failed; earlier batches stay inserted");
                return Err(ApiError::Internal(format!(
                    "Import aborted after {imported} rows were inserted"
                )));
            }
        }
    }

    metrics::counter!("calendar_import_rows_total").increment(imported as u64);

    Ok(Json(ImportResponse { imported, batches }))
}

fn validate_payload(payload: &EventPayload) -> Result<(), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validate_classification(payload.grade, &payload.group_name, payload.section.as_deref())?;

    if payload.end_time < payload.start_time {
        return Err(ApiError::BadRequest("End time is before start time".to_string()));
    }

    Ok(())
}
