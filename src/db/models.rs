use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime, Time};

use crate::db::types::{EventType, Grade};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub(crate) struct Event {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) event_date: Date,
    pub(crate) start_time: Time,
    pub(crate) end_time: Time,
    pub(crate) location: String,
    pub(crate) description: String,
    pub(crate) event_type: EventType,
    pub(crate) grade: Grade,
    pub(crate) group_name: String,
    pub(crate) section: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

/// Written by the pupil-facing calendar whenever a class opens its view.
/// Immutable from this service's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct AccessLogEntry {
    pub(crate) id: String,
    pub(crate) grade: Grade,
    pub(crate) group_name: String,
    pub(crate) section: Option<String>,
    pub(crate) accessed_at: PrimitiveDateTime,
}
