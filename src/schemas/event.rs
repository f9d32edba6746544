use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, Time};
use validator::Validate;

use crate::core::time::{format_date, format_primitive, format_time, parse_date, parse_time};
use crate::db::models::Event;
use crate::db::types::{EventType, Grade};
use crate::services::event_filter::DateWindow;

/// Full event body, used for both create and full update.
#[derive(Debug, Deserialize, Validate)]
pub(crate) struct EventPayload {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[serde(alias = "eventDate", alias = "date", deserialize_with = "deserialize_date")]
    pub(crate) event_date: Date,
    #[serde(alias = "startTime", deserialize_with = "deserialize_time")]
    pub(crate) start_time: Time,
    #[serde(alias = "endTime", deserialize_with = "deserialize_time")]
    pub(crate) end_time: Time,
    #[serde(default)]
    pub(crate) location: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(alias = "eventType", alias = "type")]
    pub(crate) event_type: EventType,
    pub(crate) grade: Grade,
    #[serde(alias = "group", alias = "groupName")]
    pub(crate) group_name: String,
    #[serde(default)]
    pub(crate) section: Option<String>,
    #[serde(default)]
    pub(crate) subject: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EventResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) event_date: String,
    pub(crate) start_time: String,
    pub(crate) end_time: String,
    pub(crate) location: String,
    pub(crate) description: String,
    pub(crate) event_type: EventType,
    pub(crate) event_type_label: String,
    pub(crate) grade: Grade,
    pub(crate) grade_label: String,
    pub(crate) group_name: String,
    pub(crate) section: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl EventResponse {
    pub(crate) fn from_db(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            event_date: format_date(event.event_date),
            start_time: format_time(event.start_time),
            end_time: format_time(event.end_time),
            location: event.location,
            description: event.description,
            event_type: event.event_type,
            event_type_label: event.event_type.label().to_string(),
            grade: event.grade,
            grade_label: event.grade.label().to_string(),
            group_name: event.group_name,
            section: event.section,
            subject: event.subject,
            created_at: format_primitive(event.created_at),
            updated_at: format_primitive(event.updated_at),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListEventsQuery {
    #[serde(default)]
    pub(crate) grade: Option<Grade>,
    #[serde(default)]
    pub(crate) group: Option<String>,
    #[serde(default)]
    pub(crate) section: Option<String>,
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default, alias = "range")]
    pub(crate) window: DateWindow,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkDeleteRequest {
    pub(crate) ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkDeleteResponse {
    pub(crate) deleted: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportResponse {
    pub(crate) imported: usize,
    pub(crate) batches: usize,
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<Time, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid time '{raw}', expected HH:MM")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses_dates_and_aliases() {
        let payload: EventPayload = serde_json::from_value(serde_json::json!({
            "title": "Devoir de contrôle",
            "date": "2025-09-08",
            "startTime": "08:00",
            "endTime": "10:00",
            "type": "exam",
            "grade": "baccalaureat",
            "group": "2",
            "section": "Sciences Techniques"
        }))
        .expect("payload");

        assert_eq!(payload.event_date, Date::from_calendar_date(2025, time::Month::September, 8).unwrap());
        assert_eq!(payload.event_type, EventType::Exam);
        assert_eq!(payload.grade, Grade::Baccalaureat);
        assert_eq!(payload.group_name, "2");
        assert_eq!(payload.location, "");
    }

    #[test]
    fn payload_rejects_malformed_date() {
        let result = serde_json::from_value::<EventPayload>(serde_json::json!({
            "title": "Devoir",
            "date": "08/09/2025",
            "startTime": "08:00",
            "endTime": "10:00",
            "type": "exam",
            "grade": "primary_one",
            "group": "1"
        }));
        assert!(result.is_err());
    }
}
