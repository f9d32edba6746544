use thiserror::Error;
use time::{Date, Time};

use crate::core::time::{format_date, format_time, parse_date, parse_time};
use crate::db::models::Event;
use crate::db::types::{EventType, Grade};

pub(crate) const CSV_HEADER: &str =
    "Titre,Type,Date,Heure debut,Heure fin,Niveau,Groupe,Section,Matiere,Lieu,Description";

const FIELD_COUNT: usize = 11;

#[derive(Debug, Error)]
pub(crate) enum CsvError {
    #[error("line {line}: expected {FIELD_COUNT} fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: unknown event type '{value}'")]
    UnknownType { line: usize, value: String },
    #[error("line {line}: unknown grade '{value}'")]
    UnknownGrade { line: usize, value: String },
    #[error("line {line}: invalid date '{value}'")]
    InvalidDate { line: usize, value: String },
    #[error("line {line}: invalid time '{value}'")]
    InvalidTime { line: usize, value: String },
}

/// One parsed import row; ids and timestamps are assigned at insert time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EventRow {
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
}

/// Fields are joined positionally with no quoting or escaping; a comma
/// inside a free-text field corrupts that row on re-import. The format is
/// kept byte-compatible with files the panel has already produced.
pub(crate) fn export(events: &[Event]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for event in events {
        let fields = [
            event.title.as_str(),
            event.event_type.label(),
            &format_date(event.event_date),
            &format_time(event.start_time),
            &format_time(event.end_time),
            event.grade.label(),
            event.group_name.as_str(),
            event.section.as_deref().unwrap_or(""),
            event.subject.as_deref().unwrap_or(""),
            event.location.as_str(),
            event.description.as_str(),
        ]
        .join(",");
        out.push_str(&fields);
        out.push('\n');
    }

    out
}

/// Positional split on commas, one row per non-blank line. The header line
/// is skipped when present. Any malformed row fails the whole parse, before
/// anything is inserted.
pub(crate) fn parse(raw: &str) -> Result<Vec<EventRow>, CsvError> {
    let mut rows = Vec::new();

    for (index, lineraw) in raw.lines().enumerate() {
        let line = index + 1;
        let trimmed = lineraw.trim();
        if trimmed.is_empty() || trimmed == CSV_HEADER {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(CsvError::FieldCount { line, found: fields.len() });
        }

        let event_type = EventType::from_label(fields[1])
            .ok_or_else(|| CsvError::UnknownType { line, value: fields[1].to_string() })?;
        let event_date = parse_date(fields[2])
            .ok_or_else(|| CsvError::InvalidDate { line, value: fields[2].to_string() })?;
        let start_time = parse_time(fields[3])
            .ok_or_else(|| CsvError::InvalidTime { line, value: fields[3].to_string() })?;
        let end_time = parse_time(fields[4])
            .ok_or_else(|| CsvError::InvalidTime { line, value: fields[4].to_string() })?;
        let grade = Grade::from_label(fields[5])
            .ok_or_else(|| CsvError::UnknownGrade { line, value: fields[5].to_string() })?;

        // The section column only means something for section-bearing grades.
        let section = if grade.has_sections() { non_empty(fields[7]) } else { None };

        rows.push(EventRow {
            title: fields[0].trim().to_string(),
            event_date,
            start_time,
            end_time,
            location: fields[9].trim().to_string(),
            description: fields[10].trim().to_string(),
            event_type,
            grade,
            group_name: fields[6].trim().to_string(),
            section,
            subject: non_empty(fields[8]),
        });
    }

    Ok(rows)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, PrimitiveDateTime};

    use super::*;

    fn sample_event(title: &str, location: &str) -> Event {
        let date = Date::from_calendar_date(2025, Month::September, 8).unwrap();
        let midnight = PrimitiveDateTime::new(date, Time::MIDNIGHT);
        Event {
            id: "evt-1".to_string(),
            title: title.to_string(),
            event_date: date,
            start_time: Time::from_hms(8, 0, 0).unwrap(),
            end_time: Time::from_hms(10, 30, 0).unwrap(),
            location: location.to_string(),
            description: "Chapitres 1 à 3".to_string(),
            event_type: EventType::Exam,
            grade: Grade::Baccalaureat,
            group_name: "2".to_string(),
            section: Some("Sciences Techniques".to_string()),
            subject: Some("Physique".to_string()),
            created_at: midnight,
            updated_at: midnight,
        }
    }

    #[test]
    fn export_is_positional_and_unescaped() {
        let body = export(&[sample_event("Devoir de synthèse", "Salle 12")]);
        let mut lines = body.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(
                "Devoir de synthèse,Examen,2025-09-08,08:00,10:30,Baccalauréat,2,\
                 Sciences Techniques,Physique,Salle 12,Chapitres 1 à 3"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn roundtrip_preserves_comma_free_events() {
        let event = sample_event("Devoir de synthèse", "Salle 12");
        let rows = parse(&export(&[event.clone()])).expect("parse");

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.title, event.title);
        assert_eq!(row.event_date, event.event_date);
        assert_eq!(row.start_time, event.start_time);
        assert_eq!(row.end_time, event.end_time);
        assert_eq!(row.event_type, event.event_type);
        assert_eq!(row.grade, event.grade);
        assert_eq!(row.group_name, event.group_name);
        assert_eq!(row.section, event.section);
        assert_eq!(row.subject, event.subject);
        assert_eq!(row.location, event.location);
        assert_eq!(row.description, event.description);
    }

    // A comma inside a free-text field shifts every following column. The
    // format has no escaping, so the row fails the field count check.
    #[test]
    fn embedded_comma_corrupts_the_row() {
        let event = sample_event("Devoir", "Salle 3, bâtiment B");
        let result = parse(&export(&[event]));
        assert!(matches!(result, Err(CsvError::FieldCount { line: 2, found: 12 })));
    }

    #[test]
    fn blank_lines_and_header_are_skipped() {
        let body = format!("{CSV_HEADER}\n\n   \n");
        assert_eq!(parse(&body).expect("parse").len(), 0);
    }

    #[test]
    fn section_column_is_ignored_for_plain_grades() {
        let line = "Devoir,Devoir,2025-09-08,08:00,09:00,1ère année primaire,3,Lettres,,Salle 1,";
        let rows = parse(line).expect("parse");
        assert_eq!(rows[0].section, None);
        assert_eq!(rows[0].grade, Grade::PrimaryOne);
        assert_eq!(rows[0].subject, None);
    }

    #[test]
    fn unknown_labels_and_bad_dates_fail_the_parse() {
        let bad_type = "T,Concert,2025-09-08,08:00,09:00,1ère année primaire,3,,,Salle 1,";
        assert!(matches!(parse(bad_type), Err(CsvError::UnknownType { line: 1, .. })));

        let bad_grade = "T,Devoir,2025-09-08,08:00,09:00,Terminale,3,,,Salle 1,";
        assert!(matches!(parse(bad_grade), Err(CsvError::UnknownGrade { line: 1, .. })));

        let bad_date = "T,Devoir,08/09/2025,08:00,09:00,1ère année primaire,3,,,Salle 1,";
        assert!(matches!(parse(bad_date), Err(CsvError::InvalidDate { line: 1, .. })));

        let bad_time = "T,Devoir,2025-09-08,8h,09:00,1ère année primaire,3,,,Salle 1,";
        assert!(matches!(parse(bad_time), Err(CsvError::InvalidTime { line: 1, .. })));
    }
}
