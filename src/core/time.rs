use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

const DATE_FORMAT: &[time::format_description::FormatItem<'_>] =
    format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[time::format_description::FormatItem<'_>] =
    format_description!("[hour]:[minute]");

pub(crate) fn primitive_now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Current UTC date, the "midnight today" reference for the date-window filter.
pub(crate) fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

pub(crate) fn format_primitive(value: PrimitiveDateTime) -> String {
    value.assume_utc().format(&Rfc3339).unwrap_or_else(|_| value.assume_utc().to_string())
}

pub(crate) fn format_date(value: Date) -> String {
    value.format(&DATE_FORMAT).unwrap_or_else(|_| value.to_string())
}

pub(crate) fn format_time(value: Time) -> String {
    value.format(&TIME_FORMAT).unwrap_or_else(|_| value.to_string())
}

pub(crate) fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), &DATE_FORMAT).ok()
}

pub(crate) fn parse_time(raw: &str) -> Option<Time> {
    Time::parse(raw.trim(), &TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_primitive_outputs_utc_z() {
        let date = Date::from_calendar_date(2025, time::Month::January, 2).unwrap();
        let time = Time::from_hms(10, 20, 30).unwrap();
        let value = PrimitiveDateTime::new(date, time);
        assert_eq!(format_primitive(value), "2025-01-02T10:20:30Z");
    }

    #[test]
    fn date_roundtrip() {
        let date = Date::from_calendar_date(2025, time::Month::September, 8).unwrap();
        assert_eq!(format_date(date), "2025-09-08");
        assert_eq!(parse_date("2025-09-08"), Some(date));
        assert_eq!(parse_date(" 2025-09-08 "), Some(date));
        assert_eq!(parse_date("08/09/2025"), None);
    }

    #[test]
    fn time_roundtrip_drops_seconds() {
        let time = Time::from_hms(8, 5, 0).unwrap();
        assert_eq!(format_time(time), "08:05");
        assert_eq!(parse_time("08:05"), Some(time));
        assert_eq!(parse_time("8h05"), None);
    }
}
