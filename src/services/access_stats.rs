use time::{Date, Duration};

use crate::db::models::AccessLogEntry;
use crate::db::types::Grade;

const DAYS_IN_SUMMARY: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AccessSummary {
    pub(crate) total: usize,
    /// One entry per grade in ladder order, zero counts included, so chart
    /// axes stay stable.
    pub(crate) by_grade: Vec<(Grade, usize)>,
    /// The last seven days ending today, oldest first, zero days included.
    pub(crate) by_day: Vec<(Date, usize)>,
}

pub(crate) fn summarize(entries: &[AccessLogEntry], today: Date) -> AccessSummary {
    let by_grade = Grade::ALL
        .iter()
        .map(|grade| {
            let count = entries.iter().filter(|entry| entry.grade == *grade).count();
            (*grade, count)
        })
        .collect();

    let by_day = (0..DAYS_IN_SUMMARY)
        .rev()
        .map(|offset| {
            let day = today.saturating_sub(Duration::days(offset));
            let count = entries.iter().filter(|entry| entry.accessed_at.date() == day).count();
            (day, count)
        })
        .collect();

    AccessSummary { total: entries.len(), by_grade, by_day }
}

#[cfg(test)]
mod tests {
    use time::{Month, PrimitiveDateTime, Time};

    use super::*;

    fn day(day: u8) -> Date {
        Date::from_calendar_date(2025, Month::September, day).unwrap()
    }

    fn entry(grade: Grade, date: Date) -> AccessLogEntry {
        AccessLogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            grade,
            group_name: "1".to_string(),
            section: None,
            accessed_at: PrimitiveDateTime::new(date, Time::from_hms(9, 15, 0).unwrap()),
        }
    }

    #[test]
    fn empty_log_yields_zeroed_axes() {
        let summary = summarize(&[], day(10));
        assert_eq!(summary.total, 0);
        assert_eq!(summary.by_grade.len(), 13);
        assert!(summary.by_grade.iter().all(|(_, count)| *count == 0));
        assert_eq!(summary.by_day.len(), 7);
        assert_eq!(summary.by_day.first().map(|(date, _)| *date), Some(day(4)));
        assert_eq!(summary.by_day.last().map(|(date, _)| *date), Some(day(10)));
    }

    #[test]
    fn counts_group_by_grade_and_day() {
        let entries = vec![
            entry(Grade::PrimaryOne, day(10)),
            entry(Grade::PrimaryOne, day(9)),
            entry(Grade::Baccalaureat, day(10)),
            // Older than the 7-day window; still counted in totals and grades.
            entry(Grade::Baccalaureat, day(1)),
        ];

        let summary = summarize(&entries, day(10));
        assert_eq!(summary.total, 4);

        let grade_count = |grade: Grade| {
            summary.by_grade.iter().find(|(g, _)| *g == grade).map(|(_, count)| *count)
        };
        assert_eq!(grade_count(Grade::PrimaryOne), Some(2));
        assert_eq!(grade_count(Grade::Baccalaureat), Some(2));
        assert_eq!(grade_count(Grade::BasicSeven), Some(0));

        let day_count = |date: Date| {
            summary.by_day.iter().find(|(d, _)| *d == date).map(|(_, count)| *count)
        };
        assert_eq!(day_count(day(10)), Some(2));
        assert_eq!(day_count(day(9)), Some(1));
        assert_eq!(day_count(day(8)), Some(0));
        assert_eq!(day_count(day(1)), None);
    }
}
