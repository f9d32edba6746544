use serde::Serialize;

use crate::core::time::{format_date, format_primitive};
use crate::db::models::AccessLogEntry;
use crate::db::types::Grade;
use crate::services::access_stats::AccessSummary;

#[derive(Debug, Serialize)]
pub(crate) struct AccessLogResponse {
    pub(crate) id: String,
    pub(crate) grade: Grade,
    pub(crate) grade_label: String,
    pub(crate) group_name: String,
    pub(crate) section: Option<String>,
    pub(crate) accessed_at: String,
}

impl AccessLogResponse {
    pub(crate) fn from_db(entry: AccessLogEntry) -> Self {
        Self {
            id: entry.id,
            grade: entry.grade,
            grade_label: entry.grade.label().to_string(),
            group_name: entry.group_name,
            section: entry.section,
            accessed_at: format_primitive(entry.accessed_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GradeCount {
    pub(crate) grade: Grade,
    pub(crate) grade_label: String,
    pub(crate) count: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct DayCount {
    pub(crate) date: String,
    pub(crate) count: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct AccessSummaryResponse {
    pub(crate) total: usize,
    pub(crate) by_grade: Vec<GradeCount>,
    pub(crate) by_day: Vec<DayCount>,
}

impl AccessSummaryResponse {
    pub(crate) fn from_summary(summary: AccessSummary) -> Self {
        Self {
            total: summary.total,
            by_grade: summary
                .by_grade
                .into_iter()
                .map(|(grade, count)| GradeCount {
                    grade,
                    grade_label: grade.label().to_string(),
                    count,
                })
                .collect(),
            by_day: summary
                .by_day
                .into_iter()
                .map(|(date, count)| DayCount { date: format_date(date), count })
                .collect(),
        }
    }
}
